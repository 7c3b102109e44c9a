use crate::glyphs::GlyphMode;
use serde::{Deserialize, Serialize};

pub const MIN_SPEED: f32 = 0.05;
pub const MAX_SPEED: f32 = 10.0;
pub const MIN_DENSITY: f32 = 0.0;
pub const MAX_DENSITY: f32 = 1000.0;
/// Hard bounds on the derived strip population.
pub const MIN_STRIPS: usize = 1;
pub const MAX_STRIPS: usize = 2000;

/// All simulation settings consolidated into one struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Global rate multiplier for fall speed, spin and wave cadence (0.05-10)
    pub speed: f32,
    /// Visual density; strip count is density * 2.2 clamped to [1, 2000]
    pub density: f32,
    /// Depth-fog brightness falloff
    pub fog: bool,
    /// Traveling brightness wave along each strip
    pub waves: bool,
    /// Camera auto-tracking between preset views
    pub rotate: bool,
    /// Character set populating the strips
    pub mode: GlyphMode,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            density: 20.0,
            fog: true,
            waves: true,
            rotate: true,
            mode: GlyphMode::default(),
        }
    }
}

impl SimulationSettings {
    /// Number of strips this density works out to.
    pub fn strip_count(&self) -> usize {
        ((self.density * 2.2).round() as isize).clamp(MIN_STRIPS as isize, MAX_STRIPS as isize)
            as usize
    }

    /// Clamp into the valid ranges; used at construction so out-of-range
    /// CLI or config values are corrected rather than rejected.
    pub fn clamped(mut self) -> Self {
        self.speed = self.speed.clamp(MIN_SPEED, MAX_SPEED);
        self.density = self.density.clamp(MIN_DENSITY, MAX_DENSITY);
        self
    }

    /// Adjust speed within bounds
    pub fn adjust_speed(&mut self, delta: f32) {
        self.speed = (self.speed + delta).clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Adjust density within bounds
    pub fn adjust_density(&mut self, delta: f32) {
        self.density = (self.density + delta).clamp(MIN_DENSITY, MAX_DENSITY);
    }

    pub fn toggle_fog(&mut self) {
        self.fog = !self.fog;
    }

    pub fn toggle_waves(&mut self) {
        self.waves = !self.waves;
    }

    pub fn toggle_rotate(&mut self) {
        self.rotate = !self.rotate;
    }
}
