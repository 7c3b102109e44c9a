use crate::glyphs::{build_ramp, WAVE_SIZE};
use crate::rng::RandomSource;
use crate::settings::SimulationSettings;
use crate::strip::{Strip, GRID_DEPTH, GRID_SIZE, SPLASH_RATIO};

/// Preset (pitch, yaw) camera angles, degrees. Index 0 is the straight-on
/// starting view and is never re-chosen as a tracking target.
pub const NICE_VIEWS: [(f32, f32); 16] = [
    (0.0, 0.0),
    (0.0, -20.0),
    (0.0, 20.0),
    (25.0, 0.0),
    (-25.0, 0.0),
    (25.0, 20.0),
    (-25.0, 20.0),
    (25.0, -20.0),
    (-25.0, -20.0),
    (10.0, 0.0),
    (-10.0, 0.0),
    (0.0, -10.0),
    (0.0, 10.0),
    (12.0, -12.0),
    (-12.0, 12.0),
    (5.0, 5.0),
];

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Camera auto-tracking: periodic eased transitions between preset views.
#[derive(Debug, Clone)]
pub struct Camera {
    pub last_view: usize,
    pub target_view: usize,
    pub view_tick: u32,
    pub view_steps: u32,
    pub view_x: f32,
    pub view_y: f32,
    pub auto_tracking: bool,
    pub track_tick: u32,
}

impl Camera {
    pub fn new() -> Self {
        let (view_x, view_y) = NICE_VIEWS[0];
        Self {
            last_view: 0,
            target_view: 0,
            view_tick: 0,
            view_steps: 100,
            view_x,
            view_y,
            auto_tracking: false,
            track_tick: 0,
        }
    }

    /// Advance the tracking state machine by one tick.
    pub fn tick(&mut self, speed: f32, rng: &mut dyn RandomSource) {
        if !self.auto_tracking {
            self.track_tick += 1;
            if self.track_tick > (20.0 / speed) as u32 {
                self.track_tick = 0;
                if rng.uniform(20.0) < 1.0 {
                    self.auto_tracking = true;
                    // Target drawn from [1, 15]; index 0 stays reserved, so
                    // even the first transition has somewhere to go.
                    self.target_view =
                        (1 + rng.uniform(15.0) as usize).min(NICE_VIEWS.len() - 1);
                }
            }
            return;
        }

        let t = (std::f32::consts::FRAC_PI_2 * self.view_tick as f32 / self.view_steps.max(1) as f32)
            .sin();
        let (ox, oy) = NICE_VIEWS[self.last_view % NICE_VIEWS.len()];
        let (tx, ty) = NICE_VIEWS[self.target_view % NICE_VIEWS.len()];
        self.view_x = lerp(ox, tx, t);
        self.view_y = lerp(oy, ty, t);

        self.view_tick += 1;
        if self.view_tick >= self.view_steps {
            self.view_tick = 0;
            self.view_steps = ((350.0 / speed) as u32).max(1);
            self.last_view = self.target_view;
            self.auto_tracking = false;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// The digital-rain engine: owns the recycled strip population, the glyph
/// mode, the precomputed brightness ramp and the camera.
pub struct RainSimulation {
    pub settings: SimulationSettings,
    strips: Vec<Strip>,
    ramp: [f32; WAVE_SIZE],
    pub camera: Camera,
    pub paused: bool,
    rng: Box<dyn RandomSource>,
}

impl RainSimulation {
    pub fn new(settings: SimulationSettings, rng: Box<dyn RandomSource>) -> Self {
        let settings = settings.clamped();
        let mut sim = Self {
            settings,
            strips: Vec::new(),
            ramp: build_ramp(),
            camera: Camera::new(),
            paused: false,
            rng,
        };
        sim.resize_population();
        sim
    }

    /// Grow or shrink the strip population to match the current density.
    /// Existing strips keep their state; new ones spawn fresh.
    pub fn resize_population(&mut self) {
        let want = self.settings.strip_count();
        let speed = self.settings.speed;
        let table = self.settings.mode.table();
        while self.strips.len() < want {
            let mut strip = Strip::new();
            strip.reset(speed, table, self.rng.as_mut());
            self.strips.push(strip);
        }
        self.strips.truncate(want);
    }

    /// Respawn every strip in place. Used when the glyph mode changes.
    pub fn reset_strips(&mut self) {
        let speed = self.settings.speed;
        let table = self.settings.mode.table();
        for strip in &mut self.strips {
            strip.reset(speed, table, self.rng.as_mut());
        }
    }

    /// Advance one step: every strip, then the camera. The only externally
    /// invoked mutator besides pause and the settings surface.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        let speed = self.settings.speed;
        let table = self.settings.mode.table();
        for strip in &mut self.strips {
            strip.tick(speed, table, self.rng.as_mut());
        }
        if self.settings.rotate {
            self.camera.tick(speed, self.rng.as_mut());
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    #[cfg(test)]
    pub(crate) fn strips_mut(&mut self) -> &mut [Strip] {
        &mut self.strips
    }

    pub fn view_angles(&self) -> (f32, f32) {
        (self.camera.view_x, self.camera.view_y)
    }

    /// Brightness of the glyph at `slot` on `strip`, in [0, 1].
    ///
    /// Applies the traveling wave, the spinner and highlight boosts, depth
    /// fog, and the near-camera fade that precedes a splash.
    pub fn brightness(&self, strip: &Strip, slot: usize, spinner: bool, highlight: bool) -> f32 {
        let mut b = if !self.settings.waves {
            1.0
        } else {
            let phase_off = GRID_SIZE - strip.wave_phase.min(GRID_SIZE);
            let idx = (WAVE_SIZE - (slot + phase_off) % WAVE_SIZE) % WAVE_SIZE;
            self.ramp[idx.min(WAVE_SIZE - 1)]
        };

        if spinner {
            b *= 1.5;
        }
        if highlight {
            b *= 2.0;
        }

        if self.settings.fog {
            let depth = 0.2 + 0.8 * (strip.z / GRID_DEPTH + 0.5);
            b *= depth;
        }

        // Fade out in the last stretch before the splash threshold.
        if strip.z > GRID_DEPTH / 2.0 {
            let ratio =
                (strip.z - GRID_DEPTH / 2.0) / (GRID_DEPTH * SPLASH_RATIO - GRID_DEPTH / 2.0);
            let idx = ((ratio * WAVE_SIZE as f32) as isize).clamp(0, WAVE_SIZE as isize - 1);
            b *= self.ramp[idx as usize];
        }

        b.clamp(0.0, 1.0)
    }
}
