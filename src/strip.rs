use crate::glyphs::WAVE_SIZE;
use crate::rng::RandomSource;

/// Strip slots per column and vertical extent of the arena.
pub const GRID_SIZE: usize = 70;
/// Depth extent of the arena.
pub const GRID_DEPTH: f32 = 35.0;
/// Fraction of the arena depth at which a strip splashes and recycles.
pub const SPLASH_RATIO: f32 = 0.7;

/// One settled or still-spinning glyph in a strip slot. An empty slot is
/// `None` at the `Strip::glyphs` level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphCell {
    pub glyph: u16,
    pub spinning: bool,
}

/// One falling column of glyphs.
///
/// Strips are created once and recycled in place: completing an erase pass
/// or splashing against the viewer plane overwrites every field via
/// [`Strip::reset`]. The lifecycle is spawning -> active -> erasing -> reset,
/// with `erasing` as the explicit flag and `spinner_position == 0` marking a
/// fresh spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Strip {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    // dx/dy are reserved; default behavior only drives dz.
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
    pub erasing: bool,
    /// Leading glyph; always actively spinning.
    pub spinner_glyph: u16,
    /// How far down the column the leading glyph has descended (0..GRID_SIZE).
    pub spinner_position: f32,
    pub spinner_speed: f32,
    pub glyphs: [Option<GlyphCell>; GRID_SIZE],
    /// Cells rendered at double brightness. Reserved; nothing sets these yet.
    pub highlight: [bool; GRID_SIZE],
    pub spin_cycle: u32,
    pub spin_counter: u32,
    pub wave_phase: usize,
    pub wave_cycle: u32,
    pub wave_counter: u32,
}

fn pick_glyph(table: &[u16], rng: &mut dyn RandomSource) -> u16 {
    let idx = (rng.uniform(table.len() as f32) as usize).min(table.len() - 1);
    table[idx]
}

impl Strip {
    /// A strip in a placeholder state; callers reset it before use.
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            dx: 0.0,
            dy: 0.0,
            dz: 0.0,
            erasing: false,
            spinner_glyph: 0,
            spinner_position: 0.0,
            spinner_speed: 0.0,
            glyphs: [None; GRID_SIZE],
            highlight: [false; GRID_SIZE],
            spin_cycle: 1,
            spin_counter: 0,
            wave_phase: 0,
            wave_cycle: 1,
            wave_counter: 0,
        }
    }

    /// Overwrite every field for a fresh spawn at the top of the arena.
    pub fn reset(&mut self, speed: f32, table: &[u16], rng: &mut dyn RandomSource) {
        self.x = rng.uniform(GRID_SIZE as f32) - GRID_SIZE as f32 / 2.0;
        self.y = GRID_SIZE as f32 / 2.0 + rng.bell(0.5);
        self.z = GRID_DEPTH * 0.2 - rng.uniform(GRID_DEPTH * 0.7);

        self.spinner_position = 0.0;
        self.dx = 0.0;
        self.dy = 0.0;
        self.dz = rng.bell(0.02) * speed;
        self.spinner_speed = rng.bell(0.3) * speed;

        self.spin_cycle = rng.bell(2.0 / speed).floor() as u32 + 1;
        self.spin_counter = 0;

        self.wave_phase = 0;
        self.wave_cycle = rng.bell(3.0 / speed).floor() as u32 + 1;
        self.wave_counter = 0;

        self.erasing = false;

        for (slot, hl) in self.glyphs.iter_mut().zip(self.highlight.iter_mut()) {
            *hl = false;
            // 6 in 7 slots carry a glyph; 1 in 20 of those keep spinning.
            *slot = if rng.uniform(7.0) >= 1.0 {
                Some(GlyphCell {
                    glyph: pick_glyph(table, rng),
                    spinning: rng.uniform(20.0) < 1.0,
                })
            } else {
                None
            };
        }

        self.spinner_glyph = pick_glyph(table, rng);
    }

    /// Advance one tick. Returns true when the strip recycled (splash or a
    /// completed erase pass); no further state changes happen on that tick.
    pub fn tick(&mut self, speed: f32, table: &[u16], rng: &mut dyn RandomSource) -> bool {
        self.x += self.dx;
        self.y += self.dy;
        self.z += self.dz;

        // Splash: the strip has hit the viewer plane.
        if self.z > GRID_DEPTH * SPLASH_RATIO {
            self.reset(speed, table, rng);
            return true;
        }

        self.spinner_position += self.spinner_speed;
        if self.spinner_position >= GRID_SIZE as f32 {
            if self.erasing {
                self.reset(speed, table, rng);
                return true;
            }
            self.erasing = true;
            self.spinner_position = 0.0;
            // Erasure runs slower than the draw-in.
            self.spinner_speed /= 2.0;
        }

        self.spin_counter += 1;
        if self.spin_counter > self.spin_cycle {
            self.spin_counter = 0;
            self.spinner_glyph = pick_glyph(table, rng);
            for slot in self.glyphs.iter_mut().flatten() {
                if slot.spinning {
                    slot.glyph = pick_glyph(table, rng);
                    if rng.uniform(800.0) < 1.0 {
                        slot.spinning = false;
                    }
                }
            }
        }

        self.wave_counter += 1;
        if self.wave_counter > self.wave_cycle {
            self.wave_counter = 0;
            self.wave_phase = (self.wave_phase + 1) % WAVE_SIZE;
        }

        false
    }

    /// Whether slot `i` is revealed this frame. Glyphs up to the spinner's
    /// depth are shown; while erasing the sense inverts so the tail retracts.
    pub fn slot_visible(&self, i: usize) -> bool {
        (self.spinner_position >= i as f32) != self.erasing
    }

    /// The spinner glyph itself is only drawn while extending.
    pub fn spinner_visible(&self) -> bool {
        !self.erasing
    }
}

impl Default for Strip {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::GlyphMode;
    use crate::rng::{EntropySource, FixedSource};

    fn midpoint_strip() -> Strip {
        let mut strip = Strip::new();
        let mut rng = FixedSource::midpoint();
        strip.reset(1.0, GlyphMode::Matrix.table(), &mut rng);
        strip
    }

    #[test]
    fn reset_with_midpoint_source_is_exact() {
        let strip = midpoint_strip();
        assert!((strip.x - 0.0).abs() < 1e-3);
        assert!((strip.y - 35.25).abs() < 1e-4);
        assert!((strip.z - (-5.25)).abs() < 1e-3);
        assert!((strip.dz - 0.01).abs() < 1e-6);
        assert!((strip.spinner_speed - 0.15).abs() < 1e-6);
        assert_eq!(strip.spin_cycle, 2);
        assert_eq!(strip.wave_cycle, 2);
        assert!(!strip.erasing);
        assert_eq!(strip.spinner_position, 0.0);
        // uniform(7) = 3.5 passes the 6/7 gate, uniform(20) = 10 fails the
        // spin gate: every slot filled, none spinning.
        assert!(strip.glyphs.iter().all(|s| s.is_some()));
        assert!(strip.glyphs.iter().flatten().all(|c| !c.spinning));
        assert!(strip.highlight.iter().all(|&h| !h));
    }

    #[test]
    fn tick_integrates_dz_exactly() {
        let mut strip = midpoint_strip();
        let z0 = strip.z;
        let dz = strip.dz;
        let mut rng = FixedSource::midpoint();
        let recycled = strip.tick(1.0, GlyphMode::Matrix.table(), &mut rng);
        assert!(!recycled);
        assert!((strip.z - (z0 + dz)).abs() < 1e-6);
        assert_eq!(strip.dx, 0.0);
        assert_eq!(strip.dy, 0.0);
    }

    #[test]
    fn visibility_follows_spinner_and_inverts_when_erasing() {
        let mut strip = midpoint_strip();
        strip.spinner_position = 10.0;

        assert!(strip.slot_visible(0));
        assert!(strip.slot_visible(10));
        assert!(!strip.slot_visible(11));
        assert!(strip.spinner_visible());

        strip.erasing = true;
        assert!(!strip.slot_visible(0));
        assert!(!strip.slot_visible(10));
        assert!(strip.slot_visible(11));
        assert!(!strip.spinner_visible());
    }

    #[test]
    fn erase_transition_halves_spinner_speed_and_rewinds() {
        let mut strip = midpoint_strip();
        strip.spinner_position = GRID_SIZE as f32 - 0.01;
        strip.spinner_speed = 1.0;
        let mut rng = FixedSource::midpoint();
        strip.tick(1.0, GlyphMode::Matrix.table(), &mut rng);
        assert!(strip.erasing);
        assert_eq!(strip.spinner_position, 0.0);
        assert!((strip.spinner_speed - 0.5).abs() < 1e-6);
    }

    #[test]
    fn strip_always_recycles_within_bounded_ticks() {
        let table = GlyphMode::Matrix.table();
        let mut rng = FixedSource::midpoint();
        let mut strip = Strip::new();
        strip.reset(1.0, table, &mut rng);

        let mut saw_erasing = false;
        for _ in 0..100_000 {
            saw_erasing |= strip.erasing;
            if strip.tick(1.0, table, &mut rng) {
                assert!(!strip.erasing);
                assert_eq!(strip.spinner_position, 0.0);
                return;
            }
        }
        panic!("strip never recycled (saw_erasing={})", saw_erasing);
    }

    #[test]
    fn splash_triggers_immediate_reset() {
        let table = GlyphMode::Decimal.table();
        let mut rng = EntropySource::seeded(3);
        let mut strip = Strip::new();
        strip.reset(1.0, table, &mut rng);
        strip.z = GRID_DEPTH * SPLASH_RATIO + 0.5;
        strip.dz = 0.1;
        assert!(strip.tick(1.0, table, &mut rng));
        assert!(strip.z <= GRID_DEPTH * SPLASH_RATIO);
    }

    #[test]
    fn spin_refresh_can_lock_spinning_cells() {
        let table = GlyphMode::Binary.table();
        let mut rng = EntropySource::seeded(99);
        let mut strip = Strip::new();
        strip.reset(5.0, table, &mut rng);
        // Force a spinning cell and a tight spin cycle, then tick long
        // enough for the 1/800 lock to fire.
        strip.glyphs[0] = Some(GlyphCell {
            glyph: table[0],
            spinning: true,
        });
        strip.spin_cycle = 1;
        strip.dz = 0.0;
        strip.spinner_speed = 0.0;
        let mut locked = false;
        for _ in 0..50_000 {
            strip.tick(1.0, table, &mut rng);
            if let Some(cell) = strip.glyphs[0] {
                if !cell.spinning {
                    locked = true;
                    break;
                }
            }
        }
        assert!(locked, "spinning cell never locked");
    }
}
