use crate::color::ColorScheme;
use crate::glyphs::symbol;
use crate::projection::project;
use crate::simulation::RainSimulation;
use crate::strip::{Strip, GRID_SIZE};
use ratatui::style::Color;

/// One drawable terminal cell produced from the projected scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

/// Strips ordered farthest-first so nearer glyphs paint over farther ones.
fn back_to_front(strips: &[Strip]) -> Vec<&Strip> {
    let mut ordered: Vec<&Strip> = strips.iter().collect();
    ordered.sort_by(|a, b| a.z.partial_cmp(&b.z).unwrap_or(std::cmp::Ordering::Equal));
    ordered
}

/// Project the current simulation state into terminal draw commands.
///
/// Pure with respect to the simulation: repeated calls while paused yield
/// identical output. Terminal cells are about twice as tall as wide, so the
/// projection runs in a doubled-height pixel space and y is halved on the
/// way back to cells.
pub fn render_scene(
    sim: &RainSimulation,
    canvas_width: u16,
    canvas_height: u16,
    scheme: ColorScheme,
) -> Vec<SceneCell> {
    if canvas_width == 0 || canvas_height == 0 {
        return Vec::new();
    }

    let vw = canvas_width as f32;
    let vh = canvas_height as f32 * 2.0;
    let (pitch, yaw) = sim.view_angles();

    let mut cells = Vec::new();
    let mut push = |px: f32, py: f32, ch: char, color: Color| {
        let x = px.round();
        let y = (py / 2.0).round();
        if x >= 0.0 && y >= 0.0 && (x as u16) < canvas_width && (y as u16) < canvas_height {
            cells.push(SceneCell {
                x: x as u16,
                y: y as u16,
                char: ch,
                color,
            });
        }
    };

    for strip in back_to_front(sim.strips()) {
        for (slot, cell) in strip.glyphs.iter().enumerate() {
            let Some(cell) = cell else { continue };
            if !strip.slot_visible(slot) {
                continue;
            }
            let point = [strip.x, strip.y - slot as f32, strip.z];
            let Some(p) = project(point, pitch, yaw, vw, vh) else {
                continue;
            };
            let b = sim.brightness(strip, slot, false, strip.highlight[slot]);
            push(p.x, p.y, symbol(cell.glyph), scheme.shade(b));
        }

        if strip.spinner_visible() {
            let point = [strip.x, strip.y - strip.spinner_position, strip.z];
            if let Some(p) = project(point, pitch, yaw, vw, vh) {
                let slot = (strip.spinner_position as usize).min(GRID_SIZE - 1);
                let b = sim.brightness(strip, slot, true, false);
                push(p.x, p.y, symbol(strip.spinner_glyph), scheme.spinner_shade(b));
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{EntropySource, FixedSource};
    use crate::settings::SimulationSettings;

    fn seeded_sim(density: f32) -> RainSimulation {
        let settings = SimulationSettings {
            density,
            ..Default::default()
        };
        RainSimulation::new(settings, Box::new(EntropySource::seeded(17)))
    }

    #[test]
    fn all_cells_land_inside_the_canvas() {
        let mut sim = seeded_sim(30.0);
        for _ in 0..20 {
            sim.tick();
        }
        let cells = render_scene(&sim, 80, 24, ColorScheme::Green);
        assert!(!cells.is_empty());
        for cell in cells {
            assert!(cell.x < 80);
            assert!(cell.y < 24);
        }
    }

    #[test]
    fn zero_canvas_renders_nothing() {
        let sim = seeded_sim(10.0);
        assert!(render_scene(&sim, 0, 24, ColorScheme::Green).is_empty());
        assert!(render_scene(&sim, 80, 0, ColorScheme::Green).is_empty());
    }

    #[test]
    fn rendering_is_idempotent_while_paused() {
        let mut sim = seeded_sim(15.0);
        for _ in 0..5 {
            sim.tick();
        }
        sim.paused = true;
        let a = render_scene(&sim, 60, 20, ColorScheme::Ice);
        sim.tick();
        let b = render_scene(&sim, 60, 20, ColorScheme::Ice);
        assert_eq!(a, b);
    }

    #[test]
    fn strips_are_ordered_farthest_first() {
        let mut sim = RainSimulation::new(
            SimulationSettings {
                density: 2.0, // 4 strips
                ..Default::default()
            },
            Box::new(FixedSource::midpoint()),
        );
        let depths = [5.0, -12.0, 20.0, 0.0];
        for (strip, z) in sim_strips_mut(&mut sim).iter_mut().zip(depths) {
            strip.z = z;
        }
        let ordered = back_to_front(sim.strips());
        let zs: Vec<f32> = ordered.iter().map(|s| s.z).collect();
        assert_eq!(zs, vec![-12.0, 0.0, 5.0, 20.0]);
    }

    // Test-only escape hatch; the render path itself never mutates.
    fn sim_strips_mut(sim: &mut RainSimulation) -> &mut [Strip] {
        sim.strips_mut()
    }
}
