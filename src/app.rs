use crate::color::ColorScheme;
use crate::simulation::RainSimulation;

/// Focus state for parameter editing in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    None,
    Speed,
    Density,
    Mode,
    ColorScheme,
    Fog,
    Waves,
    Rotate,
    // Controls box (not a param)
    Controls,
}

impl Focus {
    /// Tab cycles through parameters in display order
    pub fn next(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Speed,
            Focus::Speed => Focus::Density,
            Focus::Density => Focus::Mode,
            Focus::Mode => Focus::ColorScheme,
            Focus::ColorScheme => Focus::Fog,
            Focus::Fog => Focus::Waves,
            Focus::Waves => Focus::Rotate,
            Focus::Rotate => Focus::Speed, // Loop back
        }
    }

    /// Shift+Tab cycles in reverse
    pub fn prev(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Rotate,
            Focus::Speed => Focus::Rotate, // Loop back
            Focus::Density => Focus::Speed,
            Focus::Mode => Focus::Density,
            Focus::ColorScheme => Focus::Mode,
            Focus::Fog => Focus::ColorScheme,
            Focus::Waves => Focus::Fog,
            Focus::Rotate => Focus::Waves,
        }
    }

    /// Line index in the parameters box for this focus
    pub fn line_index(&self) -> u16 {
        match self {
            Focus::None | Focus::Controls => 0,
            Focus::Speed => 0,
            Focus::Density => 1,
            Focus::Mode => 2,
            Focus::ColorScheme => 3,
            Focus::Fog => 4,
            Focus::Waves => 5,
            Focus::Rotate => 6,
        }
    }

    /// Check if focus is on a parameter (not Controls or None)
    pub fn is_param(&self) -> bool {
        !matches!(self, Focus::None | Focus::Controls)
    }
}

/// Main application state
pub struct App {
    pub simulation: RainSimulation,
    pub color_scheme: ColorScheme,
    pub focus: Focus,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    pub controls_scroll: u16,
}

impl App {
    pub fn new(simulation: RainSimulation, color_scheme: ColorScheme) -> Self {
        Self {
            simulation,
            color_scheme,
            focus: Focus::Controls,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            controls_scroll: 0,
        }
    }

    /// Advance the simulation one frame
    pub fn tick(&mut self) {
        self.simulation.tick();
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_up(&mut self) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::Speed => self.adjust_speed(0.1),
            Focus::Density => self.adjust_density(5.0),
            Focus::Mode => self.cycle_mode(),
            Focus::ColorScheme => self.cycle_color_scheme(),
            Focus::Fog => self.simulation.settings.toggle_fog(),
            Focus::Waves => self.simulation.settings.toggle_waves(),
            Focus::Rotate => self.simulation.settings.toggle_rotate(),
        }
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_down(&mut self) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::Speed => self.adjust_speed(-0.1),
            Focus::Density => self.adjust_density(-5.0),
            Focus::Mode => self.cycle_mode_prev(),
            Focus::ColorScheme => self.cycle_color_scheme_prev(),
            Focus::Fog => self.simulation.settings.toggle_fog(),
            Focus::Waves => self.simulation.settings.toggle_waves(),
            Focus::Rotate => self.simulation.settings.toggle_rotate(),
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn toggle_pause(&mut self) {
        self.simulation.toggle_pause();
    }

    /// Respawn every strip
    pub fn reset(&mut self) {
        self.simulation.reset_strips();
    }

    pub fn adjust_speed(&mut self, delta: f32) {
        self.simulation.settings.adjust_speed(delta);
    }

    /// Density changes grow or shrink the strip population immediately
    pub fn adjust_density(&mut self, delta: f32) {
        self.simulation.settings.adjust_density(delta);
        self.simulation.resize_population();
    }

    /// Mode changes respawn strips so every glyph comes from the new table
    pub fn cycle_mode(&mut self) {
        self.simulation.settings.mode = self.simulation.settings.mode.next();
        self.simulation.reset_strips();
    }

    pub fn cycle_mode_prev(&mut self) {
        self.simulation.settings.mode = self.simulation.settings.mode.prev();
        self.simulation.reset_strips();
    }

    pub fn cycle_color_scheme(&mut self) {
        self.color_scheme = self.color_scheme.next();
    }

    pub fn cycle_color_scheme_prev(&mut self) {
        self.color_scheme = self.color_scheme.prev();
    }

    pub fn toggle_fog(&mut self) {
        self.simulation.settings.toggle_fog();
    }

    pub fn toggle_waves(&mut self) {
        self.simulation.settings.toggle_waves();
    }

    pub fn toggle_rotate(&mut self) {
        self.simulation.settings.toggle_rotate();
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }

    pub fn scroll_controls_up(&mut self) {
        self.controls_scroll = self.controls_scroll.saturating_sub(1);
    }

    pub fn scroll_controls_down(&mut self, max_scroll: u16) {
        self.controls_scroll = (self.controls_scroll + 1).min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::GlyphMode;
    use crate::rng::FixedSource;
    use crate::settings::SimulationSettings;

    fn test_app() -> App {
        let sim = RainSimulation::new(
            SimulationSettings::default(),
            Box::new(FixedSource::midpoint()),
        );
        App::new(sim, ColorScheme::Green)
    }

    #[test]
    fn focus_cycle_visits_every_param_and_wraps() {
        let mut focus = Focus::Speed;
        let mut seen = vec![focus];
        loop {
            focus = focus.next();
            if focus == Focus::Speed {
                break;
            }
            seen.push(focus);
        }
        assert_eq!(seen.len(), 7);
        assert!(seen.iter().all(|f| f.is_param()));
        assert_eq!(Focus::Density.next().prev(), Focus::Density);
    }

    #[test]
    fn density_adjust_resizes_population() {
        let mut app = test_app();
        let before = app.simulation.strips().len();
        app.focus = Focus::Density;
        app.adjust_focused_up();
        assert!(app.simulation.strips().len() > before);
    }

    #[test]
    fn mode_cycle_respawns_with_new_table() {
        let mut app = test_app();
        app.cycle_mode();
        assert_eq!(app.simulation.settings.mode, GlyphMode::Dna);
        let table = GlyphMode::Dna.table();
        for strip in app.simulation.strips() {
            for cell in strip.glyphs.iter().flatten() {
                assert!(table.contains(&cell.glyph));
            }
        }
    }

    #[test]
    fn toggles_flip_settings() {
        let mut app = test_app();
        let fog = app.simulation.settings.fog;
        app.focus = Focus::Fog;
        app.adjust_focused_up();
        assert_eq!(app.simulation.settings.fog, !fog);
        app.adjust_focused_down();
        assert_eq!(app.simulation.settings.fog, fog);
    }
}
