mod app;
mod color;
mod config;
mod glyphs;
mod presets;
mod projection;
mod rng;
mod scene;
mod settings;
mod simulation;
mod strip;
mod ui;

use app::{App, Focus};
use clap::Parser;
use color::ColorScheme;
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use glyphs::GlyphMode;
use presets::PresetManager;
use ratatui::{backend::CrosstermBackend, Terminal};
use rng::EntropySource;
use settings::SimulationSettings;
use simulation::RainSimulation;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "matrix-rain")]
#[command(about = "3D digital-rain animation in the terminal")]
struct Args {
    /// Global speed multiplier (0.05-10)
    #[arg(short = 's', long)]
    speed: Option<f32>,

    /// Visual density; strip count is density * 2.2, capped at 2000
    #[arg(short = 'd', long)]
    density: Option<f32>,

    /// Glyph mode (matrix, dna, binary, hex, decimal)
    #[arg(short = 'm', long)]
    mode: Option<String>,

    /// Color scheme (green, amber, ice, violet)
    #[arg(short = 'c', long)]
    scheme: Option<String>,

    /// Disable depth fog
    #[arg(long)]
    no_fog: bool,

    /// Disable the traveling brightness wave
    #[arg(long)]
    no_waves: bool,

    /// Disable camera auto-tracking
    #[arg(long)]
    no_rotate: bool,

    /// Seed the random source for a repeatable run
    #[arg(long)]
    seed: Option<u64>,

    /// Start from a named preset (see --list-presets)
    #[arg(short = 'p', long)]
    preset: Option<String>,

    /// List available presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Save the effective settings as a named user preset and exit
    #[arg(long, value_name = "NAME")]
    save_preset: Option<String>,

    /// Load settings from a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings to a JSON config file and exit
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn parse_mode(s: &str) -> GlyphMode {
    match s.to_lowercase().as_str() {
        "dna" => GlyphMode::Dna,
        "binary" | "bin" => GlyphMode::Binary,
        "hexadecimal" | "hex" => GlyphMode::Hexadecimal,
        "decimal" | "dec" => GlyphMode::Decimal,
        _ => GlyphMode::Matrix,
    }
}

fn parse_scheme(s: &str) -> ColorScheme {
    match s.to_lowercase().as_str() {
        "amber" => ColorScheme::Amber,
        "ice" | "blue" => ColorScheme::Ice,
        "violet" | "purple" => ColorScheme::Violet,
        _ => ColorScheme::Green,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.list_presets {
        let manager = PresetManager::new();
        for preset in manager.all_presets() {
            println!("{:<12} {}", preset.name, preset.description);
        }
        return Ok(());
    }

    // Settings precedence: defaults, then config file, then preset, then
    // individual CLI flags.
    let mut settings = SimulationSettings::default();
    let mut scheme = ColorScheme::default();

    if let Some(path) = &args.config {
        let loaded = AppConfig::load_from_file(path)?;
        settings = loaded.settings;
        scheme = loaded.color_scheme;
    }

    if let Some(name) = &args.preset {
        let manager = PresetManager::new();
        let preset = manager
            .find(name)
            .ok_or_else(|| format!("Unknown preset '{}'; try --list-presets", name))?;
        settings = preset.settings.clone();
        scheme = preset.color_scheme;
    }

    if let Some(speed) = args.speed {
        settings.speed = speed;
    }
    if let Some(density) = args.density {
        settings.density = density;
    }
    if let Some(mode) = &args.mode {
        settings.mode = parse_mode(mode);
    }
    if let Some(s) = &args.scheme {
        scheme = parse_scheme(s);
    }
    if args.no_fog {
        settings.fog = false;
    }
    if args.no_waves {
        settings.waves = false;
    }
    if args.no_rotate {
        settings.rotate = false;
    }
    let settings = settings.clamped();

    if let Some(name) = &args.save_preset {
        let mut manager = PresetManager::new();
        let preset = presets::Preset::new(name.clone(), "User preset", settings.clone(), scheme);
        manager.save_preset(preset)?;
        println!("Saved preset '{}'", name);
        return Ok(());
    }

    if let Some(path) = &args.save_config {
        let config = AppConfig {
            version: 1,
            settings: settings.clone(),
            color_scheme: scheme,
        };
        config.save_to_file(path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let rng: Box<EntropySource> = match args.seed {
        Some(seed) => Box::new(EntropySource::seeded(seed)),
        None => Box::new(EntropySource::new()),
    };
    let simulation = RainSimulation::new(settings, rng);
    let mut app = App::new(simulation, scheme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    // Fixed simulation cadence.
    const FRAME_DURATION: Duration = Duration::from_millis(30);

    loop {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout
        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Handle Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    match key.code {
                        // System controls
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char(' ') => app.toggle_pause(),
                        KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
                        KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_fullscreen(),
                        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                            app.toggle_help()
                        }

                        // Parameter cycling and toggles
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            app.cycle_mode();
                            app.focus = Focus::Mode;
                        }
                        KeyCode::Char('c') | KeyCode::Char('C') => {
                            app.cycle_color_scheme();
                            app.focus = Focus::ColorScheme;
                        }
                        KeyCode::Char('f') | KeyCode::Char('F') => {
                            app.toggle_fog();
                            app.focus = Focus::Fog;
                        }
                        KeyCode::Char('w') | KeyCode::Char('W') => {
                            app.toggle_waves();
                            app.focus = Focus::Waves;
                        }
                        KeyCode::Char('o') | KeyCode::Char('O') => {
                            app.toggle_rotate();
                            app.focus = Focus::Rotate;
                        }
                        KeyCode::Char('+') | KeyCode::Char('=') => {
                            app.adjust_speed(0.1);
                            app.focus = Focus::Speed;
                        }
                        KeyCode::Char('-') | KeyCode::Char('_') => {
                            app.adjust_speed(-0.1);
                            app.focus = Focus::Speed;
                        }
                        KeyCode::Char(']') => {
                            app.adjust_density(5.0);
                            app.focus = Focus::Density;
                        }
                        KeyCode::Char('[') => {
                            app.adjust_density(-5.0);
                            app.focus = Focus::Density;
                        }

                        // Navigation
                        KeyCode::Tab => app.next_focus(),
                        KeyCode::BackTab => app.prev_focus(),
                        KeyCode::Up => {
                            if !app.show_help {
                                if app.focus.is_param() {
                                    app.adjust_focused_up();
                                } else {
                                    app.scroll_controls_up();
                                }
                            }
                        }
                        KeyCode::Down => {
                            if !app.show_help {
                                if app.focus.is_param() {
                                    app.adjust_focused_down();
                                } else {
                                    let term_size = terminal.size().unwrap_or_default();
                                    let visible = term_size.height.saturating_sub(17);
                                    app.scroll_controls_down(
                                        ui::CONTROLS_CONTENT_LINES.saturating_sub(visible),
                                    );
                                }
                            }
                        }
                        KeyCode::Esc => {
                            if app.show_help {
                                app.toggle_help();
                            } else if app.focus.is_param() {
                                app.focus = Focus::None;
                            }
                        }
                        KeyCode::Char('j') | KeyCode::Char('J') => {
                            if app.show_help {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES);
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            if app.show_help {
                                app.scroll_help_up();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Resize(_, _) => {
                    // Canvas size is derived from the frame each draw.
                }
                _ => {}
            }
        }

        // Run simulation tick
        app.tick();
    }
}
