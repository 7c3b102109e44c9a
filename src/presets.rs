use crate::color::ColorScheme;
use crate::glyphs::GlyphMode;
use crate::settings::SimulationSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// A named preset containing simulation settings and a color scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub settings: SimulationSettings,
    pub color_scheme: ColorScheme,
}

impl Preset {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        settings: SimulationSettings,
        color_scheme: ColorScheme,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            settings,
            color_scheme,
        }
    }
}

/// Manager for loading and saving presets
pub struct PresetManager {
    /// Built-in presets that ship with the app
    pub builtin: Vec<Preset>,
    /// User-created presets loaded from disk
    pub user: Vec<Preset>,
}

impl Default for PresetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetManager {
    pub fn new() -> Self {
        let mut manager = Self {
            builtin: Vec::new(),
            user: Vec::new(),
        };
        manager.load_builtin_presets();
        manager.load_user_presets();
        manager
    }

    /// Load the built-in presets
    fn load_builtin_presets(&mut self) {
        self.builtin = vec![
            Preset::new(
                "Classic",
                "The canonical green katakana rain",
                SimulationSettings::default(),
                ColorScheme::Green,
            ),
            Preset::new(
                "Downpour",
                "Fast, dense rain",
                SimulationSettings {
                    speed: 2.0,
                    density: 60.0,
                    ..Default::default()
                },
                ColorScheme::Green,
            ),
            Preset::new(
                "Drizzle",
                "Slow and sparse, fixed camera",
                SimulationSettings {
                    speed: 0.5,
                    density: 8.0,
                    rotate: false,
                    ..Default::default()
                },
                ColorScheme::Green,
            ),
            Preset::new(
                "Sequencer",
                "Amber DNA bases drifting by",
                SimulationSettings {
                    mode: GlyphMode::Dna,
                    speed: 0.8,
                    ..Default::default()
                },
                ColorScheme::Amber,
            ),
            Preset::new(
                "Core Dump",
                "Dense hexadecimal in cold blue",
                SimulationSettings {
                    mode: GlyphMode::Hexadecimal,
                    density: 40.0,
                    ..Default::default()
                },
                ColorScheme::Ice,
            ),
            Preset::new(
                "Bitstream",
                "Binary rain without fog or waves",
                SimulationSettings {
                    mode: GlyphMode::Binary,
                    fog: false,
                    waves: false,
                    ..Default::default()
                },
                ColorScheme::Violet,
            ),
            Preset::new(
                "Ticker",
                "Decimal digits, stately pace",
                SimulationSettings {
                    mode: GlyphMode::Decimal,
                    speed: 0.3,
                    density: 15.0,
                    ..Default::default()
                },
                ColorScheme::Amber,
            ),
        ];
    }

    /// Get the presets directory path
    fn presets_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("matrix-rain").join("presets"))
    }

    /// Load user presets from disk
    fn load_user_presets(&mut self) {
        if let Some(dir) = Self::presets_dir() {
            if dir.exists() {
                if let Ok(entries) = fs::read_dir(&dir) {
                    for entry in entries.flatten() {
                        if entry.path().extension().is_some_and(|e| e == "json") {
                            if let Ok(content) = fs::read_to_string(entry.path()) {
                                if let Ok(preset) = serde_json::from_str::<Preset>(&content) {
                                    self.user.push(preset);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Save a preset to disk
    pub fn save_preset(&mut self, preset: Preset) -> Result<(), String> {
        let dir = Self::presets_dir().ok_or("Could not determine config directory")?;

        fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create presets directory: {}", e))?;

        let filename = Self::sanitize_name(&preset.name);
        let path = dir.join(format!("{}.json", filename));

        let json = serde_json::to_string_pretty(&preset)
            .map_err(|e| format!("Failed to serialize preset: {}", e))?;

        fs::write(&path, json).map_err(|e| format!("Failed to write preset file: {}", e))?;

        if !self.user.iter().any(|p| p.name == preset.name) {
            self.user.push(preset);
        }

        Ok(())
    }

    fn sanitize_name(name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Get all presets (builtin + user)
    pub fn all_presets(&self) -> impl Iterator<Item = &Preset> {
        self.builtin.iter().chain(self.user.iter())
    }

    /// Find a preset by name
    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.all_presets()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}
