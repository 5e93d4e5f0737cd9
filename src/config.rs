/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub sim: SimConfig,
}

#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Multiplier on every movement speed; 1.0 is cabinet speed.
    pub speed_scale: f32,
    pub starting_lives: u32,
    pub start_level: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            speed_scale: default_speed_scale(),
            starting_lives: default_starting_lives(),
            start_level: default_start_level(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_speed_scale")]
    speed_scale: f32,
    #[serde(default = "default_starting_lives")]
    starting_lives: u32,
    #[serde(default = "default_start_level")]
    start_level: u32,
}

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            speed_scale: default_speed_scale(),
            starting_lives: default_starting_lives(),
            start_level: default_start_level(),
        }
    }
}

fn default_speed_scale() -> f32 {
    1.0
}

fn default_starting_lives() -> u32 {
    3
}

fn default_start_level() -> u32 {
    1
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        GameConfig {
            sim: SimConfig {
                speed_scale: toml_cfg.game.speed_scale.clamp(0.25, 4.0),
                starting_lives: toml_cfg.game.starting_lives.max(1),
                start_level: toml_cfg.game.start_level.max(1),
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so a linked binary still finds its config.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            match toml::from_str(&content) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    eprintln!("Ignoring malformed {}: {e}", path.display());
                    return TomlConfig::default();
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.game.speed_scale, 1.0);
        assert_eq!(cfg.game.starting_lives, 3);
        assert_eq!(cfg.game.start_level, 1);
    }

    #[test]
    fn partial_sections_keep_the_rest_default() {
        let cfg: TomlConfig = toml::from_str("[game]\nstarting_lives = 5\n").unwrap();
        assert_eq!(cfg.game.starting_lives, 5);
        assert_eq!(cfg.game.speed_scale, 1.0);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg: TomlConfig =
            toml::from_str("[game]\nspeed_scale = 2.0\nwibble = \"x\"\n").unwrap();
        assert_eq!(cfg.game.speed_scale, 2.0);
    }
}
