use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use cross_xdg::BaseDirs;
use serde::Deserialize;

use crate::interpreter::DEFAULT_LOOP_THRESHOLD;

/// Engine settings read from `bf.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub loop_threshold: u64,
    pub optimize: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loop_threshold: DEFAULT_LOOP_THRESHOLD,
            optimize: true,
        }
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| load_from_toml().unwrap_or_default())
}

/// Resolve the starting loop threshold: flag -> `BF_LOOP_THRESHOLD` -> file -> default.
pub fn loop_threshold(flag: Option<u64>) -> u64 {
    pick_loop_threshold(flag, std::env::var("BF_LOOP_THRESHOLD").ok().as_deref(), settings())
}

/// Resolve whether to optimize: `--no-optimize` -> `BF_OPTIMIZE` -> file -> default.
pub fn optimize(no_optimize_flag: bool) -> bool {
    pick_optimize(no_optimize_flag, std::env::var("BF_OPTIMIZE").ok().as_deref(), settings())
}

fn pick_loop_threshold(flag: Option<u64>, env: Option<&str>, file: &Settings) -> u64 {
    flag.filter(|n| *n > 0)
        .or_else(|| env.and_then(parse_threshold))
        .unwrap_or(file.loop_threshold)
}

fn pick_optimize(no_optimize_flag: bool, env: Option<&str>, file: &Settings) -> bool {
    if no_optimize_flag {
        return false;
    }
    env.and_then(parse_bool).unwrap_or(file.optimize)
}

fn parse_threshold(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|n| *n > 0)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn load_from_toml() -> Option<Settings> {
    let base_dirs = BaseDirs::new().ok()?;

    // Honors XDG_CONFIG_HOME; otherwise <home>/.config on every platform.
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bf.toml");

    let content = fs::read_to_string(&path).ok()?;
    match parse_settings(&content) {
        Ok(settings) => {
            tracing::debug!(path = %path.display(), ?settings, "loaded settings file");
            Some(settings)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable settings file");
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    engine: EngineSection,
}

#[derive(Debug, Default, Deserialize)]
struct EngineSection {
    loop_threshold: Option<u64>,
    optimize: Option<bool>,
}

/// Read the `[engine]` section of a `bf.toml` document.
///
/// Other sections and unknown keys are ignored. A zero threshold keeps the
/// default.
pub fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    let file: SettingsFile = toml::from_str(content)?;
    let defaults = Settings::default();
    Ok(Settings {
        loop_threshold: file
            .engine
            .loop_threshold
            .filter(|n| *n > 0)
            .unwrap_or(defaults.loop_threshold),
        optimize: file.engine.optimize.unwrap_or(defaults.optimize),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_section_overrides_defaults() {
        let cfg = parse_settings(
            "# bf settings\n[colors]\nloop_threshold = 7\n\n[engine]\nloop_threshold = 250\noptimize = false\n",
        )
        .unwrap();
        assert_eq!(cfg, Settings { loop_threshold: 250, optimize: false });
    }

    #[test]
    fn trailing_comments_and_digit_separators_are_toml() {
        let cfg = parse_settings("[engine]\nloop_threshold = 500 # tuned\n").unwrap();
        assert_eq!(cfg.loop_threshold, 500);
        let cfg = parse_settings("[engine]\nloop_threshold = 5_000\n").unwrap();
        assert_eq!(cfg.loop_threshold, 5000);
    }

    #[test]
    fn missing_or_unknown_keys_keep_defaults() {
        assert_eq!(parse_settings("").unwrap(), Settings::default());
        assert_eq!(parse_settings("[engine]\ncolor = \"red\"\n").unwrap(), Settings::default());
        assert_eq!(
            parse_settings("[engine]\nloop_threshold = 0\n").unwrap().loop_threshold,
            DEFAULT_LOOP_THRESHOLD
        );
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(parse_settings("[engine]\nloop_threshold = lots\n").is_err());
        assert!(parse_settings("[engine]\noptimize = \"sometimes\"\n").is_err());
        assert!(parse_settings("[engine]\nloop_threshold = -5\n").is_err());
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let file = Settings { loop_threshold: 50, optimize: false };
        assert_eq!(pick_loop_threshold(Some(9), Some("20"), &file), 9);
        assert_eq!(pick_loop_threshold(None, Some("20"), &file), 20);
        assert_eq!(pick_loop_threshold(None, Some("junk"), &file), 50);
        assert_eq!(pick_loop_threshold(None, None, &file), 50);

        assert!(!pick_optimize(true, Some("1"), &Settings::default()));
        assert!(pick_optimize(false, Some("1"), &file));
        assert!(!pick_optimize(false, None, &file));
    }
}
