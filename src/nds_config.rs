// Launcher preferences persisted as TOML
// Only presentation and logging preferences live here; game settings are never saved

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// User preferences for the launcher
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub language: String,   // "en" or "zh"
    pub ascii_slider: bool, // draw the mine slider with plain ASCII
    pub log_level: String,  // env_logger filter, RUST_LOG wins when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>, // unset: ndswpr.log in the local data dir
}

impl Default for Config {
    fn default() -> Self {
        let system_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let language = if system_lang.to_lowercase().starts_with("zh") {
            "zh"
        } else {
            "en"
        };

        Config {
            language: language.to_string(),
            ascii_slider: false,
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

/// Platform config location, e.g. ~/.config/ndswpr/ndswpr.toml on Linux.
/// Falls back to the working directory when no home directory is known.
pub fn config_path() -> Option<PathBuf> {
    let name = env!("CARGO_PKG_NAME");
    if let Some(proj) = ProjectDirs::from("com", "xhbl", name) {
        let mut path = proj.config_dir().to_path_buf();
        path.push(format!("{}.toml", name));
        return Some(path);
    }
    env::current_dir()
        .ok()
        .map(|dir| dir.join(format!("{}.toml", name)))
}

/// Where log records go: the configured file, else the platform local data dir
pub fn log_path(cfg: &Config) -> PathBuf {
    let name = env!("CARGO_PKG_NAME");
    if let Some(file) = cfg.log_file.as_deref() {
        return PathBuf::from(file);
    }
    let file = format!("{}.log", name);
    match ProjectDirs::from("com", "xhbl", name) {
        Some(proj) => proj.data_local_dir().join(file),
        None => env::temp_dir().join(file),
    }
}

/// Read a config file; missing keys take their defaults
pub fn read_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let s = fs::read_to_string(path)?;
    Ok(toml::from_str::<Config>(&s)?)
}

pub fn write_config(path: &Path, cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let s = toml::to_string(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, s)?;
    Ok(())
}

/// Load configuration from disk, writing the defaults on first run.
/// Logging is not set up yet when this runs, so problems go to stderr.
pub fn load_or_create_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    if path.exists() {
        match read_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => eprintln!("ignoring unreadable config {}: {}", path.display(), e),
        }
        return Config::default();
    }
    let cfg = Config::default();
    if let Err(e) = write_config(&path, &cfg) {
        eprintln!("could not create config {}: {}", path.display(), e);
    }
    cfg
}

/// Save configuration to disk as TOML
pub fn save_config(cfg: &Config) {
    if let Some(path) = config_path() {
        if let Err(e) = write_config(&path, cfg) {
            log::warn!("could not save config {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("ndswpr-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_keys_take_defaults() {
        let cfg: Config = toml::from_str("language = \"zh\"\n").unwrap();
        assert_eq!(cfg.language, "zh");
        assert_eq!(cfg.log_level, "warn");
        assert!(!cfg.ascii_slider);
        assert_eq!(cfg.log_file, None);
    }

    #[test]
    fn write_then_read_back() {
        let path = temp_file("roundtrip.toml");
        let cfg = Config {
            language: "en".to_string(),
            ascii_slider: true,
            log_level: "debug".to_string(),
            log_file: Some("/tmp/ndswpr.log".to_string()),
        };
        write_config(&path, &cfg).unwrap();
        assert_eq!(read_config(&path).unwrap(), cfg);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unset_log_file_is_not_written() {
        let mut cfg = Config::default();
        cfg.log_file = None;
        let s = toml::to_string(&cfg).unwrap();
        assert!(!s.contains("log_file"));
    }

    #[test]
    fn log_path_prefers_configured_file() {
        let mut cfg = Config::default();
        cfg.log_file = Some("/tmp/custom.log".to_string());
        assert_eq!(log_path(&cfg), PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn log_path_defaults_to_a_file() {
        let mut cfg = Config::default();
        cfg.log_file = None;
        let path = log_path(&cfg);
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("ndswpr.log"));
        assert!(path.is_absolute());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_file("broken.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "language = [").unwrap();
        assert!(read_config(&path).is_err());
        let _ = fs::remove_file(&path);
    }
}
