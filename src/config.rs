use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ROOT_ENV: &str = "STICKY_NOTES_ROOT";
pub const CONFIG_ENV: &str = "STICKY_NOTES_CONFIG";

const DEFAULT_EXTENSIONS: &[&str] = &["note"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no notes root configured; set `root` in the settings file or export {ROOT_ENV}")]
    MissingRoot,
    #[error("cannot expand `~` in {path}: HOME is not set")]
    NoHome { path: String },
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Validated settings: where notes live and which extensions count as notes.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub note_file_extensions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    root: Option<String>,
    note_file_extensions: Option<Vec<String>>,
}

impl Config {
    /// Resolve settings from the environment and the TOML settings file.
    ///
    /// `STICKY_NOTES_ROOT` overrides the file's `root`; when it is set the
    /// settings file may be absent entirely.
    pub fn load() -> Result<Self, ConfigError> {
        let path = settings_path();
        let raw = if path.exists() {
            read_settings(&path)?
        } else {
            RawConfig::default()
        };
        resolve(raw, env::var(ROOT_ENV).ok(), env::var("HOME").ok())
    }
}

fn settings_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    let home = env::var("HOME").unwrap_or_default();
    PathBuf::from(home).join(".config").join("sticky_notes.toml")
}

fn read_settings(path: &Path) -> Result<RawConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve(
    raw: RawConfig,
    env_root: Option<String>,
    home: Option<String>,
) -> Result<Config, ConfigError> {
    let root = env_root.or(raw.root).ok_or(ConfigError::MissingRoot)?;
    let root = expand_home(&root, home.as_deref())?;
    let note_file_extensions = raw.note_file_extensions.unwrap_or_else(|| {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    });
    Ok(Config { root, note_file_extensions })
}

fn expand_home(path: &str, home: Option<&str>) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        let home = home.ok_or_else(|| ConfigError::NoHome {
            path: path.to_string(),
        })?;
        return Ok(PathBuf::from(home));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = home.ok_or_else(|| ConfigError::NoHome {
            path: path.to_string(),
        })?;
        return Ok(PathBuf::from(home).join(rest));
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_root_wins_over_file_root() {
        let raw = RawConfig {
            root: Some("/from/file".to_string()),
            note_file_extensions: None,
        };
        let cfg =
            resolve(raw, Some("/from/env".to_string()), None).unwrap();
        assert_eq!(cfg.root, PathBuf::from("/from/env"));
    }

    #[test]
    fn missing_root_fails_fast() {
        let raw = RawConfig::default();
        let err = resolve(raw, None, Some("/home/u".to_string()));
        assert!(matches!(err, Err(ConfigError::MissingRoot)));
    }

    #[test]
    fn extensions_default_to_note() {
        let raw = RawConfig {
            root: Some("/n".to_string()),
            note_file_extensions: None,
        };
        let cfg = resolve(raw, None, None).unwrap();
        assert_eq!(cfg.note_file_extensions, vec!["note".to_string()]);
    }

    #[test]
    fn tilde_expands_against_home() {
        let raw = RawConfig {
            root: Some("~/notes".to_string()),
            note_file_extensions: Some(vec!["md".to_string()]),
        };
        let cfg = resolve(raw, None, Some("/home/u".to_string())).unwrap();
        assert_eq!(cfg.root, PathBuf::from("/home/u/notes"));
        assert_eq!(cfg.note_file_extensions, vec!["md".to_string()]);
    }

    #[test]
    fn tilde_without_home_is_an_error() {
        let raw = RawConfig {
            root: Some("~/notes".to_string()),
            note_file_extensions: None,
        };
        let err = resolve(raw, None, None);
        assert!(matches!(err, Err(ConfigError::NoHome { .. })));
    }

    #[test]
    fn parses_settings_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sticky_notes.toml");
        fs::write(
            &path,
            "root = \"/srv/notes\"\nnote_file_extensions = [\"note\", \"txt\"]\n",
        )
        .unwrap();
        let raw = read_settings(&path).unwrap();
        let cfg = resolve(raw, None, None).unwrap();
        assert_eq!(cfg.root, PathBuf::from("/srv/notes"));
        assert_eq!(cfg.note_file_extensions, vec!["note", "txt"]);
    }

    #[test]
    fn rejects_malformed_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sticky_notes.toml");
        fs::write(&path, "root = [not toml").unwrap();
        assert!(matches!(
            read_settings(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
