//! Preferencias del usuario en `settings.toml`.

use crate::config::config::{
    DEFAULT_PRELOAD_RANGE, DEFAULT_THUMBNAIL_SIZE, SETTINGS_DIR, SETTINGS_FILE,
};
use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gallery_dir: Option<PathBuf>,
    pub preload_range: usize,
    pub thumbnail_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gallery_dir: None,
            preload_range: DEFAULT_PRELOAD_RANGE,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|path| path.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn load() -> Result<Settings> {
    match default_settings_path() {
        Some(path) if path.exists() => load_from_path(&path),
        _ => Ok(Settings::default()),
    }
}

pub fn save(settings: &Settings) -> Result<()> {
    if let Some(path) = default_settings_path() {
        save_to_path(settings, &path)?;
    }
    Ok(())
}

/// Un TOML inválido no impide arrancar: se usan los valores por defecto.
pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring invalid settings: {e}");
            Ok(Settings::default())
        }
    }
}

pub fn save_to_path(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip() {
        let settings = Settings {
            gallery_dir: Some(PathBuf::from("/srv/portfolio")),
            preload_range: 3,
            thumbnail_size: 256,
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        save_to_path(&settings, &path).unwrap();
        assert_eq!(load_from_path(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "preload_range = 2\n").unwrap();

        let settings = load_from_path(&path).unwrap();
        assert_eq!(settings.preload_range, 2);
        assert_eq!(settings.thumbnail_size, DEFAULT_THUMBNAIL_SIZE);
        assert_eq!(settings.gallery_dir, None);
    }

    #[test]
    fn invalid_toml_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "preload_range = \"lots\"").unwrap();

        assert_eq!(load_from_path(&path).unwrap(), Settings::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_from_path(&dir.path().join("absent.toml")).is_err());
    }
}
