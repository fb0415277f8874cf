use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CrewbookError, Result};

/// How many model cards sit side by side on the model step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelViewMode {
    Single,
    #[default]
    Double,
}

impl ModelViewMode {
    pub fn columns(self) -> usize {
        match self {
            ModelViewMode::Single => 1,
            ModelViewMode::Double => 2,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ModelViewMode::Single => ModelViewMode::Double,
            ModelViewMode::Double => ModelViewMode::Single,
        }
    }
}

/// Hex colour tokens read by every view. Turned into a `tui::Palette` at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub primary: String,
    pub background: String,
    pub card: String,
    pub border: String,
    pub text: String,
    pub muted: String,
    pub track: String,
    pub success: String,
    pub disabled: String,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            primary: "#305B77".into(),
            background: "#F6F7F9".into(),
            card: "#FFFFFF".into(),
            border: "#E6E8EC".into(),
            text: "#1F2A33".into(),
            muted: "#6B7280".into(),
            track: "#D9DEE6".into(),
            success: "#16A34A".into(),
            disabled: "#B9C3CC".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub user_name: String,
    /// Directory holding `themes.json` / `models.json` overrides.
    #[serde(default)]
    pub catalog_dir: Option<String>,
    #[serde(default)]
    pub model_view_mode: ModelViewMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub palette: PaletteSettings,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            catalog_dir: None,
            model_view_mode: ModelViewMode::default(),
            log_level: default_log_level(),
            palette: PaletteSettings::default(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("crewbook")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable files fall back to defaults; partial files merge with them.
pub fn load_settings_from(path: &std::path::Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings_to(settings: &Settings, path: &std::path::Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| CrewbookError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            user_name: "Priya".to_string(),
            catalog_dir: Some("/tmp/catalog".to_string()),
            model_view_mode: ModelViewMode::Single,
            ..Settings::default()
        };
        save_settings_to(&settings, &path).unwrap();
        let loaded = load_settings_from(&path);
        assert_eq!(loaded.user_name, "Priya");
        assert_eq!(loaded.catalog_dir.as_deref(), Some("/tmp/catalog"));
        assert_eq!(loaded.model_view_mode, ModelViewMode::Single);
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("nope.json"));
        assert!(s.user_name.is_empty());
        assert_eq!(s.log_level, "info");
        assert_eq!(s.model_view_mode, ModelViewMode::Double);
        assert_eq!(s.palette.primary, "#305B77");
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r##"{"user_name": "Ravi", "palette": {"primary": "#5B4C3A"}}"##;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.user_name, "Ravi");
        assert_eq!(s.palette.primary, "#5B4C3A");
        assert_eq!(s.palette.disabled, "#B9C3CC");
        assert_eq!(s.log_level, "info");
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let s = load_settings_from(&path);
        assert!(s.catalog_dir.is_none());
    }

    #[test]
    fn test_save_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("nested").join("settings.json");
        save_settings_to(&Settings::default(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_model_view_mode_toggle() {
        assert_eq!(ModelViewMode::Double.toggled(), ModelViewMode::Single);
        assert_eq!(ModelViewMode::Single.columns(), 1);
        assert_eq!(ModelViewMode::Double.columns(), 2);
    }
}
