//! Configuration file support for Forja.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/forja/config.toml`.

use crate::labels::Language;
use crate::types::MuscleGroup;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Display configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    /// UI language for labels and messages (es or en)
    #[serde(default)]
    pub language: Language,
}

/// Dashboard configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Muscle groups shown in the days-since-last-stimulus view
    #[serde(default = "default_tracked_groups")]
    pub tracked_groups: Vec<MuscleGroup>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tracked_groups: default_tracked_groups(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("forja")
}

fn default_tracked_groups() -> Vec<MuscleGroup> {
    vec![
        MuscleGroup::Pecho,
        MuscleGroup::Espalda,
        MuscleGroup::Piernas,
        MuscleGroup::Hombros,
    ]
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("forja").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.language, Language::Es);
        assert_eq!(config.dashboard.tracked_groups.len(), 4);
        assert!(config
            .dashboard
            .tracked_groups
            .contains(&MuscleGroup::Pecho));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.display.language, parsed.display.language);
        assert_eq!(
            config.dashboard.tracked_groups,
            parsed.dashboard.tracked_groups
        );
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[display]
language = "en"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.language, Language::En);
        assert_eq!(config.dashboard.tracked_groups.len(), 4); // default
    }
}
