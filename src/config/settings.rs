//! Configuration settings for the Game of Life simulator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::game_of_life::pattern::SHORT_BLOCK_PATTERNS;

/// File name looked up next to the executable when no config is given
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of generations to evolve
    pub evolutions: usize,
    /// Pause between generations, in seconds
    pub delay_interval: f64,
    /// Maximum row width before short-block patterns are trimmed
    pub trim_size: Option<usize>,
    /// Pattern names offered to the user, in display order
    pub patterns: Vec<String>,
    /// Directory holding the `<name>.txt` pattern files
    pub pattern_directory: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            evolutions: 100,
            delay_interval: 0.1,
            trim_size: None,
            patterns: SHORT_BLOCK_PATTERNS.iter().map(|name| name.to_string()).collect(),
            pattern_directory: PathBuf::from("patterns"),
        }
    }
}

impl Settings {
    /// Path of the config file that sits beside the running executable
    pub fn default_path() -> Result<PathBuf> {
        let exe = std::env::current_exe().context("Failed to locate the running executable")?;
        let dir = exe
            .parent()
            .context("Executable path has no parent directory")?;
        Ok(dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Load settings from a YAML or JSON file
    ///
    /// A relative `pattern_directory` is resolved against the directory
    /// containing the config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut settings: Settings = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        };

        if settings.pattern_directory.is_relative() {
            if let Some(parent) = path.parent() {
                settings.pattern_directory = parent.join(&settings.pattern_directory);
            }
        }
        debug!(
            config = %path.display(),
            pattern_directory = %settings.pattern_directory.display(),
            "loaded settings"
        );

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML or JSON file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?
        } else {
            serde_yaml::to_string(self).context("Failed to serialize settings")?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.evolutions == 0 {
            anyhow::bail!("Number of evolutions must be positive");
        }

        if Duration::try_from_secs_f64(self.delay_interval).is_err() {
            anyhow::bail!(
                "Delay interval must be a non-negative number of seconds, got {}",
                self.delay_interval
            );
        }

        if self.trim_size == Some(0) {
            anyhow::bail!("Trim size must be positive when set");
        }

        if self.patterns.is_empty() {
            anyhow::bail!("At least one pattern must be configured");
        }

        for name in &self.patterns {
            if !is_valid_pattern_name(name) {
                anyhow::bail!("Invalid pattern name: {:?}", name);
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(evolutions) = cli_overrides.evolutions {
            self.evolutions = evolutions;
        }
        if let Some(delay_interval) = cli_overrides.delay_interval {
            self.delay_interval = delay_interval;
        }
        if let Some(trim_size) = cli_overrides.trim_size {
            self.trim_size = Some(trim_size);
        }
        if let Some(ref pattern_directory) = cli_overrides.pattern_directory {
            self.pattern_directory = pattern_directory.clone();
        }
    }

    /// Pause between two displayed generations
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_interval).unwrap_or(Duration::ZERO)
    }
}

/// Pattern names map onto file names, so they may not escape the pattern directory
pub fn is_valid_pattern_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub evolutions: Option<usize>,
    pub delay_interval: Option<f64>,
    pub trim_size: Option<usize>,
    pub pattern_directory: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.patterns.len(), 7);
        assert_eq!(settings.delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_yaml_round_trip_resolves_pattern_directory() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut settings = Settings::default();
        settings.evolutions = 12;
        settings.trim_size = Some(4);
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.evolutions, 12);
        assert_eq!(loaded.trim_size, Some(4));
        assert_eq!(loaded.pattern_directory, temp_dir.path().join("patterns"));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "evolutions: 4\ndelay_interval: 0.3\npatterns: [glider]\n").unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.evolutions, 4);
        assert_eq!(loaded.delay(), Duration::from_millis(300));
        assert_eq!(loaded.trim_size, None);
        assert_eq!(loaded.patterns, vec!["glider".to_string()]);
    }

    #[test]
    fn test_json_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"evolutions": 3, "trim_size": 4, "patterns": ["block", "tub"]}"#,
        )
        .unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.evolutions, 3);
        assert_eq!(loaded.trim_size, Some(4));
        assert_eq!(loaded.patterns.len(), 2);
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.evolutions = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.delay_interval = -1.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.trim_size = Some(0);
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.patterns.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.patterns.push("../secret".to_string());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            evolutions: Some(7),
            delay_interval: Some(0.0),
            trim_size: Some(6),
            pattern_directory: None,
        });

        assert_eq!(settings.evolutions, 7);
        assert_eq!(settings.delay(), Duration::ZERO);
        assert_eq!(settings.trim_size, Some(6));
        assert_eq!(settings.pattern_directory, PathBuf::from("patterns"));
    }
}
