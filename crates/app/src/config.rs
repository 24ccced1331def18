use anyhow::{Context, Result};
use directories::ProjectDirs;
use gradecalc_core::format::HeaderStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::adapters::DEFAULT_DATA_FILE;
use crate::cli::CliArgs;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    pub data_file: PathBuf,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub header_style: HeaderStyle,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// How long a notice stays at the bottom of the screen
    pub notice_seconds: u64,
    /// Number of class rows offered when adding a semester
    pub class_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_seconds: 3,
            class_rows: 7,
        }
    }
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "gradecalc")
        .context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("gradecalc.toml"))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Load the config file, then let CLI flags override it
    pub fn from_cli_and_file(cli_args: &CliArgs, config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load(config_path)?;
        config.apply_cli(cli_args);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli_args: &CliArgs) {
        if let Some(data_file) = &cli_args.data_file {
            self.data_file = data_file.clone();
        }
        if let Some(style) = cli_args.header_style {
            self.storage.header_style = style;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.data_file, PathBuf::from("classes.txt"));
        assert_eq!(config.storage.header_style, HeaderStyle::Substring);
        assert_eq!(config.ui.notice_seconds, 3);
        assert_eq!(config.ui.class_rows, 7);
    }

    #[test]
    fn test_config_serialization_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.data_file = PathBuf::from("/data/grades.txt");
        config.storage.header_style = HeaderStyle::Tagged;
        config.ui.class_rows = 10;

        let toml_str = toml::to_string(&config)?;
        assert!(toml_str.contains("header_style = \"tagged\""));

        let parsed_config: Config = toml::from_str(&toml_str)?;
        assert_eq!(config, parsed_config);
        Ok(())
    }

    #[test]
    fn test_config_missing_sections_use_defaults() -> Result<()> {
        let config: Config = toml::from_str("version = 1\ndata_file = \"grades.txt\"\n")?;
        assert_eq!(config.data_file, PathBuf::from("grades.txt"));
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.ui, UiConfig::default());
        Ok(())
    }

    #[test]
    fn test_config_load_nonexistent_creates_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load(Some(config_path.clone()))?;
        assert_eq!(config, Config::default());
        assert!(config_path.exists());

        Ok(())
    }

    #[test]
    fn test_config_invalid_toml_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "version = \"one\"")?;

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }

    #[test]
    fn test_cli_override() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");

        let original_config = Config {
            data_file: PathBuf::from("/original/classes.txt"),
            ..Config::default()
        };
        original_config.save(&config_path)?;

        let cli_args = CliArgs::parse_from([
            "gradecalc",
            "--data-file", "/override/classes.txt",
            "--header-style", "tagged",
        ]);

        let final_config = Config::from_cli_and_file(&cli_args, Some(config_path))?;
        assert_eq!(final_config.data_file, PathBuf::from("/override/classes.txt"));
        assert_eq!(final_config.storage.header_style, HeaderStyle::Tagged);
        assert_eq!(final_config.ui, UiConfig::default());

        Ok(())
    }

    #[test]
    fn test_get_default_config_path() -> Result<()> {
        let path = get_default_config_path()?;
        assert!(path.ends_with("gradecalc.toml"));
        Ok(())
    }
}
