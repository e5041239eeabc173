//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default data directory
    pub dir: Option<PathBuf>,

    /// Editor command for editing note content
    pub editor: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/study-notes/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("study-notes")
            .join("config.toml")
    }

    /// Resolve the data directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Platform data directory (`~/.local/share/study-notes` on Linux)
    /// 4. Current working directory
    pub fn data_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .or_else(|| dirs::data_dir().map(|d| d.join("study-notes")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the editor command.
    ///
    /// Precedence order:
    /// 1. Config file `editor` setting
    /// 2. $EDITOR environment variable
    /// 3. $VISUAL environment variable
    /// 4. "vi" as fallback
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_dir() {
        let config = Config::default();
        assert!(config.dir.is_none());
    }

    #[test]
    fn data_dir_prefers_cli_arg() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            editor: None,
        };
        let cli_dir = PathBuf::from("/cli/notes");
        assert_eq!(config.data_dir(Some(&cli_dir)), PathBuf::from("/cli/notes"));
    }

    #[test]
    fn data_dir_falls_back_to_config() {
        let config = Config {
            dir: Some(PathBuf::from("/config/notes")),
            editor: None,
        };
        assert_eq!(config.data_dir(None), PathBuf::from("/config/notes"));
    }

    #[test]
    fn data_dir_falls_back_to_platform_dir() {
        let config = Config::default();
        let dir = config.data_dir(None);
        match dirs::data_dir() {
            Some(base) => assert_eq!(dir, base.join("study-notes")),
            None => assert_eq!(dir, PathBuf::from(".")),
        }
    }

    #[test]
    fn editor_prefers_config() {
        let config = Config {
            dir: None,
            editor: Some("nano".to_string()),
        };
        assert_eq!(config.editor(), "nano");
    }

    #[test]
    fn parse_reads_known_keys() {
        let config = Config::parse("dir = \"/tmp/notes\"\neditor = \"code --wait\"\n").unwrap();
        assert_eq!(config.dir, Some(PathBuf::from("/tmp/notes")));
        assert_eq!(config.editor.as_deref(), Some("code --wait"));
    }

    #[test]
    fn parse_rejects_bad_toml() {
        assert!(Config::parse("dir = ").is_err());
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("study-notes/config.toml"));
    }
}
