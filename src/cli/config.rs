// ABOUTME: Configuration management for the stepgraph application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub strict_validation: bool,

    #[serde(default)]
    pub submissions_dir: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_validation: false,
            submissions_dir: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("stepgraph.yaml"),
            PathBuf::from("stepgraph.yml"),
            PathBuf::from(".stepgraph.yaml"),
            PathBuf::from(".stepgraph.yml"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".stepgraph").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Default path (may not exist)
        PathBuf::from("stepgraph.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("STEPGRAPH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STEPGRAPH_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(strict) = std::env::var("STEPGRAPH_STRICT") {
            self.strict_validation = strict.parse()?;
        }
        if let Ok(dir) = std::env::var("STEPGRAPH_SUBMISSIONS_DIR") {
            self.submissions_dir = Some(PathBuf::from(dir));
        }

        Ok(())
    }

    /// Directory submissions go to when none is given on the command line
    pub fn submissions_dir(&self) -> PathBuf {
        self.submissions_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("submissions"))
    }
}
