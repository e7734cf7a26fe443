use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::core::TimeWindow;
use crate::storage::StorageKind;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) compact: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    #[serde(default)]
    pub(crate) data_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) storage: Option<StorageKind>,
    #[serde(default)]
    pub(crate) page_size: Option<usize>,
    #[serde(default)]
    pub(crate) expiry_days: Option<i64>,
    #[serde(default)]
    pub(crate) window: Option<TimeWindow>,
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// File the config was read from
    #[serde(skip)]
    pub(crate) source: Option<PathBuf>,
    /// Parse failures of config files that were skipped
    #[serde(skip)]
    pub(crate) warnings: Vec<String>,
}

impl Config {
    /// Load the first parseable config file.
    ///
    /// Runs before logging is set up, so problems are collected in
    /// `warnings` for the caller to report.
    pub(crate) fn load() -> Self {
        let mut warnings = Vec::new();

        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::parse(&content) {
                    Ok(mut config) => {
                        config.source = Some(path);
                        config.warnings = warnings;
                        return config;
                    }
                    Err(e) => {
                        warnings.push(format!("Failed to parse {}: {}", path.display(), e));
                    }
                }
            }
        }

        Self {
            warnings,
            ..Self::default()
        }
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Config>(content)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/repositor/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("repositor").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support/repositor/config.toml)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("repositor").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.repositor.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".repositor.toml"));
        }

        paths
    }
}

/// Default data directory when neither flag, env nor config names one
pub(crate) fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("repositor")
}
