//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigSortOrder};
use crate::storage::StorageKind;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortOrder {
    /// Smallest or oldest first
    Asc,
    /// Largest or newest first (default)
    #[default]
    Desc,
}

impl From<ConfigSortOrder> for SortOrder {
    fn from(order: ConfigSortOrder) -> Self {
        match order {
            ConfigSortOrder::Asc => SortOrder::Asc,
            ConfigSortOrder::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ConfigColorMode> for ColorMode {
    fn from(mode: ConfigColorMode) -> Self {
        match mode {
            ConfigColorMode::Auto => ColorMode::Auto,
            ConfigColorMode::Always => ColorMode::Always,
            ConfigColorMode::Never => ColorMode::Never,
        }
    }
}

#[derive(Parser)]
#[command(name = "repositor")]
#[command(about = "Restocking log and stock-loss dashboard for a retail store", version)]
#[command(args_override_self = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Output the task listing as CSV
    #[arg(long, global = true, conflicts_with = "json")]
    pub(crate) csv: bool,

    /// Sort order for listings [default: desc]
    #[arg(short, long, global = true, value_enum)]
    pub(crate) order: Option<SortOrder>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Compact output (fewer columns, shorter numbers)
    #[arg(short = 'c', long, global = true)]
    pub(crate) compact: bool,

    /// Timezone for calendar days (e.g., "America/Sao_Paulo", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Locale for number formatting (e.g., "pt", "en", "de")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Directory holding the stored tasks and theme (overrides REPOSITOR_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) data_dir: Option<PathBuf>,

    /// Storage backend [default: file]
    #[arg(long, global = true, value_enum)]
    pub(crate) storage: Option<StorageKind>,

    /// Seed for the defaults filled in when upgrading old records
    #[arg(long, global = true, value_name = "N")]
    pub(crate) seed: Option<u64>,

    /// Pretend the current time is INSTANT (YYYY-MM-DD or RFC 3339)
    #[arg(long, global = true, hide = true, value_name = "INSTANT")]
    pub(crate) now: Option<String>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.compact && config.compact {
            self.compact = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if self.order.is_none() {
            self.order = config.order.map(SortOrder::from);
        }

        // Only override the color mode if CLI is at default
        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = color.into();
        }

        // String options: only apply if CLI didn't set them
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }
        if self.storage.is_none() {
            self.storage = config.storage;
        }
        if self.seed.is_none() {
            self.seed = config.seed;
        }

        self
    }

    pub(crate) fn sort_order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }

    pub(crate) fn storage_kind(&self) -> StorageKind {
        self.storage.unwrap_or_default()
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("repositor").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_without_config() {
        let cli = parse(&[]).with_config(&Config::default());
        assert_eq!(cli.sort_order(), SortOrder::Desc);
        assert_eq!(cli.storage_kind(), StorageKind::File);
        assert!(cli.command.is_none());
        assert!(!cli.compact);
    }

    #[test]
    fn config_fills_unset_flags() {
        let config = Config {
            compact: true,
            order: Some(ConfigSortOrder::Asc),
            color: Some(ConfigColorMode::Never),
            storage: Some(StorageKind::Sqlite),
            timezone: Some("UTC".into()),
            seed: Some(3),
            ..Config::default()
        };
        let cli = parse(&[]).with_config(&config);
        assert!(cli.compact);
        assert_eq!(cli.sort_order(), SortOrder::Asc);
        assert_eq!(cli.color, ColorMode::Never);
        assert_eq!(cli.storage_kind(), StorageKind::Sqlite);
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
        assert_eq!(cli.seed, Some(3));
        assert!(!cli.use_color());
    }

    #[test]
    fn cli_flags_win_over_config() {
        let config = Config {
            order: Some(ConfigSortOrder::Asc),
            color: Some(ConfigColorMode::Never),
            storage: Some(StorageKind::Sqlite),
            timezone: Some("UTC".into()),
            ..Config::default()
        };
        let cli = parse(&[
            "--order",
            "desc",
            "--color",
            "always",
            "--storage",
            "file",
            "--timezone",
            "Europe/Lisbon",
        ])
        .with_config(&config);
        assert_eq!(cli.sort_order(), SortOrder::Desc);
        assert_eq!(cli.color, ColorMode::Always);
        assert_eq!(cli.storage_kind(), StorageKind::File);
        assert_eq!(cli.timezone.as_deref(), Some("Europe/Lisbon"));
    }

    #[test]
    fn repeated_flag_keeps_last() {
        let cli = parse(&["--timezone", "UTC", "stats", "--timezone", "Europe/Lisbon"]);
        assert_eq!(cli.timezone.as_deref(), Some("Europe/Lisbon"));
    }

    #[test]
    fn no_color_beats_always() {
        let cli = parse(&["--color", "always", "--no-color"]);
        assert!(!cli.use_color());
    }

    #[test]
    fn json_and_csv_conflict() {
        let result = Cli::try_parse_from(["repositor", "--json", "--csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["stats", "--json", "--storage", "memory"]);
        assert!(cli.json);
        assert_eq!(cli.storage_kind(), StorageKind::Memory);
    }
}
