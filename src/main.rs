mod app;
mod cli;
mod clock;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod storage;
mod store;
mod theme;
mod utils;

use std::path::{Path, PathBuf};

use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use app::{CommandContext, dispatch};
use cli::{Cli, command_or_default};
use clock::{Clock, FixedClock, SystemClock};
use config::{Config, default_data_dir};
use error::AppError;
use output::NumberFormat;
use storage::open_storage;
use store::TaskStore;
use utils::{Timezone, init_logging, parse_instant};

/// Environment variable naming the data directory
const HOME_ENV: &str = "REPOSITOR_HOME";

/// `--data-dir`, then `REPOSITOR_HOME`, then config, then the platform data dir
fn resolve_data_dir(flag: Option<&Path>, config: &Config) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    config.data_dir.clone().unwrap_or_else(default_data_dir)
}

/// Wall clock, or a frozen one when `--now` is given
fn make_clock(now: Option<&str>) -> Result<Box<dyn Clock>, AppError> {
    let Some(raw) = now else {
        return Ok(Box::new(SystemClock));
    };
    let instant = parse_instant(raw).ok_or_else(|| AppError::InvalidDate {
        input: raw.to_string(),
    })?;
    Ok(Box::new(FixedClock(instant)))
}

fn run(mut cli: Cli, config: &Config) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;

    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), config);
    let storage = open_storage(cli.storage_kind(), &data_dir)?;

    let clock = make_clock(cli.now.as_deref())?;
    let seed = cli
        .seed
        .unwrap_or_else(|| clock.now().timestamp_millis().unsigned_abs());
    let (mut store, outcome) = TaskStore::load(storage, clock, Pcg32::seed_from_u64(seed))?;
    tracing::debug!(?outcome, dir = %data_dir.display(), "task store ready");

    let command = command_or_default(cli.command.take());
    let ctx = CommandContext {
        cli: &cli,
        config,
        timezone,
        number_format,
    };
    dispatch(&mut store, &command, &ctx)
}

fn main() {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);

    init_logging(cli.debug);
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }
    if let Some(path) = &config.source {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    if let Err(e) = run(cli, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_flag_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };
        let dir = resolve_data_dir(Some(Path::new("/from/flag")), &config);
        assert_eq!(dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn frozen_clock_from_flag() {
        let clock = make_clock(Some("2026-10-17")).unwrap();
        assert_eq!(clock.now().to_rfc3339(), "2026-10-17T00:00:00+00:00");
        assert!(matches!(
            make_clock(Some("amanhã")),
            Err(AppError::InvalidDate { .. })
        ));
    }
}
