//! CLI subcommand definitions

use clap::{Args, Subcommand};

use crate::consts::{DEFAULT_SERIES_DAYS, MAX_WINDOW_DAYS};
use crate::core::{SortField, TimeWindow};
use crate::theme::Theme;

/// Main CLI commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// List restocking tasks (default)
    List(ListArgs),
    /// Log a new restocking task
    Add(AddArgs),
    /// Delete a task by id
    Delete {
        /// Task id as shown by `list`
        id: String,
    },
    /// Dashboard figures: totals, averages, losses prevented
    Stats,
    /// Tasks whose products expire soon
    Expiring {
        /// Look-ahead in days [default: 7]
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(0..=MAX_WINDOW_DAYS))]
        days: Option<i64>,
    },
    /// Tasks whose products are already past expiry
    Expired,
    /// Totals per product and brand
    Products,
    /// Share of tasks per brand
    Brands,
    /// Day-by-day series for charts
    Daily {
        /// Number of days ending today
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_SERIES_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=MAX_WINDOW_DAYS)
        )]
        days: u32,
    },
    /// Yearly activity heatmap
    Heatmap,
    /// Show or change the light/dark theme preference
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
}

#[derive(Debug, Default, Args)]
pub(crate) struct ListArgs {
    /// Match against the description (any case) or the date
    #[arg(short, long, value_name = "TEXT")]
    pub(crate) search: Option<String>,

    /// How far back to list [default: 7d]
    #[arg(short, long, value_enum)]
    pub(crate) window: Option<TimeWindow>,

    /// Column to sort by
    #[arg(long, value_enum, default_value = "date")]
    pub(crate) sort: SortField,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub(crate) page: usize,

    /// Tasks per page [default: 5]
    #[arg(long, value_name = "N")]
    pub(crate) page_size: Option<usize>,
}

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    #[arg(long)]
    pub(crate) product: String,

    #[arg(long)]
    pub(crate) brand: String,

    /// Boxes restocked
    #[arg(long)]
    pub(crate) quantity: f64,

    /// Weight in kg
    #[arg(long)]
    pub(crate) peso: f64,

    /// Unit price
    #[arg(long)]
    pub(crate) value: f64,

    /// Task date (YYYYMMDD or YYYY-MM-DD) [default: today]
    #[arg(long)]
    pub(crate) date: Option<String>,

    /// Expiry date (YYYYMMDD or YYYY-MM-DD) [default: date + 180 days]
    #[arg(long)]
    pub(crate) expiry: Option<String>,

    /// Free text [default: "<quantity> caixas, <peso>kg"]
    #[arg(long)]
    pub(crate) description: Option<String>,

    /// Minutes spent
    #[arg(long, default_value_t = crate::consts::DEFAULT_TASK_DURATION)]
    pub(crate) duration: f64,
}

/// Theme subcommands
#[derive(Debug, Subcommand)]
pub(crate) enum ThemeCommands {
    /// Print the current theme (default)
    Show,
    /// Store a theme
    Set {
        #[arg(value_enum)]
        theme: Theme,
    },
    /// Switch between dark and light
    Toggle,
    /// Forget the stored theme and go back to light
    Reset,
}

/// Resolve the subcommand, listing when none was given
pub(crate) fn command_or_default(cmd: Option<Commands>) -> Commands {
    cmd.unwrap_or_else(|| Commands::List(ListArgs::default()))
}
