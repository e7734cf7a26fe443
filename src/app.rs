use chrono::Duration;

use crate::cli::{AddArgs, Cli, Commands, ListArgs, ThemeCommands};
use crate::clock::Clock;
use crate::config::Config;
use crate::consts::{
    DEFAULT_EXPIRY_WINDOW_DAYS, DEFAULT_PAGE_SIZE, DEFAULT_SHELF_LIFE_DAYS, HEATMAP_DAYS,
    MAX_WINDOW_DAYS,
};
use crate::core::{
    ListQuery, NewTask, StatsReport, Task, TaskView, brand_distribution, contribution_heatmap,
    daily_series, derive_stats, paginate, product_summaries, select_tasks, total_stock_value,
    total_weight,
};
use crate::error::AppError;
use crate::output::{
    NumberFormat, TableOptions, output_json, output_task_csv, print_brand_table,
    print_daily_table, print_expiry_table, print_heatmap, print_product_table, print_stats_table,
    print_task_page,
};
use crate::storage::Storage;
use crate::store::TaskStore;
use crate::theme::{load_theme, reset_theme, save_theme, toggle_theme};
use crate::utils::{Timezone, format_date, parse_date};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: &'a Config,
    pub(crate) timezone: Timezone,
    pub(crate) number_format: NumberFormat,
}

impl CommandContext<'_> {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            use_color: self.cli.use_color(),
            compact: self.cli.compact,
            number_format: self.number_format,
        }
    }

    /// Warning window for expiry checks: flag, then config, then the default week
    fn expiry_days(&self, flag: Option<i64>) -> i64 {
        flag.or(self.config.expiry_days)
            .unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS)
            .clamp(0, MAX_WINDOW_DAYS)
    }
}

fn views<'t, S: Storage, C: Clock>(
    store: &TaskStore<S, C>,
    tasks: &[&'t Task],
    days: i64,
) -> Vec<TaskView<'t>> {
    tasks.iter().map(|t| store.view(t, days)).collect()
}

fn handle_list<S: Storage, C: Clock>(
    store: &TaskStore<S, C>,
    args: &ListArgs,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let query = ListQuery {
        search: args.search.as_deref().unwrap_or_default(),
        window: args.window.or(ctx.config.window).unwrap_or_default(),
        sort: args.sort,
        order: ctx.cli.sort_order(),
    };
    let selected = select_tasks(store.tasks(), &query, store.now());
    let rows = views(store, &selected, ctx.expiry_days(None));
    tracing::debug!(window = ?query.window, matched = rows.len(), "list");

    if ctx.cli.csv {
        print!("{}", output_task_csv(&rows));
        return Ok(());
    }

    let page_size = args
        .page_size
        .or(ctx.config.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let page = paginate(&rows, args.page, page_size);
    if ctx.cli.json {
        println!("{}", output_json(&page)?);
    } else {
        print_task_page(&page, ctx.table_options());
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn require_positive(field: &'static str, value: f64) -> Result<(), AppError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(AppError::InvalidField {
            field,
            reason: format!("must be greater than 0, got {value}"),
        });
    }
    Ok(())
}

/// Check the form fields and fill the defaults the add form would
fn build_new_task(args: &AddArgs, today: chrono::NaiveDate) -> Result<NewTask, AppError> {
    require_text("product", &args.product)?;
    require_text("brand", &args.brand)?;
    require_positive("quantity", args.quantity)?;
    require_positive("peso", args.peso)?;
    require_positive("value", args.value)?;
    require_positive("duration", args.duration)?;

    let date = args.date.as_deref().map(parse_date).transpose()?.unwrap_or(today);
    let expiry = match args.expiry.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => date
            .checked_add_signed(Duration::days(DEFAULT_SHELF_LIFE_DAYS))
            .ok_or_else(|| AppError::InvalidField {
                field: "date",
                reason: format!("no expiry date can follow {date}"),
            })?,
    };
    let description = match args.description.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!("{} caixas, {}kg", args.quantity, args.peso),
    };

    Ok(NewTask {
        product: args.product.trim().to_string(),
        brand: args.brand.trim().to_string(),
        quantity: args.quantity,
        peso: Some(args.peso),
        value: args.value,
        date: format_date(date),
        expiry_date: Some(format_date(expiry)),
        description,
        duration: args.duration,
    })
}

fn handle_add<S: Storage, C: Clock>(
    store: &mut TaskStore<S, C>,
    args: &AddArgs,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let today = ctx.timezone.local_date(store.now());
    let new = build_new_task(args, today)?;
    let task = store.add(new)?;

    if ctx.cli.json {
        let view = store.view(&task, ctx.expiry_days(None));
        println!("{}", output_json(&view)?);
    } else {
        println!(
            "Added task {} ({} / {}, {} boxes)",
            task.id, task.product, task.brand, task.quantity
        );
    }
    Ok(())
}

fn handle_delete<S: Storage, C: Clock>(
    store: &mut TaskStore<S, C>,
    id: &str,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    if !store.delete(id)? {
        return Err(AppError::TaskNotFound { id: id.to_string() });
    }
    if ctx.cli.json {
        println!("{}", output_json(&serde_json::json!({ "deleted": id }))?);
    } else {
        println!("Deleted task {id}");
    }
    Ok(())
}

fn handle_stats<S: Storage, C: Clock>(
    store: &TaskStore<S, C>,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let tasks = store.tasks();
    // Already expired items also fall inside the warning window
    let expiring_count = store
        .expiring_items(ctx.expiry_days(None))
        .iter()
        .filter(|t| !store.is_expired(t.expiry_date.as_deref()))
        .count();
    let report = StatsReport {
        stats: derive_stats(tasks),
        total_stock_value: total_stock_value(tasks),
        total_weight: total_weight(tasks),
        expired_count: store.expired_items().len(),
        expiring_count,
    };

    if ctx.cli.json {
        println!("{}", output_json(&report)?);
    } else {
        print_stats_table(&report, ctx.table_options());
    }
    Ok(())
}

fn print_flagged(
    rows: &[TaskView<'_>],
    title: &str,
    empty: &str,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    if ctx.cli.json {
        println!("{}", output_json(rows)?);
    } else if ctx.cli.csv {
        print!("{}", output_task_csv(rows));
    } else if rows.is_empty() {
        println!("{empty}");
    } else {
        print_expiry_table(title, rows, ctx.table_options());
    }
    Ok(())
}

fn handle_expiring<S: Storage, C: Clock>(
    store: &TaskStore<S, C>,
    days: Option<i64>,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let days = ctx.expiry_days(days);
    let rows = views(store, &store.expiring_items(days), days);
    print_flagged(
        &rows,
        &format!("Expiring Within {days} Days"),
        &format!("Nothing expires within {days} days."),
        ctx,
    )
}

fn handle_expired<S: Storage, C: Clock>(
    store: &TaskStore<S, C>,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let rows = views(store, &store.expired_items(), ctx.expiry_days(None));
    print_flagged(&rows, "Expired", "No expired tasks.", ctx)
}

/// Run a parsed command against the store
pub(crate) fn dispatch<S: Storage, C: Clock>(
    store: &mut TaskStore<S, C>,
    command: &Commands,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let json = ctx.cli.json;
    let opts = ctx.table_options();

    match command {
        Commands::List(args) => handle_list(store, args, ctx),
        Commands::Add(args) => handle_add(store, args, ctx),
        Commands::Delete { id } => handle_delete(store, id, ctx),
        Commands::Stats => handle_stats(store, ctx),
        Commands::Expiring { days } => handle_expiring(store, *days, ctx),
        Commands::Expired => handle_expired(store, ctx),
        Commands::Products => {
            let products = product_summaries(store.tasks());
            if json {
                println!("{}", output_json(&products)?);
            } else {
                print_product_table(&products, opts);
            }
            Ok(())
        }
        Commands::Brands => {
            let brands = brand_distribution(store.tasks());
            if json {
                println!("{}", output_json(&brands)?);
            } else {
                print_brand_table(&brands, opts);
            }
            Ok(())
        }
        Commands::Daily { days } => {
            let points = daily_series(store.tasks(), store.now(), ctx.timezone, *days);
            if json {
                println!("{}", output_json(&points)?);
            } else {
                print_daily_table(&points, opts);
            }
            Ok(())
        }
        Commands::Heatmap => {
            let days = contribution_heatmap(store.tasks(), store.now(), ctx.timezone, HEATMAP_DAYS);
            if json {
                println!("{}", output_json(&days)?);
            } else {
                print_heatmap(&days, opts);
            }
            Ok(())
        }
        Commands::Theme { command } => handle_theme(store.storage_mut(), command.as_ref(), json),
    }
}

/// Show or change the theme preference; never touches the task collection
pub(crate) fn handle_theme(
    storage: &mut dyn Storage,
    command: Option<&ThemeCommands>,
    json: bool,
) -> Result<(), AppError> {
    let (theme, verb) = match command {
        None | Some(ThemeCommands::Show) => (load_theme(storage)?, "Theme"),
        Some(ThemeCommands::Set { theme }) => {
            save_theme(storage, *theme)?;
            (*theme, "Theme set to")
        }
        Some(ThemeCommands::Toggle) => (toggle_theme(storage)?, "Theme switched to"),
        Some(ThemeCommands::Reset) => (reset_theme(storage)?, "Theme reset to"),
    };

    if json {
        println!("{}", output_json(&serde_json::json!({ "theme": theme }))?);
    } else {
        println!("{verb} {}", theme.display_name());
    }
    Ok(())
}
