use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Color, Table};

use crate::consts::DATE_FORMAT;
use crate::core::{
    BrandShare, ContributionDay, DailyPoint, ExpiryStatus, Page, ProductSummary, StatsReport,
    TaskView,
};
use crate::output::format::{
    NumberFormat, create_styled_table, format_amount, format_currency,
    format_currency_compact, format_minutes, format_number, format_percent, format_weight,
    header_cell, right_cell, styled_cell,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) compact: bool,
    pub(crate) number_format: NumberFormat,
}

impl TableOptions {
    fn color(&self, color: Color) -> Option<Color> {
        self.use_color.then_some(color)
    }

    fn money(&self, value: f64) -> String {
        if self.compact {
            format_currency_compact(value, self.number_format)
        } else {
            format_currency(value, self.number_format)
        }
    }
}

fn status_color(status: ExpiryStatus) -> Color {
    match status {
        ExpiryStatus::Expired => Color::Red,
        ExpiryStatus::ExpiringSoon => Color::Yellow,
        ExpiryStatus::Ok => Color::Green,
        ExpiryStatus::Unknown => Color::DarkGrey,
    }
}

fn expiry_text(view: &TaskView<'_>) -> String {
    let date = view.task.expiry_date.as_deref().unwrap_or("-");
    match view.days_until_expiry {
        Some(days) if days < 0 => format!("{date} ({}d ago)", -days),
        Some(days) => format!("{date} ({days}d)"),
        None => date.to_string(),
    }
}

fn build_task_table(rows: &[TaskView<'_>], opts: &TableOptions) -> Table {
    let c = opts.use_color;
    let nf = opts.number_format;
    let mut table = create_styled_table();

    if opts.compact {
        table.set_header(vec![
            header_cell("Date", c),
            header_cell("Product", c),
            header_cell("Boxes", c),
            header_cell("Total", c),
            header_cell("Expiry", c),
        ]);
    } else {
        table.set_header(vec![
            header_cell("ID", c),
            header_cell("Date", c),
            header_cell("Product", c),
            header_cell("Brand", c),
            header_cell("Boxes", c),
            header_cell("Weight", c),
            header_cell("Unit", c),
            header_cell("Total", c),
            header_cell("Expiry", c),
            header_cell("Time", c),
        ]);
    }

    for view in rows {
        let task = view.task;
        let expiry = styled_cell(
            &expiry_text(view),
            opts.color(status_color(view.status)),
            view.status == ExpiryStatus::Expired,
        );
        let total = right_cell(&opts.money(task.total_price()), opts.color(Color::Green), false);

        if opts.compact {
            table.add_row(vec![
                Cell::new(&task.date),
                Cell::new(&task.product),
                right_cell(&format_amount(task.quantity, nf), None, false),
                total,
                expiry,
            ]);
        } else {
            table.add_row(vec![
                Cell::new(&task.id),
                Cell::new(&task.date),
                Cell::new(&task.product),
                Cell::new(&task.brand),
                right_cell(&format_amount(task.quantity, nf), None, false),
                right_cell(&format_weight(task.weight(), nf), None, false),
                right_cell(&format_currency(task.value, nf), None, false),
                total,
                expiry,
                right_cell(&format_minutes(task.duration), None, false),
            ]);
        }
    }
    table
}

/// One page of the task listing
pub(crate) fn print_task_page(page: &Page<TaskView<'_>>, opts: TableOptions) {
    if page.total_items == 0 {
        println!("No tasks found.");
        return;
    }

    let table = build_task_table(&page.items, &opts);
    println!("\n  Restocking Tasks\n");
    println!("{table}");
    println!(
        "\n  Page {} of {} ({} tasks)\n",
        page.page,
        page.total_pages,
        format_number(page.total_items as i64, opts.number_format)
    );
}

/// Tasks flagged by the expiry checks, with a title naming the check
pub(crate) fn print_expiry_table(title: &str, rows: &[TaskView<'_>], opts: TableOptions) {
    let table = build_task_table(rows, &opts);
    println!("\n  {title}\n");
    println!("{table}");
    println!();
}

pub(crate) fn print_stats_table(report: &StatsReport, opts: TableOptions) {
    let c = opts.use_color;
    let nf = opts.number_format;
    let stats = &report.stats;
    let green = opts.color(Color::Green);
    let yellow = opts.color(Color::Yellow);
    let red = opts.color(Color::Red);

    let mut table = create_styled_table();
    table.set_header(vec![header_cell("Metric", c), header_cell("Value", c)]);

    let rows: Vec<(&str, String, Option<Color>)> = vec![
        ("Tasks", format_number(stats.total_tasks as i64, nf), None),
        ("Boxes restocked", format_amount(stats.total_quantity, nf), None),
        ("Unit price total", opts.money(stats.total_value), None),
        ("Average boxes per task", format_amount(stats.average_quantity, nf), None),
        ("Average unit price", opts.money(stats.average_value), None),
        ("Losses prevented", opts.money(stats.losses_prevented_value), green),
        ("Protected stock", opts.money(stats.protected_stock_value), green),
        ("Loss rate", format_percent(stats.loss_rate, nf), yellow),
        ("Stock value", opts.money(report.total_stock_value), None),
        ("Total weight", format_weight(report.total_weight, nf), None),
        (
            "Expiring soon",
            format_number(report.expiring_count as i64, nf),
            yellow.filter(|_| report.expiring_count > 0),
        ),
        (
            "Expired",
            format_number(report.expired_count as i64, nf),
            red.filter(|_| report.expired_count > 0),
        ),
    ];

    for (label, value, color) in rows {
        table.add_row(vec![
            Cell::new(label),
            right_cell(&value, color, color.is_some()),
        ]);
    }

    println!("\n  Restocking Summary\n");
    println!("{table}");
    println!();
}

pub(crate) fn print_product_table(products: &[ProductSummary], opts: TableOptions) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    let c = opts.use_color;
    let nf = opts.number_format;
    let cyan = opts.color(Color::Cyan);

    let mut table = create_styled_table();
    let mut header = vec![header_cell("Product", c), header_cell("Brand", c)];
    header.extend([
        header_cell("Boxes", c),
        header_cell("Value", c),
        header_cell("Tasks", c),
        header_cell("Share", c),
    ]);
    if !opts.compact {
        header.extend([header_cell("Last", c), header_cell("Avg Time", c)]);
    }
    table.set_header(header);

    let mut total_quantity = 0.0;
    let mut total_value = 0.0;
    let mut total_tasks = 0;

    for p in products {
        total_quantity += p.total_quantity;
        total_value += p.total_value;
        total_tasks += p.completed_tasks;

        let mut row = vec![Cell::new(&p.product), Cell::new(&p.brand)];
        row.extend([
            right_cell(&format_amount(p.total_quantity, nf), None, false),
            right_cell(&opts.money(p.total_value), opts.color(Color::Green), false),
            right_cell(&format_number(p.completed_tasks as i64, nf), None, false),
            right_cell(&format_percent(p.percentage, nf), None, false),
        ]);
        if !opts.compact {
            row.extend([
                Cell::new(&p.last_restocked),
                right_cell(&format_minutes(p.average_time), None, false),
            ]);
        }
        table.add_row(row);
    }

    let mut total = vec![styled_cell("TOTAL", cyan, true), Cell::new("")];
    total.extend([
        right_cell(&format_amount(total_quantity, nf), cyan, true),
        right_cell(&opts.money(total_value), cyan, true),
        right_cell(&format_number(total_tasks as i64, nf), cyan, true),
        Cell::new(""),
    ]);
    if !opts.compact {
        total.extend([Cell::new(""), Cell::new("")]);
    }
    table.add_row(total);

    println!("\n  Products\n");
    println!("{table}");
    println!();
}

pub(crate) fn print_brand_table(brands: &[BrandShare], opts: TableOptions) {
    if brands.is_empty() {
        println!("No brands found.");
        return;
    }
    let c = opts.use_color;
    let nf = opts.number_format;

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Brand", c),
        header_cell("Tasks", c),
        header_cell("Value", c),
        header_cell("Share", c),
    ]);
    for b in brands {
        table.add_row(vec![
            Cell::new(&b.brand),
            right_cell(&format_number(b.count as i64, nf), None, false),
            right_cell(&opts.money(b.value), opts.color(Color::Green), false),
            right_cell(&format_percent(b.percentage, nf), None, false),
        ]);
    }

    println!("\n  Brands\n");
    println!("{table}");
    println!();
}

pub(crate) fn print_daily_table(points: &[DailyPoint], opts: TableOptions) {
    let c = opts.use_color;
    let nf = opts.number_format;
    let cyan = opts.color(Color::Cyan);

    let mut table = create_styled_table();
    let mut header = vec![header_cell("Date", c), header_cell("Tasks", c)];
    header.extend([header_cell("Value", c), header_cell("Stock", c)]);
    if !opts.compact {
        header.extend([
            header_cell("Weight", c),
            header_cell("Prevented", c),
            header_cell("Protected", c),
        ]);
    }
    table.set_header(header);

    let mut total = DailyPoint::default();
    for p in points {
        total.tasks += p.tasks;
        total.value += p.value;
        total.stock_value += p.stock_value;
        total.weight += p.weight;
        total.losses_prevented_value += p.losses_prevented_value;
        total.protected_value += p.protected_value;

        let dim = if p.tasks == 0 { opts.color(Color::DarkGrey) } else { None };
        let mut row = vec![
            styled_cell(&p.date, dim, false),
            right_cell(&format_number(p.tasks as i64, nf), dim, false),
            right_cell(&opts.money(p.value), dim, false),
            right_cell(&opts.money(p.stock_value), dim, false),
        ];
        if !opts.compact {
            row.extend([
                right_cell(&format_weight(p.weight, nf), dim, false),
                right_cell(&opts.money(p.losses_prevented_value), dim, false),
                right_cell(&opts.money(p.protected_value), dim, false),
            ]);
        }
        table.add_row(row);
    }

    let mut row = vec![
        styled_cell("TOTAL", cyan, true),
        right_cell(&format_number(total.tasks as i64, nf), cyan, true),
        right_cell(&opts.money(total.value), cyan, true),
        right_cell(&opts.money(total.stock_value), cyan, true),
    ];
    if !opts.compact {
        row.extend([
            right_cell(&format_weight(total.weight, nf), cyan, true),
            right_cell(&opts.money(total.losses_prevented_value), cyan, true),
            right_cell(&opts.money(total.protected_value), cyan, true),
        ]);
    }
    table.add_row(row);

    println!("\n  Daily Activity\n");
    println!("{table}");
    println!();
}

const HEAT_GLYPHS: [&str; 5] = ["·", "░", "▒", "▓", "█"];
const WEEKDAY_LABELS: [&str; 7] = ["Mon", "   ", "Wed", "   ", "Fri", "   ", "Sun"];

fn heat_glyph(level: u8, use_color: bool) -> String {
    let glyph = HEAT_GLYPHS[usize::from(level.min(4))];
    if !use_color {
        return glyph.to_string();
    }
    let code = if level == 0 { "90" } else { "32" };
    format!("\x1b[{code}m{glyph}\x1b[0m")
}

/// Weekday rows by week columns, oldest week on the left
pub(crate) fn render_heatmap(days: &[ContributionDay], use_color: bool) -> Vec<String> {
    let Some(first) = days
        .first()
        .and_then(|d| NaiveDate::parse_from_str(&d.date, DATE_FORMAT).ok())
    else {
        return Vec::new();
    };
    let offset = first.weekday().num_days_from_monday() as usize;
    let weeks = (offset + days.len()).div_ceil(7);

    let mut grid = vec![vec![None; weeks]; 7];
    for (i, day) in days.iter().enumerate() {
        let slot = offset + i;
        grid[slot % 7][slot / 7] = Some(day.level);
    }

    grid.iter()
        .zip(WEEKDAY_LABELS)
        .map(|(row, label)| {
            let cells: String = row
                .iter()
                .map(|level| match level {
                    Some(level) => heat_glyph(*level, use_color),
                    None => " ".to_string(),
                })
                .collect();
            format!("{label} {cells}")
        })
        .collect()
}

pub(crate) fn print_heatmap(days: &[ContributionDay], opts: TableOptions) {
    let nf = opts.number_format;
    let total: usize = days.iter().map(|d| d.count).sum();
    let value: f64 = days.iter().map(|d| d.value).sum();
    let active = days.iter().filter(|d| d.count > 0).count();

    println!("\n  Activity, last {} days\n", days.len());
    for line in render_heatmap(days, opts.use_color) {
        println!("  {line}");
    }
    let legend: Vec<String> = (0..=4).map(|l| heat_glyph(l, opts.use_color)).collect();
    println!("\n      less {} more", legend.join(""));
    println!(
        "\n  {} tasks on {} days, {}\n",
        format_number(total as i64, nf),
        format_number(active as i64, nf),
        format_currency_compact(value, nf)
    );
}
