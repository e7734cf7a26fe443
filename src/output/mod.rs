mod csv;
mod format;
mod json;
mod table;

pub(crate) use csv::output_task_csv;
pub(crate) use format::NumberFormat;
pub(crate) use json::output_json;
pub(crate) use table::{
    TableOptions, print_brand_table, print_daily_table, print_expiry_table, print_heatmap,
    print_product_table, print_stats_table, print_task_page,
};
