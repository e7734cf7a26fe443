use std::fmt::Write;

use crate::core::TaskView;

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Task rows as CSV, one line per task, with a header line
pub(crate) fn output_task_csv(rows: &[TaskView<'_>]) -> String {
    let mut out = String::from(
        "id,date,product,brand,quantity,peso,value,total,expiry_date,days_until_expiry,status,duration,description,created_at\n",
    );

    for view in rows {
        let task = view.task;
        let peso = task.peso.map(|p| p.to_string()).unwrap_or_default();
        let days = view
            .days_until_expiry
            .map(|d| d.to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{:.2},{},{},{},{},{},{}",
            csv_escape(&task.id),
            csv_escape(&task.date),
            csv_escape(&task.product),
            csv_escape(&task.brand),
            task.quantity,
            peso,
            task.value,
            task.total_price(),
            csv_escape(task.expiry_date.as_deref().unwrap_or_default()),
            days,
            view.status.label(),
            task.duration,
            csv_escape(&task.description),
            csv_escape(&task.created_at),
        );
    }
    out
}
