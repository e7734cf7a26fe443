//! Aggregate statistics over the task list
//!
//! The loss figures are presentation heuristics with fixed ratios; they are
//! not derived from any measured loss data.

use crate::consts::{
    LOSS_RATE_CEILING, LOSS_RATE_STEP, LOSSES_PREVENTED_RATIO, PROTECTED_STOCK_RATIO,
};
use crate::core::types::{Stats, Task};

/// Heuristic loss rate (percent) for a given number of logged tasks,
/// falling from the ceiling towards zero as more tasks are logged
pub(crate) fn loss_rate(task_count: usize) -> f64 {
    let rate = (LOSS_RATE_CEILING - task_count as f64 * LOSS_RATE_STEP).max(0.0);
    rate.min(LOSS_RATE_CEILING)
}

pub(crate) fn derive_stats(tasks: &[Task]) -> Stats {
    if tasks.is_empty() {
        return Stats::default();
    }

    let count = tasks.len();
    let total_quantity: f64 = tasks.iter().map(|t| t.quantity).sum();
    let total_value: f64 = tasks.iter().map(|t| t.value).sum();

    Stats {
        total_tasks: count,
        total_quantity,
        total_value,
        average_quantity: total_quantity / count as f64,
        average_value: total_value / count as f64,
        losses_prevented_value: total_value * LOSSES_PREVENTED_RATIO,
        protected_stock_value: total_value * PROTECTED_STOCK_RATIO,
        loss_rate: loss_rate(count),
    }
}

/// Sum of unit price times boxes across tasks
pub(crate) fn total_stock_value(tasks: &[Task]) -> f64 {
    tasks.iter().map(Task::total_price).sum()
}

/// Sum of recorded weights (one kg per box when unrecorded)
pub(crate) fn total_weight(tasks: &[Task]) -> f64 {
    tasks.iter().map(Task::weight).sum()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    pub(crate) fn make_task(id: &str, quantity: f64, value: f64, duration: f64) -> Task {
        Task {
            id: id.to_string(),
            product: "Bebidas".to_string(),
            brand: "BH".to_string(),
            quantity,
            peso: None,
            value,
            date: "2024-01-13".to_string(),
            expiry_date: None,
            description: String::new(),
            duration,
            created_at: "2024-01-13T09:15:00.000Z".to_string(),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(derive_stats(&[]), Stats::default());
        let s = derive_stats(&[]);
        assert_eq!(s.total_tasks, 0);
        assert_eq!(s.loss_rate, 0.0);
        assert_eq!(s.protected_stock_value, 0.0);
    }

    #[test]
    fn single_task_scenario() {
        let s = derive_stats(&[make_task("1", 10.0, 5.0, 20.0)]);
        assert_eq!(s.total_tasks, 1);
        assert!(approx(s.total_quantity, 10.0));
        assert!(approx(s.total_value, 5.0));
        assert!(approx(s.average_quantity, 10.0));
        assert!(approx(s.average_value, 5.0));
        assert!(approx(s.losses_prevented_value, 0.75));
        assert!(approx(s.protected_stock_value, 4.6));
        assert!(approx(s.loss_rate, 7.9));
    }

    #[test]
    fn averages_divide_by_count() {
        let tasks = [
            make_task("1", 150.0, 2750.0, 52.0),
            make_task("2", 85.0, 1850.5, 103.0),
            make_task("3", 200.0, 4200.75, 65.0),
        ];
        let s = derive_stats(&tasks);
        assert!(approx(s.total_quantity, 435.0));
        assert!(approx(s.average_quantity, 145.0));
        assert!(approx(s.total_value, 8801.25));
        assert!(approx(s.average_value, 8801.25 / 3.0));
        assert!(approx(s.loss_rate, 7.7));
    }

    #[test]
    fn loss_rate_floors_at_zero() {
        assert_eq!(loss_rate(80), 0.0);
        assert_eq!(loss_rate(500), 0.0);
        assert_eq!(loss_rate(0), 8.0);
    }

    #[test]
    fn stock_value_and_weight_totals() {
        let mut a = make_task("1", 2.0, 3.0, 10.0);
        a.peso = Some(7.5);
        let b = make_task("2", 4.0, 1.5, 10.0);
        assert!(approx(total_stock_value(&[a.clone(), b.clone()]), 12.0));
        assert!(approx(total_weight(&[a, b]), 11.5));
    }

    proptest! {
        #[test]
        fn total_value_is_sum_of_values(values in prop::collection::vec(0.01f64..100_000.0, 1..60)) {
            let tasks: Vec<Task> = values
                .iter()
                .enumerate()
                .map(|(i, v)| make_task(&i.to_string(), 1.0, *v, 30.0))
                .collect();
            let expected: f64 = values.iter().sum();
            let s = derive_stats(&tasks);
            prop_assert!((s.total_value - expected).abs() <= expected.abs() * 1e-12);
            prop_assert_eq!(s.total_tasks, values.len());
        }

        #[test]
        fn loss_rate_is_bounded_and_non_increasing(n in 0usize..10_000) {
            let here = loss_rate(n);
            let next = loss_rate(n + 1);
            prop_assert!((0.0..=LOSS_RATE_CEILING).contains(&here));
            prop_assert!(next <= here);
        }
    }
}
