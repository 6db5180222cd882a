//! Derived day-by-day completion history.
//!
//! History is a projection of the current habit state, not stored data.
//! The streak is laid out as one contiguous run of completed days that ends
//! today (when completed) or yesterday (when not yet completed).

use crate::model::habit::Habit;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Window length shown by the habit detail view.
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// One calendar day in a habit history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub completed: bool,
}

/// Builds the history window of `days` entries ending at `today`.
///
/// Entries are ordered oldest first, so the last entry is always `today`.
pub fn completion_history(habit: &Habit, today: NaiveDate, days: u32) -> Vec<HistoryDay> {
    let prior_run = habit.streak.saturating_sub(u32::from(habit.completed_today));

    (0..days)
        .rev()
        .filter_map(|days_ago| {
            let date = today.checked_sub_signed(Duration::days(i64::from(days_ago)))?;
            let completed = if days_ago == 0 {
                habit.completed_today
            } else {
                days_ago <= prior_run
            };
            Some(HistoryDay { date, completed })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::completion_history;
    use crate::model::habit::Habit;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn zero_days_yields_empty_window() {
        let habit = Habit::new("Workout", None);
        assert!(completion_history(&habit, day(2026, 3, 1), 0).is_empty());
    }

    #[test]
    fn window_crosses_month_boundary() {
        let habit = Habit::with_state("1", "Workout", None, 2, false).expect("valid habit");
        let history = completion_history(&habit, day(2026, 3, 1), 3);

        let dates: Vec<_> = history.iter().map(|entry| entry.date).collect();
        assert_eq!(dates, vec![day(2026, 2, 27), day(2026, 2, 28), day(2026, 3, 1)]);
        let completed: Vec<_> = history.iter().map(|entry| entry.completed).collect();
        assert_eq!(completed, vec![true, true, false]);
    }
}
