//! Habit store use-case service.
//!
//! # Responsibility
//! - Expose the create/toggle/delete/get entry points for the view layer.
//! - Track the detail-view selection by id so reads never go stale.
//!
//! # Invariants
//! - Every operation is total; unknown ids are reported as `NotFound`
//!   outcomes and leave the collection untouched.
//! - The service performs no name validation; callers reject blank input.
//! - Logs carry ids and counters only, never habit names.

use crate::model::habit::{Habit, HabitId, HabitValidationError};
use crate::logging::event_line;
use crate::model::history::{completion_history, HistoryDay};
use crate::repo::habit_repo::{HabitRepository, InMemoryHabitRepository};
use chrono::NaiveDate;
use log::{debug, info};

const MODULE: &str = "habit_service";

/// Result of a toggle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Habit state after the toggle.
    Toggled(Habit),
    NotFound,
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The removed habit.
    Deleted(Habit),
    NotFound,
}

/// The habit store: owns the collection and the detail selection.
pub struct HabitService<R: HabitRepository> {
    repo: R,
    selected: Option<HabitId>,
}

impl HabitService<InMemoryHabitRepository> {
    /// Creates a store over an empty in-memory collection.
    pub fn in_memory() -> Self {
        Self::new(InMemoryHabitRepository::new())
    }

    /// Creates a store seeded with the demo habits shown on first launch.
    pub fn with_demo_habits() -> Result<Self, HabitValidationError> {
        let mut service = Self::in_memory();
        for habit in demo_habits()? {
            service.seed(habit)?;
        }
        Ok(service)
    }
}

impl<R: HabitRepository> HabitService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            selected: None,
        }
    }

    /// Appends an already-built habit (seed/import path).
    ///
    /// Returns `Ok(false)` when a habit with the same id is already present.
    ///
    /// # Errors
    /// - Any `HabitValidationError` from `Habit::validate`; the collection is
    ///   left untouched.
    pub fn seed(&mut self, habit: Habit) -> Result<bool, HabitValidationError> {
        if let Err(err) = habit.validate() {
            debug!(
                "{}",
                event_line("habit_seed", MODULE, "invalid", &[("error", &err)])
            );
            return Err(err);
        }
        let id = habit.id.clone();
        let inserted = self.repo.insert(habit);
        let status = if inserted { "ok" } else { "duplicate" };
        debug!(
            "{}",
            event_line("habit_seed", MODULE, status, &[("habit_id", &id)])
        );
        Ok(inserted)
    }

    /// Creates a new habit at the end of the collection.
    ///
    /// # Contract
    /// - Returned habit has a fresh id, `streak == 0`, `completed_today == false`.
    pub fn create(&mut self, name: impl Into<String>, color: Option<String>) -> Habit {
        let mut habit = Habit::new(name, color);
        while self.repo.get(&habit.id).is_some() {
            habit.id = HabitId::generate();
        }
        let created = habit.clone();
        let inserted = self.repo.insert(habit);
        debug_assert!(inserted, "fresh habit id must be unique");
        info!(
            "{}",
            event_line(
                "habit_create",
                MODULE,
                "ok",
                &[("habit_id", &created.id), ("total", &self.repo.list().len())],
            )
        );
        created
    }

    /// Flips today's completion of one habit and adjusts its streak.
    pub fn toggle(&mut self, id: &HabitId) -> ToggleOutcome {
        let Some(habit) = self.repo.get_mut(id) else {
            debug!(
                "{}",
                event_line("habit_toggle", MODULE, "not_found", &[("habit_id", id)])
            );
            return ToggleOutcome::NotFound;
        };
        habit.toggle_completion();
        info!(
            "{}",
            event_line(
                "habit_toggle",
                MODULE,
                "ok",
                &[
                    ("habit_id", id),
                    ("completed_today", &habit.completed_today),
                    ("streak", &habit.streak),
                ],
            )
        );
        ToggleOutcome::Toggled(habit.clone())
    }

    /// Removes one habit, clearing the selection if it pointed at it.
    pub fn delete(&mut self, id: &HabitId) -> DeleteOutcome {
        let Some(removed) = self.repo.remove(id) else {
            debug!(
                "{}",
                event_line("habit_delete", MODULE, "not_found", &[("habit_id", id)])
            );
            return DeleteOutcome::NotFound;
        };
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        info!(
            "{}",
            event_line(
                "habit_delete",
                MODULE,
                "ok",
                &[("habit_id", id), ("total", &self.repo.list().len())],
            )
        );
        DeleteOutcome::Deleted(removed)
    }

    /// Returns the current record for `id`.
    pub fn get(&self, id: &HabitId) -> Option<Habit> {
        self.repo.get(id).cloned()
    }

    /// Returns a snapshot of the collection in display order.
    pub fn list(&self) -> Vec<Habit> {
        self.repo.list().to_vec()
    }

    pub fn len(&self) -> usize {
        self.repo.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.list().is_empty()
    }

    /// Marks one habit as the detail-view selection.
    ///
    /// Returns `false` and keeps the previous selection when `id` is unknown.
    pub fn select(&mut self, id: &HabitId) -> bool {
        if self.repo.get(id).is_none() {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Resolves the selection against the live collection.
    pub fn selected(&self) -> Option<Habit> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Completion history window for one habit, oldest day first.
    pub fn history(&self, id: &HabitId, today: NaiveDate, days: u32) -> Option<Vec<HistoryDay>> {
        self.repo
            .get(id)
            .map(|habit| completion_history(habit, today, days))
    }
}

fn demo_habits() -> Result<Vec<Habit>, HabitValidationError> {
    Ok(vec![
        Habit::with_state(
            "1",
            "Morning Meditation",
            Some("#2196F3".to_string()),
            7,
            false,
        )?,
        Habit::with_state("2", "Read 10 Pages", Some("#FF5252".to_string()), 21, true)?,
        Habit::with_state("3", "Workout", Some("#4CAF50".to_string()), 5, false)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::{HabitService, ToggleOutcome};
    use crate::model::habit::{Habit, HabitId, HabitValidationError};

    #[test]
    fn demo_seed_has_three_habits_in_order() {
        let service = HabitService::with_demo_habits().expect("demo habits are valid");
        let ids: Vec<_> = service
            .list()
            .iter()
            .map(|habit| habit.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(
            service.get(&HabitId::from("2")).map(|habit| habit.streak),
            Some(21)
        );
    }

    #[test]
    fn seed_rejects_duplicate_id() {
        let mut service = HabitService::with_demo_habits().expect("demo habits are valid");
        let duplicate = service.get(&HabitId::from("1")).expect("seeded habit");
        assert_eq!(service.seed(duplicate), Ok(false));
        assert_eq!(service.len(), 3);
    }

    #[test]
    fn seed_rejects_invalid_literal_and_leaves_store_untouched() {
        let mut service = HabitService::in_memory();
        let incoherent = Habit {
            id: HabitId::from("5"),
            name: "Stretch".to_string(),
            color: None,
            streak: 0,
            completed_today: true,
        };
        let blank = Habit {
            id: HabitId::from(""),
            ..incoherent.clone()
        };

        assert_eq!(
            service.seed(incoherent),
            Err(HabitValidationError::CompletedWithoutStreak {
                id: HabitId::from("5")
            })
        );
        assert_eq!(service.seed(blank), Err(HabitValidationError::BlankId));
        assert!(service.is_empty());
        assert_eq!(service.toggle(&HabitId::from("5")), ToggleOutcome::NotFound);
    }

    #[test]
    fn toggle_returns_post_toggle_state() {
        let mut service = HabitService::with_demo_habits().expect("demo habits are valid");
        match service.toggle(&HabitId::from("2")) {
            ToggleOutcome::Toggled(habit) => {
                assert!(!habit.completed_today);
                assert_eq!(habit.streak, 20);
            }
            ToggleOutcome::NotFound => panic!("seeded habit must be found"),
        }
    }
}
