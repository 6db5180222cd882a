//! Habit collection contract and in-memory implementation.
//!
//! # Responsibility
//! - Hold the ordered habit collection for the lifetime of the process.
//! - Keep storage shape out of the service layer.
//!
//! # Invariants
//! - Insertion order is display order and survives removals.
//! - Ids are unique within one collection.

use crate::model::habit::{Habit, HabitId};

/// Storage contract for the habit collection.
///
/// Every method is total: lookups for unknown ids yield `None` instead of
/// an error.
pub trait HabitRepository {
    /// Appends a habit at the end of the collection.
    ///
    /// Returns `false` and leaves the collection untouched when the id is
    /// already taken.
    fn insert(&mut self, habit: Habit) -> bool;
    fn get(&self, id: &HabitId) -> Option<&Habit>;
    fn get_mut(&mut self, id: &HabitId) -> Option<&mut Habit>;
    fn remove(&mut self, id: &HabitId) -> Option<Habit>;
    /// All habits in insertion order.
    fn list(&self) -> &[Habit];
}

/// Process-lifetime habit collection backed by a `Vec`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryHabitRepository {
    habits: Vec<Habit>,
}

impl InMemoryHabitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &HabitId) -> Option<usize> {
        self.habits.iter().position(|habit| &habit.id == id)
    }
}

impl HabitRepository for InMemoryHabitRepository {
    fn insert(&mut self, habit: Habit) -> bool {
        if self.position(&habit.id).is_some() {
            return false;
        }
        self.habits.push(habit);
        true
    }

    fn get(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| &habit.id == id)
    }

    fn get_mut(&mut self, id: &HabitId) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|habit| &habit.id == id)
    }

    fn remove(&mut self, id: &HabitId) -> Option<Habit> {
        let index = self.position(id)?;
        // `Vec::remove` shifts the tail, keeping display order.
        Some(self.habits.remove(index))
    }

    fn list(&self) -> &[Habit] {
        &self.habits
    }
}

#[cfg(test)]
mod tests {
    use super::{HabitRepository, InMemoryHabitRepository};
    use crate::model::habit::{Habit, HabitId};

    fn seeded(ids: &[&str]) -> InMemoryHabitRepository {
        let mut repo = InMemoryHabitRepository::new();
        for id in ids {
            let habit = Habit::with_state(*id, format!("habit {id}"), None, 0, false)
                .expect("valid habit");
            assert!(repo.insert(habit));
        }
        repo
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut repo = seeded(&["a"]);
        let duplicate = Habit::with_state("a", "other", None, 3, false).expect("valid habit");

        assert!(!repo.insert(duplicate));
        assert_eq!(repo.list().len(), 1);
        assert_eq!(repo.list()[0].name, "habit a");
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut repo = seeded(&["a", "b", "c"]);

        let removed = repo.remove(&HabitId::from("b")).expect("b exists");
        assert_eq!(removed.id.as_str(), "b");

        let ids: Vec<_> = repo.list().iter().map(|habit| habit.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn remove_unknown_id_is_none() {
        let mut repo = seeded(&["a"]);
        assert!(repo.remove(&HabitId::from("zzz")).is_none());
        assert_eq!(repo.list().len(), 1);
    }
}
