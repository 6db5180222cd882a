//! Habit domain model.
//!
//! # Responsibility
//! - Define the canonical habit record tracked by the store.
//! - Own the completion/streak transition rule applied on toggle.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - `streak` is never negative.
//! - A habit completed today always carries `streak >= 1`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Default color tag used when the caller does not pick one.
pub const DEFAULT_HABIT_COLOR: &str = "#000000";

/// Color tags offered by the habit creation flow.
pub const HABIT_COLOR_PALETTE: &[&str] = &[
    DEFAULT_HABIT_COLOR,
    "#FF5252",
    "#4CAF50",
    "#2196F3",
    "#FFC107",
    "#9C27B0",
    "#00BCD4",
];

/// Opaque stable identifier of one habit.
///
/// Fresh habits get a UUID v4 string; seeded or imported habits may carry
/// any non-blank external id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Generates a fresh unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for HabitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HabitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for HabitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Validation errors for habit records built from external state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    /// Habit id is empty or whitespace only.
    BlankId,
    /// Habit claims completion today without any streak to back it.
    CompletedWithoutStreak { id: HabitId },
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "habit id must not be blank"),
            Self::CompletedWithoutStreak { id } => write!(
                f,
                "habit {id} is completed today but has streak 0; expected streak >= 1"
            ),
        }
    }
}

impl Error for HabitValidationError {}

/// One tracked recurring behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HabitRecord")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    /// Display tag such as `#2196F3`. Purely cosmetic.
    pub color: Option<String>,
    /// Consecutive completed days, as counted by toggles.
    pub streak: u32,
    pub completed_today: bool,
}

/// Unvalidated wire shape; `Habit` deserializes through this.
#[derive(Deserialize)]
struct HabitRecord {
    id: HabitId,
    name: String,
    color: Option<String>,
    streak: u32,
    completed_today: bool,
}

impl TryFrom<HabitRecord> for Habit {
    type Error = HabitValidationError;

    fn try_from(value: HabitRecord) -> Result<Self, Self::Error> {
        Habit::with_state(
            value.id,
            value.name,
            value.color,
            value.streak,
            value.completed_today,
        )
    }
}

impl Habit {
    /// Creates a fresh habit with a generated id.
    ///
    /// # Invariants
    /// - `streak` starts at 0.
    /// - `completed_today` starts as `false`.
    pub fn new(name: impl Into<String>, color: Option<String>) -> Self {
        Self {
            id: HabitId::generate(),
            name: name.into(),
            color,
            streak: 0,
            completed_today: false,
        }
    }

    /// Rebuilds a habit from existing state (seed data, imports).
    ///
    /// # Errors
    /// - `BlankId` when `id` is empty.
    /// - `CompletedWithoutStreak` when `completed_today` is set with `streak == 0`.
    pub fn with_state(
        id: impl Into<HabitId>,
        name: impl Into<String>,
        color: Option<String>,
        streak: u32,
        completed_today: bool,
    ) -> Result<Self, HabitValidationError> {
        let habit = Self {
            id: id.into(),
            name: name.into(),
            color,
            streak,
            completed_today,
        };
        habit.validate()?;
        Ok(habit)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.id.is_blank() {
            return Err(HabitValidationError::BlankId);
        }
        if self.completed_today && self.streak == 0 {
            return Err(HabitValidationError::CompletedWithoutStreak {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Flips today's completion and moves the streak with it.
    ///
    /// Marking done adds one day, un-marking removes one. The streak is a
    /// toggle counter, not a calendar computation.
    pub fn toggle_completion(&mut self) {
        self.completed_today = !self.completed_today;
        if self.completed_today {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = self.streak.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Habit, HabitId, HabitValidationError, HABIT_COLOR_PALETTE};

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(HabitId::generate(), HabitId::generate());
    }

    #[test]
    fn toggle_completion_couples_streak() {
        let mut habit = Habit::with_state("1", "Morning Meditation", None, 7, false)
            .expect("valid seed habit");

        habit.toggle_completion();
        assert!(habit.completed_today);
        assert_eq!(habit.streak, 8);

        habit.toggle_completion();
        assert!(!habit.completed_today);
        assert_eq!(habit.streak, 7);
    }

    #[test]
    fn toggle_completion_saturates_at_upper_bound() {
        let mut habit =
            Habit::with_state("max", "Forever", None, u32::MAX, false).expect("valid habit");
        habit.toggle_completion();
        assert_eq!(habit.streak, u32::MAX);
    }

    #[test]
    fn with_state_rejects_blank_id() {
        let err = Habit::with_state("  ", "Workout", None, 0, false).unwrap_err();
        assert_eq!(err, HabitValidationError::BlankId);
    }

    #[test]
    fn with_state_rejects_completion_without_streak() {
        let err = Habit::with_state("9", "Workout", None, 0, true).unwrap_err();
        assert_eq!(
            err,
            HabitValidationError::CompletedWithoutStreak {
                id: HabitId::from("9")
            }
        );
        assert!(err.to_string().contains("streak 0"));
    }

    #[test]
    fn palette_starts_with_default_color() {
        assert_eq!(HABIT_COLOR_PALETTE.len(), 7);
        assert_eq!(HABIT_COLOR_PALETTE[0], "#000000");
    }
}
