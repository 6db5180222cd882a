//! Habit domain model.
//!
//! # Responsibility
//! - Define the habit record and its completion/streak transition.
//! - Derive read-only projections (history) from habit state.
//!
//! # Invariants
//! - Every habit is identified by a stable `HabitId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod habit;
pub mod history;
