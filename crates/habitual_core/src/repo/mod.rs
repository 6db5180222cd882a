//! Repository layer for the habit collection.
//!
//! # Responsibility
//! - Define the collection contract used by the habit service.
//! - Provide the in-memory, process-lifetime implementation.
//!
//! # Invariants
//! - Only the service layer mutates a repository.

pub mod habit_repo;
