//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into view-facing operations.
//! - Keep UI/FFI layers decoupled from collection storage.

pub mod habit_service;
