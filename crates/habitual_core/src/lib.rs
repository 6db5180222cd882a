//! Core domain logic for Habitual.
//! This crate is the single source of truth for habit invariants.

pub mod app;
pub mod auth;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use app::{AppContext, StartupSeed};
pub use auth::capability::{
    AuthCapability, Identity, IdentityProvider, SignedOutProvider, StaticIdentityProvider,
};
pub use auth::config::{
    AuthConfig, AuthConfigError, KeyEnvironment, KeySource, LocalKeyStore, PublishableKey,
    PUBLISHABLE_KEY_ENV,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::habit::{
    Habit, HabitId, HabitValidationError, DEFAULT_HABIT_COLOR, HABIT_COLOR_PALETTE,
};
pub use model::history::{completion_history, HistoryDay, DEFAULT_HISTORY_DAYS};
pub use repo::habit_repo::{HabitRepository, InMemoryHabitRepository};
pub use service::habit_service::{DeleteOutcome, HabitService, ToggleOutcome};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
