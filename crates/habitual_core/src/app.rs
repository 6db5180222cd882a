//! Startup wiring for view-layer hosts.
//!
//! # Responsibility
//! - Resolve auth config and capability exactly once.
//! - Own the habit store handed to the view layer.
//!
//! # Invariants
//! - The habit store is built independently of auth state.

use crate::auth::capability::{AuthCapability, IdentityProvider};
use crate::auth::config::AuthConfig;
use crate::logging::event_line;
use crate::repo::habit_repo::InMemoryHabitRepository;
use crate::service::habit_service::HabitService;

/// How the habit collection starts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartupSeed {
    #[default]
    Empty,
    /// The three sample habits shown on first launch.
    Demo,
}

/// Process-wide application state.
pub struct AppContext {
    pub habits: HabitService<InMemoryHabitRepository>,
    pub auth_config: AuthConfig,
    pub auth: AuthCapability,
}

impl AppContext {
    /// Builds the context once at startup.
    ///
    /// A demo seed that fails validation is logged and the store starts
    /// empty instead.
    pub fn bootstrap(
        auth_config: AuthConfig,
        provider: &dyn IdentityProvider,
        seed: StartupSeed,
    ) -> Self {
        let habits = match seed {
            StartupSeed::Empty => HabitService::in_memory(),
            StartupSeed::Demo => HabitService::with_demo_habits().unwrap_or_else(|err| {
                log::error!(
                    "{}",
                    event_line("app_bootstrap", "app", "error", &[("seed", &"demo"), ("error", &err)])
                );
                HabitService::in_memory()
            }),
        };
        let auth = AuthCapability::resolve(&auth_config, provider);
        let seed_name = match seed {
            StartupSeed::Empty => "empty",
            StartupSeed::Demo => "demo",
        };
        log::info!(
            "{}",
            event_line(
                "app_bootstrap",
                "app",
                "ok",
                &[
                    ("seed", &seed_name),
                    ("habits", &habits.len()),
                    ("auth_configured", &auth_config.is_configured()),
                    ("authenticated", &auth.is_authenticated()),
                ],
            )
        );
        Self {
            habits,
            auth_config,
            auth,
        }
    }

    /// Capability flag for the view layer: whether sign-in can be offered.
    pub fn auth_configured(&self) -> bool {
        self.auth_config.is_configured()
    }
}
