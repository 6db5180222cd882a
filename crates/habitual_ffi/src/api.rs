//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose habit store commands and queries to Dart via FRB.
//! - Validate user input (blank names) before it reaches the core store.
//! - Report the startup-resolved auth capability for navbar/profile branching.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - All calls are serialized through one process-global `AppContext`.
//! - Auth config and capability are resolved once, on the first call.

use chrono::{Local, NaiveDate};
use habitual_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppContext, AuthConfig, DeleteOutcome, Habit, HabitId, HabitService, HistoryDay, Identity,
    IdentityProvider, KeySource, LocalKeyStore, SignedOutProvider, StartupSeed,
    StaticIdentityProvider, ToggleOutcome, DEFAULT_HABIT_COLOR, DEFAULT_HISTORY_DAYS,
};
use std::sync::{Mutex, MutexGuard, OnceLock};

const HISTORY_DAYS_MAX: u32 = 366;

static APP: OnceLock<Mutex<AppContext>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Flat habit shape rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitItem {
    pub id: String,
    pub name: String,
    pub color: String,
    pub streak: u32,
    pub completed_today: bool,
}

impl From<Habit> for HabitItem {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id.to_string(),
            name: habit.name,
            color: habit.color.unwrap_or_else(|| DEFAULT_HABIT_COLOR.to_string()),
            streak: habit.streak,
            completed_today: habit.completed_today,
        }
    }
}

/// Action envelope for habit commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitActionResponse {
    /// Whether the command changed the collection.
    pub ok: bool,
    /// Affected habit after the command (removed habit for deletes).
    pub habit: Option<HabitItem>,
    pub message: String,
}

impl HabitActionResponse {
    fn success(message: impl Into<String>, habit: Habit) -> Self {
        Self {
            ok: true,
            habit: Some(habit.into()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            habit: None,
            message: message.into(),
        }
    }
}

/// One day cell for the history grid; `date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryDayItem {
    pub date: String,
    pub completed: bool,
}

impl From<HistoryDay> for HistoryDayItem {
    fn from(day: HistoryDay) -> Self {
        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            completed: day.completed,
        }
    }
}

/// Signed-in user reported by the host's identity-provider SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl From<SessionIdentity> for Identity {
    fn from(session: SessionIdentity) -> Self {
        Self {
            user_id: session.user_id,
            display_name: session.display_name,
            email: session.email,
        }
    }
}

/// Auth capability for navbar/profile branching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStatusResponse {
    /// Whether a publishable key was resolved at startup.
    pub configured: bool,
    /// `environment|local_override|none`.
    pub source: String,
    /// `live|test|unknown`, `None` when unconfigured.
    pub key_environment: Option<String>,
    /// `true` for the authenticated capability, `false` for anonymous.
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
}

/// Startup call: resolves auth config and capability and builds the store.
///
/// # FFI contract
/// - Should be the first call after `init_logging`.
/// - `session` is the host SDK's signed-in user, if any.
/// - Only the first bootstrap takes effect; later calls (or a bootstrap
///   triggered implicitly by another API) keep the existing context and
///   return its status.
#[flutter_rust_bridge::frb(sync)]
pub fn app_init(seed_demo: bool, session: Option<SessionIdentity>) -> AuthStatusResponse {
    let app = APP.get_or_init(|| {
        let config = AuthConfig::from_env(&LocalKeyStore::default_location());
        Mutex::new(bootstrap_app(config, seed_demo, session))
    });
    to_auth_status(&lock(app))
}

/// Replaces the collection with the three sample habits.
///
/// Clears any selection. Returns the seeded list.
#[flutter_rust_bridge::frb(sync)]
pub fn habits_seed_demo() -> Vec<HabitItem> {
    let mut app = lock_app();
    match HabitService::with_demo_habits() {
        Ok(seeded) => app.habits = seeded,
        Err(err) => log::error!("event=habits_seed_demo module=ffi status=error error={err}"),
    }
    to_items(app.habits.list())
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_list() -> Vec<HabitItem> {
    to_items(lock_app().habits.list())
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_get(id: String) -> Option<HabitItem> {
    lock_app().habits.get(&HabitId::from(id)).map(HabitItem::from)
}

/// Creates a habit from the creation form.
///
/// # FFI contract
/// - Blank names are rejected here; the core store does not validate.
/// - `None` or blank color falls back to the default color tag.
/// - The name is stored as entered.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_create(name: String, color: Option<String>) -> HabitActionResponse {
    if name.trim().is_empty() {
        return HabitActionResponse::failure("Habit name must not be empty.");
    }
    let color = color
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_HABIT_COLOR.to_string());
    let created = lock_app().habits.create(name, Some(color));
    HabitActionResponse::success("Habit created.", created)
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_toggle(id: String) -> HabitActionResponse {
    match lock_app().habits.toggle(&HabitId::from(id)) {
        ToggleOutcome::Toggled(habit) => HabitActionResponse::success("Habit updated.", habit),
        ToggleOutcome::NotFound => HabitActionResponse::failure("Habit not found."),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_delete(id: String) -> HabitActionResponse {
    match lock_app().habits.delete(&HabitId::from(id)) {
        DeleteOutcome::Deleted(habit) => HabitActionResponse::success("Habit deleted.", habit),
        DeleteOutcome::NotFound => HabitActionResponse::failure("Habit not found."),
    }
}

/// Selects a habit for the detail view; `None` clears the selection.
///
/// Returns the resolved selection.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_select(id: Option<String>) -> Option<HabitItem> {
    let mut app = lock_app();
    match id {
        Some(id) => {
            app.habits.select(&HabitId::from(id));
        }
        None => app.habits.clear_selection(),
    }
    app.habits.selected().map(HabitItem::from)
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_selected() -> Option<HabitItem> {
    lock_app().habits.selected().map(HabitItem::from)
}

/// History grid for one habit ending today (local time).
///
/// `days` defaults to 30 and is capped at 366.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_history(id: String, days: Option<u32>) -> Vec<HistoryDayItem> {
    history_items(&HabitId::from(id), Local::now().date_naive(), days)
}

/// Auth capability resolved at startup.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_status() -> AuthStatusResponse {
    to_auth_status(&lock_app())
}

/// Saves a local key override.
///
/// Takes effect on next launch, matching the one-shot startup resolution.
/// Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_save_key(key: String) -> String {
    match LocalKeyStore::default_location().save(key.as_str()) {
        Ok(_) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Removes the local key override. Same result contract as `auth_save_key`.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_clear_key() -> String {
    match LocalKeyStore::default_location().clear() {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

fn bootstrap_app(
    config: AuthConfig,
    seed_demo: bool,
    session: Option<SessionIdentity>,
) -> AppContext {
    let seed = if seed_demo {
        StartupSeed::Demo
    } else {
        StartupSeed::Empty
    };
    let provider: Box<dyn IdentityProvider> = match session {
        Some(session) => Box::new(StaticIdentityProvider::new(session.into())),
        None => Box::new(SignedOutProvider),
    };
    AppContext::bootstrap(config, provider.as_ref(), seed)
}

/// Context for every call; bootstraps with defaults if `app_init` was skipped.
fn lock_app() -> MutexGuard<'static, AppContext> {
    let app = APP.get_or_init(|| {
        let config = AuthConfig::from_env(&LocalKeyStore::default_location());
        Mutex::new(bootstrap_app(config, false, None))
    });
    lock(app)
}

fn lock(app: &Mutex<AppContext>) -> MutexGuard<'_, AppContext> {
    // A panic mid-command leaves plain data behind; keep serving it.
    app.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn to_items(habits: Vec<Habit>) -> Vec<HabitItem> {
    habits.into_iter().map(HabitItem::from).collect()
}

fn history_items(id: &HabitId, today: NaiveDate, days: Option<u32>) -> Vec<HistoryDayItem> {
    let days = days.unwrap_or(DEFAULT_HISTORY_DAYS).min(HISTORY_DAYS_MAX);
    lock_app()
        .habits
        .history(id, today, days)
        .unwrap_or_default()
        .into_iter()
        .map(HistoryDayItem::from)
        .collect()
}

fn to_auth_status(app: &AppContext) -> AuthStatusResponse {
    let config = &app.auth_config;
    let identity = app.auth.identity();
    let source = match config.source {
        KeySource::Environment => "environment",
        KeySource::LocalOverride => "local_override",
        KeySource::None => "none",
    };
    AuthStatusResponse {
        configured: config.is_configured(),
        source: source.to_string(),
        key_environment: config
            .publishable_key
            .as_ref()
            .map(|key| format!("{:?}", key.environment()).to_ascii_lowercase()),
        authenticated: app.auth.is_authenticated(),
        user_id: identity.map(|identity| identity.user_id.clone()),
        display_name: identity.and_then(|identity| identity.display_name.clone()),
    }
}
