//! Identity-provider key resolution.
//!
//! # Responsibility
//! - Resolve the publishable key once at startup from its known sources.
//! - Persist and clear the user-entered local override.
//!
//! # Invariants
//! - Source precedence is environment first, then local override.
//! - Blank values count as absent in every source.
//! - Key material is never written to logs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable holding the deployment-provided publishable key.
pub const PUBLISHABLE_KEY_ENV: &str = "HABITUAL_AUTH_PUBLISHABLE_KEY";

const LOCAL_OVERRIDE_DIR: &str = "habitual";
const LOCAL_OVERRIDE_FILE: &str = "auth.json";

static KEY_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^pk_(live|test)_\S+$").expect("valid key prefix regex"));

/// Errors raised while reading or writing the local key override.
#[derive(Debug)]
pub enum AuthConfigError {
    /// Input key is empty after trimming.
    EmptyKey,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Encode(serde_json::Error),
}

impl Display for AuthConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "publishable key must not be empty"),
            Self::Io { path, source } => {
                write!(f, "key override i/o failed at `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "key override at `{}` is malformed: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode key override: {err}"),
        }
    }
}

impl Error for AuthConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyKey => None,
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Deployment mode implied by the key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyEnvironment {
    Live,
    Test,
    /// Key does not follow the `pk_live_`/`pk_test_` convention.
    Unknown,
}

/// Trimmed, non-empty publishable key for the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishableKey(String);

impl PublishableKey {
    /// Trims the input; returns `None` for blank values.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn environment(&self) -> KeyEnvironment {
        match KEY_PREFIX_RE
            .captures(self.0.as_str())
            .and_then(|caps| caps.get(1))
            .map(|mode| mode.as_str())
        {
            Some("live") => KeyEnvironment::Live,
            Some("test") => KeyEnvironment::Test,
            _ => KeyEnvironment::Unknown,
        }
    }
}

// Keys stay out of debug output and therefore out of logs.
impl std::fmt::Debug for PublishableKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublishableKey({:?}, ..)", self.environment())
    }
}

/// Where the resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    Environment,
    LocalOverride,
    None,
}

/// On-disk shape of the local override.
#[derive(Debug, Serialize, Deserialize)]
struct LocalOverrideFile {
    publishable_key: String,
}

/// File-backed store for the user-entered key override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalKeyStore {
    path: PathBuf,
}

impl LocalKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform config location, e.g. `~/.config/habitual/auth.json`.
    ///
    /// Falls back to the current directory when no config dir is known.
    pub fn default_location() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(LOCAL_OVERRIDE_DIR).join(LOCAL_OVERRIDE_FILE))
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Reads the override; a missing file or blank stored key is `None`.
    pub fn load(&self) -> Result<Option<PublishableKey>, AuthConfigError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(AuthConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let file: LocalOverrideFile =
            serde_json::from_str(&raw).map_err(|source| AuthConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(PublishableKey::parse(&file.publishable_key))
    }

    /// Stores a trimmed key, creating parent directories as needed.
    ///
    /// # Errors
    /// - `EmptyKey` when `key` is blank.
    /// - `Io`/`Encode` when the file cannot be written.
    pub fn save(&self, key: &str) -> Result<PublishableKey, AuthConfigError> {
        let key = PublishableKey::parse(key).ok_or(AuthConfigError::EmptyKey)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| AuthConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(&LocalOverrideFile {
            publishable_key: key.as_str().to_string(),
        })
        .map_err(AuthConfigError::Encode)?;
        std::fs::write(&self.path, body).map_err(|source| AuthConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!(
            "event=auth_key_saved module=auth_config status=ok environment={:?}",
            key.environment()
        );
        Ok(key)
    }

    /// Removes the override. Clearing a missing file is not an error.
    pub fn clear(&self) -> Result<(), AuthConfigError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(AuthConfigError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Startup-resolved identity-provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub publishable_key: Option<PublishableKey>,
    pub source: KeySource,
}

impl AuthConfig {
    /// Configuration with no key; the app runs anonymously.
    pub fn unconfigured() -> Self {
        Self {
            publishable_key: None,
            source: KeySource::None,
        }
    }

    /// Resolves the key from an explicit environment value and the override store.
    ///
    /// A non-blank environment value wins without touching the store. An
    /// unreadable override degrades to "no key" with a warning.
    pub fn resolve(env_value: Option<&str>, store: &LocalKeyStore) -> Self {
        if let Some(key) = env_value.and_then(PublishableKey::parse) {
            return Self::resolved(key, KeySource::Environment);
        }
        match store.load() {
            Ok(Some(key)) => Self::resolved(key, KeySource::LocalOverride),
            Ok(None) => {
                log::info!("event=auth_config_resolve module=auth_config status=ok source=none");
                Self::unconfigured()
            }
            Err(err) => {
                log::warn!(
                    "event=auth_config_resolve module=auth_config status=error source=local_override error={err}"
                );
                Self::unconfigured()
            }
        }
    }

    /// Resolves using the `HABITUAL_AUTH_PUBLISHABLE_KEY` process variable.
    pub fn from_env(store: &LocalKeyStore) -> Self {
        let env_value = std::env::var(PUBLISHABLE_KEY_ENV).ok();
        Self::resolve(env_value.as_deref(), store)
    }

    /// Capability flag handed to the view layer.
    pub fn is_configured(&self) -> bool {
        self.publishable_key.is_some()
    }

    fn resolved(key: PublishableKey, source: KeySource) -> Self {
        log::info!(
            "event=auth_config_resolve module=auth_config status=ok source={:?} environment={:?}",
            source,
            key.environment()
        );
        Self {
            publishable_key: Some(key),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyEnvironment, PublishableKey};

    #[test]
    fn parse_trims_and_rejects_blank() {
        assert!(PublishableKey::parse("   ").is_none());
        let key = PublishableKey::parse("  pk_test_abc \n").expect("non-blank key");
        assert_eq!(key.as_str(), "pk_test_abc");
    }

    #[test]
    fn environment_follows_key_prefix() {
        let live = PublishableKey::parse("pk_live_xxxxxxxxxx").expect("key");
        let test = PublishableKey::parse("pk_test_123").expect("key");
        let other = PublishableKey::parse("sk_live_123").expect("key");
        let bare = PublishableKey::parse("pk_live_").expect("key");

        assert_eq!(live.environment(), KeyEnvironment::Live);
        assert_eq!(test.environment(), KeyEnvironment::Test);
        assert_eq!(other.environment(), KeyEnvironment::Unknown);
        assert_eq!(bare.environment(), KeyEnvironment::Unknown);
    }

    #[test]
    fn debug_output_hides_key_material() {
        let key = PublishableKey::parse("pk_live_secretish").expect("key");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("secretish"));
        assert!(rendered.contains("Live"));
    }
}
