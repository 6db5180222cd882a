//! Authentication capability resolved once at startup.

use crate::auth::config::{AuthConfig, PublishableKey};
use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Session lookup against an external identity provider.
pub trait IdentityProvider {
    /// Stable provider name used in diagnostics.
    fn provider_id(&self) -> &str;

    /// Returns the signed-in identity for `key`, or `None` when signed out.
    fn current_identity(&self, key: &PublishableKey) -> Option<Identity>;
}

/// Provider stand-in that never has a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedOutProvider;

impl IdentityProvider for SignedOutProvider {
    fn provider_id(&self) -> &str {
        "signed_out"
    }

    fn current_identity(&self, _key: &PublishableKey) -> Option<Identity> {
        None
    }
}

/// Provider that always reports one fixed identity.
#[derive(Debug, Clone)]
pub struct StaticIdentityProvider {
    identity: Identity,
}

impl StaticIdentityProvider {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn provider_id(&self) -> &str {
        "static"
    }

    fn current_identity(&self, _key: &PublishableKey) -> Option<Identity> {
        Some(self.identity.clone())
    }
}

/// What the view layer may offer: a signed-in profile or anonymous use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthCapability {
    Authenticated(Identity),
    Anonymous,
}

impl AuthCapability {
    /// Resolves the capability from startup config.
    ///
    /// No key means the provider is never consulted.
    pub fn resolve(config: &AuthConfig, provider: &dyn IdentityProvider) -> Self {
        let Some(key) = config.publishable_key.as_ref() else {
            log::info!("event=auth_capability module=auth status=ok state=anonymous reason=no_key");
            return Self::Anonymous;
        };
        match provider.current_identity(key) {
            Some(identity) => {
                log::info!(
                    "event=auth_capability module=auth status=ok state=authenticated provider={}",
                    provider.provider_id()
                );
                Self::Authenticated(identity)
            }
            None => {
                log::info!(
                    "event=auth_capability module=auth status=ok state=anonymous reason=signed_out provider={}",
                    provider.provider_id()
                );
                Self::Anonymous
            }
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}
