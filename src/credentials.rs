//! Process-scoped API key handle.
//!
//! Created once in `main` and passed to whatever needs the key. Clones
//! share the same slot. Keys live in memory only, wrapped in
//! [`SecretString`] so they never show up in `Debug` output.

use std::fmt;
use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::validation::{ValidationConstraints, ValidationError, sanitize_input};

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("credential store is unavailable: a previous writer panicked")]
    Poisoned,
}

/// Shared handle to the session's API key.
#[derive(Clone, Default)]
pub struct CredentialHandle {
    slot: Arc<RwLock<Option<SecretString>>>,
    constraints: ValidationConstraints,
}

impl fmt::Debug for CredentialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stored = self.has_api_key();
        f.debug_struct("CredentialHandle")
            .field("api_key", &if stored { "[REDACTED]" } else { "<unset>" })
            .finish()
    }
}

impl CredentialHandle {
    pub fn new(constraints: ValidationConstraints) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            constraints,
        }
    }

    /// Validate, sanitize and keep `key`, replacing any previous one.
    pub fn store(&self, key: &str) -> Result<(), CredentialError> {
        self.constraints.validate_api_key(key)?;
        let sanitized = SecretString::from(sanitize_input(key));
        let mut slot = self.slot.write().map_err(|_| CredentialError::Poisoned)?;
        *slot = Some(sanitized);
        Ok(())
    }

    /// The stored key, sanitized again on the way out.
    pub fn api_key(&self) -> Option<SecretString> {
        let slot = self.slot.read().ok()?;
        slot.as_ref()
            .map(|key| sanitize_input(key.expose_secret()))
            .filter(|key| !key.is_empty())
            .map(SecretString::from)
    }

    pub fn delete(&self) -> Result<(), CredentialError> {
        let mut slot = self.slot.write().map_err(|_| CredentialError::Poisoned)?;
        *slot = None;
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }
}
