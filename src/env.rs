//! Environment lookups behind a small seam.
//!
//! [`Env::real()`] reads the process environment. [`Env::mock()`] serves a
//! fixed map so config and credential tests never touch global state.

use std::collections::HashMap;

/// Source of environment variables.
#[derive(Clone, Debug, Default)]
pub struct Env {
    fixed: Option<HashMap<String, String>>,
}

impl Env {
    /// Read from the live process environment.
    pub fn real() -> Self {
        Self { fixed: None }
    }

    /// Serve only the given pairs; everything else is absent.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            fixed: Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }

    /// Look up `name`, treating an empty value as unset.
    pub fn get(&self, name: &str) -> Option<String> {
        let value = match &self.fixed {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }?;
        if value.trim().is_empty() { None } else { Some(value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_sees_cargo_vars() {
        assert!(Env::real().get("CARGO_MANIFEST_DIR").is_some());
    }

    #[test]
    fn mock_returns_only_given_pairs() {
        let env = Env::mock([("DIFFBRIEF_MODEL", "gpt-4o-mini")]);
        assert_eq!(env.get("DIFFBRIEF_MODEL").as_deref(), Some("gpt-4o-mini"));
        assert!(env.get("DIFFBRIEF_API_KEY").is_none());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let env = Env::mock([("DIFFBRIEF_API_URL", "   ")]);
        assert!(env.get("DIFFBRIEF_API_URL").is_none());
    }
}
