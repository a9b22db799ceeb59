//! Connection configuration.

use std::fmt;

use zeroize::Zeroize;

/// Secret API key for the hosted database's REST surface.
///
/// Redacted from `Debug` output and wiped from memory on drop.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap raw key material.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key material for request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the key is empty. An empty key is treated as absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(..)")
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Connection settings for the hosted database.
///
/// Both values come from the secret store (environment or `.env` file); see
/// the CLI for the variable names.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project base URL, e.g. `https://example.supabase.co`.
    pub url: String,

    /// Service API key used for the authenticated read queries.
    pub key: ApiKey,
}

#[cfg(test)]
mod tests {
    use super::ApiKey;

    #[test]
    fn debug_output_redacts_the_key() {
        let key = ApiKey::new("service-role-secret");
        let debug = format!("{key:?}");

        assert!(!debug.contains("secret"), "key material leaked: {debug}");
        assert_eq!(debug, "ApiKey(..)");
    }

    #[test]
    fn empty_keys_are_detected() {
        assert!(ApiKey::new("").is_empty());
        assert!(!ApiKey::new("k").is_empty());
    }
}
