//! Secret handling for credentials in configuration
//!
//! The Firestore web API key is kept in a `secrecy::Secret`, which zeroes the
//! memory on drop and redacts `Debug` output so it never reaches the logs.
//!
//! # Example
//!
//! ```rust
//! use docsheet::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("AIza-example".to_string());
//! assert_eq!(key.expose_secret(), "AIza-example");
//! assert!(!format!("{key:?}").contains("AIza"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String newtype that satisfies the bounds `Secret` needs
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string: zeroed on drop, redacted in `Debug`
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string into a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Wraps an optional plain string into an optional [`SecretString`]
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(secret_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("api-key".to_string());
        assert_eq!(secret.expose_secret(), "api-key");
    }

    #[test]
    fn test_secret_string_opt() {
        assert!(secret_string_opt(Some("k".to_string())).is_some());
        assert!(secret_string_opt(None).is_none());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-key".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("sensitive-key"));
    }

    #[test]
    fn test_secret_value_blank() {
        assert!(SecretValue::from("   ".to_string()).is_empty());
        assert!(!SecretValue::from("k".to_string()).is_empty());
    }

    #[test]
    fn test_secret_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            key: SecretString,
        }

        let holder: Holder = toml::from_str(r#"key = "from-toml""#).unwrap();
        assert_eq!(holder.key.expose_secret(), "from-toml");
    }
}
