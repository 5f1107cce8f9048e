use crate::error::{DirectorError, Result};
use std::fmt;

pub const MIN_KEY_LEN: usize = 10;
pub const API_KEYS_ENV: &str = "GEMINI_API_KEYS";

/// Opaque credential. Formatting never reveals more than the last four characters.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `...abcd` style suffix used in logs
    pub fn redacted(&self) -> String {
        let tail: String = {
            let chars: Vec<char> = self.0.chars().collect();
            chars[chars.len().saturating_sub(4)..].iter().collect()
        };
        format!("...{}", tail)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.redacted())
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Supplies the ordered key pool for one generation call.
pub trait KeyProvider: Send + Sync {
    fn keys(&self) -> Result<Vec<ApiKey>>;
}

impl KeyProvider for Vec<ApiKey> {
    fn keys(&self) -> Result<Vec<ApiKey>> {
        Ok(self.clone())
    }
}

/// Ordered in-memory key list, living only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct KeyRing {
    keys: Vec<ApiKey>,
}

impl KeyRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.chars().count() < MIN_KEY_LEN {
            return Err(DirectorError::Validation(format!(
                "API key must be at least {} characters",
                MIN_KEY_LEN
            )));
        }
        self.keys.push(ApiKey::new(key));
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<ApiKey> {
        if index >= self.keys.len() {
            return Err(DirectorError::NotFound(format!("API key #{}", index + 1)));
        }
        Ok(self.keys.remove(index))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApiKey> {
        self.keys.iter()
    }
}

impl KeyProvider for KeyRing {
    fn keys(&self) -> Result<Vec<ApiKey>> {
        Ok(self.keys.clone())
    }
}

/// Reads a comma-separated key list from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvKeys {
    var: String,
}

impl EnvKeys {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvKeys {
    fn default() -> Self {
        Self::new(API_KEYS_ENV)
    }
}

impl KeyProvider for EnvKeys {
    fn keys(&self) -> Result<Vec<ApiKey>> {
        match std::env::var(&self.var) {
            Ok(raw) => Ok(parse_key_list(&raw)),
            Err(std::env::VarError::NotPresent) => Ok(Vec::new()),
            Err(e) => Err(DirectorError::Validation(format!("{}: {}", self.var, e))),
        }
    }
}

/// Splits `a,b , c` into keys, dropping blanks.
pub fn parse_key_list(raw: &str) -> Vec<ApiKey> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ApiKey::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_keeps_only_the_tail() {
        let key = ApiKey::new("AIzaSyExampleKey1234");
        assert_eq!(key.redacted(), "...1234");
        assert_eq!(format!("{:?}", key), "ApiKey(...1234)");
        assert_eq!(key.to_string(), "...1234");
        assert_eq!(ApiKey::new("ab").redacted(), "...ab");
    }

    #[test]
    fn key_ring_rejects_short_keys() {
        let mut ring = KeyRing::new();
        assert!(ring.add("short").is_err());
        ring.add("  long-enough-key  ").unwrap();
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.keys().unwrap()[0].expose(), "long-enough-key");
    }

    #[test]
    fn key_ring_preserves_order_on_remove() {
        let mut ring = KeyRing::new();
        for key in ["key-one-aaaa", "key-two-bbbb", "key-three-cc"] {
            ring.add(key).unwrap();
        }

        let removed = ring.remove(1).unwrap();
        assert_eq!(removed.expose(), "key-two-bbbb");
        let left: Vec<_> = ring.iter().map(|k| k.expose().to_string()).collect();
        assert_eq!(left, vec!["key-one-aaaa", "key-three-cc"]);
        assert!(matches!(ring.remove(5), Err(DirectorError::NotFound(_))));
    }

    #[test]
    fn parses_comma_separated_list() {
        let keys = parse_key_list(" first-key-xx, ,second-key-yy,");
        let raw: Vec<_> = keys.iter().map(ApiKey::expose).collect();
        assert_eq!(raw, vec!["first-key-xx", "second-key-yy"]);
    }

    #[test]
    fn missing_env_var_yields_no_keys() {
        let provider = EnvKeys::new("VEO_DIRECTOR_TEST_UNSET_KEYS");
        assert!(provider.keys().unwrap().is_empty());
    }
}
