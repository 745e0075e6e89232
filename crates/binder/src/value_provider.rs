//! Value providers: raw request text keyed by field name.

use form_binding_domain::RawValues;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Source of raw request values keyed by field name.
pub trait ValueProvider {
    /// Returns true when any key equals `prefix` or starts with `prefix.` / `prefix[`.
    fn contains_prefix(&self, prefix: &str) -> bool;

    /// Raw values supplied for `key`; empty when the key was not supplied.
    fn get_value(&self, key: &str) -> RawValues;
}

/// In-memory provider; keys match ASCII case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapValueProvider {
    values: BTreeMap<String, RawValues>,
}

impl MapValueProvider {
    /// Empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key`, after any values already held for it.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values
            .entry(key.to_ascii_lowercase())
            .or_default()
            .push(value);
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no keys are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapValueProvider
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut provider = Self::new();
        for (key, value) in iter {
            provider.insert(key.as_ref(), value);
        }
        provider
    }
}

impl ValueProvider for MapValueProvider {
    fn contains_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return !self.values.is_empty();
        }
        let prefix = prefix.to_ascii_lowercase();
        self.values
            .keys()
            .any(|key| is_prefix_match(&prefix, key))
    }

    fn get_value(&self, key: &str) -> RawValues {
        self.values
            .get(&key.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

fn is_prefix_match(prefix: &str, key: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['.', '[']))
}

/// Provider over an `application/x-www-form-urlencoded` body or query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValueProvider {
    inner: MapValueProvider,
}

impl FormValueProvider {
    /// Decode an encoded form body or query string (a leading `?` is ignored).
    #[must_use]
    pub fn parse(encoded: &str) -> Self {
        let encoded = encoded.strip_prefix('?').unwrap_or(encoded);
        Self::from_bytes(encoded.as_bytes())
    }

    /// Decode raw form bytes; invalid UTF-8 is replaced lossily.
    #[must_use]
    pub fn from_bytes(encoded: &[u8]) -> Self {
        let inner = form_urlencoded::parse(encoded)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { inner }
    }
}

impl ValueProvider for FormValueProvider {
    fn contains_prefix(&self, prefix: &str) -> bool {
        self.inner.contains_prefix(prefix)
    }

    fn get_value(&self, key: &str) -> RawValues {
        self.inner.get_value(key)
    }
}

/// Ordered list of providers; the first one holding a key answers for it.
#[derive(Default)]
pub struct CompositeValueProvider {
    providers: Vec<Box<dyn ValueProvider + Send + Sync>>,
}

impl CompositeValueProvider {
    /// Empty composite.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider with lower precedence than those already added.
    #[must_use]
    pub fn with(mut self, provider: impl ValueProvider + Send + Sync + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl ValueProvider for CompositeValueProvider {
    fn contains_prefix(&self, prefix: &str) -> bool {
        self.providers
            .iter()
            .any(|provider| provider.contains_prefix(prefix))
    }

    fn get_value(&self, key: &str) -> RawValues {
        self.providers
            .iter()
            .map(|provider| provider.get_value(key))
            .find(|values| !values.is_none())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for CompositeValueProvider {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CompositeValueProvider")
            .field("providers", &self.providers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_provider_decodes_and_keeps_order() {
        let provider = FormValueProvider::parse("?Age=4%202&age=+7&Name=A+B");
        let age = provider.get_value("AGE");
        assert_eq!(age.iter().collect::<Vec<_>>(), vec!["4 2", " 7"]);
        assert_eq!(provider.get_value("name").first_value(), Some("A B"));
        assert!(provider.get_value("missing").is_none());
    }

    #[test]
    fn form_provider_keeps_empty_values() {
        let provider = FormValueProvider::parse("Age=&Other");
        assert_eq!(provider.get_value("Age").first_value(), Some(""));
        assert_eq!(provider.get_value("Other").first_value(), Some(""));
    }

    #[test]
    fn prefix_matching_respects_model_path_separators() {
        let provider: MapValueProvider = [("Address.Postcode", "AB1"), ("Items[0]", "x")]
            .into_iter()
            .collect();
        assert!(provider.contains_prefix("address"));
        assert!(provider.contains_prefix("Items"));
        assert!(!provider.contains_prefix("Addr"));
        assert!(provider.contains_prefix(""));
        assert!(!MapValueProvider::new().contains_prefix(""));
    }

    #[test]
    fn composite_prefers_earlier_providers() {
        let composite = CompositeValueProvider::new()
            .with(FormValueProvider::parse("Age=1"))
            .with(FormValueProvider::parse("Age=2&Year=2024"));
        assert_eq!(composite.get_value("Age").first_value(), Some("1"));
        assert_eq!(composite.get_value("Year").first_value(), Some("2024"));
        assert!(composite.get_value("Month").is_none());
        assert!(composite.contains_prefix("Year"));
    }
}
