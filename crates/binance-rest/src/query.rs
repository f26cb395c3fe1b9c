//! Canonical query encoding
//!
//! The string produced here is sent on the wire *and* fed to the signer;
//! the two must be byte-identical or the exchange will reject the
//! signature. Parameters are therefore kept in an ordered map so the same
//! keys and values always render the same string.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// Bytes escaped in the canonical rendering
///
/// Everything except RFC 3986 unreserved characters. `=` and `&` are in
/// this set too; the separators are restored after encoding the joined
/// string (see [`ParamSet::canonical_query`]).
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// An ordered set of request parameters
///
/// Last write wins on duplicate keys. Request-scoped: built by one request
/// builder, consumed by one dispatch, never shared.
#[derive(Debug, Clone, Default)]
pub struct ParamSet(BTreeMap<String, String>);

impl ParamSet {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter; replaces any existing value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether the set contains no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Render the set as a canonical `k1=v1&k2=v2` query string
    ///
    /// The joined string is percent-escaped as a whole and the structural
    /// `=`/`&` separators are then restored from their escaped forms. The
    /// encoding deliberately targets the joined string rather than each
    /// value independently; this is the exact payload the signer consumes.
    /// An empty set renders as an empty string.
    pub fn canonical_query(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let joined = self
            .0
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        utf8_percent_encode(&joined, QUERY_ESCAPE)
            .to_string()
            .replace("%3D", "=")
            .replace("%26", "&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_renders_empty_string() {
        assert_eq!(ParamSet::new().canonical_query(), "");
    }

    #[test]
    fn renders_pairs_with_no_trailing_separator() {
        let params: ParamSet = [("symbol", "BTCUSDT"), ("limit", "100")]
            .into_iter()
            .collect();
        assert_eq!(params.canonical_query(), "limit=100&symbol=BTCUSDT");
    }

    #[test]
    fn encoding_is_deterministic() {
        let params: ParamSet = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
        assert_eq!(params.canonical_query(), params.canonical_query());
        assert_eq!(params.canonical_query(), "a=1&b=2&c=3");

        // Insertion order must not matter.
        let reordered: ParamSet = [("c", "3"), ("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.canonical_query(), reordered.canonical_query());
    }

    #[test]
    fn last_write_wins_on_duplicate_key() {
        let mut params = ParamSet::new();
        params.insert("symbol", "ETHBTC");
        params.insert("symbol", "BTCUSDT");
        assert_eq!(params.len(), 1);
        assert_eq!(params.canonical_query(), "symbol=BTCUSDT");
    }

    #[test]
    fn unsafe_characters_are_escaped() {
        let mut params = ParamSet::new();
        params.insert("note", "a b/c");
        assert_eq!(params.canonical_query(), "note=a%20b%2Fc");
    }

    #[test]
    fn separators_survive_whole_string_encoding() {
        // The escape pass covers the joined string, so separator bytes
        // inside values are restored along with the structural ones.
        let mut params = ParamSet::new();
        params.insert("a", "1=2");
        params.insert("b", "3&4");
        assert_eq!(params.canonical_query(), "a=1=2&b=3&4");
    }

    #[test]
    fn decimal_values_pass_through_unescaped() {
        let mut params = ParamSet::new();
        params.insert("price", "0.00123");
        params.insert("quantity", "1.5");
        assert_eq!(params.canonical_query(), "price=0.00123&quantity=1.5");
    }
}
