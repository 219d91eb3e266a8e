//! Route parameters and query strings
//!
//! [`RouteParams`] holds values bound by `:name` segments, [`QueryParams`]
//! holds the parsed `?key=value` part of a location. Both keep insertion
//! order, which is the order keys appear in a serialized full path.

use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Display;

/// Route parameters extracted from path segments
///
/// # Example
///
/// ```
/// use router_mock::RouteParams;
///
/// // Route pattern: /users/:userId
/// // Matched path: /users/4
/// let mut params = RouteParams::new();
/// params.insert("userId", "4");
///
/// assert_eq!(params.get("userId"), Some(&"4".to_string()));
/// assert_eq!(params.get_as::<u32>("userId"), Some(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: IndexMap<String, String>,
}

impl RouteParams {
    /// Create new empty route params
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value as a string
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a parameter and parse it as a specific type
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert a parameter, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Copy every parameter of `other` into `self`, overwriting on conflict
    pub fn merge(&mut self, other: &RouteParams) {
        for (key, value) in other.iter() {
            self.params.insert(key.clone(), value.clone());
        }
    }

    /// Check if parameter exists
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over all parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    /// Check if parameters are empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RouteParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters parsed from a location's query string
///
/// Supports multiple values for the same key.
///
/// # Example
///
/// ```
/// use router_mock::QueryParams;
///
/// let query = QueryParams::from_query_string("foo=1&bah=2&tag=a&tag=b");
///
/// assert_eq!(query.get("foo"), Some(&"1".to_string()));
/// assert_eq!(query.get_as::<i32>("bah"), Some(2));
/// assert_eq!(query.get_all("tag").unwrap().len(), 2);
/// assert_eq!(query.to_query_string(), "foo=1&bah=2&tag=a&tag=b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: IndexMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create new empty query params
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a query string (without the leading `?`)
    ///
    /// A key without `=` gets an empty value.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::new();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.insert(decode_uri_component(key), decode_uri_component(value));
        }

        params
    }

    /// Get first value for a parameter
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)?.first()
    }

    /// Get all values for a parameter
    pub fn get_all(&self, key: &str) -> Option<&Vec<String>> {
        self.params.get(key)
    }

    /// Get the first value parsed as type `T`
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Insert a parameter
    ///
    /// If the key already exists, the value is appended to the list.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.params
            .entry(key.into())
            .or_default()
            .push(value.to_string());
    }

    /// Set a parameter, dropping any values it had before
    pub fn replace(&mut self, key: impl Into<String>, value: impl Display) {
        self.params.insert(key.into(), vec![value.to_string()]);
    }

    /// Overlay `other` on top of `self`: keys present in `other` replace
    /// the values held here, new keys are appended.
    pub fn overlay(&mut self, other: &QueryParams) {
        for (key, values) in &other.params {
            self.params.insert(key.clone(), values.clone());
        }
    }

    /// Check if parameter exists
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over keys and their values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.params.iter()
    }

    /// Serialize back to a query string, keys in insertion order
    pub fn to_query_string(&self) -> String {
        let pairs: Vec<String> = self
            .params
            .iter()
            .flat_map(|(key, values)| {
                values.iter().map(move |value| {
                    format!(
                        "{}={}",
                        encode_uri_component(key),
                        encode_uri_component(value)
                    )
                })
            })
            .collect();

        pairs.join("&")
    }

    /// Check if parameters are empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of unique parameter keys
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = QueryParams::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

/// Characters left as-is by [`encode_uri_component`]
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode everything outside the unreserved set
pub(crate) fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Decode `%XX` escapes and `+` as space; malformed escapes are kept verbatim
pub(crate) fn decode_uri_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Decode `%XX` escapes in a path segment; `+` stays as is
pub(crate) fn decode_path_segment(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

// ============================================================================
// Tests
// ============================================================================
