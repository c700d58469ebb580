//! Query-parameter normalization
//!
//! Endpoint methods accept heterogeneous argument shapes: optional
//! scalars, ID lists, and nested option groups such as the tunable
//! `min_*`/`max_*`/`target_*` audio attributes. [`Params`] normalizes all
//! of them into the flat string map the API expects:
//!
//! - absent (`None`) entries are dropped,
//! - list values are joined with a single comma,
//! - group values are flattened by concatenating the parent key with each
//!   inner key (`max_` + `tempo` becomes `max_tempo`), removing the
//!   parent entry.
//!
//! Emission order carries no meaning; a sorted map keeps output stable.

use std::collections::BTreeMap;

/// A single un-normalized parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Verbatim string
    Str(String),
    /// Integer, rendered decimal
    Int(i64),
    /// Float, rendered with minimal digits
    Float(f64),
    /// Boolean, rendered `true`/`false`
    Bool(bool),
    /// List, comma-joined on normalization
    List(Vec<String>),
    /// Nested option group, flattened on normalization
    Group(Params),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(value: &[&str]) -> Self {
        ParamValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Params> for ParamValue {
    fn from(value: Params) -> Self {
        ParamValue::Group(value)
    }
}

/// A builder for one request's query parameters.
///
/// # Examples
///
/// ```
/// use ostinato::client::Params;
///
/// let ids: &[&str] = &["4iV5W9uYEdYUVa79Axb7Rh", "1301WleyT98MSxVHPZCA6M"];
/// let query = Params::new()
///     .set("ids", ids)
///     .set_opt("market", None::<&str>)
///     .normalize();
/// assert_eq!(query["ids"], "4iV5W9uYEdYUVa79Axb7Rh,1301WleyT98MSxVHPZCA6M");
/// assert!(!query.contains_key("market"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    pub fn set(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Adds a parameter when present; absent values are dropped.
    pub fn set_opt(self, key: &str, value: Option<impl Into<ParamValue>>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Returns `true` when no parameters were set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens into the final key/value map.
    pub fn normalize(&self) -> BTreeMap<String, String> {
        let mut flat = BTreeMap::new();
        self.flatten_into("", &mut flat);
        flat
    }

    fn flatten_into(&self, prefix: &str, flat: &mut BTreeMap<String, String>) {
        for (key, value) in &self.0 {
            let key = format!("{prefix}{key}");
            match value {
                ParamValue::Str(s) => {
                    flat.insert(key, s.clone());
                }
                ParamValue::Int(i) => {
                    flat.insert(key, i.to_string());
                }
                ParamValue::Float(f) => {
                    flat.insert(key, f.to_string());
                }
                ParamValue::Bool(b) => {
                    flat.insert(key, b.to_string());
                }
                ParamValue::List(items) => {
                    flat.insert(key, items.join(","));
                }
                ParamValue::Group(group) => group.flatten_into(&key, flat),
            }
        }
    }
}
