//! # Observation header access
//!
//! The footprint calculator never parses an instrument file itself. It reads scalar
//! fields through the [`HeaderSource`] capability: a primary key/value block plus an
//! ordered list of secondary blocks ("subheaders") of the same shape.
//!
//! ## Lookup policy
//!
//! [`get_header_value`] implements the lookup shared by every field:
//!
//! 1. If the key is present **and defined** in the primary block, return it (even if it
//!    is `0`, `false` or an empty string).
//! 2. Otherwise walk the subheaders in order and return the first defined value.
//! 3. Otherwise the field is absent (`None`). Absence is not an error at this level.
//!
//! A value is *undefined* when it is [`HeaderValue::Null`].
//!
//! ## Concrete headers
//!
//! [`ObservationHeader`] is an in-memory implementation that can be built
//! programmatically or deserialised from JSON:
//!
//! ```rust
//! use footprint::header::{get_header_value, HeaderValue, ObservationHeader};
//!
//! let header = ObservationHeader::from_json_str(
//!     r#"{"BASEC1": 83.63, "SUBHEADERS": [{"MAP_PA": 12.5}]}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(get_header_value(&header, "MAP_PA"), Some(&HeaderValue::Float(12.5)));
//! assert_eq!(get_header_value(&header, "MAP_X"), None);
//! ```
use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::footprint_errors::FootprintError;

/// Scalar value stored under a header key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// Key present but value undefined
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl HeaderValue {
    /// `false` only for [`HeaderValue::Null`].
    pub fn is_defined(&self) -> bool {
        !matches!(self, HeaderValue::Null)
    }

    /// Numeric view of the value.
    ///
    /// Integers and floats are returned as `f64`; text is accepted if it parses as a
    /// number once trimmed. Booleans and `Null` have no numeric view.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HeaderValue::Int(i) => Some(*i as f64),
            HeaderValue::Float(f) => Some(*f),
            HeaderValue::Text(s) => s.trim().parse().ok(),
            HeaderValue::Bool(_) | HeaderValue::Null => None,
        }
    }

    /// Text view of the value, `None` for `Null`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            HeaderValue::Null => None,
            HeaderValue::Text(s) => Some(s.trim().to_string()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Null => write!(f, "<undefined>"),
            HeaderValue::Bool(b) => write!(f, "{b}"),
            HeaderValue::Int(i) => write!(f, "{i}"),
            HeaderValue::Float(x) => write!(f, "{x}"),
            HeaderValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for HeaderValue {
    fn from(x: f64) -> Self {
        HeaderValue::Float(x)
    }
}

impl From<i64> for HeaderValue {
    fn from(i: i64) -> Self {
        HeaderValue::Int(i)
    }
}

impl From<i32> for HeaderValue {
    fn from(i: i32) -> Self {
        HeaderValue::Int(i as i64)
    }
}

impl From<bool> for HeaderValue {
    fn from(b: bool) -> Self {
        HeaderValue::Bool(b)
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        HeaderValue::Text(s.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        HeaderValue::Text(s)
    }
}

/// Capability required from any observation metadata container.
///
/// Implementors expose their primary block through [`value`](HeaderSource::value) and
/// their secondary blocks, in order, through [`subheaders`](HeaderSource::subheaders).
/// The fallback search itself lives in [`get_header_value`].
pub trait HeaderSource: Sized {
    /// Value stored under `key` in the primary block only (may be `Null`).
    fn value(&self, key: &str) -> Option<&HeaderValue>;

    /// Ordered secondary blocks; empty when the container has none.
    fn subheaders(&self) -> &[Self];
}

/// Look up `key` with subheader fallback.
///
/// Arguments
/// -----------------
/// * `header`: the metadata container.
/// * `key`: header key, matched exactly (keys are upper case by convention).
///
/// Return
/// ----------
/// * The first defined value for `key`, primary block first, or `None`.
pub fn get_header_value<'a, H: HeaderSource>(header: &'a H, key: &str) -> Option<&'a HeaderValue> {
    if let Some(value) = header.value(key).filter(|v| v.is_defined()) {
        return Some(value);
    }

    header
        .subheaders()
        .iter()
        .filter_map(|sub| sub.value(key))
        .find(|v| v.is_defined())
}

/// Bare key/value block with no subheaders.
impl HeaderSource for HashMap<String, HeaderValue> {
    fn value(&self, key: &str) -> Option<&HeaderValue> {
        self.get(key)
    }

    fn subheaders(&self) -> &[Self] {
        &[]
    }
}

/// In-memory observation header.
///
/// When deserialised, the optional `SUBHEADERS` key is read as the ordered list of
/// secondary blocks and every other key becomes a primary field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ObservationHeader {
    #[serde(rename = "SUBHEADERS", default)]
    subheaders: Vec<ObservationHeader>,
    #[serde(flatten)]
    fields: HashMap<String, HeaderValue>,
}

impl ObservationHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a header from a JSON object.
    ///
    /// Return
    /// ----------
    /// * The header, or [`FootprintError::InvalidHeaderJson`] if the text is not a JSON
    ///   object of scalars (plus the optional `SUBHEADERS` array).
    pub fn from_json_str(json: &str) -> Result<Self, FootprintError> {
        serde_json::from_str(json).map_err(|e| FootprintError::InvalidHeaderJson(e.to_string()))
    }

    /// Builder-style insertion of a primary field.
    pub fn with(mut self, key: &str, value: impl Into<HeaderValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style append of a subheader.
    pub fn with_subheader(mut self, subheader: ObservationHeader) -> Self {
        self.subheaders.push(subheader);
        self
    }

    /// Insert or replace a primary field, returning the previous value.
    pub fn insert(&mut self, key: &str, value: impl Into<HeaderValue>) -> Option<HeaderValue> {
        self.fields.insert(key.to_string(), value.into())
    }

    /// Remove a primary field, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<HeaderValue> {
        self.fields.remove(key)
    }

    pub fn push_subheader(&mut self, subheader: ObservationHeader) {
        self.subheaders.push(subheader);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl HeaderSource for ObservationHeader {
    fn value(&self, key: &str) -> Option<&HeaderValue> {
        self.fields.get(key)
    }

    fn subheaders(&self) -> &[Self] {
        &self.subheaders
    }
}

#[cfg(test)]
mod header_test {
    use super::*;

    fn primary_with_subs() -> ObservationHeader {
        ObservationHeader::new()
            .with("MAP_X", 0.0)
            .with("MAP_Y", HeaderValue::Null)
            .with_subheader(
                ObservationHeader::new()
                    .with("MAP_Y", HeaderValue::Null)
                    .with("MAP_PA", 45),
            )
            .with_subheader(
                ObservationHeader::new()
                    .with("MAP_Y", 12.5)
                    .with("MAP_PA", 90),
            )
    }

    #[test]
    fn test_primary_falsy_value_is_returned() {
        let header = primary_with_subs();
        assert_eq!(
            get_header_value(&header, "MAP_X"),
            Some(&HeaderValue::Float(0.0))
        );
    }

    #[test]
    fn test_undefined_primary_falls_back_to_first_defined_subheader() {
        let header = primary_with_subs();
        assert_eq!(
            get_header_value(&header, "MAP_Y"),
            Some(&HeaderValue::Float(12.5))
        );
    }

    #[test]
    fn test_subheaders_searched_in_order() {
        let header = primary_with_subs();
        assert_eq!(get_header_value(&header, "MAP_PA"), Some(&HeaderValue::Int(45)));
    }

    #[test]
    fn test_absent_everywhere() {
        let header = primary_with_subs();
        assert_eq!(get_header_value(&header, "MAP_WDTH"), None);
    }

    #[test]
    fn test_hashmap_source() {
        let mut map: HashMap<String, HeaderValue> = HashMap::new();
        map.insert("TRACKSYS".into(), "J2000".into());
        assert_eq!(
            get_header_value(&map, "TRACKSYS"),
            Some(&HeaderValue::Text("J2000".into()))
        );
        assert_eq!(get_header_value(&map, "DATE-OBS"), None);
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(HeaderValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(HeaderValue::Text(" 22.01 ".into()).as_f64(), Some(22.01));
        assert_eq!(HeaderValue::Text("north".into()).as_f64(), None);
        assert_eq!(HeaderValue::Bool(true).as_f64(), None);
        assert_eq!(HeaderValue::Null.as_f64(), None);
    }

    #[test]
    fn test_text_views() {
        assert_eq!(HeaderValue::Text(" app ".into()).as_text(), Some("app".into()));
        assert_eq!(HeaderValue::Int(1950).as_text(), Some("1950".into()));
        assert_eq!(HeaderValue::Null.as_text(), None);
    }

    #[test]
    fn test_from_json() {
        let header = ObservationHeader::from_json_str(
            r#"{
                "BASEC1": 83.63,
                "BASEC2": "22.01",
                "TRACKSYS": null,
                "SUBHEADERS": [{"TRACKSYS": "APP", "DATE-OBS": "2019-03-14T09:23:45"}]
            }"#,
        )
        .unwrap();

        assert_eq!(header.len(), 3);
        assert_eq!(header.subheaders().len(), 1);
        assert_eq!(
            get_header_value(&header, "BASEC2").and_then(HeaderValue::as_f64),
            Some(22.01)
        );
        assert_eq!(
            get_header_value(&header, "TRACKSYS"),
            Some(&HeaderValue::Text("APP".into()))
        );
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = ObservationHeader::from_json_str("[1, 2, 3]").unwrap_err();
        assert_eq!(err, FootprintError::InvalidHeaderJson(String::new()));
    }
}
