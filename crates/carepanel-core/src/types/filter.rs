//! Filter types for report queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filter key for the reporting month (`YYYY-MM`).
pub const MONTH: &str = "month";
/// Filter key for the attending clinician.
pub const CLINICIAN: &str = "clinician";

/// A scalar filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Set of report filters keyed by field name.
///
/// Keys that are absent are unfiltered. Once built, a filter is only read;
/// the fetcher serializes it into each query as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportFilter(BTreeMap<String, FilterValue>);

impl ReportFilter {
    /// An unfiltered report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this filter with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Shorthand for a month filter.
    pub fn month(self, month: impl Into<String>) -> Self {
        self.with(MONTH, month.into())
    }

    /// Shorthand for a clinician filter.
    pub fn clinician(self, clinician: impl Into<String>) -> Self {
        self.with(CLINICIAN, clinician.into())
    }

    /// Look up a filter value.
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    /// Whether no filter keys are set.
    pub fn is_unfiltered(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate filters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
