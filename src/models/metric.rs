// Metric values: raw readings or their formatted rendering

use indexmap::IndexMap;
use serde::Serialize;

use crate::units;

/// One metric reading as it appears in a report.
///
/// Raw readings are `Int` (bytes, Hz, counts) or `Float` (percentages);
/// `format = true` turns them into `Text`. `Absent` serializes to `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    Absent,
    Int(u64),
    Float(f64),
    Text(String),
    List(Vec<Metric>),
    Map(IndexMap<String, Metric>),
}

impl Metric {
    /// Byte count, rendered with `byte2size` when `format` is set.
    pub fn bytes(value: u64, format: bool) -> Self {
        if format {
            Metric::Text(units::bytes(value))
        } else {
            Metric::Int(value)
        }
    }

    /// Frequency in Hz, rendered with `hz2size` when `format` is set.
    pub fn hertz(value: u64, format: bool) -> Self {
        if format {
            Metric::Text(units::hertz(value))
        } else {
            Metric::Int(value)
        }
    }

    pub fn percent(value: f64, format: bool) -> Self {
        if format {
            Metric::Text(units::percent(value))
        } else {
            Metric::Float(value)
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Metric::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Metric::Float(v) => Some(*v),
            Metric::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Metric::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Metric]> {
        match self {
            Metric::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Metric>> {
        match self {
            Metric::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<u64> for Metric {
    fn from(value: u64) -> Self {
        Metric::Int(value)
    }
}

impl From<String> for Metric {
    fn from(value: String) -> Self {
        Metric::Text(value)
    }
}

impl From<&str> for Metric {
    fn from(value: &str) -> Self {
        Metric::Text(value.to_string())
    }
}

impl From<Option<String>> for Metric {
    fn from(value: Option<String>) -> Self {
        value.map(Metric::Text).unwrap_or(Metric::Absent)
    }
}

impl<T: Into<Metric>> From<Vec<T>> for Metric {
    fn from(values: Vec<T>) -> Self {
        Metric::List(values.into_iter().map(Into::into).collect())
    }
}
