//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., a complete search slug, a
//! known payment status) so that once a value reaches the controllers it can
//! be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Number of path segments a hotel search slug must carry.
pub const SLUG_SEGMENTS: usize = 7;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Slug had the wrong number of segments or an empty one.
    #[error("search slug must have 7 non-empty segments, got {0:?}")]
    InvalidSlug(Vec<String>),
    /// Payment status filter outside of the supported set.
    #[error("unknown payment status: {0}")]
    UnknownPaymentStatus(String),
}

/// Ordered route segments describing a hotel search.
///
/// Positions: destination, check-in, check-out, rooms, adults, children,
/// nationality.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Hash)]
pub struct SearchSlug(Vec<String>);

impl SearchSlug {
    /// Accepts exactly [`SLUG_SEGMENTS`] non-empty segments.
    pub fn new<I, S>(segments: I) -> Result<Self, TypeConstraintError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.len() != SLUG_SEGMENTS || segments.iter().any(|s| s.is_empty()) {
            return Err(TypeConstraintError::InvalidSlug(segments));
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Destination slug with dashes turned back into spaces.
    pub fn destination(&self) -> String {
        self.0[0].replace('-', " ")
    }

    pub fn checkin(&self) -> &str {
        &self.0[1]
    }

    pub fn checkout(&self) -> &str {
        &self.0[2]
    }

    pub fn rooms(&self) -> Option<u32> {
        self.0[3].parse().ok()
    }

    pub fn adults(&self) -> Option<u32> {
        self.0[4].parse().ok()
    }

    pub fn children(&self) -> Option<u32> {
        self.0[5].parse().ok()
    }

    pub fn nationality(&self) -> &str {
        &self.0[6]
    }
}

impl TryFrom<Vec<String>> for SearchSlug {
    type Error = TypeConstraintError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Display for SearchSlug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Payment-status filter applied to the dashboard booking list.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "")]
    All,
    Paid,
    Unpaid,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    /// Filter tabs in display order.
    pub const TABS: [PaymentStatus; 5] = [
        PaymentStatus::All,
        PaymentStatus::Paid,
        PaymentStatus::Unpaid,
        PaymentStatus::Refunded,
        PaymentStatus::Cancelled,
    ];

    /// Wire value; `All` is the empty string.
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::All => "",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    /// Default English tab label.
    pub const fn label(self) -> &'static str {
        match self {
            PaymentStatus::All => "All",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Refunded => "Refunded",
            PaymentStatus::Cancelled => "Cancelled",
        }
    }

    pub const fn is_all(self) -> bool {
        matches!(self, PaymentStatus::All)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(PaymentStatus::All),
            "paid" => Ok(PaymentStatus::Paid),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "refunded" => Ok(PaymentStatus::Refunded),
            "cancelled" | "canceled" => Ok(PaymentStatus::Cancelled),
            other => Err(TypeConstraintError::UnknownPaymentStatus(other.to_string())),
        }
    }
}

/// Reads a JSON number or numeric string as `u64`; anything else is `None`.
pub(crate) fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// JavaScript-style truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads a JSON string or number as text; null and other shapes are `None`.
pub(crate) fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `deserialize_with` helper for counters the backend sends as numbers or strings.
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_u64))
}

/// `deserialize_with` helper for identifiers that may be numeric.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_string))
}
