//! Identifiers, payloads and request vocabulary for the campaign API.
//!
//! # Design
//! The remote API accepts arbitrary JSON for create/update bodies, so the
//! client does not model campaigns or ad groups as structs. Callers pass a
//! `Payload`, either raw JSON text or a `serde_json::Value`. The selector
//! and status types exist so callers can build common payloads without
//! hand-writing JSON; the client passes them through without checking them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Identifier of a campaign, ad group or ad-group creative set.
///
/// A numeric zero, an empty string and the string `"0"` are blank and are
/// rejected wherever an identifier is required.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceId {
    Numeric(u64),
    Text(String),
}

impl ResourceId {
    pub fn is_blank(&self) -> bool {
        match self {
            ResourceId::Numeric(n) => *n == 0,
            ResourceId::Text(s) => s.is_empty() || s == "0",
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Numeric(n) => write!(f, "{n}"),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        ResourceId::Numeric(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::Text(id)
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A request body as supplied by the caller.
///
/// A JSON string value (`Json(Value::String)`) counts as already-serialized
/// text: it is blank by the same rule as `Text` and is sent unquoted.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON that is already serialized. Sent byte for byte.
    Text(String),
    /// A JSON value, serialized by the dispatcher.
    Json(Value),
}

impl Payload {
    /// Build a `Json` payload from any serializable value.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        Ok(Payload::Json(serde_json::to_value(value)?))
    }

    /// Blank payloads count as "not set": null, `false`, zero, empty string,
    /// `"0"`, and empty arrays or objects.
    pub fn is_blank(&self) -> bool {
        match self {
            Payload::Text(s) => s.is_empty() || s == "0",
            Payload::Json(v) => match v {
                Value::Null => true,
                Value::Bool(b) => !b,
                Value::Number(n) => n.as_f64() == Some(0.0),
                Value::String(s) => s.is_empty() || s == "0",
                Value::Array(a) => a.is_empty(),
                Value::Object(o) => o.is_empty(),
            },
        }
    }

    pub fn to_text(&self) -> Result<String, ApiError> {
        match self {
            Payload::Text(s) | Payload::Json(Value::String(s)) => Ok(s.clone()),
            Payload::Json(v) => Ok(serde_json::to_string(v)?),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// Server-side filter for the `find` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, sort_order: SortOrder) -> Self {
        self.order_by.push(OrderBy {
            field: field.into(),
            sort_order,
        });
        self
    }

    pub fn paginate(mut self, offset: u32, limit: u32) -> Self {
        self.pagination = Some(Pagination { offset, limit });
        self
    }

    pub fn to_payload(&self) -> Result<Payload, ApiError> {
        Payload::from_serialize(self)
    }

    /// The `{"selector": {...}}` envelope used by the creative-set endpoints.
    pub fn to_wrapped_payload(&self) -> Result<Payload, ApiError> {
        Ok(Payload::Json(serde_json::json!({ "selector": serde_json::to_value(self)? })))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_case: Option<bool>,
}

impl Condition {
    pub fn new<I, S>(field: impl Into<String>, operator: Operator, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
            ignore_case: None,
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Operator::Equals, [value.into()])
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = Some(ignore_case);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "EQUALS")]
    Equals,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "LESS_THAN")]
    LessThan,
    #[serde(rename = "GREATER_THAN")]
    GreaterThan,
    #[serde(rename = "STARTSWITH")]
    StartsWith,
    #[serde(rename = "CONTAINS")]
    Contains,
    #[serde(rename = "CONTAINS_ANY")]
    ContainsAny,
    #[serde(rename = "CONTAINS_ALL")]
    ContainsAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub field: String,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
}

// ---------------------------------------------------------------------------
// Status vocabulary
// ---------------------------------------------------------------------------

/// User-controlled status of a campaign, ad group or creative set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Enabled,
    Paused,
}

/// Whether the platform is currently serving the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServingStatus {
    Running,
    NotRunning,
}

/// Status shown in the platform's UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayStatus {
    Running,
    OnHold,
    Paused,
}

/// Body for status-only updates, e.g. `{"status":"PAUSED"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: CampaignStatus,
}

impl StatusUpdate {
    pub fn new(status: CampaignStatus) -> Self {
        Self { status }
    }

    pub fn to_payload(&self) -> Result<Payload, ApiError> {
        Payload::from_serialize(self)
    }
}
