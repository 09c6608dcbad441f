//! Credential records and agent responses
//!
//! Input files hold one JSON credential per line. The agent answers a
//! submission with either one result object for the whole request or an array
//! of result objects aligned with the submitted records.

use crate::utils::error::{LoaderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One credential to be issued
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialRecord {
    /// Schema name, never empty
    pub schema: String,
    /// Schema version, empty when the line did not carry one
    #[serde(default)]
    pub version: String,
    /// Claim values, never empty
    pub attributes: Value,
}

impl CredentialRecord {
    /// Parse and validate one input line
    pub fn parse(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line)
            .map_err(|e| LoaderError::malformed(format!("invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Validate an already decoded JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(LoaderError::malformed("credential is not a JSON object"));
        };

        let schema = match map.remove("schema") {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => return Err(LoaderError::malformed("no schema defined")),
        };

        let version = match map.remove("version") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(LoaderError::malformed(format!(
                    "version must be a string, got {}",
                    other
                )));
            }
        };

        let attributes = match map.remove("attributes") {
            Some(attrs) if !is_empty_value(&attrs) => attrs,
            _ => return Err(LoaderError::malformed("no schema attributes defined")),
        };

        Ok(Self {
            schema,
            version,
            attributes,
        })
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Outcome the agent reported for one record
#[derive(Debug, Clone, PartialEq)]
pub struct IssueOutcome {
    pub success: bool,
    /// Error text or result summary, when the agent sent one
    pub detail: Option<String>,
}

impl IssueOutcome {
    /// Interpret one result object; anything without `success: true` failed
    pub fn from_value(value: &Value) -> Self {
        let success = value.get("success") == Some(&Value::Bool(true));
        let detail = ["result", "error", "message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| (!value.is_object()).then(|| value.to_string()));

        Self { success, detail }
    }

    fn missing() -> Self {
        Self {
            success: false,
            detail: Some("no result returned for record".to_string()),
        }
    }
}

/// Body of a 200 response from the issue endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum IssueResponse {
    /// One result covering the whole request
    Single(IssueOutcome),
    /// One result per submitted record, in submission order
    PerRecord(Vec<IssueOutcome>),
}

impl IssueResponse {
    /// Decode a response body
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self::PerRecord(
                items.iter().map(IssueOutcome::from_value).collect(),
            )),
            obj @ Value::Object(_) => Ok(Self::Single(IssueOutcome::from_value(&obj))),
            other => Err(LoaderError::UnexpectedResponse(format!(
                "expected object or array, got {}",
                other
            ))),
        }
    }

    /// Outcomes aligned with a batch of `len` records.
    ///
    /// A single result applies to every record. Missing trailing results
    /// count as failures; surplus results are dropped.
    pub fn aligned(&self, len: usize) -> Vec<IssueOutcome> {
        match self {
            Self::Single(outcome) => vec![outcome.clone(); len],
            Self::PerRecord(outcomes) => {
                let mut aligned: Vec<IssueOutcome> = outcomes.iter().take(len).cloned().collect();
                aligned.resize_with(len, IssueOutcome::missing);
                aligned
            }
        }
    }

    /// Number of results beyond the `len` records submitted
    pub fn surplus(&self, len: usize) -> usize {
        match self {
            Self::Single(_) => 0,
            Self::PerRecord(outcomes) => outcomes.len().saturating_sub(len),
        }
    }
}

/// Body of a proof request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProofRequest {
    pub credential_ids: Vec<String>,
}
