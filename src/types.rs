//! Core types for violation normalization.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output format identifier handled by the normalizer.
pub const FORMAT: &str = "jsonld";

/// Problem type URI used by the problem-details envelope.
pub const PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc2616#section-10";

/// Problem title used by the problem-details envelope.
pub const PROBLEM_TITLE: &str = "An error occurred";

/// Constraint definition that produced a violation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Constraint name (e.g., "NotNull"), informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Metadata attached by the rule author (e.g., severity).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
}

impl Constraint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// A single failed constraint check, as reported by a validation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,
    #[serde(default)]
    pub property_path: String,
    #[serde(default)]
    pub invalid_value: Value,
    #[serde(default)]
    pub root: Value,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<u64>,
    #[serde(default)]
    pub code: Option<String>,
    /// Originating constraint; also accepted as `cause` on input.
    #[serde(default, alias = "cause", skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

impl Violation {
    pub fn new(message: impl Into<String>, property_path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            property_path: property_path.into(),
            ..Self::default()
        }
    }

    pub fn with_message_template(mut self, template: impl Into<String>) -> Self {
        self.message_template = Some(template.into());
        self
    }

    pub fn with_invalid_value(mut self, value: Value) -> Self {
        self.invalid_value = value;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Payload of the originating constraint, if any.
    pub fn payload(&self) -> Option<&Map<String, Value>> {
        self.constraint.as_ref().and_then(|c| c.payload.as_ref())
    }
}

/// Ordered collection of violations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintViolationList {
    violations: Vec<Violation>,
}

impl ConstraintViolationList {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }
}

impl FromIterator<Violation> for ConstraintViolationList {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ConstraintViolationList {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintViolationList {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Which constraint payload keys are exposed in normalized records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PayloadFields {
    /// Expose the whole payload.
    #[default]
    All,
    /// Never expose a payload.
    Omit,
    /// Expose only these keys, in the payload's own order.
    Only(HashSet<String>),
}

impl PayloadFields {
    /// Map a nullable field list onto the three filtering modes.
    ///
    /// `None` exposes everything, an empty list exposes nothing.
    pub fn from_option(fields: Option<Vec<String>>) -> Self {
        match fields {
            None => PayloadFields::All,
            Some(fields) if fields.is_empty() => PayloadFields::Omit,
            Some(fields) => PayloadFields::Only(fields.into_iter().collect()),
        }
    }

    /// Filter a payload. Returns `None` when nothing remains.
    pub fn filter(&self, payload: &Map<String, Value>) -> Option<Map<String, Value>> {
        let filtered: Map<String, Value> = match self {
            PayloadFields::All => payload.clone(),
            PayloadFields::Omit => return None,
            PayloadFields::Only(allowed) => payload
                .iter()
                .filter(|(key, _)| allowed.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        };

        if filtered.is_empty() {
            None
        } else {
            Some(filtered)
        }
    }
}

/// Client-facing record for a single violation.
///
/// Serializes as `{propertyPath, message, code, payload?}` in that order.
/// `code` is always present (possibly `null`); `payload` only when non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    pub property_path: String,
    pub message: String,
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
}

impl NormalizedError {
    pub fn new(
        property_path: impl Into<String>,
        message: impl Into<String>,
        code: Option<String>,
    ) -> Self {
        Self {
            property_path: property_path.into(),
            message: message.into(),
            code,
            payload: None,
        }
    }

    /// Attach a payload; an empty payload is dropped.
    pub fn with_payload(mut self, payload: Option<Map<String, Value>>) -> Self {
        self.payload = payload.filter(|p| !p.is_empty());
        self
    }
}

/// Problem-details envelope wrapping the normalized records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationReport {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    pub detail: String,
    pub violations: Vec<NormalizedError>,
}
