//! Normalization of constraint violation lists into client-facing error records.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::error::NameConverterError;
use crate::name_converter::NameConverter;
use crate::types::{
    ConstraintViolationList, NormalizedError, PayloadFields, Violation, ViolationReport, FORMAT,
    PROBLEM_TITLE, PROBLEM_TYPE,
};

/// Converts a [`ConstraintViolationList`] into [`NormalizedError`] records.
///
/// Configuration is fixed at construction, so one instance can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct ConstraintViolationListNormalizer {
    payload_fields: PayloadFields,
    name_converter: Option<NameConverter>,
}

impl ConstraintViolationListNormalizer {
    /// Create a normalizer without a name converter.
    pub fn new(payload_fields: PayloadFields) -> Self {
        Self {
            payload_fields,
            name_converter: None,
        }
    }

    /// Set the name converter applied to property paths.
    pub fn with_name_converter(mut self, name_converter: NameConverter) -> Self {
        self.name_converter = Some(name_converter);
        self
    }

    pub fn payload_fields(&self) -> &PayloadFields {
        &self.payload_fields
    }

    /// Whether this normalizer handles `data` in `format`.
    pub fn supports(&self, data: &dyn Any, format: Option<&str>) -> bool {
        format == Some(FORMAT) && data.is::<ConstraintViolationList>()
    }

    /// Types handled for `format`, each mapped to whether support is cacheable.
    pub fn supported_types(&self, format: Option<&str>) -> HashMap<TypeId, bool> {
        if format == Some(FORMAT) {
            HashMap::from([(TypeId::of::<ConstraintViolationList>(), true)])
        } else {
            HashMap::new()
        }
    }

    /// Normalize every violation, preserving input order.
    ///
    /// # Errors
    ///
    /// Returns the name converter's error unchanged if it fails.
    pub fn normalize(
        &self,
        list: &ConstraintViolationList,
    ) -> Result<Vec<NormalizedError>, NameConverterError> {
        let (_, records) = self.messages_and_violations(list)?;
        Ok(records)
    }

    /// Human-readable summary, one `path: message` line per violation.
    pub fn messages(&self, list: &ConstraintViolationList) -> Result<String, NameConverterError> {
        let (lines, _) = self.messages_and_violations(list)?;
        Ok(lines.join("\n"))
    }

    /// Wrap the normalized records in a problem-details envelope.
    ///
    /// `detail` and `violations` share one converted path per violation.
    pub fn normalize_report(
        &self,
        list: &ConstraintViolationList,
    ) -> Result<ViolationReport, NameConverterError> {
        let (lines, violations) = self.messages_and_violations(list)?;

        Ok(ViolationReport {
            type_url: PROBLEM_TYPE.to_string(),
            title: PROBLEM_TITLE.to_string(),
            detail: lines.join("\n"),
            violations,
        })
    }

    // Converts each property path exactly once.
    fn messages_and_violations(
        &self,
        list: &ConstraintViolationList,
    ) -> Result<(Vec<String>, Vec<NormalizedError>), NameConverterError> {
        let mut lines = Vec::with_capacity(list.len());
        let mut records = Vec::with_capacity(list.len());

        for violation in list {
            let property_path = self.property_path(&violation.property_path)?;
            lines.push(if property_path.is_empty() {
                violation.message.clone()
            } else {
                format!("{}: {}", property_path, violation.message)
            });
            records.push(self.normalize_violation(violation, property_path));
        }

        tracing::debug!(
            violations = records.len(),
            with_payload = records.iter().filter(|r| r.payload.is_some()).count(),
            "normalized constraint violation list"
        );

        Ok((lines, records))
    }

    fn normalize_violation(&self, violation: &Violation, property_path: String) -> NormalizedError {
        let payload = violation
            .payload()
            .and_then(|payload| self.payload_fields.filter(payload));

        NormalizedError::new(property_path, violation.message.clone(), violation.code.clone())
            .with_payload(payload)
    }

    fn property_path(&self, path: &str) -> Result<String, NameConverterError> {
        match &self.name_converter {
            None => Ok(path.to_string()),
            Some(converter) => {
                let converted = converter.convert(path, FORMAT)?;
                tracing::trace!(from = path, to = %converted, "converted property path");
                Ok(converted)
            }
        }
    }
}
