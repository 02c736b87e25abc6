//! Serializable normalizer configuration.

use serde::{Deserialize, Serialize};

use crate::name_converter::{CamelCaseToSnakeCaseNameConverter, NameConverter};
use crate::normalizer::ConstraintViolationListNormalizer;
use crate::types::PayloadFields;

/// Stock name converters selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameConverterKind {
    /// `camelCase` to `snake_case`.
    SnakeCase,
}

impl NameConverterKind {
    /// Parse a converter name.
    ///
    /// Returns `None` for unknown values (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "snake_case" => Some(NameConverterKind::SnakeCase),
            _ => None,
        }
    }

    pub fn build(self) -> NameConverter {
        match self {
            NameConverterKind::SnakeCase => {
                NameConverter::basic(CamelCaseToSnakeCaseNameConverter::new())
            }
        }
    }
}

/// Normalizer settings, as read from a JSON config file.
///
/// ```json
/// { "payloadFields": ["severity"], "nameConverter": "snake_case" }
/// ```
///
/// An absent `payloadFields` exposes the whole payload; an empty list
/// exposes none of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizerConfig {
    #[serde(default)]
    pub payload_fields: Option<Vec<String>>,
    #[serde(default)]
    pub name_converter: Option<NameConverterKind>,
}

impl NormalizerConfig {
    /// Build a normalizer from these settings.
    pub fn build(&self) -> ConstraintViolationListNormalizer {
        let normalizer = ConstraintViolationListNormalizer::new(PayloadFields::from_option(
            self.payload_fields.clone(),
        ));

        match self.name_converter {
            Some(kind) => normalizer.with_name_converter(kind.build()),
            None => normalizer,
        }
    }
}
