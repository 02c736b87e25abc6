//! Constraint Violation Normalizer
//!
//! Converts constraint violation lists into client-facing error records.
//!
//! Each violation becomes a record with a fixed key order:
//! `propertyPath`, `message`, `code`, and `payload` when there is one.
//!
//! # Example
//!
//! ```
//! use violation_normalizer::{
//!     Constraint, ConstraintViolationList, ConstraintViolationListNormalizer, PayloadFields,
//!     Violation,
//! };
//! use serde_json::json;
//!
//! let payload = json!({ "severity": "warning", "internal": "x" });
//! let list = ConstraintViolationList::new(vec![
//!     Violation::new("This value should not be null.", "name")
//!         .with_code("ad32d13f-c3d4-423b-909a-857b961eb720")
//!         .with_constraint(Constraint::new("NotNull").with_payload(
//!             payload.as_object().unwrap().clone(),
//!         )),
//! ]);
//!
//! let fields = PayloadFields::from_option(Some(vec!["severity".to_string()]));
//! let normalizer = ConstraintViolationListNormalizer::new(fields);
//! let records = normalizer.normalize(&list).unwrap();
//!
//! assert_eq!(
//!     serde_json::to_value(&records).unwrap(),
//!     json!([{
//!         "propertyPath": "name",
//!         "message": "This value should not be null.",
//!         "code": "ad32d13f-c3d4-423b-909a-857b961eb720",
//!         "payload": { "severity": "warning" }
//!     }])
//! );
//! ```
//!
//! # Payload Fields
//!
//! | Setting | Effect on `payload` |
//! |---------|---------------------|
//! | `PayloadFields::All` | Whole constraint payload |
//! | `PayloadFields::Omit` | Never present |
//! | `PayloadFields::Only(set)` | Matching keys, original order; absent if none match |
//!
//! # Name Converters
//!
//! Property paths can be translated by a [`NameConverter`]. Basic converters
//! see only the name; advanced converters also receive the output format
//! ([`FORMAT`]) and no owner class.

mod config;
mod error;
mod loader;
mod name_converter;
mod normalizer;
mod types;

pub use config::{NameConverterKind, NormalizerConfig};
pub use error::{LoadError, NameConverterError};
pub use loader::{load_config, load_violations, load_violations_str};
pub use name_converter::{
    AdvancedNameConverter, BasicNameConverter, CamelCaseToSnakeCaseNameConverter, NameConverter,
};
pub use normalizer::ConstraintViolationListNormalizer;
pub use types::{
    Constraint, ConstraintViolationList, NormalizedError, PayloadFields, Violation,
    ViolationReport, FORMAT, PROBLEM_TITLE, PROBLEM_TYPE,
};
