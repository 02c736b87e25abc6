//! Property name translation for normalized output.
//!
//! Converters come in two shapes:
//! - [`BasicNameConverter`] sees only the property name.
//! - [`AdvancedNameConverter`] also sees the owner class and target format.
//!
//! [`NameConverter`] wraps either one and picks the richer call when it can.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::NameConverterError;

/// Translates a property name without context.
pub trait BasicNameConverter: Send + Sync {
    fn normalize(&self, property_name: &str) -> Result<String, NameConverterError>;
}

/// Translates a property name given its owner class and the output format.
pub trait AdvancedNameConverter: Send + Sync {
    fn normalize(
        &self,
        property_name: &str,
        class: Option<&str>,
        format: Option<&str>,
    ) -> Result<String, NameConverterError>;
}

impl<F> BasicNameConverter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, property_name: &str) -> Result<String, NameConverterError> {
        Ok(self(property_name))
    }
}

/// A configured name converter, with its capability resolved up front.
#[derive(Clone)]
pub enum NameConverter {
    Basic(Arc<dyn BasicNameConverter>),
    Advanced(Arc<dyn AdvancedNameConverter>),
}

impl NameConverter {
    pub fn basic(converter: impl BasicNameConverter + 'static) -> Self {
        NameConverter::Basic(Arc::new(converter))
    }

    pub fn advanced(converter: impl AdvancedNameConverter + 'static) -> Self {
        NameConverter::Advanced(Arc::new(converter))
    }

    /// Convert a property path for the given output format.
    ///
    /// Advanced converters receive no owner class. Empty names are still
    /// passed to the converter.
    pub fn convert(&self, property_name: &str, format: &str) -> Result<String, NameConverterError> {
        match self {
            NameConverter::Basic(converter) => converter.normalize(property_name),
            NameConverter::Advanced(converter) => {
                converter.normalize(property_name, None, Some(format))
            }
        }
    }
}

impl fmt::Debug for NameConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameConverter::Basic(_) => f.write_str("NameConverter::Basic(..)"),
            NameConverter::Advanced(_) => f.write_str("NameConverter::Advanced(..)"),
        }
    }
}

/// Converts `camelCase` property names to `snake_case`.
///
/// When an attribute allow-list is set, names outside it pass through.
#[derive(Debug, Clone)]
pub struct CamelCaseToSnakeCaseNameConverter {
    attributes: Option<HashSet<String>>,
    lower_camel_case: bool,
}

impl CamelCaseToSnakeCaseNameConverter {
    pub fn new() -> Self {
        Self {
            attributes: None,
            lower_camel_case: true,
        }
    }

    /// Restrict conversion to these attribute names.
    pub fn attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Denormalize to `lowerCamelCase` (default) or `UpperCamelCase`.
    pub fn lower_camel_case(mut self, lower: bool) -> Self {
        self.lower_camel_case = lower;
        self
    }

    fn is_convertible(&self, name: &str) -> bool {
        self.attributes
            .as_ref()
            .map(|attrs| attrs.contains(name))
            .unwrap_or(true)
    }

    /// Convert a `snake_case` name back to camel case.
    pub fn denormalize(&self, property_name: &str) -> String {
        let mut camel = String::with_capacity(property_name.len());
        let mut upper_next = !self.lower_camel_case;
        for c in property_name.chars() {
            if c == '_' {
                upper_next = true;
            } else if upper_next {
                camel.extend(c.to_uppercase());
                upper_next = false;
            } else {
                camel.push(c);
            }
        }

        if self.lower_camel_case {
            let mut chars = camel.chars();
            if let Some(first) = chars.next() {
                camel = first.to_lowercase().chain(chars).collect();
            }
        }

        if self.is_convertible(&camel) {
            camel
        } else {
            property_name.to_string()
        }
    }
}

impl Default for CamelCaseToSnakeCaseNameConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicNameConverter for CamelCaseToSnakeCaseNameConverter {
    fn normalize(&self, property_name: &str) -> Result<String, NameConverterError> {
        if !self.is_convertible(property_name) {
            return Ok(property_name.to_string());
        }

        let mut snake = String::with_capacity(property_name.len() + 4);
        for (i, c) in property_name.chars().enumerate() {
            if c.is_ascii_uppercase() {
                if i > 0 {
                    snake.push('_');
                }
                snake.push(c.to_ascii_lowercase());
            } else {
                snake.push(c);
            }
        }
        Ok(snake)
    }
}
