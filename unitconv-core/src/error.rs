//! Conversion errors and their structured report form
//!
//! Errors are typed values returned to the caller. Nothing is coerced to a
//! default unit or a zero result; the caller decides how to surface them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INVALID_VALUE: &str = "INVALID_VALUE";
    pub const INVALID_TABLE: &str = "INVALID_TABLE";
}

/// Error type for table lookups and conversions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Category key not present in the table
    #[error("Unknown category: {category}")]
    UnknownCategory {
        category: String,
        suggestions: Vec<String>,
    },

    /// Unit name not present within the given category
    #[error("Unknown unit '{unit}' in category {category}")]
    UnknownUnit {
        category: String,
        unit: String,
        suggestions: Vec<String>,
    },

    /// Input (or computed) value is NaN or infinite
    #[error("Invalid value: {value} is not a finite number")]
    InvalidValue { value: f64 },

    /// Reference data breaks a table invariant
    #[error("Invalid unit table: {0}")]
    InvalidTable(String),
}

impl ConvertError {
    pub fn unknown_category(category: impl Into<String>) -> Self {
        Self::UnknownCategory {
            category: category.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn unknown_unit(category: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::UnknownUnit {
            category: category.into(),
            unit: unit.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn invalid_value(value: f64) -> Self {
        Self::InvalidValue { value }
    }

    pub fn invalid_table(details: impl Into<String>) -> Self {
        Self::InvalidTable(details.into())
    }

    /// Builder: attach "did you mean" candidates to an unknown-name error
    pub fn with_suggestions(mut self, candidates: Vec<String>) -> Self {
        match &mut self {
            Self::UnknownCategory { suggestions, .. } | Self::UnknownUnit { suggestions, .. } => {
                *suggestions = candidates;
            }
            _ => {}
        }
        self
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCategory { .. } => codes::UNKNOWN_CATEGORY,
            Self::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            Self::InvalidValue { .. } => codes::INVALID_VALUE,
            Self::InvalidTable(_) => codes::INVALID_TABLE,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownCategory { suggestions, .. } if !suggestions.is_empty() => {
                Some(format!("Did you mean: {}?", suggestions.join(", ")))
            }
            Self::UnknownCategory { .. } => {
                Some("Use list_categories to see available categories".to_string())
            }
            Self::UnknownUnit { suggestions, .. } if !suggestions.is_empty() => {
                Some(format!("Did you mean: {}?", suggestions.join(", ")))
            }
            Self::UnknownUnit { category, .. } => {
                Some(format!("Use list_units(\"{}\") to see available units", category))
            }
            Self::InvalidValue { .. } => Some("Provide a finite number".to_string()),
            Self::InvalidTable(_) => None,
        }
    }
}

/// Structured error for tool clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorReport {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl From<&ConvertError> for ErrorReport {
    fn from(err: &ConvertError) -> Self {
        let report = Self::new(err.code(), err.to_string());
        match err.suggestion() {
            Some(s) => report.with_suggestion(s),
            None => report,
        }
    }
}

impl From<ConvertError> for ErrorReport {
    fn from(err: ConvertError) -> Self {
        Self::from(&err)
    }
}
