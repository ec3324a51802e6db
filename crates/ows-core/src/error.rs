//! Decoding error taxonomy.
//!
//! Two strictly separated families: [`DecodeError`] is client-facing and
//! always carries a stable protocol code and a locator naming the offending
//! request field; [`SchemaError`] is a programmer/schema bug, never carries a
//! locator and must never be turned into a protocol exception report.

use std::fmt;

use thiserror::Error;

/// Expected cardinality reported by [`DecodeError::WrongMultiplicity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A scalar field saw more than one value.
    AtMostOne,
    /// A fixed-count field saw a different count.
    Exactly(usize),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::AtMostOne => f.write_str("at most one"),
            Expected::Exactly(n) => write!(f, "{n}"),
        }
    }
}

/// Client-facing decoding failure.
///
/// Exactly one of these is produced per failed decode call. The
/// [`code`](DecodeError::code)/[`locator`](DecodeError::locator) pairing is a
/// wire-level contract consumed by protocol exception reports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("parameter '{locator}': expected {expected}, got {count}")]
    WrongMultiplicity {
        locator: String,
        expected: Expected,
        count: usize,
    },
    #[error("missing required parameter '{locator}'")]
    MissingParameter { locator: String },
    #[error("missing at least one required parameter '{locator}'")]
    MissingParameterMultiple { locator: String },
    #[error("invalid parameter '{locator}': {message}")]
    InvalidParameterValue { locator: String, message: String },
    #[error("no choice produced a value for '{locator}'")]
    NoChoiceResult { locator: String },
    #[error("parameter '{locator}': expected exactly one of the mutually exclusive values, got {count}")]
    MutualExclusiveViolation { locator: String, count: usize },
}

impl DecodeError {
    /// Stable machine code for protocol-level exception reports.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::MissingParameter { .. } | DecodeError::MissingParameterMultiple { .. } => {
                "MissingParameterValue"
            }
            DecodeError::WrongMultiplicity { .. }
            | DecodeError::InvalidParameterValue { .. }
            | DecodeError::NoChoiceResult { .. }
            | DecodeError::MutualExclusiveViolation { .. } => "InvalidParameterValue",
        }
    }

    /// Client-facing identifier of the request field that failed.
    pub fn locator(&self) -> &str {
        match self {
            DecodeError::WrongMultiplicity { locator, .. }
            | DecodeError::MissingParameter { locator }
            | DecodeError::MissingParameterMultiple { locator }
            | DecodeError::InvalidParameterValue { locator, .. }
            | DecodeError::NoChoiceResult { locator }
            | DecodeError::MutualExclusiveViolation { locator, .. } => locator,
        }
    }
}

/// Schema or caller bug. Never reported to a protocol client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate field '{0}' in schema")]
    DuplicateField(String),
    #[error("field '{name}': a default requires a multiplicity that permits zero values")]
    DefaultNotAllowed { name: String },
    #[error("no decoded parameter named '{0}'")]
    MissingField(String),
    #[error("expected {expected} value, got {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("invalid path expression '{expr}': {message}")]
    InvalidPath { expr: String, message: String },
}

/// Failure of a type converter.
///
/// `Value` is a plain input-validation failure; the multiplicity engine wraps
/// it as [`DecodeError::InvalidParameterValue`] with the field's locator.
/// `Decode` already carries a code and locator (it came out of a nested
/// decoder or combinator) and is re-raised unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("{0}")]
    Value(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Any failure a full decode-into-object call can produce.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_locators() {
        let err = DecodeError::MissingParameter {
            locator: "request".to_string(),
        };
        assert_eq!(err.code(), "MissingParameterValue");
        assert_eq!(err.locator(), "request");

        let err = DecodeError::WrongMultiplicity {
            locator: "subset".to_string(),
            expected: Expected::AtMostOne,
            count: 2,
        };
        assert_eq!(err.code(), "InvalidParameterValue");
        assert_eq!(
            err.to_string(),
            "parameter 'subset': expected at most one, got 2"
        );

        let err = DecodeError::WrongMultiplicity {
            locator: "corner".to_string(),
            expected: Expected::Exactly(2),
            count: 3,
        };
        assert_eq!(err.to_string(), "parameter 'corner': expected 2, got 3");
    }

    #[test]
    fn convert_error_wraps_decode_error_transparently() {
        let inner = DecodeError::InvalidParameterValue {
            locator: "inner".to_string(),
            message: "bad".to_string(),
        };
        let err = ConvertError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
