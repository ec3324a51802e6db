//! Type converters: pure raw-string → [`Value`] functions.
//!
//! Each constructor returns a shareable [`Converter`]. A converter failing
//! with [`ConvertError::Value`] is wrapped by the multiplicity engine as an
//! `InvalidParameterValue` carrying the field's locator; a failure that is
//! already a [`DecodeError`](crate::DecodeError) passes through unchanged.

use std::str::FromStr;
use std::sync::Arc;

use crate::error::ConvertError;
use crate::value::Value;
use crate::version::Version;

pub type Converter = Arc<dyn Fn(&str) -> Result<Value, ConvertError> + Send + Sync>;

/// Identity: the raw string as-is.
pub fn string() -> Converter {
    Arc::new(|raw| Ok(Value::Str(raw.to_string())))
}

/// Lower-cased raw string.
pub fn lower() -> Converter {
    Arc::new(|raw| Ok(Value::Str(raw.to_lowercase())))
}

/// Upper-cased raw string.
pub fn upper() -> Converter {
    Arc::new(|raw| Ok(Value::Str(raw.to_uppercase())))
}

/// Whitespace-stripped raw string.
pub fn strip() -> Converter {
    Arc::new(|raw| Ok(Value::Str(raw.trim().to_string())))
}

/// Accepts only the given value, returning the raw string unchanged.
pub fn fixed(expected: &str, case_sensitive: bool) -> Converter {
    let expected = expected.to_string();
    Arc::new(move |raw| {
        let matches = if case_sensitive {
            raw == expected
        } else {
            raw.eq_ignore_ascii_case(&expected)
        };
        if !matches {
            return Err(ConvertError::Value(format!(
                "value mismatch, expected '{expected}', got '{raw}'"
            )));
        }
        Ok(Value::Str(raw.to_string()))
    })
}

/// Membership check against an enumeration, returning the raw string.
pub fn enumeration<I, T>(values: I, case_sensitive: bool) -> Converter
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    Arc::new(move |raw| {
        let matches = values.iter().any(|value| {
            if case_sensitive {
                raw == value
            } else {
                raw.eq_ignore_ascii_case(value)
            }
        });
        if !matches {
            let allowed = values
                .iter()
                .map(|value| format!("'{value}'"))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ConvertError::Value(format!(
                "unexpected value '{raw}', expected one of: {allowed}"
            )));
        }
        Ok(Value::Str(raw.to_string()))
    })
}

pub fn int() -> Converter {
    Arc::new(|raw| {
        i64::from_str(raw)
            .map(Value::Int)
            .map_err(|_| ConvertError::Value(format!("could not parse an integer from '{raw}'")))
    })
}

pub fn float() -> Converter {
    Arc::new(|raw| {
        f64::from_str(raw)
            .map(Value::Float)
            .map_err(|_| ConvertError::Value(format!("could not parse a number from '{raw}'")))
    })
}

/// Numeric parse plus an inclusive bounds check.
pub fn value_range(min: f64, max: f64) -> Converter {
    Arc::new(move |raw| {
        let value = f64::from_str(raw)
            .map_err(|_| ConvertError::Value(format!("could not parse a number from '{raw}'")))?;
        if value < min || value > max {
            return Err(ConvertError::Value(format!(
                "value '{value}' exceeds the expected bounds ({min}, {max})"
            )));
        }
        Ok(Value::Float(value))
    })
}

/// Accepts only literal `true`/`false`, case-insensitive.
pub fn boolean() -> Converter {
    Arc::new(|raw| match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err(ConvertError::Value(format!(
            "could not parse a boolean from '{raw}'"
        ))),
    })
}

/// Splits on `separator` and maps `inner` over every piece.
pub fn typelist(inner: Converter, separator: &str) -> Converter {
    let separator = separator.to_string();
    Arc::new(move |raw| {
        raw.split(separator.as_str())
            .map(|piece| inner(piece))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    })
}

/// Parses a `major.minor[.patch]` service version.
pub fn version() -> Converter {
    Arc::new(|raw| {
        raw.parse::<Version>()
            .map(Value::Version)
            .map_err(|err| ConvertError::Value(err.to_string()))
    })
}
