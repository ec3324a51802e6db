//! Dynamic decoded-value model and the per-call parameter map.

use crate::error::SchemaError;
use crate::version::Version;

/// A decoded parameter value.
///
/// Converters produce these; [`Params`] accumulates them per decode call.
/// `Absent` marks an optional scalar field that had no value and no default.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Version(Version),
}

impl Value {
    /// Short type name for [`SchemaError::WrongType`] messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Version(_) => "version",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    fn wrong_type(&self, expected: &'static str) -> SchemaError {
        SchemaError::WrongType {
            expected,
            actual: self.kind(),
        }
    }

    pub fn into_string(self) -> Result<String, SchemaError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(other.wrong_type("string")),
        }
    }

    /// `Absent` becomes `None`; anything but a string is a schema bug.
    pub fn into_opt_string(self) -> Result<Option<String>, SchemaError> {
        match self {
            Value::Absent => Ok(None),
            Value::Str(s) => Ok(Some(s)),
            other => Err(other.wrong_type("string")),
        }
    }

    pub fn into_bool(self) -> Result<bool, SchemaError> {
        match self {
            Value::Bool(b) => Ok(b),
            other => Err(other.wrong_type("boolean")),
        }
    }

    pub fn into_int(self) -> Result<i64, SchemaError> {
        match self {
            Value::Int(i) => Ok(i),
            other => Err(other.wrong_type("integer")),
        }
    }

    pub fn into_float(self) -> Result<f64, SchemaError> {
        match self {
            Value::Float(f) => Ok(f),
            other => Err(other.wrong_type("float")),
        }
    }

    pub fn into_version(self) -> Result<Version, SchemaError> {
        match self {
            Value::Version(v) => Ok(v),
            other => Err(other.wrong_type("version")),
        }
    }

    pub fn into_opt_version(self) -> Result<Option<Version>, SchemaError> {
        match self {
            Value::Absent => Ok(None),
            Value::Version(v) => Ok(Some(v)),
            other => Err(other.wrong_type("version")),
        }
    }

    pub fn into_list(self) -> Result<Vec<Value>, SchemaError> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.wrong_type("list")),
        }
    }

    pub fn into_string_list(self) -> Result<Vec<String>, SchemaError> {
        self.into_list()?
            .into_iter()
            .map(Value::into_string)
            .collect()
    }

    pub fn into_version_list(self) -> Result<Vec<Version>, SchemaError> {
        self.into_list()?
            .into_iter()
            .map(Value::into_version)
            .collect()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Version> for Value {
    fn from(value: Version) -> Self {
        Value::Version(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

/// Ordered name → value map produced by one decode call.
///
/// Insertion order follows schema declaration order. Lookup misses are
/// [`SchemaError`]s: by the time a name is taken out of the map, the schema
/// has already guaranteed it was decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value under `name`, keeping its position.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Removes and returns the value under `name`.
    pub fn take(&mut self, name: &str) -> Result<Value, SchemaError> {
        self.remove(name)
            .ok_or_else(|| SchemaError::MissingField(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Renames an entry in place; used by schema remap hooks.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> Result<(), SchemaError> {
        match self.entries.iter_mut().find(|(n, _)| n == from) {
            Some(entry) => {
                entry.0 = to.into();
                Ok(())
            }
            None => Err(SchemaError::MissingField(from.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}
