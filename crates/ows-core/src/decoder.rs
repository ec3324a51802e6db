//! Field descriptors, multiplicity enforcement, combinators and the decoder.
//!
//! A [`Schema`] is an explicit ordered list of named [`Field`]s, shared
//! process-wide and immutable. A [`Decoder`] binds a schema to one input
//! instance (anything implementing [`Source`]) and evaluates every field
//! into a [`Params`] map, all-or-nothing.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::convert::Converter;
use crate::error::{ConvertError, DecodeError, Error, Expected, SchemaError};
use crate::value::{Params, Value};

/// Declared cardinality contract for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    Exactly(usize),
    ZeroOrOne,
    OneOrMore,
    Any,
}

impl Multiplicity {
    /// Scalar multiplicities yield a single value, not a list.
    fn is_scalar(self) -> bool {
        matches!(self, Multiplicity::ZeroOrOne | Multiplicity::Exactly(1))
    }

    /// Whether evaluation can ever reach a default.
    fn permits_zero(self) -> bool {
        matches!(self, Multiplicity::ZeroOrOne | Multiplicity::Any)
    }
}

/// Backend-specific expression identifying where a field's raw values live.
pub trait Selector {
    /// Default client-facing locator when the parameter does not override it.
    fn locator(&self) -> String;
}

/// One bound input instance a schema can be decoded against.
///
/// `select` must return an empty vector on absence, never an error: absence
/// handling is the field descriptor's job, not the selector's.
pub trait Source {
    type Selector: Selector;

    fn select(&self, selector: &Self::Selector) -> Vec<String>;
}

pub type DefaultFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// A field descriptor: selector + converter + multiplicity + default.
pub struct Parameter<S> {
    selector: S,
    converter: Option<Converter>,
    multiplicity: Multiplicity,
    default: Option<Value>,
    default_factory: Option<DefaultFactory>,
    locator: Option<String>,
}

impl<S: Selector> Parameter<S> {
    /// A required scalar field (`Exactly(1)`), raw string value.
    pub fn new(selector: S) -> Self {
        Self {
            selector,
            converter: None,
            multiplicity: Multiplicity::Exactly(1),
            default: None,
            default_factory: None,
            locator: None,
        }
    }

    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    pub fn multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    pub fn optional(self) -> Self {
        self.multiplicity(Multiplicity::ZeroOrOne)
    }

    pub fn one_or_more(self) -> Self {
        self.multiplicity(Multiplicity::OneOrMore)
    }

    pub fn any(self) -> Self {
        self.multiplicity(Multiplicity::Any)
    }

    pub fn exactly(self, count: usize) -> Self {
        self.multiplicity(Multiplicity::Exactly(count))
    }

    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Invoked fresh on every decode; takes precedence over a static default.
    pub fn default_factory(mut self, factory: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default_factory = Some(Arc::new(factory));
        self
    }

    /// Overrides the client-facing locator derived from the selector.
    pub fn locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    fn effective_locator(&self) -> String {
        self.locator
            .clone()
            .unwrap_or_else(|| self.selector.locator())
    }

    fn default_value(&self) -> Option<Value> {
        if let Some(factory) = &self.default_factory {
            return Some(factory());
        }
        self.default.clone()
    }

    fn convert(&self, raw: &str, locator: &str) -> Result<Value, DecodeError> {
        match &self.converter {
            None => Ok(Value::Str(raw.to_string())),
            Some(converter) => converter(raw).map_err(|err| match err {
                // already carries code and locator, keep it intact
                ConvertError::Decode(inner) => inner,
                ConvertError::Value(message) => DecodeError::InvalidParameterValue {
                    locator: locator.to_string(),
                    message,
                },
            }),
        }
    }

    /// Enforces the multiplicity contract and produces the field's value.
    pub fn eval<Src>(&self, source: &Src) -> Result<Value, DecodeError>
    where
        Src: Source<Selector = S>,
    {
        let raw = source.select(&self.selector);
        let count = raw.len();
        let locator = self.effective_locator();
        let multiplicity = self.multiplicity;

        if multiplicity.is_scalar() && count > 1 {
            return Err(DecodeError::WrongMultiplicity {
                locator,
                expected: Expected::AtMostOne,
                count,
            });
        } else if multiplicity == Multiplicity::Exactly(1) && count == 0 {
            return Err(DecodeError::MissingParameter { locator });
        } else if multiplicity == Multiplicity::OneOrMore && count == 0 {
            return Err(DecodeError::MissingParameterMultiple { locator });
        } else if let Multiplicity::Exactly(expected) = multiplicity {
            if count != expected {
                return Err(DecodeError::WrongMultiplicity {
                    locator,
                    expected: Expected::Exactly(expected),
                    count,
                });
            }
        }

        if !multiplicity.is_scalar() {
            if count == 0 && multiplicity == Multiplicity::Any {
                if let Some(value) = self.default_value() {
                    return Ok(value);
                }
            }
            let mut items = Vec::with_capacity(count);
            for value in &raw {
                items.push(self.convert(value, &locator)?);
            }
            Ok(Value::List(items))
        } else if multiplicity == Multiplicity::ZeroOrOne && count == 0 {
            Ok(self.default_value().unwrap_or(Value::Absent))
        } else {
            self.convert(&raw[0], &locator)
        }
    }
}

impl<S> Parameter<S> {
    fn has_default(&self) -> bool {
        self.default.is_some() || self.default_factory.is_some()
    }
}

impl<S: fmt::Debug> fmt::Debug for Parameter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("selector", &self.selector)
            .field("multiplicity", &self.multiplicity)
            .field("has_converter", &self.converter.is_some())
            .field("has_default", &self.has_default())
            .field("locator", &self.locator)
            .finish()
    }
}

/// A named field of a schema: either a plain parameter or a combinator
/// deriving its value from other fields' success or failure.
#[derive(Debug)]
pub enum Field<S> {
    Param(Parameter<S>),
    /// First successful inner field wins, in declared order.
    Choice(Vec<Field<S>>),
    /// Exactly one inner field may succeed.
    Exclusive(Vec<Field<S>>),
    /// Flattens every successful inner field into one list.
    Concatenate {
        fields: Vec<Field<S>>,
        allow_errors: bool,
    },
}

impl<S: Selector> Field<S> {
    pub fn choice(fields: Vec<Field<S>>) -> Self {
        Field::Choice(fields)
    }

    pub fn exclusive(fields: Vec<Field<S>>) -> Self {
        Field::Exclusive(fields)
    }

    pub fn concatenate(fields: Vec<Field<S>>) -> Self {
        Field::Concatenate {
            fields,
            allow_errors: true,
        }
    }

    /// Concatenation where the first inner failure aborts evaluation.
    pub fn concatenate_strict(fields: Vec<Field<S>>) -> Self {
        Field::Concatenate {
            fields,
            allow_errors: false,
        }
    }

    /// Evaluates the field; `locator` names the schema field for combinator
    /// failures, which have no selector of their own.
    pub fn eval<Src>(&self, source: &Src, locator: &str) -> Result<Value, DecodeError>
    where
        Src: Source<Selector = S>,
    {
        match self {
            Field::Param(param) => param.eval(source),
            Field::Choice(fields) => {
                for field in fields {
                    if let Ok(value) = field.eval(source, locator) {
                        return Ok(value);
                    }
                }
                Err(DecodeError::NoChoiceResult {
                    locator: locator.to_string(),
                })
            }
            Field::Exclusive(fields) => {
                let mut result = None;
                let mut count = 0usize;
                for field in fields {
                    if let Ok(value) = field.eval(source, locator) {
                        result = Some(value);
                        count += 1;
                    }
                }
                match (count, result) {
                    (1, Some(value)) => Ok(value),
                    _ => Err(DecodeError::MutualExclusiveViolation {
                        locator: locator.to_string(),
                        count,
                    }),
                }
            }
            Field::Concatenate {
                fields,
                allow_errors,
            } => {
                let mut items = Vec::new();
                for field in fields {
                    match field.eval(source, locator) {
                        Ok(Value::List(inner)) => items.extend(inner),
                        Ok(value) => items.push(value),
                        Err(_) if *allow_errors => continue,
                        Err(err) => return Err(err),
                    }
                }
                Ok(Value::List(items))
            }
        }
    }

    fn validate(&self, name: &str) -> Result<(), SchemaError> {
        match self {
            Field::Param(param) => {
                if param.has_default() && !param.multiplicity.permits_zero() {
                    return Err(SchemaError::DefaultNotAllowed {
                        name: name.to_string(),
                    });
                }
                Ok(())
            }
            Field::Choice(fields) | Field::Exclusive(fields) => {
                fields.iter().try_for_each(|field| field.validate(name))
            }
            Field::Concatenate { fields, .. } => {
                fields.iter().try_for_each(|field| field.validate(name))
            }
        }
    }
}

impl<S: Selector> From<Parameter<S>> for Field<S> {
    fn from(param: Parameter<S>) -> Self {
        Field::Param(param)
    }
}

/// Remapping hook applied to the decoded map before object construction.
pub type Remap = fn(Params) -> Params;

/// An ordered, uniquely-named set of fields plus an optional remap hook.
#[derive(Debug)]
pub struct Schema<S> {
    fields: Vec<(String, Field<S>)>,
    remap: Option<Remap>,
}

impl<S: Selector> Schema<S> {
    /// Validates field names and default/multiplicity compatibility.
    pub fn new<N: Into<String>>(fields: Vec<(N, Field<S>)>) -> Result<Self, SchemaError> {
        let fields: Vec<(String, Field<S>)> = fields
            .into_iter()
            .map(|(name, field)| (name.into(), field))
            .collect();

        let mut seen = HashSet::new();
        for (name, field) in &fields {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateField(name.clone()));
            }
            field.validate(name)?;
        }
        Ok(Self {
            fields,
            remap: None,
        })
    }

    pub fn with_remap(mut self, remap: Remap) -> Self {
        self.remap = Some(remap);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field<S>)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }
}

/// Constructs the target object from a fully decoded parameter map.
pub trait FromParams: Sized {
    fn from_params(params: Params) -> Result<Self, SchemaError>;
}

/// Binds a schema to one input instance.
pub struct Decoder<'a, Src: Source> {
    schema: &'a Schema<Src::Selector>,
    source: Src,
}

impl<'a, Src: Source> Decoder<'a, Src> {
    pub fn new(schema: &'a Schema<Src::Selector>, source: Src) -> Self {
        Self { schema, source }
    }

    /// Evaluates every declared field into a name → value map.
    ///
    /// All-or-nothing: the first failing field aborts the call and its error
    /// is the call's only outcome.
    pub fn decode(&self) -> Result<Params, DecodeError> {
        debug!(fields = self.schema.fields.len(), "decoding request");
        let mut params = Params::new();
        for (name, field) in &self.schema.fields {
            trace!(field = name.as_str(), "evaluating field");
            params.insert(name.clone(), field.eval(&self.source, name)?);
        }
        Ok(match self.schema.remap {
            Some(remap) => remap(params),
            None => params,
        })
    }

    /// Decodes and constructs the target object.
    pub fn decode_into<T: FromParams>(&self) -> Result<T, Error> {
        let params = self.decode()?;
        Ok(T::from_params(params)?)
    }
}
