//! Declarative decoding of OGC-style web service requests.
//!
//! The engine turns external request representations into strongly-typed
//! request objects: a [`Schema`] declares named fields (selector, converter,
//! multiplicity, default), a backend supplies raw string values per selector
//! through the [`Source`] trait, and a [`Decoder`] evaluates the schema
//! against one input instance, all-or-nothing. Backends live in sibling
//! crates (`ows-kvp` for query strings, `ows-xml` for documents).

pub mod convert;
pub mod decoder;
pub mod error;
pub mod value;
pub mod version;

pub use convert::Converter;
pub use decoder::{
    Decoder, DefaultFactory, Field, FromParams, Multiplicity, Parameter, Remap, Schema, Selector,
    Source,
};
pub use error::{ConvertError, DecodeError, Error, Expected, SchemaError};
pub use value::{Params, Value};
pub use version::{Version, VersionError};
