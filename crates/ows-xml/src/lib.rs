//! XML backend: namespace-qualified path selection over parsed documents.

mod eval;
mod input;
mod namespace;
mod path;

pub use input::{XmlInput, XmlParseError};
pub use namespace::{Namespace, NamespaceMap};
pub use path::{Path, PathError};

use ows_core::Parameter;

/// A field descriptor selecting the given path expression, compiled against
/// `namespaces` up front.
pub fn param(expr: &str, namespaces: &NamespaceMap) -> Result<Parameter<Path>, PathError> {
    Ok(Parameter::new(Path::new(expr, namespaces)?))
}
