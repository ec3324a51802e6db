//! The path-expression language addressing raw values inside a document.
//!
//! A path is a `/`-separated chain of child element steps, optionally ending
//! in a value-producing step:
//!
//! ```text
//! wcs:CoverageId/text()
//! @service
//! local-name()
//! *[local-name()='AcceptVersions']/*[local-name()='Version']/text()
//! wcs:Extension/scal:ScaleByFactor/scal:scaleFactor/text()
//! ```
//!
//! Expressions are compiled and namespace-resolved once, at schema
//! construction; a bad expression or unknown prefix is a schema bug surfaced
//! before any request is decoded.

use ows_core::{SchemaError, Selector};
use thiserror::Error;

use crate::namespace::NamespaceMap;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path expression")]
    Empty,
    #[error("empty step in '{0}'")]
    EmptyStep(String),
    #[error("unknown namespace prefix '{prefix}' in '{expr}'")]
    UnknownPrefix { expr: String, prefix: String },
    #[error("'{step}' must be the final step of '{expr}'")]
    NotFinal { expr: String, step: String },
    #[error("malformed step '{step}' in '{expr}'")]
    MalformedStep { expr: String, step: String },
}

impl From<PathError> for SchemaError {
    fn from(err: PathError) -> Self {
        let expr = match &err {
            PathError::Empty => String::new(),
            PathError::EmptyStep(expr)
            | PathError::UnknownPrefix { expr, .. }
            | PathError::NotFinal { expr, .. }
            | PathError::MalformedStep { expr, .. } => expr.clone(),
        };
        SchemaError::InvalidPath {
            expr,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NameTest {
    Any,
    Named(String),
}

/// One child element step, with the namespace prefix already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ElementStep {
    pub namespace: Option<String>,
    pub name: NameTest,
    /// `[local-name()='X']` predicate, if any.
    pub local_name_is: Option<String>,
}

/// Final value-producing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Terminal {
    Attribute {
        namespace: Option<String>,
        name: String,
    },
    Text,
    LocalName,
}

/// A compiled path expression, reusable across decode calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    expr: String,
    pub(crate) elements: Vec<ElementStep>,
    pub(crate) terminal: Option<Terminal>,
}

impl Path {
    pub fn new(expr: &str, namespaces: &NamespaceMap) -> Result<Self, PathError> {
        if expr.is_empty() {
            return Err(PathError::Empty);
        }

        let steps: Vec<&str> = expr.split('/').collect();
        let mut elements = Vec::new();
        let mut terminal = None;

        for (index, step) in steps.iter().enumerate() {
            let last = index + 1 == steps.len();
            if step.is_empty() {
                return Err(PathError::EmptyStep(expr.to_string()));
            }

            if *step == "text()" || *step == "local-name()" || step.starts_with('@') {
                if !last {
                    return Err(PathError::NotFinal {
                        expr: expr.to_string(),
                        step: step.to_string(),
                    });
                }
                terminal = Some(parse_terminal(step, expr, namespaces)?);
            } else {
                elements.push(parse_element(step, expr, namespaces)?);
            }
        }

        Ok(Self {
            expr: expr.to_string(),
            elements,
            terminal,
        })
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }
}

impl Selector for Path {
    fn locator(&self) -> String {
        self.expr.clone()
    }
}

fn parse_terminal(
    step: &str,
    expr: &str,
    namespaces: &NamespaceMap,
) -> Result<Terminal, PathError> {
    match step {
        "text()" => Ok(Terminal::Text),
        "local-name()" => Ok(Terminal::LocalName),
        _ => {
            // attribute step
            let qname = &step[1..];
            let (namespace, name) = resolve_qname(qname, step, expr, namespaces)?;
            match name {
                NameTest::Named(name) => Ok(Terminal::Attribute { namespace, name }),
                NameTest::Any => Err(PathError::MalformedStep {
                    expr: expr.to_string(),
                    step: step.to_string(),
                }),
            }
        }
    }
}

fn parse_element(
    step: &str,
    expr: &str,
    namespaces: &NamespaceMap,
) -> Result<ElementStep, PathError> {
    let (name_part, local_name_is) = match step.find('[') {
        None => (step, None),
        Some(at) => {
            let predicate = parse_predicate(&step[at..], step, expr)?;
            (&step[..at], Some(predicate))
        }
    };
    let (namespace, name) = resolve_qname(name_part, step, expr, namespaces)?;
    Ok(ElementStep {
        namespace,
        name,
        local_name_is,
    })
}

fn parse_predicate(predicate: &str, step: &str, expr: &str) -> Result<String, PathError> {
    let malformed = || PathError::MalformedStep {
        expr: expr.to_string(),
        step: step.to_string(),
    };
    let inner = predicate
        .strip_prefix("[local-name()=")
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;
    let name = inner
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .ok_or_else(malformed)?;
    if !is_valid_name(name) {
        return Err(malformed());
    }
    Ok(name.to_string())
}

fn resolve_qname(
    qname: &str,
    step: &str,
    expr: &str,
    namespaces: &NamespaceMap,
) -> Result<(Option<String>, NameTest), PathError> {
    let (prefix, name) = match qname.split_once(':') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, qname),
    };

    let namespace = match prefix {
        None => None,
        Some(prefix) => Some(
            namespaces
                .resolve(prefix)
                .ok_or_else(|| PathError::UnknownPrefix {
                    expr: expr.to_string(),
                    prefix: prefix.to_string(),
                })?
                .to_string(),
        ),
    };

    let name = match name {
        "*" => NameTest::Any,
        name if is_valid_name(name) => NameTest::Named(name.to_string()),
        _ => {
            return Err(PathError::MalformedStep {
                expr: expr.to_string(),
                step: step.to_string(),
            })
        }
    };
    Ok((namespace, name))
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
