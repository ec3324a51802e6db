//! XML input instances a schema can be decoded against.

use ows_core::Source;
use roxmltree::{Document, Node};
use thiserror::Error;

use crate::eval;
use crate::path::Path;

/// The client sent something that is not well-formed XML. Surfaced before
/// any decoding happens; the protocol layer formats the report.
#[derive(Debug, Error)]
#[error("malformed XML document: {0}")]
pub struct XmlParseError(#[from] roxmltree::Error);

/// Either an owned parsed document or a borrowed node of one.
///
/// Path evaluation is rooted at the document element (respectively the given
/// node), matching how request documents put the operation at the root.
pub enum XmlInput<'a, 'input: 'a> {
    Document(Document<'input>),
    Node(Node<'a, 'input>),
}

impl<'a, 'input: 'a> XmlInput<'a, 'input> {
    pub fn parse(text: &'input str) -> Result<Self, XmlParseError> {
        Ok(XmlInput::Document(Document::parse(text)?))
    }

    pub fn from_node(node: Node<'a, 'input>) -> Self {
        XmlInput::Node(node)
    }

    pub fn root(&self) -> Node<'_, 'input> {
        match self {
            XmlInput::Document(document) => document.root_element(),
            XmlInput::Node(node) => *node,
        }
    }
}

impl Source for XmlInput<'_, '_> {
    type Selector = Path;

    fn select(&self, selector: &Path) -> Vec<String> {
        eval::evaluate(selector, self.root())
    }
}
