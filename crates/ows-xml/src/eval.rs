//! Path evaluation against a parsed document.

use roxmltree::Node;

use crate::path::{ElementStep, NameTest, Path, Terminal};

/// Walks the element steps from `root`, then produces the raw string values
/// of the terminal step. Absence at any step yields an empty vector.
pub(crate) fn evaluate<'a, 'input>(path: &Path, root: Node<'a, 'input>) -> Vec<String> {
    let mut nodes = vec![root];
    for step in &path.elements {
        let mut next = Vec::new();
        for node in &nodes {
            for child in node.children().filter(Node::is_element) {
                if element_matches(&child, step) {
                    next.push(child);
                }
            }
        }
        nodes = next;
    }

    match &path.terminal {
        // a path ending on an element step contributes each element's text
        None => nodes.iter().map(element_text).collect(),
        Some(Terminal::Text) => nodes
            .iter()
            .flat_map(|node| {
                node.children()
                    .filter(|child| child.is_text())
                    .filter_map(|child| child.text())
                    .map(str::to_string)
            })
            .collect(),
        Some(Terminal::LocalName) => nodes
            .iter()
            .map(|node| node.tag_name().name().to_string())
            .collect(),
        Some(Terminal::Attribute { namespace, name }) => nodes
            .iter()
            .filter_map(|node| match namespace {
                Some(uri) => node.attribute((uri.as_str(), name.as_str())),
                None => node.attribute(name.as_str()),
            })
            .map(str::to_string)
            .collect(),
    }
}

fn element_matches(node: &Node, step: &ElementStep) -> bool {
    if let Some(local) = &step.local_name_is {
        if node.tag_name().name() != local {
            return false;
        }
    }
    let tag = node.tag_name();
    match (&step.namespace, &step.name) {
        // an unqualified wildcard matches any element in any namespace
        (None, NameTest::Any) => true,
        (Some(uri), NameTest::Any) => tag.namespace() == Some(uri.as_str()),
        (None, NameTest::Named(name)) => tag.namespace().is_none() && tag.name() == name,
        (Some(uri), NameTest::Named(name)) => {
            tag.namespace() == Some(uri.as_str()) && tag.name() == name
        }
    }
}

fn element_text(node: &Node) -> String {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}
