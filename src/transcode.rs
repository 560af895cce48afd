//! Canonical tree construction from a validated document.
//!
//! Rules:
//! - an element without attributes or child elements becomes a scalar of its
//!   trimmed text (empty string when there is none);
//! - any other element becomes an object holding its attributes, then its
//!   child elements and text chunks in document order;
//! - a name seen twice within one element folds into an array under the
//!   first occurrence's key;
//! - text beside attributes or child elements is stored under [`CONTENT_KEY`].
//!
//! The walk uses an explicit stack, so nesting depth is bounded by memory and
//! not by the call stack.

use crate::types::CanonicalNode;
use crate::validate::ValidDocument;
use roxmltree::{Children, Node};
use std::collections::HashMap;

/// Key for text that sits beside attributes or child elements.
pub const CONTENT_KEY: &str = "content";

/// Converts a validated document into its canonical tree.
///
/// The result is an object with a single entry named after the root element.
/// Total over every document accepted by [`crate::validate::XmlValidator`].
pub fn transcode(doc: &ValidDocument<'_>) -> CanonicalNode {
    let mut document = ObjectBuilder::default();
    let mut stack: Vec<Frame<'_, '_>> = Vec::new();

    let root = doc.document().root_element();
    if is_leaf(root) {
        document.insert(local_name(root), CanonicalNode::Scalar(text_content(root)));
    } else {
        stack.push(Frame::open(root));
    }

    while let Some(top) = stack.last_mut() {
        match top.next_element() {
            Some(child) if is_leaf(child) => {
                top.object
                    .insert(local_name(child), CanonicalNode::Scalar(text_content(child)));
            }
            Some(child) => stack.push(Frame::open(child)),
            None => {
                let Some(frame) = stack.pop() else { break };
                let (name, value) = frame.close();
                match stack.last_mut() {
                    Some(parent) => parent.object.insert(name, value),
                    None => document.insert(name, value),
                }
            }
        }
    }

    document.finish()
}

/// An element whose object form is under construction.
struct Frame<'a, 'input> {
    node: Node<'a, 'input>,
    children: Children<'a, 'input>,
    object: ObjectBuilder,
}

impl<'a, 'input> Frame<'a, 'input> {
    fn open(node: Node<'a, 'input>) -> Self {
        let mut object = ObjectBuilder::default();
        for attr in node.attributes() {
            object.insert(attr.name(), CanonicalNode::Scalar(attr.value().to_string()));
        }
        Frame {
            node,
            children: node.children(),
            object,
        }
    }

    /// Advances to the next child element, recording text chunks on the way.
    fn next_element(&mut self) -> Option<Node<'a, 'input>> {
        for child in self.children.by_ref() {
            if child.is_element() {
                return Some(child);
            }
            if child.is_text() {
                let text = child.text().unwrap_or_default().trim();
                if !text.is_empty() {
                    self.object
                        .insert(CONTENT_KEY, CanonicalNode::Scalar(text.to_string()));
                }
            }
        }
        None
    }

    fn close(self) -> (&'a str, CanonicalNode) {
        (local_name(self.node), self.object.finish())
    }
}

/// Ordered name → node mapping that folds repeated names into arrays.
#[derive(Default)]
struct ObjectBuilder {
    entries: Vec<(String, CanonicalNode)>,
    index: HashMap<String, usize>,
}

impl ObjectBuilder {
    fn insert(&mut self, name: &str, value: CanonicalNode) {
        match self.index.get(name) {
            Some(&i) => {
                let slot = &mut self.entries[i].1;
                match slot {
                    CanonicalNode::Array(items) => items.push(value),
                    _ => {
                        let first = std::mem::replace(slot, CanonicalNode::Array(Vec::new()));
                        *slot = CanonicalNode::Array(vec![first, value]);
                    }
                }
            }
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), value));
            }
        }
    }

    fn finish(self) -> CanonicalNode {
        CanonicalNode::Object(self.entries)
    }
}

fn local_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

fn is_leaf(node: Node<'_, '_>) -> bool {
    node.attributes().next().is_none() && !node.children().any(|c| c.is_element())
}

fn text_content(node: Node<'_, '_>) -> String {
    let mut text = String::new();
    for child in node.children().filter(|c| c.is_text()) {
        text.push_str(child.text().unwrap_or_default());
    }
    text.trim().to_string()
}
