//! Source content model.
//!
//! A [`SourceTree`] holds the ordered top-level nodes whose content is
//! distributed across regions. The tree is shared by handle (`Clone` clones
//! the handle, not the nodes) and carries a revision signal: every structural
//! or character-data mutation bumps it, so a reactive effect that reads
//! [`SourceTree::revision`] re-runs on any edit, including text edits inside
//! element children.
//!
//! The flow engine only ever reads the tree.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::region::Shell;

// =============================================================================
// Nodes
// =============================================================================

/// One top-level child of the source container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceNode {
    /// Character-data leaf.
    Text(String),
    /// Element whose meaningful content is flattened text.
    Element(ElementNode),
}

/// An element child: tag identity, attributes, and flattened text content.
///
/// Nested markup is out of scope; an element is exactly what can be split
/// across regions at word boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
}

impl ElementNode {
    /// Create an element with a tag and its flattened text content.
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: text.into(),
        }
    }

    /// Add an attribute (builder style).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Structural clone: tag and attributes, no content.
    ///
    /// This is the shell the engine appends to a region before filling it
    /// word by word.
    pub fn shell(&self) -> Shell {
        Shell::new(self.tag.clone(), self.attributes.clone())
    }
}

// =============================================================================
// Source tree
// =============================================================================

/// The single source container whose children are flowed into regions.
///
/// Mutators bump an internal revision signal. Reading [`SourceTree::revision`]
/// inside an effect subscribes that effect to every mutation, which is how
/// content edits trigger a re-flow (see [`crate::pipeline::bind`]).
#[derive(Clone)]
pub struct SourceTree {
    children: Rc<RefCell<Vec<SourceNode>>>,
    revision: Signal<u64>,
    next_revision: Rc<Cell<u64>>,
}

impl SourceTree {
    pub fn new() -> Self {
        Self {
            children: Rc::new(RefCell::new(Vec::new())),
            revision: signal(0u64),
            next_revision: Rc::new(Cell::new(0)),
        }
    }

    /// Append a character-data leaf.
    pub fn push_text(&self, text: impl Into<String>) {
        self.children.borrow_mut().push(SourceNode::Text(text.into()));
        self.touch();
    }

    /// Append an element child.
    pub fn push_element(&self, element: ElementNode) {
        self.children
            .borrow_mut()
            .push(SourceNode::Element(element));
        self.touch();
    }

    /// Remove the child at `index`. Out-of-range indices are ignored.
    pub fn remove_child(&self, index: usize) {
        let mut children = self.children.borrow_mut();
        if index < children.len() {
            children.remove(index);
            drop(children);
            self.touch();
        }
    }

    /// Replace the text content of the element child at `index`.
    ///
    /// This is the character-data edit feed: it counts as a mutation even
    /// though the tree structure is unchanged. Ignored if `index` is out of
    /// range or the child is not an element.
    pub fn set_element_text(&self, index: usize, text: impl Into<String>) {
        let mut children = self.children.borrow_mut();
        if let Some(SourceNode::Element(element)) = children.get_mut(index) {
            element.text = text.into();
            drop(children);
            self.touch();
        }
    }

    /// Replace the character data of the text leaf at `index`.
    ///
    /// Ignored if `index` is out of range or the child is not a text leaf.
    pub fn set_text(&self, index: usize, text: impl Into<String>) {
        let mut children = self.children.borrow_mut();
        if let Some(SourceNode::Text(content)) = children.get_mut(index) {
            *content = text.into();
            drop(children);
            self.touch();
        }
    }

    /// Remove all children.
    pub fn clear(&self) {
        self.children.borrow_mut().clear();
        self.touch();
    }

    /// Snapshot of the children, in document order.
    pub fn children(&self) -> Vec<SourceNode> {
        self.children.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }

    /// Current revision. Reading this inside an effect creates a reactive
    /// dependency on all future mutations.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    fn touch(&self) {
        let next = self.next_revision.get() + 1;
        self.next_revision.set(next);
        self.revision.set(next);
    }
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
