//! Destination regions.
//!
//! A [`Region`] is one capacity-bearing destination container. Its size is
//! reactive (two signals, fed by whatever resize notification the host
//! provides); its content is deliberately plain state, so a rebuild can
//! rewrite it without re-triggering itself. Observing size on destinations
//! and content on the source is what breaks the reflow feedback loop.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

// =============================================================================
// Shell
// =============================================================================

/// A placed structural clone: one source element's tag and attributes plus
/// the contiguous run of words assigned to this region.
///
/// Every word keeps a single trailing space, except the last word of its
/// source element. Concatenating one element's shells across regions in
/// region order reproduces the whitespace-normalized source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
}

impl Shell {
    pub(crate) fn new(tag: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            tag,
            attributes,
            text: String::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// The words placed in this shell, separators included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn append(&mut self, word: &str, separator: &str) {
        self.text.push_str(word);
        self.text.push_str(separator);
    }

    /// Drop exactly `len` bytes from the tail. Used to back a word out after
    /// a failed overflow test; `len` is always the length of the substring
    /// that was just appended.
    pub(crate) fn truncate_tail(&mut self, len: usize) {
        let keep = self.text.len().saturating_sub(len);
        self.text.truncate(keep);
    }
}

// =============================================================================
// Region
// =============================================================================

/// One destination container.
///
/// `Clone` clones the handle: clones share the size signals and the content,
/// so the handle held by a binding and the handle held by the caller always
/// agree.
#[derive(Clone)]
pub struct Region {
    width: Signal<u16>,
    height: Signal<u16>,
    content: Rc<RefCell<Vec<Shell>>>,
}

impl Region {
    /// Create a region with an initial size in cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: signal(width),
            height: signal(height),
            content: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Report a new available size. This is the size-change feed: any
    /// binding observing this region re-flows.
    pub fn set_size(&self, width: u16, height: u16) {
        self.width.set(width);
        self.height.set(height);
    }

    /// Available width in cells (tracked read).
    pub fn width(&self) -> u16 {
        self.width.get()
    }

    /// Available height in cells (tracked read).
    pub fn height(&self) -> u16 {
        self.height.get()
    }

    /// Snapshot of the shells currently placed in this region.
    pub fn shells(&self) -> Vec<Shell> {
        self.content.borrow().clone()
    }

    /// All placed text runs concatenated, in placement order.
    pub fn text(&self) -> String {
        self.content
            .borrow()
            .iter()
            .map(Shell::text)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.content.borrow().is_empty()
    }

    pub(crate) fn clear(&self) {
        self.content.borrow_mut().clear();
    }

    pub(crate) fn push_shell(&self, shell: Shell) {
        self.content.borrow_mut().push(shell);
    }

    pub(crate) fn pop_shell(&self) {
        self.content.borrow_mut().pop();
    }

    pub(crate) fn append_to_last_shell(&self, word: &str, separator: &str) {
        if let Some(shell) = self.content.borrow_mut().last_mut() {
            shell.append(word, separator);
        }
    }

    pub(crate) fn truncate_last_shell(&self, len: usize) {
        if let Some(shell) = self.content.borrow_mut().last_mut() {
            shell.truncate_tail(len);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
