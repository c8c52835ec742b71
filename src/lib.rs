//! # regionflow
//!
//! Reactive multi-container content flow for Rust.
//!
//! Distributes the children of one source container across an ordered list
//! of destination regions, splitting element text at word boundaries so
//! that no region overflows, and re-flowing automatically whenever the
//! content or a region's size changes. Built on
//! [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! Capacity is opaque: the engine never measures, it asks an
//! [`OverflowOracle`] after each tentative placement and backs the last unit
//! out on overflow. One effect drives the whole thing:
//!
//! ```text
//! SourceTree edits ──┐
//!                    ├── rebuild effect → engine::rebuild → Region content
//! Region resizes  ───┘
//! ```
//!
//! Region content is deliberately non-reactive, so a rebuild never
//! re-triggers itself.
//!
//! ## Modules
//!
//! - [`content`] - Source tree: text leaves, elements, mutation feed
//! - [`region`] - Destination containers and placed shells
//! - [`engine`] - The flow algorithm and the oracle seam
//! - [`measure`] - Unicode cell measurement and the bundled [`BoxMeasure`] oracle
//! - [`pipeline`] - Binding lifecycle: [`bind`] / [`FlowBinding::destroy`]

pub mod content;
pub mod engine;
pub mod measure;
pub mod pipeline;
pub mod region;

// Re-export commonly used items
pub use content::{ElementNode, SourceNode, SourceTree};
pub use engine::{rebuild, OverflowOracle};
pub use measure::{block_height, grapheme_width, string_width, widest_word, BoxMeasure};
pub use pipeline::{bind, BindError, FlowBinding};
pub use region::{Region, Shell};
