//! Flow engine.
//!
//! Greedy packing of source children (and their text, word by word) into an
//! ordered list of regions. Capacity is opaque: the engine never measures
//! anything itself, it only asks the [`OverflowOracle`] "does this region
//! overflow right now" after each tentative placement, and backs out exactly
//! the last placed unit when the answer is yes.
//!
//! Every call is a full rebuild: regions are cleared first, the region cursor
//! only moves forward, and nothing is carried over between calls.

use crate::content::{SourceNode, SourceTree};
use crate::region::Region;

/// Measured fullness predicate for a region.
///
/// `true` iff the region's rendered content exceeds its available box in
/// either axis. This is the only capacity information the engine gets; see
/// [`crate::measure::BoxMeasure`] for the bundled implementation.
pub trait OverflowOracle {
    fn overflowing(&self, region: &Region) -> bool;
}

/// Clear and repopulate `regions` from `source`.
///
/// Walks the source's top-level children in document order. Element children
/// are placed as empty structural clones and filled word by word under
/// append-then-test control; on overflow the last word is backed out and the
/// element continues in a fresh clone in the next region. Content that
/// remains once the last region is full is dropped silently.
///
/// Whitespace-only text leaves carry nothing and are skipped. Bare
/// non-whitespace text leaves at the top level are also never placed; only
/// element children participate in the flow. That is a deliberate scope
/// boundary, not an oversight.
///
/// A word wider than an empty region is still placed (word granularity is the
/// floor); that region will keep reporting overflow and the next placement
/// moves on.
pub fn rebuild(source: &SourceTree, regions: &[Region], oracle: &dyn OverflowOracle) {
    for region in regions {
        region.clear();
    }

    let mut region_index = 0usize;

    'children: for node in source.children() {
        if region_index >= regions.len() {
            break;
        }

        let element = match &node {
            SourceNode::Text(_) => continue,
            SourceNode::Element(element) => element,
        };

        let mut region = &regions[region_index];
        region.push_shell(element.shell());

        // An empty shell alone can overflow a region with no room left
        // (margins, earlier blocks). Restart the element in the next region.
        if oracle.overflowing(region) {
            region.pop_shell();
            region_index += 1;
            if region_index >= regions.len() {
                break;
            }
            region = &regions[region_index];
            region.push_shell(element.shell());
        }

        let words: Vec<&str> = element.text().split_whitespace().collect();
        for (i, word) in words.iter().enumerate() {
            let separator = if i + 1 < words.len() { " " } else { "" };
            region.append_to_last_shell(word, separator);

            if oracle.overflowing(region) {
                // Back out exactly what was appended, then carry the word
                // into a fresh clone in the next region.
                region.truncate_last_shell(word.len() + separator.len());
                region_index += 1;
                if region_index >= regions.len() {
                    // Remaining words of this element (and all later
                    // children) are dropped.
                    break 'children;
                }
                region = &regions[region_index];
                let mut shell = element.shell();
                shell.append(word, separator);
                region.push_shell(shell);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
