//! Binding lifecycle and the reflow trigger.
//!
//! [`bind`] validates the configuration, then sets up the ONE rebuild effect:
//! it reads the source revision and every region's size (tracked reads), then
//! runs [`engine::rebuild`]. The effect runs eagerly once (the initial flow)
//! and re-runs synchronously on every source edit or region resize. No
//! debouncing: each signal causes one full rebuild.
//!
//! The returned [`FlowBinding`] is the only public surface after
//! construction; destroying it detaches observation and nothing else.

use std::rc::Rc;

use spark_signals::effect;
use thiserror::Error;

use crate::content::SourceTree;
use crate::engine::{self, OverflowOracle};
use crate::region::Region;

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors surfaced at bind time.
///
/// When bind fails, nothing attaches: no observation, no initial flow, and
/// the regions are left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("no destination regions supplied")]
    NoRegions,
    #[error("source tree has no children")]
    EmptySource,
}

// =============================================================================
// Binding handle
// =============================================================================

/// Handle returned by [`bind`] that keeps the reflow trigger alive.
///
/// Dropping the handle stops the rebuild effect, so hold on to it for as
/// long as automatic re-flow should keep running.
pub struct FlowBinding {
    stop_effect: Option<Box<dyn FnOnce()>>,
}

impl FlowBinding {
    /// Detach both kinds of observation (source content, region sizes).
    ///
    /// No further automatic rebuilds occur. The last rendered assignment is
    /// left in the regions untouched.
    pub fn destroy(mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

impl std::fmt::Debug for FlowBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowBinding").finish_non_exhaustive()
    }
}

impl Drop for FlowBinding {
    fn drop(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

// =============================================================================
// Bind
// =============================================================================

/// Bind a source tree to an ordered list of destination regions.
///
/// Runs the flow once immediately, then again on every source mutation and
/// every region resize, always as a full rebuild from the unmodified source
/// into cleared regions.
///
/// # Arguments
///
/// * `source` - The source container; its children are the content to flow
/// * `regions` - Destinations, in the order they receive overflow
/// * `oracle` - The fullness predicate consulted after each placement
///
/// # Errors
///
/// An empty region list or an empty source tree is a configuration error:
/// it is logged, the error is returned, and the would-be binding is inert.
///
/// # Example
///
/// ```ignore
/// use std::rc::Rc;
/// use regionflow::{bind, BoxMeasure, ElementNode, Region, SourceTree};
///
/// let source = SourceTree::new();
/// source.push_element(ElementNode::new("p", "alpha beta gamma delta"));
///
/// let regions = vec![Region::new(11, 1), Region::new(11, 1)];
/// let binding = bind(source.clone(), regions.clone(), Rc::new(BoxMeasure))?;
///
/// // Edits and resizes re-flow automatically until:
/// binding.destroy();
/// ```
pub fn bind(
    source: SourceTree,
    regions: Vec<Region>,
    oracle: Rc<dyn OverflowOracle>,
) -> Result<FlowBinding, BindError> {
    if regions.is_empty() {
        log::error!("regionflow: no destination regions supplied; binding is inert");
        return Err(BindError::NoRegions);
    }
    if source.is_empty() {
        log::error!("regionflow: source tree has no children; binding is inert");
        return Err(BindError::EmptySource);
    }

    let stop = effect(move || {
        // Tracked reads first: subscribe to every source edit and every
        // region resize, whether or not the oracle reads sizes itself.
        let _ = source.revision();
        for region in &regions {
            let _ = region.width();
            let _ = region.height();
        }

        engine::rebuild(&source, &regions, oracle.as_ref());
    });

    Ok(FlowBinding {
        stop_effect: Some(Box::new(stop)),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ElementNode;

    /// Unit-cost oracle: each shell and each placed word costs one line
    /// against the region's height.
    struct UnitCost;

    impl OverflowOracle for UnitCost {
        fn overflowing(&self, region: &Region) -> bool {
            let cost: usize = region
                .shells()
                .iter()
                .map(|shell| 1 + shell.text().split_whitespace().count())
                .sum();
            cost > region.height() as usize
        }
    }

    fn source_with(text: &str) -> SourceTree {
        let tree = SourceTree::new();
        tree.push_element(ElementNode::new("p", text));
        tree
    }

    #[test]
    fn test_bind_rejects_empty_regions() {
        let source = source_with("content");
        let err = bind(source, Vec::new(), Rc::new(UnitCost)).unwrap_err();
        assert_eq!(err, BindError::NoRegions);
    }

    #[test]
    fn test_bind_rejects_empty_source() {
        let regions = vec![Region::new(80, 10)];
        let err = bind(SourceTree::new(), regions.clone(), Rc::new(UnitCost)).unwrap_err();
        assert_eq!(err, BindError::EmptySource);
        // Configuration errors leave destinations untouched.
        assert!(regions[0].is_empty());
    }

    #[test]
    fn test_bind_flows_immediately() {
        let source = source_with("alpha beta");
        let regions = vec![Region::new(80, 10)];

        let _binding = bind(source, regions.clone(), Rc::new(UnitCost)).unwrap();
        assert_eq!(regions[0].text(), "alpha beta");
    }

    #[test]
    fn test_resize_triggers_reflow() {
        let source = source_with("alpha beta gamma delta");
        let regions = vec![Region::new(80, 3), Region::new(80, 10)];

        let _binding = bind(source, regions.clone(), Rc::new(UnitCost)).unwrap();
        assert_eq!(regions[0].text(), "alpha beta ");
        assert_eq!(regions[1].text(), "gamma delta");

        // Grow the first region: everything now fits there.
        regions[0].set_size(80, 10);
        assert_eq!(regions[0].text(), "alpha beta gamma delta");
        assert!(regions[1].is_empty());
    }

    #[test]
    fn test_source_edit_triggers_reflow() {
        let source = source_with("before");
        let regions = vec![Region::new(80, 10)];

        let _binding = bind(source.clone(), regions.clone(), Rc::new(UnitCost)).unwrap();
        assert_eq!(regions[0].text(), "before");

        source.set_element_text(0, "after edit");
        assert_eq!(regions[0].text(), "after edit");

        source.push_element(ElementNode::new("p", "appended"));
        assert_eq!(regions[0].text(), "after editappended");
    }

    #[test]
    fn test_destroy_detaches_observation() {
        let source = source_with("alpha beta gamma delta");
        let regions = vec![Region::new(80, 3), Region::new(80, 10)];

        let binding = bind(source.clone(), regions.clone(), Rc::new(UnitCost)).unwrap();
        binding.destroy();

        let before: Vec<String> = regions.iter().map(Region::text).collect();

        // Neither kind of trigger reaches the engine any more.
        regions[0].set_size(80, 10);
        source.set_element_text(0, "completely different");
        source.push_element(ElementNode::new("p", "more"));

        let after: Vec<String> = regions.iter().map(Region::text).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_drop_also_detaches() {
        let source = source_with("alpha");
        let regions = vec![Region::new(80, 10)];

        {
            let _binding = bind(source.clone(), regions.clone(), Rc::new(UnitCost)).unwrap();
        }

        source.set_element_text(0, "changed");
        assert_eq!(regions[0].text(), "alpha");
    }
}
