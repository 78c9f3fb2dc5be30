//! Capturing an element's location so a relocation can be undone

use glide_dom::{Document, NodeId};

use crate::request::Mode;

/// Insertion that puts an element back where it was captured
///
/// The anchor is a live node, so the plan follows it if the anchor itself
/// moves later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReversalPlan {
    pub mode: Mode,
    pub target: NodeId,
}

impl ReversalPlan {
    /// Describe the element's current slot. `None` if it has no parent.
    ///
    /// - last child: append to the parent
    /// - first of several: prepend to the parent
    /// - otherwise: insert after the previous sibling
    pub fn capture<D: Document>(doc: &D, node: NodeId) -> Option<Self> {
        let parent = doc.parent(node)?;
        let plan = match (doc.previous_sibling(node), doc.next_sibling(node)) {
            (_, None) => Self {
                mode: Mode::AppendTo,
                target: parent,
            },
            (None, Some(_)) => Self {
                mode: Mode::PrependTo,
                target: parent,
            },
            (Some(previous), Some(_)) => Self {
                mode: Mode::InsertAfter,
                target: previous,
            },
        };
        Some(plan)
    }
}
