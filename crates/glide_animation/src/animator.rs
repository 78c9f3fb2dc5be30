//! The animation-engine abstraction consumed by the relocator

use std::time::Duration;

use glide_dom::{Document, DomError, NodeId};
use indexmap::IndexMap;
use slotmap::new_key_type;

use crate::easing::Easing;

new_key_type! {
    /// Handle to a running animation
    pub struct AnimationId;
}

/// Target values keyed by CSS property, in insertion order
pub type StyleMap = IndexMap<String, f32>;

/// Callback run once an animation has reached its targets
///
/// It receives the document and the animator so it can mutate the tree and
/// start or finish further animations.
pub type Completion<D, A> = Box<dyn FnOnce(&mut D, &mut A)>;

/// Duration and easing of an animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(400),
            easing: Easing::Swing,
        }
    }
}

impl Timing {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Easing::Linear)
    }
}

/// Interpolates numeric style properties of document nodes over time
///
/// Contract:
/// - start values are sampled when `animate` is called
/// - `on_complete` fires exactly once, never from inside `animate`, after
///   every property has been written with its target value
/// - `finish` writes target values immediately and fires the pending
///   completions of that node's animations
pub trait Animator<D: Document>: Sized {
    fn animate(
        &mut self,
        doc: &mut D,
        node: NodeId,
        targets: StyleMap,
        timing: Timing,
        on_complete: Option<Completion<D, Self>>,
    ) -> Result<AnimationId, DomError>;

    /// Jump every animation on `node` to its end state
    fn finish(&mut self, doc: &mut D, node: NodeId);

    fn is_animating(&self, node: NodeId) -> bool;
}
