//! Glide Relocator
//!
//! Moves an element from one place in a document to another while animating
//! the transition, so the move reads as continuous motion instead of a jump
//! through a reflowed layout.
//!
//! # How It Works
//!
//! 1. The request is validated: unknown mode or position names fall back to
//!    defaults with a warning, missing source or target elements abort
//! 2. The pre-move location is recorded so the move can be reversed later
//! 3. A placement strategy inserts invisible placeholders (clones) that hold
//!    layout space, relocates the element and starts a transition
//! 4. When the transition completes, placeholders are dropped, the element's
//!    transition styles are reverted and the caller's callback runs
//!
//! # Strategies
//!
//! - [`Position::RelativeToTarget`]: the element moves first and slides in
//!   from its old screen position. Smooth finish.
//! - [`Position::RelativeToSource`]: the element slides out of its slot and
//!   only moves at the end. Smooth start.
//! - [`Position::Absolute`]: the element floats in the top-level container
//!   while its old slot shrinks and its new slot grows.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use glide_animation::TweenScheduler;
//! use glide_dom::{div, Document, Tree};
//! use glide_relocate::{Mode, RelocationRequest, Relocator};
//!
//! let mut tree = Tree::new(320.0).unwrap();
//! let body = tree.container();
//! let list = tree.build(body, div().id("list")).unwrap();
//! let cart = tree.build(body, div().id("cart")).unwrap();
//! let item = tree.build(list, div().height(24.0)).unwrap();
//!
//! let mut tweens = TweenScheduler::new();
//! let relocator = Relocator::default();
//! relocator
//!     .relocate(&mut tree, &mut tweens, item, RelocationRequest::new("#cart").mode(Mode::AppendTo))
//!     .unwrap();
//! tweens.run_until_idle(&mut tree, Duration::from_millis(16));
//! assert_eq!(tree.parent(item), Some(cart));
//!
//! relocator.relocate_back(&mut tree, &mut tweens, item).unwrap();
//! tweens.run_until_idle(&mut tree, Duration::from_millis(16));
//! assert_eq!(tree.parent(item), Some(list));
//! ```

mod config;
mod error;
mod relocator;
mod request;
mod reversal;
mod state;
mod strategy;
mod validate;

#[cfg(test)]
mod tests;

pub use config::{OverlapPolicy, RelocatorConfig};
pub use error::{Diagnostic, RelocateError, Result};
pub use relocator::{Dispatch, Relocator};
pub use request::{Mode, OnComplete, Position, RelocationRequest, Requested, Target};
pub use reversal::ReversalPlan;
pub use state::{LastRelocation, Outcome, RelocationState, SavedStyles};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{OverlapPolicy, RelocatorConfig};
    pub use crate::error::{RelocateError, Result};
    pub use crate::relocator::{Dispatch, Relocator};
    pub use crate::request::{Mode, Position, RelocationRequest, Target};
}
