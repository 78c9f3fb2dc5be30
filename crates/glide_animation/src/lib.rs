//! Glide Animation Engine
//!
//! Time-based tweens of numeric inline style properties.
//!
//! # Features
//!
//! - **Easing**: jQuery-compatible `swing` plus the usual CSS curves
//! - **Style tweens**: any numeric property, length properties written in `px`
//! - **Exactly-once completion**: callbacks run after the properties reach
//!   their targets, on a later tick than the one that started them
//! - **Forced completion**: `finish` jumps a node's tweens to their end state
//! - **Animator**: the trait relocation code is written against
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use glide_animation::{Animator, Easing, StyleMap, Timing, TweenScheduler};
//! use glide_dom::{div, Document, Tree};
//!
//! let mut tree = Tree::new(300.0).unwrap();
//! let body = tree.container();
//! let card = tree.build(body, div().height(40.0)).unwrap();
//!
//! let mut tweens = TweenScheduler::new();
//! let mut targets = StyleMap::new();
//! targets.insert("opacity".into(), 0.0);
//! tweens
//!     .animate(&mut tree, card, targets, Timing::new(Duration::from_millis(100), Easing::Linear), None)
//!     .unwrap();
//!
//! tweens.tick(&mut tree, Duration::from_millis(50));
//! assert_eq!(tree.style(card, "opacity").as_deref(), Some("0.5"));
//! ```

pub mod animator;
pub mod easing;
pub mod scheduler;

pub use animator::{AnimationId, Animator, Completion, StyleMap, Timing};
pub use easing::Easing;
pub use scheduler::TweenScheduler;
