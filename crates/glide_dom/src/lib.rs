//! Glide Document Model
//!
//! The layout-engine side of Glide. Relocation code never talks to a concrete
//! tree; it goes through the [`Document`] trait, which covers exactly what a
//! placeholder-based transition needs from a host DOM:
//!
//! - **Lookup**: resolve selectors, walk parents and siblings
//! - **Geometry**: document offsets and box sizes (forcing a reflow)
//! - **Mutation**: deep clone, the four insertion operations, replace, remove
//! - **Inline styles**: read and write single CSS properties
//!
//! [`Tree`] is the in-memory implementation. Inline styles are translated into
//! taffy styles so offsets come from a real flexbox layout pass.
//!
//! # Example
//!
//! ```rust
//! use glide_dom::{div, Document, Tree};
//!
//! let mut tree = Tree::new(400.0).unwrap();
//! let body = tree.container();
//! let list = tree.build(body, div().id("list")).unwrap();
//! let first = tree.build(list, div().height(20.0)).unwrap();
//! let second = tree.build(list, div().height(30.0)).unwrap();
//!
//! assert_eq!(tree.offset(first).unwrap().top, 0.0);
//! assert_eq!(tree.offset(second).unwrap().top, 20.0);
//! ```

mod document;
mod element;
mod error;
mod journal;
mod selector;
mod style;
mod tree;

pub use document::{Document, NodeId, Offset, Size};
pub use element::{div, ElementSpec};
pub use error::{DomError, Result};
pub use journal::Mutation;
pub use selector::Selector;
pub use style::{is_length_property, parse_px, InlineStyle};
pub use tree::Tree;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::document::{Document, NodeId, Offset, Size};
    pub use crate::element::{div, ElementSpec};
    pub use crate::error::{DomError, Result};
    pub use crate::tree::Tree;
}
