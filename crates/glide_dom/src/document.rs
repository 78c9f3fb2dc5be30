//! The document abstraction consumed by the relocator

use std::ops::{Add, Sub};

use slotmap::{new_key_type, Key};

use crate::error::Result;

new_key_type! {
    /// Handle to an element in a [`Document`]
    pub struct NodeId;
}

impl NodeId {
    /// Convert to a raw u64 representation
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Create from a raw u64 representation
    ///
    /// The raw value must have been created by `to_raw()`.
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Position of a box's top-left corner in document coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub top: f32,
    pub left: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { top: 0.0, left: 0.0 };

    pub fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.top - rhs.top, self.left - rhs.left)
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.top + rhs.top, self.left + rhs.left)
    }
}

/// Border-box size of an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Host document operations needed to relocate elements
///
/// Structural operations follow DOM move semantics: inserting a node that is
/// already attached somewhere first detaches it from its old parent.
/// Anchor-first argument order is used for every insertion.
pub trait Document {
    /// Top-level container that floating elements are detached into
    fn container(&self) -> NodeId;

    /// Resolve a selector to the matching attached elements, in document order
    fn query(&self, selector: &str) -> Vec<NodeId>;

    /// Whether the node is live and reachable from the container
    fn is_attached(&self, node: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Document offset of the node's border box (forces a reflow)
    fn offset(&mut self, node: NodeId) -> Result<Offset>;

    /// Border-box size of the node (forces a reflow)
    fn size(&mut self, node: NodeId) -> Result<Size>;

    /// Deep-clone a node. The clone starts detached.
    fn clone_node(&mut self, node: NodeId) -> Result<NodeId>;

    /// Insert `child` as the last child of `parent`
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Insert `child` as the first child of `parent`
    fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Insert `node` immediately before `reference`
    fn insert_before(&mut self, reference: NodeId, node: NodeId) -> Result<()>;

    /// Insert `node` immediately after `reference`
    fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<()>;

    /// Put `replacement` in `old`'s slot and drop `old`
    fn replace(&mut self, old: NodeId, replacement: NodeId) -> Result<()>;

    /// Detach a node and drop it with its subtree
    fn remove(&mut self, node: NodeId) -> Result<()>;

    /// Read an inline style property
    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Write an inline style property. `None` or an empty value clears it.
    fn set_style(&mut self, node: NodeId, property: &str, value: Option<&str>) -> Result<()>;

    /// Short human-readable label used in diagnostics
    fn describe(&self, node: NodeId) -> String;
}
