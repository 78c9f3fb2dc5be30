//! Document error types

use thiserror::Error;

use crate::document::NodeId;

/// Errors raised by [`Document`](crate::Document) operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    /// The handle does not refer to a live node
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Geometry was requested for a node outside the document
    #[error("Node is not attached to the document: {0:?}")]
    Detached(NodeId),

    /// Sibling insertion next to a node that has no parent
    #[error("Node has no parent: {0:?}")]
    NoParent(NodeId),

    /// The insertion would make a node its own ancestor
    #[error("Cannot insert {node:?} under {parent:?}: node contains the insertion point")]
    HierarchyRequest { parent: NodeId, node: NodeId },

    /// The top-level container is fixed in place
    #[error("The document container cannot be moved, replaced or removed")]
    Container,

    /// The layout engine rejected an operation
    #[error("Layout failed: {0}")]
    Layout(String),
}

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DomError>;
