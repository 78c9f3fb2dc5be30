//! Mutation journal

use crate::document::NodeId;

/// A mutation applied to a [`Tree`](crate::Tree)
///
/// Clones are not recorded: a fresh clone is detached until it is inserted.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    Insert {
        node: NodeId,
        parent: NodeId,
        index: usize,
    },
    Remove {
        node: NodeId,
    },
    Replace {
        old: NodeId,
        replacement: NodeId,
    },
    Style {
        node: NodeId,
        property: String,
        value: Option<String>,
    },
}

impl Mutation {
    /// Whether the mutation changed the shape of the tree
    pub fn is_structural(&self) -> bool {
        !matches!(self, Mutation::Style { .. })
    }

    /// The node the mutation was applied to
    pub fn node(&self) -> NodeId {
        match self {
            Mutation::Insert { node, .. }
            | Mutation::Remove { node }
            | Mutation::Style { node, .. } => *node,
            Mutation::Replace { old, .. } => *old,
        }
    }
}
