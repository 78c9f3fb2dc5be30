//! Relocation error and diagnostic types

use std::fmt;

use glide_dom::{DomError, NodeId};
use thiserror::Error;

/// Errors that abort a relocation, or a step of one
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelocateError {
    /// Source or target could not be resolved; nothing was mutated
    #[error("Invalid relocation of {element} to {target}: {reason}")]
    InvalidTarget {
        element: String,
        target: String,
        reason: &'static str,
    },

    /// `relocate_back` on an element with no recorded relocation
    #[error("Cannot move {0:?} back: it has no recorded relocation")]
    NoPriorRelocation(NodeId),

    /// A relocation of this element is still animating
    #[error("{0:?} is already being relocated")]
    RelocationInProgress(NodeId),

    /// A follow-up was scheduled for an element with nothing running
    #[error("{0:?} is not being relocated")]
    NotRelocating(NodeId),

    /// The target placeholder left the document before the final swap
    #[error("Target of {0:?} left the document before the relocation finished")]
    TargetVanished(NodeId),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Result type for relocation operations
pub type Result<T> = std::result::Result<T, RelocateError>;

/// Non-fatal findings from request validation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// Unknown mode name, replaced with the default
    InvalidMode(String),
    /// Unknown position name, replaced with the default
    InvalidPosition(String),
    /// A target selector matched several elements; the first was used
    AmbiguousTarget { selector: String, matches: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidMode(name) => write!(f, "invalid mode '{}'", name),
            Diagnostic::InvalidPosition(name) => write!(f, "invalid position '{}'", name),
            Diagnostic::AmbiguousTarget { selector, matches } => {
                write!(f, "target '{}' matched {} elements", selector, matches)
            }
        }
    }
}
