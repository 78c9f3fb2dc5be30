//! Request validation
//!
//! Runs before anything touches the document: a rejected request leaves the
//! document exactly as it was.

use glide_animation::{StyleMap, Timing};
use glide_dom::{Document, NodeId};

use crate::config::RelocatorConfig;
use crate::error::{Diagnostic, RelocateError, Result};
use crate::request::{Mode, OnComplete, Position, RelocationRequest, Target};
use crate::reversal::ReversalPlan;

/// A request with every option resolved
pub(crate) struct Validated<D> {
    pub element: NodeId,
    pub target: NodeId,
    pub mode: Mode,
    pub position: Position,
    pub timing: Timing,
    pub extra: StyleMap,
    pub on_complete: Option<OnComplete<D>>,
    pub reversal: ReversalPlan,
    pub diagnostics: Vec<Diagnostic>,
}

fn invalid<D: Document>(doc: &D, element: NodeId, target: &Target, reason: &'static str) -> RelocateError {
    let element = if doc.is_attached(element) {
        doc.describe(element)
    } else {
        format!("{:?}", element)
    };
    tracing::error!("Cannot relocate {} to {}: {}", element, target, reason);
    RelocateError::InvalidTarget {
        element,
        target: target.to_string(),
        reason,
    }
}

fn contains<D: Document>(doc: &D, ancestor: NodeId, node: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if n == ancestor {
            return true;
        }
        current = doc.parent(n);
    }
    false
}

pub(crate) fn validate<D: Document>(
    doc: &D,
    element: NodeId,
    request: &RelocationRequest<D>,
    config: &RelocatorConfig,
) -> Result<Validated<D>> {
    let mut diagnostics = Vec::new();

    let (mode, rejected) = request.mode.resolve();
    if let Some(name) = rejected {
        tracing::warn!("Invalid mode '{}', using {}", name, mode);
        diagnostics.push(Diagnostic::InvalidMode(name));
    }

    let (position, rejected) = request.position.resolve();
    if let Some(name) = rejected {
        tracing::warn!("Invalid position '{}', using {}", name, position);
        diagnostics.push(Diagnostic::InvalidPosition(name));
    }

    if !doc.is_attached(element) {
        return Err(invalid(doc, element, &request.target, "source element is not in the document"));
    }
    if element == doc.container() {
        return Err(invalid(doc, element, &request.target, "the document container cannot be moved"));
    }

    let matches = request.target.resolve(doc);
    let Some(&target) = matches.first() else {
        return Err(invalid(doc, element, &request.target, "target matches no element"));
    };
    if matches.len() > 1 {
        tracing::warn!(
            "Target {} matched {} elements, using the first",
            request.target,
            matches.len()
        );
        diagnostics.push(Diagnostic::AmbiguousTarget {
            selector: request.target.to_string(),
            matches: matches.len(),
        });
    }
    if contains(doc, element, target) {
        return Err(invalid(doc, element, &request.target, "target is inside the moved element"));
    }

    let Some(reversal) = ReversalPlan::capture(doc, element) else {
        return Err(invalid(doc, element, &request.target, "source element has no parent"));
    };

    let defaults = config.default_timing();
    let timing = Timing::new(
        request.duration.unwrap_or(defaults.duration),
        request.easing.unwrap_or(defaults.easing),
    );

    Ok(Validated {
        element,
        target,
        mode,
        position,
        timing,
        extra: request.extra_styles.clone(),
        on_complete: request.on_complete.clone(),
        reversal,
        diagnostics,
    })
}
