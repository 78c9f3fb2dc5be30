//! Per-element relocation records

use std::collections::VecDeque;

use glide_animation::Timing;
use glide_dom::{Document, NodeId};
use rustc_hash::FxHashMap;

use crate::error::{Diagnostic, RelocateError};
use crate::request::{Mode, Position, RelocationRequest};
use crate::reversal::ReversalPlan;

/// Inline properties a strategy overwrites while the element travels
const TRANSIT_PROPERTIES: [&str; 4] = ["position", "top", "left", "z-index"];

/// Inline values of the transit properties, captured before a relocation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SavedStyles {
    values: [Option<String>; 4],
}

impl SavedStyles {
    pub fn capture<D: Document>(doc: &D, node: NodeId) -> Self {
        Self {
            values: TRANSIT_PROPERTIES.map(|property| doc.style(node, property)),
        }
    }

    /// Write the captured values back, clearing properties that were unset
    pub fn restore<D: Document>(&self, doc: &mut D, node: NodeId) -> glide_dom::Result<()> {
        for (property, value) in TRANSIT_PROPERTIES.iter().zip(&self.values) {
            doc.set_style(node, property, value.as_deref())?;
        }
        Ok(())
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        let index = TRANSIT_PROPERTIES.iter().position(|p| *p == property)?;
        self.values[index].as_deref()
    }
}

/// How the most recent relocation of an element ended
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Running,
    Completed,
    Failed(RelocateError),
}

/// Parameters of the most recent relocation
#[derive(Clone, Debug, PartialEq)]
pub struct LastRelocation {
    pub target: NodeId,
    pub mode: Mode,
    pub position: Position,
    pub timing: Timing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelocationState {
    pub last: LastRelocation,
    /// Where the element was before the most recent relocation
    pub reversal: ReversalPlan,
    pub outcome: Outcome,
    /// Findings from validating the most recent request
    pub diagnostics: Vec<Diagnostic>,
    pub saved: SavedStyles,
}

impl RelocationState {
    pub fn in_flight(&self) -> bool {
        self.outcome == Outcome::Running
    }
}

/// Side table of relocation records and queued requests, keyed by element
pub(crate) struct StateTable<D> {
    states: FxHashMap<NodeId, RelocationState>,
    pending: FxHashMap<NodeId, VecDeque<RelocationRequest<D>>>,
}

impl<D: Document> StateTable<D> {
    pub fn new() -> Self {
        Self {
            states: FxHashMap::default(),
            pending: FxHashMap::default(),
        }
    }

    pub fn get(&self, node: NodeId) -> Option<&RelocationState> {
        self.states.get(&node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut RelocationState> {
        self.states.get_mut(&node)
    }

    pub fn insert(&mut self, node: NodeId, state: RelocationState) -> Option<RelocationState> {
        self.states.insert(node, state)
    }

    pub fn remove(&mut self, node: NodeId) -> Option<RelocationState> {
        self.states.remove(&node)
    }

    pub fn in_flight(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(RelocationState::in_flight)
    }

    /// Queue a request behind the running one. Returns its queue position.
    pub fn enqueue(&mut self, node: NodeId, request: RelocationRequest<D>) -> usize {
        let queue = self.pending.entry(node).or_default();
        queue.push_back(request);
        queue.len()
    }

    pub fn dequeue(&mut self, node: NodeId) -> Option<RelocationRequest<D>> {
        let queue = self.pending.get_mut(&node)?;
        let request = queue.pop_front();
        if queue.is_empty() {
            self.pending.remove(&node);
        }
        request
    }

    pub fn pending(&self, node: NodeId) -> usize {
        self.pending.get(&node).map_or(0, VecDeque::len)
    }

    /// Drop records of elements that have left the document
    pub fn prune(&mut self, doc: &D) -> usize {
        let before = self.states.len();
        self.states.retain(|node, _| doc.is_attached(*node));
        self.pending.retain(|node, _| doc.is_attached(*node));
        let dropped = before - self.states.len();
        if dropped > 0 {
            tracing::debug!("Pruned {} relocation records of detached elements", dropped);
        }
        dropped
    }
}
