//! The relocator: entry points, dispatch and the reversal record

use std::cell::RefCell;
use std::rc::Rc;

use glide_animation::Animator;
use glide_dom::{Document, NodeId};
use rustc_hash::FxHashSet;

use crate::config::{OverlapPolicy, RelocatorConfig};
use crate::error::{RelocateError, Result};
use crate::request::{OnComplete, Position, RelocationRequest, Target};
use crate::state::{LastRelocation, Outcome, RelocationState, SavedStyles, StateTable};
use crate::strategy::{self, Done, Job};
use crate::validate::{validate, Validated};

/// What happened to an accepted request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The transition is running with this strategy
    Started(Position),
    /// Waiting behind a running relocation of the same element
    Queued { position: usize },
}

struct Inner<D> {
    config: RelocatorConfig,
    table: StateTable<D>,
    /// Elements whose completion callback is running
    landing: FxHashSet<NodeId>,
}

/// Relocates elements and remembers where they came from
///
/// Cloning is cheap and clones share state. The relocator is single-threaded:
/// it is driven by the same loop that ticks the animator.
pub struct Relocator<D> {
    inner: Rc<RefCell<Inner<D>>>,
}

impl<D> Clone for Relocator<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D: Document + 'static> Default for Relocator<D> {
    fn default() -> Self {
        Self::new(RelocatorConfig::default())
    }
}

impl<D: Document + 'static> Relocator<D> {
    pub fn new(config: RelocatorConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                config,
                table: StateTable::new(),
                landing: FxHashSet::default(),
            })),
        }
    }

    pub fn config(&self) -> RelocatorConfig {
        self.inner.borrow().config.clone()
    }

    /// Record of the element's most recent relocation
    pub fn state(&self, element: NodeId) -> Option<RelocationState> {
        self.inner.borrow().table.get(element).cloned()
    }

    pub fn is_in_flight(&self, element: NodeId) -> bool {
        self.inner.borrow().table.in_flight(element)
    }

    /// Requests queued behind the element's running relocation
    pub fn pending(&self, element: NodeId) -> usize {
        self.inner.borrow().table.pending(element)
    }

    /// Forget elements that have left the document. Entry points call this.
    pub fn prune(&self, doc: &D) -> usize {
        self.inner.borrow_mut().table.prune(doc)
    }

    /// Move `element` as described by `request`, animating the transition
    ///
    /// Validation failures return before the document is touched. Otherwise
    /// the element's current slot is recorded for [`relocate_back`] and a
    /// strategy is started; its completion restores the element's transit
    /// styles and then runs the request's callback.
    ///
    /// [`relocate_back`]: Relocator::relocate_back
    pub fn relocate<A>(
        &self,
        doc: &mut D,
        anim: &mut A,
        element: NodeId,
        request: RelocationRequest<D>,
    ) -> Result<Dispatch>
    where
        A: Animator<D> + 'static,
    {
        self.prune(doc);
        let config = self.config();
        let checked = validate(doc, element, &request, &config)?;

        if self.is_in_flight(element) {
            match config.overlap {
                OverlapPolicy::Reject => {
                    tracing::error!("{} is already being relocated", doc.describe(element));
                    return Err(RelocateError::RelocationInProgress(element));
                }
                OverlapPolicy::Queue => {
                    let position = self.inner.borrow_mut().table.enqueue(element, request);
                    tracing::debug!("Queued relocation of {} at {}", doc.describe(element), position);
                    return Ok(Dispatch::Queued { position });
                }
            }
        }

        self.start(doc, anim, checked, config.elevation)
    }

    /// Relocate every element matching `selector` with the same request
    ///
    /// Each element is handled independently; one failing does not stop the
    /// others. Fails only when nothing matches.
    pub fn relocate_matching<A>(
        &self,
        doc: &mut D,
        anim: &mut A,
        selector: &str,
        request: RelocationRequest<D>,
    ) -> Result<Vec<(NodeId, Result<Dispatch>)>>
    where
        A: Animator<D> + 'static,
    {
        let elements = doc.query(selector);
        if elements.is_empty() {
            tracing::error!("Cannot relocate '{}' to {}: source matches no element", selector, request.target);
            return Err(RelocateError::InvalidTarget {
                element: format!("'{}'", selector),
                target: request.target.to_string(),
                reason: "source matches no element",
            });
        }

        Ok(elements
            .into_iter()
            .map(|element| (element, self.relocate(doc, anim, element, request.clone())))
            .collect())
    }

    /// Queue `request` behind the element's running relocation
    ///
    /// Calling this from an `on_complete` callback chains a follow-up move:
    /// the request starts as soon as the callback returns. The overlap policy
    /// does not apply. Fails if the element has nothing running or landing.
    pub fn schedule(&self, element: NodeId, request: RelocationRequest<D>) -> Result<usize> {
        let mut inner = self.inner.borrow_mut();
        if !inner.table.in_flight(element) && !inner.landing.contains(&element) {
            tracing::error!("Cannot schedule after {:?}: it is not being relocated", element);
            return Err(RelocateError::NotRelocating(element));
        }
        let position = inner.table.enqueue(element, request);
        tracing::debug!("Scheduled follow-up relocation of {:?} at {}", element, position);
        Ok(position)
    }

    /// Move the element back to where its most recent relocation took it from
    pub fn relocate_back<A>(&self, doc: &mut D, anim: &mut A, element: NodeId) -> Result<Dispatch>
    where
        A: Animator<D> + 'static,
    {
        self.relocate_back_with(doc, anim, element, None)
    }

    /// Like [`relocate_back`](Relocator::relocate_back), overriding the
    /// strategy. Timing is reused from the recorded relocation.
    pub fn relocate_back_with<A>(
        &self,
        doc: &mut D,
        anim: &mut A,
        element: NodeId,
        position: Option<Position>,
    ) -> Result<Dispatch>
    where
        A: Animator<D> + 'static,
    {
        self.prune(doc);
        let Some(state) = self.state(element) else {
            tracing::error!("Cannot move {:?} back: it has no recorded relocation", element);
            return Err(RelocateError::NoPriorRelocation(element));
        };

        let plan = state.reversal;
        let mut request = RelocationRequest::new(Target::Node(plan.target))
            .mode(plan.mode)
            .duration(state.last.timing.duration)
            .easing(state.last.timing.easing);
        if let Some(position) = position {
            request = request.position(position);
        }
        tracing::debug!("Moving {:?} back: {} {:?}", element, plan.mode, plan.target);
        self.relocate(doc, anim, element, request)
    }

    fn start<A>(&self, doc: &mut D, anim: &mut A, checked: Validated<D>, elevation: i32) -> Result<Dispatch>
    where
        A: Animator<D> + 'static,
    {
        let Validated {
            element,
            target,
            mode,
            position,
            timing,
            extra,
            on_complete,
            reversal,
            diagnostics,
        } = checked;

        let saved = SavedStyles::capture(doc, element);
        let state = RelocationState {
            last: LastRelocation {
                target,
                mode,
                position,
                timing,
            },
            reversal,
            outcome: Outcome::Running,
            diagnostics,
            saved: saved.clone(),
        };
        let previous = self.inner.borrow_mut().table.insert(element, state);

        tracing::debug!(
            "Relocating {} via {} {} ({:?}, {})",
            doc.describe(element),
            mode,
            doc.describe(target),
            position,
            timing.easing
        );

        let job = Job {
            element,
            target,
            mode,
            timing,
            extra,
            elevation,
        };
        let relocator = self.clone();
        let done: Done<D, A> = Box::new(move |doc: &mut D, anim: &mut A, outcome: Result<()>| {
            relocator.land(doc, anim, element, on_complete, outcome);
        });

        let run = strategy::select::<D, A>(position);
        if let Err(err) = run(doc, anim, job, done) {
            tracing::error!("Relocation of {:?} failed: {}", element, err);
            if let Err(restore) = saved.restore(doc, element) {
                tracing::debug!("Could not restore styles of {:?}: {}", element, restore);
            }
            // the strategy may have moved the element before failing
            if let Err(undo) = reversal.mode.apply(doc, element, reversal.target) {
                tracing::debug!("Could not return {:?} to its slot: {}", element, undo);
            }
            let mut inner = self.inner.borrow_mut();
            match previous {
                Some(previous) => inner.table.insert(element, previous),
                None => inner.table.remove(element),
            };
            return Err(err);
        }

        Ok(Dispatch::Started(position))
    }

    /// Finalizer shared by all strategies
    fn land<A>(
        &self,
        doc: &mut D,
        anim: &mut A,
        element: NodeId,
        on_complete: Option<OnComplete<D>>,
        outcome: Result<()>,
    ) where
        A: Animator<D> + 'static,
    {
        let saved = self
            .inner
            .borrow()
            .table
            .get(element)
            .map(|state| state.saved.clone())
            .unwrap_or_default();
        if let Err(err) = saved.restore(doc, element) {
            tracing::debug!("Could not restore styles of {:?}: {}", element, err);
        }

        let succeeded = outcome.is_ok();
        match &outcome {
            Ok(()) => tracing::debug!("Relocated {:?}", element),
            Err(err) => tracing::error!("Relocation of {:?} did not complete: {}", element, err),
        }
        if let Some(state) = self.inner.borrow_mut().table.get_mut(element) {
            state.outcome = match outcome {
                Ok(()) => Outcome::Completed,
                Err(err) => Outcome::Failed(err),
            };
        }

        if succeeded {
            if let Some(callback) = on_complete {
                self.inner.borrow_mut().landing.insert(element);
                callback(doc, element);
                self.inner.borrow_mut().landing.remove(&element);
            }
        }

        // drain until one queued request starts; failed ones are dropped
        loop {
            let Some(request) = self.inner.borrow_mut().table.dequeue(element) else {
                break;
            };
            let target = request.target.to_string();
            match self.relocate(doc, anim, element, request) {
                Ok(_) => break,
                Err(err) => {
                    tracing::warn!("Dropped queued relocation of {:?} to {}: {}", element, target, err)
                }
            }
        }
    }
}
