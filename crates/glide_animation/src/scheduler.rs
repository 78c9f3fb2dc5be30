//! Tween scheduler
//!
//! Owns every running tween and advances them on `tick`. Completions are
//! collected while tweens are stepped and run afterwards, in start order, so a
//! completion can freely start or finish other animations.

use std::time::{Duration, Instant};

use glide_dom::{is_length_property, parse_px, Document, DomError, NodeId};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::animator::{AnimationId, Animator, Completion, StyleMap, Timing};

/// Upper bound on frames stepped by [`TweenScheduler::run_until_idle`]
const MAX_IDLE_FRAMES: usize = 100_000;

struct Track {
    property: String,
    from: f32,
    to: f32,
}

struct Tween<D> {
    node: NodeId,
    tracks: SmallVec<[Track; 4]>,
    timing: Timing,
    elapsed: Duration,
    /// Start order, used to run completions deterministically
    seq: u64,
    on_complete: Option<Completion<D, TweenScheduler<D>>>,
}

impl<D: Document> Tween<D> {
    fn progress(&self) -> f64 {
        if self.timing.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_nanos() as f64 / self.timing.duration.as_nanos() as f64).min(1.0)
    }

    /// Write every track at `progress`. Fails if the node has been dropped.
    fn apply(&self, doc: &mut D, progress: f64) -> Result<(), DomError> {
        let eased = if progress >= 1.0 {
            1.0
        } else {
            self.timing.easing.apply(progress as f32)
        };
        for track in &self.tracks {
            let value = track.from + (track.to - track.from) * eased;
            let css = format_value(&track.property, value);
            doc.set_style(self.node, &track.property, Some(&css))?;
        }
        Ok(())
    }
}

/// Format a property value, rounding away float noise
fn format_value(property: &str, value: f32) -> String {
    let mut rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        rounded = 0.0; // no "-0px"
    }
    if is_length_property(property) {
        format!("{rounded}px")
    } else {
        format!("{rounded}")
    }
}

/// Current numeric value of a property, used as a tween's start value
fn current_value<D: Document>(doc: &mut D, node: NodeId, property: &str) -> f32 {
    if let Some(value) = doc.style(node, property).and_then(|v| parse_px(&v)) {
        return value;
    }
    match property {
        "width" => doc.size(node).map(|s| s.width).unwrap_or(0.0),
        "height" => doc.size(node).map(|s| s.height).unwrap_or(0.0),
        "opacity" => 1.0,
        _ => 0.0,
    }
}

/// The default [`Animator`]: frame-stepped tweens over a [`Document`]
///
/// ```ignore
/// let mut tweens = TweenScheduler::new();
/// tweens.animate(&mut doc, node, targets, Timing::default(), Some(Box::new(|doc, tweens| {
///     // runs once, on the tick that reaches the targets
/// })))?;
/// while tweens.tick_now(&mut doc) {
///     // render frame
/// }
/// ```
pub struct TweenScheduler<D> {
    tweens: SlotMap<AnimationId, Tween<D>>,
    next_seq: u64,
    last_frame: Instant,
}

impl<D: Document> TweenScheduler<D> {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
            next_seq: 0,
            last_frame: Instant::now(),
        }
    }

    /// Advance every tween by `dt`
    ///
    /// Returns true if animations are still running afterwards.
    pub fn tick(&mut self, doc: &mut D, dt: Duration) -> bool {
        let mut finished: Vec<(u64, AnimationId)> = Vec::new();

        for (id, tween) in self.tweens.iter_mut() {
            tween.elapsed = tween.elapsed.saturating_add(dt);
            let progress = tween.progress();
            match tween.apply(doc, progress) {
                Ok(()) if progress < 1.0 => {}
                Ok(()) => finished.push((tween.seq, id)),
                Err(err) => {
                    tracing::debug!("Tween {:?} ended early: {}", id, err);
                    finished.push((tween.seq, id));
                }
            }
        }

        finished.sort_unstable_by_key(|(seq, _)| *seq);
        let completions: Vec<_> = finished
            .into_iter()
            .filter_map(|(_, id)| self.tweens.remove(id))
            .filter_map(|tween| tween.on_complete)
            .collect();
        for complete in completions {
            complete(doc, self);
        }

        !self.tweens.is_empty()
    }

    /// Advance by the wall-clock time since the previous frame
    pub fn tick_now(&mut self, doc: &mut D) -> bool {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        self.tick(doc, dt)
    }

    /// Tick with a fixed frame delta until nothing is running
    ///
    /// Returns the number of frames stepped.
    pub fn run_until_idle(&mut self, doc: &mut D, frame: Duration) -> usize {
        let mut frames = 0;
        while !self.tweens.is_empty() {
            if frames == MAX_IDLE_FRAMES {
                tracing::warn!(
                    "Tween scheduler still busy after {} frames, giving up",
                    MAX_IDLE_FRAMES
                );
                break;
            }
            self.tick(doc, frame);
            frames += 1;
        }
        frames
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Progress (0.0 to 1.0) of a running animation
    pub fn progress(&self, id: AnimationId) -> Option<f32> {
        self.tweens.get(id).map(|t| t.progress() as f32)
    }
}

impl<D: Document> Default for TweenScheduler<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> Animator<D> for TweenScheduler<D> {
    fn animate(
        &mut self,
        doc: &mut D,
        node: NodeId,
        targets: StyleMap,
        timing: Timing,
        on_complete: Option<Completion<D, Self>>,
    ) -> Result<AnimationId, DomError> {
        if !doc.is_attached(node) {
            // Still scheduled so the completion contract holds
            tracing::debug!("Animating a node outside the document: {:?}", node);
        }

        let tracks = targets
            .into_iter()
            .map(|(property, to)| Track {
                from: current_value(doc, node, &property),
                property,
                to,
            })
            .collect();

        if self.tweens.is_empty() {
            // Prevent a huge first dt after an idle period
            self.last_frame = Instant::now();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.tweens.insert(Tween {
            node,
            tracks,
            timing,
            elapsed: Duration::ZERO,
            seq,
            on_complete,
        });
        tracing::trace!(
            "Tween {:?} started on {} over {:?}",
            id,
            doc.describe(node),
            timing.duration
        );
        Ok(id)
    }

    fn finish(&mut self, doc: &mut D, node: NodeId) {
        let mut ids: Vec<(u64, AnimationId)> = self
            .tweens
            .iter()
            .filter(|(_, t)| t.node == node)
            .map(|(id, t)| (t.seq, id))
            .collect();
        ids.sort_unstable_by_key(|(seq, _)| *seq);

        let mut completions = Vec::new();
        for (_, id) in ids {
            if let Some(tween) = self.tweens.remove(id) {
                if let Err(err) = tween.apply(doc, 1.0) {
                    tracing::debug!("Could not finish tween {:?}: {}", id, err);
                }
                completions.extend(tween.on_complete);
            }
        }
        for complete in completions {
            complete(doc, self);
        }
    }

    fn is_animating(&self, node: NodeId) -> bool {
        self.tweens.values().any(|t| t.node == node)
    }
}
