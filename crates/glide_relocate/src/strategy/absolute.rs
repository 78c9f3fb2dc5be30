//! Float above the layout while the old slot shrinks and the new one grows

use glide_animation::{Animator, Completion};
use glide_dom::{Document, NodeId, Offset};

use super::{discard, elevate, motion, placeholder, size_targets, Done, Job};
use crate::error::RelocateError;

struct Slots {
    source: NodeId,
    target: NodeId,
}

/// Set up both placeholders and float the element over the old slot.
/// Returns the destination relative to the container.
fn stage<D, A>(doc: &mut D, anim: &mut A, job: &Job, slots: &Slots) -> glide_dom::Result<Offset>
where
    D: Document,
    A: Animator<D>,
{
    doc.insert_after(job.element, slots.source)?;
    job.mode.apply(doc, slots.target, job.target)?;

    let full = doc.size(slots.source)?;
    let container = doc.container();
    let origin = doc.offset(container)?;
    // read before the target slot collapses
    let destination = doc.offset(slots.target)? - origin;

    doc.set_style(slots.target, "width", Some("1px"))?;
    doc.set_style(slots.target, "height", Some("1px"))?;
    anim.animate(doc, slots.target, size_targets(full.width, full.height), job.timing, None)?;
    anim.animate(doc, slots.source, size_targets(1.0, 1.0), job.timing, None)?;

    doc.append_child(container, job.element)?;
    let start = doc.offset(slots.source)? - origin;
    elevate(doc, job.element, "absolute", start.top, start.left, job.elevation)?;
    Ok(destination)
}

/// Final swap. If the target slot is gone the element returns to its old slot.
fn land<D: Document>(doc: &mut D, element: NodeId, slots: &Slots) -> Result<(), RelocateError> {
    if doc.is_attached(slots.target) {
        let swapped = doc.replace(slots.target, element);
        discard(doc, slots.source);
        return swapped.map_err(RelocateError::from);
    }

    discard(doc, slots.target);
    if doc.is_attached(slots.source) {
        tracing::error!("Target of {:?} left the document, returning it to its old slot", element);
        doc.replace(slots.source, element)?;
    } else {
        tracing::error!("Both slots of {:?} left the document, leaving it in the container", element);
        discard(doc, slots.source);
    }
    Err(RelocateError::TargetVanished(element))
}

pub(crate) fn run<D, A>(doc: &mut D, anim: &mut A, job: Job, done: Done<D, A>) -> Result<(), RelocateError>
where
    D: Document + 'static,
    A: Animator<D> + 'static,
{
    let element = job.element;
    let source = placeholder(doc, element)?;
    let target = match placeholder(doc, element) {
        Ok(target) => target,
        Err(err) => {
            discard(doc, source);
            return Err(err.into());
        }
    };
    let slots = Slots { source, target };

    let destination = match stage(doc, anim, &job, &slots) {
        Ok(destination) => destination,
        Err(err) => {
            discard(doc, slots.source);
            discard(doc, slots.target);
            return Err(err.into());
        }
    };
    tracing::debug!(
        "{:?} floating to ({}, {})",
        element,
        destination.left,
        destination.top
    );

    let finish: Completion<D, A> = Box::new(move |doc: &mut D, anim: &mut A| {
        // placeholders reach their final size before the swap
        anim.finish(doc, slots.target);
        anim.finish(doc, slots.source);
        let outcome = land(doc, element, &slots);
        done(doc, anim, outcome);
    });
    let targets = motion(&job.extra, destination.top, destination.left);
    if let Err(err) = anim.animate(doc, element, targets, job.timing, Some(finish)) {
        discard(doc, source);
        discard(doc, target);
        return Err(err.into());
    }
    Ok(())
}
