//! Move first, then slide in from the old screen position

use glide_animation::{Animator, Completion};
use glide_dom::{Document, NodeId};

use super::{discard, elevate, motion, placeholder, Done, Job};
use crate::error::RelocateError;

/// Hold the old slot, move the element and offset it back over that slot
fn stage<D: Document>(doc: &mut D, job: &Job, source_placeholder: NodeId) -> glide_dom::Result<()> {
    doc.insert_after(job.element, source_placeholder)?;
    job.mode.apply(doc, job.element, job.target)?;
    let delta = doc.offset(source_placeholder)? - doc.offset(job.element)?;
    elevate(doc, job.element, "relative", delta.top, delta.left, job.elevation)
}

pub(crate) fn run<D, A>(doc: &mut D, anim: &mut A, job: Job, done: Done<D, A>) -> Result<(), RelocateError>
where
    D: Document + 'static,
    A: Animator<D> + 'static,
{
    let source_placeholder = placeholder(doc, job.element)?;
    if let Err(err) = stage(doc, &job, source_placeholder) {
        discard(doc, source_placeholder);
        return Err(err.into());
    }
    tracing::debug!("{:?} moved, sliding in from its old slot", job.element);

    let finish: Completion<D, A> = Box::new(move |doc: &mut D, anim: &mut A| {
        discard(doc, source_placeholder);
        done(doc, anim, Ok(()));
    });
    let targets = motion(&job.extra, 0.0, 0.0);
    if let Err(err) = anim.animate(doc, job.element, targets, job.timing, Some(finish)) {
        discard(doc, source_placeholder);
        return Err(err.into());
    }
    Ok(())
}
