//! Slide out of the old slot, then move

use glide_animation::{Animator, Completion};
use glide_dom::{Document, NodeId, Offset};

use super::{discard, elevate, motion, placeholder, Done, Job};
use crate::error::RelocateError;

/// Reserve the destination and return the distance to it
fn stage<D: Document>(doc: &mut D, job: &Job, target_placeholder: NodeId) -> glide_dom::Result<Offset> {
    job.mode.apply(doc, target_placeholder, job.target)?;
    elevate(doc, job.element, "relative", 0.0, 0.0, job.elevation)?;
    Ok(doc.offset(target_placeholder)? - doc.offset(job.element)?)
}

pub(crate) fn run<D, A>(doc: &mut D, anim: &mut A, job: Job, done: Done<D, A>) -> Result<(), RelocateError>
where
    D: Document + 'static,
    A: Animator<D> + 'static,
{
    let element = job.element;
    let target_placeholder = placeholder(doc, element)?;
    let delta = match stage(doc, &job, target_placeholder) {
        Ok(delta) => delta,
        Err(err) => {
            discard(doc, target_placeholder);
            return Err(err.into());
        }
    };
    tracing::debug!("{:?} sliding out by ({}, {})", element, delta.left, delta.top);

    let finish: Completion<D, A> = Box::new(move |doc: &mut D, anim: &mut A| {
        if !doc.is_attached(target_placeholder) {
            tracing::error!("Target of {:?} left the document, leaving it in place", element);
            discard(doc, target_placeholder);
            done(doc, anim, Err(RelocateError::TargetVanished(element)));
            return;
        }
        let outcome = doc.replace(target_placeholder, element).map_err(|err| {
            discard(doc, target_placeholder);
            RelocateError::from(err)
        });
        done(doc, anim, outcome);
    });
    let targets = motion(&job.extra, delta.top, delta.left);
    if let Err(err) = anim.animate(doc, element, targets, job.timing, Some(finish)) {
        discard(doc, target_placeholder);
        return Err(err.into());
    }
    Ok(())
}
