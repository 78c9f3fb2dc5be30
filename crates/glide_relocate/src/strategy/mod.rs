//! Placement strategies
//!
//! Each strategy performs its synchronous steps, starts the transition and
//! hands the caller's finalizer to the animator's completion. Placeholders are
//! invisible deep clones of the moved element that hold layout space.

mod absolute;
mod relative_to_source;
mod relative_to_target;

use glide_animation::{Animator, StyleMap, Timing};
use glide_dom::{Document, NodeId};

use crate::error::RelocateError;
use crate::request::{Mode, Position};

/// Resolved inputs of one strategy run
pub(crate) struct Job {
    pub element: NodeId,
    pub target: NodeId,
    pub mode: Mode,
    pub timing: Timing,
    pub extra: StyleMap,
    pub elevation: i32,
}

/// Runs once the transition has finished, with the strategy's outcome
pub(crate) type Done<D, A> = Box<dyn FnOnce(&mut D, &mut A, Result<(), RelocateError>)>;

pub(crate) type Strategy<D, A> = fn(&mut D, &mut A, Job, Done<D, A>) -> Result<(), RelocateError>;

pub(crate) fn select<D, A>(position: Position) -> Strategy<D, A>
where
    D: Document + 'static,
    A: Animator<D> + 'static,
{
    match position {
        Position::RelativeToTarget => relative_to_target::run,
        Position::RelativeToSource => relative_to_source::run,
        Position::Absolute => absolute::run,
    }
}

/// Detached, hidden deep clone of `element`
fn placeholder<D: Document>(doc: &mut D, element: NodeId) -> glide_dom::Result<NodeId> {
    let copy = doc.clone_node(element)?;
    doc.set_style(copy, "visibility", Some("hidden"))?;
    Ok(copy)
}

/// Remove a placeholder if it still exists
fn discard<D: Document>(doc: &mut D, placeholder: NodeId) {
    if let Err(err) = doc.remove(placeholder) {
        tracing::trace!("Placeholder {:?} already gone: {}", placeholder, err);
    }
}

fn px(value: f32) -> String {
    format!("{}px", value)
}

/// Lift the element out of normal stacking for the duration of the move
fn elevate<D: Document>(
    doc: &mut D,
    element: NodeId,
    position: &str,
    top: f32,
    left: f32,
    elevation: i32,
) -> glide_dom::Result<()> {
    doc.set_style(element, "position", Some(position))?;
    doc.set_style(element, "top", Some(&px(top)))?;
    doc.set_style(element, "left", Some(&px(left)))?;
    doc.set_style(element, "z-index", Some(&elevation.to_string()))
}

/// Caller's extra properties plus the motion; `top`/`left` always win
fn motion(extra: &StyleMap, top: f32, left: f32) -> StyleMap {
    let mut targets = extra.clone();
    targets.insert("top".to_string(), top);
    targets.insert("left".to_string(), left);
    targets
}

fn size_targets(width: f32, height: f32) -> StyleMap {
    let mut targets = StyleMap::new();
    targets.insert("width".to_string(), width);
    targets.insert("height".to_string(), height);
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_dom::{div, Tree};

    #[test]
    fn test_motion_overrides_extra_offsets() {
        let mut extra = StyleMap::new();
        extra.insert("opacity".into(), 0.2);
        extra.insert("top".into(), 500.0);

        let targets = motion(&extra, 10.0, -4.0);
        assert_eq!(targets.get("top"), Some(&10.0));
        assert_eq!(targets.get("left"), Some(&-4.0));
        assert_eq!(targets.get("opacity"), Some(&0.2));
    }

    #[test]
    fn test_placeholder_is_hidden_clone() {
        let mut tree = Tree::new(100.0).unwrap();
        let body = tree.container();
        let item = tree.build(body, div().id("item").height(30.0)).unwrap();

        let copy = placeholder(&mut tree, item).unwrap();
        assert!(!tree.is_attached(copy));
        assert_eq!(tree.style(copy, "visibility").as_deref(), Some("hidden"));
        assert_eq!(tree.style(copy, "height").as_deref(), Some("30px"));
        assert_eq!(tree.style(item, "visibility"), None);

        discard(&mut tree, copy);
        discard(&mut tree, copy);
        assert!(!tree.contains(copy));
    }

    #[test]
    fn test_elevate() {
        let mut tree = Tree::new(100.0).unwrap();
        let body = tree.container();
        let item = tree.build(body, div()).unwrap();

        elevate(&mut tree, item, "absolute", 12.5, 0.0, 7).unwrap();
        assert_eq!(tree.style(item, "position").as_deref(), Some("absolute"));
        assert_eq!(tree.style(item, "top").as_deref(), Some("12.5px"));
        assert_eq!(tree.style(item, "left").as_deref(), Some("0px"));
        assert_eq!(tree.style(item, "z-index").as_deref(), Some("7"));
    }
}
