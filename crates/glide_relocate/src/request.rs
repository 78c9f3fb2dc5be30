//! Relocation requests: where an element goes and how it gets there

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use glide_animation::{Easing, StyleMap};
use glide_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};

/// Insertion operation applied to reach the new location
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Last child of the target
    #[default]
    AppendTo,
    /// First child of the target
    PrependTo,
    /// Sibling immediately before the target
    InsertBefore,
    /// Sibling immediately after the target
    InsertAfter,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::AppendTo,
        Mode::PrependTo,
        Mode::InsertBefore,
        Mode::InsertAfter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mode::AppendTo => "appendTo",
            Mode::PrependTo => "prependTo",
            Mode::InsertBefore => "insertBefore",
            Mode::InsertAfter => "insertAfter",
        }
    }

    /// Place `node` relative to `target` using this insertion operation
    pub fn apply<D: Document>(
        self,
        doc: &mut D,
        node: NodeId,
        target: NodeId,
    ) -> glide_dom::Result<()> {
        match self {
            Mode::AppendTo => doc.append_child(target, node),
            Mode::PrependTo => doc.prepend_child(target, node),
            Mode::InsertBefore => doc.insert_before(target, node),
            Mode::InsertAfter => doc.insert_after(target, node),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL.into_iter().find(|mode| mode.name() == s).ok_or(())
    }
}

/// Placement strategy used while the element travels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Position {
    /// Move, then slide in from the old screen position
    #[default]
    RelativeToTarget,
    /// Slide out of the old slot, then move
    RelativeToSource,
    /// Float above the layout while both slots resize
    Absolute,
}

impl Position {
    pub const ALL: [Position; 3] = [
        Position::RelativeToTarget,
        Position::RelativeToSource,
        Position::Absolute,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Position::RelativeToTarget => "relativeToTarget",
            Position::RelativeToSource => "relativeToSource",
            Position::Absolute => "absolute",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL.into_iter().find(|position| position.name() == s).ok_or(())
    }
}

/// An option as the caller supplied it
///
/// Names are kept verbatim so validation can report the rejected value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Requested<T> {
    #[default]
    Unset,
    Known(T),
    Named(String),
}

impl<T: FromStr + Default + Copy> Requested<T> {
    /// Resolve to a concrete value, also returning the name when it was
    /// unrecognised and the default was substituted
    pub fn resolve(&self) -> (T, Option<String>) {
        match self {
            Requested::Unset => (T::default(), None),
            Requested::Known(value) => (*value, None),
            Requested::Named(name) => match name.parse() {
                Ok(value) => (value, None),
                Err(_) => (T::default(), Some(name.clone())),
            },
        }
    }
}

impl<T> From<T> for Requested<T> {
    fn from(value: T) -> Self {
        Requested::Known(value)
    }
}

/// Where to relocate to: a node handle or a selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Node(NodeId),
    Selector(String),
}

impl Target {
    /// Matching attached elements, in document order
    pub fn resolve<D: Document>(&self, doc: &D) -> Vec<NodeId> {
        match self {
            Target::Node(node) if doc.is_attached(*node) => vec![*node],
            Target::Node(_) => Vec::new(),
            Target::Selector(selector) => doc.query(selector),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Node(node) => write!(f, "{:?}", node),
            Target::Selector(selector) => write!(f, "'{}'", selector),
        }
    }
}

impl From<NodeId> for Target {
    fn from(node: NodeId) -> Self {
        Target::Node(node)
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Target::Selector(selector)
    }
}

/// Callback run after a successful relocation, with the moved element
pub type OnComplete<D> = Rc<dyn Fn(&mut D, NodeId)>;

/// A relocation as requested by the caller
///
/// Unset timing falls back to the relocator's configuration.
pub struct RelocationRequest<D> {
    pub target: Target,
    pub mode: Requested<Mode>,
    pub position: Requested<Position>,
    pub duration: Option<Duration>,
    pub easing: Option<Easing>,
    /// Additional numeric properties animated alongside the motion.
    /// `top` and `left` are always overridden by the strategy.
    pub extra_styles: StyleMap,
    pub on_complete: Option<OnComplete<D>>,
}

impl<D> RelocationRequest<D> {
    pub fn new(target: impl Into<Target>) -> Self {
        Self {
            target: target.into(),
            mode: Requested::Unset,
            position: Requested::Unset,
            duration: None,
            easing: None,
            extra_styles: StyleMap::new(),
            on_complete: None,
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Requested::Known(mode);
        self
    }

    /// Set the mode by name; unknown names fall back to `appendTo`
    pub fn mode_named(mut self, name: impl Into<String>) -> Self {
        self.mode = Requested::Named(name.into());
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Requested::Known(position);
        self
    }

    /// Set the position by name; unknown names fall back to `relativeToTarget`
    pub fn position_named(mut self, name: impl Into<String>) -> Self {
        self.position = Requested::Named(name.into());
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn duration_ms(self, ms: u64) -> Self {
        self.duration(Duration::from_millis(ms))
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn also_animate(mut self, property: impl Into<String>, value: f32) -> Self {
        self.extra_styles.insert(property.into(), value);
        self
    }

    pub fn on_complete(mut self, callback: impl Fn(&mut D, NodeId) + 'static) -> Self {
        self.on_complete = Some(Rc::new(callback));
        self
    }
}

impl<D> Clone for RelocationRequest<D> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            mode: self.mode.clone(),
            position: self.position.clone(),
            duration: self.duration,
            easing: self.easing,
            extra_styles: self.extra_styles.clone(),
            on_complete: self.on_complete.clone(),
        }
    }
}

impl<D> fmt::Debug for RelocationRequest<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelocationRequest")
            .field("target", &self.target)
            .field("mode", &self.mode)
            .field("position", &self.position)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("extra_styles", &self.extra_styles)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_dom::{div, Tree};

    #[test]
    fn test_mode_names() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse(), Ok(mode));
        }
        // names match the jQuery options exactly
        assert_eq!("insert-after".parse::<Mode>(), Err(()));
        assert_eq!("PREPENDTO".parse::<Mode>(), Err(()));
        assert_eq!("appendto".parse::<Mode>(), Err(()));
        assert_eq!("sideways".parse::<Mode>(), Err(()));
    }

    #[test]
    fn test_position_names() {
        for position in Position::ALL {
            assert_eq!(position.to_string().parse(), Ok(position));
        }
        assert!("relative_to_source".parse::<Position>().is_err());
        assert!("Absolute".parse::<Position>().is_err());
        assert!("fixed".parse::<Position>().is_err());
    }

    #[test]
    fn test_requested_resolution() {
        assert_eq!(Requested::<Mode>::Unset.resolve(), (Mode::AppendTo, None));
        assert_eq!(Requested::Known(Mode::InsertBefore).resolve(), (Mode::InsertBefore, None));
        assert_eq!(
            Requested::<Mode>::Named("prependTo".into()).resolve(),
            (Mode::PrependTo, None)
        );
        assert_eq!(
            Requested::<Position>::Named("diagonal".into()).resolve(),
            (Position::RelativeToTarget, Some("diagonal".to_string()))
        );
    }

    #[test]
    fn test_mode_apply() {
        let mut tree = Tree::new(100.0).unwrap();
        let body = tree.container();
        let list = tree.build(body, div()).unwrap();
        let a = tree.build(list, div()).unwrap();
        let b = tree.build(list, div()).unwrap();
        let moved = tree.build(body, div()).unwrap();

        Mode::PrependTo.apply(&mut tree, moved, list).unwrap();
        assert_eq!(tree.children(list), &[moved, a, b]);
        Mode::InsertAfter.apply(&mut tree, moved, a).unwrap();
        assert_eq!(tree.children(list), &[a, moved, b]);
        Mode::InsertBefore.apply(&mut tree, moved, a).unwrap();
        assert_eq!(tree.children(list), &[moved, a, b]);
        Mode::AppendTo.apply(&mut tree, moved, list).unwrap();
        assert_eq!(tree.children(list), &[a, b, moved]);
    }

    #[test]
    fn test_target_resolution() {
        let mut tree = Tree::new(100.0).unwrap();
        let body = tree.container();
        let a = tree.build(body, div().class("slot")).unwrap();
        let b = tree.build(body, div().class("slot")).unwrap();

        assert_eq!(Target::from(".slot").resolve(&tree), vec![a, b]);
        assert_eq!(Target::from(b).resolve(&tree), vec![b]);

        tree.remove(b).unwrap();
        assert!(Target::from(b).resolve(&tree).is_empty());
        assert!(Target::from("#nowhere").resolve(&tree).is_empty());
    }

    #[test]
    fn test_builder() {
        let request: RelocationRequest<Tree> = RelocationRequest::new("#cart")
            .mode_named("insertBefore")
            .position(Position::Absolute)
            .duration_ms(250)
            .also_animate("opacity", 0.5)
            .on_complete(|_, _| {});

        assert_eq!(request.target, Target::Selector("#cart".into()));
        assert_eq!(request.mode.resolve().0, Mode::InsertBefore);
        assert_eq!(request.duration, Some(Duration::from_millis(250)));
        assert_eq!(request.extra_styles.get("opacity"), Some(&0.5));
        assert!(request.clone().on_complete.is_some());
    }
}
