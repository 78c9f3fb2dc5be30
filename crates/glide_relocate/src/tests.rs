//! End-to-end relocation scenarios against the layout tree

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use glide_animation::{Animator, Easing, TweenScheduler};
use glide_dom::{div, Document, DomError, Mutation, NodeId, Offset, Size, Tree};

use crate::prelude::*;
use crate::{Diagnostic, Outcome, ReversalPlan};

const FRAME: Duration = Duration::from_millis(16);

struct Stage {
    doc: Tree,
    tweens: TweenScheduler<Tree>,
    relocator: Relocator<Tree>,
    list: NodeId,
    cart: NodeId,
    items: Vec<NodeId>,
    parked: Vec<NodeId>,
}

impl Stage {
    /// body > #list > [3 items], #cart > [2 items]
    fn new() -> Self {
        Self::with_config(RelocatorConfig::default())
    }

    fn with_config(config: RelocatorConfig) -> Self {
        let mut doc = Tree::new(240.0).unwrap();
        let body = doc.container();
        let list = doc.build(body, div().id("list").style("padding", "8px")).unwrap();
        let cart = doc.build(body, div().id("cart").style("margin-top", "40px")).unwrap();
        let items = (0..3)
            .map(|_| doc.build(list, div().class("item").size(120.0, 20.0)).unwrap())
            .collect();
        let parked = (0..2)
            .map(|_| doc.build(cart, div().class("parked").size(80.0, 30.0)).unwrap())
            .collect();
        doc.clear_journal();

        Self {
            doc,
            tweens: TweenScheduler::new(),
            relocator: Relocator::new(config),
            list,
            cart,
            items,
            parked,
        }
    }

    fn relocate(&mut self, element: NodeId, request: RelocationRequest<Tree>) -> Result<Dispatch> {
        self.relocator.relocate(&mut self.doc, &mut self.tweens, element, request)
    }

    fn relocate_back(&mut self, element: NodeId) -> Result<Dispatch> {
        self.relocator.relocate_back(&mut self.doc, &mut self.tweens, element)
    }

    fn settle(&mut self) {
        self.tweens.run_until_idle(&mut self.doc, FRAME);
    }

    fn offset(&mut self, node: NodeId) -> Offset {
        self.doc.offset(node).unwrap()
    }

    fn hidden_nodes(&self) -> usize {
        self.doc
            .descendants()
            .into_iter()
            .filter(|node| self.doc.style(*node, "visibility").is_some())
            .count()
    }

    fn assert_clean(&self, element: NodeId) {
        for property in ["position", "top", "left", "z-index"] {
            assert_eq!(self.doc.style(element, property), None, "{property} left behind");
        }
        assert_eq!(self.hidden_nodes(), 0, "placeholder left behind");
    }
}

fn counter() -> (Rc<Cell<usize>>, impl Fn(&mut Tree, NodeId) + 'static) {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    (calls, move |_: &mut Tree, _: NodeId| seen.set(seen.get() + 1))
}

#[test]
fn test_every_mode_and_position() {
    for position in Position::ALL {
        for mode in Mode::ALL {
            let mut stage = Stage::new();
            let [a, e, f] = [stage.items[0], stage.items[1], stage.items[2]];
            let [g, h] = [stage.parked[0], stage.parked[1]];
            let target = match mode {
                Mode::AppendTo | Mode::PrependTo => stage.cart,
                Mode::InsertBefore | Mode::InsertAfter => g,
            };
            let attached = stage.doc.attached_count();
            let (calls, callback) = counter();

            let dispatch = stage
                .relocate(e, RelocationRequest::new(target).mode(mode).position(position).on_complete(callback))
                .unwrap();
            assert_eq!(dispatch, Dispatch::Started(position));
            assert!(stage.relocator.is_in_flight(e));
            stage.settle();

            let expected = match mode {
                Mode::AppendTo => vec![g, h, e],
                Mode::PrependTo | Mode::InsertBefore => vec![e, g, h],
                Mode::InsertAfter => vec![g, e, h],
            };
            assert_eq!(stage.doc.children(stage.cart), expected.as_slice(), "{mode} {position}");
            assert_eq!(stage.doc.children(stage.list), &[a, f], "{mode} {position}");
            assert_eq!(stage.doc.attached_count(), attached, "{mode} {position}");
            assert_eq!(calls.get(), 1, "{mode} {position}");
            stage.assert_clean(e);

            let state = stage.relocator.state(e).unwrap();
            assert_eq!(state.outcome, Outcome::Completed);
            assert_eq!(state.last.mode, mode);
            assert_eq!(state.last.position, position);
        }
    }
}

#[test]
fn test_relative_to_target_starts_where_it_was() {
    let mut stage = Stage::new();
    let e = stage.items[1];
    let before = stage.offset(e);

    stage
        .relocate(e, RelocationRequest::new("#cart").position(Position::RelativeToTarget))
        .unwrap();

    // already in the cart, but drawn over its old slot
    assert_eq!(stage.doc.parent(e), Some(stage.cart));
    assert_eq!(stage.offset(e), before);
    assert_eq!(stage.doc.style(e, "z-index").as_deref(), Some("99999"));
    assert_eq!(stage.hidden_nodes(), 1);

    stage.settle();
    assert_ne!(stage.offset(e), before);
}

#[test]
fn test_relative_to_source_moves_at_the_end() {
    let mut stage = Stage::new();
    let e = stage.items[1];
    let before = stage.offset(e);

    stage
        .relocate(e, RelocationRequest::new("#cart").position(Position::RelativeToSource))
        .unwrap();
    assert_eq!(stage.doc.parent(e), Some(stage.list));
    assert_eq!(stage.offset(e), before);

    for _ in 0..5 {
        stage.tweens.tick(&mut stage.doc, FRAME);
    }
    assert_eq!(stage.doc.parent(e), Some(stage.list));
    assert!(stage.offset(e).top > before.top);

    stage.settle();
    assert_eq!(stage.doc.parent(e), Some(stage.cart));
}

#[test]
fn test_absolute_floats_in_container() {
    let mut stage = Stage::new();
    let e = stage.items[1];
    let before = stage.offset(e);

    stage
        .relocate(e, RelocationRequest::new("#cart").position(Position::Absolute))
        .unwrap();
    assert_eq!(stage.doc.parent(e), Some(stage.doc.container()));
    assert_eq!(stage.doc.style(e, "position").as_deref(), Some("absolute"));
    assert_eq!(stage.offset(e), before);
    assert_eq!(stage.hidden_nodes(), 2);

    stage.settle();
    assert_eq!(stage.doc.parent(e), Some(stage.cart));
    stage.assert_clean(e);
}

#[test]
fn test_absolute_zero_duration_grows_target_slot_fully() {
    let mut stage = Stage::new();
    let e = stage.items[1];

    stage
        .relocate(e, RelocationRequest::new("#cart").position(Position::Absolute).duration_ms(0))
        .unwrap();
    // completion never fires synchronously
    assert_eq!(stage.doc.parent(e), Some(stage.doc.container()));
    stage.tweens.tick(&mut stage.doc, Duration::ZERO);
    assert_eq!(stage.doc.parent(e), Some(stage.cart));
    assert!(stage.tweens.is_empty());

    let journal = stage.doc.journal();
    let swap = journal
        .iter()
        .position(|m| matches!(m, Mutation::Replace { replacement, .. } if *replacement == e))
        .unwrap();
    let Mutation::Replace { old: slot, .. } = &journal[swap] else {
        unreachable!()
    };
    let last_width = journal[..swap]
        .iter()
        .rev()
        .find_map(|m| match m {
            Mutation::Style { node, property, value } if node == slot && property == "width" => Some(value.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(last_width.as_deref(), Some("120px"));
}

#[test]
fn test_extra_styles_animate_alongside() {
    let mut stage = Stage::new();
    let e = stage.items[0];

    stage
        .relocate(
            e,
            RelocationRequest::new("#cart")
                .also_animate("opacity", 0.25)
                .also_animate("top", 500.0)
                .easing(Easing::Linear),
        )
        .unwrap();
    stage.settle();

    assert_eq!(stage.doc.style(e, "opacity").as_deref(), Some("0.25"));
    stage.assert_clean(e);
}

#[test]
fn test_preexisting_styles_are_restored() {
    for position in Position::ALL {
        let mut stage = Stage::new();
        let e = stage.items[2];
        stage.doc.set_style(e, "z-index", Some("3")).unwrap();
        stage.doc.set_style(e, "position", Some("relative")).unwrap();

        stage.relocate(e, RelocationRequest::new("#cart").position(position)).unwrap();
        stage.settle();

        assert_eq!(stage.doc.style(e, "z-index").as_deref(), Some("3"), "{position}");
        assert_eq!(stage.doc.style(e, "position").as_deref(), Some("relative"), "{position}");
        assert_eq!(stage.doc.style(e, "top"), None, "{position}");
    }
}

#[test]
fn test_reversal_of_only_child() {
    let mut stage = Stage::new();
    let lonely = stage.doc.build(stage.doc.container(), div().id("solo")).unwrap();
    let e = stage.doc.build(lonely, div().height(10.0)).unwrap();

    stage.relocate(e, RelocationRequest::new("#cart")).unwrap();
    assert_eq!(
        stage.relocator.state(e).unwrap().reversal,
        ReversalPlan { mode: Mode::AppendTo, target: lonely }
    );
    stage.settle();
    assert_eq!(stage.doc.children(stage.cart).last(), Some(&e));

    stage.relocate_back(e).unwrap();
    stage.settle();
    assert_eq!(stage.doc.children(lonely), &[e]);
}

#[test]
fn test_reversal_of_first_child() {
    let mut stage = Stage::new();
    let [a, b, c] = [stage.items[0], stage.items[1], stage.items[2]];

    stage.relocate(a, RelocationRequest::new("#cart")).unwrap();
    assert_eq!(
        stage.relocator.state(a).unwrap().reversal,
        ReversalPlan { mode: Mode::PrependTo, target: stage.list }
    );
    stage.settle();
    stage.relocate_back(a).unwrap();
    stage.settle();
    assert_eq!(stage.doc.children(stage.list), &[a, b, c]);
}

#[test]
fn test_reversal_follows_moved_anchor() {
    let mut stage = Stage::new();
    let [d, e, _] = [stage.items[0], stage.items[1], stage.items[2]];

    stage.relocate(e, RelocationRequest::new("#cart")).unwrap();
    assert_eq!(
        stage.relocator.state(e).unwrap().reversal,
        ReversalPlan { mode: Mode::InsertAfter, target: d }
    );
    stage.settle();

    // the anchor moves elsewhere in the meantime
    let h = stage.parked[1];
    stage.doc.insert_before(h, d).unwrap();
    stage.relocate_back(e).unwrap();
    stage.settle();

    let cart = stage.doc.children(stage.cart);
    let at = cart.iter().position(|n| *n == d).unwrap();
    assert_eq!(cart[at + 1], e);
}

#[test]
fn test_round_trip_with_every_position() {
    for position in Position::ALL {
        let mut stage = Stage::new();
        let items = stage.items.clone();

        stage
            .relocate(items[1], RelocationRequest::new(stage.parked[0]).mode(Mode::InsertAfter).position(position))
            .unwrap();
        stage.settle();
        assert_eq!(
            stage.relocator.relocate_back_with(&mut stage.doc, &mut stage.tweens, items[1], Some(position)),
            Ok(Dispatch::Started(position))
        );
        stage.settle();

        assert_eq!(stage.doc.children(stage.list), items.as_slice(), "{position}");
        stage.assert_clean(items[1]);
    }
}

#[test]
fn test_reversal_reuses_timing() {
    let mut stage = Stage::new();
    let e = stage.items[0];

    stage
        .relocate(e, RelocationRequest::new("#cart").duration_ms(64).easing(Easing::EaseOut))
        .unwrap();
    stage.settle();
    stage.relocate_back(e).unwrap();

    let state = stage.relocator.state(e).unwrap();
    assert_eq!(state.last.timing.duration, Duration::from_millis(64));
    assert_eq!(state.last.timing.easing, Easing::EaseOut);
    assert_eq!(stage.tweens.run_until_idle(&mut stage.doc, FRAME), 4);
}

#[test]
fn test_invalid_names_fall_back_with_diagnostics() {
    let mut stage = Stage::new();
    let e = stage.items[0];

    let dispatch = stage
        .relocate(e, RelocationRequest::new("#cart").mode_named("sideways").position_named("diagonal"))
        .unwrap();
    assert_eq!(dispatch, Dispatch::Started(Position::RelativeToTarget));
    stage.settle();

    let state = stage.relocator.state(e).unwrap();
    assert_eq!(state.last.mode, Mode::AppendTo);
    assert_eq!(
        state.diagnostics,
        vec![
            Diagnostic::InvalidMode("sideways".into()),
            Diagnostic::InvalidPosition("diagonal".into()),
        ]
    );
    assert_eq!(stage.doc.children(stage.cart).last(), Some(&e));
}

#[test]
fn test_invalid_target_mutates_nothing() {
    let mut stage = Stage::new();
    let e = stage.items[0];
    let (calls, callback) = counter();

    let result = stage.relocate(e, RelocationRequest::new("#missing").on_complete(callback));
    assert!(matches!(result, Err(RelocateError::InvalidTarget { .. })));
    assert!(stage.doc.journal().is_empty());
    assert!(stage.relocator.state(e).is_none());
    assert!(stage.tweens.is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_missing_source_mutates_nothing() {
    let mut stage = Stage::new();
    let e = stage.items[0];
    stage.doc.remove(e).unwrap();
    stage.doc.clear_journal();

    let result = stage.relocate(e, RelocationRequest::new("#cart"));
    assert!(matches!(result, Err(RelocateError::InvalidTarget { .. })));
    assert!(stage.doc.journal().is_empty());
}

#[test]
fn test_relocate_back_without_record() {
    let mut stage = Stage::new();
    let e = stage.items[0];

    assert_eq!(stage.relocate_back(e), Err(RelocateError::NoPriorRelocation(e)));
    assert!(stage.doc.journal().is_empty());
}

#[test]
fn test_removed_element_forgets_record() {
    let mut stage = Stage::new();
    let e = stage.items[0];
    stage.relocate(e, RelocationRequest::new("#cart")).unwrap();
    stage.settle();
    assert!(stage.relocator.state(e).is_some());

    stage.doc.remove(e).unwrap();
    assert_eq!(stage.relocate_back(e), Err(RelocateError::NoPriorRelocation(e)));
    assert!(stage.relocator.state(e).is_none());
}

#[test]
fn test_overlap_rejected_by_default() {
    let mut stage = Stage::new();
    let e = stage.items[0];
    stage.relocate(e, RelocationRequest::new("#cart")).unwrap();
    stage.doc.clear_journal();

    assert_eq!(
        stage.relocate(e, RelocationRequest::new("#list")),
        Err(RelocateError::RelocationInProgress(e))
    );
    assert!(stage.doc.journal().is_empty());

    stage.settle();
    assert_eq!(
        stage.relocate(e, RelocationRequest::new("#list")),
        Ok(Dispatch::Started(Position::RelativeToTarget))
    );
}

#[test]
fn test_overlap_queued() {
    let mut stage = Stage::with_config(RelocatorConfig::new().overlap(OverlapPolicy::Queue));
    let e = stage.items[0];
    let calls = Rc::new(Cell::new(0));
    let counted = |selector: &str| {
        let calls = Rc::clone(&calls);
        RelocationRequest::new(selector).on_complete(move |_: &mut Tree, _| calls.set(calls.get() + 1))
    };
    let first = counted("#cart");
    let second = counted("#list");

    assert!(matches!(stage.relocate(e, first), Ok(Dispatch::Started(_))));
    assert_eq!(stage.relocate(e, second), Ok(Dispatch::Queued { position: 1 }));
    assert_eq!(stage.relocator.pending(e), 1);

    stage.settle();
    assert_eq!(calls.get(), 2);
    assert_eq!(stage.doc.children(stage.list).last(), Some(&e));
    assert_eq!(stage.relocator.pending(e), 0);
    stage.assert_clean(e);
}

#[test]
fn test_target_vanishes_relative_to_source() {
    let mut stage = Stage::new();
    let [a, e, f] = [stage.items[0], stage.items[1], stage.items[2]];
    let (calls, callback) = counter();

    stage
        .relocate(
            e,
            RelocationRequest::new("#cart").position(Position::RelativeToSource).on_complete(callback),
        )
        .unwrap();
    stage.tweens.tick(&mut stage.doc, FRAME);
    stage.doc.remove(stage.cart).unwrap();
    stage.settle();

    assert_eq!(stage.doc.children(stage.list), &[a, e, f]);
    assert_eq!(calls.get(), 0);
    assert_eq!(
        stage.relocator.state(e).unwrap().outcome,
        Outcome::Failed(RelocateError::TargetVanished(e))
    );
    stage.assert_clean(e);
}

#[test]
fn test_target_vanishes_absolute() {
    let mut stage = Stage::new();
    let [a, e, f] = [stage.items[0], stage.items[1], stage.items[2]];
    let (calls, callback) = counter();

    stage
        .relocate(e, RelocationRequest::new("#cart").position(Position::Absolute).on_complete(callback))
        .unwrap();
    stage.tweens.tick(&mut stage.doc, FRAME);
    stage.doc.remove(stage.cart).unwrap();
    stage.settle();

    // back in its old slot
    assert_eq!(stage.doc.children(stage.list), &[a, e, f]);
    assert_eq!(calls.get(), 0);
    assert!(!stage.relocator.is_in_flight(e));
    stage.assert_clean(e);
}

#[test]
fn test_relocate_matching_fans_out() {
    let mut stage = Stage::new();
    let items = stage.items.clone();

    let results = stage
        .relocator
        .relocate_matching(&mut stage.doc, &mut stage.tweens, ".item", RelocationRequest::new("#cart"))
        .unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|(_, result)| result.is_ok()));
    stage.settle();

    let cart = stage.doc.children(stage.cart);
    assert_eq!(&cart[2..], items.as_slice());
    assert!(stage.doc.children(stage.list).is_empty());

    let none = stage.relocator.relocate_matching(
        &mut stage.doc,
        &mut stage.tweens,
        ".ghost",
        RelocationRequest::new("#cart"),
    );
    assert!(matches!(none, Err(RelocateError::InvalidTarget { .. })));
}

#[test]
fn test_callback_chains_a_follow_up() {
    let mut stage = Stage::new();
    let e = stage.items[0];
    let relocator = stage.relocator.clone();
    let (calls, callback) = counter();
    let follow_up = Rc::new(Cell::new(0));
    let seen = Rc::clone(&follow_up);

    stage
        .relocate(
            e,
            RelocationRequest::new("#cart").on_complete(move |doc: &mut Tree, node| {
                // the record is already final when the callback runs
                assert!(!relocator.is_in_flight(node));
                assert!(doc.style(node, "z-index").is_none());
                callback(doc, node);
                let seen = Rc::clone(&seen);
                let next = RelocationRequest::new("#list")
                    .on_complete(move |_: &mut Tree, _| seen.set(seen.get() + 1));
                assert_eq!(relocator.schedule(node, next), Ok(1));
            }),
        )
        .unwrap();
    stage.settle();

    assert_eq!(calls.get(), 1);
    assert_eq!(follow_up.get(), 1);
    assert_eq!(stage.doc.children(stage.list).last(), Some(&e));
    assert_eq!(stage.relocator.state(e).unwrap().last.target, stage.list);
    assert!(!stage.relocator.is_in_flight(e));
    stage.assert_clean(e);

    // outside a running relocation there is nothing to follow
    assert_eq!(
        stage.relocator.schedule(e, RelocationRequest::new("#cart")),
        Err(RelocateError::NotRelocating(e))
    );
    assert_eq!(stage.relocator.pending(e), 0);
}

#[test]
fn test_queue_skips_requests_that_fail_to_start() {
    let mut stage = Stage::with_config(RelocatorConfig::new().overlap(OverlapPolicy::Queue));
    let e = stage.items[0];
    let body = stage.doc.container();
    let gone = stage.doc.build(body, div().id("gone")).unwrap();
    let calls = Rc::new(Cell::new(0));
    let counted = |selector: &str| {
        let calls = Rc::clone(&calls);
        RelocationRequest::new(selector).on_complete(move |_: &mut Tree, _| calls.set(calls.get() + 1))
    };

    assert!(matches!(stage.relocate(e, counted("#cart")), Ok(Dispatch::Started(_))));
    assert_eq!(stage.relocate(e, counted("#gone")), Ok(Dispatch::Queued { position: 1 }));
    assert_eq!(stage.relocate(e, counted("#list")), Ok(Dispatch::Queued { position: 2 }));
    stage.doc.remove(gone).unwrap();

    stage.settle();
    assert_eq!(calls.get(), 2);
    assert_eq!(stage.doc.children(stage.list).last(), Some(&e));
    assert_eq!(stage.relocator.pending(e), 0);
    assert!(!stage.relocator.is_in_flight(e));
    stage.assert_clean(e);
}

/// A tree whose offset measurements start failing after a budget
struct Flaky {
    tree: Tree,
    offsets_left: usize,
}

impl Document for Flaky {
    fn container(&self) -> NodeId {
        self.tree.container()
    }
    fn query(&self, selector: &str) -> Vec<NodeId> {
        self.tree.query(selector)
    }
    fn is_attached(&self, node: NodeId) -> bool {
        self.tree.is_attached(node)
    }
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }
    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.tree.next_sibling(node)
    }
    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.tree.previous_sibling(node)
    }
    fn offset(&mut self, node: NodeId) -> glide_dom::Result<Offset> {
        if self.offsets_left == 0 {
            return Err(DomError::Layout("measurement unavailable".into()));
        }
        self.offsets_left -= 1;
        self.tree.offset(node)
    }
    fn size(&mut self, node: NodeId) -> glide_dom::Result<Size> {
        self.tree.size(node)
    }
    fn clone_node(&mut self, node: NodeId) -> glide_dom::Result<NodeId> {
        self.tree.clone_node(node)
    }
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> glide_dom::Result<()> {
        self.tree.append_child(parent, child)
    }
    fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> glide_dom::Result<()> {
        self.tree.prepend_child(parent, child)
    }
    fn insert_before(&mut self, reference: NodeId, node: NodeId) -> glide_dom::Result<()> {
        self.tree.insert_before(reference, node)
    }
    fn insert_after(&mut self, reference: NodeId, node: NodeId) -> glide_dom::Result<()> {
        self.tree.insert_after(reference, node)
    }
    fn replace(&mut self, old: NodeId, replacement: NodeId) -> glide_dom::Result<()> {
        self.tree.replace(old, replacement)
    }
    fn remove(&mut self, node: NodeId) -> glide_dom::Result<()> {
        self.tree.remove(node)
    }
    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree.style(node, property)
    }
    fn set_style(&mut self, node: NodeId, property: &str, value: Option<&str>) -> glide_dom::Result<()> {
        self.tree.set_style(node, property, value)
    }
    fn describe(&self, node: NodeId) -> String {
        self.tree.describe(node)
    }
}

#[test]
fn test_failed_start_returns_element_to_its_slot() {
    // RelativeToTarget fails right after the move, Absolute after floating
    // the element into the container
    for (position, offsets) in [(Position::RelativeToTarget, 0), (Position::Absolute, 2)] {
        let stage = Stage::new();
        let [a, e, f] = [stage.items[0], stage.items[1], stage.items[2]];
        let (list, cart) = (stage.list, stage.cart);
        let mut doc = Flaky {
            tree: stage.doc,
            offsets_left: offsets,
        };
        let mut tweens: TweenScheduler<Flaky> = TweenScheduler::new();
        let relocator: Relocator<Flaky> = Relocator::default();

        let result = relocator.relocate(&mut doc, &mut tweens, e, RelocationRequest::new(cart).position(position));
        assert!(matches!(result, Err(RelocateError::Dom(_))), "{position}");

        assert_eq!(doc.tree.children(list), &[a, e, f], "{position}");
        assert_eq!(doc.tree.children(cart).len(), 2, "{position}");
        assert!(relocator.state(e).is_none(), "{position}");
        assert!(!relocator.is_in_flight(e), "{position}");
        for property in ["position", "top", "left", "z-index"] {
            assert_eq!(doc.style(e, property), None, "{property} left behind");
        }
        let hidden = doc
            .tree
            .descendants()
            .into_iter()
            .filter(|node| doc.style(*node, "visibility").is_some())
            .count();
        assert_eq!(hidden, 0, "{position} placeholder left behind");
    }
}
