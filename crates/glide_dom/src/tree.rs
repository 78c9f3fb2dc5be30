//! In-memory document tree laid out with taffy

use slotmap::SlotMap;
use smallvec::SmallVec;
use taffy::geometry::Size as LayoutSize;
use taffy::style::AvailableSpace;
use taffy::{NodeId as LayoutNode, TaffyTree};

use crate::document::{Document, NodeId, Offset, Size};
use crate::element::ElementSpec;
use crate::error::{DomError, Result};
use crate::journal::Mutation;
use crate::selector::Selector;
use crate::style::{to_layout_style, InlineStyle};

struct Element {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    style: InlineStyle,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layout: LayoutNode,
}

/// Where an insertion lands, resolved after the node is detached
#[derive(Clone, Copy)]
enum Slot {
    First(NodeId),
    Last(NodeId),
    Before(NodeId),
    After(NodeId),
}

fn layout_err(err: taffy::TaffyError) -> DomError {
    DomError::Layout(err.to_string())
}

/// An element tree with a single `body` container
///
/// Every element owns a taffy node whose style mirrors its inline style, so
/// geometry queries run a real layout pass. Structural and style mutations are
/// appended to a journal that tests and tooling can inspect.
pub struct Tree {
    nodes: SlotMap<NodeId, Element>,
    taffy: TaffyTree<()>,
    root: NodeId,
    viewport_width: f32,
    journal: Vec<Mutation>,
}

impl Tree {
    /// Create a document whose `body` is `viewport_width` pixels wide
    pub fn new(viewport_width: f32) -> Result<Self> {
        let mut taffy = TaffyTree::new();
        let mut style = InlineStyle::new();
        style.insert("width".to_string(), format!("{viewport_width}px"));
        let layout = taffy
            .new_leaf(to_layout_style(&style))
            .map_err(layout_err)?;

        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Element {
            tag: "body".to_string(),
            id: None,
            classes: SmallVec::new(),
            style,
            parent: None,
            children: Vec::new(),
            layout,
        });

        Ok(Self {
            nodes,
            taffy,
            root,
            viewport_width,
            journal: Vec::new(),
        })
    }

    /// Create a detached element
    pub fn create(&mut self, spec: ElementSpec) -> Result<NodeId> {
        let layout = self
            .taffy
            .new_leaf(to_layout_style(&spec.style))
            .map_err(layout_err)?;
        Ok(self.nodes.insert(Element {
            tag: spec.tag,
            id: spec.id,
            classes: spec.classes,
            style: spec.style,
            parent: None,
            children: Vec::new(),
            layout,
        }))
    }

    /// Create an element and append it to `parent`
    pub fn build(&mut self, parent: NodeId, spec: ElementSpec) -> Result<NodeId> {
        let node = self.create(spec)?;
        self.append_child(parent, node)?;
        Ok(node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Position of `node` among its parent's children
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        let parent = self.nodes.get(node)?.parent?;
        self.children(parent).iter().position(|&c| c == node)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|e| e.tag.as_str())
    }

    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).and_then(|e| e.id.as_deref())
    }

    /// All attached elements, container included, in document order
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Number of attached elements, container included
    pub fn attached_count(&self) -> usize {
        self.descendants().len()
    }

    /// Number of live elements, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    pub fn take_journal(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Render the attached tree with geometry, one element per line
    pub fn outline(&mut self) -> String {
        let mut out = String::new();
        for node in self.descendants() {
            let depth = self.depth(node);
            let label = self.describe(node);
            let geometry = match (self.offset(node), self.size(node)) {
                (Ok(o), Ok(s)) => format!(
                    "@({}, {}) {}x{}",
                    o.left, o.top, s.width, s.height
                ),
                _ => "@(?)".to_string(),
            };
            let style = self
                .nodes
                .get(node)
                .map(|e| {
                    e.style
                        .iter()
                        .map(|(k, v)| format!("{k}: {v}"))
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .unwrap_or_default();
            out.push_str(&"  ".repeat(depth));
            out.push_str(&label);
            out.push(' ');
            out.push_str(&geometry);
            if !style.is_empty() {
                out.push_str(" { ");
                out.push_str(&style);
                out.push_str(" }");
            }
            out.push('\n');
        }
        out
    }

    fn depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.nodes.get(current).and_then(|e| e.parent) {
            depth += 1;
            current = parent;
        }
        depth
    }

    fn get(&self, node: NodeId) -> Result<&Element> {
        self.nodes.get(node).ok_or(DomError::NotFound(node))
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.nodes.get(n).and_then(|e| e.parent);
        }
        false
    }

    fn sync_children(&mut self, parent: NodeId) -> Result<()> {
        let element = self.get(parent)?;
        let layouts: Vec<LayoutNode> = element
            .children
            .iter()
            .filter_map(|&c| self.nodes.get(c).map(|e| e.layout))
            .collect();
        let parent_layout = element.layout;
        self.taffy
            .set_children(parent_layout, &layouts)
            .map_err(layout_err)
    }

    fn detach(&mut self, node: NodeId) -> Result<()> {
        let Some(parent) = self.get(node)?.parent else {
            return Ok(());
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(e) = self.nodes.get_mut(node) {
            e.parent = None;
        }
        self.sync_children(parent)
    }

    fn place(&mut self, node: NodeId, slot: Slot) -> Result<()> {
        self.get(node)?;
        if node == self.root {
            return Err(DomError::Container);
        }

        let parent = match slot {
            Slot::First(parent) | Slot::Last(parent) => {
                self.get(parent)?;
                parent
            }
            Slot::Before(reference) | Slot::After(reference) => {
                if reference == node {
                    return Ok(());
                }
                self.get(reference)?
                    .parent
                    .ok_or(DomError::NoParent(reference))?
            }
        };
        if self.is_inclusive_ancestor(node, parent) {
            return Err(DomError::HierarchyRequest { parent, node });
        }

        self.detach(node)?;

        let siblings = &self.get(parent)?.children;
        let index = match slot {
            Slot::First(_) => 0,
            Slot::Last(_) => siblings.len(),
            Slot::Before(reference) => siblings
                .iter()
                .position(|&c| c == reference)
                .unwrap_or(siblings.len()),
            Slot::After(reference) => siblings
                .iter()
                .position(|&c| c == reference)
                .map_or(siblings.len(), |i| i + 1),
        };

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.insert(index, node);
        }
        if let Some(e) = self.nodes.get_mut(node) {
            e.parent = Some(parent);
        }
        self.sync_children(parent)?;
        self.journal.push(Mutation::Insert {
            node,
            parent,
            index,
        });
        Ok(())
    }

    /// Drop a detached subtree, layout nodes included
    fn free(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if let Some(element) = self.nodes.remove(n) {
                stack.extend(element.children);
                if let Err(err) = self.taffy.remove(element.layout) {
                    tracing::trace!("Layout node of {:?} already gone: {}", n, err);
                }
            }
        }
    }

    fn clone_subtree(&mut self, node: NodeId) -> Result<NodeId> {
        let (tag, classes, style, children) = {
            let e = self.get(node)?;
            (
                e.tag.clone(),
                e.classes.clone(),
                e.style.clone(),
                e.children.clone(),
            )
        };
        // ids stay unique: clones never carry one
        let copy = self.create(ElementSpec {
            tag,
            id: None,
            classes,
            style,
        })?;
        for child in children {
            let child_copy = self.clone_subtree(child)?;
            if let Some(c) = self.nodes.get_mut(child_copy) {
                c.parent = Some(copy);
            }
            if let Some(e) = self.nodes.get_mut(copy) {
                e.children.push(child_copy);
            }
        }
        self.sync_children(copy)?;
        Ok(copy)
    }

    fn compute_layout(&mut self) -> Result<()> {
        let root_layout = self.get(self.root)?.layout;
        self.taffy
            .compute_layout(
                root_layout,
                LayoutSize {
                    width: AvailableSpace::Definite(self.viewport_width),
                    height: AvailableSpace::MaxContent,
                },
            )
            .map_err(layout_err)
    }

    fn ensure_attached(&self, node: NodeId) -> Result<()> {
        self.get(node)?;
        if self.is_attached(node) {
            Ok(())
        } else {
            Err(DomError::Detached(node))
        }
    }
}

impl Document for Tree {
    fn container(&self) -> NodeId {
        self.root
    }

    fn query(&self, selector: &str) -> Vec<NodeId> {
        let Ok(selector) = selector.parse::<Selector>() else {
            tracing::debug!("Unsupported selector: {:?}", selector);
            return Vec::new();
        };
        self.descendants()
            .into_iter()
            .filter(|&n| {
                self.nodes
                    .get(n)
                    .is_some_and(|e| selector.matches(&e.tag, e.id.as_deref(), &e.classes))
            })
            .collect()
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node) && self.is_inclusive_ancestor(self.root, node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&c| c == node)?;
        index.checked_sub(1).and_then(|i| siblings.get(i).copied())
    }

    fn offset(&mut self, node: NodeId) -> Result<Offset> {
        self.ensure_attached(node)?;
        self.compute_layout()?;

        let mut offset = Offset::ZERO;
        let mut current = node;
        while current != self.root {
            let element = self.get(current)?;
            let layout = self.taffy.layout(element.layout).map_err(layout_err)?;
            offset.top += layout.location.y;
            offset.left += layout.location.x;
            current = element.parent.ok_or(DomError::Detached(node))?;
        }
        Ok(offset)
    }

    fn size(&mut self, node: NodeId) -> Result<Size> {
        self.ensure_attached(node)?;
        self.compute_layout()?;
        let layout = self
            .taffy
            .layout(self.get(node)?.layout)
            .map_err(layout_err)?;
        Ok(Size::new(layout.size.width, layout.size.height))
    }

    fn clone_node(&mut self, node: NodeId) -> Result<NodeId> {
        self.clone_subtree(node)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.place(child, Slot::Last(parent))
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.place(child, Slot::First(parent))
    }

    fn insert_before(&mut self, reference: NodeId, node: NodeId) -> Result<()> {
        self.place(node, Slot::Before(reference))
    }

    fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<()> {
        self.place(node, Slot::After(reference))
    }

    fn replace(&mut self, old: NodeId, replacement: NodeId) -> Result<()> {
        if old == self.root || replacement == self.root {
            return Err(DomError::Container);
        }
        self.get(replacement)?;
        if old == replacement {
            return Ok(());
        }
        let parent = self.get(old)?.parent.ok_or(DomError::NoParent(old))?;
        if self.is_inclusive_ancestor(replacement, old) {
            return Err(DomError::HierarchyRequest {
                parent,
                node: replacement,
            });
        }

        self.detach(replacement)?;
        let index = self
            .children(parent)
            .iter()
            .position(|&c| c == old)
            .ok_or(DomError::NotFound(old))?;
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children[index] = replacement;
        }
        if let Some(e) = self.nodes.get_mut(replacement) {
            e.parent = Some(parent);
        }
        if let Some(e) = self.nodes.get_mut(old) {
            e.parent = None;
        }
        self.sync_children(parent)?;
        self.free(old);
        self.journal.push(Mutation::Replace { old, replacement });
        Ok(())
    }

    fn remove(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(DomError::Container);
        }
        self.detach(node)?;
        self.free(node);
        self.journal.push(Mutation::Remove { node });
        Ok(())
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.get(node)?.style.get(property).cloned()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: Option<&str>) -> Result<()> {
        let element = self.nodes.get_mut(node).ok_or(DomError::NotFound(node))?;
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        match value {
            Some(v) => {
                element.style.insert(property.to_string(), v.to_string());
            }
            None => {
                element.style.shift_remove(property);
            }
        }
        let layout = element.layout;
        let style = to_layout_style(&element.style);
        self.taffy.set_style(layout, style).map_err(layout_err)?;
        self.journal.push(Mutation::Style {
            node,
            property: property.to_string(),
            value: value.map(str::to_string),
        });
        Ok(())
    }

    fn describe(&self, node: NodeId) -> String {
        let Some(e) = self.nodes.get(node) else {
            return format!("<dropped {:?}>", node);
        };
        let mut label = e.tag.clone();
        if let Some(id) = &e.id {
            label.push('#');
            label.push_str(id);
        }
        for class in &e.classes {
            label.push('.');
            label.push_str(class);
        }
        label
    }
}
