//! A headless page: a flat arena of nodes with just enough DOM semantics
//! (ids, classes, tree containment, inline transforms, focus) to drive
//! [`crate::page::PageInteractions`] without a browser.
//!
//! Selectors support simple compounds only (see [`SimpleSelector`]).

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use super::Page;
use crate::avatar::Rect;
use crate::error::{FxError, Result};
use crate::selector::SimpleSelector;

/// Handle to a node in a [`MemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    parent: Option<NodeId>,
    text: String,
    transform: String,
    attributes: BTreeMap<String, String>,
    rect: Rect,
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    nodes: RefCell<Vec<Node>>,
    focused: Cell<Option<NodeId>>,
    scroll: Cell<f64>,
    year: i32,
    reduced_motion: bool,
    observed: RefCell<BTreeSet<NodeId>>,
    transform_writes: Cell<usize>,
}

impl MemoryPage {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    /// A page whose host reports `prefers-reduced-motion: reduce`.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Append a new `tag` node, optionally under `parent`.
    pub fn add(&self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            parent,
            ..Node::default()
        });
        NodeId(nodes.len() - 1)
    }

    pub fn set_id(&self, node: NodeId, id: &str) -> NodeId {
        self.nodes.borrow_mut()[node.0].id = Some(id.to_string());
        node
    }

    pub fn add_class(&self, node: NodeId, class: &str) -> NodeId {
        self.nodes.borrow_mut()[node.0].classes.insert(class.to_string());
        node
    }

    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.nodes.borrow_mut()[node.0].rect = rect;
    }

    pub fn scroll_to(&self, offset: f64) {
        self.scroll.set(offset);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0].classes.contains(class)
    }

    pub fn text(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].text.clone()
    }

    pub fn transform(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].transform.clone()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attributes.get(name).cloned()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observed.borrow().contains(&node)
    }

    /// Total number of inline transform writes so far.
    pub fn transform_writes(&self) -> usize {
        self.transform_writes.get()
    }

    fn check(&self, node: NodeId) -> Result<()> {
        if node.0 < self.nodes.borrow().len() {
            Ok(())
        } else {
            Err(FxError::dom(format!("no node {}", node.0)))
        }
    }

    fn matches(node: &Node, selector: &SimpleSelector) -> bool {
        selector.matches(&node.tag, node.id.as_deref(), |c| node.classes.contains(c))
    }

    fn is_descendant(nodes: &[Node], ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match nodes[node.0].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }
}

impl Page for MemoryPage {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let sel = SimpleSelector::parse(selector);
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, n)| Self::matches(n, &sel))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    fn query_within(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        let sel = SimpleSelector::parse(selector);
        let nodes = self.nodes.borrow();
        (0..nodes.len())
            .map(NodeId)
            .filter(|&id| id != *root && Self::is_descendant(&nodes, *root, id))
            .filter(|id| Self::matches(&nodes[id.0], &sel))
            .collect()
    }

    fn set_text(&self, el: &NodeId, text: &str) -> Result<()> {
        self.check(*el)?;
        self.nodes.borrow_mut()[el.0].text = text.to_string();
        Ok(())
    }

    fn set_class(&self, el: &NodeId, class: &str, on: bool) -> Result<()> {
        self.check(*el)?;
        let mut nodes = self.nodes.borrow_mut();
        if on {
            nodes[el.0].classes.insert(class.to_string());
        } else {
            nodes[el.0].classes.remove(class);
        }
        Ok(())
    }

    fn set_transform(&self, el: &NodeId, css: &str) -> Result<()> {
        self.check(*el)?;
        self.nodes.borrow_mut()[el.0].transform = css.to_string();
        self.transform_writes.set(self.transform_writes.get() + 1);
        Ok(())
    }

    fn set_attribute(&self, el: &NodeId, name: &str, value: &str) -> Result<()> {
        self.check(*el)?;
        self.nodes.borrow_mut()[el.0]
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn focus(&self, el: &NodeId) -> Result<()> {
        self.check(*el)?;
        self.focused.set(Some(*el));
        Ok(())
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let nodes = self.nodes.borrow();
        node.0 < nodes.len() && Self::is_descendant(&nodes, *ancestor, *node)
    }

    fn bounding_rect(&self, el: &NodeId) -> Rect {
        self.nodes
            .borrow()
            .get(el.0)
            .map(|n| n.rect)
            .unwrap_or_default()
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll.get()
    }

    fn current_year(&self) -> i32 {
        self.year
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn observe(&self, el: &NodeId) -> Result<()> {
        self.check(*el)?;
        self.observed.borrow_mut().insert(*el);
        Ok(())
    }

    fn unobserve(&self, el: &NodeId) -> Result<()> {
        self.observed.borrow_mut().remove(el);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_in_document_order() {
        let page = MemoryPage::new(2024);
        let a = page.add("section", None);
        page.add_class(a, "reveal");
        page.add("div", None);
        let c = page.add("section", None);
        page.add_class(c, "reveal");
        assert_eq!(page.query_selector_all(".reveal"), vec![a, c]);
        assert_eq!(page.query_selector("section"), Some(a));
    }

    #[test]
    fn query_within_scopes_to_subtree() {
        let page = MemoryPage::new(2024);
        let menu = page.add("ul", None);
        let li = page.add("li", Some(menu));
        let inner = page.add("a", Some(li));
        page.add("a", None);
        assert_eq!(page.query_within(&menu, "a"), vec![inner]);
        assert!(page.contains(&menu, &inner));
        assert!(page.contains(&menu, &menu));
        assert!(!page.contains(&li, &menu));
    }

    #[test]
    fn writes_are_recorded() {
        let page = MemoryPage::new(2024);
        let n = page.add("div", None);
        page.set_transform(&n, "scale(2)").unwrap();
        page.set_attribute(&n, "aria-expanded", "true").unwrap();
        page.focus(&n).unwrap();
        assert_eq!(page.transform(n), "scale(2)");
        assert_eq!(page.attribute(n, "aria-expanded").as_deref(), Some("true"));
        assert_eq!(page.focused(), Some(n));
        assert_eq!(page.transform_writes(), 1);
    }

    #[test]
    fn unknown_node_is_dom_error() {
        let page = MemoryPage::new(2024);
        let err = page.set_text(&NodeId(3), "x").unwrap_err();
        assert!(err.to_string().contains("no node 3"));
    }
}
