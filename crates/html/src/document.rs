//! Owned document with stable node ids.
//!
//! Invariants:
//! - Every node reachable from the root carries a non-zero, unique `Id`.
//! - Ids are never reused within one document: nodes created later always receive
//!   ids above every id handed out before.

use crate::dom_builder::build_dom;
use crate::traverse::{
    assign_node_ids, collect_by_class, contains, find_by_dom_id, find_node_by_id,
    find_node_by_id_mut, find_parent, max_node_id, path_to,
};
use crate::{Id, Node};

#[derive(Clone, Debug)]
pub struct Document {
    root: Node,
    next_id: u32,
}

impl Document {
    pub fn parse(input: &str) -> Self {
        Self::from_root(build_dom(input))
    }

    pub fn from_root(mut root: Node) -> Self {
        let mut next_id = max_node_id(&root).wrapping_add(1).max(1);
        assign_node_ids(&mut root, &mut next_id);
        Self { root, next_id }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> Id {
        self.root.id()
    }

    /// Give every unassigned node under `id` a fresh id. Call after splicing in new nodes.
    pub fn adopt(&mut self, id: Id) {
        let mut next = self.next_id;
        if let Some(node) = find_node_by_id_mut(&mut self.root, id) {
            assign_node_ids(node, &mut next);
        }
        self.next_id = next;
    }

    /// Assign an id to a detached node before it is inserted.
    pub fn adopt_detached(&mut self, node: &mut Node) {
        assign_node_ids(node, &mut self.next_id);
    }

    pub fn get(&self, id: Id) -> Option<&Node> {
        find_node_by_id(&self.root, id)
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut Node> {
        find_node_by_id_mut(&mut self.root, id)
    }

    /// Parent id of `id` and the child index of `id` within it.
    pub fn parent_of(&self, id: Id) -> Option<(Id, usize)> {
        find_parent(&self.root, id).map(|(parent, index)| (parent.id(), index))
    }

    /// Whether `descendant` is `ancestor` or lies inside it.
    pub fn is_descendant(&self, descendant: Id, ancestor: Id) -> bool {
        self.get(ancestor)
            .is_some_and(|node| contains(node, descendant))
    }

    /// Ids from the root down to `id`, inclusive; empty when `id` is not in the document.
    pub fn ancestry(&self, id: Id) -> Vec<Id> {
        path_to(&self.root, id)
    }

    pub fn element_by_dom_id(&self, dom_id: &str) -> Option<Id> {
        find_by_dom_id(&self.root, dom_id)
    }

    pub fn elements_by_class(&self, class: &str) -> Vec<Id> {
        let mut out = Vec::new();
        collect_by_class(&self.root, class, &mut out);
        out
    }

    /// First element with the given tag name, in document order.
    pub fn first_element_named(&self, tag: &str) -> Option<Id> {
        fn walk(node: &Node, tag: &str) -> Option<Id> {
            if node.is_element_named(tag) {
                return Some(node.id());
            }
            node.children()?.iter().find_map(|c| walk(c, tag))
        }
        walk(&self.root, tag)
    }

    /// Append `node` as the last child of `parent`, assigning ids. Returns the new node's id.
    pub fn append_child(&mut self, parent: Id, mut node: Node) -> Option<Id> {
        self.adopt_detached(&mut node);
        let id = node.id();
        let children = self.get_mut(parent)?.children_mut()?;
        children.push(node);
        Some(id)
    }

    /// Replace the children of `parent` with a parsed fragment, like setting `innerHTML`.
    pub fn set_inner_html(&mut self, parent: Id, html: &str) -> bool {
        let mut nodes = crate::parse_fragment(html);
        for node in &mut nodes {
            self.adopt_detached(node);
        }
        let Some(children) = self.get_mut(parent).and_then(Node::children_mut) else {
            return false;
        };
        *children = nodes;
        true
    }

    pub fn inner_html(&self, id: Id) -> Option<String> {
        self.get(id).map(crate::inner_html)
    }
}
