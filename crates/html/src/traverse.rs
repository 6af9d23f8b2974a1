use crate::{Id, Node};

/// Assign ids to every node still carrying `Id::UNASSIGNED`, starting at `*next`.
pub fn assign_node_ids(root: &mut Node, next: &mut u32) {
    // only assign if currently unset
    if root.id() == Id::UNASSIGNED {
        root.set_id(Id(*next));
        *next = next.wrapping_add(1);
    }
    if let Some(children) = root.children_mut() {
        for c in children {
            assign_node_ids(c, next);
        }
    }
}

/// Largest id present in the subtree.
pub fn max_node_id(node: &Node) -> u32 {
    let own = node.id().0;
    node.children()
        .map(|children| children.iter().map(max_node_id).max().unwrap_or(0))
        .unwrap_or(0)
        .max(own)
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children()?
        .iter()
        .find_map(|c| find_node_by_id(c, id))
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_node_by_id_mut(c, id))
}

/// Parent of `id` together with the child index of `id` within it.
pub fn find_parent(node: &Node, id: Id) -> Option<(&Node, usize)> {
    let children = node.children()?;
    if let Some(index) = children.iter().position(|c| c.id() == id) {
        return Some((node, index));
    }
    children.iter().find_map(|c| find_parent(c, id))
}

/// Ids from `root` down to and including `id`, or empty when `id` is not in the subtree.
pub fn path_to(root: &Node, id: Id) -> Vec<Id> {
    fn walk(node: &Node, id: Id, path: &mut Vec<Id>) -> bool {
        path.push(node.id());
        if node.id() == id {
            return true;
        }
        if let Some(children) = node.children() {
            for c in children {
                if walk(c, id, path) {
                    return true;
                }
            }
        }
        path.pop();
        false
    }
    let mut path = Vec::new();
    walk(root, id, &mut path);
    path
}

/// Whether `id` is `node` or one of its descendants.
pub fn contains(node: &Node, id: Id) -> bool {
    find_node_by_id(node, id).is_some()
}

/// First element whose `id` attribute equals `dom_id`, in document order.
pub fn find_by_dom_id(node: &Node, dom_id: &str) -> Option<Id> {
    if node.attr("id") == Some(dom_id) {
        return Some(node.id());
    }
    node.children()?
        .iter()
        .find_map(|c| find_by_dom_id(c, dom_id))
}

/// Elements carrying `class`, in document order.
pub fn collect_by_class(node: &Node, class: &str, out: &mut Vec<Id>) {
    if node.has_class(class) {
        out.push(node.id());
    }
    if let Some(children) = node.children() {
        for c in children {
            collect_by_class(c, class, out);
        }
    }
}

/// Merge adjacent text nodes and drop empty ones, like the DOM `normalize()`.
pub fn normalize_text(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    for mut child in children.drain(..) {
        normalize_text(&mut child);
        if let Node::Text { text, .. } = &child {
            if text.is_empty() {
                continue;
            }
            if let Some(Node::Text { text: prev, .. }) = merged.last_mut() {
                prev.push_str(text);
                continue;
            }
        }
        merged.push(child);
    }
    *children = merged;
}
