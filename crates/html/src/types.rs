pub type NodeId = u32;

/// Node identity within a [`Document`](crate::Document).
///
/// `Id(0)` is the "unassigned" sentinel: freshly built nodes carry it until the owning
/// document adopts them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const UNASSIGNED: Id = Id(0);
}

#[derive(Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document {
        id: Id,
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    /// New element with an unassigned id.
    pub fn element(name: &str, attributes: Vec<(String, Option<String>)>) -> Node {
        Node::Element {
            id: Id::UNASSIGNED,
            name: name.to_ascii_lowercase(),
            attributes,
            children: Vec::new(),
        }
    }

    /// New text node with an unassigned id.
    pub fn text(text: impl Into<String>) -> Node {
        Node::Text {
            id: Id::UNASSIGNED,
            text: text.into(),
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Document { id, .. } => *id = new_id,
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
            Node::Comment { id, .. } => *id = new_id,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } => Some(children),
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Lower-case tag name for elements.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element_named(&self, tag: &str) -> bool {
        self.tag_name().is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        let Node::Element { attributes, .. } = self else {
            return None;
        };
        attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// Whitespace-separated token lookup, e.g. `class="a b"`.
    pub fn attr_has_token(&self, key: &str, token: &str) -> bool {
        self.attr(key)
            .is_some_and(|v| v.split_ascii_whitespace().any(|t| t == token))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr_has_token("class", class)
    }

    /// Sets (or replaces) an attribute. No-op on non-elements.
    pub fn set_attr(&mut self, key: &str, value: Option<String>) {
        let Node::Element { attributes, .. } = self else {
            return;
        };
        if let Some(slot) = attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            slot.1 = value;
        } else {
            attributes.push((key.to_ascii_lowercase(), value));
        }
    }

    /// Removes an attribute, returning whether it was present.
    pub fn remove_attr(&mut self, key: &str) -> bool {
        let Node::Element { attributes, .. } = self else {
            return false;
        };
        let before = attributes.len();
        attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        before != attributes.len()
    }

    /// Concatenated text of the subtree.
    pub fn text_content(&self) -> String {
        fn walk(node: &Node, out: &mut String) {
            match node {
                Node::Text { text, .. } => out.push_str(text),
                Node::Document { children, .. } | Node::Element { children, .. } => {
                    for c in children {
                        walk(c, out);
                    }
                }
                Node::Comment { .. } => {}
            }
        }
        let mut out = String::new();
        walk(self, &mut out);
        out
    }
}
