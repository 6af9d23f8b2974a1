//! Tree construction from the token stream.
//!
//! Open elements live on an explicit stack, so nesting depth is bounded by memory rather
//! than by the call stack. No HTML5 insertion modes: an end tag closes the nearest open
//! element with that name, and end tags with no open match are dropped.

use crate::tokenizer::tokenize;
use crate::types::{Id, Node, Token};

/// Parse a full document. Ids are left unassigned.
pub fn build_dom(input: &str) -> Node {
    build_from_tokens(tokenize(input))
}

/// Parse an inline fragment (the inner HTML of an element) into sibling nodes.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    match build_dom(input) {
        Node::Document { children, .. } => children,
        other => vec![other],
    }
}

fn push_child(parent: &mut Node, child: Node) {
    if let Some(children) = parent.children_mut() {
        children.push(child);
    }
}

/// Append text to `parent`, extending its last child when that is text already. The
/// tokenizer may split one run (`a < b`) into several tokens.
fn push_text(parent: &mut Node, text: String) {
    let Some(children) = parent.children_mut() else {
        return;
    };
    match children.last_mut() {
        Some(Node::Text { text: last, .. }) => last.push_str(&text),
        _ => children.push(Node::text(text)),
    }
}

/// Pop the top open element into its parent.
fn close_top(open: &mut Vec<Node>) {
    if open.len() < 2 {
        return;
    }
    if let Some(done) = open.pop() {
        if let Some(parent) = open.last_mut() {
            push_child(parent, done);
        }
    }
}

pub(crate) fn build_from_tokens(tokens: Vec<Token>) -> Node {
    // open[0] is the document; it is never closed by an end tag
    let mut open = vec![Node::Document {
        id: Id::UNASSIGNED,
        doctype: None,
        children: Vec::new(),
    }];

    for token in tokens {
        match token {
            Token::Doctype(name) => {
                if let Some(Node::Document { doctype, .. }) = open.first_mut() {
                    *doctype = Some(name);
                }
            }
            Token::Comment(text) => {
                if let Some(top) = open.last_mut() {
                    push_child(top, Node::Comment { id: Id::UNASSIGNED, text });
                }
            }
            Token::Text(text) => {
                if !text.is_empty() {
                    if let Some(top) = open.last_mut() {
                        push_text(top, text);
                    }
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = Node::element(&name, attributes);
                if self_closing {
                    if let Some(top) = open.last_mut() {
                        push_child(top, element);
                    }
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                let matching = open
                    .iter()
                    .skip(1)
                    .rposition(|n| n.tag_name().is_some_and(|t| t.eq_ignore_ascii_case(&name)));
                if let Some(depth) = matching {
                    // skip(1) shifted positions by one
                    while open.len() > depth + 1 {
                        close_top(&mut open);
                    }
                }
            }
        }
    }

    while open.len() > 1 {
        close_top(&mut open);
    }
    open.pop().unwrap_or(Node::Document {
        id: Id::UNASSIGNED,
        doctype: None,
        children: Vec::new(),
    })
}
