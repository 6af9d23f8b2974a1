use crate::entities::{escape_attr, escape_text};
use crate::tokenizer::is_void_element;
use crate::Node;

/// Serialize the children of `node`, like the DOM `innerHTML` getter.
pub fn inner_html(node: &Node) -> String {
    let mut out = String::new();
    if let Some(children) = node.children() {
        for c in children {
            write_node(c, &mut out);
        }
    }
    out
}

/// Serialize `node` itself, like the DOM `outerHTML` getter.
pub fn outer_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

pub fn fragment_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for n in nodes {
        write_node(n, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Document {
            doctype, children, ..
        } => {
            if let Some(dt) = doctype {
                out.push_str("<!");
                out.push_str(dt);
                out.push('>');
            }
            for c in children {
                write_node(c, out);
            }
        }
        Node::Element {
            name,
            attributes,
            children,
            ..
        } => {
            out.push('<');
            out.push_str(name);
            for (k, v) in attributes {
                out.push(' ');
                out.push_str(k);
                if let Some(v) = v {
                    out.push_str("=\"");
                    escape_attr(v, out);
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            let rawtext = name == "script" || name == "style";
            for c in children {
                match c {
                    Node::Text { text, .. } if rawtext => out.push_str(text),
                    _ => write_node(c, out),
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Text { text, .. } => escape_text(text, out),
        Node::Comment { text, .. } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}
