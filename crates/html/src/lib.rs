//! Minimal owned DOM for inline rich content: tokenizer, tree builder, serializer and
//! id-based traversal.
pub mod traverse;

mod document;
mod dom_builder;
mod entities;
mod serialize;
mod tokenizer;
mod types;

pub use crate::document::Document;
pub use crate::dom_builder::{build_dom, parse_fragment};
pub use crate::serialize::{fragment_html, inner_html, outer_html};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Id, Node, NodeId, Token};
