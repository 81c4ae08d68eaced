#![allow(clippy::module_inception)]

use std::rc::Rc;

pub mod errors;
pub mod expression;
pub mod macros;
pub mod scope;
pub mod types;

extern crate regex;

/// A byte offset into a named source file, as reported by the frontend.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    /// Position for nodes synthesized by transformation passes rather than
    /// read from a source file.
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

/// Source provenance attached to expression nodes.
///
/// A pass may drop the span of a rewritten node (see
/// `Expression::invalidate_source`) so that the node is re-rendered through
/// the stringifier instead of being copied verbatim from the original source.
#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}
