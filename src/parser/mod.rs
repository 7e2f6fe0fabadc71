//! Parser for typed route templates

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::parse_syntax;
