//! Shared types for the PVM reduction machine.
//!
//! This crate defines the AST node types, literal values and the immutable
//! environment threaded through statement reduction. It knows nothing about
//! how nodes are reduced; see `pvm-eval` for that.

mod env;
mod value;
pub mod ast;

pub use ast::{BinOp, Node, UnaryOp};
pub use env::Environment;
pub use value::{Value, ValueKind};
