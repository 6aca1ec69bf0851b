//! Tree construction from the token stream.

/// Open-element stack and tree folding.
pub mod tree_builder;

pub use tree_builder::{HTMLTreeBuilder, ParseIssue};
