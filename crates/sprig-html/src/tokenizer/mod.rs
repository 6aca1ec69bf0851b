//! Character-level tokenizer.
//!
//! Turns a stream of characters, fed one at a time, into start tag, end tag,
//! and text fragment tokens delivered to a [`TokenSink`].

/// Errors reported through the sink's error hook.
pub mod error;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// The state machine and its per-state handlers.
pub mod machine;
/// The consumer trait the tokenizer emits into.
pub mod sink;
/// Token types produced by the tokenizer.
pub mod token;

pub use error::ParseError;
pub use machine::{HTMLTokenizer, TokenizerState};
pub use sink::TokenSink;
pub use token::{Attribute, Token};
