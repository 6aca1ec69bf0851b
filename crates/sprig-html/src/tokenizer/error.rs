//! Errors reported by the tokenizer.

use thiserror::Error;

use super::machine::TokenizerState;

/// A character the current tokenizer state has no transition for.
///
/// Errors never abort tokenizing: they are handed to
/// [`TokenSink::parse_error`](super::TokenSink::parse_error) and the machine
/// carries on according to its continuation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The only error kind.
    #[error("unexpected character '{character}'")]
    UnexpectedCharacter {
        /// The offending input character.
        character: char,
        /// The state that rejected it.
        state: TokenizerState,
        /// Zero-based character offset since construction or the last reset.
        position: usize,
    },
}

impl ParseError {
    /// The offending input character.
    #[must_use]
    pub const fn character(&self) -> char {
        match self {
            Self::UnexpectedCharacter { character, .. } => *character,
        }
    }

    /// The state that rejected the character.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        match self {
            Self::UnexpectedCharacter { state, .. } => *state,
        }
    }

    /// Character offset of the error.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { position, .. } => *position,
        }
    }
}
