//! Helper functions for the tokenizer.
//!
//! This module contains utility functions used throughout the state handlers:
//! - State transitions ("switch to", "abandon")
//! - Token emission, including the synthesized end tag of a self-closing tag
//! - Attribute building and committing
//! - Error reporting

use super::error::ParseError;
use super::machine::{HTMLTokenizer, TokenizerContext, TokenizerState};
use super::sink::TokenSink;
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<S> {
    /// Transitions to a new state. The next character is handled there.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// Tab, line feed, form feed, or space. The one whitespace definition
    /// every state uses.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }

    /// Report `c`, drop whatever tag was in progress, and stop consuming
    /// input until [`reset`](Self::reset). No attempt is made to find the
    /// next tag boundary.
    pub(super) fn abandon(&mut self, c: char) {
        self.report_error(c);
        self.context = TokenizerContext::default();
        self.switch_to(TokenizerState::Abandoned);
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<S> {
    /// Hand a token to the sink.
    pub(super) fn emit(&mut self, token: Token) {
        self.sink.process_token(token);
    }

    /// Begin a start or end tag whose name opens with `first`.
    pub(super) fn start_tag_token(&mut self, mut token: Token, first: char) {
        token.append_to_tag_name(first.to_ascii_lowercase());
        self.context.current_token = Some(token);
        self.switch_to(TokenizerState::TagName);
    }

    /// Emit the current tag and return to the data state.
    ///
    /// A self-closing start tag is followed immediately by an end tag of the
    /// same name, so consumers never see an unbalanced self-closing tag.
    pub(super) fn emit_current_tag(&mut self) {
        self.context.current_attribute = None;
        if let Some(token) = self.context.current_token.take() {
            let synthesized_end = match &token {
                Token::StartTag {
                    self_closing: true, ..
                } => token.matching_end_tag(),
                _ => None,
            };
            self.emit(token);
            if let Some(end) = synthesized_end {
                self.emit(end);
            }
        }
        self.switch_to(TokenizerState::Data);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<S> {
    /// Append to the value of the attribute under construction.
    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.context.current_attribute.as_mut() {
            attr.value.push(c);
        }
    }

    /// Move the attribute under construction onto the current tag.
    pub(super) fn commit_current_attribute(&mut self) {
        let Some(attribute) = self.context.current_attribute.take() else {
            return;
        };
        if let Some(token) = self.context.current_token.as_mut() {
            token.commit_attribute(attribute);
        }
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<S> {
    /// Report `c` as unexpected in the current state. The state is left
    /// unchanged and the character is dropped.
    pub(super) fn report_error(&mut self, c: char) {
        let error = ParseError::UnexpectedCharacter {
            character: c,
            state: self.state,
            position: self.position,
        };
        self.sink.parse_error(error);
    }
}
