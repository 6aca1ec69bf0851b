//! The consumer side of the tokenizer.

use sprig_common::warning::warn_once;

use super::error::ParseError;
use super::token::Token;

/// Receives tokens, synchronously, as the tokenizer recognizes them.
///
/// The tokenizer owns its sink; [`HTMLTokenizer::into_sink`](super::HTMLTokenizer::into_sink)
/// hands it back once the caller is done feeding input.
pub trait TokenSink {
    /// Called once per token, in input order, before `feed` returns.
    fn process_token(&mut self, token: Token);

    /// The error reporting hook. The default logs the error once via the
    /// shared warning system.
    fn parse_error(&mut self, error: ParseError) {
        log_parse_error(&error);
    }
}

/// Log a tokenizer error once through the shared warning system.
pub(crate) fn log_parse_error(error: &ParseError) {
    warn_once(
        "HTML Tokenizer",
        &format!(
            "{error} in {} state at position {}",
            error.state(),
            error.position()
        ),
    );
}

/// Collects tokens; errors go to the default hook.
impl TokenSink for Vec<Token> {
    fn process_token(&mut self, token: Token) {
        self.push(token);
    }
}

impl<S: TokenSink + ?Sized> TokenSink for &mut S {
    fn process_token(&mut self, token: Token) {
        (**self).process_token(token);
    }

    fn parse_error(&mut self, error: ParseError) {
        (**self).parse_error(error);
    }
}
