//! Streaming markup tokenizer and tree builder.
//!
//! # Scope
//!
//! This crate implements two cooperating stages:
//! - **Tokenizer** ([`HTMLTokenizer`]): a character-at-a-time state machine
//!   that recognizes start tags, end tags, self-closing tags, quoted and
//!   unquoted attribute values, literal text, and `&...;` references.
//! - **Tree Builder** ([`HTMLTreeBuilder`]): folds the tokens into a
//!   [`DomTree`] with an explicit stack of open nodes.
//!
//! # Not Implemented
//!
//! - Comments, CDATA, DOCTYPE
//! - Script and raw-text content
//! - Character reference decoding
//! - Error recovery beyond reporting

/// Tree construction.
pub mod parser;
/// Tokenizer state machine.
pub mod tokenizer;

use sprig_common::warning::clear_warnings;

pub use parser::{HTMLTreeBuilder, ParseIssue};
pub use sprig_dom::DomTree;
pub use tokenizer::{Attribute, HTMLTokenizer, ParseError, Token, TokenSink, TokenizerState};

/// Tokenize and build `input` in one go.
///
/// A `<` that cannot open a tag (`1 < 2`, `</>`) abandons tokenizing: the
/// rest of `input` is ignored and the tree holds only what came before it.
/// Drive an [`HTMLTokenizer`] directly to [`reset`](HTMLTokenizer::reset)
/// and carry on instead.
///
/// ```
/// let tree = sprig_html::parse_document("<b>bold</b>");
/// let b = tree.first_child(tree.root()).unwrap();
/// assert_eq!(tree.as_element(b).unwrap().tag_name, "b");
/// ```
#[must_use]
pub fn parse_document(input: &str) -> DomTree {
    parse_document_with_issues(input).0
}

/// Like [`parse_document`], also returning every issue reported on the way.
///
/// Each call starts a new document, so previously printed warnings are
/// forgotten and may print again.
#[must_use]
pub fn parse_document_with_issues(input: &str) -> (DomTree, Vec<ParseIssue>) {
    clear_warnings();
    let mut tokenizer = HTMLTokenizer::new(HTMLTreeBuilder::new());
    tokenizer.feed_str(input);
    tokenizer.into_sink().finish_with_issues()
}
