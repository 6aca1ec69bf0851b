use strum_macros::{Display, EnumIter};

use super::sink::TokenSink;
use super::token::{Attribute, Token};

/// The tokenizer state machine. One variant per named state; the machine
/// starts in [`TokenizerState::Data`] and has no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TokenizerState {
    /// Text content. `&` and `<` leave it; everything else is emitted.
    Data,
    /// Inside `&...`, accumulating until `;`.
    CharacterReference,
    /// Just consumed `<`.
    TagOpen,
    /// Just consumed `</`.
    EndTagOpen,
    /// Reading the tag name.
    TagName,
    /// Between attributes, or after the tag name.
    BeforeAttributeName,
    /// Reading an attribute name.
    AttributeName,
    /// Just consumed `=`.
    BeforeAttributeValue,
    /// Inside `"..."`.
    AttributeValueDoubleQuoted,
    /// Inside `'...'`.
    AttributeValueSingleQuoted,
    /// Reading a value with no quotes.
    AttributeValueUnquoted,
    /// Just consumed the `/` of `/>`.
    SelfClosingStartTag,
    /// A tag could not be opened. All input is ignored until
    /// [`HTMLTokenizer::reset`].
    Abandoned,
}

/// Scratch state that only exists to bridge transitions: the tag under
/// construction, its attribute under construction, and the pending
/// character reference.
#[derive(Debug, Default)]
pub(super) struct TokenizerContext {
    pub(super) current_token: Option<Token>,
    pub(super) current_attribute: Option<Attribute>,
    pub(super) character_reference: String,
}

/// Push-driven tokenizer: one character in per [`feed`](Self::feed), zero
/// or more tokens out to the registered [`TokenSink`] before it returns.
///
/// ```
/// use sprig_html::{HTMLTokenizer, Token};
///
/// let mut tokenizer = HTMLTokenizer::new(Vec::<Token>::new());
/// tokenizer.feed_str("<p>hi</p>");
/// let tokens = tokenizer.into_sink();
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[3], Token::EndTag { name: "p".to_string() });
/// ```
#[derive(Debug)]
pub struct HTMLTokenizer<S: TokenSink> {
    pub(super) state: TokenizerState,
    pub(super) context: TokenizerContext,
    pub(super) sink: S,
    /// Index of the character currently being consumed.
    pub(super) position: usize,
}

impl<S: TokenSink> HTMLTokenizer<S> {
    /// Create a tokenizer in the data state that emits into `sink`.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            state: TokenizerState::Data,
            context: TokenizerContext::default(),
            sink,
            position: 0,
        }
    }

    /// Advance the state machine by exactly one input character.
    pub fn feed(&mut self, c: char) {
        match self.state {
            TokenizerState::Data => self.handle_data_state(c),
            TokenizerState::CharacterReference => self.handle_character_reference_state(c),
            TokenizerState::TagOpen => self.handle_tag_open_state(c),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(c),
            TokenizerState::TagName => self.handle_tag_name_state(c),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(c),
            TokenizerState::AttributeName => self.handle_attribute_name_state(c),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(c),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state(c, '"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state(c, '\'');
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(c),
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(c),
            TokenizerState::Abandoned => {}
        }
        self.position += 1;
    }

    /// Feed every character of `input`, in order.
    pub fn feed_str(&mut self, input: &str) {
        for c in input.chars() {
            self.feed(c);
        }
    }

    /// Return to the data state, discarding any partially built token,
    /// attribute, or character reference. The sink is kept as is.
    pub fn reset(&mut self) {
        self.state = TokenizerState::Data;
        self.context = TokenizerContext::default();
        self.position = 0;
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// The registered sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the registered sink.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Stop tokenizing and hand back the sink. Anything half built is
    /// dropped.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn handle_data_state(&mut self, c: char) {
        match c {
            '&' => {
                self.context.character_reference.clear();
                self.context.character_reference.push(c);
                self.switch_to(TokenizerState::CharacterReference);
            }
            '<' => self.switch_to(TokenizerState::TagOpen),
            _ => self.emit(Token::new_character(c)),
        }
    }

    /// The reference is opaque: whatever sits between `&` and `;` is kept
    /// verbatim and emitted as one unit.
    fn handle_character_reference_state(&mut self, c: char) {
        self.context.character_reference.push(c);
        if c == ';' {
            let data = core::mem::take(&mut self.context.character_reference);
            self.emit(Token::new_character_reference(data));
            self.switch_to(TokenizerState::Data);
        }
    }

    fn handle_tag_open_state(&mut self, c: char) {
        match c {
            '/' => self.switch_to(TokenizerState::EndTagOpen),
            c if c.is_ascii_alphabetic() => {
                self.start_tag_token(Token::new_start_tag(), c);
            }
            _ => self.abandon(c),
        }
    }

    fn handle_end_tag_open_state(&mut self, c: char) {
        if c.is_ascii_alphabetic() {
            self.start_tag_token(Token::new_end_tag(), c);
        } else {
            // `</>` included
            self.abandon(c);
        }
    }

    fn handle_tag_name_state(&mut self, c: char) {
        match c {
            '/' => self.switch_to(TokenizerState::SelfClosingStartTag),
            c if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            '>' => self.emit_current_tag(),
            c if c.is_ascii_alphabetic() => {
                if let Some(token) = self.context.current_token.as_mut() {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
            }
            _ => self.report_error(c),
        }
    }

    fn handle_before_attribute_name_state(&mut self, c: char) {
        match c {
            c if Self::is_whitespace_char(c) => {}
            '/' => self.switch_to(TokenizerState::SelfClosingStartTag),
            '>' => self.emit_current_tag(),
            '"' | '\'' | '<' => self.report_error(c),
            _ => {
                self.context.current_attribute = Some(Attribute::new(
                    String::from(c.to_ascii_lowercase()),
                    String::new(),
                ));
                self.switch_to(TokenizerState::AttributeName);
            }
        }
    }

    /// A name without `=` is committed with an empty value when whitespace,
    /// `/` or `>` ends it.
    fn handle_attribute_name_state(&mut self, c: char) {
        match c {
            '/' => {
                self.commit_current_attribute();
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            '=' => self.switch_to(TokenizerState::BeforeAttributeValue),
            c if Self::is_whitespace_char(c) => {
                self.commit_current_attribute();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            '>' => {
                self.commit_current_attribute();
                self.emit_current_tag();
            }
            _ => {
                if let Some(attr) = self.context.current_attribute.as_mut() {
                    attr.name.push(c.to_ascii_lowercase());
                }
            }
        }
    }

    fn handle_before_attribute_value_state(&mut self, c: char) {
        match c {
            '"' => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            '\'' => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            c if Self::is_whitespace_char(c) => {}
            _ => {
                self.append_to_attribute_value(c);
                self.switch_to(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    /// Shared by the single- and double-quoted value states; `quote` is the
    /// delimiter that opened the value.
    fn handle_attribute_value_quoted_state(&mut self, c: char, quote: char) {
        if c == quote {
            self.commit_current_attribute();
            self.switch_to(TokenizerState::BeforeAttributeName);
        } else {
            self.append_to_attribute_value(c);
        }
    }

    fn handle_attribute_value_unquoted_state(&mut self, c: char) {
        match c {
            c if Self::is_whitespace_char(c) => {
                self.commit_current_attribute();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            '>' => {
                self.commit_current_attribute();
                self.emit_current_tag();
            }
            _ => self.append_to_attribute_value(c),
        }
    }

    fn handle_self_closing_start_tag_state(&mut self, c: char) {
        if c == '>' {
            if let Some(token) = self.context.current_token.as_mut() {
                token.set_self_closing();
            }
            self.emit_current_tag();
        } else {
            self.report_error(c);
        }
    }
}
