use sprig_common::warning::warn_once;
use sprig_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::sink::log_parse_error;
use crate::tokenizer::{Attribute, ParseError, Token, TokenSink};

/// A problem noticed while building the tree.
///
/// Tokenizer errors arrive through [`TokenSink::parse_error`] and are
/// recorded as errors; things the builder tolerates on its own (a stray end
/// tag with nothing left to close) are recorded as warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description.
    pub message: String,
    /// Number of tokens the builder had processed when this was recorded.
    pub token_index: usize,
    /// True for tokenizer errors, false for builder warnings.
    pub is_error: bool,
}

/// Folds a token stream into a [`DomTree`] using a stack of open nodes.
///
/// The bottom of the stack is always the Document. The top is the node that
/// receives the next child; when it is a Text node, further text fragments
/// are appended to it instead.
///
/// ```
/// use sprig_html::{HTMLTokenizer, HTMLTreeBuilder};
///
/// let mut tokenizer = HTMLTokenizer::new(HTMLTreeBuilder::new());
/// tokenizer.feed_str("<p>hi</p>");
/// let tree = tokenizer.into_sink().finish();
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct HTMLTreeBuilder {
    /// The tree under construction. `NodeId::ROOT` is the Document.
    tree: DomTree,

    /// Stack of open nodes, bottom first.
    stack_of_open_elements: Vec<NodeId>,

    /// Issues recorded so far.
    issues: Vec<ParseIssue>,

    /// Tokens submitted so far.
    token_index: usize,
}

impl HTMLTreeBuilder {
    /// Create a builder holding an empty Document.
    #[must_use]
    pub fn new() -> Self {
        let tree = DomTree::new();
        let root = tree.root();
        Self {
            tree,
            stack_of_open_elements: vec![root],
            issues: Vec::new(),
            token_index: 0,
        }
    }

    /// Fold one token into the tree.
    pub fn submit(&mut self, token: Token) {
        // Any non-text token closes text accumulation.
        if !token.is_text() {
            self.close_open_text();
        }

        match token {
            Token::Character { data } => {
                let mut buf = [0; 4];
                self.insert_character_data(data.encode_utf8(&mut buf));
            }
            Token::CharacterReference { data } => {
                self.insert_character_data(&data);
            }
            Token::StartTag {
                name, attributes, ..
            } => {
                self.insert_element(name, attributes);
            }
            // End tags close whatever is on top; the name is not checked.
            Token::EndTag { name } => {
                if self.stack_of_open_elements.len() > 1 {
                    let _ = self.stack_of_open_elements.pop();
                } else {
                    self.parse_warning(&format!("end tag </{name}> with no open element"));
                }
            }
        }
        self.token_index += 1;
    }

    /// The tree built so far. Complete once every end tag has been consumed.
    #[must_use]
    pub const fn output(&self) -> &DomTree {
        &self.tree
    }

    /// The stack of open nodes, Document first.
    #[must_use]
    pub fn open_elements(&self) -> &[NodeId] {
        &self.stack_of_open_elements
    }

    /// Get all parse issues encountered so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Consume the builder and return the tree.
    #[must_use]
    pub fn finish(self) -> DomTree {
        self.tree
    }

    /// Consume the builder and return both the tree and any parse issues.
    #[must_use]
    pub fn finish_with_issues(self) -> (DomTree, Vec<ParseIssue>) {
        (self.tree, self.issues)
    }

    /// The node that receives the next child.
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    /// Pop the top of the stack if it is a Text node.
    fn close_open_text(&mut self) {
        if self.tree.is_text(self.current_node()) {
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// Append to the open Text node, or open a new one under the current node.
    fn insert_character_data(&mut self, data: &str) {
        let current = self.current_node();
        if let Some(text) = self.tree.text_mut(current) {
            text.push_str(data);
            return;
        }
        let text = self
            .tree
            .append_new(current, NodeType::Text(data.to_string()));
        self.stack_of_open_elements.push(text);
    }

    /// Create an element for a start tag, append it to the current node, and
    /// make it the current node.
    fn insert_element(&mut self, tag_name: String, attributes: Vec<Attribute>) {
        let attrs: AttributesMap = attributes
            .into_iter()
            .map(|attr| (attr.name, attr.value))
            .collect();
        let parent = self.current_node();
        let element = self.tree.append_new(
            parent,
            NodeType::Element(ElementData::new(tag_name, attrs)),
        );
        self.stack_of_open_elements.push(element);
    }

    /// Record a parse warning (for tolerated but suspicious input).
    fn parse_warning(&mut self, message: &str) {
        warn_once("HTML Tree Builder", message);
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index: self.token_index,
            is_error: false,
        });
    }
}

impl Default for HTMLTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSink for HTMLTreeBuilder {
    fn process_token(&mut self, token: Token) {
        self.submit(token);
    }

    fn parse_error(&mut self, error: ParseError) {
        log_parse_error(&error);
        self.issues.push(ParseIssue {
            message: error.to_string(),
            token_index: self.token_index,
            is_error: true,
        });
    }
}
