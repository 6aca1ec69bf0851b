use core::fmt;

/// An attribute on a start tag token.
///
/// Both halves are built one character at a time while the tokenizer is in
/// the attribute states, then committed onto the tag as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercase attribute name.
    pub name: String,
    /// Raw value, exactly as written between the delimiters.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// The units the tokenizer hands to its [`TokenSink`](super::TokenSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name attr="value">` or `<name/>`.
    StartTag {
        /// Lowercase tag name.
        name: String,
        /// Set when the tag was written with a trailing `/`.
        self_closing: bool,
        /// Attributes in source order; a repeated name overwrites the
        /// earlier value in place.
        attributes: Vec<Attribute>,
    },

    /// `</name>`, or the end tag synthesized after a self-closing start tag.
    EndTag {
        /// Lowercase tag name.
        name: String,
    },

    /// A single literal character of text content.
    Character {
        /// The character.
        data: char,
    },

    /// A whole `&...;` sequence, passed through undecoded.
    CharacterReference {
        /// The reference text, ampersand and semicolon included.
        data: String,
    },
}

impl Token {
    /// A start tag with an empty name, no attributes, and the self-closing
    /// flag unset.
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// An end tag with an empty name.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
        }
    }

    /// Create a character token with the given character.
    #[must_use]
    pub const fn new_character(c: char) -> Self {
        Self::Character { data: c }
    }

    /// Create a character reference token.
    #[must_use]
    pub const fn new_character_reference(data: String) -> Self {
        Self::CharacterReference { data }
    }

    /// Returns true for both kinds of text fragment.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Character { .. } | Self::CharacterReference { .. })
    }

    /// The end tag that closes this start tag. `None` for anything else.
    #[must_use]
    pub fn matching_end_tag(&self) -> Option<Self> {
        match self {
            Self::StartTag { name, .. } => Some(Self::EndTag { name: name.clone() }),
            _ => None,
        }
    }

    /// Append a character to the tag name. No effect on text tokens.
    pub fn append_to_tag_name(&mut self, c: char) {
        if let Self::StartTag { name, .. } | Self::EndTag { name } = self {
            name.push(c);
        }
    }

    /// Set the self-closing flag. Only start tags carry one.
    pub const fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    /// Commit a finished attribute onto a start tag.
    ///
    /// A name that is already present keeps its position and takes the new
    /// value. End tags carry no attributes, so the attribute is dropped.
    pub fn commit_attribute(&mut self, attribute: Attribute) {
        if let Self::StartTag { attributes, .. } = self {
            if let Some(existing) = attributes.iter_mut().find(|a| a.name == attribute.name) {
                existing.value = attribute.value;
            } else {
                attributes.push(attribute);
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Character { data } => match data {
                '\n' => write!(f, "Character(\\n)"),
                '\t' => write!(f, "Character(\\t)"),
                ' ' => write!(f, "Character(SPACE)"),
                c => write!(f, "Character({c})"),
            },
            Self::CharacterReference { data } => write!(f, "CharacterReference({data})"),
        }
    }
}
