use std::fmt;

/// An attribute on a tag token.
///
/// Names are lower-cased; values are kept exactly as written, including any
/// surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    /// Raw value, empty when the attribute had no `=`.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// The tokenizer emits tokens of these types to the tree builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of text with entities already decoded.
    Text {
        /// Decoded text.
        data: String,
    },

    /// A start or end tag.
    ///
    /// End tags keep their leading `/` in `name` (`"/p"`), so the tree builder
    /// can tell them apart from start tags by the name alone.
    Tag {
        /// Lower-cased tag name, with a leading `/` for end tags.
        name: String,
        /// Attributes in source order.
        attributes: Vec<Attribute>,
    },
}

impl Token {
    /// Create a text token.
    #[must_use]
    pub fn new_text(data: impl Into<String>) -> Self {
        Self::Text { data: data.into() }
    }

    /// Create a tag token with no attributes.
    #[must_use]
    pub fn new_tag(name: impl Into<String>) -> Self {
        Self::Tag {
            name: name.into(),
            attributes: Vec::new(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { data } => write!(f, "Text({data:?})"),
            Self::Tag { name, attributes } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    if attr.value.is_empty() {
                        write!(f, " {}", attr.name)?;
                    } else {
                        write!(f, " {}={}", attr.name, attr.value)?;
                    }
                }
                write!(f, ">")
            }
        }
    }
}
