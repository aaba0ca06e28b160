use std::fmt;

use serde::{Serialize, Serializer};

/// A region of source text. `start` and `end` are byte offsets; `line` and
/// `column` are 1-based and point at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Shape of a scanned tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<Name ...>`
    Open,
    /// `<Name .../>`
    SelfClosing,
    /// `</Name>`
    Close,
}

/// One textual tag occurrence, borrowed from the scanned source.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag<'a> {
    pub name: &'a str,
    /// Raw text between the name and `>` (or `/>`). Always empty for
    /// closing tags.
    pub attrs: &'a str,
    pub kind: TagKind,
    pub span: Span,
}

impl Tag<'_> {
    /// Whether this tag opens an element (open or self-closing form).
    pub fn is_opening(&self) -> bool {
        matches!(self.kind, TagKind::Open | TagKind::SelfClosing)
    }
}

/// One attribute recognised by [`crate::AttrScanner`].
///
/// Spans are relative to the attribute text, not the enclosing document.
#[derive(Debug, Clone, PartialEq)]
pub enum Attr<'a> {
    /// Bare word: `center`
    Flag { name: &'a str, span: Span },
    /// `key="value"`
    Str {
        name: &'a str,
        value: &'a str,
        span: Span,
    },
    /// `key={3}`
    Int { name: &'a str, value: u32, span: Span },
}

impl<'a> Attr<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Attr::Flag { name, .. } | Attr::Str { name, .. } | Attr::Int { name, .. } => name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Attr::Flag { span, .. } | Attr::Str { span, .. } | Attr::Int { span, .. } => *span,
        }
    }
}

/// Value of a parsed prop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    Flag,
    Str(String),
    Int(u32),
}

/// Flags serialize as `true` so JSON consumers see `{ "center": true }`.
impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropValue::Flag => serializer.serialize_bool(true),
            PropValue::Str(value) => serializer.serialize_str(value),
            PropValue::Int(value) => serializer.serialize_u32(*value),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Flag => f.write_str("true"),
            PropValue::Str(value) => f.write_str(value),
            PropValue::Int(value) => write!(f, "{value}"),
        }
    }
}
