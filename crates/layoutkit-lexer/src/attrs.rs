use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::is_word_byte;
use crate::token::{Attr, PropValue, Span};

/// Attribute scanner.
///
/// Tokenizes the text between a tag name and its closing `>` left to right,
/// so the contents of a quoted value can never be mistaken for a bare flag.
///
/// ```text
/// flag     name                 (not followed by `=`)
/// string   name="value"         (non-empty, double quotes only)
/// integer  name={digits}        (fits in u32)
/// name     [A-Za-z0-9_] ( [A-Za-z0-9_] | `-` [A-Za-z0-9] )*
/// ```
///
/// Malformed values (`name='x'`, `name={1.5}`, `name = "x"`, unterminated
/// quotes) are skipped and produce no attribute. Bytes that cannot start a
/// name, such as the `/` of a self-closing tag, are ignored.
pub struct AttrScanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    attrs: Vec<Attr<'a>>,
}

impl<'a> AttrScanner<'a> {
    /// Create a new scanner for the given attribute text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            attrs: Vec::new(),
        }
    }

    /// Tokenize the attribute text into attributes, in source order.
    pub fn tokenize(source: &'a str) -> Vec<Attr<'a>> {
        let mut scanner = AttrScanner::new(source);
        scanner.scan_attrs();
        scanner.attrs
    }

    fn scan_attrs(&mut self) {
        while !self.is_at_end() {
            if is_word_byte(self.peek()) {
                self.scan_attr();
            } else {
                self.advance();
            }
        }
    }

    fn scan_attr(&mut self) {
        let start = (self.pos, self.line, self.column);
        let name = self.scan_name();
        let name_end = (self.pos, self.line, self.column);

        self.skip_whitespace();
        if self.peek() != b'=' {
            (self.pos, self.line, self.column) = name_end;
            self.attrs.push(Attr::Flag {
                name,
                span: self.span(start),
            });
            return;
        }

        let adjacent = self.pos == name_end.0;
        self.advance(); // consume `=`

        if adjacent {
            match self.peek() {
                b'"' => {
                    if let Some(value) = self.scan_string() {
                        self.attrs.push(Attr::Str {
                            name,
                            value,
                            span: self.span(start),
                        });
                        return;
                    }
                }
                b'{' => {
                    if let Some(value) = self.scan_integer() {
                        self.attrs.push(Attr::Int {
                            name,
                            value,
                            span: self.span(start),
                        });
                        return;
                    }
                }
                _ => {}
            }
        }

        self.skip_value();
    }

    /// Scan a name. Hyphens are allowed between alphanumerics (`aria-label`).
    fn scan_name(&mut self) -> &'a str {
        let start = self.pos;
        while !self.is_at_end()
            && (is_word_byte(self.peek())
                || (self.peek() == b'-' && self.peek_next().is_ascii_alphanumeric()))
        {
            self.advance();
        }
        &self.source[start..self.pos]
    }

    /// Scan `"value"`. Returns `None` without consuming on an empty or
    /// unterminated value.
    fn scan_string(&mut self) -> Option<&'a str> {
        let open = self.pos;
        let rest = &self.source[open + 1..];
        let len = rest.find('"')?;
        if len == 0 {
            return None;
        }
        self.advance_to(open + 1 + len + 1);
        Some(&rest[..len])
    }

    /// Scan `{digits}`. Returns `None` without consuming on anything else.
    fn scan_integer(&mut self) -> Option<u32> {
        let open = self.pos;
        let digits = self.bytes[open + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let close = open + 1 + digits;
        if digits == 0 || self.bytes.get(close) != Some(&b'}') {
            return None;
        }
        let value = self.source[open + 1..close].parse().ok()?;
        self.advance_to(close + 1);
        Some(value)
    }

    /// Skip a value that did not match any accepted shape.
    fn skip_value(&mut self) {
        self.skip_whitespace();
        let close = match self.peek() {
            b'"' => b'"',
            b'\'' => b'\'',
            b'{' => b'}',
            _ => {
                while !self.is_at_end() && !self.peek().is_ascii_whitespace() {
                    self.advance();
                }
                return;
            }
        };
        self.advance(); // consume opener
        while !self.is_at_end() && self.peek() != close {
            self.advance();
        }
        self.advance(); // consume closer
    }

    // --- Helpers ---

    fn span(&self, (start, line, column): (usize, usize, usize)) -> Span {
        Span::new(start, self.pos, line, column)
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_ascii_whitespace() {
            self.advance();
        }
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            b'\0'
        } else {
            self.bytes[self.pos]
        }
    }

    fn peek_next(&self) -> u8 {
        self.bytes.get(self.pos + 1).copied().unwrap_or(b'\0')
    }

    /// Advance one byte, keeping line and column in step.
    fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        let b = self.bytes[self.pos];
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if b & 0xC0 != 0x80 {
            self.column += 1;
        }
    }

    fn advance_to(&mut self, target: usize) {
        while self.pos < target && !self.is_at_end() {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}

/// Props of one tag occurrence, keyed by name in first-seen order.
///
/// String and integer values take precedence over a bare flag of the same
/// name wherever the flag appears. Among valued occurrences the last one
/// wins but the key keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedProps {
    entries: IndexMap<String, PropValue>,
}

impl ParsedProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw attribute text.
    pub fn parse(source: &str) -> Self {
        Self::from_attrs(&AttrScanner::tokenize(source))
    }

    /// Build props from scanned attributes.
    pub fn from_attrs(attrs: &[Attr<'_>]) -> Self {
        let mut props = Self::new();
        for attr in attrs {
            match attr {
                Attr::Str { name, value, .. } => {
                    props.insert(*name, PropValue::Str((*value).to_string()));
                }
                Attr::Int { name, value, .. } => props.insert(*name, PropValue::Int(*value)),
                Attr::Flag { .. } => {}
            }
        }
        for attr in attrs {
            if let Attr::Flag { name, .. } = attr {
                props
                    .entries
                    .entry((*name).to_string())
                    .or_insert(PropValue::Flag);
            }
        }
        props
    }

    /// Insert or overwrite a prop. An existing key keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: PropValue) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether `name` was given as a bare flag.
    pub fn has_flag(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(PropValue::Flag))
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.entries.get(name) {
            Some(PropValue::Str(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<u32> {
        match self.entries.get(name) {
            Some(PropValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Names of flag props, in order.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, value)| matches!(value, PropValue::Flag))
            .map(|(name, _)| name)
    }

    /// String and integer props, in order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.iter()
            .filter(|(_, value)| !matches!(value, PropValue::Flag))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, PropValue)> for ParsedProps {
    fn from_iter<I: IntoIterator<Item = (K, PropValue)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (name, value) in iter {
            props.insert(name, value);
        }
        props
    }
}

impl Serialize for ParsedProps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Renders back to attribute syntax: ` gap="lg" center cols={3}`.
impl fmt::Display for ParsedProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            match value {
                PropValue::Flag => write!(f, " {name}")?,
                PropValue::Str(value) => write!(f, " {name}=\"{value}\"")?,
                PropValue::Int(value) => write!(f, " {name}={{{value}}}")?,
            }
        }
        Ok(())
    }
}
