use crate::is_word_byte;
use crate::token::{Span, Tag, TagKind};

/// Document tag scanner.
///
/// Finds every tag in a text blob in a single linear pass. The grammar is
/// deliberately restricted:
///
/// ```text
/// open         <Name attrs>
/// self-closing <Name attrs/>
/// close        </Name>
/// Name         [A-Za-z_][A-Za-z0-9_]*
/// attrs        any bytes except `<` and `>`
/// ```
///
/// A name must be followed by whitespace, `/` or `>`. Anything that does not
/// match is text; the scanner resumes one byte after the failed `<`.
pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    tags: Vec<Tag<'a>>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            tags: Vec::new(),
        }
    }

    /// Scan the entire source and return its tags in document order.
    pub fn scan(source: &'a str) -> Vec<Tag<'a>> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tags();
        scanner.tags
    }

    fn scan_tags(&mut self) {
        while !self.is_at_end() {
            if self.peek() != b'<' {
                self.advance();
                continue;
            }

            let checkpoint = (self.pos, self.line, self.column);
            match self.scan_tag() {
                Some(tag) => self.tags.push(tag),
                None => {
                    (self.pos, self.line, self.column) = checkpoint;
                    self.advance();
                }
            }
        }
    }

    /// Try to scan one tag starting at `<`. Leaves the position anywhere on
    /// failure; the caller restores it.
    fn scan_tag(&mut self) -> Option<Tag<'a>> {
        let start = self.pos;
        let line = self.line;
        let column = self.column;
        self.advance(); // consume `<`

        let closing = self.peek() == b'/';
        if closing {
            self.advance();
        }

        let name = self.scan_name()?;

        if closing {
            self.skip_whitespace();
            if self.peek() != b'>' {
                return None;
            }
            self.advance();
            return Some(Tag {
                name,
                attrs: "",
                kind: TagKind::Close,
                span: Span::new(start, self.pos, line, column),
            });
        }

        if !matches!(self.peek(), b'/' | b'>') && !self.peek().is_ascii_whitespace() {
            return None;
        }

        let attrs_start = self.pos;
        while !self.is_at_end() && self.peek() != b'>' {
            if self.peek() == b'<' {
                return None;
            }
            self.advance();
        }
        if self.is_at_end() {
            return None;
        }
        let raw = &self.source[attrs_start..self.pos];
        self.advance(); // consume `>`

        let (attrs, kind) = match raw.trim_end().strip_suffix('/') {
            Some(attrs) => (attrs, TagKind::SelfClosing),
            None => (raw, TagKind::Open),
        };

        Some(Tag {
            name,
            attrs,
            kind,
            span: Span::new(start, self.pos, line, column),
        })
    }

    fn scan_name(&mut self) -> Option<&'a str> {
        let first = self.peek();
        if !(first.is_ascii_alphabetic() || first == b'_') {
            return None;
        }
        let start = self.pos;
        while !self.is_at_end() && is_word_byte(self.peek()) {
            self.advance();
        }
        Some(&self.source[start..self.pos])
    }

    // --- Helpers ---

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

    /// Advance one byte, keeping line and column in step. Columns count
    /// characters, so UTF-8 continuation bytes do not move them.
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

    fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}
