//! LayoutKit Lexer
//!
//! Scans text for layout component tags (`<Stack gap="lg">`, `<Spacer />`,
//! `</Stack>`) and tokenizes their restricted attribute grammar into typed
//! props. Scanning never fails: anything that does not match the tag grammar
//! is plain text.
//!
//! # Example
//!
//! ```
//! use layoutkit_lexer::{ParsedProps, Scanner, TagKind};
//!
//! let tags = Scanner::scan("<Stack gap=\"lg\">hi</Stack>");
//! assert_eq!(tags.len(), 2);
//! assert_eq!(tags[0].kind, TagKind::Open);
//!
//! let props = ParsedProps::parse(tags[0].attrs);
//! assert_eq!(props.str("gap"), Some("lg"));
//! ```

pub mod attrs;
pub mod scanner;
pub mod token;

pub use attrs::{AttrScanner, ParsedProps};
pub use scanner::Scanner;
pub use token::{Attr, PropValue, Span, Tag, TagKind};

/// Check if a byte can appear in an attribute or tag identifier.
pub(crate) fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
