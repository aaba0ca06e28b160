//! LayoutKit Code Generator
//!
//! Compiles layout component markup into plain containers carrying utility
//! classes. Two entry points share one scan and one rule set:
//!
//! ```text
//! source → Scanner::scan → resolve (+ lint) per tag → CompileOutput { results, warnings }
//!                                                   → compile_to_markup → String
//! ```
//!
//! Compilation never fails. Unrecognised tags and all other text are
//! carried through untouched.

pub mod docs;
pub mod html;
pub mod safelist;

use layoutkit_lexer::{ParsedProps, Scanner, Tag, TagKind};
use layoutkit_rules::{lint, lint_raw_classes, resolve, Component, LintWarning};
use serde::Serialize;
use tracing::{debug, trace};

pub use docs::{components, describe, ComponentDoc, PropDoc};
pub use html::{compile_to_markup, render_element, render_open_tag, transform_file};
pub use safelist::{safelist, SafelistFormat};

/// One recognised tag occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompilerResult {
    pub component: Component,
    pub props: ParsedProps,
    pub classes: Vec<String>,
    /// The opening tag the occurrence compiles to.
    pub html: String,
}

/// Structured compilation of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompileOutput {
    /// One entry per recognised opening tag, in document order.
    pub results: Vec<CompilerResult>,
    /// Every lint warning for the document, in document order.
    pub warnings: Vec<LintWarning>,
}

impl CompileOutput {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Resolve and lint every tag in `source`.
pub fn compile_to_results(source: &str) -> CompileOutput {
    let tags = Scanner::scan(source);
    let mut output = CompileOutput::default();

    for (index, tag) in tags.iter().enumerate() {
        if !tag.is_opening() {
            continue;
        }
        let line = tag.span.line;
        let props = ParsedProps::parse(tag.attrs);

        match resolve(tag.name, &props) {
            Some(resolution) => {
                debug!(
                    component = %resolution.component,
                    line,
                    classes = %resolution.class_string(),
                    "resolved tag"
                );
                output
                    .warnings
                    .extend(lint(resolution.component, &resolution.props, line));
                output.results.push(CompilerResult {
                    component: resolution.component,
                    html: render_open_tag(&resolution),
                    classes: resolution.classes,
                    props: resolution.props,
                });
            }
            None => {
                trace!(tag = tag.name, line, "pass-through tag");
                if let Some(classes) = class_attr(&props) {
                    let empty = is_empty_element(source, &tags, index);
                    output
                        .warnings
                        .extend(lint_raw_classes(classes, line, empty));
                }
            }
        }
    }

    output
}

/// The `class` (or JSX `className`) value of a plain element.
fn class_attr(props: &ParsedProps) -> Option<&str> {
    props.str("class").or_else(|| props.str("className"))
}

/// Whether the opening tag at `index` encloses nothing but whitespace.
fn is_empty_element(source: &str, tags: &[Tag<'_>], index: usize) -> bool {
    let tag = &tags[index];
    match tag.kind {
        TagKind::SelfClosing => true,
        TagKind::Open => tags.get(index + 1).is_some_and(|next| {
            next.kind == TagKind::Close
                && next.name == tag.name
                && source[tag.span.end..next.span.start].trim().is_empty()
        }),
        TagKind::Close => false,
    }
}
