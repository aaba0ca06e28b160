//! Markup rewriting.
//!
//! Replaces recognised tags with `<div>` containers in one linear pass and
//! copies every other byte of the input through unchanged.

use layoutkit_lexer::{ParsedProps, Scanner, TagKind};
use layoutkit_rules::{resolve_component, Component, Resolution};
use tracing::{debug, trace};

/// File extensions [`transform_file`] compiles.
const MARKUP_EXTENSIONS: &[&str] = &["html", "htm"];

/// Rewrite every recognised tag in `source`.
///
/// Self-closing tags become complete elements, open tags become `<div …>`
/// and closing tags become `</div>`. Open components are tracked on a stack
/// so stray closers can be reported; they are still rewritten.
pub fn compile_to_markup(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut open: Vec<Component> = Vec::new();
    let mut cursor = 0;

    for tag in Scanner::scan(source) {
        let Some(component) = Component::from_name(tag.name) else {
            trace!(tag = tag.name, line = tag.span.line, "pass-through tag");
            continue;
        };

        out.push_str(&source[cursor..tag.span.start]);
        cursor = tag.span.end;

        match tag.kind {
            TagKind::Close => {
                if open.last() == Some(&component) {
                    open.pop();
                } else {
                    debug!(%component, line = tag.span.line, "unbalanced closing tag");
                }
                out.push_str("</div>");
            }
            TagKind::Open | TagKind::SelfClosing => {
                let resolution = resolve_component(component, &ParsedProps::parse(tag.attrs));
                debug!(
                    %component,
                    line = tag.span.line,
                    classes = %resolution.class_string(),
                    "rewrote tag"
                );
                if tag.kind == TagKind::Open {
                    open.push(component);
                    out.push_str(&render_open_tag(&resolution));
                } else {
                    out.push_str(&render_element(&resolution));
                }
            }
        }
    }

    for component in &open {
        debug!(%component, "unclosed tag");
    }

    out.push_str(&source[cursor..]);
    out
}

/// Compile `content` if `filename` is an HTML file, otherwise return it as is.
pub fn transform_file(content: &str, filename: &str) -> String {
    let is_markup = filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| MARKUP_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    if is_markup {
        compile_to_markup(content)
    } else {
        content.to_string()
    }
}

/// `<div class="…">` for a resolution, with the terminal marker if any.
pub fn render_open_tag(resolution: &Resolution) -> String {
    let mut tag = String::from("<div");
    if !resolution.classes.is_empty() {
        tag.push_str(" class=\"");
        tag.push_str(&resolution.class_string());
        tag.push('"');
    }
    if let Some(marker) = resolution.component.rule().terminal {
        tag.push(' ');
        tag.push_str(marker.attribute());
    }
    tag.push('>');
    tag
}

/// A complete empty element, used for self-closing tags.
pub fn render_element(resolution: &Resolution) -> String {
    let mut element = render_open_tag(resolution);
    element.push_str("</div>");
    element
}
