//! LayoutKit Rules
//!
//! The semantic core of LayoutKit: the class tables for each style axis,
//! the declarative rule for each of the ten layout components, the class
//! resolver that expands a component plus props into utility classes, and
//! the lint pass.
//!
//! # Example
//!
//! ```
//! use layoutkit_rules::resolve_attrs;
//!
//! let resolution = resolve_attrs("Stack", " gap=\"lg\"").unwrap();
//! assert_eq!(
//!     resolution.class_string(),
//!     "flex flex-col gap-6 items-stretch justify-start"
//! );
//! ```

pub mod component;
pub mod lint;
pub mod resolve;
pub mod tables;

pub use component::{Component, ComponentRule, PropEffect, TerminalMarker, RULES};
pub use lint::{lint, lint_raw_classes, LintRule, LintWarning, Severity};
pub use resolve::{resolve, resolve_attrs, resolve_component, Resolution};
pub use tables::{cols_class, Axis, ClassTable};

/// A name that is not one of the ten layout components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component `{name}`, expected one of: {expected}", expected = Component::names())]
pub struct UnknownComponent {
    pub name: String,
}
