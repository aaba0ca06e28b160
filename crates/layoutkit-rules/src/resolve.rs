//! Class resolver.
//!
//! Turns a component and its parsed props into the final class list:
//!
//! ```text
//! base (with replacements) → flag classes → string/int classes → defaults → dedupe
//! ```
//!
//! Resolution is a pure function of its inputs; unknown semantic values are
//! dropped without a diagnostic.

use std::collections::HashSet;

use layoutkit_lexer::{ParsedProps, PropValue};
use serde::Serialize;

use crate::component::{Component, PropEffect, CENTER, CLASS_NAME};
use crate::tables::{cols_class, Axis};

/// Result of resolving one tag occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub component: Component,
    /// Ordered, duplicate-free utility classes.
    pub classes: Vec<String>,
    /// Props that took part in resolution. Flags the component does not
    /// declare are left out; every string and integer prop is kept.
    pub props: ParsedProps,
}

impl Resolution {
    /// Classes joined with single spaces.
    pub fn class_string(&self) -> String {
        self.classes.join(" ")
    }
}

/// Resolve a tag by name. Returns `None` for unrecognised tags.
pub fn resolve(tag: &str, props: &ParsedProps) -> Option<Resolution> {
    Component::from_name(tag).map(|component| resolve_component(component, props))
}

/// Parse raw attribute text and resolve.
pub fn resolve_attrs(tag: &str, attrs: &str) -> Option<Resolution> {
    resolve(tag, &ParsedProps::parse(attrs))
}

pub fn resolve_component(component: Component, props: &ParsedProps) -> Resolution {
    let rule = component.rule();
    let mut classes: Vec<String> = rule.base.iter().map(|c| c.to_string()).collect();
    let mut found = ParsedProps::new();

    for flag in props.flags() {
        let Some(effect) = rule.effect(flag) else {
            continue;
        };
        found.insert(flag, PropValue::Flag);
        match *effect {
            PropEffect::AddClasses(tokens) => {
                classes.extend(tokens.iter().map(|t| t.to_string()));
            }
            PropEffect::ReplaceToken { from, to } => {
                for class in classes.iter_mut().filter(|c| c.as_str() == from) {
                    *class = to.to_string();
                }
            }
        }
    }

    for (name, value) in props.values() {
        found.insert(name, value.clone());
        match value {
            PropValue::Str(value) => classes.extend(string_prop_classes(name, value)),
            PropValue::Int(n) if name == Axis::Cols.prop() => {
                classes.extend(cols_class(*n).map(|c| c.into_owned()));
            }
            _ => {}
        }
    }

    if !rule.fixed_defaults.is_empty()
        && !rule.suppress_defaults_when.iter().any(|p| found.has_flag(p))
    {
        classes.extend(rule.fixed_defaults.iter().map(|c| c.to_string()));
    }

    if !found.has_flag(CENTER) {
        for (axis, key) in rule.axis_defaults {
            if found.contains(axis.prop()) {
                continue;
            }
            if let Some(token) = axis.table().get(key) {
                classes.push(token.to_string());
            }
        }
    }

    let mut seen = HashSet::new();
    classes.retain(|c| seen.insert(c.clone()));

    Resolution {
        component,
        classes,
        props: found,
    }
}

/// Classes contributed by one string prop.
fn string_prop_classes(name: &str, value: &str) -> Vec<String> {
    if name == CLASS_NAME {
        return value.split_whitespace().map(String::from).collect();
    }
    Axis::from_prop(name)
        .and_then(|axis| axis.table().get(value))
        .map(String::from)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classes(tag: &str, attrs: &str) -> Vec<String> {
        resolve_attrs(tag, attrs).unwrap().classes
    }

    // =========================================================================
    // Bare tags
    // =========================================================================

    #[test]
    fn test_unknown_tag() {
        assert!(resolve_attrs("div", "").is_none());
        assert!(resolve_attrs("stack", "").is_none());
    }

    #[test]
    fn test_center_bare() {
        assert_eq!(
            classes("Center", ""),
            ["flex", "flex-col", "items-center", "justify-center"]
        );
    }

    #[test]
    fn test_stack_bare() {
        assert_eq!(
            classes("Stack", ""),
            ["flex", "flex-col", "gap-4", "items-stretch", "justify-start"]
        );
    }

    #[test]
    fn test_row_bare() {
        assert_eq!(
            classes("Row", ""),
            ["flex", "flex-row", "gap-4", "items-center", "justify-start"]
        );
    }

    #[test]
    fn test_box_bare_is_empty() {
        assert!(classes("Box", "").is_empty());
    }

    #[test]
    fn test_spread_bare() {
        assert_eq!(
            classes("Spread", ""),
            ["flex", "flex-row", "justify-between", "items-center"]
        );
    }

    #[test]
    fn test_grid_bare() {
        assert_eq!(classes("Grid", ""), ["grid", "gap-4"]);
    }

    #[test]
    fn test_terminal_and_simple_bare() {
        assert_eq!(classes("Spacer", ""), ["flex-1"]);
        assert_eq!(classes("Divider", ""), ["w-full", "border-t", "border-gray-200"]);
        assert_eq!(classes("ScrollArea", ""), ["overflow-y-auto"]);
        assert_eq!(classes("AspectRatio", ""), ["relative"]);
    }

    #[test]
    fn test_bare_is_base_plus_defaults() {
        for component in Component::ALL {
            let rule = component.rule();
            let mut expected: Vec<String> = rule.base.iter().map(|c| c.to_string()).collect();
            expected.extend(rule.fixed_defaults.iter().map(|c| c.to_string()));
            for (axis, key) in rule.axis_defaults {
                expected.push(axis.table().get(key).unwrap().to_string());
            }
            let mut seen = HashSet::new();
            expected.retain(|c| seen.insert(c.clone()));
            assert_eq!(classes(component.name(), ""), expected, "{component}");
        }
    }

    // =========================================================================
    // Flags
    // =========================================================================

    #[test]
    fn test_center_horizontal_only() {
        let c = classes("Center", " horizontal");
        assert!(c.contains(&"items-center".to_string()));
        assert!(!c.contains(&"justify-center".to_string()));
    }

    #[test]
    fn test_center_vertical_only() {
        assert_eq!(classes("Center", " vertical"), ["flex", "flex-col", "justify-center"]);
    }

    #[test]
    fn test_center_fill() {
        assert_eq!(
            classes("Center", " fill"),
            ["flex", "flex-col", "min-h-screen", "items-center", "justify-center"]
        );
    }

    #[test]
    fn test_center_inline_replaces_flex() {
        assert_eq!(
            classes("Center", " inline"),
            ["inline-flex", "flex-col", "items-center", "justify-center"]
        );
    }

    #[test]
    fn test_row_reverse_replaces_in_place() {
        assert_eq!(
            classes("Row", " reverse"),
            ["flex", "flex-row-reverse", "gap-4", "items-center", "justify-start"]
        );
    }

    #[test]
    fn test_stack_center_suppresses_axis_defaults() {
        assert_eq!(
            classes("Stack", " center"),
            ["flex", "flex-col", "items-center", "justify-center"]
        );
    }

    #[test]
    fn test_box_center_and_fill() {
        assert_eq!(
            classes("Box", " fill center"),
            ["flex-1", "flex", "items-center", "justify-center"]
        );
    }

    #[test]
    fn test_undeclared_flag_ignored() {
        let resolution = resolve_attrs("Grid", " center").unwrap();
        assert_eq!(resolution.classes, ["grid", "gap-4"]);
        assert!(!resolution.props.contains("center"));
    }

    #[test]
    fn test_flags_before_values() {
        assert_eq!(
            classes("Stack", " gap=\"lg\" wrap"),
            ["flex", "flex-col", "flex-wrap", "gap-6", "items-stretch", "justify-start"]
        );
    }

    // =========================================================================
    // String and integer props
    // =========================================================================

    #[test]
    fn test_stack_gap() {
        let c = classes("Stack", " gap=\"lg\"");
        assert!(c.contains(&"gap-6".to_string()));
        assert!(!c.contains(&"gap-4".to_string()));
    }

    #[test]
    fn test_axis_values_in_prop_order() {
        assert_eq!(
            classes("Row", " justify=\"end\" align=\"baseline\" padding=\"sm\""),
            ["flex", "flex-row", "justify-end", "items-baseline", "p-2", "gap-4"]
        );
    }

    #[test]
    fn test_unknown_value_dropped_and_suppresses_default() {
        assert_eq!(
            classes("Stack", " gap=\"huge\""),
            ["flex", "flex-col", "items-stretch", "justify-start"]
        );
    }

    #[test]
    fn test_class_name_passthrough() {
        assert_eq!(
            classes("Spacer", " className=\"border-b shadow\""),
            ["flex-1", "border-b", "shadow"]
        );
    }

    #[test]
    fn test_class_name_duplicate_removed() {
        assert_eq!(classes("Grid", " className=\"grid gap-4\""), ["grid", "gap-4"]);
    }

    #[test]
    fn test_grid_numeric_cols() {
        assert_eq!(classes("Grid", " cols={3}"), ["grid", "grid-cols-3", "gap-4"]);
    }

    #[test]
    fn test_grid_string_cols() {
        assert_eq!(classes("Grid", " cols=\"2\""), ["grid", "grid-cols-2", "gap-4"]);
    }

    #[test]
    fn test_grid_cols_out_of_range_synthesized() {
        assert_eq!(classes("Grid", " cols={13}"), ["grid", "grid-cols-13", "gap-4"]);
    }

    #[test]
    fn test_grid_cols_zero_dropped() {
        assert_eq!(classes("Grid", " cols={0}"), ["grid", "gap-4"]);
    }

    #[test]
    fn test_numeric_non_cols_ignored() {
        let resolution = resolve_attrs("Stack", " gap={4}").unwrap();
        assert!(!resolution.classes.contains(&"gap-4".to_string()));
        assert_eq!(resolution.props.int("gap"), Some(4));
    }

    #[test]
    fn test_spread_align_override() {
        assert_eq!(
            classes("Spread", " align=\"start\""),
            ["flex", "flex-row", "justify-between", "items-start"]
        );
    }

    // =========================================================================
    // Purity
    // =========================================================================

    #[test]
    fn test_resolution_is_deterministic() {
        let attrs = " gap=\"sm\" center wrap className=\"x y\" align=\"end\"";
        let first = resolve_attrs("Stack", attrs).unwrap();
        for _ in 0..3 {
            assert_eq!(resolve_attrs("Stack", attrs).unwrap(), first);
        }
    }

    #[test]
    fn test_props_found_recorded() {
        let resolution = resolve_attrs("Center", " horizontal vertical fill title=\"x\"").unwrap();
        assert!(resolution.props.has_flag("horizontal"));
        assert!(resolution.props.has_flag("vertical"));
        assert!(resolution.props.has_flag("fill"));
        assert_eq!(resolution.props.str("title"), Some("x"));
    }

    #[test]
    fn test_class_string() {
        let resolution = resolve_attrs("Grid", " cols={2}").unwrap();
        assert_eq!(resolution.class_string(), "grid grid-cols-2 gap-4");
    }
}
