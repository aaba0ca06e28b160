//! Component rule set.
//!
//! One declarative [`ComponentRule`] per recognised tag. This is the single
//! source of truth for tag → class expansion: the resolver, the markup
//! compiler, the safelist and the component docs all read it.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::tables::Axis;
use crate::UnknownComponent;

/// Boolean prop that supersedes every axis default.
pub const CENTER: &str = "center";

/// String prop whose value is appended verbatim.
pub const CLASS_NAME: &str = "className";

/// The ten layout primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Center,
    Stack,
    Row,
    Box,
    Spread,
    Grid,
    Spacer,
    Divider,
    ScrollArea,
    AspectRatio,
}

impl Component {
    pub const ALL: [Component; 10] = [
        Component::Center,
        Component::Stack,
        Component::Row,
        Component::Box,
        Component::Spread,
        Component::Grid,
        Component::Spacer,
        Component::Divider,
        Component::ScrollArea,
        Component::AspectRatio,
    ];

    /// Tag name as written in markup.
    pub fn name(self) -> &'static str {
        match self {
            Component::Center => "Center",
            Component::Stack => "Stack",
            Component::Row => "Row",
            Component::Box => "Box",
            Component::Spread => "Spread",
            Component::Grid => "Grid",
            Component::Spacer => "Spacer",
            Component::Divider => "Divider",
            Component::ScrollArea => "ScrollArea",
            Component::AspectRatio => "AspectRatio",
        }
    }

    /// Look up a tag name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Component> {
        Component::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn rule(self) -> &'static ComponentRule {
        &RULES[self as usize]
    }

    /// All tag names joined for messages.
    pub fn names() -> String {
        Component::ALL.map(Component::name).join(", ")
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = UnknownComponent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('<').trim_end_matches('>');
        Component::from_name(name).ok_or_else(|| UnknownComponent {
            name: s.to_string(),
        })
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// What a boolean prop does to the class list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropEffect {
    /// Append these classes.
    AddClasses(&'static [&'static str]),
    /// Rewrite every `from` in the current list to `to`.
    ReplaceToken {
        from: &'static str,
        to: &'static str,
    },
}

/// Extra attribute a terminal component carries in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMarker {
    AriaHidden,
    Separator,
}

impl TerminalMarker {
    pub fn attribute(self) -> &'static str {
        match self {
            TerminalMarker::AriaHidden => "aria-hidden=\"true\"",
            TerminalMarker::Separator => "role=\"separator\"",
        }
    }
}

/// Declarative expansion rule for one component.
#[derive(Debug)]
pub struct ComponentRule {
    pub component: Component,
    pub base: &'static [&'static str],
    pub props: &'static [(&'static str, PropEffect)],
    /// Axis defaults, applied unless the axis prop or [`CENTER`] is given.
    pub axis_defaults: &'static [(Axis, &'static str)],
    /// Classes applied unless any of `suppress_defaults_when` is given.
    pub fixed_defaults: &'static [&'static str],
    pub suppress_defaults_when: &'static [&'static str],
    /// Axes the component documents. The resolver accepts every axis on
    /// every component.
    pub axes: &'static [Axis],
    pub terminal: Option<TerminalMarker>,
}

impl ComponentRule {
    pub fn effect(&self, prop: &str) -> Option<&PropEffect> {
        self.props
            .iter()
            .find(|(name, _)| *name == prop)
            .map(|(_, effect)| effect)
    }

    pub fn axis_default(&self, axis: Axis) -> Option<&'static str> {
        self.axis_defaults
            .iter()
            .find(|(a, _)| *a == axis)
            .map(|(_, key)| *key)
    }
}

const FILL_SCREEN: PropEffect = PropEffect::AddClasses(&["min-h-screen"]);
const CENTER_BOTH: PropEffect = PropEffect::AddClasses(&["items-center", "justify-center"]);
const WRAP: PropEffect = PropEffect::AddClasses(&["flex-wrap"]);

/// Indexed by `Component as usize`.
pub static RULES: [ComponentRule; 10] = [
    ComponentRule {
        component: Component::Center,
        base: &["flex", "flex-col"],
        props: &[
            ("fill", FILL_SCREEN),
            ("horizontal", PropEffect::AddClasses(&["items-center"])),
            ("vertical", PropEffect::AddClasses(&["justify-center"])),
            (
                "inline",
                PropEffect::ReplaceToken {
                    from: "flex",
                    to: "inline-flex",
                },
            ),
        ],
        axis_defaults: &[],
        fixed_defaults: &["items-center", "justify-center"],
        suppress_defaults_when: &["horizontal", "vertical"],
        axes: &[],
        terminal: None,
    },
    ComponentRule {
        component: Component::Stack,
        base: &["flex", "flex-col"],
        props: &[("fill", FILL_SCREEN), (CENTER, CENTER_BOTH), ("wrap", WRAP)],
        axis_defaults: &[
            (Axis::Gap, "md"),
            (Axis::Align, "stretch"),
            (Axis::Justify, "start"),
        ],
        fixed_defaults: &[],
        suppress_defaults_when: &[],
        axes: &[Axis::Gap, Axis::Align, Axis::Justify, Axis::Padding],
        terminal: None,
    },
    ComponentRule {
        component: Component::Row,
        base: &["flex", "flex-row"],
        props: &[
            ("fill", FILL_SCREEN),
            (CENTER, CENTER_BOTH),
            ("wrap", WRAP),
            (
                "reverse",
                PropEffect::ReplaceToken {
                    from: "flex-row",
                    to: "flex-row-reverse",
                },
            ),
        ],
        axis_defaults: &[
            (Axis::Gap, "md"),
            (Axis::Align, "center"),
            (Axis::Justify, "start"),
        ],
        fixed_defaults: &[],
        suppress_defaults_when: &[],
        axes: &[Axis::Gap, Axis::Align, Axis::Justify, Axis::Padding],
        terminal: None,
    },
    ComponentRule {
        component: Component::Box,
        base: &[],
        props: &[
            ("fill", PropEffect::AddClasses(&["flex-1"])),
            (
                CENTER,
                PropEffect::AddClasses(&["flex", "items-center", "justify-center"]),
            ),
        ],
        axis_defaults: &[],
        fixed_defaults: &[],
        suppress_defaults_when: &[],
        axes: &[Axis::Padding],
        terminal: None,
    },
    ComponentRule {
        component: Component::Spread,
        base: &["flex", "flex-row", "justify-between"],
        props: &[],
        axis_defaults: &[(Axis::Align, "center")],
        fixed_defaults: &[],
        suppress_defaults_when: &[],
        axes: &[Axis::Align, Axis::Padding],
        terminal: None,
    },
    ComponentRule {
        component: Component::Grid,
        base: &["grid"],
        props: &[],
        axis_defaults: &[(Axis::Gap, "md")],
        fixed_defaults: &[],
        suppress_defaults_when: &[],
        axes: &[Axis::Cols, Axis::Gap],
        terminal: None,
    },
    ComponentRule {
        component: Component::Spacer,
        base: &["flex-1"],
        props: &[],
        axis_defaults: &[],
        fixed_defaults: &[],
        suppress_defaults_when: &[],
        axes: &[],
        terminal: Some(TerminalMarker::AriaHidden),
    },
    ComponentRule {
        component: Component::Divider,
        base: &["w-full", "border-t", "border-gray-200"],
        props: &[],
        axis_defaults: &[],
        fixed_defaults: &[],
        suppress_defaults_when: &[],
        axes: &[],
        terminal: Some(TerminalMarker::Separator),
    },
    ComponentRule {
        component: Component::ScrollArea,
        base: &["overflow-y-auto"],
        props: &[],
        axis_defaults: &[],
        fixed_defaults: &[],
        suppress_defaults_when: &[],
        axes: &[],
        terminal: None,
    },
    ComponentRule {
        component: Component::AspectRatio,
        base: &["relative"],
        props: &[],
        axis_defaults: &[],
        fixed_defaults: &[],
        suppress_defaults_when: &[],
        axes: &[],
        terminal: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_indexed_by_component() {
        for component in Component::ALL {
            assert_eq!(component.rule().component, component);
        }
    }

    #[test]
    fn test_exactly_ten_names() {
        let names: Vec<&str> = Component::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            [
                "Center",
                "Stack",
                "Row",
                "Box",
                "Spread",
                "Grid",
                "Spacer",
                "Divider",
                "ScrollArea",
                "AspectRatio"
            ]
        );
    }

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert_eq!(Component::from_name("Stack"), Some(Component::Stack));
        assert_eq!(Component::from_name("stack"), None);
        assert_eq!(Component::from_name("div"), None);
    }

    #[test]
    fn test_from_str_accepts_angle_brackets() {
        assert_eq!("<Grid>".parse::<Component>(), Ok(Component::Grid));
        assert_eq!(" Row ".parse::<Component>(), Ok(Component::Row));
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "Flexbox".parse::<Component>().unwrap_err();
        assert_eq!(err.name, "Flexbox");
        assert!(err.to_string().contains("Stack"));
    }

    #[test]
    fn test_effect_lookup() {
        let row = Component::Row.rule();
        assert_eq!(
            row.effect("reverse"),
            Some(&PropEffect::ReplaceToken {
                from: "flex-row",
                to: "flex-row-reverse"
            })
        );
        assert_eq!(row.effect("horizontal"), None);
    }

    #[test]
    fn test_axis_default_lookup() {
        let stack = Component::Stack.rule();
        assert_eq!(stack.axis_default(Axis::Gap), Some("md"));
        assert_eq!(stack.axis_default(Axis::Cols), None);
    }

    #[test]
    fn test_axis_defaults_exist_in_tables() {
        for rule in &RULES {
            for (axis, key) in rule.axis_defaults {
                assert!(axis.table().get(key).is_some(), "{:?} default {key}", rule.component);
            }
        }
    }

    #[test]
    fn test_terminal_markers() {
        assert_eq!(
            Component::Spacer.rule().terminal.map(TerminalMarker::attribute),
            Some("aria-hidden=\"true\"")
        );
        assert_eq!(
            Component::Divider.rule().terminal.map(TerminalMarker::attribute),
            Some("role=\"separator\"")
        );
        assert_eq!(Component::Stack.rule().terminal, None);
    }
}
