//! Component reference for editor tooling.
//!
//! Hover cards and completion lists are generated from the rule set so they
//! can never drift from what the compiler emits.

use layoutkit_lexer::ParsedProps;
use layoutkit_rules::{resolve_component, Axis, Component, PropEffect};
use serde::Serialize;

/// A prop and the classes it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropDoc {
    /// The prop as written, e.g. `fill`, `gap="lg"` or `cols={3}`.
    pub prop: String,
    pub classes: String,
}

/// Reference card for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    pub component: Component,
    /// Classes of the bare tag.
    pub default_classes: Vec<String>,
    pub props: Vec<PropDoc>,
}

/// Build the reference card for a tag name. Accepts `Stack` or `<Stack>`.
pub fn describe(tag: &str) -> Option<ComponentDoc> {
    let component: Component = tag.parse().ok()?;
    let rule = component.rule();

    let mut props: Vec<PropDoc> = rule
        .props
        .iter()
        .map(|(name, effect)| PropDoc {
            prop: name.to_string(),
            classes: match *effect {
                PropEffect::AddClasses(classes) => format!("+ {}", classes.join(" ")),
                PropEffect::ReplaceToken { from, to } => format!("{from} → {to}"),
            },
        })
        .collect();

    for axis in rule.axes {
        for (key, token) in axis.table().entries {
            let prop = match axis {
                Axis::Cols => format!("{}={{{key}}}", axis.prop()),
                _ => format!("{}=\"{key}\"", axis.prop()),
            };
            props.push(PropDoc {
                prop,
                classes: token.to_string(),
            });
        }
    }

    Some(ComponentDoc {
        component,
        default_classes: resolve_component(component, &ParsedProps::new()).classes,
        props,
    })
}

/// Every tag name, for completion lists.
pub fn components() -> Vec<&'static str> {
    Component::ALL.iter().map(|c| c.name()).collect()
}

impl ComponentDoc {
    /// Markdown hover card.
    pub fn to_markdown(&self) -> String {
        let mut md = format!("### LayoutKit: `<{}>`\n\n", self.component);
        if self.default_classes.is_empty() {
            md.push_str("**Base classes:** (none)\n");
        } else {
            md.push_str(&format!(
                "**Base classes:** `{}`\n",
                self.default_classes.join(" ")
            ));
        }
        if let Some(marker) = self.component.rule().terminal {
            md.push_str(&format!("\n**Renders with:** `{}`\n", marker.attribute()));
        }
        if !self.props.is_empty() {
            md.push_str("\n**Props → Classes:**\n\n| Prop | Classes |\n|---|---|\n");
            for prop in &self.props {
                md.push_str(&format!("| `{}` | `{}` |\n", prop.prop, prop.classes));
            }
        }
        md
    }
}
