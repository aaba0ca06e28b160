//! Utility-class safelist.
//!
//! CSS frameworks that purge unused classes cannot see classes produced at
//! compile time from semantic props. The safelist lists every token the rule
//! set and class tables can emit, derived from the same static data the
//! resolver reads.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use layoutkit_rules::{Axis, PropEffect, RULES};

/// Every token the compiler can emit, in first-seen order.
///
/// Walks each component rule (base, prop effects, fixed defaults, axis
/// defaults) and then every class table. `className` values and synthesized
/// `grid-cols-N` beyond the table are not included.
pub fn safelist() -> Vec<&'static str> {
    let mut tokens: IndexSet<&'static str> = IndexSet::new();

    for rule in &RULES {
        tokens.extend(rule.base.iter().copied());
        for (_, effect) in rule.props {
            match *effect {
                PropEffect::AddClasses(classes) => tokens.extend(classes.iter().copied()),
                PropEffect::ReplaceToken { to, .. } => {
                    tokens.insert(to);
                }
            }
        }
        tokens.extend(rule.fixed_defaults.iter().copied());
        for (axis, key) in rule.axis_defaults {
            tokens.extend(axis.table().get(key));
        }
    }

    for axis in Axis::ALL {
        tokens.extend(axis.table().tokens());
    }

    tokens.into_iter().collect()
}

/// Output format for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafelistFormat {
    /// One class per line.
    #[default]
    Plain,
    /// A JSON array of strings.
    Json,
    /// Tailwind v4 `@source inline(...)` directives.
    Css,
}

impl FromStr for SafelistFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(SafelistFormat::Plain),
            "json" => Ok(SafelistFormat::Json),
            "css" => Ok(SafelistFormat::Css),
            other => Err(format!("unknown safelist format `{other}`")),
        }
    }
}

impl fmt::Display for SafelistFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafelistFormat::Plain => f.write_str("plain"),
            SafelistFormat::Json => f.write_str("json"),
            SafelistFormat::Css => f.write_str("css"),
        }
    }
}

/// Render the safelist in the given format, newline-terminated.
pub fn render(format: SafelistFormat) -> serde_json::Result<String> {
    let tokens = safelist();
    let mut out = match format {
        SafelistFormat::Plain => tokens.join("\n"),
        SafelistFormat::Json => serde_json::to_string_pretty(&tokens)?,
        SafelistFormat::Css => tokens
            .iter()
            .map(|token| format!("@source inline(\"{token}\");"))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    out.push('\n');
    Ok(out)
}
