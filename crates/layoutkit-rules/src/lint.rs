//! Lint pass.
//!
//! Two families of rules, all pure functions of their inputs:
//!
//! - component rules inspect the props a component was resolved with
//!   ([`lint`]);
//! - raw-utility rules inspect the `class` attribute of plain elements and
//!   suggest the primitive that expresses the same layout
//!   ([`lint_raw_classes`]).
//!
//! Each rule fires at most once per occurrence, only when its exact
//! precondition holds, and warnings come out in rule-declaration order.

use std::collections::HashSet;
use std::fmt;

use layoutkit_lexer::ParsedProps;
use serde::Serialize;

use crate::component::{Component, CENTER};
use crate::tables::GAP;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Suggestion,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Suggestion => f.write_str("suggestion"),
        }
    }
}

/// Every lint rule, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LintRule {
    RedundantAxes,
    RowJustifyBetween,
    ConflictingCenterAlign,
    UnnecessaryGapNone,
    PreferStack,
    PreferRow,
    PreferCenter,
    PreferSpread,
    PreferGrid,
    PreferSpacer,
}

impl LintRule {
    pub fn code(self) -> &'static str {
        match self {
            LintRule::RedundantAxes => "redundant-axes",
            LintRule::RowJustifyBetween => "row-justify-between",
            LintRule::ConflictingCenterAlign => "conflicting-center-align",
            LintRule::UnnecessaryGapNone => "unnecessary-gap-none",
            LintRule::PreferStack => "prefer-stack",
            LintRule::PreferRow => "prefer-row",
            LintRule::PreferCenter => "prefer-center",
            LintRule::PreferSpread => "prefer-spread",
            LintRule::PreferGrid => "prefer-grid",
            LintRule::PreferSpacer => "prefer-spacer",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            LintRule::RedundantAxes | LintRule::ConflictingCenterAlign => Severity::Warning,
            _ => Severity::Suggestion,
        }
    }
}

impl fmt::Display for LintRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintWarning {
    /// 1-based line of the tag the warning is about.
    pub line: usize,
    pub rule: LintRule,
    pub message: String,
    pub severity: Severity,
    /// Suggested replacement markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl LintWarning {
    fn new(rule: LintRule, line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            rule,
            message: message.into(),
            severity: rule.severity(),
            fix: None,
        }
    }

    fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} [{}]: {}",
            self.line, self.severity, self.rule, self.message
        )?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {fix})")?;
        }
        Ok(())
    }
}

/// Lint one resolved component occurrence.
pub fn lint(component: Component, props: &ParsedProps, line: usize) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if component == Component::Center && props.has_flag("horizontal") && props.has_flag("vertical")
    {
        let fix = if props.has_flag("fill") {
            "<Center fill>"
        } else {
            "<Center>"
        };
        warnings.push(
            LintWarning::new(
                LintRule::RedundantAxes,
                line,
                "Redundant props: <Center horizontal vertical> is the same as <Center>. Remove both props.",
            )
            .with_fix(fix),
        );
    }

    if component == Component::Row && props.str("justify") == Some("between") {
        warnings.push(
            LintWarning::new(
                LintRule::RowJustifyBetween,
                line,
                "Consider using <Spread> instead of <Row justify=\"between\"> for better semantics.",
            )
            .with_fix("<Spread>"),
        );
    }

    if component == Component::Stack && props.has_flag(CENTER) && props.contains("align") {
        warnings.push(LintWarning::new(
            LintRule::ConflictingCenterAlign,
            line,
            "Conflicting props: \"center\" overrides \"align\". Remove one.",
        ));
    }

    if matches!(component, Component::Stack | Component::Row) && props.str("gap") == Some("none")
    {
        warnings.push(LintWarning::new(
            LintRule::UnnecessaryGapNone,
            line,
            "Unnecessary prop: gap=\"none\" adds gap-0 which has no visual effect. Remove it.",
        ));
    }

    warnings
}

/// Lint the class list of a plain element.
///
/// `empty_element` is true when the element has no content (self-closing,
/// or closed with only whitespace in between); only then can it become a
/// `<Spacer />`.
pub fn lint_raw_classes(classes: &str, line: usize, empty_element: bool) -> Vec<LintWarning> {
    let classes = classes.trim();
    let tokens: HashSet<&str> = classes.split_whitespace().collect();
    let has = |token: &str| tokens.contains(token);
    let gap_prop = classes
        .split_whitespace()
        .find_map(|t| GAP.key_for(t))
        .map(|key| format!(" gap=\"{key}\""))
        .unwrap_or_default();
    let raw = |primitive: &str| {
        format!("Raw Tailwind \"{classes}\" detected. Consider using {primitive} for better semantics.")
    };

    let mut warnings = Vec::new();

    if has("flex") && has("flex-col") {
        let fix = format!("<Stack{gap_prop}>");
        warnings.push(LintWarning::new(LintRule::PreferStack, line, raw(&fix)).with_fix(fix));
    }

    let any_gap = tokens.iter().any(|t| t.starts_with("gap-"));
    if has("flex") && (has("flex-row") || (any_gap && !has("flex-col"))) {
        let fix = format!("<Row{gap_prop}>");
        warnings.push(LintWarning::new(LintRule::PreferRow, line, raw(&fix)).with_fix(fix));
    }

    if has("flex") && has("items-center") && has("justify-center") {
        warnings.push(
            LintWarning::new(LintRule::PreferCenter, line, raw("<Center>")).with_fix("<Center>"),
        );
    }

    if has("flex") && has("justify-between") {
        warnings.push(
            LintWarning::new(LintRule::PreferSpread, line, raw("<Spread>")).with_fix("<Spread>"),
        );
    }

    if has("grid") {
        let cols = classes
            .split_whitespace()
            .filter_map(|t| t.strip_prefix("grid-cols-"))
            .find_map(|n| n.parse::<u32>().ok());
        if let Some(cols) = cols {
            let fix = format!("<Grid cols={{{cols}}}>");
            warnings.push(LintWarning::new(LintRule::PreferGrid, line, raw(&fix)).with_fix(fix));
        }
    }

    if empty_element && has("flex-1") {
        warnings.push(
            LintWarning::new(
                LintRule::PreferSpacer,
                line,
                "Empty element with \"flex-1\" detected. Consider using <Spacer /> for better semantics.",
            )
            .with_fix("<Spacer />"),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoutkit_lexer::PropValue;
    use pretty_assertions::assert_eq;

    fn props(attrs: &str) -> ParsedProps {
        ParsedProps::parse(attrs)
    }

    fn rules(warnings: &[LintWarning]) -> Vec<LintRule> {
        warnings.iter().map(|w| w.rule).collect()
    }

    // =========================================================================
    // Component rules
    // =========================================================================

    #[test]
    fn test_redundant_axes() {
        let warnings = lint(Component::Center, &props(" horizontal vertical"), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule, LintRule::RedundantAxes);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert!(warnings[0].message.contains("Redundant"));
        assert_eq!(warnings[0].fix.as_deref(), Some("<Center>"));
    }

    #[test]
    fn test_redundant_axes_keeps_fill() {
        let warnings = lint(Component::Center, &props(" fill horizontal vertical"), 1);
        assert_eq!(warnings[0].fix.as_deref(), Some("<Center fill>"));
    }

    #[test]
    fn test_single_axis_is_clean() {
        assert!(lint(Component::Center, &props(" horizontal"), 1).is_empty());
    }

    #[test]
    fn test_row_justify_between() {
        let warnings = lint(Component::Row, &props(" justify=\"between\""), 4);
        assert_eq!(rules(&warnings), [LintRule::RowJustifyBetween]);
        assert_eq!(warnings[0].severity, Severity::Suggestion);
        assert!(warnings[0].message.contains("Spread"));
        assert_eq!(warnings[0].line, 4);
    }

    #[test]
    fn test_stack_justify_between_is_clean() {
        assert!(lint(Component::Stack, &props(" justify=\"between\""), 1).is_empty());
    }

    #[test]
    fn test_conflicting_center_align() {
        let warnings = lint(Component::Stack, &props(" center align=\"start\""), 1);
        assert_eq!(rules(&warnings), [LintRule::ConflictingCenterAlign]);
        assert!(warnings[0].message.contains("Conflicting"));
        assert_eq!(warnings[0].fix, None);
    }

    #[test]
    fn test_conflicting_center_numeric_align() {
        let warnings = lint(Component::Stack, &props(" center align={2}"), 1);
        assert_eq!(rules(&warnings), [LintRule::ConflictingCenterAlign]);
    }

    #[test]
    fn test_unnecessary_gap_none() {
        for component in [Component::Stack, Component::Row] {
            let warnings = lint(component, &props(" gap=\"none\""), 1);
            assert_eq!(rules(&warnings), [LintRule::UnnecessaryGapNone]);
            assert_eq!(warnings[0].severity, Severity::Suggestion);
        }
        assert!(lint(Component::Grid, &props(" gap=\"none\""), 1).is_empty());
    }

    #[test]
    fn test_clean_stack() {
        assert!(lint(Component::Stack, &props(" gap=\"lg\" center"), 1).is_empty());
    }

    #[test]
    fn test_multiple_rules_in_declaration_order() {
        let warnings = lint(Component::Stack, &props(" gap=\"none\" center align=\"end\""), 2);
        assert_eq!(
            rules(&warnings),
            [LintRule::ConflictingCenterAlign, LintRule::UnnecessaryGapNone]
        );
    }

    #[test]
    fn test_string_center_is_not_a_flag() {
        let mut p = ParsedProps::new();
        p.insert("center", PropValue::Str("yes".into()));
        p.insert("align", PropValue::Str("end".into()));
        assert!(lint(Component::Stack, &p, 1).is_empty());
    }

    // =========================================================================
    // Raw-utility rules
    // =========================================================================

    #[test]
    fn test_prefer_stack_with_gap() {
        let warnings = lint_raw_classes("flex flex-col gap-4", 3, false);
        assert_eq!(rules(&warnings), [LintRule::PreferStack]);
        assert_eq!(warnings[0].fix.as_deref(), Some("<Stack gap=\"md\">"));
        assert_eq!(warnings[0].line, 3);
    }

    #[test]
    fn test_prefer_row() {
        let warnings = lint_raw_classes("flex flex-row", 1, false);
        assert_eq!(rules(&warnings), [LintRule::PreferRow]);
        assert_eq!(warnings[0].fix.as_deref(), Some("<Row>"));
    }

    #[test]
    fn test_prefer_row_from_gap() {
        let warnings = lint_raw_classes("flex gap-6", 1, false);
        assert_eq!(rules(&warnings), [LintRule::PreferRow]);
        assert_eq!(warnings[0].fix.as_deref(), Some("<Row gap=\"lg\">"));
    }

    #[test]
    fn test_prefer_center_and_stack() {
        let warnings = lint_raw_classes("flex flex-col items-center justify-center", 1, false);
        assert_eq!(rules(&warnings), [LintRule::PreferStack, LintRule::PreferCenter]);
    }

    #[test]
    fn test_prefer_spread() {
        let warnings = lint_raw_classes("flex justify-between items-center", 1, false);
        assert_eq!(rules(&warnings), [LintRule::PreferSpread]);
    }

    #[test]
    fn test_prefer_grid() {
        let warnings = lint_raw_classes("grid grid-cols-3 gap-4", 1, false);
        assert_eq!(rules(&warnings), [LintRule::PreferGrid]);
        assert_eq!(warnings[0].fix.as_deref(), Some("<Grid cols={3}>"));
    }

    #[test]
    fn test_grid_without_cols_is_clean() {
        assert!(lint_raw_classes("grid gap-4", 1, false).is_empty());
    }

    #[test]
    fn test_prefer_spacer_only_when_empty() {
        assert_eq!(
            rules(&lint_raw_classes("flex-1", 1, true)),
            [LintRule::PreferSpacer]
        );
        assert!(lint_raw_classes("flex-1", 1, false).is_empty());
    }

    #[test]
    fn test_whole_token_matching() {
        // `inline-flex` is not `flex`.
        assert!(lint_raw_classes("inline-flex flex-col", 1, false).is_empty());
        assert!(lint_raw_classes("flexible justify-between", 1, false).is_empty());
    }

    #[test]
    fn test_unrelated_classes_clean() {
        assert!(lint_raw_classes("text-sm font-bold", 1, false).is_empty());
        assert!(lint_raw_classes("", 1, true).is_empty());
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    #[test]
    fn test_rule_codes_unique() {
        let all = [
            LintRule::RedundantAxes,
            LintRule::RowJustifyBetween,
            LintRule::ConflictingCenterAlign,
            LintRule::UnnecessaryGapNone,
            LintRule::PreferStack,
            LintRule::PreferRow,
            LintRule::PreferCenter,
            LintRule::PreferSpread,
            LintRule::PreferGrid,
            LintRule::PreferSpacer,
        ];
        let codes: HashSet<&str> = all.iter().map(|r| r.code()).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_display() {
        let warning = &lint(Component::Row, &props(" justify=\"between\""), 7)[0];
        assert_eq!(
            warning.to_string(),
            "line 7: suggestion [row-justify-between]: Consider using <Spread> instead of <Row justify=\"between\"> for better semantics. (fix: <Spread>)"
        );
    }
}
