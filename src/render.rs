//! Media-rule rendering.
//!
//! Serializes rule-sets, optionally wrapped in an `@media` block, into
//! indented CSS text. Media query expressions contain their enclosing
//! parentheses by definition, e.g. `(min-device-pixel-ratio: 2)`.

use crate::query::{media_query, media_query_list};
use crate::ruleset::RuleSet;

/// Default indentation unit.
pub const DEFAULT_TAB: &str = "  ";

/// Vendor-specific equivalents for a 2x device-pixel-ratio condition. Each
/// becomes its own alternative query so any one vendor match triggers the
/// rule.
pub const MEDIA_EXPRESSIONS_2X: [&str; 6] = [
    "(-webkit-min-device-pixel-ratio: 2)",
    "(min--moz-device-pixel-ratio: 2)",
    "(-o-min-device-pixel-ratio: 2/1)",
    "(min-device-pixel-ratio: 2)",
    "(min-resolution: 192dpi)",
    "(min-resolution: 2dppx)",
];

/// A media rule: rule-sets sharing one (possibly absent) query context.
#[derive(Debug, Clone, Default)]
pub struct MediaRule {
    /// Full media queries (`only screen and ...`); `None` renders the
    /// rule-sets unwrapped.
    pub queries: Option<Vec<String>>,
    pub rule_sets: Vec<RuleSet>,
}

/// Build the 2x query list: one full query per vendor expression, each
/// prefixed by the given extra expressions.
pub fn media_queries_2x<S: AsRef<str>>(extra_exprs: &[S]) -> Vec<String> {
    MEDIA_EXPRESSIONS_2X
        .iter()
        .map(|&vendor| {
            let mut exprs: Vec<&str> = extra_exprs.iter().map(|e| e.as_ref()).collect();
            exprs.push(vendor);
            media_query(&exprs)
        })
        .collect()
}

/// Render one media rule as CSS text.
pub fn render_media_rule(rule: &MediaRule, tab: &str) -> String {
    let mut css = String::new();
    let mut level = 0;

    if let Some(queries) = &rule.queries {
        css.push_str("@media\n");
        css.push_str(&media_query_list(queries));
        css.push_str(" {\n");
        level += 1;
    }

    for ruleset in &rule.rule_sets {
        indent(&mut css, tab, level);
        css.push_str(&ruleset.selector);
        css.push_str(" {\n");
        for (property, value) in &ruleset.declarations {
            indent(&mut css, tab, level + 1);
            css.push_str(&format!("{property}: {value};\n"));
        }
        indent(&mut css, tab, level);
        css.push_str("}\n");
    }

    if rule.queries.is_some() {
        css.push_str("}\n");
    }

    css
}

/// Render a full stylesheet: generator header plus each media rule,
/// blank-line separated.
pub fn generate_css(rules: &[MediaRule], tab: &str) -> String {
    let mut css = String::from("/* Generated by background-imager */\n\n");
    for rule in rules {
        css.push_str(&render_media_rule(rule, tab));
        css.push('\n');
    }
    css
}

/// Replace literal `\t` and `\s` escape sequences in a user-supplied
/// indent string with tab and space characters. Case-insensitive, so
/// `\T` and `\S` work too.
pub fn unescape_tab(tab: &str) -> String {
    tab.replace("\\t", "\t")
        .replace("\\T", "\t")
        .replace("\\s", " ")
        .replace("\\S", " ")
}

fn indent(css: &mut String, tab: &str, level: usize) {
    for _ in 0..level {
        css.push_str(tab);
    }
}
