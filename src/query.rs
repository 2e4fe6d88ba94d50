//! Query compilation, rendering, and cascade ordering.
//!
//! One raw query string (`640w^2x`) compiles to a list of media expressions
//! joined by logical AND. A media rule may carry several comma-separated
//! alternative queries; their emission order follows a numeric weighting so
//! narrower rules appear after more general ones and win the cascade on
//! equal specificity.

use crate::descriptor::{FeatureMode, MediaExpression, MediaFeature, parse_descriptor};
use crate::error::Result;
use crate::filename::{DESCRIPTOR_COMBINATOR, QUERY_SEPARATOR};
use std::cmp::Ordering;

/// Weight contribution of a device-pixel-ratio constraint.
const DENSITY_WEIGHT: f64 = 10.0;
/// Base weight of a width constraint; the width itself subtracts from it so
/// wider constraints sort before narrower ones.
const WIDTH_WEIGHT: f64 = 100_000.0;
/// Weight contribution of a height constraint. Dominates all other terms.
const HEIGHT_WEIGHT: f64 = 1_000_000_000.0;

/// Compile one raw query into its media expressions.
///
/// Splits on the caret combinator and parses each descriptor, propagating
/// the first failure. An empty query compiles to nothing valid and fails.
pub fn compile_query(query: &str) -> Result<Vec<MediaExpression>> {
    query
        .split(DESCRIPTOR_COMBINATOR)
        .map(parse_descriptor)
        .collect()
}

/// Compile one raw query into rendered expression strings.
pub fn compile_query_expressions(query: &str, mode: FeatureMode) -> Result<Vec<String>> {
    query
        .split(DESCRIPTOR_COMBINATOR)
        .map(|token| Ok(parse_descriptor(token)?.render(mode)))
        .collect()
}

/// Build a single media query from rendered expressions.
///
/// Every query gets its own `only screen` modifier so it stands alone in a
/// query list, e.g. `only screen and (max-width: 640px) and (max-device-pixel-ratio: 1)`.
pub fn media_query<S: AsRef<str>>(exprs: &[S]) -> String {
    let mut mq = String::from("only screen");
    for expr in exprs {
        mq.push_str(" and ");
        mq.push_str(expr.as_ref());
    }
    mq
}

/// Join full media queries into a media-query list body.
pub fn media_query_list(queries: &[String]) -> String {
    queries.join(",\n")
}

/// Compile the alternative queries of one raw media rule, order them for
/// cascade correctness, and render the full media-query list.
pub fn render_rule_queries(rule: &str, mode: FeatureMode) -> Result<String> {
    let mut alternatives: Vec<(f64, &str)> = rule
        .split(QUERY_SEPARATOR)
        .map(|query| Ok((weight(query)?, query)))
        .collect::<Result<_>>()?;
    alternatives.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    let queries = alternatives
        .into_iter()
        .map(|(_, query)| Ok(media_query(&compile_query_expressions(query, mode)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(media_query_list(&queries))
}

/// Total-ordering key for one raw query.
///
/// Digit-position packing encodes a three-level priority in one number:
/// height dominates, then width (descending, absent width sorts first),
/// then pixel ratio as a tiebreak. When a feature repeats within a query
/// the last occurrence wins.
pub fn weight(query: &str) -> Result<f64> {
    let mut ratio = 0.0;
    let mut width = None;
    let mut height = 0.0;

    for expr in compile_query(query)? {
        match expr.feature {
            MediaFeature::PixelRatio => ratio = expr.value,
            MediaFeature::Width => width = Some(expr.value),
            MediaFeature::Height => height = expr.value,
        }
    }

    let width_component = match width {
        Some(w) => WIDTH_WEIGHT - w * 100.0,
        None => 0.0,
    };
    Ok(ratio * DENSITY_WEIGHT + width_component + height * HEIGHT_WEIGHT)
}

/// Compare two raw queries by weight.
///
/// Equal strings compare equal without compiling either side.
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    if a == b {
        return Ok(Ordering::Equal);
    }
    Ok(weight(a)?.total_cmp(&weight(b)?))
}
