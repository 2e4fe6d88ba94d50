//! Rule-set assembly.
//!
//! A rule-set is one CSS class block: a selector synthesized from the
//! filename plus its declarations. The device-pixel-ratio descriptor decides
//! between `width`/`height` (1x images) and `background-size` (scaled-down
//! high-density images).

use crate::error::Result;
use crate::filename::{parse_filename, scan_ratio};
use crate::metrics::ImageMetrics;

/// One CSS class block. Declarations keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

/// Options shaping selector and URL synthesis.
#[derive(Debug, Clone, Default)]
pub struct RuleSetOptions {
    /// URL path prefix for `background-image`; defaults to the image
    /// directory path.
    pub url_path: Option<String>,
    /// Prefix prepended to every class name.
    pub class_prefix: String,
}

/// Build the rule-set for one image.
///
/// Pixel dimensions come from the caller: the parser has no image-decoding
/// capability of its own. Division by the ratio is plain floating point
/// with no rounding applied.
pub fn build_rule_set(
    filename: &str,
    base_path: &str,
    metrics: ImageMetrics,
    options: &RuleSetOptions,
) -> Result<RuleSet> {
    let parsed = parse_filename(filename)?;

    let url_path = options.url_path.as_deref().unwrap_or(base_path);
    let url = join_url(url_path, filename);

    let mut declarations = vec![(
        "background-image".to_string(),
        format!("url(\"{url}\")"),
    )];

    let ratio = scan_ratio(filename).unwrap_or(1.0);
    let width = metrics.width as f64 / ratio;
    let height = metrics.height as f64 / ratio;

    if ratio > 1.0 {
        declarations.push((
            "background-size".to_string(),
            format!("{width}px {height}px"),
        ));
    } else {
        declarations.push(("width".to_string(), format!("{width}px")));
        declarations.push(("height".to_string(), format!("{height}px")));
    }

    Ok(RuleSet {
        selector: format!(".{}{}", options.class_prefix, parsed.classname),
        declarations,
    })
}

fn join_url(base: &str, filename: &str) -> String {
    if base.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), filename)
    }
}
