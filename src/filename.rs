//! Filename grammar parsing.
//!
//! Image filenames follow `<name>(@<media-rule>)?.<ext>` where the media
//! rule is a comma-separated list of caret-combined descriptors, e.g.
//! `noodle@1x,2x^480w.png`. The name minus suffix and extension becomes the
//! CSS class root.

use crate::error::{ImagerError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions accepted by the image pre-filter (case-insensitive).
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Character separating alternative queries within one media rule.
pub const QUERY_SEPARATOR: char = ',';

/// Character joining descriptors ANDed within one query.
pub const DESCRIPTOR_COMBINATOR: char = '^';

static RE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+)\.(png|jpe?g|gif)$").unwrap());

/// Characters legal inside an `@` suffix: digits, feature letters, the
/// separator, the combinator, and `.` for fractional ratios.
static RE_MEDIA_RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9hwx,^.]+$").unwrap());

/// Parsed form of one descriptor-tagged image filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFilename {
    /// Logical CSS class root: filename minus `@` suffix and extension.
    pub classname: String,
    /// Lowercased extension, one of [`IMAGE_EXTENSIONS`].
    pub extension: String,
    /// Raw alternative query strings; empty when the name carries no suffix.
    pub queries: Vec<String>,
}

/// Check if a filename has a recognized image extension.
pub fn is_image(filename: &str) -> bool {
    RE_EXTENSION.is_match(filename)
}

/// Check if a filename carries the legacy `-small@` descriptor.
pub fn is_small_image(filename: &str) -> bool {
    static RE_SMALL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-small@").unwrap());
    RE_SMALL.is_match(filename)
}

/// Parse a path or bare filename into an [`ImageFilename`].
///
/// Fails with `InvalidFilename` when the extension is not recognized and
/// with `IllegalMediaRule` when an `@` suffix is present but malformed.
/// A name without any `@` suffix is legal and yields an empty query list.
pub fn parse_filename(path: &str) -> Result<ImageFilename> {
    let basename = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path);

    let caps = RE_EXTENSION
        .captures(basename)
        .ok_or_else(|| ImagerError::InvalidFilename(basename.to_string()))?;
    let stem = &caps[1];
    let extension = caps[2].to_ascii_lowercase();

    let (classname, queries) = match stem.rsplit_once('@') {
        Some((name, rule)) => {
            if name.is_empty() || !RE_MEDIA_RULE.is_match(rule) {
                return Err(ImagerError::IllegalMediaRule(
                    rule.to_string(),
                    basename.to_string(),
                ));
            }
            (
                name.to_string(),
                rule.split(QUERY_SEPARATOR).map(str::to_string).collect(),
            )
        }
        None => (stem.to_string(), Vec::new()),
    };

    Ok(ImageFilename {
        classname,
        extension,
        queries,
    })
}

/// Raw media rule of a filename: the substring between `@` and the
/// extension, or `None` when the name carries no suffix.
pub fn media_rule_of(filename: &str) -> Option<&str> {
    let caps = RE_EXTENSION.captures(filename)?;
    let stem = caps.get(1)?.as_str();
    stem.rsplit_once('@').map(|(_, rule)| rule)
}

/// Scan for the first `<number>x` ratio descriptor.
///
/// Works on a full filename (only the `@` suffix is scanned, so digits in
/// the class name are ignored) or on a bare query string like `640w^2x`.
/// A filename without any `@` suffix carries no ratio at all. Not a full
/// grammar pass: legacy names carry the ratio directly.
pub fn scan_ratio(s: &str) -> Option<f64> {
    static RE_RATIO: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)x").unwrap());

    let haystack = match s.rsplit_once('@') {
        Some((_, suffix)) => suffix,
        None if is_image(s) => return None,
        None => s,
    };
    RE_RATIO
        .captures(haystack)
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_extensions() {
        for ext in IMAGE_EXTENSIONS {
            assert!(is_image(&format!("noodle.{ext}")), "{ext}");
            assert!(is_image(&format!("noodle.{}", ext.to_uppercase())), "{ext}");
        }
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!is_image("noodle.ping"));
        assert!(!is_image("noodle.psd"));
        assert!(!is_image("noodle.pdf"));
        assert!(!is_image("noodle.bmp"));
        assert!(!is_image("noodle"));
    }

    #[test]
    fn detects_small_descriptor() {
        assert!(is_small_image("poodle-small@1x.jpg"));
        assert!(!is_small_image("poodle@1x.jpg"));
    }

    #[test]
    fn parses_plain_filename() {
        let parsed = parse_filename("noodle.jpg").unwrap();
        assert_eq!(parsed.classname, "noodle");
        assert_eq!(parsed.extension, "jpg");
        assert!(parsed.queries.is_empty());
    }

    #[test]
    fn parses_filename_with_single_query() {
        let parsed = parse_filename("/path/to/noodle@1x^640w.jpg").unwrap();
        assert_eq!(parsed.classname, "noodle");
        assert_eq!(parsed.extension, "jpg");
        assert_eq!(parsed.queries, vec!["1x^640w"]);
    }

    #[test]
    fn parses_filename_with_alternative_queries() {
        let parsed = parse_filename("noodle@640w^2x,1x.jpg").unwrap();
        assert_eq!(parsed.classname, "noodle");
        assert_eq!(parsed.queries, vec!["640w^2x", "1x"]);
    }

    #[test]
    fn keeps_small_suffix_in_classname() {
        let parsed = parse_filename("poodle-small@2x.jpg").unwrap();
        assert_eq!(parsed.classname, "poodle-small");
    }

    #[test]
    fn rejects_unknown_extension() {
        assert!(matches!(
            parse_filename("noodle@1x.psd"),
            Err(ImagerError::InvalidFilename(_))
        ));
    }

    #[test]
    fn rejects_malformed_media_rule() {
        assert!(matches!(
            parse_filename("noodle@1z.jpg"),
            Err(ImagerError::IllegalMediaRule(..))
        ));
        assert!(matches!(
            parse_filename("noodle@.jpg"),
            Err(ImagerError::IllegalMediaRule(..))
        ));
    }

    #[test]
    fn media_rule_extraction() {
        assert_eq!(media_rule_of("noodle.jpg"), None);
        assert_eq!(media_rule_of("noodle@1x.jpg"), Some("1x"));
        assert_eq!(media_rule_of("noodle@1x^640w.jpg"), Some("1x^640w"));
        assert_eq!(media_rule_of("noodle@640w^2x,1x.jpg"), Some("640w^2x,1x"));
    }

    #[test]
    fn scans_ratio_from_filename_and_query() {
        assert_eq!(scan_ratio("noodle@1.5x.png"), Some(1.5));
        assert_eq!(scan_ratio("2x"), Some(2.0));
        assert_eq!(scan_ratio("640w^1x"), Some(1.0));
        assert_eq!(scan_ratio("640w"), None);
        assert_eq!(scan_ratio("noodle.png"), None);
        // digits in the class name are not a ratio
        assert_eq!(scan_ratio("box2x-icon@640w.png"), None);
    }

    #[test]
    fn suffix_free_filename_carries_no_ratio() {
        assert_eq!(scan_ratio("logo2x.png"), None);
        assert_eq!(scan_ratio("icon-1.5x.jpg"), None);
    }
}
