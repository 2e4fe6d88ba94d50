//! Top-level CSS generation.
//!
//! Reads a directory listing, validates every filename's DSL suffix,
//! probes all image dimensions in parallel, and renders the four fixed
//! scenario blocks: unconstrained, 2x, mobile-width, mobile-width × 2x.

use crate::debug;
use crate::error::{ImagerError, Result};
use crate::filename::{is_image, is_small_image, parse_filename, scan_ratio};
use crate::metrics;
use crate::query::{compile_query, media_query};
use crate::render::{MediaRule, generate_css, media_queries_2x};
use crate::ruleset::{RuleSet, RuleSetOptions, build_rule_set};
use rayon::prelude::*;
use std::path::Path;

/// Typical media query expression for mobile widths.
const MOBILE_MAX_WIDTH_EXPRESSION: &str = "(max-width: 480px)";

/// Options for one generation pass.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// URL path used in `background-image` instead of the directory path.
    pub url_path: Option<String>,
    /// Prefix prepended to every CSS class name.
    pub class_prefix: String,
    /// Indentation unit; already unescaped.
    pub tab: String,
}

/// Generate the stylesheet for one image directory.
///
/// Any failure — unreadable directory, malformed DSL suffix, unprobeable
/// image — aborts the whole pass; no partial CSS is ever produced.
pub fn generate(dir: &Path, options: &GenerateOptions) -> Result<String> {
    let images = list_images(dir)?;
    if images.is_empty() {
        return Err(ImagerError::NoImagesFound(dir.to_path_buf()));
    }
    debug!("scan"; "found {} images in {}", images.len(), dir.display());

    // Validate every DSL suffix up front so a malformed descriptor aborts
    // before any image is probed.
    for filename in &images {
        let parsed = parse_filename(filename)?;
        for query in &parsed.queries {
            compile_query(query)?;
        }
    }

    let scenarios = partition_scenarios(&images);
    let rule_set_options = RuleSetOptions {
        url_path: options.url_path.clone(),
        class_prefix: options.class_prefix.clone(),
    };

    // Fan out one probe per image. All must succeed; the first error wins
    // and completion order never affects emission order.
    let base_path = dir.to_string_lossy();
    let jobs: Vec<(usize, &str)> = scenarios
        .iter()
        .enumerate()
        .flat_map(|(index, scenario)| {
            scenario.images.iter().map(move |f| (index, f.as_str()))
        })
        .collect();
    let built: Vec<(usize, RuleSet)> = jobs
        .par_iter()
        .map(|&(index, filename)| {
            let metrics = metrics::probe(&dir.join(filename))?;
            let rule_set = build_rule_set(filename, &base_path, metrics, &rule_set_options)?;
            Ok((index, rule_set))
        })
        .collect::<Result<_>>()?;

    let mut rules: Vec<MediaRule> = scenarios
        .into_iter()
        .map(|scenario| MediaRule {
            queries: scenario.queries,
            rule_sets: Vec::new(),
        })
        .collect();
    for (index, rule_set) in built {
        rules[index].rule_sets.push(rule_set);
    }

    Ok(generate_css(&rules, &options.tab))
}

/// One fixed scenario: its query context plus the filenames it covers.
struct Scenario {
    queries: Option<Vec<String>>,
    images: Vec<String>,
}

/// Partition filenames into the four fixed scenario groups by the legacy
/// `-small` descriptor and the scanned pixel ratio.
fn partition_scenarios(images: &[String]) -> Vec<Scenario> {
    let select = |small: bool, double: bool| -> Vec<String> {
        images
            .iter()
            .filter(|f| is_small_image(f) == small)
            .filter(|f| (scan_ratio(f).unwrap_or(1.0) > 1.0) == double)
            .cloned()
            .collect()
    };

    vec![
        Scenario {
            queries: None,
            images: select(false, false),
        },
        Scenario {
            queries: Some(media_queries_2x::<&str>(&[])),
            images: select(false, true),
        },
        Scenario {
            queries: Some(vec![media_query(&[MOBILE_MAX_WIDTH_EXPRESSION])]),
            images: select(true, false),
        },
        Scenario {
            queries: Some(media_queries_2x(&[MOBILE_MAX_WIDTH_EXPRESSION])),
            images: select(true, true),
        },
    ]
}

/// List qualifying image filenames in one directory, top level only.
///
/// The listing is sorted lexically so output is deterministic regardless of
/// filesystem iteration order.
fn list_images(dir: &Path) -> Result<Vec<String>> {
    let entries =
        std::fs::read_dir(dir).map_err(|err| ImagerError::DirectoryRead(dir.to_path_buf(), err))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ImagerError::DirectoryRead(dir.to_path_buf(), err))?;
        if let Ok(name) = entry.file_name().into_string()
            && is_image(&name)
        {
            images.push(name);
        }
    }
    images.sort();
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        image::RgbaImage::new(width, height)
            .save(dir.join(name))
            .unwrap();
    }

    fn write_jpg(dir: &Path, name: &str, width: u32, height: u32) {
        image::RgbImage::new(width, height)
            .save(dir.join(name))
            .unwrap();
    }

    fn options() -> GenerateOptions {
        GenerateOptions {
            url_path: Some("img".to_string()),
            class_prefix: String::new(),
            tab: "  ".to_string(),
        }
    }

    #[test]
    fn generates_four_scenario_blocks() {
        let dir = tempfile::tempdir().unwrap();
        write_jpg(dir.path(), "poodle@1x.jpg", 64, 64);
        write_jpg(dir.path(), "poodle@2x.jpg", 128, 128);
        write_jpg(dir.path(), "poodle-small@1x.jpg", 28, 28);
        write_jpg(dir.path(), "poodle-small@2x.jpg", 56, 56);

        let css = generate(dir.path(), &options()).unwrap();

        let expected = r#"/* Generated by background-imager */

.poodle {
  background-image: url("img/poodle@1x.jpg");
  width: 64px;
  height: 64px;
}

@media
only screen and (-webkit-min-device-pixel-ratio: 2),
only screen and (min--moz-device-pixel-ratio: 2),
only screen and (-o-min-device-pixel-ratio: 2/1),
only screen and (min-device-pixel-ratio: 2),
only screen and (min-resolution: 192dpi),
only screen and (min-resolution: 2dppx) {
  .poodle {
    background-image: url("img/poodle@2x.jpg");
    background-size: 64px 64px;
  }
}

@media
only screen and (max-width: 480px) {
  .poodle-small {
    background-image: url("img/poodle-small@1x.jpg");
    width: 28px;
    height: 28px;
  }
}

@media
only screen and (max-width: 480px) and (-webkit-min-device-pixel-ratio: 2),
only screen and (max-width: 480px) and (min--moz-device-pixel-ratio: 2),
only screen and (max-width: 480px) and (-o-min-device-pixel-ratio: 2/1),
only screen and (max-width: 480px) and (min-device-pixel-ratio: 2),
only screen and (max-width: 480px) and (min-resolution: 192dpi),
only screen and (max-width: 480px) and (min-resolution: 2dppx) {
  .poodle-small {
    background-image: url("img/poodle-small@2x.jpg");
    background-size: 28px 28px;
  }
}

"#;
        assert_eq!(css, expected);
    }

    #[test]
    fn unconstrained_image_renders_without_media_wrapper() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "noodle.png", 32, 16);

        let css = generate(dir.path(), &options()).unwrap();
        assert!(css.contains(
            ".noodle {\n  background-image: url(\"img/noodle.png\");\n  width: 32px;\n  height: 16px;\n}\n"
        ));
    }

    #[test]
    fn suffix_free_name_with_digits_stays_unconstrained() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "logo2x.png", 32, 32);

        let css = generate(dir.path(), &options()).unwrap();
        // no DSL suffix: full size in the unconstrained block, no halving
        assert!(css.starts_with(
            "/* Generated by background-imager */\n\n.logo2x {\n  background-image: url(\"img/logo2x.png\");\n  width: 32px;\n  height: 32px;\n}\n"
        ));
        assert!(!css.contains("background-size"));
    }

    #[test]
    fn non_image_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "noodle@1x.png", 8, 8);
        std::fs::write(dir.path().join("readme.txt"), "not an image").unwrap();
        std::fs::write(dir.path().join("noodle.psd"), "not an image").unwrap();

        let css = generate(dir.path(), &options()).unwrap();
        assert!(css.contains(".noodle"));
        assert!(!css.contains("readme"));
        assert!(!css.contains("psd"));
    }

    #[test]
    fn empty_directory_fails_with_no_images_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            generate(dir.path(), &options()),
            Err(ImagerError::NoImagesFound(_))
        ));
    }

    #[test]
    fn missing_directory_fails_with_directory_read() {
        assert!(matches!(
            generate(&PathBuf::from("/nonexistent/images"), &options()),
            Err(ImagerError::DirectoryRead(..))
        ));
    }

    #[test]
    fn malformed_descriptor_aborts_the_render() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "good@1x.png", 8, 8);
        // `w` alone is inside the suffix character class but is not a
        // descriptor, so compilation fails
        write_png(dir.path(), "bad@w.png", 8, 8);

        assert!(matches!(
            generate(dir.path(), &options()),
            Err(ImagerError::IllegalDescriptor(_))
        ));
    }

    #[test]
    fn malformed_suffix_aborts_the_render() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "bad@2q.png", 8, 8);

        assert!(matches!(
            generate(dir.path(), &options()),
            Err(ImagerError::IllegalMediaRule(..))
        ));
    }

    #[test]
    fn unprobeable_image_aborts_the_render() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "good@1x.png", 8, 8);
        std::fs::write(dir.path().join("broken@1x.png"), "not a png").unwrap();

        assert!(matches!(
            generate(dir.path(), &options()),
            Err(ImagerError::ImageMetrics(..))
        ));
    }

    #[test]
    fn class_prefix_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "noodle@1x.png", 8, 8);

        let opts = GenerateOptions {
            class_prefix: "bg-".to_string(),
            ..options()
        };
        let css = generate(dir.path(), &opts).unwrap();
        assert!(css.contains(".bg-noodle {"));
    }

    #[test]
    fn url_path_defaults_to_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "noodle@1x.png", 8, 8);

        let opts = GenerateOptions {
            url_path: None,
            class_prefix: String::new(),
            tab: "  ".to_string(),
        };
        let css = generate(dir.path(), &opts).unwrap();
        let expected_url = format!("url(\"{}/noodle@1x.png\")", dir.path().display());
        assert!(css.contains(&expected_url));
    }
}
