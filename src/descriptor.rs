//! Descriptor expression parsing.
//!
//! A descriptor is one atomic token of the filename DSL: a number followed
//! by a feature letter, e.g. `640w`, `2x`, `768h`. Each maps to a single
//! CSS media-feature expression.

use crate::error::{ImagerError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Media feature addressed by a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFeature {
    /// `x` — device pixel ratio, unitless.
    PixelRatio,
    /// `w` — viewport width in px.
    Width,
    /// `h` — viewport height in px.
    Height,
}

/// Whether expressions render with a `min-` or `max-` feature prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureMode {
    Min,
    Max,
}

impl MediaFeature {
    /// CSS feature name for the given mode, e.g. `max-width`.
    pub const fn name(self, mode: FeatureMode) -> &'static str {
        match (mode, self) {
            (FeatureMode::Min, MediaFeature::PixelRatio) => "min-device-pixel-ratio",
            (FeatureMode::Min, MediaFeature::Width) => "min-width",
            (FeatureMode::Min, MediaFeature::Height) => "min-height",
            (FeatureMode::Max, MediaFeature::PixelRatio) => "max-device-pixel-ratio",
            (FeatureMode::Max, MediaFeature::Width) => "max-width",
            (FeatureMode::Max, MediaFeature::Height) => "max-height",
        }
    }

    /// Unit suffix appended at render time. Pixel ratios are unitless.
    const fn unit(self) -> &'static str {
        match self {
            MediaFeature::PixelRatio => "",
            MediaFeature::Width | MediaFeature::Height => "px",
        }
    }
}

/// One parsed media-feature constraint.
///
/// The stored value is the bare number; units are applied only when the
/// expression is rendered as a string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaExpression {
    pub feature: MediaFeature,
    pub value: f64,
}

impl MediaExpression {
    /// Render as a parenthesized CSS media expression, e.g.
    /// `(max-width: 640px)` or `(max-device-pixel-ratio: 1.5)`.
    pub fn render(&self, mode: FeatureMode) -> String {
        format!(
            "({}: {}{})",
            self.feature.name(mode),
            self.value,
            self.feature.unit()
        )
    }
}

/// Parse one descriptor token into a [`MediaExpression`].
///
/// The token must match `<number>(x|w|h)` exactly. Bare feature letters,
/// combined tokens (`640w^2x`), and non-numeric prefixes are rejected.
pub fn parse_descriptor(token: &str) -> Result<MediaExpression> {
    static RE_DESCRIPTOR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^([0-9.]+)(x|w|h)$").unwrap());

    let caps = RE_DESCRIPTOR
        .captures(token)
        .ok_or_else(|| ImagerError::IllegalDescriptor(token.to_string()))?;

    // The char class admits strings like `1.2.3` that are not numbers.
    let value: f64 = caps[1]
        .parse()
        .map_err(|_| ImagerError::IllegalDescriptor(token.to_string()))?;

    let feature = match &caps[2] {
        "x" => MediaFeature::PixelRatio,
        "w" => MediaFeature::Width,
        _ => MediaFeature::Height,
    };

    Ok(MediaExpression { feature, value })
}

/// Parse and render a descriptor token in one step.
pub fn render_descriptor(token: &str, mode: FeatureMode) -> Result<String> {
    Ok(parse_descriptor(token)?.render(mode))
}
