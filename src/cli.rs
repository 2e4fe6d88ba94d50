//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Derive responsive background-image CSS classes from descriptor-tagged
/// image filenames
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Directory containing descriptor-tagged images (top level only)
    #[arg(value_name = "IMAGE_DIRECTORY", value_hint = clap::ValueHint::DirPath)]
    pub image_directory: PathBuf,

    /// Use specified path instead of the directory path for image URLs
    #[arg(short, long, value_name = "URL")]
    pub url_path: Option<String>,

    /// Add string prefix to CSS class names
    #[arg(short, long, value_name = "PREFIX", default_value = "")]
    pub class_prefix: String,

    /// String to use as one indent level; `\t` and `\s` escapes are honored
    #[arg(short, long, value_name = "TAB", default_value = crate::render::DEFAULT_TAB)]
    pub tab_spacing: String,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,
}
