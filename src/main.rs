//! background-imager - responsive background-image CSS from filenames.
//!
//! Reads a directory of images whose filenames carry media descriptors
//! (`noodle@2x.png`, `poodle-small@1x.jpg`) and prints CSS classes with the
//! matching `@media` rules on stdout.

#![allow(dead_code)]

mod cli;
mod descriptor;
mod error;
mod filename;
mod generator;
mod logger;
mod metrics;
mod query;
mod render;
mod ruleset;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use generator::GenerateOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let options = GenerateOptions {
        url_path: cli.url_path,
        class_prefix: cli.class_prefix,
        tab: render::unescape_tab(&cli.tab_spacing),
    };

    let css = generator::generate(&cli.image_directory, &options)?;
    print!("{css}");
    Ok(())
}
