//! The main library for the `randscatter` application.
//!
//! This crate generates seeded random points and renders them as a styled
//! scatter plot. It orchestrates the flow from command-line arguments to the
//! final PNG, SVG or HTML file. The primary entry point is the `run` function,
//! which takes the parsed CLI arguments and executes the plotting process.
//!
//! The library is structured into several modules:
//! - `cli`: Defines the command-line interface.
//! - `generator`: Seeded generation of coordinates, color values and sizes.
//! - `colormap`: Named color maps and color value normalization.
//! - `processing`: Validation, axis ranges and marker sizing.
//! - `font`: Font discovery for text on PNG and SVG output.
//! - `plotter`: Renders the prepared plot in the format the output path asks for.
//! - `error`: Defines the application's custom error type.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub mod cli;
pub mod colormap;
pub mod error;
pub mod font;
pub mod generator;
pub mod plotter;
pub mod processing;

use crate::cli::Cli;
use crate::generator::GeneratorConfig;
use crate::plotter::OutputFormat;

/// The main entry point for the application logic.
///
/// This function orchestrates the entire process:
/// 1.  It resolves the output format from the output path, so an unsupported
///     extension fails before any work is done.
/// 2.  It generates the points and prepares the plot description.
/// 3.  It renders the plot and writes it to the output path.
///
/// # Errors
///
/// Returns an error if generation, rendering or writing the file fails.
pub fn run(cli: &Cli) -> Result<()> {
    // 1. Decide what to write
    let format = OutputFormat::from_path(&cli.output_path)?;
    processing::check_size_range(cli)?;

    // 2. Generate the data
    println!("Generating {} points (seed {})...", cli.points, cli.seed);
    let config = GeneratorConfig {
        seed: cli.seed,
        count: cli.points,
        low: cli.low,
        high: cli.high,
    };
    let points = generator::generate(&config)?;

    if cli.debug {
        println!(
            "  -> Colors and sizes drawn from [{}, {})",
            config.low, config.high
        );
        println!("  -> Output format: {:?}", format);
    }

    // 3. Prepare and render the plot
    let plot_data = processing::prepare_plot_data(points, cli)?;
    let draw_text = resolve_text_support(format, cli)?;
    let bytes = plotter::render(&plot_data, format, draw_text)
        .with_context(|| format!("Failed to render plot for {}", cli.output_path.display()))?;

    // 4. Save the output
    write_output(&cli.output_path, &bytes)?;
    println!("  -> Plot saved to '{}'", cli.output_path.display());

    Ok(())
}

/// Loads a font when the output format needs one to draw text.
///
/// Missing system fonts are not fatal: the plot is drawn without text and a
/// warning is printed. An explicit `--font` that cannot be loaded is an error
/// for every format, even those that do not draw with it.
fn resolve_text_support(format: OutputFormat, cli: &Cli) -> Result<bool> {
    if !format.needs_font() {
        if let Some(path) = cli.font.as_deref() {
            font::load_font(Some(path))?;
        }
        return Ok(true);
    }

    match font::load_font(cli.font.as_deref())? {
        Some(path) => {
            if cli.debug {
                println!("  -> Using font '{}'", path.display());
            }
            Ok(true)
        }
        None => {
            println!("  -> Warning: No usable font found. Rendering without title and labels.");
            Ok(false)
        }
    }
}

/// Writes the rendered bytes, creating the parent directory if needed.
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write output to {}", path.display()))?;
    Ok(())
}
