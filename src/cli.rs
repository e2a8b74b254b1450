use crate::colormap::Colormap;
use crate::processing::Marker;
use clap::Parser;
use std::path::PathBuf;

/// Largest accepted figure side in pixels.
pub const MAX_FIGURE_SIDE: i64 = 16_384;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "A tool to render a seeded random scatter plot to PNG, SVG or interactive HTML."
)]
pub struct Cli {
    /// The file to write the plot to.
    /// The format is taken from the extension (png, svg, html).
    #[arg(required = true)]
    pub output_path: PathBuf,

    /// Seed for the random number generator.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of points to generate.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub points: usize,

    /// Inclusive lower bound for the color and size values.
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    pub low: i64,

    /// Exclusive upper bound for the color and size values.
    #[arg(long, default_value_t = 101, allow_negative_numbers = true)]
    pub high: i64,

    /// Color map used to turn color values into colors.
    #[arg(long, value_enum, default_value_t = Colormap::Viridis)]
    pub colormap: Colormap,

    /// Marker shape drawn for each point.
    #[arg(long, value_enum, default_value_t = Marker::Circle)]
    pub marker: Marker,

    /// Marker opacity, between 0 (transparent) and 1 (opaque).
    #[arg(long, default_value_t = 0.5)]
    pub alpha: f64,

    /// Title drawn above the plot.
    #[arg(long, default_value = "Scatter Plot")]
    pub title: String,

    /// Label of the horizontal axis.
    #[arg(long, default_value = "X")]
    pub x_label: String,

    /// Label of the vertical axis.
    #[arg(long, default_value = "Y")]
    pub y_label: String,

    /// Figure width in pixels.
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..=MAX_FIGURE_SIDE))]
    pub width: u32,

    /// Figure height in pixels.
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(1..=MAX_FIGURE_SIDE))]
    pub height: u32,

    /// TrueType font used for the title and labels.
    /// Defaults to the first common system font found.
    /// Checked for every output format; only PNG and SVG draw with it.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Print debug info about the generated data and the rendering
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
