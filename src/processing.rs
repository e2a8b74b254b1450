//! This module turns generated points and styling options into a plot description.
//!
//! It validates the points, works out the axis ranges and the color domain, and
//! resolves per-point colors and marker sizes so that every output format draws
//! the same picture.

use crate::cli::Cli;
use crate::colormap::{Colormap, Normalize, Rgb};
use crate::error::AppError;
use crate::generator::PointSet;
use clap::ValueEnum;

/// Resolution used to convert marker areas from points² to pixels.
pub const DPI: f64 = 100.0;

/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

/// Marker shape drawn for each point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Marker {
    #[default]
    Circle,
    Square,
    Triangle,
    Cross,
}

/// A container for all the data and configuration needed to render a plot.
///
/// This struct is the output of `prepare_plot_data` and the input of the
/// `plotter` module.
#[derive(Debug, Clone)]
pub struct PlotData {
    /// The title of the plot.
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// The points, validated to have four arrays of equal length.
    pub points: PointSet,
    pub colormap: Colormap,
    pub marker: Marker,
    /// Marker opacity in `[0, 1]`.
    pub alpha: f64,
    /// Figure size in pixels.
    pub width: u32,
    pub height: u32,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Domain used to map color values onto the colormap.
    pub color_norm: Normalize,
}

impl PlotData {
    /// The colormapped color of a color value.
    pub fn color_of(&self, value: i64) -> Rgb {
        self.colormap.sample(self.color_norm.apply(value as f64))
    }
}

/// Rejects value ranges that could produce negative marker sizes.
///
/// Sizes share `[low, high)` with the color values, so a negative `low` is
/// refused before any point is drawn.
pub fn check_size_range(cli: &Cli) -> Result<(), AppError> {
    if cli.low < 0 {
        return Err(AppError::InvalidSize(cli.low));
    }
    Ok(())
}

/// Validates the points and packages them with the styling from the CLI.
///
/// # Errors
///
/// Returns `AppError::LengthMismatch` if the point arrays differ in length,
/// `AppError::InvalidAlpha` if alpha is outside `[0, 1]`, and
/// `AppError::InvalidSize` if any size value is negative.
pub fn prepare_plot_data(points: PointSet, cli: &Cli) -> Result<PlotData, AppError> {
    // 1. Check the data itself.
    points.validate()?;
    if !(0.0..=1.0).contains(&cli.alpha) {
        return Err(AppError::InvalidAlpha(cli.alpha));
    }
    if let Some(&negative) = points.sizes.iter().find(|&&s| s < 0) {
        return Err(AppError::InvalidSize(negative));
    }

    // 2. Axis ranges and color domain.
    let x_range = axis_range(&points.x);
    let y_range = axis_range(&points.y);
    let color_norm = Normalize::from_values(&points.colors);

    if cli.debug {
        println!(
            "  -> X range: [{:.3}, {:.3}], Y range: [{:.3}, {:.3}]",
            x_range.0, x_range.1, y_range.0, y_range.1
        );
        println!(
            "  -> Color domain: [{}, {}] mapped with '{}'",
            color_norm.vmin,
            color_norm.vmax,
            cli.colormap.name()
        );
    }

    Ok(PlotData {
        title: cli.title.clone(),
        x_label: cli.x_label.clone(),
        y_label: cli.y_label.clone(),
        points,
        colormap: cli.colormap,
        marker: cli.marker,
        alpha: cli.alpha,
        width: cli.width,
        height: cli.height,
        x_range,
        y_range,
        color_norm,
    })
}

/// Computes an axis range covering all finite values plus a margin.
///
/// Empty data falls back to `[-1, 1]`; constant data is padded by 1 on each side.
pub fn axis_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }

    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    if (max - min).abs() < 1e-12 {
        return (min - 1.0, max + 1.0);
    }

    let pad = (max - min) * AXIS_MARGIN;
    (min - pad, max + pad)
}

/// Converts a marker size (an area in points²) to a radius in pixels.
pub fn marker_radius_px(size: i64) -> f64 {
    let diameter_pt = (size.max(0) as f64).sqrt();
    diameter_pt / 2.0 * DPI / 72.0
}
