use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported output format for: {0} (expected .png, .svg or .html)")]
    UnsupportedFormat(String),

    #[error("Point arrays differ in length: x={x}, y={y}, colors={colors}, sizes={sizes}")]
    LengthMismatch {
        x: usize,
        y: usize,
        colors: usize,
        sizes: usize,
    },

    #[error("Invalid value range: low ({low}) must be smaller than high ({high})")]
    InvalidRange { low: i64, high: i64 },

    #[error("Alpha must be between 0 and 1, got {0}")]
    InvalidAlpha(f64),

    #[error("Marker size must not be negative, got {0}")]
    InvalidSize(i64),

    #[error("Failed to load font from {0}")]
    Font(PathBuf),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize data to JSON")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Failed to encode PNG image")]
    ImageEncoding(#[from] image::ImageError),
}
