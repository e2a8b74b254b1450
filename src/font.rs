//! TrueType font discovery for text on PNG and SVG output.
//!
//! `plotters` draws text through `ab_glyph`, which only knows fonts that were
//! registered explicitly. The font is registered under the `sans-serif`
//! family, which is what chart captions and tick labels ask for.

use crate::error::AppError;
use plotters::style::{register_font, FontStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Common locations of a regular sans-serif font, probed in order.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static SYSTEM_FONT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Registers a font for text rendering and returns the path it came from.
///
/// With an explicit path the font must load. Without one the system
/// candidates are probed once per process; `Ok(None)` means no font was
/// found and text cannot be drawn.
///
/// # Errors
///
/// Returns `AppError::Font` if an explicitly requested font cannot be read
/// or parsed.
pub fn load_font(explicit: Option<&Path>) -> Result<Option<PathBuf>, AppError> {
    if let Some(path) = explicit {
        register_from(path)?;
        return Ok(Some(path.to_path_buf()));
    }

    let found = SYSTEM_FONT.get_or_init(|| {
        SYSTEM_FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| register_from(path).is_ok())
            .map(Path::to_path_buf)
    });
    Ok(found.clone())
}

fn register_from(path: &Path) -> Result<(), AppError> {
    let bytes = fs::read(path).map_err(|_| AppError::Font(path.to_path_buf()))?;
    // The registry keeps the font for the rest of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font("sans-serif", FontStyle::Normal, bytes)
        .map_err(|_| AppError::Font(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_explicit_font_is_an_error() {
        let result = load_font(Some(Path::new("/definitely/not/a/font.ttf")));
        assert!(matches!(result, Err(AppError::Font(_))));
    }

    #[test]
    fn garbage_explicit_font_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a font").unwrap();
        let result = load_font(Some(file.path()));
        assert!(matches!(result, Err(AppError::Font(_))));
    }

    #[test]
    fn probing_is_stable() {
        let first = load_font(None).unwrap();
        let second = load_font(None).unwrap();
        assert_eq!(first, second);
    }
}
