//! Runtime font registration for chart text.
//!
//! Plotters is built without a system font backend, so captions and labels
//! need a TrueType file registered under the `sans-serif` family. The first
//! call wins for the lifetime of the process.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{FontStyle, register_font};

/// Family name every chart style refers to.
pub const FAMILY: &str = "sans-serif";

/// Well-known locations tried when no font is configured.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Make sure a font is registered. Returns `true` when chart text can be
/// drawn.
pub fn ensure_font(configured: Option<&Path>) -> bool {
    REGISTERED
        .get_or_init(|| register_first(configured))
        .is_some()
}

fn register_first(configured: Option<&Path>) -> Option<PathBuf> {
    let candidates = configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        // Plotters keeps a reference to the font data for the whole process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                tracing::debug!(font = %path.display(), "registered chart font");
                return Some(path);
            }
            Err(_) => {
                tracing::warn!(font = %path.display(), "unusable chart font");
            }
        }
    }

    tracing::warn!("no TrueType font found; charts will be drawn without text");
    None
}
