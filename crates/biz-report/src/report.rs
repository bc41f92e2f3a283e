use std::path::{Path, PathBuf};

use crate::block::{Block, ImageIssue, MissingImageWarning};
use crate::error::ReportError;
use crate::layout::{self, PRINTABLE_WIDTH};
use crate::pdf;

/// File name used when the requested one is empty.
pub const DEFAULT_FILENAME: &str = "report.pdf";

/// Subdirectory of the base directory that receives every saved report.
pub const REPORTS_DIR: &str = "reports";

/// A PDF report under construction.
///
/// Blocks are appended in order and rendered only by [`Report::save`].
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    base_dir: PathBuf,
    blocks: Vec<Block>,
    warnings: Vec<MissingImageWarning>,
    image_width_mm: f32,
}

impl Report {
    /// Start a report whose first block is `title`. Saved files go to
    /// `<base_dir>/reports/`.
    #[must_use]
    pub fn new(title: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        let title = title.into();
        Self {
            blocks: vec![Block::Title(title.clone())],
            title,
            base_dir: base_dir.into(),
            warnings: Vec::new(),
            image_width_mm: PRINTABLE_WIDTH,
        }
    }

    /// Width images are scaled to. Clamped to the printable width at layout.
    #[must_use]
    pub const fn with_image_width(mut self, width_mm: f32) -> Self {
        self.image_width_mm = width_mm;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Images that were replaced by placeholders.
    #[must_use]
    pub fn warnings(&self) -> &[MissingImageWarning] {
        &self.warnings
    }

    pub fn add_text(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Text(text.into()));
    }

    /// Append a "Report generated on:" line with the local time.
    pub fn add_timestamp(&mut self) {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        self.add_text(format!("Report generated on: {now}"));
    }

    /// Append an image. A path that does not exist, or does not decode as an
    /// image, becomes a placeholder line and a recorded warning instead.
    pub fn add_image(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let issue = if path.is_file() {
            match printpdf::image_crate::image_dimensions(path) {
                Ok((width_px, height_px)) => {
                    self.blocks.push(Block::Image {
                        path: path.to_path_buf(),
                        width_px,
                        height_px,
                    });
                    return;
                }
                Err(error) => ImageIssue::Unreadable(error.to_string()),
            }
        } else {
            ImageIssue::NotFound
        };

        let warning = MissingImageWarning {
            path: path.to_path_buf(),
            issue,
        };
        tracing::warn!(%warning, "image replaced by placeholder");
        self.blocks.push(Block::Placeholder(warning.placeholder()));
        self.warnings.push(warning);
    }

    /// Render to `<base_dir>/reports/<name>` and return that path.
    ///
    /// Only the final component of `filename` is used; an empty name falls
    /// back to [`DEFAULT_FILENAME`]. An existing file is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] when the directory or file cannot be
    /// written and [`ReportError::Pdf`] when the document cannot be built.
    pub fn save(&self, filename: &str) -> Result<PathBuf, ReportError> {
        let dir = self.base_dir.join(REPORTS_DIR);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(output_name(filename));

        let pages = layout::paginate(&self.blocks, self.image_width_mm);
        pdf::write(&path, &crate::text::normalize(&self.title), &pages)?;
        tracing::info!(
            path = %path.display(),
            pages = pages.len(),
            warnings = self.warnings.len(),
            "saved report"
        );
        Ok(path)
    }
}

/// Final path component of `filename`, either separator style.
fn output_name(filename: &str) -> &str {
    match filename.rsplit(['/', '\\']).next().map(str::trim) {
        Some(name) if !name.is_empty() && name != "." && name != ".." => name,
        _ => DEFAULT_FILENAME,
    }
}
