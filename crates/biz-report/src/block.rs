use std::fmt;
use std::path::PathBuf;

/// One piece of report content, laid out top to bottom in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Document heading. Always the first block.
    Title(String),
    /// Body text. Newlines start new lines.
    Text(String),
    /// Raster image with its pixel dimensions.
    Image {
        path: PathBuf,
        width_px: u32,
        height_px: u32,
    },
    /// Stand-in for an image that could not be used.
    Placeholder(String),
}

/// Why an image became a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageIssue {
    NotFound,
    Unreadable(String),
}

/// Recorded when [`Report::add_image`](crate::Report::add_image) cannot use
/// its file. The report still saves; the image is replaced by a placeholder
/// line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingImageWarning {
    pub path: PathBuf,
    pub issue: ImageIssue,
}

impl MissingImageWarning {
    /// Line rendered in place of the image.
    #[must_use]
    pub fn placeholder(&self) -> String {
        match self.issue {
            ImageIssue::NotFound => format!("[Missing image: {}]", self.path.display()),
            ImageIssue::Unreadable(_) => format!("[Unreadable image: {}]", self.path.display()),
        }
    }
}

impl fmt::Display for MissingImageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issue {
            ImageIssue::NotFound => write!(f, "image not found: {}", self.path.display()),
            ImageIssue::Unreadable(reason) => {
                write!(f, "image unreadable: {} ({reason})", self.path.display())
            }
        }
    }
}
