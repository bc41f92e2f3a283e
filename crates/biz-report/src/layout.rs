//! Page layout: turns blocks into positioned draw operations.
//!
//! Coordinates are millimetres from the bottom-left corner of an A4 page,
//! matching the PDF user space. Text `y` is the baseline; image `y` is the
//! bottom edge.

use std::path::PathBuf;

use crate::block::Block;
use crate::text::{self, PT_TO_MM};

pub(crate) const PAGE_WIDTH: f32 = 210.0;
pub(crate) const PAGE_HEIGHT: f32 = 297.0;
pub(crate) const MARGIN: f32 = 15.0;
pub(crate) const BODY_SIZE: f32 = 12.0;
pub(crate) const TITLE_SIZE: f32 = 18.0;
const LINE_SPACING: f32 = 1.3;
const BLOCK_GAP: f32 = 4.0;

pub(crate) const PRINTABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const PRINTABLE_HEIGHT: f32 = PAGE_HEIGHT - 2.0 * MARGIN;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
    },
    Image {
        path: PathBuf,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Page {
    pub ops: Vec<Op>,
}

/// Lay out `blocks`, images scaled to `image_width` (clamped to the
/// printable width). Always yields at least one page.
pub(crate) fn paginate(blocks: &[Block], image_width: f32) -> Vec<Page> {
    let mut cursor = Cursor::new();
    for block in blocks {
        match block {
            Block::Title(title) => cursor.text(title, TITLE_SIZE, true, true),
            Block::Text(body) | Block::Placeholder(body) => {
                cursor.text(body, BODY_SIZE, false, false);
            }
            Block::Image {
                path,
                width_px,
                height_px,
            } => cursor.image(path, (*width_px, *height_px), image_width),
        }
        cursor.y -= BLOCK_GAP;
    }
    cursor.finish()
}

struct Cursor {
    pages: Vec<Page>,
    current: Page,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Page::default(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn at_top(&self) -> bool {
        self.y >= PAGE_HEIGHT - MARGIN
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Start a new page unless `height` fits above the bottom margin.
    fn reserve(&mut self, height: f32) {
        if self.y - height < MARGIN && !self.at_top() {
            self.break_page();
        }
    }

    fn text(&mut self, body: &str, size: f32, bold: bool, centered: bool) {
        let line_height = size * LINE_SPACING * PT_TO_MM;
        let body = text::normalize(body);
        for line in text::wrap(&body, size, bold, PRINTABLE_WIDTH) {
            self.reserve(line_height);
            self.y -= line_height;
            if !line.is_empty() {
                let x = if centered {
                    ((PAGE_WIDTH - text::measure(&line, size, bold)) / 2.0).max(MARGIN)
                } else {
                    MARGIN
                };
                self.current.ops.push(Op::Text {
                    text: line,
                    x,
                    y: self.y,
                    size,
                    bold,
                });
            }
        }
    }

    fn image(&mut self, path: &std::path::Path, (width_px, height_px): (u32, u32), width: f32) {
        let (width, height) = fit_image(width_px, height_px, width);
        self.reserve(height);
        self.y -= height;
        self.current.ops.push(Op::Image {
            path: path.to_path_buf(),
            x: MARGIN,
            y: self.y,
            width,
            height,
        });
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Target size in millimetres, keeping the aspect ratio within one page.
#[allow(clippy::cast_precision_loss)]
fn fit_image(width_px: u32, height_px: u32, requested: f32) -> (f32, f32) {
    let aspect = height_px.max(1) as f32 / width_px.max(1) as f32;
    let width = requested.clamp(1.0, PRINTABLE_WIDTH);
    let height = width * aspect;
    if height > PRINTABLE_HEIGHT {
        (PRINTABLE_HEIGHT / aspect, PRINTABLE_HEIGHT)
    } else {
        (width, height)
    }
}
