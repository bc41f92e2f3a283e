//! PDF serialization of laid-out pages.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::image_crate::{DynamicImage, GenericImageView, io::Reader as ImageReader};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference,
};

use crate::error::ReportError;
use crate::layout::{BODY_SIZE, Op, PAGE_HEIGHT, PAGE_WIDTH, Page};
use crate::text::PT_TO_MM;

/// Resolution images are embedded at before scaling.
const IMAGE_DPI: f32 = 300.0;
const LAYER: &str = "content";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Write `pages` to `path`, replacing any existing file.
pub(crate) fn write(path: &Path, title: &str, pages: &[Page]) -> Result<(), ReportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(ReportError::pdf)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(ReportError::pdf)?,
    };

    for (idx, page) in pages.iter().enumerate() {
        let (page_idx, layer_idx) = if idx == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER)
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        for op in &page.ops {
            draw(&layer, &fonts, op);
        }
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(ReportError::pdf)?;
    Ok(())
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, op: &Op) {
    match op {
        Op::Text {
            text,
            x,
            y,
            size,
            bold,
        } => {
            let font = if *bold { &fonts.bold } else { &fonts.regular };
            layer.use_text(text.as_str(), *size, Mm(*x), Mm(*y), font);
        }
        Op::Image {
            path,
            x,
            y,
            width,
            height,
        } => match load_image(path) {
            Ok(image) => place_image(layer, &image, (*x, *y), (*width, *height)),
            Err(reason) => {
                // Probed fine when added; the file changed or is truncated.
                tracing::warn!(path = %path.display(), %reason, "image could not be embedded");
                let line = format!("[Unreadable image: {}]", path.display());
                layer.use_text(
                    crate::text::normalize(&line),
                    BODY_SIZE,
                    Mm(*x),
                    Mm(*y + *height - BODY_SIZE * PT_TO_MM),
                    &fonts.regular,
                );
            }
        },
    }
}

/// Decode to RGB; the embedded image has no alpha channel.
fn load_image(path: &Path) -> Result<DynamicImage, String> {
    let image = ImageReader::open(path)
        .map_err(|e| e.to_string())?
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .decode()
        .map_err(|e| e.to_string())?;
    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

#[allow(clippy::cast_precision_loss)]
fn place_image(
    layer: &PdfLayerReference,
    image: &DynamicImage,
    (x, y): (f32, f32),
    (width, height): (f32, f32),
) {
    let (width_px, height_px) = GenericImageView::dimensions(image);
    let natural_width = width_px.max(1) as f32 / IMAGE_DPI * 25.4;
    let natural_height = height_px.max(1) as f32 / IMAGE_DPI * 25.4;
    Image::from_dynamic_image(image).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            scale_x: Some(width / natural_width),
            scale_y: Some(height / natural_height),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
}
