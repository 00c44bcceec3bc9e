//! PDF output.
//!
//! Pages from the layout engine are replayed onto `printpdf` layers using the
//! built-in Helvetica faces, so no font files are needed at runtime.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Pt, Rect, Rgb,
};
use tracing::warn;

use crate::error::{ReportError, Result};
use crate::layout::{Color, DrawOp, Font, Page, PageGeometry};

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn pdf_color(color: Color) -> printpdf::Color {
    let (r, g, b) = color.unit();
    printpdf::Color::Rgb(Rgb::new(r, g, b, None))
}

fn pdf_error(err: impl std::fmt::Display) -> ReportError {
    ReportError::Pdf(err.to_string())
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        Ok(Self {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(pdf_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
        })
    }

    const fn get(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
        }
    }
}

/// Writes laid-out pages as a PDF document.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    title: String,
}

impl PdfWriter {
    /// Writer that stores `title` in the document info.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Render `pages` to PDF bytes.
    ///
    /// A required image that cannot be decoded fails the whole document; an
    /// optional one is skipped.
    pub fn render_to_bytes(&self, pages: &[Page]) -> Result<Vec<u8>> {
        let first = pages.first().map_or_else(PageGeometry::letter, |p| p.geometry);
        let (doc, page_index, layer_index) = PdfDocument::new(
            self.title.as_str(),
            mm(first.width),
            mm(first.height),
            "Layer 1",
        );
        let fonts = Fonts::load(&doc)?;

        let mut layer = doc.get_page(page_index).get_layer(layer_index);
        for (index, page) in pages.iter().enumerate() {
            if index > 0 {
                let (page_index, layer_index) = doc.add_page(
                    mm(page.geometry.width),
                    mm(page.geometry.height),
                    "Layer 1",
                );
                layer = doc.get_page(page_index).get_layer(layer_index);
            }
            for op in &page.ops {
                draw(&layer, &fonts, op)?;
            }
        }

        doc.save_to_bytes().map_err(pdf_error)
    }

    /// Render `pages` and write them to `path`, creating parent directories.
    pub fn write_pdf(&self, pages: &[Page], path: &Path) -> Result<()> {
        let bytes = self.render_to_bytes(pages)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ReportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, bytes).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, op: &DrawOp) -> Result<()> {
    match op {
        DrawOp::Text {
            x,
            y,
            text,
            font,
            size,
            color,
        } => {
            layer.set_fill_color(pdf_color(*color));
            layer.use_text(text.as_str(), *size, mm(*x), mm(*y), fonts.get(*font));
        }
        DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => {
            layer.set_fill_color(pdf_color(*color));
            let rect = Rect::new(mm(*x), mm(*y), mm(x + width), mm(y + height))
                .with_mode(PaintMode::Fill);
            layer.add_rect(rect);
        }
        DrawOp::Line {
            from,
            to,
            width,
            color,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*width);
            layer.add_line(Line {
                points: vec![
                    (Point::new(mm(from.0), mm(from.1)), false),
                    (Point::new(mm(to.0), mm(to.1)), false),
                ],
                is_closed: false,
            });
        }
        DrawOp::Image {
            path,
            x,
            y,
            width,
            height,
            required,
        } => match load_png(path) {
            Ok(image) => {
                let px_width = image.image.width.0 as f32;
                let px_height = image.image.height.0 as f32;
                // At 72 dpi one pixel is one point.
                image.add_to_layer(
                    layer.clone(),
                    ImageTransform {
                        translate_x: Some(mm(*x)),
                        translate_y: Some(mm(*y)),
                        scale_x: Some(width / px_width),
                        scale_y: Some(height / px_height),
                        dpi: Some(72.0),
                        ..Default::default()
                    },
                );
            }
            Err(message) if *required => {
                return Err(ReportError::Image {
                    path: path.clone(),
                    message,
                });
            }
            Err(message) => {
                warn!(path = %path.display(), %message, "skipping unreadable image");
            }
        },
    }
    Ok(())
}

fn load_png(path: &Path) -> std::result::Result<Image, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let decoder = PngDecoder::new(BufReader::new(file)).map_err(|e| e.to_string())?;
    let image = Image::try_from(decoder).map_err(|e| e.to_string())?;
    if image.image.width.0 == 0 || image.image.height.0 == 0 {
        return Err("image has no pixels".to_string());
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Align, INCH};
    use std::path::PathBuf;

    fn text_page(number: usize, text: &str) -> Page {
        Page {
            number,
            geometry: PageGeometry::letter(),
            ops: vec![
                DrawOp::aligned_text(
                    text,
                    Align::Left,
                    INCH,
                    700.0,
                    Font::Bold,
                    12.0,
                    Color::BLACK,
                ),
                DrawOp::FillRect {
                    x: INCH,
                    y: 600.0,
                    width: 100.0,
                    height: 20.0,
                    color: Color::LIGHT_GREY,
                },
                DrawOp::Line {
                    from: (INCH, 600.0),
                    to: (INCH + 100.0, 600.0),
                    width: 1.0,
                    color: Color::BLACK,
                },
            ],
        }
    }

    fn image_page(path: PathBuf, required: bool) -> Page {
        Page {
            number: 1,
            geometry: PageGeometry::letter(),
            ops: vec![DrawOp::Image {
                path,
                x: INCH,
                y: INCH,
                width: 100.0,
                height: 50.0,
                required,
            }],
        }
    }

    #[test]
    fn test_renders_pdf_bytes() {
        let pages = vec![text_page(1, "Finance Summary"), text_page(2, "Ledger")];
        let bytes = PdfWriter::new("report").render_to_bytes(&pages).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_missing_required_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let page = image_page(dir.path().join("missing.png"), true);

        let err = PdfWriter::new("report")
            .render_to_bytes(&[page])
            .unwrap_err();
        assert!(matches!(err, ReportError::Image { .. }));
    }

    #[test]
    fn test_undecodable_optional_image_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        fs::write(&logo, b"not a png").unwrap();

        let bytes = PdfWriter::new("report")
            .render_to_bytes(&[image_page(logo, false)])
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("nested").join("out.pdf");

        PdfWriter::new("report")
            .write_pdf(&[text_page(1, "x")], &path)
            .unwrap();

        let written = fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF"));
    }
}
