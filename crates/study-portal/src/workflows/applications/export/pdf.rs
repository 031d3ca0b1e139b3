//! PDF rendering through printpdf.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::layout::{FontWeight, TextDocument};
use super::RenderError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

/// Turns a laid-out text document into PDF bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &TextDocument) -> Result<Vec<u8>, RenderError>;
}

/// Single-page A4 renderer using the built-in Helvetica faces.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintPdfRenderer;

impl DocumentRenderer for PrintPdfRenderer {
    fn render(&self, document: &TextDocument) -> Result<Vec<u8>, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            &document.title,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;

        let current_layer = doc.get_page(page).get_layer(layer);

        for line in &document.lines {
            let face = match line.weight {
                FontWeight::Regular => &font,
                FontWeight::Bold => &font_bold,
            };
            // printpdf measures from the bottom edge.
            current_layer.use_text(
                line.text.as_str(),
                line.font_size,
                Mm(line.x_mm),
                Mm(PAGE_HEIGHT_MM - line.y_mm),
                face,
            );
        }

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf).map_err(pdf_error)?;
        buf.into_inner().map_err(pdf_error)
    }
}

fn pdf_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Pdf(err.to_string())
}
