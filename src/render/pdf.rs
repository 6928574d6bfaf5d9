//! PDF output through printpdf's built-in Helvetica faces.
//!
//! The built-in fonts only cover WinAnsi, so every string is folded to
//! printable ASCII before it is placed or measured: typographic quotes and
//! dashes, fullwidth parentheses and non-breaking spaces get ASCII stand-ins,
//! anything else outside the range is dropped.

use super::metrics;
use super::surface::{Color, FontWeight, PageSize, Rect, Surface, TextStyle};
use crate::config::{A4_HEIGHT_PT, A4_WIDTH_PT};
use crate::error::{RemitError, RemitResult};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Point, Pt, Rgb,
};
use std::path::Path;

/// Folds `text` to the printable ASCII the built-in fonts can encode.
pub fn fold_to_ascii(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{2018}' | '\u{2019}' => Some('\''),
            '\u{201C}' | '\u{201D}' => Some('"'),
            '\u{2013}' | '\u{2014}' => Some('-'),
            '\u{FF08}' => Some('('),
            '\u{FF09}' => Some(')'),
            '\u{00A0}' => Some(' '),
            ' '..='~' => Some(c),
            _ => None,
        })
        .collect()
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn pdf_color(color: Color) -> printpdf::Color {
    let (r, g, b) = color.to_unit();
    printpdf::Color::Rgb(Rgb::new(r, g, b, None))
}

fn backend_error(message: &str, err: impl std::fmt::Display) -> RemitError {
    RemitError::Surface {
        message: format!("{message}: {err}"),
        page: None,
        source: None,
    }
}

/// A multi-page PDF document being drawn.
pub struct PdfSurface {
    doc: PdfDocumentReference,
    current: (PdfPageIndex, PdfLayerIndex),
    page_count: usize,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    size: PageSize,
}

impl PdfSurface {
    /// Creates a document with one blank page of `size` points.
    pub fn new(title: &str, size: PageSize) -> RemitResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, mm(size.width), mm(size.height), "Page 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| backend_error("failed to load Helvetica", e))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| backend_error("failed to load Helvetica-Bold", e))?;
        Ok(Self {
            doc,
            current: (page, layer),
            page_count: 1,
            regular,
            bold,
            size,
        })
    }

    pub fn a4(title: &str) -> RemitResult<Self> {
        Self::new(
            title,
            PageSize {
                width: A4_WIDTH_PT,
                height: A4_HEIGHT_PT,
            },
        )
    }

    fn layer(&self) -> PdfLayerReference {
        let (page, layer) = self.current;
        self.doc.get_page(page).get_layer(layer)
    }

    fn font(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    /// Flips a top-down `y` into PDF user space.
    fn pdf_y(&self, y: f32) -> Mm {
        mm(self.size.height - y)
    }

    fn rect_path(&self, rect: Rect, mode: PaintMode) -> printpdf::Rect {
        printpdf::Rect::new(
            mm(rect.x),
            self.pdf_y(rect.bottom()),
            mm(rect.right()),
            self.pdf_y(rect.y),
        )
        .with_mode(mode)
    }

    /// Serializes the finished document.
    pub fn save_to_bytes(self) -> RemitResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| backend_error("failed to serialize PDF", e))
    }

    /// Writes the finished document to `path`.
    pub fn save(self, path: &Path) -> RemitResult<()> {
        let bytes = self.save_to_bytes()?;
        std::fs::write(path, bytes).map_err(|e| RemitError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl Surface for PdfSurface {
    fn page_size(&self) -> PageSize {
        self.size
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> RemitResult<()> {
        let folded = fold_to_ascii(text);
        if folded.trim().is_empty() {
            return Ok(());
        }
        let layer = self.layer();
        layer.set_fill_color(pdf_color(style.color));
        layer.use_text(folded, style.size, mm(x), self.pdf_y(y), self.font(style.weight));
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: Color,
    ) -> RemitResult<()> {
        let layer = self.layer();
        layer.set_outline_color(pdf_color(color));
        layer.set_outline_thickness(thickness);
        layer.add_line(Line {
            points: vec![
                (Point::new(mm(from.0), self.pdf_y(from.1)), false),
                (Point::new(mm(to.0), self.pdf_y(to.1)), false),
            ],
            is_closed: false,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> RemitResult<()> {
        let layer = self.layer();
        layer.set_fill_color(pdf_color(color));
        layer.add_rect(self.rect_path(rect, PaintMode::Fill));
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) -> RemitResult<()> {
        let layer = self.layer();
        layer.set_outline_color(pdf_color(color));
        layer.set_outline_thickness(thickness);
        layer.add_rect(self.rect_path(rect, PaintMode::Stroke));
        Ok(())
    }

    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        metrics::text_width(&fold_to_ascii(text), style)
    }

    fn new_page(&mut self) -> RemitResult<()> {
        self.page_count += 1;
        let (page, layer) = self.doc.add_page(
            mm(self.size.width),
            mm(self.size.height),
            format!("Page {}", self.page_count),
        );
        self.current = (page, layer);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_to_ascii() {
        assert_eq!(fold_to_ascii("\u{201C}Li\u{2019}s\u{201D} \u{2013} A/C"), "\"Li's\" - A/C");
        assert_eq!(fold_to_ascii("中国银行（香港）"), "()");
        assert_eq!(fold_to_ascii("a\u{00A0}b"), "a b");
    }

    #[test]
    fn test_pages_are_counted() -> RemitResult<()> {
        let mut surface = PdfSurface::a4("test")?;
        assert_eq!(surface.page_count(), 1);
        surface.new_page()?;
        assert_eq!(surface.page_count(), 2);
        let bytes = surface.save_to_bytes()?;
        assert!(bytes.starts_with(b"%PDF"));
        Ok(())
    }

    #[test]
    fn test_measures_folded_text() -> RemitResult<()> {
        let surface = PdfSurface::a4("test")?;
        let style = TextStyle::regular(10.0);
        assert_eq!(surface.text_width("北京", &style), 0.0);
        Ok(())
    }
}
