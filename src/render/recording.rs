//! In-memory surface that records draw calls.
//!
//! Used for dry runs and for asserting exact placement in tests. Text is
//! kept verbatim.

use super::surface::{Color, PageSize, Rect, Surface, TextStyle};
use crate::config::{A4_HEIGHT_PT, A4_WIDTH_PT};
use crate::error::{RemitError, RemitResult};

/// One recorded primitive. `page` is zero-based.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        page: usize,
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    Line {
        page: usize,
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: Color,
    },
    FillRect {
        page: usize,
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        page: usize,
        rect: Rect,
        thickness: f32,
        color: Color,
    },
    NewPage {
        page: usize,
    },
}

/// A placed text run, borrowed from the recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedText<'a> {
    pub page: usize,
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub style: &'a TextStyle,
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: PageSize,
    pages: usize,
    max_pages: Option<usize>,
    ops: Vec<DrawOp>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::a4()
    }
}

impl RecordingSurface {
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            pages: 1,
            max_pages: None,
            ops: Vec::new(),
        }
    }

    pub fn a4() -> Self {
        Self::new(PageSize {
            width: A4_WIDTH_PT,
            height: A4_HEIGHT_PT,
        })
    }

    /// Fails `new_page` once `max_pages` pages exist.
    pub fn with_page_limit(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Every text run in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = PlacedText<'_>> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text {
                page,
                text,
                x,
                y,
                style,
            } => Some(PlacedText {
                page: *page,
                text,
                x: *x,
                y: *y,
                style,
            }),
            _ => None,
        })
    }

    /// First text run equal to `text`.
    pub fn find_text(&self, text: &str) -> Option<PlacedText<'_>> {
        self.texts().find(|t| t.text == text)
    }

    pub fn texts_on_page(&self, page: usize) -> Vec<&str> {
        self.texts()
            .filter(|t| t.page == page)
            .map(|t| t.text)
            .collect()
    }

    fn current_page(&self) -> usize {
        self.pages - 1
    }
}

impl Surface for RecordingSurface {
    fn page_size(&self) -> PageSize {
        self.size
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> RemitResult<()> {
        self.ops.push(DrawOp::Text {
            page: self.current_page(),
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: Color,
    ) -> RemitResult<()> {
        self.ops.push(DrawOp::Line {
            page: self.current_page(),
            from,
            to,
            thickness,
            color,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> RemitResult<()> {
        self.ops.push(DrawOp::FillRect {
            page: self.current_page(),
            rect,
            color,
        });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) -> RemitResult<()> {
        self.ops.push(DrawOp::StrokeRect {
            page: self.current_page(),
            rect,
            thickness,
            color,
        });
        Ok(())
    }

    fn new_page(&mut self) -> RemitResult<()> {
        if let Some(limit) = self.max_pages {
            if self.pages >= limit {
                return Err(RemitError::Surface {
                    message: format!("page limit of {limit} reached"),
                    page: Some(self.pages + 1),
                    source: None,
                });
            }
        }
        self.pages += 1;
        self.ops.push(DrawOp::NewPage {
            page: self.current_page(),
        });
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_on_current_page() -> RemitResult<()> {
        let mut surface = RecordingSurface::a4();
        surface.draw_text("first", 10.0, 20.0, &TextStyle::regular(9.0))?;
        surface.new_page()?;
        surface.draw_text("second", 10.0, 20.0, &TextStyle::regular(9.0))?;

        assert_eq!(surface.page_count(), 2);
        assert_eq!(surface.texts_on_page(0), vec!["first"]);
        assert_eq!(surface.find_text("second").map(|t| t.page), Some(1));
        Ok(())
    }

    #[test]
    fn test_page_limit() {
        let mut surface = RecordingSurface::a4().with_page_limit(1);
        let err = surface.new_page().unwrap_err();
        assert!(err.to_string().contains("page 2"));
    }
}
