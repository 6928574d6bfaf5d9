//! Drawing surface trait and supporting types.
//!
//! All coordinates are PDF points measured from the top-left corner of the
//! page, with `y` growing downward. Text is placed on its baseline.
//! Implementations that use a bottom-left origin flip `y` themselves.

use super::metrics;
use crate::error::RemitResult;

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font, size and fill color for one text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
}

impl TextStyle {
    pub fn regular(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color: Color::BLACK,
        }
    }

    pub fn bold(size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..Self::regular(size)
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// Axis-aligned rectangle; `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Primitive drawing operations the page renderer needs.
///
/// A surface owns its pages and any backend resources. It starts with one
/// page; every draw call targets the most recently added page. Errors raised
/// by a backend are returned unchanged and end the render.
pub trait Surface {
    fn page_size(&self) -> PageSize;

    /// Places `text` with its baseline at `y`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> RemitResult<()>;

    fn draw_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: Color,
    ) -> RemitResult<()>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> RemitResult<()>;

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) -> RemitResult<()>;

    /// Advance width of `text` in points.
    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        metrics::text_width(text, style)
    }

    /// Breaks `text` into lines no wider than `max_width`.
    fn wrap_text(&self, text: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
        metrics::wrap_text(text, max_width, |s| self.text_width(s, style))
    }

    /// Starts a new page of the same size; later draws target it.
    fn new_page(&mut self) -> RemitResult<()>;

    fn page_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_unit() {
        let (r, g, b) = Color::rgb(255, 0, 51).to_unit();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_text_style_builders() {
        let style = TextStyle::bold(11.0).with_color(Color::WHITE);
        assert_eq!(style.weight, FontWeight::Bold);
        assert_eq!(style.color, Color::WHITE);
        assert_eq!(style.with_size(7.0).size, 7.0);
    }
}
