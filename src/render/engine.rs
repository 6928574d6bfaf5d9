//! The page renderer.
//!
//! One algorithm interprets every [`LayoutPlan`]. For each element it
//! measures the space needed, breaks to a new page when the element would
//! cross the bottom margin, draws, and advances a vertical cursor.

use super::surface::{Color, PageSize, Rect, Surface, TextStyle};
use crate::config::RenderConfig;
use crate::error::{RemitError, RemitResult};
use crate::layout::{
    selected_choices, BankLayout, Columns, FieldSpec, FieldStyle, LayoutPlan, Section,
};
use crate::record::RemittanceRecord;
use serde::Serialize;

const RULE_THICKNESS: f32 = 0.5;
const TICK: &str = "X";

/// Current page (zero-based) and baseline of the next element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCursor {
    pub page: usize,
    pub y: f32,
}

/// What a render produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    pub layout: BankLayout,
    pub pages: usize,
    pub page_breaks: usize,
    pub fields_drawn: usize,
    /// Single-line fields drawn below the default font size
    pub shrunk_fields: usize,
    /// Labels of fields still wider than their column at the minimum size
    pub overflowing_fields: Vec<String>,
}

/// Horizontal extent of one field cell.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Column {
    label_x: f32,
    input_x: f32,
    right_x: f32,
}

enum Content {
    Lines(Vec<String>),
    Fitted { text: String, size: f32 },
    Boxed { lines: Vec<String>, height: f32 },
    Choice(Vec<bool>),
}

struct PreparedField {
    field: &'static FieldSpec,
    label: String,
    column: Column,
    content: Content,
    needed: f32,
}

/// Renders layout plans onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct PageRenderer {
    config: RenderConfig,
}

impl PageRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draws `plan` filled from `record` onto `surface`.
    ///
    /// Page geometry comes from the surface; the configured margins must
    /// leave room on it. The cursor lives only for this call. Surface errors abort the render
    /// and are returned unchanged; whatever was drawn so far is left as-is.
    pub fn render<S>(
        &self,
        plan: &LayoutPlan,
        record: &RemittanceRecord,
        surface: &mut S,
    ) -> RemitResult<RenderSummary>
    where
        S: Surface + ?Sized,
    {
        let page = surface.page_size();
        self.check_page(page)?;
        let mut pass = RenderPass {
            config: &self.config,
            page,
            plan,
            record,
            surface,
            cursor: DrawCursor {
                page: 0,
                y: self.config.margins.top,
            },
            summary: RenderSummary {
                layout: plan.layout,
                pages: 1,
                page_breaks: 0,
                fields_drawn: 0,
                shrunk_fields: 0,
                overflowing_fields: Vec::new(),
            },
        };
        pass.draw_document_header()?;
        for (index, section) in plan.sections.iter().enumerate() {
            pass.draw_section(section, index == 0)?;
        }
        pass.summary.pages = pass.surface.page_count();
        tracing::debug!(
            layout = %plan.layout,
            pages = pass.summary.pages,
            page_breaks = pass.summary.page_breaks,
            fields = pass.summary.fields_drawn,
            "render complete"
        );
        Ok(pass.summary)
    }

    fn check_page(&self, page: PageSize) -> RemitResult<()> {
        let margins = &self.config.margins;
        let reason = if page.width.is_nan() || page.height.is_nan() {
            Some("surface page size is not a number")
        } else if margins.top >= page.height - margins.bottom {
            Some("top and bottom margins leave no vertical space on the surface page")
        } else if margins.left + margins.right >= page.width {
            Some("left and right margins leave no horizontal space on the surface page")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(RemitError::InvalidInput {
                parameter: "page_size".to_string(),
                reason: format!("{reason} ({} x {})", page.width, page.height),
            }),
            None => Ok(()),
        }
    }
}

struct RenderPass<'a, S: Surface + ?Sized> {
    config: &'a RenderConfig,
    page: PageSize,
    plan: &'a LayoutPlan,
    record: &'a RemittanceRecord,
    surface: &'a mut S,
    cursor: DrawCursor,
    summary: RenderSummary,
}

impl<'a, S: Surface + ?Sized> RenderPass<'a, S> {
    fn body_style(&self) -> TextStyle {
        TextStyle::regular(self.config.font_size)
    }

    fn left(&self) -> f32 {
        self.config.margins.left + self.config.label_indent
    }

    fn right(&self) -> f32 {
        self.page.width - self.config.margins.right - self.config.right_inset
    }

    /// Lowest baseline an element may reach before a page break.
    fn bottom_limit(&self) -> f32 {
        self.page.height - self.config.margins.bottom
    }

    /// Advance for a value occupying `lines` lines.
    fn line_block(&self, lines: usize) -> f32 {
        self.config.base_gap + lines.saturating_sub(1) as f32 * self.config.wrap_gap
    }

    /// Starts a new page when `needed` would cross the bottom margin.
    ///
    /// A page that has nothing on it yet is never abandoned, so an element
    /// taller than a whole page is drawn once and overflows.
    fn ensure_space(&mut self, needed: f32) -> RemitResult<()> {
        let fresh_page = self.cursor.y <= self.config.margins.top;
        if self.cursor.y + needed > self.bottom_limit() && !fresh_page {
            self.surface.new_page()?;
            self.cursor.page += 1;
            self.cursor.y = self.config.margins.top;
            self.summary.page_breaks += 1;
            tracing::debug!(page = self.cursor.page + 1, needed, "page break");
        }
        Ok(())
    }

    fn draw_document_header(&mut self) -> RemitResult<()> {
        let issuer = self.plan.issuer.resolve(self.record);
        self.ensure_space(self.config.title_advance)?;
        let y = self.cursor.y;

        let title_style = TextStyle::bold(self.config.title_font_size);
        self.surface
            .draw_text(self.plan.title, self.left(), y, &title_style)?;

        let issuer_style = self.body_style();
        let width = self.surface.text_width(&issuer, &issuer_style);
        let x = self.right() - width;
        self.surface.stroke_rect(
            Rect::new(
                x - 5.0,
                y - self.config.title_font_size,
                width + 10.0,
                self.config.title_font_size + 6.0,
            ),
            RULE_THICKNESS,
            Color::BLACK,
        )?;
        self.surface.draw_text(&issuer, x, y, &issuer_style)?;

        self.cursor.y += self.config.title_advance;
        Ok(())
    }

    fn draw_section(&mut self, section: &'static Section, first: bool) -> RemitResult<()> {
        if let Some(title) = section.title {
            self.draw_band(title, first)?;
        }
        if let Some(note) = section.note {
            self.draw_note(note)?;
        }

        let fields = section.fields;
        let mut index = 0;
        while index < fields.len() {
            let field = &fields[index];
            match field.columns {
                Columns::One => {
                    let column = self.full_column();
                    self.draw_row(&[(field, column)])?;
                    index += 1;
                }
                Columns::Two => {
                    let (left, right) = self.half_columns();
                    match fields.get(index + 1).filter(|f| f.columns == Columns::Two) {
                        Some(partner) => {
                            self.draw_row(&[(field, left), (partner, right)])?;
                            index += 2;
                        }
                        None => {
                            self.draw_row(&[(field, left)])?;
                            index += 1;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Filled band with the title in white.
    fn draw_band(&mut self, title: &str, first: bool) -> RemitResult<()> {
        if !first {
            self.cursor.y += self.config.section_spacing;
        }
        self.ensure_space(self.config.band_advance)?;
        let y = self.cursor.y;
        let x = self.left();
        let width = self.page.width
            - self.config.margins.left
            - self.config.margins.right
            - 2.0 * self.config.label_indent;
        self.surface.fill_rect(
            Rect::new(x, y, width, self.config.band_height),
            self.plan.band_color,
        )?;
        let style = TextStyle::bold(self.config.header_font_size).with_color(Color::WHITE);
        self.surface
            .draw_text(title, x + 5.0, y + self.config.band_height - 5.0, &style)?;
        self.cursor.y += self.config.band_advance;
        Ok(())
    }

    /// Wrapped paragraph across the full content width.
    fn draw_note(&mut self, note: &str) -> RemitResult<()> {
        let style = TextStyle::regular(self.config.note_font_size);
        let x = self.left() + 5.0;
        let lines = self.surface.wrap_text(note, self.right() - x, &style);
        let needed = self.line_block(lines.len());
        self.ensure_space(needed)?;
        let y = self.cursor.y;
        for (i, line) in lines.iter().enumerate() {
            self.surface
                .draw_text(line, x, y + i as f32 * self.config.wrap_gap, &style)?;
        }
        self.cursor.y += needed;
        Ok(())
    }

    fn full_column(&self) -> Column {
        let label_x = self.left();
        Column {
            label_x,
            input_x: label_x + self.plan.label_width,
            right_x: self.right(),
        }
    }

    fn half_columns(&self) -> (Column, Column) {
        let start = self.left();
        let end = self.right();
        let half = (end - start) / 2.0;
        let left = Column {
            label_x: start,
            input_x: start + self.plan.half_label_width,
            right_x: start + half - self.config.label_indent,
        };
        let right = Column {
            label_x: start + half,
            input_x: start + half + self.plan.half_label_width,
            right_x: end,
        };
        (left, right)
    }

    /// Draws one row of one or two cells at the same baseline.
    fn draw_row(&mut self, cells: &[(&'static FieldSpec, Column)]) -> RemitResult<()> {
        let prepared: Vec<PreparedField> = cells
            .iter()
            .map(|&(field, column)| self.prepare(field, column))
            .collect();
        let needed = prepared
            .iter()
            .map(|p| p.needed)
            .fold(self.config.base_gap, f32::max);
        self.ensure_space(needed)?;
        let y = self.cursor.y;
        for cell in &prepared {
            self.draw_field(cell, y)?;
        }
        self.summary.fields_drawn += prepared.len();
        self.cursor.y += needed;
        Ok(())
    }

    fn prepare(&mut self, field: &'static FieldSpec, column: Column) -> PreparedField {
        let value = field.source.resolve(self.record);
        if field.required && value.is_empty() {
            tracing::debug!(label = field.label, "required field is blank");
        }
        let style = self.body_style();
        let text_x = column.input_x + self.config.value_indent;
        let max_width = (column.right_x - text_x).max(self.config.min_wrap_width);

        let (content, needed) = match field.style {
            FieldStyle::Underline => {
                let lines = self.wrap(&value, max_width, &style);
                let needed = self.line_block(lines.len());
                (Content::Lines(lines), needed)
            }
            FieldStyle::ShrinkToFit => {
                let size = self.fit_size(field, &value, max_width);
                (
                    Content::Fitted { text: value, size },
                    self.config.base_gap,
                )
            }
            FieldStyle::Boxed => {
                let lines = self.wrap(&value, max_width, &style);
                let height = self.config.box_height.max(self.line_block(lines.len()));
                let needed = height + self.config.font_size;
                (Content::Boxed { lines, height }, needed)
            }
            FieldStyle::Choice(options) => (
                Content::Choice(selected_choices(options, &value)),
                self.config.base_gap,
            ),
        };

        PreparedField {
            field,
            label: self.plan.display_label(field),
            column,
            content,
            needed,
        }
    }

    fn wrap(&self, value: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
        if value.is_empty() {
            Vec::new()
        } else {
            self.surface.wrap_text(value, max_width, style)
        }
    }

    /// Largest size, stepping down from the default, at which `value` fits.
    ///
    /// Stops at the floor; a value that is still too wide is drawn at the
    /// floor size and overflows its underline rather than being cut.
    fn fit_size(&mut self, field: &FieldSpec, value: &str, max_width: f32) -> f32 {
        let mut style = self.body_style();
        if value.is_empty() {
            return style.size;
        }
        let mut width = self.surface.text_width(value, &style);
        while width > max_width && style.size > self.config.shrink_floor {
            let size = (style.size - self.config.shrink_step).max(self.config.shrink_floor);
            style = style.with_size(size);
            width = self.surface.text_width(value, &style);
        }
        if style.size < self.config.font_size {
            self.summary.shrunk_fields += 1;
        }
        if width > max_width {
            tracing::debug!(
                label = field.label,
                width,
                max_width,
                "value overflows at minimum size"
            );
            self.summary.overflowing_fields.push(field.label.to_string());
        }
        style.size
    }

    fn draw_field(&mut self, cell: &PreparedField, y: f32) -> RemitResult<()> {
        let config = self.config;
        let style = self.body_style();
        let column = cell.column;
        let text_x = column.input_x + config.value_indent;

        self.surface
            .draw_text(&cell.label, column.label_x, y, &style)?;

        match &cell.content {
            Content::Lines(lines) => {
                self.underline(column, y)?;
                self.draw_lines(lines, text_x, y, &style)?;
            }
            Content::Fitted { text, size } => {
                self.underline(column, y)?;
                if !text.is_empty() {
                    self.surface
                        .draw_text(text, text_x, y, &style.with_size(*size))?;
                }
            }
            Content::Boxed { lines, height } => {
                self.surface.stroke_rect(
                    Rect::new(
                        column.input_x,
                        y - config.font_size,
                        column.right_x - column.input_x,
                        *height,
                    ),
                    RULE_THICKNESS,
                    Color::BLACK,
                )?;
                self.draw_lines(lines, text_x, y, &style)?;
            }
            Content::Choice(ticks) => {
                let FieldStyle::Choice(options) = cell.field.style else {
                    return Ok(());
                };
                let size = config.choice_box_size;
                let mut x = column.input_x;
                for (option, ticked) in options.iter().zip(ticks) {
                    self.surface.stroke_rect(
                        Rect::new(x, y - size, size, size),
                        RULE_THICKNESS,
                        Color::BLACK,
                    )?;
                    if *ticked {
                        self.surface
                            .draw_text(TICK, x + 1.5, y - 1.0, &style.with_size(size))?;
                    }
                    let label_x = x + size + 4.0;
                    self.surface.draw_text(option.label, label_x, y, &style)?;
                    x = label_x + self.surface.text_width(option.label, &style) + 12.0;
                }
            }
        }
        Ok(())
    }

    fn underline(&mut self, column: Column, y: f32) -> RemitResult<()> {
        self.surface.draw_line(
            (column.input_x, y + 2.0),
            (column.right_x, y + 2.0),
            RULE_THICKNESS,
            Color::BLACK,
        )
    }

    fn draw_lines(
        &mut self,
        lines: &[String],
        x: f32,
        y: f32,
        style: &TextStyle,
    ) -> RemitResult<()> {
        for (i, line) in lines.iter().enumerate() {
            self.surface
                .draw_text(line, x, y + i as f32 * self.config.wrap_gap, style)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemitError;
    use crate::layout::{ChoiceOption, ChoiceRule, Issuer};
    use crate::render::{DrawOp, RecordingSurface};

    const OPTIONS: &[ChoiceOption] = &[
        ChoiceOption::new("Yes", ChoiceRule::StartsWith("y")),
        ChoiceOption::new("No", ChoiceRule::StartsWith("n")),
    ];

    const SECTIONS: &[Section] = &[
        Section::titled(
            "Details",
            &[
                FieldSpec::key("Sender", "senderName"),
                FieldSpec::key("Bank Name", "beneficiaryBank"),
            ],
        ),
        Section::titled(
            "Codes",
            &[
                FieldSpec::key("SWIFT", "swiftCode").half().shrink(),
                FieldSpec::key("Resident", "isResident").half().choice(OPTIONS),
                FieldSpec::key("Alone", "remarks").half(),
            ],
        ),
    ];

    static PLAN: LayoutPlan = LayoutPlan {
        layout: BankLayout::Generic,
        title: "TEST FORM",
        issuer: Issuer::Fixed("Test Bank"),
        band_color: Color::BLACK,
        label_width: 100.0,
        half_label_width: 50.0,
        mark_required: false,
        sections: SECTIONS,
    };

    const SMALL: PageSize = PageSize {
        width: 300.0,
        height: 200.0,
    };

    fn small_surface() -> RecordingSurface {
        RecordingSurface::new(SMALL)
    }

    fn long_bank_name() -> String {
        vec!["Bank"; 30].join(" ")
    }

    #[test]
    fn test_single_page_layout_positions() -> RemitResult<()> {
        let record = RemittanceRecord::from_pairs([("senderName", "Acme"), ("beneficiaryBank", "HSBC")]);
        let mut surface = RecordingSurface::a4();
        let summary = PageRenderer::default().render(&PLAN, &record, &mut surface)?;

        assert_eq!(summary.pages, 1);
        assert_eq!(summary.page_breaks, 0);
        assert_eq!(summary.fields_drawn, 5);
        // title row at the top margin, band below it, first field after the band
        assert_eq!(surface.find_text("TEST FORM").map(|t| t.y), Some(50.0));
        assert_eq!(surface.find_text("Details").map(|t| t.y), Some(80.0 + 13.0));
        assert_eq!(surface.find_text("Sender").map(|t| t.y), Some(105.0));
        assert_eq!(surface.find_text("Bank Name").map(|t| t.y), Some(123.0));
        Ok(())
    }

    #[test]
    fn test_overflowing_field_breaks_page_once() -> RemitResult<()> {
        let record = RemittanceRecord::from_pairs([
            ("senderName", "Acme Trading".to_string()),
            ("beneficiaryBank", long_bank_name()),
        ]);
        let mut surface = small_surface().with_page_limit(10);
        let renderer = PageRenderer::default();
        let summary = renderer.render(&PLAN, &record, &mut surface)?;

        let sender = surface.find_text("Sender").expect("sender label");
        assert_eq!(sender.page, 0);
        let label = surface.find_text("Bank Name").expect("bank label");
        assert_eq!(label.page, 1);
        assert_eq!(label.y, renderer.config().margins.top);
        // every wrapped line follows the label on the new page
        let lines: Vec<_> = surface
            .texts()
            .filter(|t| t.text.starts_with("Bank Bank"))
            .collect();
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|t| t.page == 1));
        assert_eq!(lines[1].y - lines[0].y, 14.0);
        assert!(summary.page_breaks >= 1);
        assert_eq!(
            surface
                .ops()
                .iter()
                .take_while(|op| !matches!(op, DrawOp::Text { text, .. } if text == "Bank Name"))
                .filter(|op| matches!(op, DrawOp::NewPage { .. }))
                .count(),
            1
        );
        Ok(())
    }

    #[test]
    fn test_shrink_to_fit_steps_down_to_floor() -> RemitResult<()> {
        let record = RemittanceRecord::from_pairs([("swiftCode", "BKCHHKHHXXX")]);
        let mut surface = RecordingSurface::a4();
        let summary = PageRenderer::default().render(&PLAN, &record, &mut surface)?;
        let code = surface.find_text("BKCHHKHHXXX").expect("code drawn");
        assert_eq!(code.style.size, 9.0);
        assert_eq!(summary.shrunk_fields, 0);

        let record = RemittanceRecord::from_pairs([("swiftCode", "X".repeat(80))]);
        let mut surface = RecordingSurface::a4();
        let summary = PageRenderer::default().render(&PLAN, &record, &mut surface)?;
        let code = surface.find_text(&"X".repeat(80)).expect("code drawn");
        assert_eq!(code.style.size, 7.0);
        assert_eq!(summary.shrunk_fields, 1);
        assert_eq!(summary.overflowing_fields, vec!["SWIFT".to_string()]);
        Ok(())
    }

    #[test]
    fn test_half_columns_pair_then_stand_alone() -> RemitResult<()> {
        let record = RemittanceRecord::from_pairs([("isResident", "yes")]);
        let mut surface = RecordingSurface::a4();
        PageRenderer::default().render(&PLAN, &record, &mut surface)?;

        let swift = surface.find_text("SWIFT").expect("swift");
        let resident = surface.find_text("Resident").expect("resident");
        let alone = surface.find_text("Alone").expect("alone");
        assert_eq!(swift.y, resident.y);
        assert!(resident.x > swift.x);
        assert_eq!(alone.x, swift.x);
        assert_eq!(alone.y, swift.y + 18.0);

        // one tick for "Yes", none for "No"
        assert_eq!(surface.texts().filter(|t| t.text == TICK).count(), 1);
        Ok(())
    }

    #[test]
    fn test_surface_failure_propagates() {
        let record = RemittanceRecord::from_pairs([("beneficiaryBank", long_bank_name())]);
        let mut surface = small_surface().with_page_limit(1);
        let result = PageRenderer::default().render(&PLAN, &record, &mut surface);
        assert!(matches!(result, Err(RemitError::Surface { .. })));
    }

    #[test]
    fn test_blank_required_values_still_render() -> RemitResult<()> {
        let mut surface = RecordingSurface::a4();
        let summary = PageRenderer::default().render(&PLAN, &RemittanceRecord::new(), &mut surface)?;
        assert_eq!(summary.fields_drawn, 5);
        // empty values still get their underline
        let underlines = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count();
        assert_eq!(underlines, 4);
        Ok(())
    }

    #[test]
    fn test_layout_follows_surface_page_size() -> RemitResult<()> {
        let record = RemittanceRecord::from_pairs([
            ("senderName", "Acme Trading".to_string()),
            ("beneficiaryBank", long_bank_name()),
        ]);
        // the default config describes A4; the surface is much smaller
        let mut surface = small_surface();
        let summary = PageRenderer::default().render(&PLAN, &record, &mut surface)?;

        assert!(summary.page_breaks >= 1);
        assert!(surface.texts().all(|t| t.y <= SMALL.height));
        let band = surface.ops().iter().find_map(|op| match op {
            DrawOp::FillRect { rect, .. } => Some(*rect),
            _ => None,
        });
        assert!(band.is_some_and(|r| r.right() <= SMALL.width));
        Ok(())
    }

    #[test]
    fn test_surface_too_small_for_margins_is_rejected() {
        let mut surface = RecordingSurface::new(PageSize {
            width: 50.0,
            height: 70.0,
        });
        let result = PageRenderer::default().render(&PLAN, &RemittanceRecord::new(), &mut surface);
        assert!(matches!(result, Err(RemitError::InvalidInput { .. })));
        assert!(surface.ops().is_empty());
    }
}
