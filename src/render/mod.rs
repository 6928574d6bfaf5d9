//! Page rendering: the drawing surface abstraction, text metrics, the
//! shared layout interpreter and the concrete surfaces.
//!
//! [`PageRenderer`] draws any [`LayoutPlan`](crate::layout::LayoutPlan)
//! onto anything implementing [`Surface`]. [`PdfSurface`] produces the
//! printable document; [`RecordingSurface`] keeps the draw calls in memory.

pub mod engine;
pub mod metrics;
pub mod pdf;
pub mod recording;
pub mod surface;

pub use engine::{DrawCursor, PageRenderer, RenderSummary};
pub use pdf::{fold_to_ascii, PdfSurface};
pub use recording::{DrawOp, PlacedText, RecordingSurface};
pub use surface::{Color, FontWeight, PageSize, Rect, Surface, TextStyle};
