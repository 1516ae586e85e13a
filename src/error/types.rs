use thiserror::Error;

use crate::geometry::{Widget, WidgetId};
use crate::logging::LoggingError;

/// Unified result type for the snapgrid crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by the placement engine.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("`{id}` occupies rows {rows:?} x cols {cols:?}, outside the {grid_rows}x{grid_cols} grid")]
    OutOfBounds {
        id: String,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        grid_rows: usize,
        grid_cols: usize,
    },
    #[error("no free slot available")]
    NoSlotAvailable,
    #[error("cascade overflowed: {} widget(s) found no slot", .unplaced.len())]
    CascadeOverflow {
        placed: Vec<Widget>,
        unplaced: Vec<Widget>,
    },
    #[error("widget `{0}` appears more than once")]
    DuplicateWidget(WidgetId),
    #[error("widget `{0}` not found")]
    WidgetNotFound(WidgetId),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
