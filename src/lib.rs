//! Grid-snapping placement engine for rectangular widgets.
//!
//! Widgets live on a container divided into square cells. The engine finds
//! free slots for new widgets and, when a moved or resized widget lands on
//! others, cascades the displaced widgets into the next free slots while
//! keeping everything above and to the left of the collision where it was.
//!
//! The algorithmic modules (`matrix`, `occupancy`, `placement`, `shift`,
//! `cache`) share one layout: `mod.rs` re-exports the public surface and the
//! private `core` module holds the logic.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod matrix;
pub mod metrics;
pub mod occupancy;
pub mod placement;
pub mod shift;
pub mod units;

pub use cache::LayoutCache;
pub use config::EngineConfig;
pub use engine::GridEngine;
pub use error::{LayoutError, Result};
pub use geometry::{Position, Rect, Size, Widget, WidgetId};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use matrix::{Cell, OccupancyMatrix, make_matrix};
pub use metrics::{EngineMetrics, MetricSnapshot};
pub use occupancy::{CellCoord, Collision, Footprint};
pub use placement::{find_available_position, require_slot};
pub use shift::{Resolution, resolve, sort_canonical};
pub use units::{round_to_closest, snap_position, to_cells, to_pixels};
