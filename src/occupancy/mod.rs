//! Occupancy mapper orchestrator.
//!
//! Converts widgets into the grid cells they cover and writes that coverage into
//! an [`OccupancyMatrix`](crate::matrix::OccupancyMatrix), either as a plain
//! occupied flag or attributed to the owning widget.

mod core;

pub use self::core::{
    CellCoord, Collision, Footprint, IdMarking, cells_for_widget, cells_for_widgets,
    ensure_within, footprint_map, mark_by_id, mark_occupied,
};
