//! Grid builder orchestrator.
//!
//! Occupancy matrices are plain row-major grids; the engine never mutates one it
//! has already handed out, it builds a new value instead.

mod core;

pub use self::core::{Cell, OccupancyMatrix, make_matrix};
