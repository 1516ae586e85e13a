//! Placement search orchestrator.
//!
//! Finds the first grid-aligned slot large enough for a widget. The search is a
//! brute-force sliding window; grids are expected to stay at dozens of cells per
//! axis.

mod core;

pub use self::core::{find_available_position, require_slot};
