//! Pixel and grid-cell conversions.
//!
//! `to_cells` floors, so `to_pixels(to_cells(px, s), s) <= px`: snapping always
//! rounds toward the top-left.

use crate::error::{LayoutError, Result};
use crate::geometry::Position;

/// Number of whole cells covered by `px` pixels.
///
/// # Panics
/// Panics if `cell_size` is zero. Engine entry points validate it through
/// [`validate_cell_size`] first.
pub fn to_cells(px: u32, cell_size: u32) -> usize {
    (px / cell_size) as usize
}

/// Pixel offset of the `cells`-th cell boundary.
pub fn to_pixels(cells: usize, cell_size: u32) -> u32 {
    u32::try_from(cells)
        .unwrap_or(u32::MAX)
        .saturating_mul(cell_size)
}

/// Round `value` to the nearest multiple of `step`. Exact halves round down.
pub fn round_to_closest(value: u32, step: u32) -> u32 {
    if step == 0 {
        return value;
    }
    let below = (value / step) * step;
    if value % step > step / 2 {
        below.saturating_add(step)
    } else {
        below
    }
}

/// Snap a dragged position onto the nearest grid intersection.
pub fn snap_position(position: Position, cell_size: u32) -> Position {
    Position::new(
        round_to_closest(position.x, cell_size),
        round_to_closest(position.y, cell_size),
    )
}

pub fn validate_cell_size(cell_size: u32) -> Result<()> {
    if cell_size == 0 {
        return Err(LayoutError::InvalidDimension(
            "cell size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
