use crate::error::{LayoutError, Result};
use crate::geometry::{Position, Size, Widget};
use crate::matrix::make_matrix;
use crate::occupancy::mark_occupied;
use crate::units::{to_cells, to_pixels, validate_cell_size};

/// Find the first slot where a `widget_size` widget fits without covering any
/// cell occupied by `existing`.
///
/// Candidates are scanned row-major (top outer, left inner) and the range is
/// inclusive, so a widget may sit flush against the right and bottom edges.
/// `Ok(None)` means the container has no free block of that shape.
///
/// Cost is O(rows * cols * window_rows * window_cols) per call.
pub fn find_available_position(
    container: Size,
    widget_size: Size,
    cell_size: u32,
    existing: &[Widget],
) -> Result<Option<Position>> {
    validate_cell_size(cell_size)?;

    let window_rows = to_cells(widget_size.height, cell_size);
    let window_cols = to_cells(widget_size.width, cell_size);
    if window_rows == 0 || window_cols == 0 {
        return Err(LayoutError::InvalidDimension(format!(
            "widget {}x{}px covers no {cell_size}px cell",
            widget_size.width, widget_size.height
        )));
    }

    let grid = make_matrix(
        to_cells(container.height, cell_size),
        to_cells(container.width, cell_size),
    );
    let occupied = mark_occupied(grid, existing, cell_size)?;

    // A window larger than the grid leaves no admissible range on that axis.
    let (Some(max_top), Some(max_left)) = (
        occupied.rows().checked_sub(window_rows),
        occupied.cols().checked_sub(window_cols),
    ) else {
        return Ok(None);
    };

    for top in 0..=max_top {
        for left in 0..=max_left {
            if occupied.region_all(top, left, window_rows, window_cols, &false) {
                return Ok(Some(Position::new(
                    to_pixels(left, cell_size),
                    to_pixels(top, cell_size),
                )));
            }
        }
    }

    Ok(None)
}

/// Like [`find_available_position`], but a full container is an error.
pub fn require_slot(
    container: Size,
    widget_size: Size,
    cell_size: u32,
    existing: &[Widget],
) -> Result<Position> {
    find_available_position(container, widget_size, cell_size, existing)?
        .ok_or(LayoutError::NoSlotAvailable)
}
