use std::ops::Range;

use crate::error::{LayoutError, Result};
use crate::geometry::{Widget, WidgetId};
use crate::matrix::{Cell, OccupancyMatrix};
use crate::units::{to_cells, validate_cell_size};

/// Grid coordinate of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Cell ranges covered by one widget.
///
/// The start cell is `floor(y / cell)` and the extent is `floor(height / cell)`,
/// so a widget that is not aligned to the grid can cover one cell less than its
/// pixels touch. Partial-cell overlap is not modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Footprint {
    pub fn of(widget: &Widget, cell_size: u32) -> Self {
        let top = to_cells(widget.rect.y, cell_size);
        let left = to_cells(widget.rect.x, cell_size);
        Self {
            rows: top..top + to_cells(widget.rect.height, cell_size),
            cols: left..left + to_cells(widget.rect.width, cell_size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    pub fn fits(&self, grid_rows: usize, grid_cols: usize) -> bool {
        self.rows.end <= grid_rows && self.cols.end <= grid_cols
    }

    /// Row-major walk over every covered cell.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.rows
            .clone()
            .flat_map(move |row| self.cols.clone().map(move |col| CellCoord::new(row, col)))
    }
}

/// First overlap found while attributing cells to widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Widget being written when the overlap was hit.
    pub intruder: WidgetId,
    /// Widget that already owned the contested cell.
    pub occupant: WidgetId,
    pub cell: CellCoord,
}

/// Result of [`mark_by_id`]: the attributed matrix plus the first collision.
#[derive(Debug, Clone)]
pub struct IdMarking {
    pub matrix: OccupancyMatrix<Cell>,
    pub collision: Option<Collision>,
}

pub fn cells_for_widget(widget: &Widget, cell_size: u32) -> Vec<CellCoord> {
    Footprint::of(widget, cell_size).cells().collect()
}

/// Every cell covered by any of `widgets`, in widget order.
pub fn cells_for_widgets(widgets: &[Widget], cell_size: u32) -> Vec<CellCoord> {
    widgets
        .iter()
        .flat_map(|widget| cells_for_widget(widget, cell_size))
        .collect()
}

/// Covered cells keyed by widget id, preserving widget order.
pub fn footprint_map(widgets: &[Widget], cell_size: u32) -> Vec<(WidgetId, Vec<CellCoord>)> {
    widgets
        .iter()
        .map(|widget| (widget.id.clone(), cells_for_widget(widget, cell_size)))
        .collect()
}

pub fn ensure_within(
    widget: &Widget,
    cell_size: u32,
    grid_rows: usize,
    grid_cols: usize,
) -> Result<()> {
    let footprint = Footprint::of(widget, cell_size);
    if footprint.fits(grid_rows, grid_cols) {
        return Ok(());
    }
    Err(LayoutError::OutOfBounds {
        id: widget.id.to_string(),
        rows: footprint.rows,
        cols: footprint.cols,
        grid_rows,
        grid_cols,
    })
}

/// Mark every cell covered by `widgets` as occupied.
pub fn mark_occupied(
    mut matrix: OccupancyMatrix<bool>,
    widgets: &[Widget],
    cell_size: u32,
) -> Result<OccupancyMatrix<bool>> {
    validate_cell_size(cell_size)?;
    for widget in widgets {
        ensure_within(widget, cell_size, matrix.rows(), matrix.cols())?;
        for cell in Footprint::of(widget, cell_size).cells() {
            matrix.replace(cell.row, cell.col, true);
        }
    }
    Ok(matrix)
}

/// Write each widget's id into the cells it covers, in widget order.
///
/// Only the first cell found already owned is reported; later overlaps in the
/// same pass overwrite silently. Pass widgets in canonical order for a
/// deterministic result.
pub fn mark_by_id(
    mut matrix: OccupancyMatrix<Cell>,
    widgets: &[Widget],
    cell_size: u32,
) -> Result<IdMarking> {
    validate_cell_size(cell_size)?;
    let mut collision = None;

    for widget in widgets {
        ensure_within(widget, cell_size, matrix.rows(), matrix.cols())?;
    }

    for (id, cells) in footprint_map(widgets, cell_size) {
        for cell in cells {
            let previous = matrix.replace(cell.row, cell.col, Cell::Owned(id.clone()));
            if collision.is_some() {
                continue;
            }
            if let Some(Cell::Owned(occupant)) = previous {
                collision = Some(Collision {
                    intruder: id.clone(),
                    occupant,
                    cell,
                });
            }
        }
    }

    Ok(IdMarking { matrix, collision })
}
