use std::collections::HashSet;

use crate::error::{LayoutError, Result};
use crate::geometry::{Position, Size, Widget, WidgetId};
use crate::matrix::make_matrix;
use crate::occupancy::{Collision, Footprint, mark_by_id};
use crate::placement::find_available_position;
use crate::units::{to_cells, validate_cell_size};

/// Outcome of a move, resize or insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Final layout: kept widgets, then relocated widgets in cascade order, then
    /// the moving widget at its proposed position.
    pub widgets: Vec<Widget>,
    /// First overlap detected, `None` when the proposal was accepted untouched.
    pub collision: Option<Collision>,
    /// Ids whose position changed during the cascade.
    pub relocated: Vec<WidgetId>,
    /// Displaced widgets that found no slot, at their last known geometry.
    pub unplaced: Vec<Widget>,
}

impl Resolution {
    fn accepted(widgets: Vec<Widget>) -> Self {
        Self {
            widgets,
            collision: None,
            relocated: Vec::new(),
            unplaced: Vec::new(),
        }
    }

    pub fn is_overflow(&self) -> bool {
        !self.unplaced.is_empty()
    }

    /// Collapse into the final widget list, turning an overflow into
    /// [`LayoutError::CascadeOverflow`] that still carries the partial layout.
    pub fn into_result(self) -> Result<Vec<Widget>> {
        if self.unplaced.is_empty() {
            Ok(self.widgets)
        } else {
            Err(LayoutError::CascadeOverflow {
                placed: self.widgets,
                unplaced: self.unplaced,
            })
        }
    }
}

/// Highest widget first, then left-most. The sort is stable, so widgets sharing
/// a top-left corner keep their input order.
pub fn sort_canonical(widgets: &[Widget]) -> Vec<Widget> {
    let mut sorted = widgets.to_vec();
    sorted.sort_by_key(|widget| (widget.rect.y, widget.rect.x));
    sorted
}

/// Place `moving` at `proposed` and push aside whatever it lands on.
///
/// `all_widgets` may already contain `moving` (move or resize) or not (insert);
/// either way the proposed geometry replaces it. Displaced widgets are searched
/// against the kept widgets plus the moving widget, so the result never overlaps
/// unless a widget ends up in [`Resolution::unplaced`].
pub fn resolve(
    moving: &Widget,
    proposed: Position,
    all_widgets: &[Widget],
    container: Size,
    cell_size: u32,
) -> Result<Resolution> {
    validate_cell_size(cell_size)?;
    ensure_unique(all_widgets)?;

    let placed = moving.moved_to(proposed);
    let mut candidates: Vec<Widget> = all_widgets
        .iter()
        .filter(|widget| widget.id != placed.id)
        .cloned()
        .collect();
    candidates.push(placed.clone());

    for widget in &candidates {
        if Footprint::of(widget, cell_size).is_empty() {
            return Err(LayoutError::InvalidDimension(format!(
                "widget `{}` covers no {cell_size}px cell",
                widget.id
            )));
        }
    }

    let sorted = sort_canonical(&candidates);
    let grid = make_matrix(
        to_cells(container.height, cell_size),
        to_cells(container.width, cell_size),
    );
    let marking = mark_by_id(grid, &sorted, cell_size)?;

    let Some(collision) = marking.collision else {
        return Ok(Resolution::accepted(sorted));
    };

    let rest: Vec<Widget> = sorted
        .into_iter()
        .filter(|widget| widget.id != placed.id)
        .collect();
    let split = split_index(&rest, &collision, &placed, cell_size);

    let (keep, shift) = rest.split_at(split);
    let mut kept = keep.to_vec();
    let mut relocated = Vec::new();
    let mut unplaced = Vec::new();

    for widget in shift {
        let mut obstacles = kept.clone();
        obstacles.push(placed.clone());
        match find_available_position(container, widget.size(), cell_size, &obstacles)? {
            Some(position) => {
                if position != widget.position() {
                    relocated.push(widget.id.clone());
                }
                kept.push(widget.moved_to(position));
            }
            None => unplaced.push(widget.clone()),
        }
    }

    kept.push(placed);
    Ok(Resolution {
        widgets: kept,
        collision: Some(collision),
        relocated,
        unplaced,
    })
}

fn ensure_unique(widgets: &[Widget]) -> Result<()> {
    let mut seen = HashSet::with_capacity(widgets.len());
    for widget in widgets {
        if !seen.insert(&widget.id) {
            return Err(LayoutError::DuplicateWidget(widget.id.clone()));
        }
    }
    Ok(())
}

/// Index in `rest` where the cascade starts.
///
/// The recorded collision names the widget written second; when that is the
/// moving widget the widget it landed on yields instead. The split also moves
/// up to the earliest widget the moving widget overlaps, since only the first
/// contested cell is recorded.
fn split_index(rest: &[Widget], collision: &Collision, placed: &Widget, cell_size: u32) -> usize {
    let anchor = if collision.intruder == placed.id {
        &collision.occupant
    } else {
        &collision.intruder
    };
    let anchor_index = rest
        .iter()
        .position(|widget| &widget.id == anchor)
        .unwrap_or(rest.len());

    let moving = Footprint::of(placed, cell_size);
    let first_overlap = rest
        .iter()
        .position(|widget| overlaps(&moving, &Footprint::of(widget, cell_size)))
        .unwrap_or(rest.len());

    anchor_index.min(first_overlap)
}

fn overlaps(a: &Footprint, b: &Footprint) -> bool {
    a.rows.start < b.rows.end
        && b.rows.start < a.rows.end
        && a.cols.start < b.cols.end
        && b.cols.start < a.cols.end
}
