use crate::geometry::WidgetId;

/// Cell state used when occupancy is attributed to a widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Free,
    Owned(WidgetId),
}

impl Cell {
    pub fn is_free(&self) -> bool {
        matches!(self, Cell::Free)
    }

    pub fn owner(&self) -> Option<&WidgetId> {
        match self {
            Cell::Free => None,
            Cell::Owned(id) => Some(id),
        }
    }
}

/// Row-major 2D grid of cells. `C::default()` is the free state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccupancyMatrix<C> {
    rows: usize,
    cols: usize,
    cells: Vec<C>,
}

/// Build a `rows` x `cols` matrix with every cell free. Zero-sized matrices are
/// valid and describe a container with no space.
pub fn make_matrix<C: Clone + Default>(rows: usize, cols: usize) -> OccupancyMatrix<C> {
    OccupancyMatrix::filled(rows, cols, C::default())
}

impl<C: Clone> OccupancyMatrix<C> {
    pub fn filled(rows: usize, cols: usize, value: C) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }
}

impl<C> OccupancyMatrix<C> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&C> {
        if self.contains(row, col) {
            self.cells.get(self.index(row, col))
        } else {
            None
        }
    }

    /// Write `value` into a cell, returning the previous value. Out-of-range
    /// writes are refused with `None` and leave the matrix untouched.
    pub fn replace(&mut self, row: usize, col: usize, value: C) -> Option<C> {
        if !self.contains(row, col) {
            return None;
        }
        let idx = self.index(row, col);
        Some(std::mem::replace(&mut self.cells[idx], value))
    }

    pub fn row(&self, row: usize) -> Option<&[C]> {
        if row >= self.rows {
            return None;
        }
        let start = self.index(row, 0);
        Some(&self.cells[start..start + self.cols])
    }

    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.cells.iter()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl<C: PartialEq> OccupancyMatrix<C> {
    pub fn all(&self, value: &C) -> bool {
        self.cells.iter().all(|cell| cell == value)
    }

    /// Whether every cell of the `rows` x `cols` block at (`top`, `left`) equals
    /// `value`, compared in place. A block that does not fit is never uniform.
    pub fn region_all(&self, top: usize, left: usize, rows: usize, cols: usize, value: &C) -> bool {
        if top + rows > self.rows || left + cols > self.cols {
            return false;
        }
        (top..top + rows).all(|row| {
            let start = self.index(row, left);
            self.cells[start..start + cols].iter().all(|cell| cell == value)
        })
    }
}
