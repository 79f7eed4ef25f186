use std::fmt;

use crate::cells::Coordinate;
use crate::grid_dimensions::GridDimensions;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};


/// Visits every cell of a grid in row-major order.
#[derive(Clone)]
pub struct CellIter {
    dimensions: GridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(dimensions: GridDimensions) -> CellIter {
        CellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Coordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions.from_row_major_index(self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Yields each row of a grid, southernmost (row 0) first.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_index: usize,
    rows_size: RowsCount,
    cols_size: ColumnsCount,
}

impl RowIter {
    pub fn new(dimensions: GridDimensions) -> RowIter {
        RowIter {
            current_index: 0,
            rows_size: dimensions.rows(),
            cols_size: dimensions.columns(),
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl DoubleEndedIterator for RowIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        let RowsCount(count) = self.rows_size;
        if self.current_index < count {
            self.rows_size = RowsCount(count - 1);
            Some(row_coordinates(count - 1, self.cols_size))
        } else {
            None
        }
    }
}
impl Iterator for RowIter {
    type Item = Vec<Coordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let RowsCount(count) = self.rows_size;
        if self.current_index < count {
            let coords = row_coordinates(self.current_index, self.cols_size);
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.rows_size.0 - self.current_index;
        (lower_bound, Some(lower_bound))
    }
}

fn row_coordinates(row: usize, columns: ColumnsCount) -> Vec<Coordinate> {
    let ColumnsCount(length) = columns;
    (0..length)
        .map(|i: usize| Coordinate::from_row_column_indices(RowIndex(row), ColumnIndex(i)))
        .collect()
}
