use crate::cells::Coordinate;
use crate::errors::{MazeError, MazeResult};
use crate::units::{ColumnIndex, ColumnsCount, EdgesCount, NodesCount, RowIndex, RowsCount};


/// The shape of a rectangular grid. Both sides are always at least one cell long.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl GridDimensions {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> MazeResult<GridDimensions> {
        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);

        // Coordinates are u32 pairs and row-major indices must fit a usize.
        let representable = r <= u32::MAX as usize && c <= u32::MAX as usize &&
                            r.checked_mul(c).is_some();
        if r == 0 || c == 0 || !representable {
            return Err(MazeError::InvalidDimensions { rows: r, columns: c });
        }

        Ok(GridDimensions { rows, columns })
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Nodes and edges of the spanning tree laid over this grid.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        (cells_count, EdgesCount(cells_count.0 - 1))
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    #[inline]
    pub fn check_coordinate(&self, coord: Coordinate) -> MazeResult<Coordinate> {
        if self.is_valid_coordinate(coord) {
            Ok(coord)
        } else {
            Err(MazeError::OutOfRange(coord))
        }
    }

    #[inline]
    pub fn is_last_row(&self, coord: Coordinate) -> bool {
        coord.row as usize == self.rows.0 - 1
    }

    #[inline]
    pub fn is_last_column(&self, coord: Coordinate) -> bool {
        coord.column as usize == self.columns.0 - 1
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..size.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn row_major_index(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.column as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn from_row_major_index(&self, index: usize) -> Coordinate {
        let ColumnsCount(width) = self.columns;
        Coordinate::from_row_column_indices(RowIndex(index / width), ColumnIndex(index % width))
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn dims(rows: usize, columns: usize) -> GridDimensions {
        GridDimensions::new(RowsCount(rows), ColumnsCount(columns)).expect("valid dimensions")
    }

    #[test]
    fn zero_sized_dimensions_rejected() {
        assert_eq!(GridDimensions::new(RowsCount(0), ColumnsCount(3)),
                   Err(MazeError::InvalidDimensions { rows: 0, columns: 3 }));
        assert_eq!(GridDimensions::new(RowsCount(3), ColumnsCount(0)),
                   Err(MazeError::InvalidDimensions { rows: 3, columns: 0 }));
    }

    #[test]
    fn unrepresentable_dimensions_rejected() {
        let too_big = u32::MAX as usize + 1;
        assert!(GridDimensions::new(RowsCount(too_big), ColumnsCount(1)).is_err());
    }

    #[test]
    fn size_and_graph_size() {
        let d = dims(3, 4);
        assert_eq!(d.size(), NodesCount(12));
        assert_eq!(d.graph_size(), (NodesCount(12), EdgesCount(11)));
        assert_eq!(dims(1, 1).graph_size(), (NodesCount(1), EdgesCount(0)));
    }

    #[test]
    fn coordinate_as_index() {
        let d = dims(3, 3);
        let gc = |r, c| Coordinate::new(r, c);
        let coords = [gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2), gc(2, 0),
                      gc(2, 1), gc(2, 2)];
        let indices = coords.iter()
            .map(|coord| d.row_major_index(*coord))
            .collect::<Vec<Option<usize>>>();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        for (index, coord) in coords.iter().enumerate() {
            assert_eq!(d.from_row_major_index(index), *coord);
        }

        assert_eq!(d.row_major_index(gc(2, 3)), None);
        assert_eq!(d.row_major_index(gc(3, 2)), None);
        assert_eq!(d.row_major_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn check_coordinate_reports_out_of_range() {
        let d = dims(2, 5);
        assert_eq!(d.check_coordinate(Coordinate::new(1, 4)), Ok(Coordinate::new(1, 4)));
        assert_eq!(d.check_coordinate(Coordinate::new(2, 0)),
                   Err(MazeError::OutOfRange(Coordinate::new(2, 0))));
    }

    #[test]
    fn last_row_and_column() {
        let d = dims(2, 5);
        assert!(d.is_last_row(Coordinate::new(1, 0)));
        assert!(!d.is_last_row(Coordinate::new(0, 4)));
        assert!(d.is_last_column(Coordinate::new(0, 4)));
        assert!(!d.is_last_column(Coordinate::new(1, 3)));
    }
}
