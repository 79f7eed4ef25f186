use smallvec::SmallVec;
use std::fmt;

use crate::units::{ColumnIndex, RowIndex};

/// At most four cells share a wall with any one cell.
pub type CoordinateSmallVec = SmallVec<[Coordinate; 4]>;

/// A cell position on a rectangular grid.
///
/// Row 0 is the southern edge of the maze and column 0 the western edge, so `North` increases
/// the row and `East` increases the column. Ordering is row-major.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub row: u32,
    pub column: u32,
}

impl Coordinate {
    pub fn new(row: u32, column: u32) -> Coordinate {
        Coordinate { row, column }
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> Coordinate {
        let (RowIndex(row), ColumnIndex(col)) = (row_index, col_index);
        Coordinate::new(row as u32, col as u32)
    }

    /// Creates a new `Coordinate` offset 1 cell away in the given direction.
    /// Returns None if the offset would go below row or column zero; the upper bounds
    /// depend on the grid so are checked by the caller.
    pub fn offset(self, dir: CompassPrimary) -> Option<Coordinate> {
        let (row, column) = (self.row, self.column);
        match dir {
            CompassPrimary::East => column.checked_add(1).map(|c| Coordinate::new(row, c)),
            CompassPrimary::North => row.checked_add(1).map(|r| Coordinate::new(r, column)),
            CompassPrimary::West => column.checked_sub(1).map(|c| Coordinate::new(row, c)),
            CompassPrimary::South => row.checked_sub(1).map(|r| Coordinate::new(r, column)),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    East,
    North,
    West,
    South,
}

impl CompassPrimary {
    /// The fixed enumeration order used wherever neighbours are listed.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::East,
                                          CompassPrimary::North,
                                          CompassPrimary::West,
                                          CompassPrimary::South];
}

/// The single passage a binary tree maze cell carves out of itself.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Bias {
    North,
    East,
}

impl Bias {
    #[inline]
    pub fn direction(self) -> CompassPrimary {
        match self {
            Bias::North => CompassPrimary::North,
            Bias::East => CompassPrimary::East,
        }
    }

    /// `true` encodes East, matching the row-major bit matrix serialization.
    #[inline]
    pub fn from_bit(is_east: bool) -> Bias {
        if is_east {
            Bias::East
        } else {
            Bias::North
        }
    }

    #[inline]
    pub fn as_bit(self) -> bool {
        self == Bias::East
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn offsets() {
        let c = Coordinate::new(2, 3);
        assert_eq!(c.offset(CompassPrimary::East), Some(Coordinate::new(2, 4)));
        assert_eq!(c.offset(CompassPrimary::North), Some(Coordinate::new(3, 3)));
        assert_eq!(c.offset(CompassPrimary::West), Some(Coordinate::new(2, 2)));
        assert_eq!(c.offset(CompassPrimary::South), Some(Coordinate::new(1, 3)));
    }

    #[test]
    fn offsets_clamped_at_representable_range() {
        let origin = Coordinate::new(0, 0);
        assert_eq!(origin.offset(CompassPrimary::West), None);
        assert_eq!(origin.offset(CompassPrimary::South), None);

        let far = Coordinate::new(u32::MAX, u32::MAX);
        assert_eq!(far.offset(CompassPrimary::East), None);
        assert_eq!(far.offset(CompassPrimary::North), None);
    }

    #[test]
    fn row_major_ordering() {
        let mut coords = vec![Coordinate::new(1, 0), Coordinate::new(0, 5), Coordinate::new(0, 1)];
        coords.sort();
        assert_eq!(coords,
                   vec![Coordinate::new(0, 1), Coordinate::new(0, 5), Coordinate::new(1, 0)]);
    }

    #[test]
    fn bias_bits() {
        assert_eq!(Bias::from_bit(true), Bias::East);
        assert_eq!(Bias::from_bit(false), Bias::North);
        assert!(Bias::East.as_bit());
        assert!(!Bias::North.as_bit());
        assert_eq!(Bias::North.direction(), CompassPrimary::North);
    }
}
