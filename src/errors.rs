use std::error;
use std::fmt;

use crate::cells::Coordinate;

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum MazeError {
    /// A grid needs at least one row and one column.
    InvalidDimensions { rows: usize, columns: usize },
    /// The coordinate lies outside the grid.
    OutOfRange(Coordinate),
    /// The distance map was computed for a grid of a different shape.
    StaleDistanceMap,
    /// The distance map never reached this coordinate from its source.
    Unreachable(Coordinate),
    /// Serialized grid data could not be parsed.
    InvalidGridData(String),
    /// The distance type cannot count as far as the grid's longest possible path.
    DistanceOverflow { cells: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::InvalidDimensions { rows, columns } => {
                write!(f, "invalid grid dimensions {} x {}", rows, columns)
            }
            MazeError::OutOfRange(coord) => write!(f, "coordinate {} is outside the grid", coord),
            MazeError::StaleDistanceMap => {
                write!(f, "distance map does not belong to this grid")
            }
            MazeError::Unreachable(coord) => {
                write!(f, "coordinate {} is unreachable from the distance map source", coord)
            }
            MazeError::InvalidGridData(ref reason) => write!(f, "invalid grid data: {}", reason),
            MazeError::DistanceOverflow { cells } => {
                write!(f, "distance type too small for a grid of {} cells", cells)
            }
        }
    }
}

impl error::Error for MazeError {}

pub type MazeResult<T> = Result<T, MazeError>;
