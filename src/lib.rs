//! **treemaze** generates binary tree mazes and finds distances and longest paths through them.
//!
//! ```
//! use treemaze::{generators, pathing};
//! use treemaze::cells::Coordinate;
//! use treemaze::units::{ColumnsCount, RowsCount};
//!
//! let grid = generators::binary_tree_seeded(RowsCount(8), ColumnsCount(8), Some(1)).unwrap();
//! let distances = pathing::distances(&grid, Coordinate::new(0, 0)).unwrap();
//! let path = pathing::backtrack(&grid, &distances, Coordinate::new(7, 7)).unwrap();
//! assert_eq!(path.len() as u32, distances.distance_to(Coordinate::new(7, 7)).unwrap() + 1);
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod renderers;
pub mod units;
pub mod utils;

pub use crate::errors::{MazeError, MazeResult};
