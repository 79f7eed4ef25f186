use bit_set::BitSet;
use log::debug;
use rand::Rng;

use crate::errors::MazeResult;
use crate::grid::Grid;
use crate::grid_dimensions::GridDimensions;
use crate::units::{ColumnsCount, RowsCount};
use crate::utils;

/// Apply the binary tree maze generation algorithm to a `rows` x `columns` grid.
///
/// Every cell tosses a fair coin between carving a passage north or east. Cells on the last
/// column can only go north and cells on the last row can only go east, which leaves the
/// north east corner with nowhere to go: it becomes the root of the spanning tree.
pub fn binary_tree<R: Rng>(rows: RowsCount,
                           columns: ColumnsCount,
                           rng: &mut R)
                           -> MazeResult<Grid> {
    let dimensions = GridDimensions::new(rows, columns)?;
    let mut east_biased = BitSet::with_capacity(dimensions.size().0);

    for index in 0..dimensions.size().0 {
        let coord = dimensions.from_row_major_index(index);

        let is_east = if dimensions.is_last_row(coord) {
            // Checked before the last column, so the corner is East.
            true
        } else if dimensions.is_last_column(coord) {
            false
        } else {
            rng.gen()
        };

        if is_east {
            east_biased.insert(index);
        }
    }

    let grid = Grid::from_east_bits(dimensions, east_biased);
    debug!("binary tree maze generated: {} x {}, {} passages",
           rows.0, columns.0, grid.links_count());
    Ok(grid)
}

/// `binary_tree` with its own random source, reproducible when a seed is given.
pub fn binary_tree_seeded(rows: RowsCount,
                          columns: ColumnsCount,
                          seed: Option<u64>)
                          -> MazeResult<Grid> {
    let mut rng = utils::rng_for(seed);
    binary_tree(rows, columns, &mut rng)
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::{Bias, Coordinate};
    use crate::errors::MazeError;
    use crate::utils::seeded_rng;
    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use quickcheck::{quickcheck, TestResult};

    #[test]
    fn invalid_dimensions_rejected() {
        let mut rng = seeded_rng(1);
        assert_eq!(binary_tree(RowsCount(0), ColumnsCount(4), &mut rng),
                   Err(MazeError::InvalidDimensions { rows: 0, columns: 4 }));
        assert_eq!(binary_tree(RowsCount(4), ColumnsCount(0), &mut rng),
                   Err(MazeError::InvalidDimensions { rows: 4, columns: 0 }));
    }

    #[test]
    fn forced_borders() {
        let g = binary_tree_seeded(RowsCount(6), ColumnsCount(5), Some(99)).unwrap();
        for row in 0..5 {
            assert_eq!(g.bias(Coordinate::new(row, 4)), Ok(Bias::North));
        }
        for column in 0..5 {
            assert_eq!(g.bias(Coordinate::new(5, column)), Ok(Bias::East));
        }
    }

    #[test]
    fn corner_is_the_only_root() {
        let g = binary_tree_seeded(RowsCount(7), ColumnsCount(9), Some(3)).unwrap();
        let roots = g.iter()
            .filter(|coord| g.outgoing_link(*coord).unwrap().is_none())
            .collect::<Vec<_>>();
        assert_eq!(roots, vec![Coordinate::new(6, 8)]);
    }

    #[test]
    fn single_cell_grid() {
        let g = binary_tree_seeded(RowsCount(1), ColumnsCount(1), Some(5)).unwrap();
        assert_eq!(g.size(), 1);
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn single_row_and_column_are_corridors() {
        let row = binary_tree_seeded(RowsCount(1), ColumnsCount(6), None).unwrap();
        assert!(row.iter().all(|coord| row.bias(coord) == Ok(Bias::East)));
        assert_eq!(row.links_count(), 5);

        let column = binary_tree_seeded(RowsCount(6), ColumnsCount(1), None).unwrap();
        let bottom = column.iter().take(5).all(|coord| column.bias(coord) == Ok(Bias::North));
        assert!(bottom);
        assert_eq!(column.links_count(), 5);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = binary_tree_seeded(RowsCount(12), ColumnsCount(10), Some(2024)).unwrap();
        let b = binary_tree_seeded(RowsCount(12), ColumnsCount(10), Some(2024)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn interior_cells_use_both_biases() {
        let g = binary_tree_seeded(RowsCount(20), ColumnsCount(20), Some(11)).unwrap();
        let interior = g.iter()
            .filter(|c| c.row < 19 && c.column < 19)
            .map(|c| g.bias(c).unwrap())
            .collect::<Vec<_>>();
        assert!(interior.contains(&Bias::North));
        assert!(interior.contains(&Bias::East));
    }

    #[test]
    fn generated_grids_are_spanning_trees() {
        fn p(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = (rows as usize % 12 + 1, columns as usize % 12 + 1);
            let g = match binary_tree_seeded(RowsCount(rows), ColumnsCount(columns), Some(seed)) {
                Ok(g) => g,
                Err(_) => return TestResult::failed(),
            };
            let graph = g.to_graph();
            TestResult::from_bool(graph.edge_count() == rows * columns - 1 &&
                                  connected_components(&graph) == 1 &&
                                  !is_cyclic_undirected(&graph))
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult);
    }
}
