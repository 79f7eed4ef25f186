use bit_set::BitSet;
use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;
use std::fmt;

use crate::cells::{Bias, CompassPrimary, Coordinate};
use crate::errors::{MazeError, MazeResult};
use crate::grid_dimensions::GridDimensions;
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


/// A binary tree maze: one `Bias` bit per cell, stored row-major, set bits meaning East.
///
/// The passages are never stored. A cell is linked to its eastern or northern neighbour when its
/// own bias points there, and to its western or southern neighbour when that neighbour's bias
/// points back at it. A grid is immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    dimensions: GridDimensions,
    east_biased: BitSet,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, east biased cells: {:?}",
               self.rows(), self.columns(), self.east_biased.len())
    }
}

impl Grid {
    pub(crate) fn from_east_bits(dimensions: GridDimensions, east_biased: BitSet) -> Grid {
        Grid { dimensions, east_biased }
    }

    /// Build a grid from explicit biases, `rows[0]` being row 0 (the southern edge).
    ///
    /// The border cells are taken as given, so a grid built this way need not be a spanning
    /// tree: a last column cell biased East or a last row cell biased North has no passage out.
    pub fn from_biases(rows: &[Vec<Bias>]) -> MazeResult<Grid> {
        let columns = rows.first().map_or(0, |row| row.len());
        let dimensions = GridDimensions::new(RowsCount(rows.len()), ColumnsCount(columns))?;

        if let Some(ragged) = rows.iter().position(|row| row.len() != columns) {
            return Err(MazeError::InvalidGridData(format!("row {} has {} cells, expected {}",
                                                          ragged, rows[ragged].len(), columns)));
        }

        let mut east_biased = BitSet::with_capacity(dimensions.size().0);
        for (index, bias) in rows.iter().flat_map(|row| row.iter()).enumerate() {
            if bias.as_bit() {
                east_biased.insert(index);
            }
        }

        Ok(Grid::from_east_bits(dimensions, east_biased))
    }

    /// Parse the row-major bit matrix text form: one line per row, row 0 first,
    /// `1` for East and `0` for North. Blank lines and surrounding whitespace are ignored.
    pub fn from_bit_matrix_str(data: &str) -> MazeResult<Grid> {
        let rows = data.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(line_number, line)| {
                line.chars()
                    .map(|ch| match ch {
                        '1' => Ok(Bias::East),
                        '0' => Ok(Bias::North),
                        other => {
                            Err(MazeError::InvalidGridData(format!("unexpected '{}' on row {}",
                                                                   other, line_number)))
                        }
                    })
                    .collect::<MazeResult<Vec<Bias>>>()
            })
            .collect::<MazeResult<Vec<Vec<Bias>>>>()?;

        Grid::from_biases(&rows)
    }

    /// The row-major bit matrix text form read by `from_bit_matrix_str`.
    pub fn to_bit_matrix_string(&self) -> String {
        let mut data = self.iter_row()
            .map(|row| row.iter().map(|coord| if self.is_east(*coord) { '1' } else { '0' }).join(""))
            .join("\n");
        data.push('\n');
        data
    }

    #[inline]
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    pub fn bias(&self, coord: Coordinate) -> MazeResult<Bias> {
        self.dimensions.check_coordinate(coord)?;
        Ok(Bias::from_bit(self.is_east(coord)))
    }

    /// Is there a passage from `coord` to its neighbour in `direction`?
    ///
    /// False whenever the neighbour would lie outside the grid.
    pub fn is_neighbour_linked(&self, coord: Coordinate, direction: CompassPrimary) -> MazeResult<bool> {
        self.dimensions.check_coordinate(coord)?;
        let d = &self.dimensions;

        let linked = match direction {
            CompassPrimary::East => !d.is_last_column(coord) && self.is_east(coord),
            CompassPrimary::North => !d.is_last_row(coord) && !self.is_east(coord),
            CompassPrimary::West => {
                coord.offset(CompassPrimary::West).map_or(false, |west| self.is_east(west))
            }
            CompassPrimary::South => {
                coord.offset(CompassPrimary::South).map_or(false, |south| !self.is_east(south))
            }
        };
        Ok(linked)
    }

    /// The cell this cell's bias carves a passage to, None for cells whose bias points out of
    /// the grid (the tree root in a generated maze).
    pub fn outgoing_link(&self, coord: Coordinate) -> MazeResult<Option<Coordinate>> {
        let direction = self.bias(coord)?.direction();
        if self.is_neighbour_linked(coord, direction)? {
            Ok(coord.offset(direction))
        } else {
            Ok(None)
        }
    }

    #[inline]
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Coordinate {
        let index = rng.gen_range(0, self.size());
        self.dimensions.from_row_major_index(index)
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.dimensions)
    }

    /// Every passage, as (carving cell, carved into cell) pairs in row-major order of the
    /// carving cell.
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (Coordinate, Coordinate)> + 'a {
        self.iter().filter_map(move |coord| {
            self.outgoing_link(coord)
                .ok()
                .and_then(|link| link.map(|dst| (coord, dst)))
        })
    }

    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// The maze as an undirected petgraph graph whose node indices are the row-major cell indices.
    pub fn to_graph(&self) -> UnGraph<Coordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.dimensions.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (src, dst) in self.iter_links() {
            let (a, b) = (self.node_index(src), self.node_index(dst));
            let _ = graph.add_edge(a, b, ());
        }
        graph
    }

    #[inline]
    fn node_index(&self, coord: Coordinate) -> NodeIndex {
        NodeIndex::new(self.dimensions
            .row_major_index(coord)
            .expect("Links iter should give valid coordinate"))
    }

    #[inline]
    fn is_east(&self, coord: Coordinate) -> bool {
        self.dimensions
            .row_major_index(coord)
            .map_or(false, |index| self.east_biased.contains(index))
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::utils::seeded_rng;
    use petgraph::algo::{connected_components, is_cyclic_undirected};

    fn gc(row: u32, column: u32) -> Coordinate {
        Coordinate::new(row, column)
    }

    // Row 0 first:
    //   E N
    //   E E
    fn two_by_two() -> Grid {
        Grid::from_biases(&[vec![Bias::East, Bias::North], vec![Bias::East, Bias::East]])
            .expect("valid biases")
    }

    #[test]
    fn from_biases_requires_cells() {
        assert_eq!(Grid::from_biases(&[]),
                   Err(MazeError::InvalidDimensions { rows: 0, columns: 0 }));
        assert_eq!(Grid::from_biases(&[vec![]]),
                   Err(MazeError::InvalidDimensions { rows: 1, columns: 0 }));
    }

    #[test]
    fn from_biases_rejects_ragged_rows() {
        let result = Grid::from_biases(&[vec![Bias::East, Bias::North], vec![Bias::East]]);
        match result {
            Err(MazeError::InvalidGridData(_)) => {}
            other => panic!("expected invalid grid data, got {:?}", other),
        }
    }

    #[test]
    fn bias_lookup() {
        let g = two_by_two();
        assert_eq!(g.bias(gc(0, 0)), Ok(Bias::East));
        assert_eq!(g.bias(gc(0, 1)), Ok(Bias::North));
        assert_eq!(g.bias(gc(1, 0)), Ok(Bias::East));
        assert_eq!(g.bias(gc(1, 1)), Ok(Bias::East));
        assert_eq!(g.bias(gc(2, 0)), Err(MazeError::OutOfRange(gc(2, 0))));
    }

    #[test]
    fn neighbour_links() {
        let g = two_by_two();
        let linked = |coord, dir| g.is_neighbour_linked(coord, dir).unwrap();

        assert!(linked(gc(0, 0), CompassPrimary::East));
        assert!(!linked(gc(0, 0), CompassPrimary::North));
        assert!(!linked(gc(0, 0), CompassPrimary::West));
        assert!(!linked(gc(0, 0), CompassPrimary::South));

        assert!(linked(gc(0, 1), CompassPrimary::West));
        assert!(linked(gc(0, 1), CompassPrimary::North));
        assert!(!linked(gc(0, 1), CompassPrimary::East));

        assert!(linked(gc(1, 1), CompassPrimary::South));
        assert!(linked(gc(1, 1), CompassPrimary::West));
        assert!(!linked(gc(1, 1), CompassPrimary::East));
        assert!(!linked(gc(1, 1), CompassPrimary::North));

        assert!(linked(gc(1, 0), CompassPrimary::East));
        assert!(!linked(gc(1, 0), CompassPrimary::South));

        assert_eq!(g.is_neighbour_linked(gc(0, 2), CompassPrimary::East),
                   Err(MazeError::OutOfRange(gc(0, 2))));
    }

    #[test]
    fn outgoing_links_and_root() {
        let g = two_by_two();
        assert_eq!(g.outgoing_link(gc(0, 0)), Ok(Some(gc(0, 1))));
        assert_eq!(g.outgoing_link(gc(0, 1)), Ok(Some(gc(1, 1))));
        assert_eq!(g.outgoing_link(gc(1, 0)), Ok(Some(gc(1, 1))));
        assert_eq!(g.outgoing_link(gc(1, 1)), Ok(None));
    }

    #[test]
    fn links_iteration() {
        let g = two_by_two();
        assert_eq!(g.iter_links().collect::<Vec<_>>(),
                   vec![(gc(0, 0), gc(0, 1)), (gc(0, 1), gc(1, 1)), (gc(1, 0), gc(1, 1))]);
        assert_eq!(g.links_count(), 3);
    }

    #[test]
    fn petgraph_export_is_spanning_tree() {
        let g = two_by_two();
        let graph = g.to_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(connected_components(&graph), 1);
        assert!(!is_cyclic_undirected(&graph));
        assert_eq!(graph[NodeIndex::new(2)], gc(1, 0));
    }

    #[test]
    fn unforced_borders_disconnect() {
        // The last column is biased East, so nothing links the two rows together.
        let g = Grid::from_biases(&[vec![Bias::East, Bias::East], vec![Bias::East, Bias::East]])
            .unwrap();
        assert_eq!(g.links_count(), 2);
        assert_eq!(connected_components(&g.to_graph()), 2);
    }

    #[test]
    fn bit_matrix_text_form() {
        let g = two_by_two();
        let text = g.to_bit_matrix_string();
        assert_eq!(text, "10\n11\n");
        assert_eq!(Grid::from_bit_matrix_str(&text), Ok(g));
    }

    #[test]
    fn bit_matrix_parse_errors() {
        assert!(Grid::from_bit_matrix_str("").is_err());
        assert!(Grid::from_bit_matrix_str("10\n1x\n").is_err());
        assert!(Grid::from_bit_matrix_str("101\n11\n").is_err());
        assert!(Grid::from_bit_matrix_str("  01 \n\n 10\n").is_ok());
    }

    #[test]
    fn random_cell() {
        let g = Grid::from_biases(&vec![vec![Bias::North; 4]; 3]).unwrap();
        let mut rng = seeded_rng(7);
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
        }
    }
}
