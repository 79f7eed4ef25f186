// Distances over a binary tree maze.
//
// The maze is a tree so every cell has exactly one route to any other. There are no weights on the
// passages, every step is just one from the previous cell, so the first time a cell is reached
// its distance is final. A Dijkstra priority frontier would pop cells in exactly the order a plain
// breadth first frontier visits them, so the frontier here is just a vec per distance level.
//
// The distance map records the grid shape it was computed for. A map computed for some other
// grid of the same shape cannot be told apart up front, `backtrack` only notices when it runs out
// of strictly nearer neighbours.

use bit_set::BitSet;
use log::{debug, trace};
use num::traits::{Bounded, One, ToPrimitive, Unsigned, Zero};
use rand::Rng;
use smallvec::SmallVec;
use std::fmt::{Debug, Display, LowerHex};
use std::ops::Add;

use crate::cells::{CompassPrimary, Coordinate, CoordinateSmallVec};
use crate::errors::{MazeError, MazeResult};
use crate::grid::Grid;
use crate::grid_dimensions::GridDimensions;
use crate::utils;


// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this out each time
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add<Output = Self> + ToPrimitive + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T: Zero + One + Bounded + Unsigned + Add<Output = T> + ToPrimitive + Debug + Clone + Copy + Display + LowerHex + Ord> MaxDistance for T {}


/// The cells joined to `coord` by a passage, listed East, North, West, South.
pub fn neighbours(grid: &Grid, coord: Coordinate) -> MazeResult<CoordinateSmallVec> {
    let mut linked = CoordinateSmallVec::new();
    for &direction in CompassPrimary::ALL.iter() {
        if grid.is_neighbour_linked(coord, direction)? {
            if let Some(neighbour) = coord.offset(direction) {
                linked.push(neighbour);
            }
        }
    }
    Ok(linked)
}

/// Hop counts from one source cell to every cell it can reach.
///
/// Unreached cells have no distance rather than a sentinel value, which only matters for grids
/// that are not spanning trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap<MaxDistanceT = u32> {
    dimensions: GridDimensions,
    source: Coordinate,
    distances: Vec<MaxDistanceT>,
    reached: BitSet,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> DistanceMap<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    pub fn for_grid(grid: &Grid, source: Coordinate) -> MazeResult<DistanceMap<MaxDistanceT>> {
        let dimensions = grid.dimensions();
        let source_index = dimensions.row_major_index(source)
            .ok_or(MazeError::OutOfRange(source))?;

        let cells_count = grid.size();
        let longest_possible = cells_count - 1;
        if let Some(max_representable) = MaxDistanceT::max_value().to_usize() {
            if max_representable < longest_possible {
                return Err(MazeError::DistanceOverflow { cells: cells_count });
            }
        }

        let mut distances = vec![MaxDistanceT::zero(); cells_count];
        let mut reached = BitSet::with_capacity(cells_count);
        let mut max = MaxDistanceT::zero();
        reached.insert(source_index);

        // The reached set doubles as the visited set, so the frontier never holds a cell twice.
        let mut frontier = vec![source];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[dimensions.row_major_index(*cell_coord)
                    .ok_or(MazeError::OutOfRange(*cell_coord))?];

                for link_coordinate in neighbours(grid, *cell_coord)?.iter() {
                    let link_index = dimensions.row_major_index(*link_coordinate)
                        .ok_or(MazeError::OutOfRange(*link_coordinate))?;

                    if reached.insert(link_index) {
                        let distance_to_link = distance_to_cell + MaxDistanceT::one();
                        distances[link_index] = distance_to_link;
                        if distance_to_link > max {
                            max = distance_to_link;
                        }
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        debug!("distances from {}: reached {} of {} cells, max distance {}",
               source, reached.len(), cells_count, max);

        Ok(DistanceMap {
            dimensions,
            source,
            distances,
            reached,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn source(&self) -> Coordinate {
        self.source
    }

    #[inline(always)]
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// None for cells outside the grid and for cells the source cannot reach.
    #[inline]
    pub fn distance_to(&self, coord: Coordinate) -> Option<MaxDistanceT> {
        self.dimensions
            .row_major_index(coord)
            .filter(|index| self.reached.contains(*index))
            .map(|index| self.distances[index])
    }

    #[inline]
    pub fn is_reachable(&self, coord: Coordinate) -> bool {
        self.distance_to(coord).is_some()
    }

    #[inline]
    pub fn reached_count(&self) -> usize {
        self.reached.len()
    }

    /// All cells at the maximum distance, in row-major order.
    pub fn furthest_cells(&self) -> SmallVec<[Coordinate; 8]> {
        let furthest_distance = self.max();
        self.reached
            .iter()
            .filter(|index| self.distances[*index] == furthest_distance)
            .map(|index| self.dimensions.from_row_major_index(index))
            .collect()
    }

    /// The first cell at the maximum distance in row-major order.
    pub fn furthest_cell(&self) -> Coordinate {
        let furthest_distance = self.max();
        self.reached
            .iter()
            .find(|index| self.distances[*index] == furthest_distance)
            .map_or(self.source, |index| self.dimensions.from_row_major_index(index))
    }
}

/// `DistanceMap::for_grid` with `u32` distances.
pub fn distances(grid: &Grid, source: Coordinate) -> MazeResult<DistanceMap> {
    DistanceMap::<u32>::for_grid(grid, source)
}

/// Walk from `target` back to the distance map's source, always stepping to the linked neighbour
/// with the smallest distance (ties broken by coordinate order).
///
/// The returned path starts at `target`, ends at the source and holds `distance(target) + 1`
/// cells. The map must have been computed over this grid: a map for a grid of another shape is
/// rejected with `StaleDistanceMap`, a map for a different grid of the same shape is only caught
/// when the walk stops getting nearer to the source.
pub fn backtrack<MaxDistanceT>(grid: &Grid,
                               distances: &DistanceMap<MaxDistanceT>,
                               target: Coordinate)
                               -> MazeResult<Vec<Coordinate>>
    where MaxDistanceT: MaxDistance
{
    if grid.dimensions() != distances.dimensions() {
        return Err(MazeError::StaleDistanceMap);
    }
    grid.dimensions().check_coordinate(target)?;

    let mut current_distance = distances.distance_to(target)
        .ok_or(MazeError::Unreachable(target))?;
    let mut current_coord = target;

    let mut path = Vec::with_capacity(current_distance.to_usize().unwrap_or(0) + 1);
    path.push(target);

    while current_distance > MaxDistanceT::zero() {

        let closest_to_start = neighbours(grid, current_coord)?
            .iter()
            .filter_map(|coord| distances.distance_to(*coord).map(|d| (d, *coord)))
            .min();

        match closest_to_start {
            Some((closer_distance, closer_coord)) if closer_distance < current_distance => {
                trace!("backtrack step {} -> {} (distance {})",
                       current_coord, closer_coord, closer_distance);
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // Not getting any closer, the distances were computed over some other maze.
            _ => return Err(MazeError::StaleDistanceMap),
        }
    }

    if current_coord != distances.source() {
        return Err(MazeError::StaleDistanceMap);
    }

    Ok(path)
}

/// The two ends of a longest shortest path through the maze and the path between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestPath {
    /// The cell furthest from an arbitrary starting cell.
    pub source: Coordinate,
    /// The cell furthest from `source`.
    pub target: Coordinate,
    /// Runs from `target` back to `source`.
    pub path: Vec<Coordinate>,
}

impl LongestPath {
    /// Number of passages walked along the path.
    pub fn length(&self) -> usize {
        self.path.len() - 1
    }
}

/// Find the maze's diameter with two distance sweeps.
///
/// The cell furthest from any cell of a tree is one end of a longest path, and the cell furthest
/// from that end is the other. Only exact on perfect mazes; on a disconnected grid it finds the
/// longest path within the component of the random starting cell.
pub fn longest_path<R: Rng>(grid: &Grid, rng: &mut R) -> MazeResult<LongestPath> {
    let arbitrary_start_point = grid.random_cell(rng);

    let first_distances = distances(grid, arbitrary_start_point)?;
    let long_path_start_coordinate = first_distances.furthest_cell();

    let distances_from_start = distances(grid, long_path_start_coordinate)?;
    let end_point = distances_from_start.furthest_cell();

    let path = backtrack(grid, &distances_from_start, end_point)?;
    debug!("longest path from {} to {}: {} passages (swept from {})",
           long_path_start_coordinate, end_point, path.len() - 1, arbitrary_start_point);

    Ok(LongestPath {
        source: long_path_start_coordinate,
        target: end_point,
        path,
    })
}

/// `longest_path` with its own random source, reproducible when a seed is given.
pub fn longest_path_seeded(grid: &Grid, seed: Option<u64>) -> MazeResult<LongestPath> {
    let mut rng = utils::rng_for(seed);
    longest_path(grid, &mut rng)
}
