use std::fmt;

use crate::cells::{CompassPrimary, Coordinate, CoordinateSmallVec};
use crate::grid::Grid;
use crate::pathing::{DistanceMap, MaxDistance};
use crate::units::ColumnsCount;
use crate::utils::{self, FnvHashSet};


/// Fills the inside of each cell when a grid is rendered as text. Bodies are three characters wide.
pub trait GridDisplay {
    fn render_cell_body(&self, coord: Coordinate) -> String;
}

impl<MaxDistanceT> GridDisplay for DistanceMap<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    fn render_cell_body(&self, coord: Coordinate) -> String {
        if let Some(d) = self.distance_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Coordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Coordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Coordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Coordinate) -> String {

        let contains_coordinate =
            |coordinates: &CoordinateSmallVec| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            String::from(" S ")

        } else if contains_coordinate(&self.end_coordinates) {

            String::from(" E ")

        } else {
            String::from("   ")
        }
    }
}

/// ASCII rendering of a maze, north at the top.
pub struct TextRender<'a> {
    grid: &'a Grid,
    grid_display: Option<&'a dyn GridDisplay>,
}

impl<'a> TextRender<'a> {
    pub fn new(grid: &'a Grid) -> TextRender<'a> {
        TextRender { grid, grid_display: None }
    }

    pub fn with_display(grid: &'a Grid, grid_display: &'a dyn GridDisplay) -> TextRender<'a> {
        TextRender { grid, grid_display: Some(grid_display) }
    }

    fn cell_body(&self, coord: Coordinate) -> String {
        self.grid_display
            .map_or_else(|| String::from("   "), |display| display.render_cell_body(coord))
    }

    fn is_open(&self, coord: Coordinate, direction: CompassPrimary) -> bool {
        self.grid.is_neighbour_linked(coord, direction).unwrap_or(false)
    }
}

impl<'a> fmt::Display for TextRender<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const CORNER: &str = "+";
        const WALL_H: &str = "---";
        const OPEN_H: &str = "   ";
        const WALL_V: &str = "|";
        const OPEN_V: &str = " ";

        let ColumnsCount(columns_count) = self.grid.columns();
        let boundary = format!("{}{}", CORNER, format!("{}{}", WALL_H, CORNER).repeat(columns_count));

        writeln!(f, "{}", boundary)?;
        let mut rows = self.grid.iter_row().rev().peekable();
        while let Some(row) = rows.next() {

            let mut body = String::from(WALL_V);
            for coord in &row {
                body.push_str(&self.cell_body(*coord));
                body.push_str(if self.is_open(*coord, CompassPrimary::East) { OPEN_V } else { WALL_V });
            }
            writeln!(f, "{}", body)?;

            // The wall below this row, unless it is the southern boundary.
            if rows.peek().is_some() {
                let mut walls = String::from(CORNER);
                for coord in &row {
                    walls.push_str(if self.is_open(*coord, CompassPrimary::South) { OPEN_H } else { WALL_H });
                    walls.push_str(CORNER);
                }
                writeln!(f, "{}", walls)?;
            }
        }
        writeln!(f, "{}", boundary)
    }
}
