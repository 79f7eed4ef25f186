use image::error::{LimitError, LimitErrorKind, ParameterError, ParameterErrorKind};
use image::{GrayImage, ImageError, ImageResult, Luma, Rgb, RgbImage};
use log::info;
use std::cmp;
use std::path::Path;

use crate::cells::{CompassPrimary, Coordinate};
use crate::grid::Grid;
use crate::pathing::DistanceMap;
use crate::units::{ColumnsCount, RowsCount};

const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const RED: Rgb<u8> = Rgb([0xff, 0, 0]);
const GREEN: Rgb<u8> = Rgb([0, 0xc0, 0]);
const ORANGE: Rgb<u8> = Rgb([0xff, 0xa0, 0]);

#[derive(Debug)]
pub struct RenderOptions<'a> {
    colour_distances: bool,
    mark_start_end: bool,
    show_path: bool,
    start: Option<Coordinate>,
    end: Option<Coordinate>,
    distances: Option<&'a DistanceMap>,
    output_file: Option<&'a Path>,
    path: Option<Vec<Coordinate>>,
    cell_side_pixels_length: u8,
}

#[derive(Debug)]
pub struct RenderOptionsBuilder<'a> {
    options: RenderOptions<'a>,
}
impl<'a> RenderOptionsBuilder<'a> {
    pub fn new() -> RenderOptionsBuilder<'a> {
        RenderOptionsBuilder {
            options: RenderOptions {
                colour_distances: false,
                mark_start_end: false,
                show_path: false,
                start: None,
                end: None,
                distances: None,
                output_file: None,
                path: None,
                cell_side_pixels_length: 10,
            },
        }
    }
    pub fn colour_distances(mut self, colour_distances: bool) -> RenderOptionsBuilder<'a> {
        self.options.colour_distances = colour_distances;
        self
    }
    pub fn mark_start_end(mut self, mark_start_end: bool) -> RenderOptionsBuilder<'a> {
        self.options.mark_start_end = mark_start_end;
        self
    }
    pub fn show_path(mut self, show_path: bool) -> RenderOptionsBuilder<'a> {
        self.options.show_path = show_path;
        self
    }
    pub fn start(mut self, start: Option<Coordinate>) -> RenderOptionsBuilder<'a> {
        self.options.start = start;
        self
    }
    pub fn end(mut self, end: Option<Coordinate>) -> RenderOptionsBuilder<'a> {
        self.options.end = end;
        self
    }
    pub fn distances(mut self, distances: Option<&'a DistanceMap>) -> RenderOptionsBuilder<'a> {
        self.options.distances = distances;
        self
    }
    pub fn output_file(mut self, output_file: Option<&'a Path>) -> RenderOptionsBuilder<'a> {
        self.options.output_file = output_file;
        self
    }
    pub fn path(mut self, path: Option<Vec<Coordinate>>) -> RenderOptionsBuilder<'a> {
        self.options.path = path;
        self
    }
    pub fn cell_side_pixels_length(mut self, cell_side_pixels_length: u8) -> RenderOptionsBuilder<'a> {
        self.options.cell_side_pixels_length = cell_side_pixels_length;
        self
    }
    pub fn build(self) -> RenderOptions<'a> {
        self.options
    }
}

impl<'a> Default for RenderOptionsBuilder<'a> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// Pixel geometry of a rendered maze: one cell of margin all around, north at the top.
#[derive(Debug, Copy, Clone)]
struct Layout {
    cell: u32,
    rows: u32,
    width: u32,
    height: u32,
}

impl Layout {
    fn new(grid: &Grid, cell_side_pixels_length: u8) -> ImageResult<Layout> {
        let (RowsCount(rows), ColumnsCount(columns)) = (grid.rows(), grid.columns());
        // Anything smaller leaves no room between walls.
        let cell = cmp::max(cell_side_pixels_length as u32, 3);
        Ok(Layout {
            cell,
            rows: rows as u32,
            width: pixel_extent(columns, 2, cell)?,
            height: pixel_extent(rows, 2, cell)?,
        })
    }

    fn image_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Top left pixel of a cell. The cell must lie on the grid.
    fn cell_origin(&self, coord: Coordinate) -> (u32, u32) {
        let x = (coord.column + 1) * self.cell;
        let y = (self.rows - coord.row) * self.cell;
        (x, y)
    }

    fn cell_centre(&self, coord: Coordinate) -> (u32, u32) {
        let (x, y) = self.cell_origin(coord);
        (x + self.cell / 2, y + self.cell / 2)
    }
}

/// Pixels spanned by `cells` cells plus `margin_cells` of border, or a dimension error when that
/// does not fit an image side.
fn pixel_extent(cells: usize, margin_cells: usize, cell_pixels: u32) -> ImageResult<u32> {
    cells.checked_add(margin_cells)
        .filter(|n| *n <= u32::MAX as usize)
        .and_then(|n| (n as u32).checked_mul(cell_pixels))
        .ok_or_else(|| ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError)))
}

fn off_grid_error(coord: Coordinate, what: &str) -> ImageError {
    let reason = format!("{} {} is outside the grid", what, coord);
    ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::Generic(reason)))
}

/// Overlay points are only drawn for cells on the grid.
fn check_on_grid(grid: &Grid, coord: Coordinate, what: &str) -> ImageResult<()> {
    if grid.is_valid_coordinate(coord) {
        Ok(())
    } else {
        Err(off_grid_error(coord, what))
    }
}

/// Draw the maze walls, plus whichever overlays the options ask for, and save the image when an
/// output file is set.
///
/// Fails with a parameter error if a start, end or path cell lies outside the grid, and with a
/// limits error if the image would be too large to address.
pub fn render_square_grid(grid: &Grid, options: &RenderOptions) -> ImageResult<RgbImage> {
    let layout = Layout::new(grid, options.cell_side_pixels_length)?;

    if options.show_path {
        if let Some(ref path) = options.path {
            for coord in path {
                check_on_grid(grid, *coord, "path cell")?;
            }
        }
    }
    if options.mark_start_end {
        if let Some(start) = options.start {
            check_on_grid(grid, start, "start")?;
        }
        if let Some(end) = options.end {
            check_on_grid(grid, end, "end")?;
        }
    }

    let (width, height) = layout.image_size();
    let mut img = RgbImage::from_pixel(width, height, WHITE);

    if options.colour_distances {
        if let Some(distances) = options.distances {
            colour_cells_by_distance(&mut img, &layout, grid, distances);
        }
    }

    draw_walls(&mut img, &layout, grid);

    if options.show_path {
        if let Some(ref path) = options.path {
            draw_path(&mut img, &layout, path);
        }
    }

    if options.mark_start_end {
        let inset = layout.cell / 3;
        let marker = |img: &mut RgbImage, coord: Coordinate, colour| {
            let (x, y) = layout.cell_origin(coord);
            fill_rect(img, x + inset, y + inset, layout.cell - 2 * inset, layout.cell - 2 * inset, colour);
        };
        if let Some(start) = options.start {
            marker(&mut img, start, GREEN);
        }
        if let Some(end) = options.end {
            marker(&mut img, end, ORANGE);
        }
    }

    if let Some(file_path) = options.output_file {
        img.save(file_path)?;
        info!("maze image written to {}", file_path.display());
    }

    Ok(img)
}

/// A grayscale image of the distance map, one `cell_side_pixels_length` square per cell, scaled so
/// the furthest cell is white. Unreached cells are black.
pub fn render_distance_map(distances: &DistanceMap, cell_side_pixels_length: u8) -> ImageResult<GrayImage> {
    let dimensions = distances.dimensions();
    let (RowsCount(rows), ColumnsCount(columns)) = (dimensions.rows(), dimensions.columns());
    let cell = cmp::max(cell_side_pixels_length as u32, 1);
    let width = pixel_extent(columns, 0, cell)?;
    let height = pixel_extent(rows, 0, cell)?;
    let max = cmp::max(distances.max(), 1) as u64;

    Ok(GrayImage::from_fn(width, height, |x, y| {
        let row = rows as u32 - 1 - y / cell;
        let coord = Coordinate::new(row, x / cell);
        let intensity = distances.distance_to(coord)
            .map_or(0, |d| (d as u64 * 255 / max) as u8);
        Luma([intensity])
    }))
}

fn colour_cells_by_distance(img: &mut RgbImage, layout: &Layout, grid: &Grid, distances: &DistanceMap) {
    let max = cmp::max(distances.max(), 1);
    for coord in grid.iter() {
        if let Some(d) = distances.distance_to(coord) {
            // Blue near the source, paler further away.
            let fade = (d as u64 * 0xc0 / max as u64) as u8;
            let colour = Rgb([fade, fade, 0xff]);
            let (x, y) = layout.cell_origin(coord);
            fill_rect(img, x, y, layout.cell, layout.cell, colour);
        }
    }
}

fn draw_walls(img: &mut RgbImage, layout: &Layout, grid: &Grid) {
    let cell = layout.cell;
    let (width, height) = layout.image_size();

    // Outer boundary.
    fill_rect(img, cell, cell, width - 2 * cell + 1, 1, BLACK);
    fill_rect(img, cell, height - cell, width - 2 * cell + 1, 1, BLACK);
    fill_rect(img, cell, cell, 1, height - 2 * cell + 1, BLACK);
    fill_rect(img, width - cell, cell, 1, height - 2 * cell + 1, BLACK);

    for coord in grid.iter() {
        let (x, y) = layout.cell_origin(coord);
        let east_open = grid.is_neighbour_linked(coord, CompassPrimary::East).unwrap_or(false);
        let north_open = grid.is_neighbour_linked(coord, CompassPrimary::North).unwrap_or(false);

        if !east_open {
            fill_rect(img, x + cell, y, 1, cell + 1, BLACK);
        }
        if !north_open {
            fill_rect(img, x, y, cell + 1, 1, BLACK);
        }
    }
}

fn draw_path(img: &mut RgbImage, layout: &Layout, path: &[Coordinate]) {
    let thickness = cmp::max(layout.cell / 5, 1);
    let half = thickness / 2;

    for pair in path.windows(2) {
        let (ax, ay) = layout.cell_centre(pair[0]);
        let (bx, by) = layout.cell_centre(pair[1]);
        let (left, right) = (cmp::min(ax, bx), cmp::max(ax, bx));
        let (top, bottom) = (cmp::min(ay, by), cmp::max(ay, by));
        fill_rect(img,
                  left.saturating_sub(half),
                  top.saturating_sub(half),
                  right - left + thickness,
                  bottom - top + thickness,
                  RED);
    }
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, colour: Rgb<u8>) {
    let x_end = cmp::min(x.saturating_add(w), img.width());
    let y_end = cmp::min(y.saturating_add(h), img.height());
    for px in x..x_end {
        for py in y..y_end {
            img.put_pixel(px, py, colour);
        }
    }
}
