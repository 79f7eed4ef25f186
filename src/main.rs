use docopt::Docopt;
use log::{info, warn};
use serde_derive::Deserialize;
use smallvec::smallvec;
use std::{
    fs,
    fs::File,
    io,
    io::prelude::*,
    path::Path
};
use treemaze::{
    cells::{Coordinate, CoordinateSmallVec},
    generators,
    grid::Grid,
    grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay, TextRender},
    pathing,
    renderers,
    units::{ColumnsCount, RowsCount},
};

const USAGE: &str = "Tree Mazes

Usage:
    treemaze_driver -h | --help
    treemaze_driver [options] [text] [image]

Options:
    -h --help                Show this screen.
    --grid-size=<n>          The grid size is n * n.
    --rows=<r>               The number of rows in an r*c grid [default: 16].
    --columns=<c>            The number of columns in an r*c grid [default: 16].
    --seed=<s>               Seed the random source used to build the maze and pick the longest path sweep start.
    --load-grid=<path>       Read the maze from a bit matrix file written by --save-grid instead of generating one.
    --save-grid=<path>       Serialize the maze as a bit matrix: one line per row, row 0 (south) first, 1 = East, 0 = North.
    --save-edges=<path>      Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based row-major vertex indices.
    --text-out=<path>        Output file path for a textual rendering of a maze, stdout if not given.
    --show-distances         Show the distance from the start point to all other points on the grid. The start point is the longest path start if not specified.
    --show-path              Show the path from the start to end point. Choose the start/end point automatically from the longest path if not specified.
    --start-row=<r>          Row of the path start.
    --start-column=<c>       Column of the path start.
    --end-row=<r>            Row of the path end. The end is the cell furthest from the start if not specified.
    --end-column=<c>         Column of the path end.
    --image-out=<path>       Output file path for an image rendering of a maze. Always PNG format [default: maze.png].
    --cell-pixels=<n>        Pixel count to render one cell wall in a maze [default: 20] max 255.
    --colour-distances       Indicate the distance from the start point to any cell by the cell's background colour.
    --mark-start-end         Mark the path start and end points in the image.
    --distance-map-out=<path>  Output file path for a grayscale PNG of the distances from the start point.

With neither `text` nor `image` the maze is rendered as text.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_load_grid: Option<String>,
    flag_save_grid: Option<String>,
    flag_save_edges: Option<String>,
    cmd_text: bool,
    flag_text_out: Option<String>,
    flag_show_distances: bool,
    flag_show_path: bool,
    flag_start_row: Option<u32>,
    flag_start_column: Option<u32>,
    flag_end_row: Option<u32>,
    flag_end_column: Option<u32>,
    cmd_image: bool,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_colour_distances: bool,
    flag_mark_start_end: bool,
    flag_distance_map_out: Option<String>,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    use error_chain::*;
    error_chain! {

        foreign_links {
            Io(::std::io::Error);
            ImageError(::image::ImageError);
            Maze(::treemaze::MazeError);
        }
    }
}
use crate::errors::*;

/// The start and end of whichever path the arguments describe, plus the path itself.
struct ChosenPath {
    start: Coordinate,
    end: Coordinate,
    path: Vec<Coordinate>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let maze_grid = build_maze_grid(&args)?;
    info!("maze ready: {} rows x {} columns", maze_grid.rows().0, maze_grid.columns().0);

    if let Some(ref file_path) = args.flag_save_grid {
        write_text_to_file(&maze_grid.to_bit_matrix_string(), file_path)
            .chain_err(|| format!("Failed to write maze grid to text file {}", file_path))?;
    }

    if let Some(ref file_path) = args.flag_save_edges {
        save_maze_graph(&maze_grid, file_path)?;
    }

    let chosen = path_from_arg_constraints(&args, &maze_grid)?;
    let distances = pathing::distances(&maze_grid, chosen.start)?;

    let do_text_render = args.cmd_text || !args.cmd_image;
    if do_text_render {
        let text = render_text(&args, &maze_grid, &chosen, &distances);

        if let Some(ref file_path) = args.flag_text_out {
            write_text_to_file(&text, file_path)
                .chain_err(|| format!("Failed to write maze to text file {}", file_path))?;
        } else {
            println!("{}", text);
        }
    }

    if args.cmd_image {
        let render_options = renderers::RenderOptionsBuilder::new()
            .colour_distances(args.flag_colour_distances)
            .mark_start_end(args.flag_mark_start_end)
            .start(Some(chosen.start))
            .end(Some(chosen.end))
            .show_path(args.flag_show_path)
            .distances(Some(&distances))
            .output_file(Some(Path::new(&args.flag_image_out)))
            .path(Some(chosen.path.clone()))
            .cell_side_pixels_length(args.flag_cell_pixels)
            .build();
        renderers::render_square_grid(&maze_grid, &render_options)
            .chain_err(|| format!("Failed to render maze image {}", args.flag_image_out))?;
    }

    if let Some(ref file_path) = args.flag_distance_map_out {
        renderers::render_distance_map(&distances, args.flag_cell_pixels)
            .and_then(|img| img.save(file_path))
            .chain_err(|| format!("Failed to write distance map image {}", file_path))?;
    }

    Ok(())
}

fn build_maze_grid(maze_args: &MazeArgs) -> Result<Grid> {
    if let Some(ref file_path) = maze_args.flag_load_grid {
        let data = fs::read_to_string(file_path)
            .chain_err(|| format!("Failed to read maze grid file {}", file_path))?;
        return Ok(Grid::from_bit_matrix_str(&data)?);
    }

    let (rows, columns) = if let Some(square_grid_size) = maze_args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (maze_args.flag_rows, maze_args.flag_columns)
    };

    Ok(generators::binary_tree_seeded(RowsCount(rows), ColumnsCount(columns), maze_args.flag_seed)?)
}

/// Wade through the start/end point arguments and decide which path to show:
/// - start and end given: the path between them
/// - only one point given: that point and the cell furthest from it
/// - nothing given: the longest path in the maze
fn path_from_arg_constraints(maze_args: &MazeArgs, maze_grid: &Grid) -> Result<ChosenPath> {

    let start = point_arg(maze_args.flag_start_row, maze_args.flag_start_column, "start")?;
    let end = point_arg(maze_args.flag_end_row, maze_args.flag_end_column, "end")?;

    let single_point = match (start, end) {
        (Some(s), Some(e)) => {
            let distances = pathing::distances(maze_grid, s)?;
            let path = pathing::backtrack(maze_grid, &distances, e)?;
            return Ok(ChosenPath { start: s, end: e, path });
        }
        (Some(s), None) => Some(s),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    };

    if let Some(point) = single_point {
        let distances = pathing::distances(maze_grid, point)?;
        let furthest = distances.furthest_cell();
        let path = pathing::backtrack(maze_grid, &distances, furthest)?;
        Ok(ChosenPath { start: point, end: furthest, path })
    } else {
        let longest = pathing::longest_path_seeded(maze_grid, maze_args.flag_seed)?;
        info!("longest path {} -> {}: {} steps", longest.source, longest.target, longest.length());
        Ok(ChosenPath { start: longest.source, end: longest.target, path: longest.path })
    }
}

fn point_arg(row: Option<u32>, column: Option<u32>, name: &str) -> Result<Option<Coordinate>> {
    match (row, column) {
        (Some(r), Some(c)) => Ok(Some(Coordinate::new(r, c))),
        (None, None) => Ok(None),
        _ => Err(format!("Both a row and a column are needed for the {} point.", name).into()),
    }
}

/// Pick what goes inside each cell of the text rendering:
/// - distances from the start to every cell
/// - the path from start to end
/// - otherwise just the start and end markers
fn render_text(maze_args: &MazeArgs,
               maze_grid: &Grid,
               chosen: &ChosenPath,
               distances: &pathing::DistanceMap)
               -> String {

    if maze_args.flag_show_distances && maze_args.flag_show_path {
        warn!("--show-distances and --show-path both given, showing distances");
    }

    let path_display;
    let start_end_display;
    let display: &dyn GridDisplay = if maze_args.flag_show_distances {
        distances
    } else if maze_args.flag_show_path {
        path_display = PathDisplay::new(&chosen.path);
        &path_display
    } else {
        let starts: CoordinateSmallVec = smallvec![chosen.start];
        let ends: CoordinateSmallVec = smallvec![chosen.end];
        start_end_display = StartEndPointsDisplay::new(starts, ends);
        &start_end_display
    };

    format!("{}", TextRender::with_display(maze_grid, display))
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let graph = maze_grid.to_graph();
    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", graph.node_count(), graph.edge_count()));

    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;
        graph_data.push_str(&format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
