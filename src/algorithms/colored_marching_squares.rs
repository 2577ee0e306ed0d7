//! Marching squares over a field of region ids.
//!
//! ```text
//! Per cell:
//! 1. 4 corner samples  →  4 colors
//! 2. 1 color           →  nothing
//! 3. 2 colors          →  SQUARE_SEGMENT_TABLE segments between crossed edges
//! 4. 3-4 colors        →  a junction at the cell center, one segment per crossed edge
//! ```
//!
//! Scalar samples take part as two colors, inside (`1`) and outside (`0`).

use nalgebra::Vector2;
use ndarray::Array2;

use crate::{
    contour::Contour,
    field::{ColoredField, Sample},
    grid::{EdgePlacement, Grid2},
    interp::{find_t, interpolate_points},
    tables::square::{NUM_SQUARE_EDGES, SQUARE_EDGE_CORNERS, square_segments},
    types::{Point2, SquareConfiguration},
};

/// Extracts the region boundaries of `field` over `grid` into a new [`Contour`].
pub fn extract_colored_contour<F: ColoredField + ?Sized>(field: &F, grid: &Grid2) -> Contour {
    let mut contour = Contour::new();
    colored_marching_squares(field, grid, &mut contour);
    contour
}

/// Like [`extract_colored_contour`], appending to an existing contour.
pub fn colored_marching_squares<F: ColoredField + ?Sized>(
    field: &F,
    grid: &Grid2,
    contour: &mut Contour,
) {
    let samples = grid.sample(field);
    colored_marching_squares_from_samples(&samples, grid, contour);
}

/// Runs colored marching squares over samples already taken at every lattice point
/// of `grid`, indexed `[[x, y]]` as produced by [`Grid2::sample`].
///
/// # Panics
/// Panics if the shape of `samples` does not match the grid resolution.
pub fn colored_marching_squares_from_samples(
    samples: &Array2<Sample>,
    grid: &Grid2,
    contour: &mut Contour,
) {
    let [rx, ry] = grid.resolution();
    assert_eq!(samples.dim(), (rx, ry), "samples do not match grid resolution");
    let _span = tracing::debug_span!("colored_marching_squares", resolution = ?grid.resolution())
        .entered();

    let first_vertex = contour.num_vertices();
    let first_line = contour.num_lines();
    let [nx, ny] = grid.num_cells();

    for y in 0..ny {
        for x in 0..nx {
            let corners = grid.square_corner_indices(x, y);
            let cell = Cell {
                samples: corners.map(|[cx, cy]| samples[[cx, cy]]),
                positions: corners.map(|[cx, cy]| grid.point(cx, cy)),
            };
            march_cell(&cell, grid, contour);
        }
    }

    tracing::debug!(
        vertices = contour.num_vertices() - first_vertex,
        lines = contour.num_lines() - first_line,
        "colored contour extracted"
    );
}

struct Cell {
    samples: [Sample; 4],
    positions: [Point2; 4],
}

fn march_cell(cell: &Cell, grid: &Grid2, contour: &mut Contour) {
    let colors = cell.samples.map(|s| s.color(grid.threshold()));
    let mut sorted = colors;
    sorted.sort_unstable();
    let num_colors = 1 + sorted.windows(2).filter(|pair| pair[0] != pair[1]).count();
    if num_colors == 1 {
        return;
    }

    let mut edge_vertices = [None; NUM_SQUARE_EDGES];
    for (edge, &[a, b]) in SQUARE_EDGE_CORNERS.iter().enumerate() {
        if colors[a] != colors[b] {
            let point = edge_point(cell, a, b, grid);
            edge_vertices[edge] = Some(contour.add_vertex(point));
        }
    }

    if num_colors == 2 {
        let high = sorted[3];
        let config: SquareConfiguration = colors
            .iter()
            .enumerate()
            .filter(|&(_, &color)| color == high)
            .fold(0, |config, (corner, _)| config | (1 << corner));
        for [a, b] in square_segments(config) {
            if let (Some(va), Some(vb)) = (edge_vertices[a], edge_vertices[b]) {
                contour.add_line([va, vb]);
            }
        }
    } else {
        let center = Point2::from(
            cell.positions
                .iter()
                .fold(Vector2::zeros(), |sum, p| sum + p.coords)
                / 4.,
        );
        let junction = contour.add_vertex(center);
        for vertex in edge_vertices.into_iter().flatten() {
            contour.add_line([junction, vertex]);
        }
    }
}

fn edge_point(cell: &Cell, a: usize, b: usize, grid: &Grid2) -> Point2 {
    let t = match (grid.placement(), cell.samples[a], cell.samples[b]) {
        (EdgePlacement::Interpolated, Sample::Scalar(va), Sample::Scalar(vb)) => {
            find_t(va, vb, grid.threshold())
        }
        _ => 0.5,
    };
    interpolate_points(&cell.positions[a], &cell.positions[b], t)
}
