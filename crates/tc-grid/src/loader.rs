//! CSV grid-layout loader.
//!
//! # CSV format
//!
//! No header row.  One record per grid row, one field per cell, top row
//! first.  Every row must have the same number of fields.
//!
//! ```csv
//! 1,1,1,0
//! 1,0,1,1
//! 1,1,1,1
//! ```
//!
//! | Field      | Meaning  |
//! |------------|----------|
//! | `1` or `.` | walkable |
//! | `0` or `#` | blocked  |
//!
//! Record `r`, field `c` becomes the tile at `GridCoord { col: c, row: r }`
//! of a 4-connected [`TileGrid::lattice`].

use std::io::Read;
use std::path::Path;

use crate::grid::{GridCoord, TileGrid};
use crate::{GridError, GridResult};

/// Load a grid layout from a CSV file.
pub fn load_grid_csv(path: &Path, spacing: f32) -> GridResult<TileGrid> {
    let file = std::fs::File::open(path).map_err(GridError::Io)?;
    load_grid_reader(file, spacing)
}

/// Like [`load_grid_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `&[u8]` or `std::io::Cursor`) or for layouts
/// embedded in a binary.
pub fn load_grid_reader<R: Read>(reader: R, spacing: f32) -> GridResult<TileGrid> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<bool>> = Vec::new();
    for (r, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .enumerate()
            .map(|(c, field)| parse_cell(field, r, c))
            .collect::<GridResult<Vec<bool>>>()?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(GridError::Layout(format!(
                    "row {r} has {} cells, expected {}",
                    row.len(),
                    first.len()
                )));
            }
        }
        rows.push(row);
    }

    let height = rows.len();
    let width  = rows.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(GridError::Layout("layout has no cells".into()));
    }

    let grid = TileGrid::lattice(width as u32, height as u32, spacing, |coord: GridCoord| {
        rows[coord.row as usize][coord.col as usize]
    });
    tracing::debug!(
        width,
        height,
        walkable = grid.walkable_count(),
        "grid layout loaded"
    );
    Ok(grid)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_cell(field: &str, row: usize, col: usize) -> GridResult<bool> {
    match field {
        "1" | "." => Ok(true),
        "0" | "#" => Ok(false),
        other => Err(GridError::Layout(format!(
            "unknown cell symbol {other:?} at row {row}, column {col}"
        ))),
    }
}
