//! `tc-grid` — tile grid, spatial indexing, and path search.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`grid`]   | `TileGrid` (CSR + R-tree), `TileGridBuilder`, `GridCoord`    |
//! | [`path`]   | `Path`, `PathService` trait, `AStarPathService`              |
//! | [`loader`] | `load_grid_csv`, `load_grid_reader`                          |
//! | [`error`]  | `GridError`, `GridResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod loader;
pub mod path;


pub use error::{GridError, GridResult};
pub use grid::{GridCoord, TileGrid, TileGridBuilder};
pub use loader::{load_grid_csv, load_grid_reader};
pub use path::{AStarPathService, Path, PathService};
