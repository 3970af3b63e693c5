//! Tile grid representation and builder.
//!
//! # Data layout
//!
//! Tiles are stored as parallel arrays indexed by `TileId` (the tile's
//! position in the cell list).  Adjacency uses **Compressed Sparse Row (CSR)**
//! format.  Given a `TileId t`, its neighbors occupy the slice:
//!
//! ```text
//! adjacency[ adj_start[t] .. adj_start[t+1] ]
//! ```
//!
//! The neighbor relation is undirected: `connect(a, b)` stores both `a → b`
//! and `b → a`.  Adjacency is independent of walkability, so a blocked tile
//! still has neighbors; search code filters on `is_walkable`.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a world position to the nearest `TileId`.
//! Target trackers use it to derive their current tile from a free position.
//!
//! # Generations
//!
//! Walkability is frozen while agents tick.  The only mutation,
//! [`TileGrid::set_walkable`], bumps [`TileGrid::generation`]; paths planned
//! against an older generation are stale and must be discarded.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use tc_core::{AgentRng, TileId, Vec3};

use crate::{GridError, GridResult};

// ── GridCoord ─────────────────────────────────────────────────────────────────

/// Integer grid coordinate: the identity of a tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    pub col: i32,
    pub row: i32,
}

impl GridCoord {
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.col, self.row)
    }
}

// ── R-tree tile entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a world-space point with the
/// associated `TileId`.
#[derive(Clone, Debug)]
struct TileEntry {
    point: [f32; 3],
    id:    TileId,
}

impl RTreeObject for TileEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for TileEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── TileGrid ──────────────────────────────────────────────────────────────────

/// Undirected tile graph with walkability flags and a spatial index.
///
/// Do not construct directly; use [`TileGridBuilder`] or
/// [`TileGrid::lattice`].
#[derive(Debug)]
pub struct TileGrid {
    width:  u32,
    height: u32,

    // ── Tile data (indexed by TileId) ─────────────────────────────────────
    tile_pos:   Vec<Vec3>,
    tile_coord: Vec<GridCoord>,
    walkable:   Vec<bool>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Row pointer.  Length = `tile_count + 1`.
    adj_start: Vec<u32>,
    adjacency: Vec<TileId>,

    // ── Lookup ────────────────────────────────────────────────────────────
    coord_index: FxHashMap<GridCoord, TileId>,
    spatial_idx: RTree<TileEntry>,

    generation: u64,
}

impl TileGrid {
    /// Build a rectangular, 4-connected grid of `width × height` tiles.
    ///
    /// Tiles are laid out row-major (`TileId = row * width + col`) on the
    /// world XZ plane at `x = col * spacing`, `z = row * spacing`.
    /// `walkable(coord)` decides each tile's flag.
    pub fn lattice(
        width:    u32,
        height:   u32,
        spacing:  f32,
        walkable: impl Fn(GridCoord) -> bool,
    ) -> TileGrid {
        let mut b = TileGridBuilder::with_capacity((width * height) as usize);
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let coord = GridCoord::new(col, row);
                let pos   = Vec3::new(col as f32 * spacing, 0.0, row as f32 * spacing);
                b.add_tile(coord, pos, walkable(coord));
            }
        }
        for row in 0..height {
            for col in 0..width {
                let id = TileId(row * width + col);
                if col + 1 < width {
                    b.connect(id, TileId(id.0 + 1));
                }
                if row + 1 < height {
                    b.connect(id, TileId(id.0 + width));
                }
            }
        }
        b.build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Column span of the grid's coordinates.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Row span of the grid's coordinates.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_count(&self) -> usize {
        self.tile_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tile_pos.is_empty()
    }

    /// Number of tiles currently walkable.
    pub fn walkable_count(&self) -> usize {
        self.walkable.iter().filter(|&&w| w).count()
    }

    // ── Cell list ─────────────────────────────────────────────────────────

    /// The tile at position `index` of the cell list, if any.
    #[inline]
    pub fn cell_at(&self, index: usize) -> Option<TileId> {
        (index < self.tile_count()).then_some(TileId(index as u32))
    }

    /// Every tile in cell-list order.
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tile_count() as u32).map(TileId)
    }

    /// Every walkable tile in cell-list order.
    pub fn walkable_tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles().filter(|&t| self.walkable[t.index()])
    }

    #[inline]
    pub fn contains(&self, tile: TileId) -> bool {
        tile.index() < self.tile_count()
    }

    /// Tile with coordinate `coord`, if present.
    pub fn tile_at(&self, coord: GridCoord) -> Option<TileId> {
        self.coord_index.get(&coord).copied()
    }

    // ── Per-tile attributes ───────────────────────────────────────────────

    /// World-space position of `tile`.
    ///
    /// # Panics
    /// Panics if `tile` is out of range.
    #[inline]
    pub fn position(&self, tile: TileId) -> Vec3 {
        self.tile_pos[tile.index()]
    }

    #[inline]
    pub fn coord(&self, tile: TileId) -> GridCoord {
        self.tile_coord[tile.index()]
    }

    /// `false` for unknown tiles as well as blocked ones.
    #[inline]
    pub fn is_walkable(&self, tile: TileId) -> bool {
        self.walkable.get(tile.index()).copied().unwrap_or(false)
    }

    /// Iterator over the neighbors of `tile`.  Contiguous slice, no allocation.
    #[inline]
    pub fn neighbors(&self, tile: TileId) -> impl Iterator<Item = TileId> + '_ {
        let start = self.adj_start[tile.index()] as usize;
        let end   = self.adj_start[tile.index() + 1] as usize;
        self.adjacency[start..end].iter().copied()
    }

    #[inline]
    pub fn degree(&self, tile: TileId) -> usize {
        (self.adj_start[tile.index() + 1] - self.adj_start[tile.index()]) as usize
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The tile whose position is nearest to `pos`.
    ///
    /// Returns `None` only if the grid has no tiles.
    pub fn snap_to_tile(&self, pos: Vec3) -> Option<TileId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y, pos.z])
            .map(|e| e.id)
    }

    // ── Generations ───────────────────────────────────────────────────────

    /// Incremented by every walkability change.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Change the walkability of `tile`, invalidating every outstanding path.
    ///
    /// A no-op (generation unchanged) if the flag already has that value.
    pub fn set_walkable(&mut self, tile: TileId, walkable: bool) -> GridResult<()> {
        let slot = self
            .walkable
            .get_mut(tile.index())
            .ok_or(GridError::TileNotFound(tile))?;
        if *slot != walkable {
            *slot = walkable;
            self.generation += 1;
            tracing::debug!(%tile, walkable, generation = self.generation, "tile walkability changed");
        }
        Ok(())
    }

    // ── Sampling ──────────────────────────────────────────────────────────

    /// Pick a walkable tile uniformly at random.
    ///
    /// Fails fast with [`GridError::NoWalkableTile`] when no tile is walkable.
    /// Otherwise draws up to `max_attempts` random cells; if all of them are
    /// blocked, it picks uniformly among the walkable set instead, so the
    /// call always terminates.
    pub fn sample_walkable(&self, rng: &mut AgentRng, max_attempts: u32) -> GridResult<TileId> {
        if self.walkable_count() == 0 {
            return Err(GridError::NoWalkableTile { attempts: 0 });
        }
        for _ in 0..max_attempts {
            let Some(index) = rng.pick_index(self.tile_count()) else { break };
            let tile = TileId(index as u32);
            if self.walkable[index] {
                return Ok(tile);
            }
        }

        let candidates: Vec<TileId> = self.walkable_tiles().collect();
        tracing::debug!(
            max_attempts,
            walkable = candidates.len(),
            "random walkable-tile draws exhausted; scanning walkable set"
        );
        rng.choose(&candidates)
            .copied()
            .ok_or(GridError::NoWalkableTile { attempts: max_attempts })
    }
}

// ── TileGridBuilder ───────────────────────────────────────────────────────────

/// Construct a [`TileGrid`] incrementally, then call [`build`](Self::build).
///
/// Tiles receive sequential `TileId`s in insertion order; that order is the
/// grid's cell list.  Connections may be added in any order; duplicates and
/// self-loops are dropped by `build()`.
///
/// # Example
///
/// ```
/// use tc_core::Vec3;
/// use tc_grid::{GridCoord, TileGridBuilder};
///
/// let mut b = TileGridBuilder::new();
/// let a = b.add_tile(GridCoord::new(0, 0), Vec3::new(0.0, 0.0, 0.0), true);
/// let c = b.add_tile(GridCoord::new(1, 0), Vec3::new(1.0, 0.0, 0.0), true);
/// b.connect(a, c);
/// let grid = b.build();
/// assert_eq!(grid.tile_count(), 2);
/// assert_eq!(grid.neighbors(a).collect::<Vec<_>>(), vec![c]);
/// ```
pub struct TileGridBuilder {
    tiles: Vec<RawTile>,
    links: Vec<(TileId, TileId)>,
}

struct RawTile {
    coord:    GridCoord,
    pos:      Vec3,
    walkable: bool,
}

impl TileGridBuilder {
    pub fn new() -> Self {
        Self { tiles: Vec::new(), links: Vec::new() }
    }

    /// Pre-allocate for the expected number of tiles.
    pub fn with_capacity(tiles: usize) -> Self {
        Self {
            tiles: Vec::with_capacity(tiles),
            links: Vec::with_capacity(tiles * 4),
        }
    }

    /// Add a tile and return its `TileId` (sequential from 0).
    pub fn add_tile(&mut self, coord: GridCoord, pos: Vec3, walkable: bool) -> TileId {
        let id = TileId(self.tiles.len() as u32);
        self.tiles.push(RawTile { coord, pos, walkable });
        id
    }

    /// Make `a` and `b` neighbors of each other.
    pub fn connect(&mut self, a: TileId, b: TileId) {
        self.links.push((a, b));
        self.links.push((b, a));
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Consume the builder and produce a [`TileGrid`].
    ///
    /// # Panics
    /// Panics if a connection references a tile that was never added.
    pub fn build(self) -> TileGrid {
        let tile_count = self.tiles.len();

        let mut links = self.links;
        links.retain(|(a, b)| a != b);
        links.sort_unstable();
        links.dedup();

        let mut adj_start = vec![0u32; tile_count + 1];
        for (from, _) in &links {
            adj_start[from.index() + 1] += 1;
        }
        for i in 1..=tile_count {
            adj_start[i] += adj_start[i - 1];
        }
        let adjacency: Vec<TileId> = links.iter().map(|&(_, to)| to).collect();

        let (min_col, max_col, min_row, max_row) = self.tiles.iter().fold(
            (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
            |(c0, c1, r0, r1), t| {
                (c0.min(t.coord.col), c1.max(t.coord.col), r0.min(t.coord.row), r1.max(t.coord.row))
            },
        );
        let (width, height) = if tile_count == 0 {
            (0, 0)
        } else {
            ((max_col - min_col + 1) as u32, (max_row - min_row + 1) as u32)
        };

        let mut coord_index = FxHashMap::default();
        coord_index.reserve(tile_count);
        let mut entries = Vec::with_capacity(tile_count);
        let mut tile_pos    = Vec::with_capacity(tile_count);
        let mut tile_coord  = Vec::with_capacity(tile_count);
        let mut walkable    = Vec::with_capacity(tile_count);
        for (i, t) in self.tiles.into_iter().enumerate() {
            let id = TileId(i as u32);
            coord_index.insert(t.coord, id);
            entries.push(TileEntry { point: [t.pos.x, t.pos.y, t.pos.z], id });
            tile_pos.push(t.pos);
            tile_coord.push(t.coord);
            walkable.push(t.walkable);
        }

        TileGrid {
            width,
            height,
            tile_pos,
            tile_coord,
            walkable,
            adj_start,
            adjacency,
            coord_index,
            spatial_idx: RTree::bulk_load(entries),
            generation: 0,
        }
    }
}

impl Default for TileGridBuilder {
    fn default() -> Self {
        Self::new()
    }
}
