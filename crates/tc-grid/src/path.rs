//! Path type, path-service trait, and the default A* / random-walk service.
//!
//! # Pluggability
//!
//! The behavior layer requests paths via the [`PathService`] trait, so
//! applications can swap in their own search (jump-point, flow fields,
//! scripted paths in tests) without touching the FSM.
//!
//! # Cost units
//!
//! A* costs are Euclidean distances between tile positions, stored as
//! integer **milli-units** (u32) so the priority queue orders exactly.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use tc_core::{AgentRng, TileId};

use crate::grid::TileGrid;

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered queue of tiles, drained front to back one hop at a time.
///
/// A path never gains tiles after it is produced.  The empty path means
/// "no route" or "fully consumed"; both are valid terminal values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    tiles:      VecDeque<TileId>,
    generation: u64,
}

impl Path {
    /// The empty path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A path over `tiles`, planned against grid generation `generation`.
    pub fn new(tiles: impl IntoIterator<Item = TileId>, generation: u64) -> Self {
        Self { tiles: tiles.into_iter().collect(), generation }
    }

    /// Dequeue the next tile.
    #[inline]
    pub fn dequeue(&mut self) -> Option<TileId> {
        self.tiles.pop_front()
    }

    #[inline]
    pub fn peek(&self) -> Option<TileId> {
        self.tiles.front().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Drop every remaining tile.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// The grid generation this path was planned against.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Remaining tiles, front first.
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().copied()
    }
}

// ── PathService trait ─────────────────────────────────────────────────────────

/// Pluggable path search.
///
/// Neither method fails: an unreachable goal is the empty [`Path`].
/// Returned paths exclude `start` and are stamped with
/// [`TileGrid::generation`].
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// worker threads when agents are evaluated in parallel.
pub trait PathService: Send + Sync {
    /// Directed search from `start` to `goal`.
    fn find_path(&self, grid: &TileGrid, start: TileId, goal: TileId) -> Path;

    /// A random walk of at most `max_hops` tiles over walkable adjacency.
    fn random_path(
        &self,
        grid:     &TileGrid,
        start:    TileId,
        max_hops: usize,
        rng:      &mut AgentRng,
    ) -> Path;
}

// ── AStarPathService ──────────────────────────────────────────────────────────

/// A* over the walkable tiles of a [`TileGrid`] with a straight-line
/// heuristic, plus a non-backtracking random walk.
///
/// Equal-cost frontier entries are popped in ascending `TileId` order, so
/// results are deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPathService;

impl PathService for AStarPathService {
    fn find_path(&self, grid: &TileGrid, start: TileId, goal: TileId) -> Path {
        astar(grid, start, goal)
    }

    fn random_path(
        &self,
        grid:     &TileGrid,
        start:    TileId,
        max_hops: usize,
        rng:      &mut AgentRng,
    ) -> Path {
        random_walk(grid, start, max_hops, rng)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

#[inline]
fn cost_milli(grid: &TileGrid, a: TileId, b: TileId) -> u32 {
    (grid.position(a).distance(grid.position(b)) * 1000.0).round() as u32
}

fn astar(grid: &TileGrid, start: TileId, goal: TileId) -> Path {
    let generation = grid.generation();
    if start == goal
        || !grid.contains(start)
        || !grid.contains(goal)
        || !grid.is_walkable(goal)
    {
        return Path { tiles: VecDeque::new(), generation };
    }

    let n = grid.tile_count();
    // g[v] = best known cost (milli-units) from start to v.
    let mut g    = vec![u32::MAX; n];
    let mut prev = vec![TileId::INVALID; n];
    g[start.index()] = 0;

    // Min-heap on (f, tile).  Reverse turns BinaryHeap (max) into a min-heap;
    // the TileId component breaks ties deterministically.
    let mut heap: BinaryHeap<Reverse<(u32, TileId)>> = BinaryHeap::new();
    heap.push(Reverse((cost_milli(grid, start, goal), start)));

    while let Some(Reverse((f, tile))) = heap.pop() {
        if tile == goal {
            return reconstruct(&prev, start, goal, generation);
        }

        let cost = g[tile.index()];
        // Skip stale heap entries.
        if f > cost.saturating_add(cost_milli(grid, tile, goal)) {
            continue;
        }

        for next in grid.neighbors(tile) {
            if !grid.is_walkable(next) {
                continue;
            }
            let new_cost = cost.saturating_add(cost_milli(grid, tile, next));
            if new_cost < g[next.index()] {
                g[next.index()]    = new_cost;
                prev[next.index()] = tile;
                let h = cost_milli(grid, next, goal);
                heap.push(Reverse((new_cost.saturating_add(h), next)));
            }
        }
    }

    Path { tiles: VecDeque::new(), generation }
}

fn reconstruct(prev: &[TileId], start: TileId, goal: TileId, generation: u64) -> Path {
    let mut tiles = VecDeque::new();
    let mut cur = goal;
    while cur != start {
        tiles.push_front(cur);
        cur = prev[cur.index()];
        if cur == TileId::INVALID {
            return Path { tiles: VecDeque::new(), generation };
        }
    }
    Path { tiles, generation }
}

// ── Random walk ───────────────────────────────────────────────────────────────

fn random_walk(grid: &TileGrid, start: TileId, max_hops: usize, rng: &mut AgentRng) -> Path {
    let generation = grid.generation();
    if !grid.contains(start) {
        return Path { tiles: VecDeque::new(), generation };
    }

    let mut tiles = VecDeque::with_capacity(max_hops);
    let mut options: Vec<TileId> = Vec::with_capacity(4);
    let mut previous = TileId::INVALID;
    let mut cur = start;

    while tiles.len() < max_hops {
        options.clear();
        options.extend(grid.neighbors(cur).filter(|&t| grid.is_walkable(t)));

        // Only step back when it is the sole way out.
        if options.len() > 1 {
            options.retain(|&t| t != previous);
        }
        let Some(&next) = rng.choose(&options) else { break };

        tiles.push_back(next);
        previous = cur;
        cur = next;
    }

    Path { tiles, generation }
}
