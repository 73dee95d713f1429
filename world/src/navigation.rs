//! Breadth-first route planning over the tile link relation.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use tile_chase_core::{Direction, TileId};

use crate::{graph::TileGraph, path::Path};

/// Shortest-path search that walks link edges only.
///
/// Every call starts from scratch; nothing is cached between searches because
/// occupancy changes from one turn to the next.
#[derive(Clone, Copy, Debug)]
pub struct PathFinder<'graph> {
    graph: &'graph TileGraph,
}

impl<'graph> PathFinder<'graph> {
    /// Creates a path finder over `graph`.
    #[must_use]
    pub const fn new(graph: &'graph TileGraph) -> Self {
        Self { graph }
    }

    /// Finds the shortest link path from `start` to `goal`, both inclusive.
    ///
    /// A path may only be extended onto a link tile for which `is_blocked`
    /// returns `false` and that the path does not already contain. Frontier entries are
    /// expanded by length, ties in discovery order, with directions scanned in
    /// [`Direction::ALL`] order. A branch reaching a tile no sooner than an
    /// earlier branch is dropped, which leaves the returned path unchanged.
    /// Returns `None` when the goal is unreachable.
    pub fn search<F>(&self, start: TileId, goal: TileId, mut is_blocked: F) -> Option<Path>
    where
        F: FnMut(TileId) -> bool,
    {
        if self.graph.tile(start).is_none() || self.graph.tile(goal).is_none() {
            return None;
        }

        if start == goal {
            return Some(Path::new(start));
        }

        let mut shortest = vec![usize::MAX; self.graph.tile_count()];
        shortest[start.index()] = 1;

        let mut discovered = 0_u64;
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse(Frontier {
            path: Path::new(start),
            order: discovered,
        }));

        while let Some(Reverse(Frontier { path, .. })) = frontier.pop() {
            let Some(tail) = path.back() else {
                continue;
            };

            if tail == goal {
                return Some(path);
            }

            let Some(tile) = self.graph.tile(tail) else {
                continue;
            };

            for direction in Direction::ALL {
                let Some(next) = tile.link(direction) else {
                    continue;
                };

                if path.contains(next) || is_blocked(next) {
                    continue;
                }

                let length = path.len() + 1;
                let Some(best) = shortest.get_mut(next.index()) else {
                    continue;
                };
                if *best <= length {
                    continue;
                }
                *best = length;

                let mut branch = path.clone();
                let _ = branch.push_back(next);
                discovered += 1;
                frontier.push(Reverse(Frontier {
                    path: branch,
                    order: discovered,
                }));
            }
        }

        None
    }
}

#[derive(Debug)]
struct Frontier {
    path: Path,
    order: u64,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .len()
            .cmp(&other.path.len())
            .then(self.order.cmp(&other.order))
    }
}
