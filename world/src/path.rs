//! Ordered tile sequences with constant-time membership checks.

use std::{
    cmp::Ordering,
    collections::{HashSet, VecDeque},
};

use tile_chase_core::TileId;

/// Ordered sequence of tiles backed by a membership set.
///
/// The set always holds exactly the tiles of the sequence. A path never
/// contains the same tile twice, so cloning a path and extending the clone
/// yields an independent branch. Paths order by length first.
#[derive(Clone, Debug, Default)]
pub struct Path {
    tiles: VecDeque<TileId>,
    members: HashSet<TileId>,
}

impl Path {
    /// Creates a single-element path starting at `start`.
    #[must_use]
    pub fn new(start: TileId) -> Self {
        let mut path = Self::default();
        let _ = path.push_back(start);
        path
    }

    /// Appends `tile` at the tail.
    ///
    /// Returns `false` and leaves the path untouched when the tile is already
    /// part of it.
    pub fn push_back(&mut self, tile: TileId) -> bool {
        if !self.members.insert(tile) {
            return false;
        }
        self.tiles.push_back(tile);
        true
    }

    /// Removes and returns the head of the path.
    pub fn pop_front(&mut self) -> Option<TileId> {
        let tile = self.tiles.pop_front()?;
        let _ = self.members.remove(&tile);
        Some(tile)
    }

    /// First tile of the path.
    #[must_use]
    pub fn front(&self) -> Option<TileId> {
        self.tiles.front().copied()
    }

    /// Last tile of the path.
    #[must_use]
    pub fn back(&self) -> Option<TileId> {
        self.tiles.back().copied()
    }

    /// Reports whether `tile` is part of the path.
    #[must_use]
    pub fn contains(&self, tile: TileId) -> bool {
        self.members.contains(&tile)
    }

    /// Number of tiles in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether the path holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterates the tiles from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().copied()
    }

    /// Copies the tiles into a vector, head first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<TileId> {
        self.tiles.iter().copied().collect()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for Path {}

impl PartialOrd for Path {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Path {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.tiles.cmp(&other.tiles))
    }
}
