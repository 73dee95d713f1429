//! Tile arena and the neighbor/link relations derived from it.

use tile_chase_core::{CellCoord, ColorSet, Direction, TileId};

use crate::tile::Tile;

/// Rectangular arena of tiles with precomputed adjacency.
///
/// Both relations are derived once when the graph is built. Occupancy is the
/// only state that changes afterwards.
#[derive(Clone, Debug)]
pub struct TileGraph {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl TileGraph {
    /// Builds the graph from row-major tile colours and derives every neighbor
    /// and link.
    ///
    /// Returns `None` when `colors` does not hold exactly `columns * rows`
    /// entries.
    #[must_use]
    pub fn build(columns: u32, rows: u32, colors: Vec<ColorSet>) -> Option<Self> {
        let expected = usize::try_from(u64::from(columns) * u64::from(rows)).ok()?;
        if colors.len() != expected {
            return None;
        }

        let tiles = colors
            .into_iter()
            .enumerate()
            .map(|(index, colors)| {
                let index = u32::try_from(index).unwrap_or(u32::MAX);
                Tile::new(
                    TileId::new(index),
                    CellCoord::new(index % columns, index / columns),
                    colors,
                )
            })
            .collect();

        let mut graph = Self {
            columns,
            rows,
            tiles,
        };
        graph.derive_relations();
        Some(graph)
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Identifier of the tile at `coord`, if it lies inside the grid.
    #[must_use]
    pub fn id(&self, coord: CellCoord) -> Option<TileId> {
        if coord.column() >= self.columns || coord.row() >= self.rows {
            return None;
        }
        let index = u64::from(coord.row()) * u64::from(self.columns) + u64::from(coord.column());
        u32::try_from(index).ok().map(TileId::new)
    }

    /// Tile stored under `id`.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Tile located at `coord`.
    #[must_use]
    pub fn tile_at(&self, coord: CellCoord) -> Option<&Tile> {
        self.id(coord).and_then(|id| self.tile(id))
    }

    /// Iterates every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.index())
    }

    fn derive_relations(&mut self) {
        for index in 0..self.tiles.len() {
            let coord = self.tiles[index].coord();
            let colors = *self.tiles[index].colors();
            for direction in Direction::ALL {
                let neighbor = coord
                    .step(direction, self.columns, self.rows)
                    .and_then(|cell| self.id(cell));
                let link = self.find_link(coord, &colors, direction);
                self.tiles[index].connect(direction, neighbor, link);
            }
        }
    }

    /// Walks from `origin` in `direction` until a tile shares a colour with
    /// `colors`, skipping every tile that does not.
    fn find_link(
        &self,
        origin: CellCoord,
        colors: &ColorSet,
        direction: Direction,
    ) -> Option<TileId> {
        let mut cursor = origin;
        loop {
            cursor = cursor.step(direction, self.columns, self.rows)?;
            let candidate = self.tile_at(cursor)?;
            if candidate.colors().shares_any(colors) {
                return Some(candidate.id());
            }
        }
    }
}
