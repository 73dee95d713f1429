//! Tile storage and per-tile relations.

use std::hash::{Hash, Hasher};

use tile_chase_core::{ActorId, CellCoord, ColorSet, Direction, ItemId, TileId};

/// Single square of the level grid.
///
/// Equality and hashing consider the coordinate only; colours, occupants and
/// relations never take part in identity.
#[derive(Clone, Debug)]
pub struct Tile {
    id: TileId,
    coord: CellCoord,
    colors: ColorSet,
    character: Option<ActorId>,
    item: Option<ItemId>,
    neighbors: [Option<TileId>; 4],
    links: [Option<TileId>; 4],
}

impl Tile {
    pub(crate) fn new(id: TileId, coord: CellCoord, colors: ColorSet) -> Self {
        Self {
            id,
            coord,
            colors,
            character: None,
            item: None,
            neighbors: [None; 4],
            links: [None; 4],
        }
    }

    /// Arena index of the tile.
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Grid coordinate of the tile.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Colours painted on the tile.
    #[must_use]
    pub const fn colors(&self) -> &ColorSet {
        &self.colors
    }

    /// Character standing on the tile, if any.
    #[must_use]
    pub const fn character(&self) -> Option<ActorId> {
        self.character
    }

    /// Item lying on the tile, if any.
    #[must_use]
    pub const fn item(&self) -> Option<ItemId> {
        self.item
    }

    /// Tile one grid step away in `direction`; absent at the boundary.
    #[must_use]
    pub const fn neighbor(&self, direction: Direction) -> Option<TileId> {
        self.neighbors[direction.index()]
    }

    /// Nearest tile in `direction` sharing a colour with this one.
    #[must_use]
    pub const fn link(&self, direction: Direction) -> Option<TileId> {
        self.links[direction.index()]
    }

    /// Reports whether the two tiles have at least one colour in common.
    #[must_use]
    pub fn shares_color_with(&self, other: &Tile) -> bool {
        self.colors.shares_any(&other.colors)
    }

    pub(crate) fn connect(
        &mut self,
        direction: Direction,
        neighbor: Option<TileId>,
        link: Option<TileId>,
    ) {
        self.neighbors[direction.index()] = neighbor;
        self.links[direction.index()] = link;
    }

    pub(crate) fn set_character(&mut self, character: Option<ActorId>) {
        self.character = character;
    }

    pub(crate) fn set_item(&mut self, item: Option<ItemId>) {
        self.item = item;
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}
