#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tile Chase engine.
//!
//! This crate defines the vocabulary that connects adapters, the authoritative
//! level, and pure systems. Systems inspect read-only level views and respond
//! with [`Command`] values, the level executes those commands via its `apply`
//! entry point, and then broadcasts [`Event`] values that adapters present and
//! replay logs record.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Time a collected clock adds to (or, for thieves, removes from) the level timer.
pub const CLOCK_TIME_BONUS: Duration = Duration::from_secs(10);

/// Cardinal directions available to characters.
///
/// The declaration order doubles as the scan order used whenever several
/// directions tie, so searches and strategies stay reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in deterministic scan order.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Position of the direction within [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction reached by a quarter turn clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// All four directions in clockwise order starting at `self`.
    #[must_use]
    pub const fn rotation(self) -> [Direction; 4] {
        let second = self.clockwise();
        let third = second.clockwise();
        [self, second, third, third.clockwise()]
    }

    /// Single character used for the direction in level files.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Parses the level-file character for a direction.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }

    /// Maps a key name reported by an input adapter onto a direction.
    ///
    /// Both WASD and arrow key names are accepted, case-insensitively. Any
    /// other key maps to `None`, which callers treat as "no movement".
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "w" | "up" | "arrowup" => Some(Self::North),
            "d" | "right" | "arrowright" => Some(Self::East),
            "s" | "down" | "arrowdown" => Some(Self::South),
            "a" | "left" | "arrowleft" => Some(Self::West),
            _ => None,
        }
    }
}

/// Colour label painted on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileColor {
    /// Red paint, written as `R`.
    Red,
    /// Yellow paint, written as `Y`.
    Yellow,
    /// Green paint, written as `G`.
    Green,
    /// Blue paint, written as `B`.
    Blue,
}

impl TileColor {
    /// Character used for the colour in level files.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Yellow => 'Y',
            Self::Green => 'G',
            Self::Blue => 'B',
        }
    }

    /// Parses the level-file character for a colour.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'R' => Some(Self::Red),
            'Y' => Some(Self::Yellow),
            'G' => Some(Self::Green),
            'B' => Some(Self::Blue),
            _ => None,
        }
    }
}

/// Maximum number of colours a single tile carries.
pub const MAX_TILE_COLORS: usize = 4;

/// Ordered set of one to four distinct colours painted on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorSet {
    colors: [TileColor; MAX_TILE_COLORS],
    len: u8,
}

impl ColorSet {
    /// Builds a colour set preserving the provided order.
    ///
    /// Returns `None` when the slice is empty, longer than
    /// [`MAX_TILE_COLORS`], or repeats a colour.
    #[must_use]
    pub fn from_colors(colors: &[TileColor]) -> Option<Self> {
        if colors.is_empty() || colors.len() > MAX_TILE_COLORS {
            return None;
        }

        let mut slots = [TileColor::Red; MAX_TILE_COLORS];
        for (index, color) in colors.iter().enumerate() {
            if colors[..index].contains(color) {
                return None;
            }
            slots[index] = *color;
        }

        Some(Self {
            colors: slots,
            len: colors.len() as u8,
        })
    }

    /// Colour listed first, which seeds floor-following thieves.
    #[must_use]
    pub const fn first(&self) -> TileColor {
        self.colors[0]
    }

    /// Number of colours in the set.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.len as usize
    }

    /// Iterates the colours in their written order.
    pub fn iter(&self) -> impl Iterator<Item = TileColor> + '_ {
        self.colors[..self.count()].iter().copied()
    }

    /// Reports whether the set contains `color`.
    #[must_use]
    pub fn contains(&self, color: TileColor) -> bool {
        self.iter().any(|candidate| candidate == color)
    }

    /// Reports whether the two sets have at least one colour in common.
    #[must_use]
    pub fn shares_any(&self, other: &ColorSet) -> bool {
        self.iter().any(|color| other.contains(color))
    }
}

/// Location of a single grid tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index, the `x` coordinate.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index, the `y` coordinate.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Coordinate one step away in `direction`, if it lies inside the grid.
    #[must_use]
    pub fn step(self, direction: Direction, columns: u32, rows: u32) -> Option<Self> {
        let (column, row) = match direction {
            Direction::North => (Some(self.column), self.row.checked_sub(1)),
            Direction::East => (self.column.checked_add(1), Some(self.row)),
            Direction::South => (Some(self.column), self.row.checked_add(1)),
            Direction::West => (self.column.checked_sub(1), Some(self.row)),
        };
        let (column, row) = (column?, row?);
        (column < columns && row < rows).then_some(Self::new(column, row))
    }
}

/// Dense index of a tile within the level's tile arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a tile identifier from its row-major index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index into row-major tile storage.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Unique identifier assigned to a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Closed set of character kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    /// Character steered by player input.
    Player,
    /// Bouncing hazard that eliminates whatever it flies into.
    FlyingAssassin,
    /// Thief that sticks to tiles painted with its target colour.
    FloorFollowingThief,
    /// Thief that routes to the nearest item every turn.
    SmartThief,
}

impl CharacterKind {
    /// Reports whether the character resolves on the player cadence.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }

    /// Reports whether occupying an item's tile triggers its interaction.
    #[must_use]
    pub const fn collects_items(self) -> bool {
        !matches!(self, Self::FlyingAssassin)
    }
}

/// Actor-local memory carried between turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharacterState {
    /// Player awaiting its next turn.
    Player {
        /// Last direction received since the previous turn.
        pending: Option<Direction>,
    },
    /// Flying assassin patrolling a row.
    FlyingAssassin {
        /// Direction of travel, reversed at the grid boundary.
        heading: Direction,
    },
    /// Floor-following thief tracking its colour.
    FloorFollowingThief {
        /// Colour the thief is restricted to.
        target: TileColor,
        /// Direction the priority scan starts from.
        facing: Direction,
        /// The two tiles most recently vacated, newest first.
        recent: [Option<TileId>; 2],
    },
    /// Smart thief; all of its decisions are recomputed each turn.
    SmartThief,
}

impl CharacterState {
    /// Kind of character that owns this state.
    #[must_use]
    pub const fn kind(&self) -> CharacterKind {
        match self {
            Self::Player { .. } => CharacterKind::Player,
            Self::FlyingAssassin { .. } => CharacterKind::FlyingAssassin,
            Self::FloorFollowingThief { .. } => CharacterKind::FloorFollowingThief,
            Self::SmartThief => CharacterKind::SmartThief,
        }
    }

    /// Spawn descriptor that recreates this character when written to a level file.
    #[must_use]
    pub const fn spawn(&self) -> CharacterSpawn {
        match *self {
            Self::Player { .. } => CharacterSpawn::Player,
            Self::FlyingAssassin { heading } => CharacterSpawn::FlyingAssassin { heading },
            Self::FloorFollowingThief { facing, .. } => {
                CharacterSpawn::FloorFollowingThief { facing }
            }
            Self::SmartThief => CharacterSpawn::SmartThief,
        }
    }
}

/// Character description read from a level file, before it is placed on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharacterSpawn {
    /// Player character, written `P0`.
    Player,
    /// Flying assassin, written `AE` or `AW`.
    FlyingAssassin {
        /// Initial heading; only east and west are accepted.
        heading: Direction,
    },
    /// Floor-following thief, written `F` followed by its facing.
    FloorFollowingThief {
        /// Initial facing.
        facing: Direction,
    },
    /// Smart thief, written `S0`.
    SmartThief,
}

impl CharacterSpawn {
    /// Builds the initial actor-local state for a character spawned on a tile
    /// painted with `spawn_colors`.
    #[must_use]
    pub const fn into_state(self, spawn_colors: &ColorSet) -> CharacterState {
        match self {
            Self::Player => CharacterState::Player { pending: None },
            Self::FlyingAssassin { heading } => CharacterState::FlyingAssassin { heading },
            Self::FloorFollowingThief { facing } => CharacterState::FloorFollowingThief {
                target: spawn_colors.first(),
                facing,
                recent: [None, None],
            },
            Self::SmartThief => CharacterState::SmartThief,
        }
    }

    const fn chars(self) -> [char; 2] {
        match self {
            Self::Player => ['P', '0'],
            Self::FlyingAssassin { heading } => ['A', heading.code()],
            Self::FloorFollowingThief { facing } => ['F', facing.code()],
            Self::SmartThief => ['S', '0'],
        }
    }
}

/// Grades of loot, each worth a fixed number of points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LootKind {
    /// Cent coin, written `L1`.
    Cent,
    /// Dollar note, written `L2`.
    Dollar,
    /// Ruby, written `L3`.
    Ruby,
    /// Diamond, written `L4`.
    Diamond,
}

impl LootKind {
    /// Points awarded when the player collects the loot.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Cent => 10,
            Self::Dollar => 20,
            Self::Ruby => 50,
            Self::Diamond => 100,
        }
    }

    const fn code(self) -> char {
        match self {
            Self::Cent => '1',
            Self::Dollar => '2',
            Self::Ruby => '3',
            Self::Diamond => '4',
        }
    }

    const fn from_code(code: char) -> Option<Self> {
        match code {
            '1' => Some(Self::Cent),
            '2' => Some(Self::Dollar),
            '3' => Some(Self::Ruby),
            '4' => Some(Self::Diamond),
            _ => None,
        }
    }
}

/// Closed set of item kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Valuables worth points.
    Loot(LootKind),
    /// Adds time for the player, removes time for thieves.
    Clock,
    /// Opens every gate of the same colour when collected.
    Lever(TileColor),
    /// Impassable until the lever of the same colour is collected.
    Gate(TileColor),
    /// Exit tile; usable once no loot or lever remains.
    Door,
    /// Explodes along its row and column once armed.
    Bomb,
    /// Message shown to the player; the index selects the text.
    Note(u8),
}

impl ItemKind {
    /// Reports whether the item stops characters from entering its tile.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Gate(_) | Self::Bomb)
    }

    /// Reports whether the item keeps the door closed while on the board.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Loot(_) | Self::Lever(_))
    }

    /// Reports whether smart thieves consider routing to the item.
    #[must_use]
    pub const fn is_route_target(self) -> bool {
        !matches!(self, Self::Gate(_) | Self::Note(_))
    }

    /// Reports whether a bomb blast leaves the item in place.
    #[must_use]
    pub const fn survives_blast(self) -> bool {
        matches!(self, Self::Door | Self::Gate(_))
    }

    const fn chars(self) -> [char; 2] {
        match self {
            Self::Loot(loot) => ['L', loot.code()],
            Self::Clock => ['C', '0'],
            Self::Lever(color) => ['V', color.code()],
            Self::Gate(color) => ['G', color.code()],
            Self::Door => ['D', '0'],
            Self::Bomb => ['B', '0'],
            Self::Note(index) => ['N', (b'0' + index) as char],
        }
    }
}

/// Entity code carried by a level-file tile token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityCode {
    /// The tile spawns a character.
    Character(CharacterSpawn),
    /// The tile holds an item.
    Item(ItemKind),
}

impl EntityCode {
    /// Parses a two-character entity code made of a type and a variant character.
    #[must_use]
    pub fn parse(kind: char, variant: char) -> Option<Self> {
        let code = match (kind, variant) {
            ('P', '0') => Self::Character(CharacterSpawn::Player),
            ('A', heading @ ('E' | 'W')) => Self::Character(CharacterSpawn::FlyingAssassin {
                heading: Direction::from_code(heading)?,
            }),
            ('F', facing) => Self::Character(CharacterSpawn::FloorFollowingThief {
                facing: Direction::from_code(facing)?,
            }),
            ('S', '0') => Self::Character(CharacterSpawn::SmartThief),
            ('L', grade) => Self::Item(ItemKind::Loot(LootKind::from_code(grade)?)),
            ('C', '0') => Self::Item(ItemKind::Clock),
            ('V', color) => Self::Item(ItemKind::Lever(TileColor::from_code(color)?)),
            ('G', color) => Self::Item(ItemKind::Gate(TileColor::from_code(color)?)),
            ('D', '0') => Self::Item(ItemKind::Door),
            ('B', '0') => Self::Item(ItemKind::Bomb),
            ('N', index @ '0'..='9') => Self::Item(ItemKind::Note(index as u8 - b'0')),
            _ => return None,
        };
        Some(code)
    }

    /// Two characters that encode the entity in a level file.
    #[must_use]
    pub const fn chars(&self) -> [char; 2] {
        match *self {
            Self::Character(spawn) => spawn.chars(),
            Self::Item(kind) => kind.chars(),
        }
    }
}

/// Reasons a level can be lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossReason {
    /// The level timer reached zero.
    OutOfTime,
    /// A flying assassin eliminated the player.
    PlayerEliminated,
    /// A thief reached the open door.
    ThiefEscaped,
}

/// Terminal state of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelOutcome {
    /// The player reached the open door.
    Won,
    /// The level ended without the player escaping.
    Lost(LossReason),
}

/// Commands that express all permissible level mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Removes one world tick's worth of time from the level timer.
    AdvanceClock {
        /// Amount of level time consumed.
        elapsed: Duration,
    },
    /// Records the latest directional input for every player character.
    QueueInput {
        /// Direction pressed, or `None` when the key maps to no direction.
        direction: Option<Direction>,
    },
    /// Applies a movement decision produced by a strategy.
    ResolveTurn {
        /// Character taking the turn.
        actor: ActorId,
        /// Tile the character proposes to enter, or `None` to stay.
        destination: Option<TileId>,
        /// Actor-local state after planning.
        state: CharacterState,
        /// Timestamp of the callback resolving the turn.
        at: Duration,
    },
    /// Detonates every armed bomb whose fuse has burnt down.
    DetonateDueBombs {
        /// Timestamp of the current callback.
        now: Duration,
        /// Delay between arming and detonation.
        fuse: Duration,
    },
}

/// Events broadcast by the level after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The level timer advanced.
    TimeAdvanced {
        /// Level time left after the tick.
        remaining: Duration,
    },
    /// A character moved between two tiles.
    CharacterMoved {
        /// Character that moved.
        actor: ActorId,
        /// Tile vacated by the move.
        from: TileId,
        /// Tile entered by the move.
        to: TileId,
    },
    /// A proposed move was refused by the level.
    MoveRejected {
        /// Character whose move was refused.
        actor: ActorId,
        /// Tile the character attempted to enter.
        destination: TileId,
    },
    /// A character was removed from play.
    CharacterEliminated {
        /// Character that was removed.
        actor: ActorId,
        /// Character responsible for the elimination.
        by: ActorId,
    },
    /// A collector picked up an item.
    ItemCollected {
        /// Item that was removed.
        item: ItemId,
        /// Kind of the removed item.
        kind: ItemKind,
        /// Character that collected it.
        by: ActorId,
    },
    /// The score changed.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// Gates opened after their lever was collected.
    GatesOpened {
        /// Colour of the lever and gates.
        color: TileColor,
        /// Gates removed from the board.
        gates: Vec<ItemId>,
    },
    /// A bomb started its countdown.
    BombArmed {
        /// Bomb that was armed.
        bomb: ItemId,
        /// Timestamp the fuse was lit.
        at: Duration,
    },
    /// A bomb exploded.
    BombDetonated {
        /// Bomb that exploded.
        bomb: ItemId,
        /// Items destroyed by the blast, excluding the bomb itself.
        destroyed: Vec<ItemId>,
    },
    /// The player stepped onto a note.
    NoteRead {
        /// Index of the message to display.
        note: u8,
        /// Character reading it.
        by: ActorId,
    },
    /// The level reached a terminal state.
    LevelEnded {
        /// How the level ended.
        outcome: LevelOutcome,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_set_rejects_duplicates_and_empty_input() {
        assert!(ColorSet::from_colors(&[]).is_none());
        assert!(ColorSet::from_colors(&[TileColor::Red, TileColor::Red]).is_none());
        assert!(ColorSet::from_colors(&[
            TileColor::Red,
            TileColor::Yellow,
            TileColor::Green,
            TileColor::Blue,
            TileColor::Red,
        ])
        .is_none());
    }

    #[test]
    fn color_set_preserves_written_order() {
        let set = ColorSet::from_colors(&[TileColor::Blue, TileColor::Red]).expect("valid set");
        assert_eq!(set.first(), TileColor::Blue);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![TileColor::Blue, TileColor::Red]
        );
        assert_eq!(set.count(), 2);
    }

    #[test]
    fn shares_any_requires_common_color() {
        let red_green = ColorSet::from_colors(&[TileColor::Red, TileColor::Green]).unwrap();
        let green = ColorSet::from_colors(&[TileColor::Green]).unwrap();
        let blue = ColorSet::from_colors(&[TileColor::Blue]).unwrap();
        assert!(red_green.shares_any(&green));
        assert!(!red_green.shares_any(&blue));
    }

    #[test]
    fn step_stays_inside_grid() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::North, 3, 3), None);
        assert_eq!(corner.step(Direction::West, 3, 3), None);
        assert_eq!(corner.step(Direction::East, 3, 3), Some(CellCoord::new(1, 0)));
        assert_eq!(CellCoord::new(2, 2).step(Direction::South, 3, 3), None);
    }

    #[test]
    fn rotation_starts_at_self_and_turns_clockwise() {
        assert_eq!(
            Direction::South.rotation(),
            [
                Direction::South,
                Direction::West,
                Direction::North,
                Direction::East
            ]
        );
    }

    #[test]
    fn unmapped_keys_produce_no_direction() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::West));
        assert_eq!(Direction::from_key("W"), Some(Direction::North));
        assert_eq!(Direction::from_key("space"), None);
    }

    #[test]
    fn entity_codes_parse_back_to_their_characters() {
        for (kind, variant) in [
            ('P', '0'),
            ('A', 'E'),
            ('A', 'W'),
            ('F', 'S'),
            ('S', '0'),
            ('L', '4'),
            ('C', '0'),
            ('V', 'Y'),
            ('G', 'B'),
            ('D', '0'),
            ('B', '0'),
            ('N', '7'),
        ] {
            let code = EntityCode::parse(kind, variant).expect("known code");
            assert_eq!(code.chars(), [kind, variant]);
        }
    }

    #[test]
    fn assassins_only_fly_east_or_west() {
        assert!(EntityCode::parse('A', 'N').is_none());
        assert!(EntityCode::parse('Q', '0').is_none());
        assert!(EntityCode::parse('L', '9').is_none());
    }

    #[test]
    fn floor_follower_targets_first_spawn_color() {
        let colors = ColorSet::from_colors(&[TileColor::Yellow, TileColor::Blue]).unwrap();
        let state = CharacterSpawn::FloorFollowingThief {
            facing: Direction::East,
        }
        .into_state(&colors);
        assert_eq!(
            state,
            CharacterState::FloorFollowingThief {
                target: TileColor::Yellow,
                facing: Direction::East,
                recent: [None, None],
            }
        );
        assert_eq!(state.kind(), CharacterKind::FloorFollowingThief);
    }

    #[test]
    fn event_log_round_trips_through_bincode() {
        let log = vec![
            Event::CharacterMoved {
                actor: ActorId::new(0),
                from: TileId::new(3),
                to: TileId::new(4),
            },
            Event::BombDetonated {
                bomb: ItemId::new(2),
                destroyed: vec![ItemId::new(5), ItemId::new(9)],
            },
            Event::LevelEnded {
                outcome: LevelOutcome::Lost(LossReason::OutOfTime),
            },
        ];
        let bytes = bincode::serialize(&log).expect("serialize");
        let restored: Vec<Event> = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, log);
    }
}
