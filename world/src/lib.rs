#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state management for Tile Chase.
//!
//! A [`Level`] owns the tile arena, the live characters and items, the score,
//! the level timer and any armed bomb fuses. Systems read it through the
//! [`query`] module and mutate it exclusively through [`apply`].

mod format;
mod graph;
mod navigation;
mod path;
mod tile;

use std::{collections::BTreeMap, time::Duration};

use tile_chase_core::{
    ActorId, CharacterKind, CharacterState, Command, Direction, EntityCode, Event, ItemId,
    ItemKind, LevelOutcome, LossReason, TileId, CLOCK_TIME_BONUS,
};
use tracing::{debug, info, warn};

pub use format::LoadError;
pub use graph::TileGraph;
pub use navigation::PathFinder;
pub use path::Path;
pub use tile::Tile;

/// Represents the authoritative state of one loaded level.
#[derive(Clone, Debug)]
pub struct Level {
    graph: TileGraph,
    characters: BTreeMap<ActorId, Character>,
    items: BTreeMap<ItemId, Item>,
    fuses: Vec<Fuse>,
    score: u32,
    remaining: Duration,
    outcome: Option<LevelOutcome>,
}

impl Level {
    /// Parses a level from its text representation.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        format::parse(text)
    }

    /// Writes the current grid, occupants, score and time in the level text format.
    #[must_use]
    pub fn to_text(&self) -> String {
        format::serialize(self)
    }

    pub(crate) fn assemble(
        graph: TileGraph,
        spawns: Vec<(TileId, EntityCode)>,
        remaining: Duration,
        score: u32,
    ) -> Self {
        let mut level = Self {
            graph,
            characters: BTreeMap::new(),
            items: BTreeMap::new(),
            fuses: Vec::new(),
            score,
            remaining,
            outcome: None,
        };

        let mut next_actor = 0;
        let mut next_item = 0;
        for (tile_id, entity) in spawns {
            let Some(tile) = level.graph.tile_mut(tile_id) else {
                continue;
            };
            match entity {
                EntityCode::Character(spawn) => {
                    let id = ActorId::new(next_actor);
                    next_actor += 1;
                    let state = spawn.into_state(tile.colors());
                    tile.set_character(Some(id));
                    let _ = level.characters.insert(
                        id,
                        Character {
                            id,
                            tile: tile_id,
                            state,
                        },
                    );
                }
                EntityCode::Item(kind) => {
                    let id = ItemId::new(next_item);
                    next_item += 1;
                    tile.set_item(Some(id));
                    let _ = level.items.insert(
                        id,
                        Item {
                            id,
                            kind,
                            tile: tile_id,
                        },
                    );
                }
            }
        }

        level
    }

    /// Static tile graph of the level.
    #[must_use]
    pub const fn graph(&self) -> &TileGraph {
        &self.graph
    }

    /// Points scored so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Level time left on the clock.
    #[must_use]
    pub const fn remaining_time(&self) -> Duration {
        self.remaining
    }

    /// Terminal outcome, once the level has ended.
    #[must_use]
    pub const fn outcome(&self) -> Option<LevelOutcome> {
        self.outcome
    }

    fn entity_code_on(&self, tile: TileId) -> Option<EntityCode> {
        let tile = self.graph.tile(tile)?;
        if let Some(character) = tile.character().and_then(|id| self.characters.get(&id)) {
            if let Some(item) = tile.item() {
                warn!(
                    tile = tile.id().get(),
                    item = item.get(),
                    "item under a character is dropped from the saved level"
                );
            }
            return Some(EntityCode::Character(character.state.spawn()));
        }
        let item = tile.item().and_then(|id| self.items.get(&id))?;
        Some(EntityCode::Item(item.kind))
    }

    fn item_on(&self, tile: TileId) -> Option<&Item> {
        self.graph
            .tile(tile)
            .and_then(Tile::item)
            .and_then(|id| self.items.get(&id))
    }

    fn pending_items(&self) -> usize {
        self.items
            .values()
            .filter(|item| item.kind.is_pending())
            .count()
    }

    fn finish(&mut self, outcome: LevelOutcome, out_events: &mut Vec<Event>) {
        if self.outcome.is_some() {
            return;
        }
        info!(?outcome, score = self.score, "level ended");
        self.outcome = Some(outcome);
        out_events.push(Event::LevelEnded { outcome });
    }

    fn advance_clock(&mut self, elapsed: Duration, out_events: &mut Vec<Event>) {
        self.remaining = self.remaining.saturating_sub(elapsed);
        out_events.push(Event::TimeAdvanced {
            remaining: self.remaining,
        });
        if self.remaining.is_zero() {
            self.finish(LevelOutcome::Lost(LossReason::OutOfTime), out_events);
        }
    }

    fn queue_input(&mut self, direction: Option<Direction>) {
        for character in self.characters.values_mut() {
            if let CharacterState::Player { pending } = &mut character.state {
                *pending = direction;
            }
        }
    }

    fn resolve_turn(
        &mut self,
        actor: ActorId,
        destination: Option<TileId>,
        state: CharacterState,
        at: Duration,
        out_events: &mut Vec<Event>,
    ) {
        let Some(character) = self.characters.get_mut(&actor) else {
            debug!(actor = actor.get(), "turn skipped for removed character");
            return;
        };
        character.state = state;
        let from = character.tile;
        let kind = state.kind();

        let Some(to) = destination.filter(|to| *to != from) else {
            return;
        };

        if !self.admits(kind, to) {
            warn!(actor = actor.get(), destination = to.get(), "move rejected");
            out_events.push(Event::MoveRejected {
                actor,
                destination: to,
            });
            return;
        }

        if let Some(victim) = self.graph.tile(to).and_then(Tile::character) {
            self.eliminate(victim, actor, out_events);
        }

        self.relocate(actor, from, to);
        debug!(
            actor = actor.get(),
            from = from.get(),
            to = to.get(),
            "character moved"
        );
        out_events.push(Event::CharacterMoved { actor, from, to });

        if kind.collects_items() {
            self.interact(actor, kind, to, out_events);
        }

        if self.outcome.is_none() {
            self.arm_adjacent_bombs(to, at, out_events);
        }
    }

    /// Flying assassins enter any tile; everyone else needs a tile free of
    /// characters and blocking items.
    fn admits(&self, kind: CharacterKind, to: TileId) -> bool {
        let Some(tile) = self.graph.tile(to) else {
            return false;
        };
        if kind == CharacterKind::FlyingAssassin {
            return true;
        }
        tile.character().is_none()
            && self
                .item_on(to)
                .map_or(true, |item| !item.kind.is_blocking())
    }

    fn relocate(&mut self, actor: ActorId, from: TileId, to: TileId) {
        if let Some(tile) = self.graph.tile_mut(from) {
            tile.set_character(None);
        }
        if let Some(tile) = self.graph.tile_mut(to) {
            tile.set_character(Some(actor));
        }
        if let Some(character) = self.characters.get_mut(&actor) {
            character.tile = to;
        }
    }

    fn eliminate(&mut self, victim: ActorId, by: ActorId, out_events: &mut Vec<Event>) {
        let Some(character) = self.characters.remove(&victim) else {
            return;
        };
        if let Some(tile) = self.graph.tile_mut(character.tile) {
            tile.set_character(None);
        }
        info!(actor = victim.get(), by = by.get(), "character eliminated");
        out_events.push(Event::CharacterEliminated { actor: victim, by });

        let players_left = self
            .characters
            .values()
            .any(|character| character.state.kind().is_player());
        if character.state.kind().is_player() && !players_left {
            self.finish(
                LevelOutcome::Lost(LossReason::PlayerEliminated),
                out_events,
            );
        }
    }

    fn interact(
        &mut self,
        actor: ActorId,
        kind: CharacterKind,
        tile: TileId,
        out_events: &mut Vec<Event>,
    ) {
        let Some((item, item_kind)) = self.item_on(tile).map(|item| (item.id, item.kind)) else {
            return;
        };
        let is_player = kind.is_player();

        match item_kind {
            ItemKind::Loot(loot) => {
                self.collect(item, item_kind, actor, out_events);
                if is_player {
                    self.score = self.score.saturating_add(loot.value());
                    out_events.push(Event::ScoreChanged { score: self.score });
                }
            }
            ItemKind::Clock => {
                self.collect(item, item_kind, actor, out_events);
                if is_player {
                    self.remaining = self.remaining.saturating_add(CLOCK_TIME_BONUS);
                } else {
                    self.remaining = self.remaining.saturating_sub(CLOCK_TIME_BONUS);
                    if self.remaining.is_zero() {
                        self.finish(LevelOutcome::Lost(LossReason::OutOfTime), out_events);
                    }
                }
            }
            ItemKind::Lever(color) => {
                self.collect(item, item_kind, actor, out_events);
                let gates: Vec<ItemId> = self
                    .items
                    .values()
                    .filter(|candidate| candidate.kind == ItemKind::Gate(color))
                    .map(|gate| gate.id)
                    .collect();
                for gate in &gates {
                    let _ = self.remove_item(*gate);
                }
                out_events.push(Event::GatesOpened { color, gates });
            }
            ItemKind::Door => {
                if self.pending_items() > 0 {
                    return;
                }
                let outcome = if is_player {
                    LevelOutcome::Won
                } else {
                    LevelOutcome::Lost(LossReason::ThiefEscaped)
                };
                self.finish(outcome, out_events);
            }
            ItemKind::Note(note) => {
                if is_player {
                    out_events.push(Event::NoteRead { note, by: actor });
                }
            }
            ItemKind::Gate(_) | ItemKind::Bomb => {}
        }
    }

    fn collect(&mut self, item: ItemId, kind: ItemKind, by: ActorId, out_events: &mut Vec<Event>) {
        let _ = self.remove_item(item);
        debug!(item = item.get(), by = by.get(), ?kind, "item collected");
        out_events.push(Event::ItemCollected { item, kind, by });
    }

    fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let item = self.items.remove(&id)?;
        if let Some(tile) = self.graph.tile_mut(item.tile) {
            tile.set_item(None);
        }
        self.fuses.retain(|fuse| fuse.bomb != id);
        Some(item)
    }

    fn arm_adjacent_bombs(&mut self, tile: TileId, at: Duration, out_events: &mut Vec<Event>) {
        let Some(origin) = self.graph.tile(tile) else {
            return;
        };
        let bombs: Vec<ItemId> = Direction::ALL
            .into_iter()
            .filter_map(|direction| origin.neighbor(direction))
            .filter_map(|neighbor| self.item_on(neighbor))
            .filter(|item| item.kind == ItemKind::Bomb)
            .map(|item| item.id)
            .filter(|bomb| self.fuses.iter().all(|fuse| fuse.bomb != *bomb))
            .collect();

        for bomb in bombs {
            debug!(bomb = bomb.get(), "bomb armed");
            self.fuses.push(Fuse { bomb, armed_at: at });
            out_events.push(Event::BombArmed { bomb, at });
        }
    }

    fn detonate_due_bombs(&mut self, now: Duration, fuse: Duration, out_events: &mut Vec<Event>) {
        let due: Vec<ItemId> = self
            .fuses
            .iter()
            .filter(|armed| armed.is_due(now, fuse))
            .map(|armed| armed.bomb)
            .collect();

        let mut pending = due;
        pending.reverse();
        while let Some(bomb) = pending.pop() {
            let Some(item) = self.remove_item(bomb) else {
                continue;
            };
            let Some(origin) = self.graph.tile(item.tile).map(Tile::coord) else {
                continue;
            };

            let caught: Vec<(ItemId, ItemKind)> = self
                .items
                .values()
                .filter(|other| !other.kind.survives_blast())
                .filter(|other| {
                    self.graph.tile(other.tile).is_some_and(|tile| {
                        let coord = tile.coord();
                        coord.row() == origin.row() || coord.column() == origin.column()
                    })
                })
                .map(|other| (other.id, other.kind))
                .collect();

            let mut destroyed = Vec::new();
            for (id, kind) in caught {
                if kind == ItemKind::Bomb {
                    pending.push(id);
                } else if self.remove_item(id).is_some() {
                    destroyed.push(id);
                }
            }

            info!(bomb = bomb.get(), destroyed = destroyed.len(), "bomb detonated");
            out_events.push(Event::BombDetonated { bomb, destroyed });
        }
    }
}

/// Applies the provided command to the level, mutating state deterministically.
///
/// Commands arriving after the level reached an outcome are ignored.
pub fn apply(level: &mut Level, command: Command, out_events: &mut Vec<Event>) {
    if level.outcome.is_some() {
        return;
    }

    match command {
        Command::AdvanceClock { elapsed } => level.advance_clock(elapsed, out_events),
        Command::QueueInput { direction } => level.queue_input(direction),
        Command::ResolveTurn {
            actor,
            destination,
            state,
            at,
        } => level.resolve_turn(actor, destination, state, at, out_events),
        Command::DetonateDueBombs { now, fuse } => level.detonate_due_bombs(now, fuse, out_events),
    }
}

/// Query functions that provide read-only access to the level state.
pub mod query {
    use std::time::Duration;

    use super::{Level, TileGraph};
    use tile_chase_core::{
        ActorId, CellCoord, CharacterKind, CharacterState, ItemId, ItemKind, TileId,
    };

    /// Provides read-only access to the level's tile graph.
    #[must_use]
    pub fn graph(level: &Level) -> &TileGraph {
        &level.graph
    }

    /// Reports whether a character may not step onto `tile` right now.
    ///
    /// A tile is blocked while a character stands on it or it holds a
    /// blocking item. Tiles outside the grid are always blocked.
    #[must_use]
    pub fn is_blocked(level: &Level, tile: TileId) -> bool {
        match level.graph.tile(tile) {
            None => true,
            Some(found) => {
                found.character().is_some()
                    || level
                        .item_on(tile)
                        .is_some_and(|item| item.kind.is_blocking())
            }
        }
    }

    /// Number of loot and lever items still keeping the door closed.
    #[must_use]
    pub fn pending_items(level: &Level) -> usize {
        level.pending_items()
    }

    /// Snapshot of a single character, if it is still in play.
    #[must_use]
    pub fn character(level: &Level, id: ActorId) -> Option<CharacterSnapshot> {
        level
            .characters
            .get(&id)
            .map(|character| snapshot_character(level, character))
    }

    /// Captures a read-only view of the characters in play.
    #[must_use]
    pub fn character_view(level: &Level) -> CharacterView {
        CharacterView {
            snapshots: level
                .characters
                .values()
                .map(|character| snapshot_character(level, character))
                .collect(),
        }
    }

    /// Captures a read-only view of the items on the board.
    #[must_use]
    pub fn item_view(level: &Level) -> ItemView {
        ItemView {
            snapshots: level
                .items
                .values()
                .map(|item| ItemSnapshot {
                    id: item.id,
                    kind: item.kind,
                    tile: item.tile,
                    coord: coord_of(level, item.tile),
                })
                .collect(),
        }
    }

    /// Lists armed bombs together with the timestamp their fuse was lit.
    #[must_use]
    pub fn armed_bombs(level: &Level) -> Vec<(ItemId, Duration)> {
        level
            .fuses
            .iter()
            .map(|fuse| (fuse.bomb, fuse.armed_at))
            .collect()
    }

    fn snapshot_character(level: &Level, character: &super::Character) -> CharacterSnapshot {
        CharacterSnapshot {
            id: character.id,
            kind: character.state.kind(),
            tile: character.tile,
            coord: coord_of(level, character.tile),
            state: character.state,
        }
    }

    fn coord_of(level: &Level, tile: TileId) -> CellCoord {
        level
            .graph
            .tile(tile)
            .map_or(CellCoord::new(0, 0), |found| found.coord())
    }

    /// Read-only snapshot describing all characters in play.
    #[derive(Clone, Debug, Default)]
    pub struct CharacterView {
        snapshots: Vec<CharacterSnapshot>,
    }

    impl CharacterView {
        /// Iterator over the captured snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &CharacterSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<CharacterSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single character.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CharacterSnapshot {
        /// Unique identifier assigned to the character.
        pub id: ActorId,
        /// Kind of character.
        pub kind: CharacterKind,
        /// Tile currently occupied.
        pub tile: TileId,
        /// Grid coordinate of the occupied tile.
        pub coord: CellCoord,
        /// Actor-local memory.
        pub state: CharacterState,
    }

    /// Read-only snapshot describing all items on the board.
    #[derive(Clone, Debug, Default)]
    pub struct ItemView {
        snapshots: Vec<ItemSnapshot>,
    }

    impl ItemView {
        /// Iterator over the captured snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &ItemSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<ItemSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single item.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ItemSnapshot {
        /// Unique identifier assigned to the item.
        pub id: ItemId,
        /// Kind of item.
        pub kind: ItemKind,
        /// Tile the item lies on.
        pub tile: TileId,
        /// Grid coordinate of that tile.
        pub coord: CellCoord,
    }
}

#[derive(Clone, Debug)]
struct Character {
    id: ActorId,
    tile: TileId,
    state: CharacterState,
}

#[derive(Clone, Debug)]
struct Item {
    id: ItemId,
    kind: ItemKind,
    tile: TileId,
}

/// One-shot countdown started when a character steps next to a bomb.
#[derive(Clone, Copy, Debug)]
struct Fuse {
    bomb: ItemId,
    armed_at: Duration,
}

impl Fuse {
    fn is_due(&self, now: Duration, fuse: Duration) -> bool {
        now.saturating_sub(self.armed_at) >= fuse
    }
}
