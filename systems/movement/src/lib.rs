#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that plans one turn per character.
//!
//! Strategies only read the level; the plan they return is applied through
//! [`Command::ResolveTurn`], which lets the level validate the destination and
//! run any interaction on arrival.

use std::time::Duration;

use tile_chase_core::{ActorId, CharacterState, Command, Direction, ItemKind, TileColor, TileId};
use tile_chase_world::{
    query::{self, CharacterSnapshot},
    Level, Path, PathFinder, Tile,
};
use tracing::debug;

/// Pure system that turns level snapshots into turn commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Movement;

impl Movement {
    /// Emits the [`Command::ResolveTurn`] for `actor`'s next turn.
    ///
    /// Emits nothing when the actor has left play, so callers can iterate an
    /// actor list captured before earlier turns removed anyone.
    pub fn handle(&self, level: &Level, actor: ActorId, at: Duration, out: &mut Vec<Command>) {
        let Some(snapshot) = query::character(level, actor) else {
            debug!(actor = actor.get(), "removed before its turn");
            return;
        };
        out.push(plan_turn(level, &snapshot).into_command(actor, at));
    }
}

/// Outcome of planning a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Tile the character proposes to enter, or `None` to stay put.
    pub destination: Option<TileId>,
    /// Actor-local state to carry into the next turn.
    pub state: CharacterState,
}

impl Plan {
    const fn stay(state: CharacterState) -> Self {
        Self {
            destination: None,
            state,
        }
    }

    /// Wraps the plan into the command that resolves it against the level.
    #[must_use]
    pub const fn into_command(self, actor: ActorId, at: Duration) -> Command {
        Command::ResolveTurn {
            actor,
            destination: self.destination,
            state: self.state,
            at,
        }
    }
}

/// Plans the next turn of `actor` against the current level state.
#[must_use]
pub fn plan_turn(level: &Level, actor: &CharacterSnapshot) -> Plan {
    let Some(tile) = level.graph().tile(actor.tile) else {
        return Plan::stay(actor.state);
    };

    let plan = match actor.state {
        CharacterState::Player { pending } => plan_player(level, tile, pending),
        CharacterState::FlyingAssassin { heading } => plan_assassin(tile, heading),
        CharacterState::FloorFollowingThief {
            target,
            facing,
            recent,
        } => plan_floor_follower(level, tile, target, facing, recent),
        CharacterState::SmartThief => plan_smart_thief(level, tile),
    };

    debug!(
        actor = actor.id.get(),
        kind = ?actor.kind,
        destination = plan.destination.map(|tile| tile.get()),
        "turn planned"
    );
    plan
}

fn plan_player(level: &Level, tile: &Tile, pending: Option<Direction>) -> Plan {
    let state = CharacterState::Player { pending: None };
    let destination = pending
        .and_then(|direction| tile.link(direction))
        .filter(|next| !query::is_blocked(level, *next));

    Plan { destination, state }
}

fn plan_assassin(tile: &Tile, heading: Direction) -> Plan {
    match tile.neighbor(heading) {
        Some(next) => Plan {
            destination: Some(next),
            state: CharacterState::FlyingAssassin { heading },
        },
        None => Plan::stay(CharacterState::FlyingAssassin {
            heading: heading.opposite(),
        }),
    }
}

fn plan_floor_follower(
    level: &Level,
    tile: &Tile,
    target: TileColor,
    facing: Direction,
    recent: [Option<TileId>; 2],
) -> Plan {
    let stay = Plan::stay(CharacterState::FloorFollowingThief {
        target,
        facing,
        recent,
    });
    let is_recent = |next: TileId| recent.contains(&Some(next));

    let mut order = facing.rotation();
    let Some((_, first)) = floor_candidates(level, tile, target, order).next() else {
        return stay;
    };
    if is_recent(first) {
        order = facing.clockwise().rotation();
    }

    let chosen = floor_candidates(level, tile, target, order)
        .find(|(_, next)| !is_recent(*next))
        .or_else(|| floor_candidates(level, tile, target, order).next());

    match chosen {
        Some((direction, next)) => Plan {
            destination: Some(next),
            state: CharacterState::FloorFollowingThief {
                target,
                facing: direction,
                recent: [Some(tile.id()), recent[0]],
            },
        },
        None => stay,
    }
}

/// Free link tiles painted with `target`, in `order`.
fn floor_candidates<'level>(
    level: &'level Level,
    tile: &'level Tile,
    target: TileColor,
    order: [Direction; 4],
) -> impl Iterator<Item = (Direction, TileId)> + 'level {
    order.into_iter().filter_map(move |direction| {
        let next = tile.link(direction)?;
        let candidate = level.graph().tile(next)?;
        (candidate.colors().contains(target) && !query::is_blocked(level, next))
            .then_some((direction, next))
    })
}

fn plan_smart_thief(level: &Level, tile: &Tile) -> Plan {
    let door_open = query::pending_items(level) == 0;
    let finder = PathFinder::new(level.graph());

    let best = query::item_view(level)
        .iter()
        .filter(|item| item.kind.is_route_target())
        .filter(|item| door_open || item.kind != ItemKind::Door)
        .filter_map(|item| {
            finder.search(tile.id(), item.tile, |next| query::is_blocked(level, next))
        })
        .fold(None, |best: Option<Path>, path| match best {
            Some(current) if current.len() <= path.len() => Some(current),
            _ => Some(path),
        });

    let destination = best.and_then(|mut path| {
        let _ = path.pop_front();
        path.front()
    });

    Plan {
        destination,
        state: CharacterState::SmartThief,
    }
}
