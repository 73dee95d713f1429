use std::time::Duration;

use tile_chase_core::{
    ActorId, CellCoord, CharacterState, Command, Direction, Event, TileColor, TileId,
};
use tile_chase_system_movement::{plan_turn, Movement};
use tile_chase_world::{self as world, query, Level};

fn tile(level: &Level, column: u32, row: u32) -> TileId {
    level
        .graph()
        .id(CellCoord::new(column, row))
        .expect("tile inside grid")
}

fn take_turn(level: &mut Level, actor: ActorId) -> Vec<Event> {
    let snapshot = query::character(level, actor).expect("actor in play");
    let plan = plan_turn(level, &snapshot);
    let mut events = Vec::new();
    world::apply(level, plan.into_command(actor, Duration::ZERO), &mut events);
    events
}

#[test]
fn smart_thief_prefers_the_nearer_item() {
    let level = Level::parse("9 1 30 0\nR...L4 R... R... R... R... R...S0 R... R... R...L1")
        .expect("parses");
    let thief = query::character(&level, ActorId::new(0)).expect("thief");

    let plan = plan_turn(&level, &thief);

    assert_eq!(
        plan.destination,
        Some(tile(&level, 6, 0)),
        "distance 3 beats distance 5 regardless of item order"
    );
}

#[test]
fn smart_thief_routes_around_gates() {
    let text = "\
3 2 30 0
R...S0 R...GR R...L1
R... R... R...
";
    let level = Level::parse(text).expect("parses");
    let thief = query::character(&level, ActorId::new(0)).expect("thief");

    assert_eq!(
        plan_turn(&level, &thief).destination,
        Some(tile(&level, 0, 1))
    );
}

#[test]
fn floor_follower_turns_away_from_recent_tiles() {
    let level = Level::parse("3 1 30 0\nR... R...FW R...").expect("parses");
    let mut thief = query::character(&level, ActorId::new(0)).expect("thief");
    thief.state = CharacterState::FloorFollowingThief {
        target: TileColor::Red,
        facing: Direction::West,
        recent: [Some(tile(&level, 0, 0)), None],
    };

    let plan = plan_turn(&level, &thief);

    assert_eq!(plan.destination, Some(tile(&level, 2, 0)));
}

#[test]
fn floor_follower_backtracks_out_of_dead_ends() {
    let level = Level::parse("2 1 30 0\nR... R...FW").expect("parses");
    let mut thief = query::character(&level, ActorId::new(0)).expect("thief");
    thief.state = CharacterState::FloorFollowingThief {
        target: TileColor::Red,
        facing: Direction::East,
        recent: [Some(tile(&level, 0, 0)), None],
    };

    assert_eq!(
        plan_turn(&level, &thief).destination,
        Some(tile(&level, 0, 0)),
        "the recent tile is the only way out"
    );
}

#[test]
fn floor_follower_circles_a_ring_without_reversing() {
    let text = "\
3 3 30 0
R...FE R... R...
R... B... R...
R... R... R...
";
    let mut level = Level::parse(text).expect("parses");
    let thief = ActorId::new(0);
    let mut visited = vec![tile(&level, 0, 0)];

    for _ in 0..8 {
        let events = take_turn(&mut level, thief);
        let Some(Event::CharacterMoved { to, .. }) = events.first() else {
            panic!("thief should keep moving, got {events:?}");
        };
        let last_two = &visited[visited.len().saturating_sub(2)..];
        assert!(!last_two.contains(to), "reversed onto {to:?}");
        visited.push(*to);
    }

    assert_eq!(
        visited.last(),
        Some(&tile(&level, 0, 0)),
        "one lap around the blue centre takes eight turns"
    );
}

#[test]
fn assassin_flies_over_foreign_colours() {
    let mut level = Level::parse("3 1 30 0\nR...AE B... Y...P0").expect("parses");
    let assassin = ActorId::new(0);

    let _ = take_turn(&mut level, assassin);
    let events = take_turn(&mut level, assassin);

    assert!(events.contains(&Event::CharacterEliminated {
        actor: ActorId::new(1),
        by: assassin,
    }));
}

#[test]
fn player_collects_the_adjacent_item() {
    let text = "\
3 3 30 0
R... R... R...
R... R...P0 R...L3
R... R... R...
";
    let mut level = Level::parse(text).expect("parses");
    let player = ActorId::new(0);
    let mut events = Vec::new();
    world::apply(
        &mut level,
        Command::QueueInput {
            direction: Direction::from_key("d"),
        },
        &mut events,
    );

    let events = take_turn(&mut level, player);

    assert!(events.contains(&Event::ScoreChanged { score: 50 }));
    assert_eq!(level.score(), 50);
    assert_eq!(query::item_view(&level).iter().count(), 0);
}

#[test]
fn handle_skips_characters_that_left_play() {
    let level = Level::parse("2 1 30 0\nR...P0 R...").expect("parses");
    let movement = Movement;
    let mut commands = Vec::new();

    movement.handle(&level, ActorId::new(7), Duration::ZERO, &mut commands);
    assert!(commands.is_empty());

    movement.handle(&level, ActorId::new(0), Duration::from_secs(1), &mut commands);
    assert_eq!(
        commands,
        vec![Command::ResolveTurn {
            actor: ActorId::new(0),
            destination: None,
            state: CharacterState::Player { pending: None },
            at: Duration::from_secs(1),
        }]
    );
}
