use std::time::Duration;

use tile_chase_core::{ActorId, Event, ItemId, ItemKind, LevelOutcome, LossReason, TileId};
use tile_chase_system_scheduler::{Config, LevelCatalog, Session, SessionError};
use tile_chase_world::query;

const PLAYER_NEXT_TO_RUBY: &str = "\
3 3 30.00 0
R... R... R...
R... R...P0 R...L3
R... R... R...
";

const SHORT_CLOCK: &str = "\
2 1 2.00 0
R...P0 R...
";

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn config() -> Config {
    Config::new(ms(1_000), ms(250), ms(600), ms(3_000))
}

fn new_session(levels: &[&str]) -> Session {
    let catalog = LevelCatalog::new(levels.iter().map(|text| (*text).to_owned()).collect());
    Session::new(config(), catalog).expect("catalog loads")
}

#[test]
fn player_turn_collects_adjacent_item() {
    let mut session = new_session(&[PLAYER_NEXT_TO_RUBY]);
    let mut events = Vec::new();

    session.start(ms(0));
    session.submit_input("ArrowRight");
    session.on_frame(ms(100), &mut events);
    assert!(events.is_empty(), "no cadence elapsed yet");

    session.on_frame(ms(250), &mut events);

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ItemCollected { kind: ItemKind::Loot(_), .. })));
    assert_eq!(session.level().score(), 50);
    assert_eq!(query::item_view(session.level()).iter().count(), 0);
}

#[test]
fn paused_session_ignores_frames() {
    let mut session = new_session(&[PLAYER_NEXT_TO_RUBY]);
    let mut events = Vec::new();

    session.start(ms(0));
    session.submit_input("d");
    session.pause();
    session.on_frame(ms(5_000), &mut events);

    assert!(events.is_empty());
    assert_eq!(session.level().score(), 0);
}

#[test]
fn running_out_of_time_stops_the_session() {
    let mut session = new_session(&[SHORT_CLOCK]);
    let mut events = Vec::new();
    session.start(ms(0));

    for step in 1..=30 {
        session.on_frame(ms(step * 100), &mut events);
    }

    assert_eq!(
        session.level().outcome(),
        Some(LevelOutcome::Lost(LossReason::OutOfTime))
    );
    assert!(!session.is_running());
    let ended = events
        .iter()
        .filter(|event| matches!(event, Event::LevelEnded { .. }))
        .count();
    assert_eq!(ended, 1);

    session.start(ms(4_000));
    assert!(!session.is_running(), "finished levels cannot resume");
}

#[test]
fn restart_reloads_and_advance_walks_the_catalog() {
    let mut session = new_session(&[PLAYER_NEXT_TO_RUBY, SHORT_CLOCK]);
    let mut events = Vec::new();
    session.start(ms(0));
    session.submit_input("d");
    session.on_frame(ms(250), &mut events);
    assert_eq!(session.level().score(), 50);

    session.restart().expect("reload");
    assert_eq!(session.level().score(), 0);
    assert!(!session.is_running());

    session.advance().expect("second level");
    assert_eq!(session.level_index(), 1);
    assert_eq!(session.save(), SHORT_CLOCK);

    let error = session.advance().unwrap_err();
    assert!(matches!(error, SessionError::NoFurtherLevel { index: 1 }));
}

#[test]
fn saved_progress_reloads_into_the_same_state() {
    let mut session = new_session(&[PLAYER_NEXT_TO_RUBY]);
    let mut events = Vec::new();
    session.start(ms(0));
    session.submit_input("d");
    session.on_frame(ms(1_000), &mut events);

    let saved = session.save();
    let restored = new_session(&[saved.as_str()]);

    assert_eq!(restored.level().score(), 50);
    assert_eq!(restored.level().remaining_time(), Duration::from_secs(29));
    assert_eq!(restored.save(), saved);
}

#[test]
fn armed_bombs_go_off_after_the_fuse() {
    let text = "\
3 2 30 0
R...P0 R... R...L1
R... R...B0 R...
";
    let mut session = new_session(&[text]);
    let mut events = Vec::new();
    session.start(ms(0));
    session.submit_input("d");
    session.on_frame(ms(250), &mut events);
    assert_eq!(
        query::armed_bombs(session.level()),
        vec![(ItemId::new(1), ms(250))]
    );

    events.clear();
    session.on_frame(ms(3_200), &mut events);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::BombDetonated { .. })));

    session.on_frame(ms(3_250), &mut events);
    assert!(events.contains(&Event::BombDetonated {
        bomb: ItemId::new(1),
        destroyed: Vec::new(),
    }));
}

#[test]
fn bomb_fuses_stand_still_while_paused() {
    let text = "\
3 2 30 0
R...P0 R... R...L1
R... R...B0 R...
";
    let mut session = new_session(&[text]);
    let mut events = Vec::new();
    session.start(ms(0));
    session.submit_input("d");
    session.on_frame(ms(250), &mut events);
    assert_eq!(query::armed_bombs(session.level()).len(), 1);

    session.pause();
    session.start(ms(600_000));
    events.clear();
    session.on_frame(ms(600_010), &mut events);
    assert!(events.is_empty(), "only 10ms of play since the pause");
    assert_eq!(session.play_time(), ms(260));
    assert_eq!(session.level().remaining_time(), Duration::from_secs(30));

    session.on_frame(ms(602_990), &mut events);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::BombDetonated { .. })));

    session.on_frame(ms(603_000), &mut events);
    assert!(events.contains(&Event::BombDetonated {
        bomb: ItemId::new(1),
        destroyed: Vec::new(),
    }));
}

#[test]
fn characters_removed_mid_callback_lose_their_turn() {
    let mut session = new_session(&["3 1 30 0\nR...AE R...FE B...\n"]);
    let mut events = Vec::new();
    session.start(ms(0));
    session.on_frame(ms(250), &mut events);
    session.on_frame(ms(500), &mut events);
    assert!(events.is_empty(), "player cadence shadows the npc cadence");

    session.on_frame(ms(600), &mut events);

    let assassin = ActorId::new(0);
    let thief = ActorId::new(1);
    assert_eq!(
        events,
        vec![
            Event::CharacterEliminated {
                actor: thief,
                by: assassin,
            },
            Event::CharacterMoved {
                actor: assassin,
                from: TileId::new(0),
                to: TileId::new(1),
            },
        ]
    );
    assert!(query::character(session.level(), thief).is_none());
    assert_eq!(query::character_view(session.level()).iter().count(), 1);
}
