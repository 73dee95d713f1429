#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-cadence turn scheduling for Tile Chase.
//!
//! The [`Scheduler`] samples a caller-supplied monotonic timestamp against
//! three cadences. [`Session`] drives a level with it, one callback per frame.

mod session;

use std::time::Duration;

use tracing::debug;

pub use session::{LevelCatalog, Session, SessionError};

const DEFAULT_WORLD_TICK: Duration = Duration::from_millis(1_000);
const DEFAULT_PLAYER_TICK: Duration = Duration::from_millis(250);
const DEFAULT_NPC_TICK: Duration = Duration::from_millis(600);
const DEFAULT_BOMB_FUSE: Duration = Duration::from_millis(3_000);

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    world_tick: Duration,
    player_tick: Duration,
    npc_tick: Duration,
    bomb_fuse: Duration,
}

impl Config {
    /// Creates a new configuration using the provided cadences and bomb fuse.
    #[must_use]
    pub const fn new(
        world_tick: Duration,
        player_tick: Duration,
        npc_tick: Duration,
        bomb_fuse: Duration,
    ) -> Self {
        Self {
            world_tick,
            player_tick,
            npc_tick,
            bomb_fuse,
        }
    }

    /// Interval between level timer decrements; also the amount removed.
    #[must_use]
    pub const fn world_tick(&self) -> Duration {
        self.world_tick
    }

    /// Interval between player turns.
    #[must_use]
    pub const fn player_tick(&self) -> Duration {
        self.player_tick
    }

    /// Interval between non-player turns.
    #[must_use]
    pub const fn npc_tick(&self) -> Duration {
        self.npc_tick
    }

    /// Delay between arming a bomb and its detonation.
    #[must_use]
    pub const fn bomb_fuse(&self) -> Duration {
        self.bomb_fuse
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_WORLD_TICK,
            DEFAULT_PLAYER_TICK,
            DEFAULT_NPC_TICK,
            DEFAULT_BOMB_FUSE,
        )
    }
}

/// Cadences that elapsed during one callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Firing {
    /// The level timer should lose one world tick.
    pub world: bool,
    /// Every player character takes a turn.
    pub player: bool,
    /// Every non-player character takes a turn. Never set together with `player`.
    pub npc: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Stopped,
    Running {
        world: Duration,
        player: Duration,
        npc: Duration,
    },
}

/// Two-state cadence tracker.
#[derive(Clone, Copy, Debug)]
pub struct Scheduler {
    config: Config,
    state: State,
}

impl Scheduler {
    /// Creates a stopped scheduler.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            state: State::Stopped,
        }
    }

    /// Configuration the scheduler was built with.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Reports whether callbacks currently resolve turns.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Starts or resumes the scheduler, sampling every cadence at `now`.
    ///
    /// Starting a running scheduler keeps its existing samples.
    pub fn start(&mut self, now: Duration) {
        if self.is_running() {
            return;
        }
        self.state = State::Running {
            world: now,
            player: now,
            npc: now,
        };
    }

    /// Stops the scheduler; later callbacks report nothing until restarted.
    pub fn pause(&mut self) {
        self.state = State::Stopped;
    }

    /// Samples `now` against the cadences, resampling each one that fired.
    pub fn poll(&mut self, now: Duration) -> Firing {
        let State::Running {
            world,
            player,
            npc,
        } = &mut self.state
        else {
            return Firing::default();
        };

        let mut firing = Firing::default();
        if elapsed(world, now, self.config.world_tick) {
            firing.world = true;
        }
        if elapsed(player, now, self.config.player_tick) {
            firing.player = true;
        } else if elapsed(npc, now, self.config.npc_tick) {
            firing.npc = true;
        }

        if firing != Firing::default() {
            debug!(?now, ?firing, "cadence fired");
        }
        firing
    }
}

fn elapsed(sample: &mut Duration, now: Duration, interval: Duration) -> bool {
    if now.saturating_sub(*sample) < interval {
        return false;
    }
    *sample = now;
    true
}
