//! Explicit context object that owns the running level.

use std::time::Duration;

use thiserror::Error;
use tile_chase_core::{ActorId, Command, Direction, Event};
use tile_chase_system_movement::Movement;
use tile_chase_world::{self as world, query, Level, LoadError};
use tracing::info;

use crate::{Config, Scheduler};

/// Errors surfaced while moving between levels.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The catalog holds no levels at all.
    #[error("level catalog is empty")]
    EmptyCatalog,
    /// A catalog entry failed to parse.
    #[error("level {index} failed to load")]
    Load {
        /// Catalog position of the failing level.
        index: usize,
        /// Underlying parse failure.
        #[source]
        source: LoadError,
    },
    /// The current level is the last one in the catalog.
    #[error("no level follows level {index}")]
    NoFurtherLevel {
        /// Catalog position of the current level.
        index: usize,
    },
}

/// Ordered level texts a session plays through.
#[derive(Clone, Debug, Default)]
pub struct LevelCatalog {
    levels: Vec<String>,
}

impl LevelCatalog {
    /// Creates a catalog from level texts in play order.
    #[must_use]
    pub fn new(levels: Vec<String>) -> Self {
        Self { levels }
    }

    /// Number of levels in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Reports whether the catalog holds no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn load(&self, index: usize) -> Result<Level, SessionError> {
        let text = self.levels.get(index).ok_or(if index == 0 {
            SessionError::EmptyCatalog
        } else {
            SessionError::NoFurtherLevel { index: index - 1 }
        })?;
        Level::parse(text).map_err(|source| SessionError::Load { index, source })
    }
}

/// Owns the level, scheduler, configuration and level catalog.
///
/// Bomb fuses run on play time: the sum of frame intervals while running.
/// Time spent paused never reaches the level.
#[derive(Debug)]
pub struct Session {
    catalog: LevelCatalog,
    index: usize,
    level: Level,
    scheduler: Scheduler,
    movement: Movement,
    play_time: Duration,
    last_frame: Duration,
}

impl Session {
    /// Loads the first catalog level; the session starts stopped.
    pub fn new(config: Config, catalog: LevelCatalog) -> Result<Self, SessionError> {
        let level = catalog.load(0)?;
        Ok(Self {
            catalog,
            index: 0,
            level,
            scheduler: Scheduler::new(config),
            movement: Movement::default(),
            play_time: Duration::ZERO,
            last_frame: Duration::ZERO,
        })
    }

    /// Read-only access to the level being played.
    #[must_use]
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// Catalog position of the level being played.
    #[must_use]
    pub const fn level_index(&self) -> usize {
        self.index
    }

    /// Running time accumulated on the current level, excluding pauses.
    #[must_use]
    pub const fn play_time(&self) -> Duration {
        self.play_time
    }

    /// Reports whether frames currently resolve turns.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Starts or resumes play. Finished levels stay stopped.
    pub fn start(&mut self, now: Duration) {
        if self.level.outcome().is_some() {
            return;
        }
        if !self.scheduler.is_running() {
            info!(level = self.index, "session started");
            self.last_frame = now;
        }
        self.scheduler.start(now);
    }

    /// Stops resolving turns until the next [`Session::start`].
    pub fn pause(&mut self) {
        info!(level = self.index, "session paused");
        self.scheduler.pause();
    }

    /// Reloads the current level from the catalog; play stays stopped.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.switch_to(self.index)
    }

    /// Moves on to the next catalog level; play stays stopped.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        if self.index + 1 >= self.catalog.len() {
            return Err(SessionError::NoFurtherLevel { index: self.index });
        }
        self.switch_to(self.index + 1)
    }

    /// Records a key press for the next player turn. Unmapped keys cancel
    /// any pending movement.
    pub fn submit_input(&mut self, key: &str) {
        let direction = Direction::from_key(key);
        let mut events = Vec::new();
        world::apply(
            &mut self.level,
            Command::QueueInput { direction },
            &mut events,
        );
    }

    /// Serializes the current level state to the level text format.
    #[must_use]
    pub fn save(&self) -> String {
        self.level.to_text()
    }

    /// Runs one scheduler callback at timestamp `now`.
    pub fn on_frame(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        if !self.scheduler.is_running() {
            return;
        }

        self.play_time += now.saturating_sub(self.last_frame);
        self.last_frame = now;
        let played = self.play_time;

        let config = self.scheduler.config();
        world::apply(
            &mut self.level,
            Command::DetonateDueBombs {
                now: played,
                fuse: config.bomb_fuse(),
            },
            out_events,
        );

        let firing = self.scheduler.poll(now);
        if firing.world {
            world::apply(
                &mut self.level,
                Command::AdvanceClock {
                    elapsed: config.world_tick(),
                },
                out_events,
            );
        }
        if firing.player {
            self.resolve_turns(true, played, out_events);
        } else if firing.npc {
            self.resolve_turns(false, played, out_events);
        }

        if let Some(outcome) = self.level.outcome() {
            info!(level = self.index, ?outcome, "session stopped");
            self.scheduler.pause();
        }
    }

    /// Resolves one turn per actor listed at the start of the callback, in
    /// identifier order.
    fn resolve_turns(&mut self, players: bool, at: Duration, out_events: &mut Vec<Event>) {
        let actors: Vec<ActorId> = query::character_view(&self.level)
            .iter()
            .filter(|snapshot| snapshot.kind.is_player() == players)
            .map(|snapshot| snapshot.id)
            .collect();

        let mut commands = Vec::new();
        for actor in actors {
            if self.level.outcome().is_some() {
                break;
            }
            commands.clear();
            self.movement.handle(&self.level, actor, at, &mut commands);
            for command in commands.drain(..) {
                world::apply(&mut self.level, command, out_events);
            }
        }
    }

    fn switch_to(&mut self, index: usize) -> Result<(), SessionError> {
        let level = self.catalog.load(index)?;
        self.scheduler.pause();
        self.level = level;
        self.index = index;
        self.play_time = Duration::ZERO;
        info!(level = index, "level loaded");
        Ok(())
    }
}
