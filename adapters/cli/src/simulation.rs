//! Headless game loop driving a session from a simulated clock.

use std::{fmt, time::Duration};

use anyhow::{Context, Result};
use tile_chase_core::LevelOutcome;
use tile_chase_system_scheduler::{Config, LevelCatalog, Session};
use tracing::{debug, info};

use crate::script::InputScript;

/// Plays through a catalog, advancing after every won level.
#[derive(Debug)]
pub(crate) struct Simulation {
    session: Session,
    script: InputScript,
    levels: usize,
}

/// Result of a headless run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Summary {
    /// Levels won, in catalog order.
    pub(crate) won: usize,
    /// Level the run finished on.
    pub(crate) level: usize,
    /// How that level ended, if it did.
    pub(crate) outcome: Option<LevelOutcome>,
    /// Score on the final level.
    pub(crate) score: u32,
    /// Simulated time consumed.
    pub(crate) elapsed: Duration,
}

impl Simulation {
    pub(crate) fn new(config: Config, catalog: LevelCatalog, script: InputScript) -> Result<Self> {
        let levels = catalog.len();
        let session = Session::new(config, catalog).context("failed to start session")?;
        Ok(Self {
            session,
            script,
            levels,
        })
    }

    /// Runs frames every `frame` until the catalog is done, a level is lost
    /// or `limit` elapses.
    pub(crate) fn run(&mut self, frame: Duration, limit: Duration) -> Result<Summary> {
        let mut now = Duration::ZERO;
        let mut won = 0;
        let mut events = Vec::new();
        self.session.start(now);

        while now < limit {
            now += frame;
            for key in self.script.due(now) {
                self.session.submit_input(key);
            }

            events.clear();
            self.session.on_frame(now, &mut events);
            for event in &events {
                debug!(?event, "level event");
            }

            match self.session.level().outcome() {
                None => {}
                Some(LevelOutcome::Won) if self.session.level_index() + 1 < self.levels => {
                    won += 1;
                    info!(level = self.session.level_index(), "advancing");
                    self.session.advance()?;
                    self.session.start(now);
                }
                Some(LevelOutcome::Won) => {
                    won += 1;
                    break;
                }
                Some(LevelOutcome::Lost(_)) => break,
            }
        }

        let level = self.session.level();
        Ok(Summary {
            won,
            level: self.session.level_index(),
            outcome: level.outcome(),
            score: level.score(),
            elapsed: now,
        })
    }

    /// Current level in the text format.
    pub(crate) fn save(&self) -> String {
        self.session.save()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            None => "unfinished".to_owned(),
            Some(LevelOutcome::Won) => "won".to_owned(),
            Some(LevelOutcome::Lost(reason)) => format!("lost ({reason:?})"),
        };
        write!(
            f,
            "level {} {outcome} after {:.2}s, score {}, levels won {}",
            self.level + 1,
            self.elapsed.as_secs_f64(),
            self.score,
            self.won
        )
    }
}
