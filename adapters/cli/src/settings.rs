//! Optional TOML file overriding the scheduler cadences.

use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tile_chase_system_scheduler::Config;

/// Cadences in milliseconds; absent keys keep their defaults.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    world_tick_ms: u64,
    player_tick_ms: u64,
    npc_tick_ms: u64,
    bomb_fuse_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let config = Config::default();
        Self {
            world_tick_ms: millis(config.world_tick()),
            player_tick_ms: millis(config.player_tick()),
            npc_tick_ms: millis(config.npc_tick()),
            bomb_fuse_ms: millis(config.bomb_fuse()),
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(contents).context("failed to parse settings toml contents")?;
        let ticks = [
            settings.world_tick_ms,
            settings.player_tick_ms,
            settings.npc_tick_ms,
        ];
        if ticks.contains(&0) {
            bail!("tick intervals must be positive");
        }
        Ok(settings)
    }

    /// Scheduler configuration described by these settings.
    pub(crate) const fn config(&self) -> Config {
        Config::new(
            Duration::from_millis(self.world_tick_ms),
            Duration::from_millis(self.player_tick_ms),
            Duration::from_millis(self.npc_tick_ms),
            Duration::from_millis(self.bomb_fuse_ms),
        )
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
