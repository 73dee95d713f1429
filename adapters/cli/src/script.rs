//! Timed key presses replayed against the simulated clock.

use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Key presses sorted by the timestamp they are delivered at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct InputScript {
    presses: Vec<(Duration, String)>,
    cursor: usize,
}

impl InputScript {
    /// Parses whitespace separated `millis:key` entries, e.g. `250:d 500:s`.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        let mut presses = Vec::new();
        for entry in text.split_whitespace() {
            let Some((at, key)) = entry.split_once(':') else {
                bail!("input `{entry}` must read `millis:key`");
            };
            let at: u64 = at
                .parse()
                .with_context(|| format!("invalid timestamp in input `{entry}`"))?;
            if key.is_empty() {
                bail!("input `{entry}` names no key");
            }
            presses.push((Duration::from_millis(at), key.to_owned()));
        }
        presses.sort_by_key(|(at, _)| *at);
        Ok(Self {
            presses,
            cursor: 0,
        })
    }

    /// Drains every press due at or before `now`.
    pub(crate) fn due(&mut self, now: Duration) -> impl Iterator<Item = &str> {
        let start = self.cursor;
        while self
            .presses
            .get(self.cursor)
            .is_some_and(|(at, _)| *at <= now)
        {
            self.cursor += 1;
        }
        self.presses[start..self.cursor]
            .iter()
            .map(|(_, key)| key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_are_delivered_in_time_order() {
        let mut script = InputScript::parse("500:s 250:d 250:ArrowUp").expect("valid");

        assert_eq!(script.due(Duration::from_millis(100)).count(), 0);
        assert_eq!(
            script.due(Duration::from_millis(300)).collect::<Vec<_>>(),
            vec!["d", "ArrowUp"]
        );
        assert_eq!(
            script.due(Duration::from_millis(900)).collect::<Vec<_>>(),
            vec!["s"]
        );
        assert_eq!(script.due(Duration::from_secs(60)).count(), 0);
    }

    #[test]
    fn malformed_entries_are_rejected() {
        assert!(InputScript::parse("d").is_err());
        assert!(InputScript::parse("x:d").is_err());
        assert!(InputScript::parse("10:").is_err());
    }
}
