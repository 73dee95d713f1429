//! Plain-text level codec.
//!
//! The first line reads `width height time score`. The remaining
//! whitespace-separated tokens describe tiles in row-major order: four colour
//! characters (`R`, `Y`, `G`, `B` or the `.` filler) optionally followed by a
//! two-character entity code. Time is written with two decimals, so sub-centisecond
//! precision does not survive a round trip.

use std::time::Duration;

use thiserror::Error;
use tile_chase_core::{ColorSet, EntityCode, TileColor, TileId, MAX_TILE_COLORS};

use crate::{graph::TileGraph, Level};

const COLOR_FILLER: char = '.';
const ENTITY_CODE_LEN: usize = 2;

/// Reasons a level text cannot be loaded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The text contained no header line.
    #[error("level text is empty")]
    Empty,
    /// The header did not hold exactly four well-formed fields.
    #[error("header must read `width height time score`, found `{0}`")]
    MalformedHeader(String),
    /// The grid has no tiles.
    #[error("grid dimensions must be positive, found {columns}x{rows}")]
    EmptyGrid {
        /// Declared number of columns.
        columns: u32,
        /// Declared number of rows.
        rows: u32,
    },
    /// The time field is not a representable, non-negative number of seconds.
    #[error("time `{0}` is not a non-negative number of seconds")]
    InvalidTime(String),
    /// The number of tile tokens differs from `width * height`.
    #[error("expected {expected} tile tokens, found {found}")]
    TileCount {
        /// Tokens required by the header.
        expected: usize,
        /// Tokens present in the text.
        found: usize,
    },
    /// A tile token does not have the colour/entity shape.
    #[error("tile token `{token}` at ({column}, {row}) is malformed")]
    MalformedToken {
        /// Offending token.
        token: String,
        /// Column of the token.
        column: u32,
        /// Row of the token.
        row: u32,
    },
    /// A tile token carries an entity code that names no known entity.
    #[error("unknown entity code `{code}` at ({column}, {row})")]
    UnknownEntity {
        /// Offending two-character code.
        code: String,
        /// Column of the token.
        column: u32,
        /// Row of the token.
        row: u32,
    },
}

pub(crate) fn parse(text: &str) -> Result<Level, LoadError> {
    let mut lines = text.lines().skip_while(|line| line.trim().is_empty());
    let header = lines.next().ok_or(LoadError::Empty)?;
    let (columns, rows, remaining, score) = parse_header(header)?;

    let expected = usize::try_from(u64::from(columns) * u64::from(rows))
        .map_err(|_| LoadError::MalformedHeader(header.trim().to_owned()))?;
    let tokens: Vec<&str> = lines.flat_map(str::split_whitespace).collect();
    if tokens.len() != expected {
        return Err(LoadError::TileCount {
            expected,
            found: tokens.len(),
        });
    }

    let mut colors = Vec::with_capacity(expected);
    let mut spawns = Vec::new();
    for (index, token) in tokens.into_iter().enumerate() {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        let (column, row) = (index % columns, index / columns);
        let (tile_colors, entity) = parse_token(token, column, row)?;
        colors.push(tile_colors);
        if let Some(entity) = entity {
            spawns.push((TileId::new(index), entity));
        }
    }

    let graph = TileGraph::build(columns, rows, colors).ok_or(LoadError::TileCount {
        expected,
        found: expected,
    })?;
    Ok(Level::assemble(graph, spawns, remaining, score))
}

pub(crate) fn serialize(level: &Level) -> String {
    let graph = level.graph();
    let mut text = format!(
        "{} {} {:.2} {}\n",
        graph.columns(),
        graph.rows(),
        level.remaining_time().as_secs_f64(),
        level.score()
    );

    for row in 0..graph.rows() {
        let tokens: Vec<String> = graph
            .tiles()
            .filter(|tile| tile.coord().row() == row)
            .map(|tile| {
                let mut token: String = tile.colors().iter().map(TileColor::code).collect();
                while token.len() < MAX_TILE_COLORS {
                    token.push(COLOR_FILLER);
                }
                if let Some(code) = level.entity_code_on(tile.id()) {
                    token.extend(code.chars());
                }
                token
            })
            .collect();
        text.push_str(&tokens.join(" "));
        text.push('\n');
    }

    text
}

fn parse_header(line: &str) -> Result<(u32, u32, Duration, u32), LoadError> {
    let malformed = || LoadError::MalformedHeader(line.trim().to_owned());
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [columns, rows, time, score] = fields.as_slice() else {
        return Err(malformed());
    };

    let columns: u32 = columns.parse().map_err(|_| malformed())?;
    let rows: u32 = rows.parse().map_err(|_| malformed())?;
    let seconds: f64 = time.parse().map_err(|_| malformed())?;
    let score: u32 = score.parse().map_err(|_| malformed())?;

    if columns == 0 || rows == 0 {
        return Err(LoadError::EmptyGrid { columns, rows });
    }

    let remaining = Duration::try_from_secs_f64(seconds)
        .map_err(|_| LoadError::InvalidTime((*time).to_owned()))?;

    Ok((columns, rows, remaining, score))
}

fn parse_token(
    token: &str,
    column: u32,
    row: u32,
) -> Result<(ColorSet, Option<EntityCode>), LoadError> {
    let malformed = || LoadError::MalformedToken {
        token: token.to_owned(),
        column,
        row,
    };

    let chars: Vec<char> = token.chars().collect();
    if chars.len() != MAX_TILE_COLORS && chars.len() != MAX_TILE_COLORS + ENTITY_CODE_LEN {
        return Err(malformed());
    }

    let mut palette = Vec::with_capacity(MAX_TILE_COLORS);
    for code in &chars[..MAX_TILE_COLORS] {
        if *code == COLOR_FILLER {
            continue;
        }
        palette.push(TileColor::from_code(*code).ok_or_else(malformed)?);
    }
    let colors = ColorSet::from_colors(&palette).ok_or_else(malformed)?;

    let entity = match chars[MAX_TILE_COLORS..] {
        [] => None,
        [kind, variant] => Some(EntityCode::parse(kind, variant).ok_or_else(|| {
            LoadError::UnknownEntity {
                code: [kind, variant].iter().collect(),
                column,
                row,
            }
        })?),
        _ => return Err(malformed()),
    };

    Ok((colors, entity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_requires_four_fields() {
        let error = parse("3 3 10.0\nR... R... R...").unwrap_err();
        assert_eq!(error, LoadError::MalformedHeader("3 3 10.0".to_owned()));
    }

    #[test]
    fn token_count_must_match_dimensions() {
        let error = parse("2 2 10.0 0\nR... R... R...").unwrap_err();
        assert_eq!(
            error,
            LoadError::TileCount {
                expected: 4,
                found: 3,
            }
        );
    }

    #[test]
    fn negative_time_is_rejected() {
        let error = parse("1 1 -4.0 0\nR...").unwrap_err();
        assert_eq!(error, LoadError::InvalidTime("-4.0".to_owned()));
    }

    #[test]
    fn token_shape_is_enforced() {
        assert!(matches!(
            parse_token("RG", 0, 0),
            Err(LoadError::MalformedToken { .. })
        ));
        assert!(matches!(
            parse_token("RGB.P", 0, 0),
            Err(LoadError::MalformedToken { .. })
        ));
        assert!(matches!(
            parse_token("....", 0, 0),
            Err(LoadError::MalformedToken { .. })
        ));
        assert!(matches!(
            parse_token("RRB.", 0, 0),
            Err(LoadError::MalformedToken { .. })
        ));
        assert!(matches!(
            parse_token("RXB.", 0, 0),
            Err(LoadError::MalformedToken { .. })
        ));
    }

    #[test]
    fn unknown_entity_codes_name_their_position() {
        assert_eq!(
            parse_token("RGB.Z9", 4, 2),
            Err(LoadError::UnknownEntity {
                code: "Z9".to_owned(),
                column: 4,
                row: 2,
            })
        );
    }

    #[test]
    fn filler_can_appear_anywhere_in_the_colour_block() {
        let (colors, entity) = parse_token(".G.Y", 0, 0).expect("valid token");
        assert_eq!(
            colors.iter().collect::<Vec<_>>(),
            vec![TileColor::Green, TileColor::Yellow]
        );
        assert!(entity.is_none());
    }
}
