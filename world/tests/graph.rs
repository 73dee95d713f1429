use proptest::prelude::*;
use tile_chase_core::{CellCoord, ColorSet, Direction, TileColor};
use tile_chase_world::TileGraph;

const PALETTE: [TileColor; 4] = [
    TileColor::Red,
    TileColor::Yellow,
    TileColor::Green,
    TileColor::Blue,
];

fn color_set(mask: u8) -> ColorSet {
    let colors: Vec<TileColor> = PALETTE
        .into_iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, color)| color)
        .collect();
    ColorSet::from_colors(&colors).expect("mask selects at least one colour")
}

fn grid() -> impl Strategy<Value = (u32, u32, Vec<u8>)> {
    (1u32..7, 1u32..7).prop_flat_map(|(columns, rows)| {
        let tiles = (columns * rows) as usize;
        (
            Just(columns),
            Just(rows),
            prop::collection::vec(1u8..16, tiles),
        )
    })
}

fn build(columns: u32, rows: u32, masks: &[u8]) -> TileGraph {
    let colors = masks.iter().copied().map(color_set).collect();
    TileGraph::build(columns, rows, colors).expect("dimensions match")
}

proptest! {
    #[test]
    fn links_point_at_the_first_tile_sharing_a_colour((columns, rows, masks) in grid()) {
        let graph = build(columns, rows, &masks);

        for tile in graph.tiles() {
            for direction in Direction::ALL {
                let mut expected = None;
                let mut cursor = tile.coord().step(direction, columns, rows);
                while let Some(coord) = cursor {
                    let candidate = graph.tile_at(coord).expect("coordinate inside grid");
                    if candidate.shares_color_with(tile) {
                        expected = Some(candidate.id());
                        break;
                    }
                    cursor = coord.step(direction, columns, rows);
                }
                prop_assert_eq!(tile.link(direction), expected);
            }
        }
    }

    #[test]
    fn neighbours_are_adjacent_and_symmetric((columns, rows, masks) in grid()) {
        let graph = build(columns, rows, &masks);

        for tile in graph.tiles() {
            for direction in Direction::ALL {
                let expected = tile
                    .coord()
                    .step(direction, columns, rows)
                    .and_then(|coord| graph.id(coord));
                prop_assert_eq!(tile.neighbor(direction), expected);

                if let Some(neighbor) = tile.neighbor(direction) {
                    let back = graph.tile(neighbor).expect("neighbour exists");
                    prop_assert_eq!(back.neighbor(direction.opposite()), Some(tile.id()));
                }
            }
        }
    }

    #[test]
    fn link_equals_neighbour_only_when_they_share_a_colour((columns, rows, masks) in grid()) {
        let graph = build(columns, rows, &masks);

        for tile in graph.tiles() {
            for direction in Direction::ALL {
                let Some(neighbor) = tile.neighbor(direction) else {
                    prop_assert_eq!(tile.link(direction), None);
                    continue;
                };
                let shares = graph
                    .tile(neighbor)
                    .is_some_and(|adjacent| adjacent.shares_color_with(tile));
                prop_assert_eq!(tile.link(direction) == Some(neighbor), shares);
            }
        }
    }
}

#[test]
fn single_colour_grid_links_every_neighbour() {
    let graph = build(3, 2, &[1; 6]);
    let corner = graph.tile_at(CellCoord::new(0, 0)).expect("corner");

    assert_eq!(corner.link(Direction::East), graph.id(CellCoord::new(1, 0)));
    assert_eq!(corner.link(Direction::South), graph.id(CellCoord::new(0, 1)));
    assert_eq!(corner.link(Direction::North), None);
    assert_eq!(corner.link(Direction::West), None);
}
