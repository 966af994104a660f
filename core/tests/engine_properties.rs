use std::collections::{BTreeSet, VecDeque};

use minefield_core::*;

const SEEDS: std::ops::Range<u64> = 0..32;

fn all_coords((rows, columns): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..columns).map(move |column| (row, column)))
}

/// Engine over a known random layout, so tests can compare against the mines.
fn engine_with_layout(
    config: GameConfig,
    seed: u64,
) -> (MineLayout, GameEngine<impl LayoutGenerator + use<>>) {
    let layout = RandomLayoutGenerator::new(seed).generate(config).unwrap();
    let injected = layout.clone();
    let engine =
        GameEngine::with_generator(config, move |_: GameConfig| -> Result<MineLayout> {
            Ok(injected.clone())
        })
        .unwrap();
    (layout, engine)
}

fn revealed_set<G>(engine: &GameEngine<G>) -> BTreeSet<Coord2> {
    engine
        .iter_cells()
        .filter(|view| view.revealed)
        .map(|view| view.coords)
        .collect()
}

/// Zero region around `start` plus its numbered border, computed from the layout alone.
fn expected_region(layout: &MineLayout, start: Coord2) -> BTreeSet<Coord2> {
    let size = layout.size();
    let mut region = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(coords) = queue.pop_front() {
        if layout.adjacent_mine_count(coords) != 0 {
            continue;
        }
        for neighbor in NeighborIter::new(coords, size) {
            if region.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    region
}

#[test]
fn generated_grids_have_exact_mine_count() {
    let configs = [((1, 1), 0), ((1, 2), 1), ((9, 9), 10), ((16, 30), 99), ((5, 5), 24)];

    for (size, mines) in configs {
        let config = GameConfig::new(size, mines).unwrap();
        for seed in SEEDS {
            let grid = Grid::generate(config, &mut RandomLayoutGenerator::new(seed)).unwrap();
            let placed = grid.iter_cells().filter(|cell| cell.is_mine()).count();

            assert_eq!(placed, usize::from(mines), "seed {seed}, size {size:?}");
        }
    }
}

#[test]
fn adjacency_counts_match_neighbors() {
    let config = GameConfig::new((12, 17), 50).unwrap();

    for seed in SEEDS {
        let grid = Grid::generate(config, &mut RandomLayoutGenerator::new(seed)).unwrap();

        for cell in grid.iter_cells().filter(|cell| !cell.is_mine()) {
            let expected = grid
                .neighbors_of(cell.coords())
                .unwrap()
                .iter()
                .filter(|&&coords| grid.cell_at(coords).unwrap().is_mine())
                .count();

            assert_eq!(usize::from(cell.adjacent_mines()), expected);
        }
    }
}

#[test]
fn zero_reveal_opens_exactly_its_region() {
    let config = GameConfig::new((16, 16), 30).unwrap();

    for seed in SEEDS {
        let (layout, mut engine) = engine_with_layout(config, seed);
        let Some(start) = all_coords(config.size).find(|&coords| {
            !layout.contains_mine(coords) && layout.adjacent_mine_count(coords) == 0
        }) else {
            continue;
        };

        engine.reveal(start).unwrap();

        assert_eq!(revealed_set(&engine), expected_region(&layout, start), "seed {seed}");
    }
}

#[test]
fn reveal_is_monotone_and_loss_freezes_the_board() {
    let config = GameConfig::new((10, 10), 20).unwrap();

    for seed in SEEDS {
        let mut engine = GameEngine::new(config, seed).unwrap();
        let mut previous = BTreeSet::new();
        let mut frozen = None;

        // walk the board diagonally-ish, flagging every third cell
        for (i, coords) in all_coords(config.size).enumerate() {
            let coords = ((coords.0 * 3) % 10, (coords.1 * 7) % 10);
            if i % 3 == 0 {
                engine.toggle_flag(coords).unwrap();
            } else {
                engine.reveal(coords).unwrap();
            }

            let current = revealed_set(&engine);
            assert!(current.is_superset(&previous), "seed {seed}");
            previous = current;

            if engine.status() == GameStatus::Lost {
                let cells: Vec<_> = engine.iter_cells().collect();
                if frozen.is_none() {
                    frozen = Some(cells);
                } else {
                    assert_eq!(frozen.as_ref(), Some(&cells), "seed {seed}");
                }
            } else {
                assert!(frozen.is_none(), "seed {seed}");
            }
        }
    }
}

#[test]
fn revealing_every_safe_cell_wins() {
    let config = GameConfig::new((8, 13), 21).unwrap();

    for seed in SEEDS {
        let (layout, mut engine) = engine_with_layout(config, seed);
        let safe: Vec<_> = all_coords(config.size)
            .filter(|&coords| !layout.contains_mine(coords))
            .collect();

        for &coords in &safe {
            assert_ne!(engine.reveal(coords).unwrap(), RevealOutcome::HitMine);
        }

        assert_eq!(engine.status(), GameStatus::Won, "seed {seed}");
        assert_eq!(engine.revealed_count(), config.safe_cell_count());
        assert_eq!(engine.triggered_mine(), None);
    }
}

#[test]
fn reset_rerandomizes_the_layout() {
    let config = GameConfig::new((16, 16), 40).unwrap();
    let mut engine = GameEngine::new(config, 99).unwrap();

    let mines_after_loss = |engine: &mut GameEngine| -> BTreeSet<Coord2> {
        for coords in all_coords(config.size) {
            if engine.reveal(coords).unwrap() == RevealOutcome::HitMine {
                break;
            }
        }
        assert_eq!(engine.status(), GameStatus::Lost);
        engine
            .iter_cells()
            .filter(|view| view.mine == Some(true))
            .map(|view| view.coords)
            .collect()
    };

    let first = mines_after_loss(&mut engine);
    engine.reset().unwrap();

    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.config(), config);
    assert_eq!(engine.size(), (16, 16));
    assert_eq!(engine.mine_count(), 40);
    assert!(engine.iter_cells().all(|view| !view.revealed && !view.flagged));

    let second = mines_after_loss(&mut engine);
    assert_eq!(first.len(), 40);
    assert_eq!(second.len(), 40);
    assert_ne!(first, second);
}

#[test]
fn serialized_views_hide_unrevealed_mines() {
    let config = GameConfig::new((4, 4), 15).unwrap();
    let engine = GameEngine::new(config, 5).unwrap();

    for view in engine.iter_cells() {
        let json = serde_json::to_value(view).unwrap();

        assert_eq!(json["mine"], serde_json::Value::Null);
        assert_eq!(json["adjacent_mines"], serde_json::Value::Null);
    }
}

#[test]
fn config_survives_serialization() {
    let config = GameConfig::new((16, 30), 99).unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let restored: GameConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, config);
    assert!(restored.validate().is_ok());
}

#[test]
fn largest_board_opens_from_the_center() {
    let config = GameConfig::new((Coord::MAX, Coord::MAX), 1).unwrap();
    let mut engine =
        GameEngine::with_generator(config, |config: GameConfig| -> Result<MineLayout> {
            MineLayout::from_mine_coords(config.size, &[(0, 0)])
        })
        .unwrap();

    assert_eq!(engine.reveal((127, 127)).unwrap(), RevealOutcome::Won);
    assert_eq!(engine.status(), GameStatus::Won);
    assert_eq!(engine.revealed_count(), 255 * 255 - 1);
    assert!(!engine.cell_at((0, 0)).unwrap().revealed);
}
