use std::num::NonZero;

use almost_core::{Difficulty, GroupIndex, GroupSpec, Tile, TileId};
use almost_game::Round;
use almost_generator::GeneratedPuzzle;
use almost_store::CategoryId;
use rand_pcg::Pcg64;

use crate::{config::GameConfig, state::AppState};

/// Groups of 2 and 3: tiles 0..=1 are `category0`, tiles 2..=4 are `category1`.
pub(crate) fn sample_round() -> Round {
    round_with_terms((0..5).map(|id| format!("term{id}")))
}

/// The [`sample_round`] layout with the given five terms.
pub(crate) fn round_with_terms<I>(terms: I) -> Round
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let spec = GroupSpec::new(vec![2, 3]).unwrap();
    let tiles = [(0, 2), (0, 2), (1, 3), (1, 3), (1, 3)]
        .into_iter()
        .zip(terms)
        .enumerate()
        .map(|(id, ((group_index, group_size), term))| Tile {
            id: TileId::new(id),
            term: term.into(),
            category: format!("category{group_index}"),
            group_size,
            group_index: GroupIndex::new(group_index),
        })
        .collect();
    let puzzle =
        GeneratedPuzzle::from_parts(&spec, tiles, vec![CategoryId::new(0), CategoryId::new(1)])
            .unwrap();
    Round::new(spec, puzzle, NonZero::new(3).unwrap()).unwrap()
}

pub(crate) fn sample_state() -> AppState {
    let config = GameConfig {
        groups: GroupSpec::new(vec![2, 3]).unwrap(),
        mistakes_allowed: NonZero::new(3).unwrap(),
        reveal_delay_ms: 0,
        ..GameConfig::default()
    };
    AppState::new(sample_round(), config, Difficulty::Easy, Pcg64::new(1, 1))
}
