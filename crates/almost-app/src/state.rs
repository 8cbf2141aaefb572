use almost_core::{Difficulty, TileId};
use almost_game::Round;
use rand_pcg::Pcg64;

use crate::config::GameConfig;

// AppState holds the round plus view state the round does not own: display order and pending output.
#[derive(Debug)]
pub(crate) struct AppState {
    pub(crate) round: Round,
    pub(crate) config: GameConfig,
    pub(crate) difficulty: Difficulty,
    order: Vec<TileId>,
    rng: Pcg64,
    notices: Vec<String>,
}

impl AppState {
    #[must_use]
    pub(crate) fn new(round: Round, config: GameConfig, difficulty: Difficulty, rng: Pcg64) -> Self {
        let mut state = Self {
            round,
            config,
            difficulty,
            order: Vec::new(),
            rng,
            notices: Vec::new(),
        };
        state.shuffle();
        state
    }

    /// Unsolved tiles in display order.
    #[must_use]
    pub(crate) fn order(&self) -> Vec<TileId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| self.round.is_unsolved(id))
            .collect()
    }

    pub(crate) fn shuffle(&mut self) {
        self.order = self.round.shuffled_order(&mut self.rng);
    }

    pub(crate) fn notify(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }

    pub(crate) fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}
