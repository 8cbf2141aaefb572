use std::{
    collections::{BTreeSet, HashSet},
    num::NonZero,
};

use almost_core::{Difficulty, Fingerprint, GroupIndex, GroupSpec, Tile, TileId};
use almost_generator::{GeneratedPuzzle, PuzzleGenerator};
use almost_store::TermStore;
use rand::{Rng, seq::SliceRandom as _};

use crate::{Evaluation, GameError, evaluate};

/// Why the remaining groups are being revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RevealReason {
    /// The last allowed mistake was made.
    #[display("out of mistakes")]
    OutOfMistakes,
    /// The player asked for the solution.
    #[display("gave up")]
    GaveUp,
}

/// Where a round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// Accepting selections and submissions.
    Playing,
    /// Remaining groups are being solved one step at a time; input is blocked.
    Revealing {
        /// What started the reveal.
        reason: RevealReason,
    },
    /// Every group was found by the player.
    Won,
    /// The board was revealed for the player.
    Lost,
}

/// One round of play over a generated puzzle.
///
/// Tiles live in an arena indexed by [`TileId`]. Starting a new game overwrites
/// each tile in place, so an id held by a view stays valid across rounds.
///
/// A round moves from [`Phase::Playing`] to [`Phase::Won`] when the last group
/// is completed, or through [`Phase::Revealing`] to [`Phase::Lost`] when the
/// mistake budget runs out or the player gives up. Both end states last until
/// [`Round::new_game`] or [`Round::reset_with`].
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use almost_core::{Difficulty, GroupSpec, TileId};
/// use almost_game::{Evaluation, Round};
/// use almost_generator::PuzzleGenerator;
/// use almost_store::testing::ScriptedTermStore;
/// use futures::executor::block_on;
///
/// let store = ScriptedTermStore::new()
///     .with_category("pets", &["home"], &["cat", "dog"])
///     .with_category("tools", &["home"], &["saw", "awl", "vise"]);
/// let spec = GroupSpec::new(vec![2, 3])?;
/// let generator = PuzzleGenerator::new(&store);
/// let puzzle = block_on(generator.generate(&spec, Difficulty::Easy))?;
///
/// let mut round = Round::new(spec, puzzle, NonZero::new(4).unwrap())?;
/// round.toggle_tile(TileId::new(0))?;
/// round.toggle_tile(TileId::new(1))?;
/// assert!(round.submit()?.is_correct());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Round {
    spec: GroupSpec,
    tiles: Vec<Tile>,
    unsolved: BTreeSet<TileId>,
    solved: Vec<Vec<TileId>>,
    selection: BTreeSet<TileId>,
    hinted: BTreeSet<TileId>,
    history: HashSet<Fingerprint>,
    mistakes_made: usize,
    mistakes_allowed: usize,
    phase: Phase,
}

impl Round {
    /// Starts a round over `puzzle`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Puzzle`] if the puzzle does not fit `spec`.
    pub fn new(
        spec: GroupSpec,
        puzzle: GeneratedPuzzle,
        mistakes_allowed: NonZero<usize>,
    ) -> Result<Self, GameError> {
        puzzle.verify(&spec)?;
        let tiles = puzzle.into_tiles();
        Ok(Self {
            unsolved: tiles.iter().map(|tile| tile.id).collect(),
            solved: vec![Vec::new(); spec.len()],
            spec,
            tiles,
            selection: BTreeSet::new(),
            hinted: BTreeSet::new(),
            history: HashSet::new(),
            mistakes_made: 0,
            mistakes_allowed: mistakes_allowed.get(),
            phase: Phase::Playing,
        })
    }

    /// Returns the group sizes of this round.
    #[must_use]
    pub fn spec(&self) -> &GroupSpec {
        &self.spec
    }

    /// Returns every tile, solved or not, ordered by id.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns the tile with `id`.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Returns the tiles not yet placed in a solved group, ordered by id.
    pub fn unsolved_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.unsolved.iter().map(|id| &self.tiles[id.index()])
    }

    /// Returns the number of unsolved tiles.
    #[must_use]
    pub fn unsolved_count(&self) -> usize {
        self.unsolved.len()
    }

    /// Returns `true` if the tile is still on the board.
    #[must_use]
    pub fn is_unsolved(&self, id: TileId) -> bool {
        self.unsolved.contains(&id)
    }

    /// Returns the tiles of a solved group, empty while the group is unsolved.
    #[must_use]
    pub fn solved_group(&self, group_index: GroupIndex) -> &[TileId] {
        self.solved
            .get(group_index.index())
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the indices of the solved groups, ascending.
    pub fn solved_groups(&self) -> impl Iterator<Item = GroupIndex> + '_ {
        self.spec
            .groups()
            .map(|(group_index, _)| group_index)
            .filter(|group_index| !self.solved[group_index.index()].is_empty())
    }

    /// Returns the selected tiles in id order.
    pub fn selection(&self) -> impl Iterator<Item = TileId> + '_ {
        self.selection.iter().copied()
    }

    /// Returns the number of selected tiles.
    #[must_use]
    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    /// Returns `true` if the tile is selected.
    #[must_use]
    pub fn is_selected(&self, id: TileId) -> bool {
        self.selection.contains(&id)
    }

    /// Returns `true` if the tile was selected by a hint.
    #[must_use]
    pub fn is_hinted(&self, id: TileId) -> bool {
        self.hinted.contains(&id)
    }

    /// Returns the number of distinct selections submitted this round.
    #[must_use]
    pub fn submissions(&self) -> usize {
        self.history.len()
    }

    /// Returns the mistakes made so far.
    #[must_use]
    pub fn mistakes_made(&self) -> usize {
        self.mistakes_made
    }

    /// Returns the mistake budget.
    #[must_use]
    pub fn mistakes_allowed(&self) -> usize {
        self.mistakes_allowed
    }

    /// Returns the mistakes left before the board is revealed.
    #[must_use]
    pub fn mistakes_remaining(&self) -> usize {
        self.mistakes_allowed.saturating_sub(self.mistakes_made)
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Playing => Ok(()),
            Phase::Revealing { .. } => Err(GameError::RevealInProgress),
            Phase::Won | Phase::Lost => Err(GameError::RoundOver),
        }
    }

    /// Selects or deselects an unsolved tile, returning whether it is now selected.
    ///
    /// Deselecting a hinted tile also drops its hint mark.
    ///
    /// # Errors
    ///
    /// - [`GameError::RoundOver`] or [`GameError::RevealInProgress`] outside play.
    /// - [`GameError::TileUnavailable`] if the tile is unknown or solved.
    /// - [`GameError::SelectionFull`] if the selection already holds as many
    ///   tiles as the largest group.
    pub fn toggle_tile(&mut self, id: TileId) -> Result<bool, GameError> {
        self.ensure_playing()?;
        if !self.unsolved.contains(&id) {
            return Err(GameError::TileUnavailable { id });
        }
        if self.selection.remove(&id) {
            self.hinted.remove(&id);
            return Ok(false);
        }
        let max = self.spec.max_size();
        if self.selection.len() >= max {
            return Err(GameError::SelectionFull { max });
        }
        self.selection.insert(id);
        Ok(true)
    }

    /// Deselects every tile except hinted ones and returns the deselected ids.
    pub fn deselect_all(&mut self) -> Vec<TileId> {
        let snapshot: Vec<TileId> = self
            .selection
            .iter()
            .copied()
            .filter(|id| !self.hinted.contains(id))
            .collect();
        for id in &snapshot {
            self.selection.remove(id);
        }
        snapshot
    }

    /// Submits the current selection.
    ///
    /// A correct selection completes its group, after which the win check runs.
    /// Partial and incorrect selections cost one mistake; the last allowed
    /// mistake starts a reveal with [`RevealReason::OutOfMistakes`]. The
    /// selection is kept after anything but a correct submission.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RoundOver`] or [`GameError::RevealInProgress`] outside play.
    pub fn submit(&mut self) -> Result<Evaluation, GameError> {
        self.ensure_playing()?;
        let selection: Vec<&Tile> = self
            .selection
            .iter()
            .map(|id| &self.tiles[id.index()])
            .collect();
        let evaluation = evaluate(&selection, &mut self.history, &self.spec);
        log::debug!("submission of {} tiles: {evaluation:?}", selection.len());

        if let Some(group_index) = evaluation.newly_completed_group() {
            self.complete_group(group_index)?;
            if self.check_win() {
                return Ok(evaluation);
            }
        }
        if evaluation.is_mistake() {
            self.register_mistake()?;
        }
        Ok(evaluation)
    }

    /// Moves the selection into the solved group `group_index`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SelectionMismatch`] unless the selection is exactly
    /// the tiles of that group and the group is unsolved.
    pub fn complete_group(&mut self, group_index: GroupIndex) -> Result<(), GameError> {
        let mismatch = GameError::SelectionMismatch { group_index };
        let Some(size) = self.spec.size_of(group_index) else {
            return Err(mismatch);
        };
        let fits = self.solved[group_index.index()].is_empty()
            && self.selection.len() == size
            && self
                .selection
                .iter()
                .all(|id| self.tiles[id.index()].group_index == group_index);
        if !fits {
            return Err(mismatch);
        }

        let moved: Vec<TileId> = std::mem::take(&mut self.selection).into_iter().collect();
        for id in &moved {
            self.unsolved.remove(id);
            self.hinted.remove(id);
        }
        self.solved[group_index.index()] = moved;
        log::debug!("group {group_index} completed");
        Ok(())
    }

    /// Ends the round as won once no unsolved tiles remain.
    ///
    /// Only a round in play can be won; a reveal always ends in a loss.
    pub fn check_win(&mut self) -> bool {
        if self.phase.is_playing() && self.unsolved.is_empty() {
            self.phase = Phase::Won;
            log::info!("round won with {} mistakes", self.mistakes_made);
        }
        self.phase.is_won()
    }

    /// Counts one mistake, returning `true` if it used up the budget.
    ///
    /// Using up the budget starts a reveal with [`RevealReason::OutOfMistakes`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RoundOver`] or [`GameError::RevealInProgress`] outside play.
    pub fn register_mistake(&mut self) -> Result<bool, GameError> {
        self.ensure_playing()?;
        self.mistakes_made += 1;
        log::debug!(
            "mistake {}/{}",
            self.mistakes_made,
            self.mistakes_allowed
        );
        if self.mistakes_made == self.mistakes_allowed {
            self.begin_reveal(RevealReason::OutOfMistakes);
            return Ok(true);
        }
        Ok(false)
    }

    /// The unsolved group with the greatest index.
    fn next_unsolved_group(&self) -> Option<GroupIndex> {
        self.spec
            .groups()
            .rev()
            .map(|(group_index, _)| group_index)
            .find(|group_index| self.solved[group_index.index()].is_empty())
    }

    /// Completes the unsolved group with the greatest index.
    ///
    /// The selection and hints are discarded first. Solving groups this way
    /// never wins the round: emptying the board in play ends it as lost.
    /// Returns `None` once the round is over.
    pub fn solve_next_group(&mut self) -> Option<GroupIndex> {
        if self.phase.is_won() || self.phase.is_lost() {
            return None;
        }
        let group_index = self.next_unsolved_group()?;
        self.hinted.clear();
        self.selection = self
            .unsolved
            .iter()
            .copied()
            .filter(|id| self.tiles[id.index()].group_index == group_index)
            .collect();
        self.complete_group(group_index).ok()?;
        if self.phase.is_playing() && self.unsolved.is_empty() {
            self.phase = Phase::Lost;
            log::info!("round lost: every group was solved for the player");
        }
        Some(group_index)
    }

    /// Selects half of the largest unsolved group, rounded up, and marks those tiles as hinted.
    ///
    /// Any previous selection is dropped. A hint is not a mistake.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RoundOver`] or [`GameError::RevealInProgress`] outside play.
    pub fn hint(&mut self) -> Result<Vec<TileId>, GameError> {
        self.ensure_playing()?;
        let group_index = self
            .next_unsolved_group()
            .ok_or(GameError::NothingToReveal)?;
        let count = self
            .spec
            .size_of(group_index)
            .map_or(0, |size| size.div_ceil(2));

        let picks: Vec<TileId> = self
            .unsolved
            .iter()
            .copied()
            .filter(|id| self.tiles[id.index()].group_index == group_index)
            .take(count)
            .collect();
        self.selection = picks.iter().copied().collect();
        self.hinted = self.selection.clone();
        log::debug!("hinted {} tiles of group {group_index}", picks.len());
        Ok(picks)
    }

    fn begin_reveal(&mut self, reason: RevealReason) {
        self.selection.clear();
        self.hinted.clear();
        self.phase = Phase::Revealing { reason };
        log::info!("revealing remaining groups: {reason}");
    }

    /// Starts revealing the remaining groups and returns how many are left.
    ///
    /// # Errors
    ///
    /// - [`GameError::RoundOver`] or [`GameError::RevealInProgress`] outside play.
    /// - [`GameError::NothingToReveal`] if every group is solved.
    pub fn start_reveal(&mut self, reason: RevealReason) -> Result<usize, GameError> {
        self.ensure_playing()?;
        let remaining = self.solved.iter().filter(|group| group.is_empty()).count();
        if remaining == 0 {
            return Err(GameError::NothingToReveal);
        }
        self.begin_reveal(reason);
        Ok(remaining)
    }

    /// Reveals one group; revealing the last one ends the round as lost.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NothingToReveal`] if no reveal is in progress.
    pub fn reveal_step(&mut self) -> Result<GroupIndex, GameError> {
        let Phase::Revealing { reason } = self.phase else {
            return Err(GameError::NothingToReveal);
        };
        let Some(group_index) = self.solve_next_group() else {
            self.phase = Phase::Lost;
            return Err(GameError::NothingToReveal);
        };
        if self.unsolved.is_empty() {
            self.phase = Phase::Lost;
            log::info!("round lost ({reason}) with {} mistakes", self.mistakes_made);
        }
        Ok(group_index)
    }

    /// Runs a reveal to the end without pausing, returning the groups in reveal order.
    pub fn finish_reveal(&mut self) -> Vec<GroupIndex> {
        let mut revealed = Vec::new();
        while self.phase.is_revealing() {
            match self.reveal_step() {
                Ok(group_index) => revealed.push(group_index),
                Err(_) => break,
            }
        }
        revealed
    }

    /// Returns the unsolved tiles in a random display order.
    pub fn shuffled_order<R>(&self, rng: &mut R) -> Vec<TileId>
    where
        R: Rng + ?Sized,
    {
        let mut order: Vec<TileId> = self.unsolved.iter().copied().collect();
        order.shuffle(rng);
        order
    }

    /// Starts over on `puzzle`, overwriting every tile in place.
    ///
    /// # Errors
    ///
    /// - [`GameError::RevealInProgress`] while a reveal is running.
    /// - [`GameError::Puzzle`] if the puzzle does not fit this round's spec.
    pub fn reset_with(&mut self, puzzle: GeneratedPuzzle) -> Result<(), GameError> {
        if self.phase.is_revealing() {
            return Err(GameError::RevealInProgress);
        }
        puzzle.verify(&self.spec)?;

        for (slot, tile) in self.tiles.iter_mut().zip(puzzle.into_tiles()) {
            slot.replace_contents(tile);
        }
        self.unsolved = self.tiles.iter().map(|tile| tile.id).collect();
        for group in &mut self.solved {
            group.clear();
        }
        self.selection.clear();
        self.hinted.clear();
        self.history.clear();
        self.mistakes_made = 0;
        self.phase = Phase::Playing;
        log::info!("new round with {} tiles", self.tiles.len());
        Ok(())
    }

    /// Generates a fresh puzzle for the same group sizes and starts over on it.
    ///
    /// The round is untouched if generation fails.
    ///
    /// # Errors
    ///
    /// - [`GameError::RevealInProgress`] while a reveal is running.
    /// - [`GameError::Generation`] if the generator gives up.
    pub async fn new_game<S>(
        &mut self,
        generator: &PuzzleGenerator<'_, S>,
        difficulty: Difficulty,
    ) -> Result<(), GameError>
    where
        S: TermStore,
    {
        if self.phase.is_revealing() {
            return Err(GameError::RevealInProgress);
        }
        let puzzle = generator.generate(&self.spec, difficulty).await?;
        self.reset_with(puzzle)
    }
}

#[cfg(test)]
mod tests {
    use almost_store::{CategoryId, testing::ScriptedTermStore};
    use futures::executor::block_on;
    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    // Groups of 2, 3 and 4: ids 0..=1, 2..=4, 5..=8.
    fn spec() -> GroupSpec {
        GroupSpec::new(vec![2, 3, 4]).unwrap()
    }

    fn puzzle(prefix: &str) -> GeneratedPuzzle {
        let spec = spec();
        let tiles = spec
            .groups()
            .flat_map(|(group_index, size)| (0..size).map(move |_| (group_index, size)))
            .enumerate()
            .map(|(id, (group_index, group_size))| Tile {
                id: TileId::new(id),
                term: format!("{prefix}{id}"),
                category: format!("{prefix}-group{group_index}"),
                group_size,
                group_index,
            })
            .collect();
        let categories = (0..3).map(CategoryId::new).collect();
        GeneratedPuzzle::from_parts(&spec, tiles, categories).unwrap()
    }

    fn round(mistakes_allowed: usize) -> Round {
        Round::new(spec(), puzzle("t"), NonZero::new(mistakes_allowed).unwrap()).unwrap()
    }

    fn select(round: &mut Round, ids: &[usize]) {
        round.deselect_all();
        for &id in ids {
            assert!(round.toggle_tile(TileId::new(id)).unwrap());
        }
    }

    fn submit(round: &mut Round, ids: &[usize]) -> Evaluation {
        select(round, ids);
        round.submit().unwrap()
    }

    #[test]
    fn test_correct_submission_completes_group() {
        let mut round = round(4);
        let evaluation = submit(&mut round, &[3, 2, 4]);

        assert_eq!(
            evaluation,
            Evaluation::Correct {
                group_index: GroupIndex::new(1)
            }
        );
        assert_eq!(
            round.solved_group(GroupIndex::new(1)),
            &[TileId::new(2), TileId::new(3), TileId::new(4)]
        );
        assert_eq!(round.unsolved_count(), 6);
        assert_eq!(round.selection_len(), 0);
        assert_eq!(round.mistakes_made(), 0);
        assert_eq!(
            round.solved_groups().collect::<Vec<_>>(),
            vec![GroupIndex::new(1)]
        );
        assert!(round.phase().is_playing());
    }

    #[test]
    fn test_partial_costs_a_mistake_and_keeps_selection() {
        let mut round = round(4);
        let evaluation = submit(&mut round, &[2, 3, 5]);

        assert_eq!(
            evaluation,
            Evaluation::Partial {
                correct: 2,
                group: 3
            }
        );
        assert_eq!(round.mistakes_made(), 1);
        assert_eq!(round.selection_len(), 3);
    }

    #[test]
    fn test_too_few_is_free_and_unrecorded() {
        let mut round = round(4);
        let evaluation = submit(&mut round, &[5]);

        assert_eq!(evaluation, Evaluation::TooFew { min: 2 });
        assert_eq!(round.mistakes_made(), 0);
        assert_eq!(round.submissions(), 0);
    }

    #[test]
    fn test_duplicate_is_free() {
        let mut round = round(4);
        assert_eq!(submit(&mut round, &[0, 5]), Evaluation::Incorrect);
        assert_eq!(round.mistakes_made(), 1);

        assert_eq!(submit(&mut round, &[5, 0]), Evaluation::Duplicate);
        assert_eq!(round.mistakes_made(), 1);
        assert_eq!(round.submissions(), 1);
    }

    #[test]
    fn test_last_mistake_reveals_and_loses() {
        let mut round = round(4);
        for pair in [[0, 2], [0, 3], [0, 4]] {
            assert_eq!(submit(&mut round, &pair), Evaluation::Incorrect);
        }
        assert_eq!(round.mistakes_made(), 3);

        assert_eq!(submit(&mut round, &[1, 5]), Evaluation::Incorrect);
        assert_eq!(round.mistakes_made(), 4);
        assert_eq!(
            round.phase(),
            Phase::Revealing {
                reason: RevealReason::OutOfMistakes
            }
        );
        assert_eq!(round.selection_len(), 0);
        assert_eq!(round.submit(), Err(GameError::RevealInProgress));
        assert_eq!(
            round.toggle_tile(TileId::new(0)),
            Err(GameError::RevealInProgress)
        );

        assert_eq!(
            round.finish_reveal(),
            vec![GroupIndex::new(2), GroupIndex::new(1), GroupIndex::new(0)]
        );
        assert_eq!(round.phase(), Phase::Lost);
        assert_eq!(round.unsolved_count(), 0);
        assert_eq!(round.submit(), Err(GameError::RoundOver));
    }

    #[test]
    fn test_final_group_on_last_chance_wins() {
        let mut round = round(2);
        assert_eq!(submit(&mut round, &[0, 2]), Evaluation::Incorrect);
        assert_eq!(round.mistakes_remaining(), 1);

        assert!(submit(&mut round, &[0, 1]).is_correct());
        assert!(submit(&mut round, &[2, 3, 4]).is_correct());
        assert!(submit(&mut round, &[5, 6, 7, 8]).is_correct());

        assert_eq!(round.phase(), Phase::Won);
        assert_eq!(round.mistakes_made(), 1);
        assert!(round.check_win());
        assert_eq!(round.hint(), Err(GameError::RoundOver));
    }

    #[test]
    fn test_solve_next_group_picks_highest_unsolved() {
        let mut round = round(4);
        assert!(submit(&mut round, &[5, 6, 7, 8]).is_correct());
        select(&mut round, &[0]);

        assert_eq!(round.solve_next_group(), Some(GroupIndex::new(1)));
        assert_eq!(round.selection_len(), 0);
        assert!(round.phase().is_playing());
        assert_eq!(round.solve_next_group(), Some(GroupIndex::new(0)));
        assert_eq!(round.solve_next_group(), None);
        assert_eq!(round.phase(), Phase::Lost);
    }

    #[test]
    fn test_solving_every_group_in_play_ends_the_round() {
        let spec = GroupSpec::new(vec![2]).unwrap();
        let tiles = (0..2)
            .map(|id| Tile {
                id: TileId::new(id),
                term: format!("w{id}"),
                category: "pair".to_owned(),
                group_size: 2,
                group_index: GroupIndex::new(0),
            })
            .collect();
        let puzzle = GeneratedPuzzle::from_parts(&spec, tiles, vec![CategoryId::new(0)]).unwrap();
        let mut round = Round::new(spec, puzzle, NonZero::new(4).unwrap()).unwrap();

        assert_eq!(round.solve_next_group(), Some(GroupIndex::new(0)));
        assert_eq!(round.unsolved_count(), 0);
        assert_eq!(round.phase(), Phase::Lost);
        assert_eq!(round.submit(), Err(GameError::RoundOver));
        assert_eq!(
            round.start_reveal(RevealReason::GaveUp),
            Err(GameError::RoundOver)
        );
        assert_eq!(round.solve_next_group(), None);
    }

    #[test]
    fn test_give_up_reveals_step_by_step() {
        let mut round = round(4);
        assert!(submit(&mut round, &[0, 1]).is_correct());

        assert_eq!(round.start_reveal(RevealReason::GaveUp), Ok(2));
        assert_eq!(round.hint(), Err(GameError::RevealInProgress));
        assert_eq!(round.reveal_step(), Ok(GroupIndex::new(2)));
        assert!(round.phase().is_revealing());
        assert_eq!(round.reveal_step(), Ok(GroupIndex::new(1)));
        assert_eq!(round.phase(), Phase::Lost);
        assert_eq!(round.reveal_step(), Err(GameError::NothingToReveal));
    }

    #[test]
    fn test_hint_selects_half_of_largest_unsolved_group() {
        let mut round = round(4);
        select(&mut round, &[0]);

        let picks = round.hint().unwrap();
        assert_eq!(picks, vec![TileId::new(5), TileId::new(6)]);
        assert!(!round.is_selected(TileId::new(0)));
        assert!(round.is_hinted(TileId::new(5)));
        assert_eq!(round.mistakes_made(), 0);

        // Hinted tiles survive a clear.
        round.toggle_tile(TileId::new(2)).unwrap();
        assert_eq!(round.deselect_all(), vec![TileId::new(2)]);
        assert_eq!(
            round.selection().collect::<Vec<_>>(),
            vec![TileId::new(5), TileId::new(6)]
        );

        // Finishing the group after a hint.
        round.toggle_tile(TileId::new(7)).unwrap();
        round.toggle_tile(TileId::new(8)).unwrap();
        assert!(round.submit().unwrap().is_correct());
        assert!(!round.is_hinted(TileId::new(5)));

        // Next hint moves to the group of 3: two tiles.
        assert_eq!(round.hint().unwrap().len(), 2);
    }

    #[test]
    fn test_toggle_limits() {
        let mut round = round(4);
        assert_eq!(
            round.toggle_tile(TileId::new(42)),
            Err(GameError::TileUnavailable {
                id: TileId::new(42)
            })
        );
        select(&mut round, &[0, 1, 2, 3]);
        assert_eq!(
            round.toggle_tile(TileId::new(4)),
            Err(GameError::SelectionFull { max: 4 })
        );
        assert_eq!(round.toggle_tile(TileId::new(3)), Ok(false));

        select(&mut round, &[0, 1]);
        round.submit().unwrap();
        assert_eq!(
            round.toggle_tile(TileId::new(0)),
            Err(GameError::TileUnavailable { id: TileId::new(0) })
        );
    }

    #[test]
    fn test_complete_group_rejects_wrong_selection() {
        let mut round = round(4);
        select(&mut round, &[0, 2]);
        assert_eq!(
            round.complete_group(GroupIndex::new(0)),
            Err(GameError::SelectionMismatch {
                group_index: GroupIndex::new(0)
            })
        );
        assert_eq!(round.unsolved_count(), 9);
    }

    #[test]
    fn test_reset_keeps_tile_ids() {
        let mut round = round(1);
        assert!(submit(&mut round, &[0, 1]).is_correct());
        assert_eq!(submit(&mut round, &[2, 5]), Evaluation::Incorrect);
        round.finish_reveal();
        assert_eq!(round.phase(), Phase::Lost);

        round.reset_with(puzzle("u")).unwrap();
        assert_eq!(round.phase(), Phase::Playing);
        assert_eq!(round.unsolved_count(), 9);
        assert_eq!(round.mistakes_made(), 0);
        assert_eq!(round.submissions(), 0);
        assert!(round.solved_groups().next().is_none());
        for (position, tile) in round.tiles().iter().enumerate() {
            assert_eq!(tile.id, TileId::new(position));
            assert_eq!(tile.term, format!("u{position}"));
        }
    }

    #[test]
    fn test_new_game_from_generator() {
        let store = ScriptedTermStore::new()
            .with_category("pets", &["home"], &["cat", "dog"])
            .with_category("tools", &["home"], &["saw", "awl", "vise"])
            .with_category("rooms", &["home"], &["hall", "den", "attic", "loft"]);
        let generator = PuzzleGenerator::new(&store);

        let mut round = round(4);
        submit(&mut round, &[0, 2]);
        block_on(round.new_game(&generator, Difficulty::Hard)).unwrap();

        assert_eq!(round.mistakes_made(), 0);
        assert_eq!(round.tile(TileId::new(0)).unwrap().category, "pets");
        assert_eq!(round.tile(TileId::new(8)).unwrap().term, "loft");

        let empty = ScriptedTermStore::new();
        let generator = PuzzleGenerator::new(&empty);
        let before = round.tiles().to_vec();
        assert!(matches!(
            block_on(round.new_game(&generator, Difficulty::Easy)),
            Err(GameError::Generation(_))
        ));
        assert_eq!(round.tiles(), before.as_slice());
    }

    #[test]
    fn test_shuffled_order_covers_unsolved() {
        let mut round = round(4);
        assert!(submit(&mut round, &[0, 1]).is_correct());
        let mut rng = Pcg64::seed_from_u64(7);

        let mut order = round.shuffled_order(&mut rng);
        order.sort();
        assert_eq!(order, (2..9).map(TileId::new).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn prop_resubmitting_is_always_free(
            ids in prop::sample::subsequence((0..9).collect::<Vec<usize>>(), 1..=4)
                .prop_shuffle(),
        ) {
            let mut round = round(4);
            select(&mut round, &ids);
            let first = round.submit().unwrap();
            prop_assume!(round.phase().is_playing() && !first.is_correct());
            let mistakes = round.mistakes_made();

            let second = round.submit().unwrap();
            if first.is_too_few() {
                prop_assert!(second.is_too_few());
            } else {
                prop_assert_eq!(second, Evaluation::Duplicate);
            }
            prop_assert_eq!(round.mistakes_made(), mistakes);
        }
    }
}
