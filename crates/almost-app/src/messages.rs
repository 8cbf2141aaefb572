use almost_core::Difficulty;
use almost_game::{Evaluation, GameError, Phase, RevealReason};

#[must_use]
pub fn evaluation(evaluation: Evaluation) -> String {
    match evaluation {
        Evaluation::TooFew { min } => format!("Select at least {min} tiles."),
        Evaluation::Duplicate => "You already tried that one.".to_owned(),
        Evaluation::Correct { .. } => "Correct!".to_owned(),
        Evaluation::Partial { correct, group } => {
            format!("Almost! {correct} of {group} belong together.")
        }
        Evaluation::Incorrect => "Not a group.".to_owned(),
    }
}

#[must_use]
pub fn game_error(err: &GameError) -> String {
    match err {
        GameError::SelectionFull { max } => format!("Select at most {max} tiles."),
        GameError::TileUnavailable { id } => format!("There is no tile {id} on the board."),
        GameError::RoundOver => "The round is over. Type `new` to play again.".to_owned(),
        GameError::Generation(_) => {
            "Could not build a puzzle. Check the catalog and try again.".to_owned()
        }
        other => format!("{other}."),
    }
}

/// The banner for a finished round.
#[must_use]
pub fn phase(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Won => Some("You found every group!"),
        Phase::Lost => Some("Better luck next time."),
        Phase::Revealing {
            reason: RevealReason::OutOfMistakes,
        } => Some("Out of mistakes. Revealing the answers..."),
        Phase::Revealing {
            reason: RevealReason::GaveUp,
        } => Some("Revealing the answers..."),
        Phase::Playing => None,
    }
}

#[must_use]
pub fn difficulty(difficulty: Difficulty) -> String {
    format!("Difficulty: {difficulty}. Starting a new game.")
}
