use almost_core::{GroupIndex, TileId};
use almost_generator::{GenerationError, PuzzleDefect};

/// Errors returned by [`Round`](crate::Round) operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The round is already won or lost.
    #[display("the round is over")]
    RoundOver,
    /// Groups are being revealed; input is blocked until the reveal ends.
    #[display("groups are being revealed")]
    RevealInProgress,
    /// The tile does not exist or is already solved.
    #[display("tile {id} cannot be selected")]
    TileUnavailable {
        /// The requested tile.
        id: TileId,
    },
    /// The selection already holds as many tiles as the largest group.
    #[display("at most {max} tiles can be selected")]
    SelectionFull {
        /// The largest group size.
        max: usize,
    },
    /// There is no reveal to advance, or no group left to reveal.
    #[display("nothing to reveal")]
    NothingToReveal,
    /// The active selection is not the unsolved part of the group.
    #[display("selection does not match group {group_index}")]
    SelectionMismatch {
        /// The group the selection was meant to complete.
        group_index: GroupIndex,
    },
    /// A puzzle does not fit the round's group spec.
    #[display("puzzle does not fit the round: {_0}")]
    #[from]
    Puzzle(PuzzleDefect),
    /// A new puzzle could not be generated.
    #[display("{_0}")]
    #[from]
    Generation(GenerationError),
}
