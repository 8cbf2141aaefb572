//! Round play for Almost.
//!
//! [`evaluate`] classifies a submitted selection against the group sizes and the
//! selections seen so far. [`Round`] owns everything that changes during play:
//! which tiles are still on the board, the solved groups, the active selection,
//! the submission history and the mistake count. It decides when a round is won
//! and drives the step-by-step reveal that ends a lost one.

pub use self::{
    error::GameError,
    evaluate::{Evaluation, evaluate},
    round::{Phase, RevealReason, Round},
};

mod error;
mod evaluate;
mod round;
