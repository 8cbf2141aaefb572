//! Terminal front end and request surface for Almost.
//!
//! - [`app::run_play`]: the interactive round loop over any reader and writer.
//! - [`api::handle`]: the `action=tiles` request surface.
//! - [`config::GameConfig`]: board, difficulty and pacing settings loaded from JSON.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod game_factory;

mod action;
mod action_handler;
mod messages;
mod render;
mod state;

#[cfg(test)]
mod test_util;
