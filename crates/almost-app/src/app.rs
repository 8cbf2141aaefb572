//! Almost terminal front end.
//!
//! # Design Notes
//! - Line-driven: each input line becomes a batch of actions that run in order.
//! - The board is redrawn after every line; notices print above it.
//! - Generation and the paced reveal run between batches, never inside an action.
//!
//! # Future Enhancements
//! - Raw-mode key input instead of typed commands.

use std::{
    io::{BufRead, Write},
    thread,
};

use almost_core::Difficulty;
use almost_generator::PuzzleGenerator;
use almost_store::{PuzzleSeed, TermStore};
use futures::executor::block_on;

use crate::{
    action::{self, ActionRequestQueue},
    action_handler::{self, ActionEffect},
    api::{self, Request},
    config::GameConfig,
    error::AppError,
    game_factory, messages, render,
    state::AppState,
};

fn flush_notices<W: Write>(app_state: &mut AppState, output: &mut W) -> Result<(), AppError> {
    for notice in app_state.take_notices() {
        writeln!(output, "{notice}")?;
    }
    Ok(())
}

fn reveal<W: Write>(app_state: &mut AppState, output: &mut W) -> Result<(), AppError> {
    let delay = app_state.config.reveal_delay();
    while app_state.round.phase().is_revealing() {
        match app_state.round.reveal_step() {
            Ok(group_index) => {
                log::debug!("revealed group {group_index}");
                writeln!(output, "{}", render::board(app_state))?;
                output.flush()?;
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }
            Err(err) => {
                log::warn!("reveal stopped early: {err}");
                app_state.round.finish_reveal();
            }
        }
    }
    if let Some(banner) = messages::phase(app_state.round.phase()) {
        writeln!(output, "{banner}")?;
    }
    Ok(())
}

fn new_game<S, W>(
    generator: &PuzzleGenerator<'_, S>,
    app_state: &mut AppState,
    output: &mut W,
) -> Result<(), AppError>
where
    S: TermStore,
    W: Write,
{
    let difficulty = app_state.difficulty;
    match block_on(app_state.round.new_game(generator, difficulty)) {
        Ok(()) => {
            app_state.shuffle();
            writeln!(output, "New {difficulty} game.")?;
        }
        Err(err) => {
            log::warn!("new game failed: {err}");
            writeln!(output, "{}", messages::game_error(&err))?;
        }
    }
    Ok(())
}

/// Plays rounds until `quit` or end of input.
///
/// A failed first generation is returned as an error. Later failures are
/// reported and keep the current board.
pub fn run_play<S, R, W>(
    store: &S,
    config: &GameConfig,
    seed: PuzzleSeed,
    difficulty: Difficulty,
    mut input: R,
    mut output: W,
) -> Result<(), AppError>
where
    S: TermStore,
    R: BufRead,
    W: Write,
{
    let generator = game_factory::generator(store, config);
    let round = block_on(game_factory::generate_round(&generator, config, difficulty))?;
    let mut app_state = AppState::new(round, config.clone(), difficulty, seed.rng());
    writeln!(output, "{}", render::board(&app_state))?;

    let mut action_queue = ActionRequestQueue::default();
    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match action::parse_line(&line) {
            Ok(actions) => action_queue.extend(actions),
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        }

        let mut effect = ActionEffect::default();
        action_handler::handle_all(&mut app_state, &mut effect, &mut action_queue);
        flush_notices(&mut app_state, &mut output)?;

        if effect.reveal_requested {
            reveal(&mut app_state, &mut output)?;
        }
        if effect.quit_requested {
            break;
        }
        if effect.new_game_requested {
            new_game(&generator, &mut app_state, &mut output)?;
        }
        writeln!(output, "{}", render::board(&app_state))?;
    }
    Ok(())
}

/// Generates one puzzle and writes its tiles as pretty JSON.
pub fn run_generate<S, W>(
    store: &S,
    config: &GameConfig,
    difficulty: Difficulty,
    mut output: W,
) -> Result<(), AppError>
where
    S: TermStore,
    W: Write,
{
    let generator = game_factory::generator(store, config);
    let puzzle = block_on(generator.generate(&config.groups, difficulty))?;
    serde_json::to_writer_pretty(&mut output, puzzle.tiles())?;
    writeln!(output)?;
    Ok(())
}

/// Answers one request built from `key=value` parameters.
///
/// Writes the status code on the first line and the JSON body after it.
pub fn run_request<S, W>(
    store: &S,
    config: &GameConfig,
    method: &str,
    params: &[String],
    mut output: W,
) -> Result<(), AppError>
where
    S: TermStore,
    W: Write,
{
    let query = params
        .iter()
        .map(|param| {
            param
                .split_once('=')
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .ok_or_else(|| AppError::InvalidParameter {
                    text: param.clone(),
                })
        })
        .collect::<Result<_, _>>()?;
    let request = Request {
        method: method.to_ascii_uppercase(),
        query,
    };
    let response = block_on(api::handle(&request, store, config.max_attempts));
    writeln!(output, "{}", response.status)?;
    serde_json::to_writer_pretty(&mut output, &response.body)?;
    writeln!(output)?;
    Ok(())
}
