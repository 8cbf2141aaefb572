use almost_core::TileId;
use almost_game::RevealReason;

use crate::{
    action::{Action, ActionRequestQueue, HELP},
    messages,
    state::AppState,
};

/// Work the play loop has to do after a batch of actions.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ActionEffect {
    pub(crate) quit_requested: bool,
    pub(crate) new_game_requested: bool,
    pub(crate) reveal_requested: bool,
}

#[derive(Debug)]
struct ActionContext<'a> {
    app_state: &'a mut AppState,
    effect: &'a mut ActionEffect,
}

pub(crate) fn handle_all(
    app_state: &mut AppState,
    effect: &mut ActionEffect,
    action_queue: &mut ActionRequestQueue,
) {
    for action in action_queue.take_all() {
        if effect.quit_requested {
            break;
        }
        handle(app_state, effect, action);
    }
}

pub(crate) fn handle(app_state: &mut AppState, effect: &mut ActionEffect, action: Action) {
    let mut ctx = ActionContext { app_state, effect };

    match action {
        Action::ToggleTile(id) => ctx.toggle_tile(id),
        Action::Submit => ctx.submit(),
        Action::DeselectAll => {
            ctx.app_state.round.deselect_all();
        }
        Action::Shuffle => ctx.app_state.shuffle(),
        Action::Hint => ctx.hint(),
        Action::Solve => ctx.solve(),
        Action::NewGame => ctx.request_new_game(),
        Action::CycleDifficulty => {
            let difficulty = ctx.app_state.difficulty.next();
            ctx.app_state.difficulty = difficulty;
            ctx.app_state.notify(messages::difficulty(difficulty));
            ctx.request_new_game();
        }
        Action::Help => ctx.app_state.notify(HELP),
        Action::Quit => ctx.effect.quit_requested = true,
    }
}

impl ActionContext<'_> {
    fn toggle_tile(&mut self, id: TileId) {
        if let Err(err) = self.app_state.round.toggle_tile(id) {
            self.app_state.notify(messages::game_error(&err));
        }
    }

    fn submit(&mut self) {
        match self.app_state.round.submit() {
            Ok(evaluation) => {
                self.app_state.notify(messages::evaluation(evaluation));
                self.announce_phase();
            }
            Err(err) => self.app_state.notify(messages::game_error(&err)),
        }
    }

    fn hint(&mut self) {
        match self.app_state.round.hint() {
            Ok(ids) => {
                let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
                self.app_state
                    .notify(format!("These belong together: {}", ids.join(", ")));
            }
            Err(err) => self.app_state.notify(messages::game_error(&err)),
        }
    }

    fn solve(&mut self) {
        match self.app_state.round.start_reveal(RevealReason::GaveUp) {
            Ok(_) => self.announce_phase(),
            Err(err) => self.app_state.notify(messages::game_error(&err)),
        }
    }

    fn request_new_game(&mut self) {
        if self.app_state.round.phase().is_revealing() {
            self.app_state
                .notify(messages::game_error(&almost_game::GameError::RevealInProgress));
            return;
        }
        self.effect.new_game_requested = true;
    }

    fn announce_phase(&mut self) {
        let phase = self.app_state.round.phase();
        if let Some(banner) = messages::phase(phase) {
            self.app_state.notify(banner);
        }
        if phase.is_revealing() {
            self.effect.reveal_requested = true;
        }
    }
}
