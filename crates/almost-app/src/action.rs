use std::mem;

use almost_core::TileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    ToggleTile(TileId),
    Submit,
    DeselectAll,
    Shuffle,
    Hint,
    Solve,
    NewGame,
    CycleDifficulty,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub(crate) enum CommandError {
    #[display("unknown command `{command}`, type `help` for the list")]
    Unknown { command: String },
    #[display("`t` needs at least one tile number")]
    MissingTile,
    #[display("`{text}` is not a tile number")]
    InvalidTile { text: String },
}

pub(crate) const HELP: &str = "\
commands:
  t <n>...     select or deselect tiles by number
  submit       submit the selection          (s)
  clear        deselect all but hinted tiles (c)
  shuffle      shuffle the board
  hint         select half of the largest unsolved group
  solve        reveal the answers
  new          start a new game
  difficulty   cycle easy/medium/hard and start a new game (d)
  quit         leave                         (q)";

/// Parses one line of input into the actions it requests, in order.
///
/// A blank line requests nothing.
pub(crate) fn parse_line(line: &str) -> Result<Vec<Action>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Vec::new());
    };

    let action = match command.to_ascii_lowercase().as_str() {
        "t" | "toggle" => {
            let ids = words
                .map(|word| {
                    word.parse::<usize>()
                        .map(|n| Action::ToggleTile(TileId::new(n)))
                        .map_err(|_| CommandError::InvalidTile {
                            text: word.to_owned(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if ids.is_empty() {
                return Err(CommandError::MissingTile);
            }
            return Ok(ids);
        }
        "s" | "submit" => Action::Submit,
        "c" | "clear" => Action::DeselectAll,
        "shuffle" => Action::Shuffle,
        "hint" => Action::Hint,
        "solve" => Action::Solve,
        "new" => Action::NewGame,
        "d" | "difficulty" => Action::CycleDifficulty,
        "h" | "help" | "?" => Action::Help,
        "q" | "quit" | "exit" => Action::Quit,
        _ => {
            return Err(CommandError::Unknown {
                command: command.to_owned(),
            });
        }
    };
    Ok(vec![action])
}

#[derive(Debug, Default)]
pub(crate) struct ActionRequestQueue {
    actions: Vec<Action>,
}

impl ActionRequestQueue {
    pub(crate) fn extend(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.actions.extend(actions);
    }

    pub(crate) fn take_all(&mut self) -> Vec<Action> {
        mem::take(&mut self.actions)
    }
}
