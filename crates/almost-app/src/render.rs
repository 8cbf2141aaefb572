use std::fmt::Write as _;

use almost_core::TileId;
use almost_game::Round;

use crate::{config::Layout, state::AppState};

fn cell(round: &Round, id: TileId) -> Option<String> {
    let tile = round.tile(id)?;
    let mark = if round.is_hinted(id) {
        "+"
    } else if round.is_selected(id) {
        "*"
    } else {
        ""
    };
    Some(format!("{:>2} {}{mark}", id.index(), tile.term))
}

// Pads to `width` characters, not bytes.
fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{cell}{}", " ".repeat(fill))
}

fn solved_groups(round: &Round, out: &mut String) {
    for group_index in round.solved_groups() {
        let ids = round.solved_group(group_index);
        let Some(first) = ids.first().and_then(|&id| round.tile(id)) else {
            continue;
        };
        let terms: Vec<&str> = ids
            .iter()
            .filter_map(|&id| round.tile(id))
            .map(|tile| tile.term.as_str())
            .collect();
        let _ = writeln!(
            out,
            "  = {} ({}): {}",
            first.category,
            first.group_size,
            terms.join(", ")
        );
    }
}

/// Renders the board and status line in the configured layout.
///
/// Selected tiles are marked `*` and hinted tiles `+`.
#[must_use]
pub(crate) fn board(state: &AppState) -> String {
    let round = &state.round;
    let mut out = String::new();
    solved_groups(round, &mut out);

    let cells: Vec<String> = state
        .order()
        .into_iter()
        .filter_map(|id| cell(round, id))
        .collect();
    match state.config.layout {
        Layout::Compact => {
            let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
            for row in cells.chunks(round.spec().max_size()) {
                let row: Vec<String> = row.iter().map(|c| pad(c, width)).collect();
                let _ = writeln!(out, "  {}", row.join("  ").trim_end());
            }
        }
        Layout::Spacious => {
            for c in &cells {
                let _ = writeln!(out, "  {c}");
            }
        }
    }

    let _ = write!(
        out,
        "mistakes {}/{} | {} | selected {}",
        round.mistakes_made(),
        round.mistakes_allowed(),
        state.difficulty,
        round.selection_len()
    );
    out
}
