use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::chart::Difficulty;
use crate::play::SessionState;
use crate::session::SessionResult;

/// Result summary for the terminal
pub fn format_result_console(result: &SessionResult) -> String {
    let mut output = String::new();
    let score = &result.score;

    let border: String = "━".repeat(40);
    let border_dim = border.dimmed();

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(
        output,
        "  {} [{}] {}",
        "RESULT".bold(),
        format_colored_difficulty(&result.difficulty),
        format_colored_state(&result.state)
    );
    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(
        output,
        "  HIT    : {}/{}",
        score.hits.green(),
        result.chart_objects
    );
    let _ = writeln!(output, "  MISS   : {}", score.misses.red());
    let _ = writeln!(output, "  STRAY  : {}", score.stray_inputs.yellow());
    let combo = if score.is_full_combo() && result.unresolved() == 0 {
        format!("{} {}", score.max_combo, "FULL COMBO".cyan())
    } else {
        score.max_combo.to_string()
    };
    let _ = writeln!(output, "  COMBO  : {}", combo);
    let _ = writeln!(output, "  ACC    : {:.2}%", score.accuracy() * 100.0);
    let _ = write!(output, "{}", border_dim);

    output
}

fn format_colored_difficulty(difficulty: &Difficulty) -> String {
    let name = difficulty.short_name();
    match difficulty {
        Difficulty::Easy => name.green().to_string(),
        Difficulty::Normal => name.blue().to_string(),
        Difficulty::Hard => name.red().to_string(),
    }
}

fn format_colored_state(state: &SessionState) -> String {
    let name = state.to_string();
    match state {
        SessionState::Completed => name.green().to_string(),
        SessionState::Cancelled => name.yellow().to_string(),
        _ => name.dimmed().to_string(),
    }
}
