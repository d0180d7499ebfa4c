//! Export formats for session results.

mod console;

pub use console::format_result_console;

use serde_json::{Value as JsonValue, json};

use crate::session::SessionResult;

pub fn format_tsv_header() -> String {
    [
        "date",
        "difficulty",
        "state",
        "objects",
        "hits",
        "misses",
        "stray",
        "maxcombo",
        "accuracy",
    ]
    .join("\t")
}

pub fn format_tsv_row(result: &SessionResult) -> String {
    let score = &result.score;
    let values: Vec<String> = vec![
        result.finished_at.to_rfc3339(),
        result.difficulty.short_name().to_string(),
        result.state.to_string(),
        result.chart_objects.to_string(),
        score.hits.to_string(),
        score.misses.to_string(),
        score.stray_inputs.to_string(),
        score.max_combo.to_string(),
        format!("{:.4}", score.accuracy()),
    ];

    values.join("\t")
}

/// JSON entry for the session file
pub fn format_json_entry(result: &SessionResult) -> JsonValue {
    json!({
        "timeAchieved": result.finished_at.timestamp_millis(),
        "difficulty": result.difficulty.short_name(),
        "state": result.state.to_string(),
        "objects": result.chart_objects,
        "score": {
            "hits": result.score.hits,
            "misses": result.score.misses,
            "strayInputs": result.score.stray_inputs,
            "maxCombo": result.score.max_combo,
        },
        "accuracy": result.score.accuracy(),
        "fullCombo": result.score.is_full_combo(),
    })
}
