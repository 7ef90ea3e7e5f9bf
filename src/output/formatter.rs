use std::io::IsTerminal;
use owo_colors::OwoColorize;
use serde_json::{json, Map, Value};
use terminal_size::{Width, terminal_size};

use crate::normalize::current_column;
use crate::registry::{Position, MAX_ATTRIBUTE_VALUE};
use crate::report::DISPLAY_COLUMNS;
use crate::scoring::{PositionScore, ScoreKey, ScoredRecord};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals; "-" when it isn't a number
pub fn format_score(score: f64) -> String {
    if score.is_finite() {
        format!("{:.2}", score)
    } else {
        "-".to_string()
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format players as a ranked table with columns: Index, Score, Name, Position, Club
/// No headers (minimal format)
/// Score column is right-aligned, 6 chars wide (fits "20.00")
pub fn format_ranked_table(rows: &[&ScoredRecord], key: ScoreKey, use_colors: bool) -> String {
    if rows.is_empty() {
        return "No players found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 4;
    let score_width = 6;
    let separator = "  ";

    rows.iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>3}.", idx + 1);
            let score_padded = format!("{:>width$}", format_score(scored.value(key)), width = score_width);
            let position = scored.record.display("Position");
            let club = scored.record.display("Club");

            let fixed_width = index_width
                + 1
                + score_width
                + separator.len() * 3
                + position.chars().count()
                + club.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(scored.record.name(), width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate_name(scored.record.name(), 20),
                // No terminal (pipe), don't truncate
                None => scored.record.name().to_string(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name,
                    separator,
                    position.cyan(),
                    separator,
                    club.yellow()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_padded, separator, name, separator, position, separator, club
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format players as tab-separated values for scripting
/// Columns: score, name, position, club (no headers, no colors)
pub fn format_tsv(rows: &[&ScoredRecord], key: ScoreKey) -> String {
    rows.iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{}",
                format_score(scored.value(key)),
                scored.record.name(),
                scored.record.display("Position"),
                scored.record.display("Club")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn number_or_null(value: Option<f64>) -> Value {
    value
        .filter(|v| v.is_finite())
        .map_or(Value::Null, |v| json!(v))
}

/// One JSON object per player: display fields, `<code>_Current` values,
/// `<Position>_Score` values and `Current_Score`. Missing numbers are null.
pub fn scored_to_json(scored: &ScoredRecord) -> Value {
    let mut object = Map::new();
    for column in DISPLAY_COLUMNS {
        object.insert(column.to_string(), json!(scored.record.display(column)));
    }
    for (code, current) in scored.record.current_values() {
        object.insert(current_column(code), number_or_null(current));
    }
    for position in Position::ALL {
        object.insert(position.score_column(), number_or_null(Some(scored.score(position))));
    }
    object.insert("Current_Score".to_string(), number_or_null(Some(scored.current_score)));
    Value::Object(object)
}

pub fn format_json(rows: &[&ScoredRecord]) -> String {
    let array = Value::Array(rows.iter().map(|s| scored_to_json(s)).collect());
    serde_json::to_string_pretty(&array).unwrap_or_else(|_| "[]".to_string())
}

/// Multi-line breakdown of one position score
pub fn format_breakdown(name: &str, explained: &PositionScore, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let heading = format!(
        "{} {}: {}",
        name,
        explained.position.score_column(),
        format_score(explained.score)
    );
    lines.push(if use_colors {
        heading.bold().to_string()
    } else {
        heading
    });

    for c in &explained.breakdown {
        let current = c.current.map_or("-".to_string(), |v| format!("{}", v));
        let mut line = format!(
            "  {:<4} {:>5} x {:<5} = {:>6.3}",
            c.code, current, c.weight, c.contribution
        );
        if !c.registered {
            let note = "  (not a known attribute, ignored)";
            if use_colors {
                line.push_str(&note.dimmed().to_string());
            } else {
                line.push_str(note);
            }
        }
        lines.push(line);
    }

    lines.push(format!(
        "  raw {:.3} / max {:.3} x {} = {}",
        explained.raw,
        explained.max_possible,
        MAX_ATTRIBUTE_VALUE,
        format_score(explained.score)
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizedRecord;
    use crate::registry::AttributeRegistry;
    use crate::scoring::{explain_position, score_records, GeneralWeighting};

    fn sample() -> Vec<ScoredRecord> {
        let registry = AttributeRegistry::builtin();
        let rows = vec![
            NormalizedRecord::from_current([("Pas", Some(15.0)), ("Tck", None)])
                .with_field("Name", "Ana Silva")
                .with_field("Position", "D (C)")
                .with_field("Club", "Porto"),
            NormalizedRecord::from_current([("Pas", Some(10.0))])
                .with_field("Name", "Ben Ode")
                .with_field("Position", "DM")
                .with_field("Club", ""),
        ];
        score_records(rows, &registry, GeneralWeighting::default())
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(13.056), "13.06");
        assert_eq!(format_score(f64::NAN), "-");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 10), "Short");
        assert_eq!(truncate_name("A very long player name", 10), "A very ...");
        assert_eq!(truncate_name("Éléonore", 3), "Élé");
    }

    #[test]
    fn test_ranked_table_empty() {
        assert_eq!(format_ranked_table(&[], ScoreKey::Current, false), "No players found.");
    }

    #[test]
    fn test_ranked_table_plain() {
        let rows = sample();
        let refs: Vec<_> = rows.iter().collect();
        let out = format_ranked_table(&refs, ScoreKey::Position(Position::BPD), false);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1.   1.80"));
        assert!(lines[0].contains("Ana Silva"));
        assert!(lines[0].contains("Porto"));
        assert!(lines[1].contains("Not Available"));
    }

    #[test]
    fn test_tsv() {
        let rows = sample();
        let refs: Vec<_> = rows.iter().collect();
        let out = format_tsv(&refs, ScoreKey::Position(Position::DM));
        assert_eq!(out.lines().next().unwrap(), "1.80\tAna Silva\tD (C)\tPorto");
    }

    #[test]
    fn test_json_nulls_missing() {
        let rows = sample();
        let value = scored_to_json(&rows[0]);
        assert_eq!(value["Name"], "Ana Silva");
        assert_eq!(value["Pas_Current"], 15.0);
        assert!(value["Tck_Current"].is_null());
        assert_eq!(value["Wage"], "Not Available");
        assert!(value["BPD_Score"].is_number());
        assert!(value["Current_Score"].is_number());
    }

    #[test]
    fn test_breakdown_marks_unknown_codes() {
        let rows = sample();
        let registry = AttributeRegistry::builtin();
        let explained = explain_position(&rows[0].record, Position::CF, &registry);
        let out = format_breakdown("Ana Silva", &explained, false);
        assert!(out.starts_with("Ana Silva CF_Score: 0.75"));
        assert!(out.contains("OtB"));
        assert!(out.contains("(not a known attribute, ignored)"));
        assert!(out.contains("raw 0.750 / max 20.000"));
    }
}
