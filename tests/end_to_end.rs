use std::env;
use std::fs;
use std::path::PathBuf;

use fm_scout::config::Config;
use fm_scout::pipeline::{load_and_score, score_table, setup_scoring, ScoringSetup};
use fm_scout::registry::Position;
use fm_scout::report::html::format_score_cell;
use fm_scout::report::{assemble, write_report, DISPLAY_COLUMNS};
use fm_scout::scoring::{ScoreKey, ScoringConfig};
use fm_scout::table::{parse_table, InputError};

const ATTRIBUTES: [&str; 9] = ["Pas", "Pos", "Mar", "Tck", "Ant", "Vis", "Dec", "Str", "Cmp"];

/// Build an export with every display column plus `ATTRIBUTES`.
fn export(players: &[(&str, &str, [&str; 9])]) -> String {
    let mut html = String::from("<html><body><h1>Shortlist</h1>\n<table>\n<tr>");
    for column in DISPLAY_COLUMNS.iter().chain(ATTRIBUTES.iter()) {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr>\n");
    for (name, club, attributes) in players {
        html.push_str(&format!(
            "<tr><td>{}</td><td>D (C)</td><td>POR</td><td>24</td><td>{}</td>\
             <td>£1.2M</td><td>N/A</td><td>Balanced</td><td>Reserved</td>\
             <td>Weak</td><td>Very Strong</td>",
            name, club
        ));
        for value in attributes {
            html.push_str(&format!("<td>{}</td>", value));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n</body></html>\n");
    html
}

fn fixture() -> String {
    let tens = ["10"; 9];
    export(&[
        ("Ben Ode", "Braga", tens),
        ("Cai Tan", "", [""; 9]),
        (
            "Ana Silva",
            "Porto",
            ["12-16", "14", "15", "", "13", "12", "14", "13", "15"],
        ),
        ("Dee Two", "Benfica", tens),
    ])
}

fn default_setup() -> ScoringSetup {
    setup_scoring(&ScoringConfig::default(), None, false).unwrap()
}

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_report_sorted_by_bpd_with_stable_ties() {
    let path = temp_file("fm_scout_e2e_export.html", &fixture());
    let rows = load_and_score(&path, &default_setup()).unwrap();
    let ana_bpd = rows[2].score(Position::BPD);
    let ben_bpd = rows[0].score(Position::BPD);
    assert!((ana_bpd - 10.77).abs() < 1e-9);
    assert!((ben_bpd - 9.1).abs() < 1e-9);
    let html = assemble(rows, Config::default().title());

    let position = |name: &str| html.find(&format!("<td>{}</td>", name)).unwrap();
    assert!(position("Ana Silva") < position("Ben Ode"));
    assert!(position("Ben Ode") < position("Dee Two"));
    assert!(position("Dee Two") < position("Cai Tan"));

    assert!(html.contains(&format!("<td>{}</td>", format_score_cell(ana_bpd))));
    assert!(html.contains(&format!("<td>{}</td>", format_score_cell(ben_bpd))));
    let _ = fs::remove_file(&path);
}

#[test]
fn test_range_and_blank_cells() {
    let table = parse_table(&fixture()).unwrap();
    let rows = score_table(&table, &default_setup()).unwrap();
    let ana = rows.iter().find(|r| r.record.name() == "Ana Silva").unwrap();

    assert_eq!(ana.record.current("Pas"), Some(12.0));
    assert_eq!(ana.record.current("Tck"), None);
    assert_eq!(ana.record.current_value("Tck"), 0.0);
    assert_eq!(ana.record.current("Str"), Some(13.0));
    // the raw cell text is kept alongside the parsed value
    assert_eq!(ana.record.get("Pas"), Some("12-16"));
}

#[test]
fn test_display_columns_never_blank() {
    let table = parse_table(&fixture()).unwrap();
    let rows = score_table(&table, &default_setup()).unwrap();
    for row in &rows {
        for column in DISPLAY_COLUMNS {
            assert!(!row.record.display(column).trim().is_empty(), "{} blank", column);
        }
    }
    let cai = rows.iter().find(|r| r.record.name() == "Cai Tan").unwrap();
    assert_eq!(cai.record.display("Club"), "Not Available");
    assert_eq!(cai.record.display("Wage"), "Not Available");
    assert_eq!(cai.score(Position::BPD), 0.0);
}

#[test]
fn test_iwd_regression_through_html() {
    let columns = ["Pas", "Dri", "Tck", "Sta", "Ant", "Pos", "Dec", "Wor", "Tec", "Agi"];
    let values = ["15", "12", "10", "16", "13", "14", "12", "11", "13", "14"];
    let mut html = String::from("<table><tr>");
    for column in DISPLAY_COLUMNS.iter().chain(columns.iter()) {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr><tr>");
    for _ in DISPLAY_COLUMNS {
        html.push_str("<td>x</td>");
    }
    for value in values {
        html.push_str(&format!("<td>{}</td>", value));
    }
    html.push_str("</tr></table>");

    let rows = score_table(&parse_table(&html).unwrap(), &default_setup()).unwrap();
    let iwd = rows[0].value(ScoreKey::Position(Position::IWD));
    assert!((iwd - 13.06).abs() < 1e-9, "IWD_Score was {}", iwd);
}

#[test]
fn test_missing_display_column_is_malformed_input() {
    let html = "<table><tr><th>Name</th><th>Pas</th></tr><tr><td>A</td><td>1</td></tr></table>";
    let err = score_table(&parse_table(html).unwrap(), &default_setup()).unwrap_err();
    assert!(matches!(err, InputError::MissingColumns(_)));
    let message = err.to_string();
    assert!(message.contains("Position"));
    assert!(message.contains("Right Foot"));
}

#[test]
fn test_no_table_and_missing_file() {
    assert!(matches!(
        parse_table("<html><body>nothing here</body></html>"),
        Err(InputError::NoTable)
    ));
    let missing = env::temp_dir().join("fm_scout_e2e_does_not_exist.html");
    let _ = fs::remove_file(&missing);
    assert!(matches!(
        load_and_score(&missing, &default_setup()),
        Err(InputError::Io { .. })
    ));
}

#[test]
fn test_config_override_changes_only_that_position() {
    let yaml = "\
scoring:
  weights:
    DM:
      Pas: 1.0
";
    let config: Config = serde_saphyr::from_str(yaml).unwrap();
    let setup = setup_scoring(&config.scoring.unwrap(), None, false).unwrap();
    let table = parse_table(&fixture()).unwrap();

    let custom = score_table(&table, &setup).unwrap();
    let builtin = score_table(&table, &default_setup()).unwrap();

    // Ben: Pas 10 * 1.0 over the unchanged CF denominator of 20
    assert!((custom[0].score(Position::DM) - 10.0).abs() < 1e-9);
    assert_eq!(custom[0].score(Position::BPD), builtin[0].score(Position::BPD));
}

#[test]
fn test_report_file_written() {
    let input = temp_file("fm_scout_e2e_report_input.html", &fixture());
    let output = env::temp_dir()
        .join("fm_scout_e2e_out")
        .join("scouting.html");
    let _ = fs::remove_file(&output);

    let rows = load_and_score(&input, &default_setup()).unwrap();
    write_report(&output, &assemble(rows, "Shortlist")).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("<title>Shortlist</title>"));
    assert!(written.contains("id=\"player_table\""));
    assert_eq!(written.matches("<tr>").count(), 5);

    let _ = fs::remove_file(&input);
    let _ = fs::remove_file(&output);
}

#[test]
fn test_decoy_tables_before_export_are_skipped() {
    let decoys = "<html><head><script>var tpl = '<table><tr><td>x</td></tr></table>';</script></head>\
                  <body><!-- <table><tr><th>Old</th></tr></table> -->";
    let document = fixture().replacen("<html><body>", decoys, 1);
    let rows = score_table(&parse_table(&document).unwrap(), &default_setup()).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].record.name(), "Ben Ode");
}
