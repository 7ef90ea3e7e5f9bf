use crate::registry::Position;
use crate::scoring::ScoredRecord;
use crate::table::html::escape;

/// `id` of the rendered table; the DataTables hook looks it up.
pub const TABLE_ID: &str = "player_table";

const DATATABLES_CSS: &str = "https://cdn.datatables.net/1.10.22/css/jquery.dataTables.css";
const JQUERY_JS: &str = "https://code.jquery.com/jquery-3.5.1.js";
const DATATABLES_JS: &str = "https://cdn.datatables.net/1.10.22/js/jquery.dataTables.js";

// Rows arrive pre-sorted, so default ordering and paging are both off.
const DATATABLES_INIT: &str = r#"<script>
$(document).ready(function () {
    $('#player_table').DataTable({
        "paging": false,
        "columnDefs": [{
            "targets": "_all",
            "render": function (data, type, row) {
                return data === 'NaN' || data === null ? '' : data;
            }
        }],
        "order": []
    });
});
</script>"#;

/// Score cell text: full precision so client-side sorting stays exact,
/// blank when not finite.
pub fn format_score_cell(score: f64) -> String {
    if score.is_finite() {
        format!("{}", score)
    } else {
        String::new()
    }
}

fn head(title: &str) -> String {
    [
        "<head>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        format!("<title>{}</title>", escape(title)),
        format!("<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">", DATATABLES_CSS),
        format!("<script type=\"text/javascript\" charset=\"utf8\" src=\"{}\"></script>", JQUERY_JS),
        format!("<script type=\"text/javascript\" charset=\"utf8\" src=\"{}\"></script>", DATATABLES_JS),
        "</head>".to_string(),
    ]
    .join("\n")
}

fn header_row(display_columns: &[&str], positions: &[Position]) -> String {
    let cells: String = display_columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape(c)))
        .chain(positions.iter().map(|p| format!("<th>{}</th>", p.score_column())))
        .collect();
    format!("<tr>{}</tr>", cells)
}

fn body_row(row: &ScoredRecord, display_columns: &[&str], positions: &[Position]) -> String {
    let cells: String = display_columns
        .iter()
        .map(|c| format!("<td>{}</td>", escape(row.record.display(c))))
        .chain(
            positions
                .iter()
                .map(|p| format!("<td>{}</td>", format_score_cell(row.score(*p)))),
        )
        .collect();
    format!("<tr>{}</tr>", cells)
}

/// Render the complete report document.
pub fn render(rows: &[ScoredRecord], display_columns: &[&str], positions: &[Position], title: &str) -> String {
    let mut out = String::with_capacity(1024 + rows.len() * 512);

    out.push_str("<!DOCTYPE html>\n<html>\n");
    out.push_str(&head(title));
    out.push_str("\n<body>\n");

    out.push_str(&format!("<table id=\"{}\" class=\"display\">\n", TABLE_ID));
    out.push_str("<thead>\n");
    out.push_str(&header_row(display_columns, positions));
    out.push_str("\n</thead>\n<tbody>\n");
    for row in rows {
        out.push_str(&body_row(row, display_columns, positions));
        out.push('\n');
    }
    out.push_str("</tbody>\n</table>\n");

    out.push_str(DATATABLES_INIT);
    out.push_str("\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizedRecord;
    use std::collections::BTreeMap;

    fn scored(name: &str, score: f64) -> ScoredRecord {
        let scores: BTreeMap<Position, f64> = Position::ALL.iter().map(|p| (*p, score)).collect();
        ScoredRecord {
            record: NormalizedRecord::default().with_field("Name", name),
            scores,
            current_score: 0.0,
        }
    }

    #[test]
    fn test_format_score_cell() {
        assert_eq!(format_score_cell(13.06), "13.06");
        assert_eq!(format_score_cell(0.0), "0");
        assert_eq!(format_score_cell(9.104999), "9.104999");
        // close scores stay distinct so the table re-sorts them correctly
        assert_ne!(format_score_cell(10.771), format_score_cell(10.774));
        assert_eq!(format_score_cell(f64::NAN), "");
        assert_eq!(format_score_cell(f64::INFINITY), "");
    }

    #[test]
    fn test_render_header_and_rows() {
        let rows = vec![scored("A & B", 12.5)];
        let html = render(&rows, &["Name", "Club"], &[Position::BPD, Position::GK], "Scouting");
        assert!(html.contains("<table id=\"player_table\" class=\"display\">"));
        assert!(html.contains("<tr><th>Name</th><th>Club</th><th>BPD_Score</th><th>GK_Score</th></tr>"));
        assert!(html.contains(
            "<tr><td>A &amp; B</td><td>Not Available</td><td>12.5</td><td>12.5</td></tr>"
        ));
        assert!(html.contains("<title>Scouting</title>"));
        assert!(html.contains("\"paging\": false"));
        assert!(html.contains("\"order\": []"));
    }

    #[test]
    fn test_nan_rendered_blank() {
        let rows = vec![scored("A", f64::NAN)];
        let html = render(&rows, &["Name"], &[Position::CF], "t");
        assert!(html.contains("<tr><td>A</td><td></td></tr>"));
        assert!(!html.contains(">NaN<"));
    }
}
