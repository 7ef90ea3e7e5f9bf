// HTML helpers for scouting exports: table extraction on top of `scraper`'s
// parsed tree, plus escaping for the report.

use scraper::{ElementRef, Html};

fn is_named(element: &ElementRef<'_>, name: &str) -> bool {
    element.value().name().eq_ignore_ascii_case(name)
}

/// First `<table>` element in document order.
///
/// Comments and `<script>` text are never elements, so a table mentioned
/// there is not picked up.
pub fn first_table(document: &Html) -> Option<ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| is_named(e, "table"))
}

/// The nearest enclosing `<table>` of an element.
fn owning_table<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| is_named(e, "table"))
}

/// Rows of `table` as cell text, skipping rows of nested tables.
pub fn rows(table: ElementRef<'_>) -> Vec<Vec<String>> {
    table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| is_named(e, "tr"))
        .filter(|tr| owning_table(tr).is_some_and(|t| t.id() == table.id()))
        .map(|tr| cells(tr).into_iter().map(cell_text).collect())
        .collect()
}

/// Cell elements (`<th>` or `<td>`) of one row, in document order.
pub fn cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| is_named(e, "th") || is_named(e, "td"))
        .collect()
}

/// Visible text of a cell with whitespace collapsed. Entities are already
/// decoded by the parser.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    normalize_ws(&cell.text().collect::<String>())
}

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
