// 🧾 Result Formatting - text rendering for arbitrary query results

use rusqlite::types::ValueRef;

/// Column separator used for both header and rows
pub const COLUMN_SEPARATOR: &str = " | ";

/// Printed instead of a table or scalar when the query returned no rows
pub const NO_DATA: &str = "No data";

/// Display text for a single SQL value
pub fn display_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => display_real(f),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

/// Shortest round-trip form, keeping a fractional part so REAL columns
/// stay distinguishable from INTEGER ones (790.0, not 790).
fn display_real(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

/// Header line, dash separator of the same width, then one line per row.
/// Each line ends with '\n'.
pub fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let header = columns.join(COLUMN_SEPARATOR);
    let mut output = String::new();

    output.push_str(&header);
    output.push('\n');
    output.push_str(&"-".repeat(header.chars().count()));
    output.push('\n');

    for row in rows {
        output.push_str(&row.join(COLUMN_SEPARATOR));
        output.push('\n');
    }

    output
}
