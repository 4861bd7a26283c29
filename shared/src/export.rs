use crate::candidates::CANDIDATES;
use crate::tally::Tally;

/// Gate for the export button. Plaintext equality against a constant shipped
/// in the binary; anyone who reads the wasm can recover it. Kept because the
/// export is cosmetic, unacceptable for anything that needs real auth.
pub const ADMIN_PIN: &str = "1234";

pub const EXPORT_FILENAME: &str = "hasil-poling.csv";

pub fn pin_matches(input: &str) -> bool {
    input == ADMIN_PIN
}

/// Renders the current totals as CSV, one row per registry candidate in
/// registry order. Missing alias becomes an empty field.
pub fn render_csv(tally: &Tally) -> String {
    let mut out = String::from("candidate_id,name,alias,votes\n");
    for c in CANDIDATES {
        out.push_str(&csv_field(c.id));
        out.push(',');
        out.push_str(&csv_field(c.name));
        out.push(',');
        out.push_str(&csv_field(c.alias.unwrap_or("")));
        out.push(',');
        out.push_str(&tally.count(c.id).to_string());
        out.push('\n');
    }
    out
}

pub(crate) fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
