//! Presentation helpers. Pure string transforms, no invariants.

/// Prefix an id for human-facing copy, e.g. `"LEAD #2KX4H9M7A"`.
///
/// Without a prefix the id passes through unchanged.
pub fn format_display_id(id: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(p) => format!("{p} #{id}"),
        None => id.to_string(),
    }
}

/// Group an id into dash-separated chunks of three, e.g. `"2KX-4H9-M7A"`.
///
/// Applies to any string of six or more characters, not only well-formed
/// ids; shorter strings pass through untouched. The optional prefix is
/// applied after grouping.
pub fn format_display_id_for_ui(id: &str, prefix: Option<&str>) -> String {
    if id.is_empty() {
        return String::new();
    }
    let grouped = if id.chars().count() >= 6 {
        id.chars()
            .collect::<Vec<_>>()
            .chunks(3)
            .map(|chunk| chunk.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("-")
    } else {
        id.to_string()
    };
    format_display_id(&grouped, prefix)
}

/// Undo UI grouping: strip dashes and uppercase.
///
/// The inverse of the grouping transform only; prefixes are not stripped.
pub fn unformat_display_id(formatted: &str) -> String {
    formatted
        .chars()
        .filter(|&c| c != '-')
        .collect::<String>()
        .to_uppercase()
}
