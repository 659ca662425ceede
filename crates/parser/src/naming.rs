//! Identifier conversion for generated Go names

/// Convert a snake_case proto identifier to an exported Go name
///
/// Each underscore-separated segment is title-cased and the segments are
/// concatenated. A letter following a non-letter (digit, start of segment)
/// starts a new word and is upper-cased; every other letter is lower-cased. A trailing `Id` is
/// rewritten to `ID`, following Go initialism conventions.
///
/// # Examples
/// ```
/// use protogo_parser::to_exported_name;
///
/// assert_eq!(to_exported_name("user_id"), "UserID");
/// assert_eq!(to_exported_name("created_at"), "CreatedAt");
/// ```
pub fn to_exported_name(snake_name: &str) -> String {
    let name = title_case_segments(snake_name);
    match name.strip_suffix("Id") {
        Some(stem) => format!("{stem}ID"),
        None => name,
    }
}

/// Title-case each `_`-separated segment and join them
fn title_case_segments(snake_name: &str) -> String {
    snake_name.split('_').map(title_case).collect()
}

fn title_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut prev_cased = false;
    for ch in segment.chars() {
        if prev_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_cased = ch.is_lowercase() || ch.is_uppercase();
    }
    out
}
