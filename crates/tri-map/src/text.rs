//! String normalization used for headers, join keys and display values.

/// Normalizes a raw header for prefix comparison: trimmed, separators
/// (space, dot, hyphen) replaced by `_`, lowercased.
pub fn clean_header(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '.' | '-' => '_',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// Join key for a facility name: lowercase ASCII alphanumerics only.
///
/// `"Jima-Town"` and `"jima town"` both become `"jimatown"`.
pub fn canonicalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Capitalizes the first letter of every word and lowercases the rest.
///
/// A word starts after any character that is not a letter, so
/// `"addis-ketema"` becomes `"Addis-Ketema"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for c in value.trim().chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}
