pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Turns a free-form label into a color token name: trimmed, lowercase,
/// whitespace runs joined with `-`.
pub fn slugify_color_name(raw: &str) -> Option<String> {
    let slug = raw
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

/// Normalizes the many ways a font family gets typed into one display form.
///
/// `"'roboto_mono'"`, `"Roboto-Mono"` and `"ROBOTO MONO"` all become
/// `"Roboto Mono"`. Blank input falls back to [`DEFAULT_FONT_FAMILY`].
pub fn normalize_font_family(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_FONT_FAMILY.to_string();
    }

    let unquoted = strip_matching_quotes(trimmed);
    unquoted
        .replace(['-', '_'], " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_matching_quotes(value: &str) -> &str {
    let mut chars = value.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return value;
    };
    let is_quote = |c: char| c == '"' || c == '\'';
    if is_quote(first) && is_quote(last) && value.len() > 2 {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
