pub const DEFAULT_LABEL_MAX_CHARS: usize = 40;

/// Turn the prose in front of an amount into a short chart label.
pub fn normalize_label(raw: &str) -> String {
    normalize_label_with(raw, DEFAULT_LABEL_MAX_CHARS)
}

pub fn normalize_label_with(raw: &str, max_chars: usize) -> String {
    let unmarked: String = raw.chars().filter(|&c| !is_markup(c)).collect();
    let stripped = unmarked.trim_start_matches(is_leading_noise);
    // The segment nearest the amount is the most specific one.
    let segment = stripped
        .rsplit(|c: char| c == ',' || c == ';')
        .next()
        .unwrap_or(stripped)
        .trim_start_matches(is_leading_noise)
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '='));
    keep_trailing(segment, max_chars)
}

fn is_markup(c: char) -> bool {
    matches!(c, '*' | '_' | '`' | '#')
}

fn is_leading_noise(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation()
}

/// Keep the last `max_chars` characters, minus the partial word the cut lands in.
fn keep_trailing(label: &str, max_chars: usize) -> String {
    let count = label.chars().count();
    if count <= max_chars {
        return label.to_string();
    }
    let tail: String = label.chars().skip(count - max_chars).collect();
    match tail.find(' ') {
        Some(idx) => tail[idx + 1..].trim_start().to_string(),
        None => tail,
    }
}
