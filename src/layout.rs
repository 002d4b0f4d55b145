//! Greedy word-wrap for sector labels.

/// Wraps `text` into lines no wider than `max_width` as reported by `measure`.
///
/// Words are split on whitespace and re-joined with single spaces. A word that
/// is wider than `max_width` on its own still gets a line to itself; words are
/// never split. At least one line is always returned, even for blank text.
pub fn wrap_label<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    let mut line = String::new();
    // A non-positive (or NaN) width can never fit two words
    let one_word_per_line = max_width.is_nan() || max_width <= 0.0;

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if one_word_per_line || measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    lines.push(line);
    lines
}
