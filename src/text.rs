//! String conventions shared by the spreadsheet parser and the renderers.

/// Words kept lowercase in title case unless they open or close the title.
const SMALL_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "nor",
    "of", "on", "or", "per", "the", "to", "v", "vs", "via",
];

/// Splits a delimited cell into trimmed entries. A blank cell yields an
/// empty list rather than a single empty entry.
pub fn split_list(text: &str, separator: char) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(separator)
        .map(|part| part.trim().to_string())
        .collect()
}

/// Returns the initials of a name: `"Jean Pierre"` becomes `"J. P."`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .map(|letter| format!("{letter}."))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins author names with `", "` separators and `" & "` before the final
/// name.
pub fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} & {}", init.join(", "), last),
    }
}

/// Converts a title to NYT-style title case.
///
/// All-caps words are treated as acronyms and kept, as are words with
/// interior capitals. Small words stay lowercase except in the first or
/// last position.
pub fn title_case(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let last = words.len().saturating_sub(1);
    words
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            if is_acronym(word) || has_interior_capital(word) {
                (*word).to_string()
            } else if idx != 0 && idx != last && is_small_word(word) {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Applies the uppercase-fix rule to a title.
///
/// A title whose letters are entirely lowercase is rewritten to title case,
/// as is a title more than `threshold` percent uppercase. The comparison is
/// strict, so a title at exactly the threshold is left alone, and the
/// percentage is taken over the whole string length. Shouted titles survive
/// the rewrite unchanged because [`title_case`] preserves all-caps words.
pub fn normalize_title(text: &str, threshold: f64) -> String {
    let total = text.chars().count();
    if total == 0 {
        return String::new();
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    let percent = 100.0 * upper as f64 / total as f64;
    if upper == 0 || percent > threshold {
        title_case(text)
    } else {
        text.to_string()
    }
}

fn is_acronym(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

fn has_interior_capital(word: &str) -> bool {
    word.chars().skip(1).any(char::is_uppercase)
}

fn is_small_word(word: &str) -> bool {
    let stripped: String = word
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    SMALL_WORDS.contains(&stripped.as_str())
}

fn capitalize(word: &str) -> String {
    let mut done = false;
    word.chars()
        .map(|c| {
            if !done && c.is_alphabetic() {
                done = true;
                c.to_uppercase().to_string()
            } else {
                c.to_lowercase().to_string()
            }
        })
        .collect()
}
