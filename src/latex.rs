//! LaTeX emission helpers: escaping, argument groups, and index keys.
//!
//! The renderers pass every piece of free text through [`escape`] before it
//! reaches an output document. The command vocabulary itself is owned by the
//! surrounding LaTeX templates; this module only guarantees the argument
//! values are safe to splice.

use unicode_normalization::UnicodeNormalization;

/// Escapes the characters LaTeX treats specially. Everything else,
/// including non-ASCII text, passes through for a UTF-8 engine.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '$' => out.push_str("\\$"),
            '&' => out.push_str("\\&"),
            '#' => out.push_str("\\#"),
            '^' => out.push_str("\\textasciicircum{}"),
            '_' => out.push_str("\\_"),
            '%' => out.push_str("\\%"),
            '~' => out.push_str("\\textasciitilde{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a positional argument list as brace groups: `{a}{b}{c}`.
/// Arguments are expected to be escaped already.
pub fn args<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for part in parts {
        out.push('{');
        out.push_str(part.as_ref());
        out.push('}');
    }
    out
}

/// Builds an accent-folded sort key for `\index{}` entries, e.g.
/// `"Müller"` + `"J."` becomes `"Muller, J."`.
pub fn index_key(surname: &str, initials: &str) -> String {
    fold_ascii(&format!("{surname}, {initials}"))
}

/// Strips accents by NFD decomposition, dropping combining marks and
/// replacing the handful of letters that do not decompose.
pub fn fold_ascii(text: &str) -> String {
    replace_special_chars(text)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Some characters like Ł, Ø, Æ are distinct letters rather than accented
/// variants, so NFD leaves them alone and they need explicit replacement.
fn replace_special_chars(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Ł' => 'L',
            'ł' => 'l',
            'Ø' => 'O',
            'ø' => 'o',
            'Æ' => 'A',
            'æ' => 'a',
            'Đ' => 'D',
            'đ' => 'd',
            'ß' => 's',
            'ı' => 'i',
            _ => c,
        })
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_special_characters() {
        assert_eq!(escape("A & B"), "A \\& B");
        assert_eq!(escape("95%"), "95\\%");
        assert_eq!(escape("x_1"), "x\\_1");
        assert_eq!(escape("#1 {ok}"), "\\#1 \\{ok\\}");
        assert_eq!(escape("Müller"), "Müller");
    }

    #[test]
    fn args_wraps_every_part() {
        assert_eq!(args(["a", "b", "c"]), "{a}{b}{c}");
        assert_eq!(args(Vec::<String>::new()), "");
    }

    #[test]
    fn index_key_folds_accents() {
        assert_eq!(index_key("Müller", "J."), "Muller, J.");
        assert_eq!(index_key("Łukasz", "A. B."), "Lukasz, A. B.");
        assert_eq!(index_key("García", "M."), "Garcia, M.");
    }
}
