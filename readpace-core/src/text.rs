//! Text normalization and word counting

use once_cell::sync::Lazy;
use regex::Regex;

/// Two newlines mark a paragraph boundary
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

static RE_HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Normalize raw prose before chunking.
///
/// Collapses space/tab runs and trims every line, folds curly quotes to
/// straight ones, caps blank-line runs at one empty line and trims the
/// result. `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    fold_quotes(&clean_whitespace(raw))
}

/// Whitespace half of [`normalize`], without quote folding
pub fn clean_whitespace(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    let lines: Vec<String> = unified
        .split('\n')
        .map(|line| {
            RE_HORIZONTAL_WS
                .replace_all(line.trim_matches(is_blank), " ")
                .into_owned()
        })
        .collect();
    let joined = lines.join("\n");

    RE_BLANK_RUNS
        .replace_all(&joined, PARAGRAPH_SEPARATOR)
        .trim()
        .to_string()
}

/// Replace typographic quotes with their ASCII forms
pub fn fold_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
            other => other,
        })
        .collect()
}

/// Number of whitespace-delimited tokens
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Non-empty, trimmed paragraphs in document order
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
}
