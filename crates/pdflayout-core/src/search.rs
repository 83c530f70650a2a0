//! Whole-word search over a page's glyph sequence.

use std::ops::Range;

use crate::options::SearchOptions;

fn same_letter(a: char, b: char, options: &SearchOptions) -> bool {
    a == b || (!options.case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}

/// Whether the glyph next to a match ends the word there.
fn is_word_boundary(neighbour: Option<&Option<char>>) -> bool {
    match neighbour {
        None | Some(None) => true,
        Some(Some(c)) => !c.is_alphanumeric(),
    }
}

/// Find every whole-word occurrence of `needle` in `text`.
///
/// `text` holds one entry per glyph; `None` marks a glyph without a Unicode
/// value, which never matches and always separates words. Matches may
/// overlap: the scan resumes one glyph after each match start. Returns the
/// glyph ranges in text order. An empty needle matches nothing.
///
/// # Example
///
/// ```
/// use pdflayout_core::{SearchOptions, find_words};
///
/// let text: Vec<Option<char>> = "GPIO gpio GPIOA".chars().map(Some).collect();
/// assert_eq!(find_words(&text, "GPIO", &SearchOptions::default()), vec![0..4]);
/// assert_eq!(find_words(&text, "GPIO", &SearchOptions::ignore_case()), vec![0..4, 5..9]);
/// ```
pub fn find_words(
    text: &[Option<char>],
    needle: &str,
    options: &SearchOptions,
) -> Vec<Range<usize>> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() || needle.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - needle.len())
        .filter(|&start| {
            let end = start + needle.len();
            text[start..end]
                .iter()
                .zip(&needle)
                .all(|(glyph, &n)| glyph.is_some_and(|g| same_letter(g, n, options)))
                && (start == 0 || is_word_boundary(text.get(start - 1)))
                && is_word_boundary(text.get(end))
        })
        .map(|start| start..start + needle.len())
        .collect()
}
