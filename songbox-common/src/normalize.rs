//! Title normalization
//!
//! Two suggestions are the same song when their normalized keys match. The
//! key ignores case, punctuation and word order, so "Hey Jude" and
//! "jude, hey!" collide.

/// Map a raw song title to its comparison key.
///
/// Lower-cases the title, drops every character that is neither a word
/// character (alphanumeric or `_`) nor whitespace, then sorts the remaining
/// words and joins them with single spaces.
///
/// A title made only of punctuation yields the empty key.
pub fn normalize_title(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect();

    let mut words: Vec<&str> = cleaned.split_whitespace().collect();
    words.sort_unstable();
    words.join(" ")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
