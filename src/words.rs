use std::sync::OnceLock;

use regex::Regex;

fn word_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    // Runs of whitespace together with adjoining non-word punctuation count
    // as a single separator, so "end. Next" splits into two words.
    SEPARATOR.get_or_init(|| Regex::new(r"\W*\s+\W*").expect("word separator pattern is valid"))
}

/// Number of words in the rendered text of the tracked element.
///
/// Counts the pieces produced by splitting on the separator pattern. Text
/// with leading whitespace yields an empty leading piece which is counted,
/// and empty text counts as one word; both quirks are kept so estimated
/// reading speeds line up with the classic analytics snippets this feeds.
pub fn word_count(text: &str) -> usize {
    word_separator().split(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_plain_words() {
        assert_eq!(word_count("the quick brown fox"), 4);
    }

    #[test]
    fn punctuation_adjoining_whitespace_is_part_of_the_separator() {
        assert_eq!(word_count("end of sentence. Next one"), 5);
        assert_eq!(word_count("comma, separated, words"), 3);
    }

    #[test]
    fn leading_whitespace_yields_an_extra_piece() {
        assert_eq!(word_count(" two words"), 3);
    }

    #[test]
    fn empty_text_counts_as_one() {
        assert_eq!(word_count(""), 1);
    }

    #[test]
    fn single_word_without_whitespace() {
        assert_eq!(word_count("hello"), 1);
    }
}
