/// Split on single spaces; no other character is a delimiter.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// True when no character falls below `' '` (the control range).
pub fn is_valid_word(word: &str) -> bool {
    word.chars().all(|c| c >= ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_single_spaces() {
        assert_eq!(split_words("белый кот и модный ошейник").len(), 5);
        assert_eq!(split_words("quick brown fox"), vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn collapses_repeated_and_edge_spaces() {
        assert_eq!(split_words("  quick   brown fox "), vec!["quick", "brown", "fox"]);
        assert!(split_words("   ").is_empty());
        assert!(split_words("").is_empty());
    }

    #[test]
    fn only_space_is_a_delimiter() {
        // A tab is not a split point; it stays inside the word and is caught
        // later by validity checks.
        assert_eq!(split_words("quick\tbrown"), vec!["quick\tbrown"]);
    }

    #[test]
    fn control_characters_invalidate_a_word() {
        assert!(is_valid_word("quick"));
        assert!(is_valid_word("пушистый"));
        assert!(is_valid_word("dash-inside"));
        assert!(!is_valid_word("qu\tick"));
        assert!(!is_valid_word("\u{1}"));
        assert!(is_valid_word(""));
    }
}
