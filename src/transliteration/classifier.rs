//! Per-word decision whether a token should stay in Latin script

use super::measurement::is_measurement_unit;
use super::word_lists::{ForeignWordLists, SERBIAN_WORD_LISTS};

/// Punctuation, quotes and brackets stripped from both ends of a word
/// before it is classified. Whitespace is stripped as well.
const EXCESSIVE_CHARACTERS: &[char] = &[
    '!', '?', ',', ':', ';', '.', '*', '-', '—', '~', '`', '\'', '"', '„', '”', '“', '‘', '’',
    '(', ')', '{', '}', '[', ']', '<', '>', '«', '»', '/', '\\',
];

fn is_excessive(c: char) -> bool {
    c.is_whitespace() || EXCESSIVE_CHARACTERS.contains(&c)
}

/// Strip leading and trailing whitespace and punctuation
pub fn trim_excessive_characters(word: &str) -> &str {
    word.trim_matches(is_excessive)
}

/// Byte length of the leading run removed by [`trim_excessive_characters`]
pub(crate) fn leading_excess_len(word: &str) -> usize {
    word.len() - word.trim_start_matches(is_excessive).len()
}

/// Rule-based classifier over [`ForeignWordLists`]
#[derive(Debug, Clone, Copy)]
pub struct ForeignWordClassifier {
    lists: ForeignWordLists,
}

impl Default for ForeignWordClassifier {
    fn default() -> Self {
        Self::new(SERBIAN_WORD_LISTS)
    }
}

impl ForeignWordClassifier {
    pub fn new(lists: ForeignWordLists) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> &ForeignWordLists {
        &self.lists
    }

    /// Decide whether `word` looks foreign and must be left untouched.
    ///
    /// The native exception check runs first so that Serbian words carrying
    /// foreign-looking clusters (`sbb`, `poddirektor`) are never flagged.
    pub fn looks_foreign(&self, word: &str) -> bool {
        let trimmed = trim_excessive_characters(word);
        if trimmed.is_empty() {
            return false;
        }
        let lowercase = trimmed.to_lowercase();

        if starts_with_any(&lowercase, self.lists.native_exceptions) {
            return false;
        }

        if self
            .lists
            .foreign_substrings
            .iter()
            .any(|needle| lowercase.contains(needle))
        {
            return true;
        }

        if starts_with_any(&lowercase, self.lists.foreign_prefixes) {
            return true;
        }

        if self.lists.whole_foreign_words.contains(&lowercase.as_str()) {
            return true;
        }

        is_measurement_unit(trimmed)
    }

    /// Length in bytes of a `foreign-` stem at the start of `token`,
    /// including any leading punctuation and the hyphen itself.
    ///
    /// `makeup-om` yields 7, so only `om` is transliterated.
    pub fn foreign_stem_len(&self, token: &str) -> Option<usize> {
        let trimmed = trim_excessive_characters(token);
        if trimmed.is_empty() {
            return None;
        }
        let lowercase = trimmed.to_lowercase();

        let stem = self.lists.whole_foreign_words.iter().find(|word| {
            lowercase
                .strip_prefix(**word)
                .is_some_and(|rest| rest.starts_with('-'))
        })?;

        let end = leading_excess_len(token) + stem.len() + 1;
        // Lowercasing can change byte lengths outside ASCII; only accept an
        // offset that lands on the same stem in the original token.
        token
            .get(..end)
            .filter(|head| head.to_lowercase().ends_with(&format!("{stem}-")))
            .map(|_| end)
    }
}

fn starts_with_any(word: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| word.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_trim_excessive_characters() {
        assert_eq!(
            trim_excessive_characters(
                "  !?:;.*-—~`'„”“”‘’(){}[]<>«»a!?:;.*-—~`'„”“”‘’()/\\"
            ),
            "a"
        );
        assert_eq!(trim_excessive_characters("(Dnevnik)."), "Dnevnik");
        assert_eq!(trim_excessive_characters("..."), "");
    }

    #[rstest]
    #[case("sbb", false)]
    #[case("SBB", false)]
    #[case("poddirektor", false)]
    #[case("dj", true)]
    #[case("DJ", true)]
    #[case("djevo", false)]
    #[case("32°C", true)]
    #[case("5kg", true)]
    #[case("Word", true)]
    #[case("docx", true)]
    #[case("Über", true)]
    #[case("Google", true)]
    #[case("developerima.", true)]
    #[case("home", true)]
    #[case("homeopatija", false)]
    #[case("www.rts.rs", true)]
    #[case("Tom&Jerry", true)]
    #[case("Moj", false)]
    #[case("Dnevnik", false)]
    #[case("—", false)]
    #[case("", false)]
    fn test_looks_foreign(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(ForeignWordClassifier::default().looks_foreign(word), expected);
    }

    #[test]
    fn test_classifier_is_deterministic() {
        let classifier = ForeignWordClassifier::default();
        for word in ["sbb", "djevo", "username", "32°C", "Tanjug", "makeup-om"] {
            let first = classifier.looks_foreign(word);
            for _ in 0..5 {
                assert_eq!(classifier.looks_foreign(word), first, "{word}");
            }
        }
    }

    #[test]
    fn test_foreign_stem_len() {
        let classifier = ForeignWordClassifier::default();
        assert_eq!(classifier.foreign_stem_len("dj-evi"), Some(3));
        assert_eq!(classifier.foreign_stem_len("makeup-om"), Some(7));
        assert_eq!(classifier.foreign_stem_len("(makeup-om)"), Some(8));
        assert_eq!(classifier.foreign_stem_len("DJ-em"), Some(3));
        assert_eq!(classifier.foreign_stem_len("makeup"), None);
        assert_eq!(classifier.foreign_stem_len("djevojka"), None);
        assert_eq!(classifier.foreign_stem_len("..."), None);
    }
}
