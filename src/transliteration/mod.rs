//! Serbian Latin to Cyrillic transliteration engine
//!
//! The engine works token by token:
//!
//! 1. Tokens shaped like `foreign-suffix` keep the foreign stem and convert
//!    only the suffix (`makeup-om` → `makeup-ом`).
//! 2. Otherwise the [`ForeignWordClassifier`] decides whether the token is
//!    left in Latin script.
//! 3. Native tokens go through the [`DigraphSegmenter`] and then the ordered
//!    [`CharacterMap`].
//!
//! All tables are immutable statics, so one engine can be shared freely
//! across threads and conversions.

use std::sync::LazyLock;

use regex::Regex;

pub mod character_map;
pub mod classifier;
pub mod digraph;
pub mod measurement;
pub mod word_lists;

pub use character_map::{CharacterMap, LATIN_TO_CYRILLIC, SubstitutionRule};
pub use classifier::{ForeignWordClassifier, trim_excessive_characters};
pub use digraph::{DIGRAPH_EXCEPTIONS, DigraphSegmenter, ZWNJ};
pub use measurement::is_measurement_unit;
pub use word_lists::{ForeignWordLists, SERBIAN_WORD_LISTS};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

/// Orchestrates classification, digraph splitting and character mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct TransliterationEngine {
    classifier: ForeignWordClassifier,
    segmenter: DigraphSegmenter,
    character_map: CharacterMap,
}

impl TransliterationEngine {
    pub fn new(
        classifier: ForeignWordClassifier,
        segmenter: DigraphSegmenter,
        character_map: CharacterMap,
    ) -> Self {
        Self {
            classifier,
            segmenter,
            character_map,
        }
    }

    pub fn classifier(&self) -> &ForeignWordClassifier {
        &self.classifier
    }

    /// Transliterate free text, leaving foreign tokens untouched.
    ///
    /// Whitespace runs collapse to a single space; text that is blank after
    /// trimming is returned as is.
    pub fn transliterate(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        WHITESPACE_RUN
            .split(text)
            .map(|token| self.transliterate_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn transliterate_token(&self, token: &str) -> String {
        if let Some(stem_len) = self.classifier.foreign_stem_len(token) {
            let (stem, rest) = token.split_at(stem_len);
            return format!("{stem}{}", self.word_to_cyrillic(rest));
        }

        if self.classifier.looks_foreign(token) {
            token.to_string()
        } else {
            self.word_to_cyrillic(token)
        }
    }

    /// Convert a single word unconditionally
    pub fn word_to_cyrillic(&self, word: &str) -> String {
        let segmented = self.segmenter.segment(word);
        self.character_map.apply(&segmented)
    }

    /// Whether the classifier would keep `word` in Latin script
    pub fn looks_foreign(&self, word: &str) -> bool {
        self.classifier.looks_foreign(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn engine() -> TransliterationEngine {
        TransliterationEngine::default()
    }

    #[test]
    fn test_word_to_cyrillic_digraphs() {
        assert_eq!(engine().word_to_cyrillic("Ljubičasta"), "Љубичаста");
        assert_eq!(engine().word_to_cyrillic("LJOVISNA"), "ЉОВИСНА");
        assert_eq!(engine().word_to_cyrillic("džukca"), "џукца");
    }

    #[test]
    fn test_word_to_cyrillic_is_identity_on_cyrillic() {
        for word in ["Љубичаста", "ђипи", "ЏЕФ", "Тан\u{200C}југ", "123"] {
            assert_eq!(engine().word_to_cyrillic(word), word);
        }
    }

    #[test]
    fn test_split_digraph_renders_as_two_letters() {
        let output = engine().transliterate("Tanjug");
        assert_eq!(output, "Тан\u{200C}југ");

        let visible: String = output.chars().filter(|c| *c != ZWNJ).collect();
        assert_eq!(visible, "Танјуг");
        assert!(!visible.contains('Њ') && !visible.contains('њ'));
    }

    #[test]
    fn test_bracketed_exception_word_keeps_fused_digraph() {
        assert_eq!(engine().transliterate("(Tanjug)"), "(Тањуг)");
        assert_eq!(engine().transliterate("„Tanjug“ javlja"), "„Тањуг“ јавља");
    }

    #[test]
    fn test_hyphenated_foreign_stem() {
        assert_eq!(engine().transliterate("makeup-om"), "makeup-ом");
        assert_eq!(engine().transliterate("dj-evi"), "dj-еви");
    }

    #[test]
    fn test_measurement_unit_is_left_alone() {
        assert_eq!(
            engine().transliterate("Danas 32°C u Beogradu"),
            "Данас 32°C у Београду"
        );
    }

    #[test]
    fn test_blank_text_is_returned_unchanged() {
        assert_eq!(engine().transliterate(""), "");
        assert_eq!(engine().transliterate("  \t "), "  \t ");
    }

    #[test]
    fn test_whitespace_collapses_to_single_spaces() {
        assert_eq!(engine().transliterate("da\t\tne\nmožda"), "да не можда");
        assert_eq!(engine().transliterate(" da"), " да");
    }

    #[rstest]
    #[case("Ljubičasta LJOVISNA je ljankase", "Љубичаста ЉОВИСНА је љанкасе")]
    #[case("Njiše se njopajuće NJANJAVO", "Њише се њопајуће ЊАЊАВО")]
    #[case(
        "Džangrizavi DŽUDISTA džemper odžakom Džodi daje.",
        "Џангризави ЏУДИСТА џемпер оџаком Џоди даје."
    )]
    #[case(
        "brza vižljasta lija hoće da đipi preko lenjog flegmatičnog džukca.",
        "брза вижљаста лија хоће да ђипи преко лењог флегматичног џукца."
    )]
    #[case(
        "LJUDI, JAZAVAC DŽEF TRČI PO ŠUMI GLOĐUĆI NEKO SUHO ŽBUNJE!",
        "ЉУДИ, ЈАЗАВАЦ ЏЕФ ТРЧИ ПО ШУМИ ГЛОЂУЋИ НЕКО СУХО ЖБУЊЕ!"
    )]
    #[case(
        "Ðavo je u detaǉima, nĳe da ti Čika Džoš nije rekao?",
        "Ђаво је у детаљима, није да ти Чика Џош није рекао?"
    )]
    #[case(
        "Odjednom Tanjug reče da će nadživeti injekciju. Dodjavola, džangrizava njuška je bila u pravu.",
        "Од\u{200C}једном Тан\u{200C}југ рече да ће над\u{200C}живети ин\u{200C}јекцију. Дођавола, џангризава њушка је била у праву."
    )]
    #[case(
        "Biografiju pošaljite kao Word dokument u docx formatu za Über Yahu.",
        "Биографију пошаљите као Word документ у docx формату за Über Yahu."
    )]
    #[case(
        "Moj DJ username Adobe Dacia po defaultu sve PDF dokumente šalje mailom Google developerima.",
        "Мој DJ username Adobe Dacia по defaultu све PDF документе шаље mailom Google developerima."
    )]
    fn test_transliterate_sentences(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(engine().transliterate(input), expected);
    }
}
