//! Latin to Serbian Cyrillic substitution table
//!
//! Rules are applied in table order as global replacements, so every
//! multi-character pattern must appear before any rule that could consume
//! one of its characters. Decomposed letters (base letter followed by a
//! combining mark) are listed before their base letter for the same reason.

/// A single ordered find-and-replace rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

const fn rule(pattern: &'static str, replacement: &'static str) -> SubstitutionRule {
    SubstitutionRule {
        pattern,
        replacement,
    }
}

/// Combining caron (U+030C) and combining acute accent (U+0301) are spelled
/// out with escapes so the decomposed variants stay visibly distinct from
/// their precomposed twins.
pub static LATIN_TO_CYRILLIC: &[SubstitutionRule] = &[
    // Uppercase and titlecase digraphs
    rule("DJ", "Ђ"),
    rule("D\u{408}", "Ђ"),
    rule("Dj", "Ђ"),
    rule("D\u{458}", "Ђ"),
    rule("LJ", "Љ"),
    rule("L\u{408}", "Љ"),
    rule("\u{1C7}", "Љ"),
    rule("Lj", "Љ"),
    rule("L\u{458}", "Љ"),
    rule("\u{1C8}", "Љ"),
    rule("NJ", "Њ"),
    rule("N\u{408}", "Њ"),
    rule("\u{1CA}", "Њ"),
    rule("Nj", "Њ"),
    rule("N\u{458}", "Њ"),
    rule("\u{1CB}", "Њ"),
    rule("D\u{17D}", "Џ"),
    rule("\u{1C4}", "Џ"),
    rule("DZ\u{30C}", "Џ"),
    rule("D\u{17E}", "Џ"),
    rule("\u{1C5}", "Џ"),
    rule("Dz\u{30C}", "Џ"),
    // Lowercase digraphs
    rule("dj", "ђ"),
    rule("d\u{458}", "ђ"),
    rule("lj", "љ"),
    rule("l\u{458}", "љ"),
    rule("\u{1C9}", "љ"),
    rule("nj", "њ"),
    rule("n\u{458}", "њ"),
    rule("\u{1CC}", "њ"),
    rule("d\u{17E}", "џ"),
    rule("\u{1C6}", "џ"),
    rule("dz\u{30C}", "џ"),
    // Uppercase letters
    rule("A", "А"),
    rule("B", "Б"),
    rule("V", "В"),
    rule("G", "Г"),
    rule("D", "Д"),
    rule("\u{110}", "Ђ"),
    rule("\u{D0}", "Ђ"),
    rule("\u{1D06}", "Ђ"),
    rule("E", "Е"),
    rule("\u{17D}", "Ж"),
    rule("Z\u{30C}", "Ж"),
    rule("Z", "З"),
    rule("I", "И"),
    rule("J", "Ј"),
    rule("K", "К"),
    rule("L", "Л"),
    rule("M", "М"),
    rule("N", "Н"),
    rule("O", "О"),
    rule("P", "П"),
    rule("R", "Р"),
    rule("\u{160}", "Ш"),
    rule("S\u{30C}", "Ш"),
    rule("S", "С"),
    rule("T", "Т"),
    rule("\u{106}", "Ћ"),
    rule("C\u{301}", "Ћ"),
    rule("\u{10C}", "Ч"),
    rule("C\u{30C}", "Ч"),
    rule("U", "У"),
    rule("F", "Ф"),
    rule("H", "Х"),
    rule("C", "Ц"),
    // Lowercase letters and ligatures
    rule("a", "а"),
    rule("\u{E6}", "ае"),
    rule("b", "б"),
    rule("v", "в"),
    rule("g", "г"),
    rule("d", "д"),
    rule("\u{111}", "ђ"),
    rule("e", "е"),
    rule("\u{17E}", "ж"),
    rule("z\u{30C}", "ж"),
    rule("z", "з"),
    rule("i", "и"),
    rule("\u{133}", "иј"),
    rule("j", "ј"),
    rule("k", "к"),
    rule("l", "л"),
    rule("m", "м"),
    rule("n", "н"),
    rule("o", "о"),
    rule("\u{153}", "ое"),
    rule("p", "п"),
    rule("r", "р"),
    rule("\u{161}", "ш"),
    rule("s\u{30C}", "ш"),
    rule("s", "с"),
    rule("\u{FB06}", "ст"),
    rule("t", "т"),
    rule("\u{107}", "ћ"),
    rule("c\u{301}", "ћ"),
    rule("\u{10D}", "ч"),
    rule("c\u{30C}", "ч"),
    rule("u", "у"),
    rule("f", "ф"),
    rule("\u{FB01}", "фи"),
    rule("\u{FB02}", "фл"),
    rule("h", "х"),
    rule("c", "ц"),
];

/// Ordered substitution mapper over a rule table
#[derive(Debug, Clone, Copy)]
pub struct CharacterMap {
    rules: &'static [SubstitutionRule],
}

impl Default for CharacterMap {
    fn default() -> Self {
        Self::new(LATIN_TO_CYRILLIC)
    }
}

impl CharacterMap {
    pub fn new(rules: &'static [SubstitutionRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [SubstitutionRule] {
        self.rules
    }

    /// Apply every rule in order as a global find-and-replace
    pub fn apply(&self, word: &str) -> String {
        let mut output = word.to_string();
        for rule in self.rules {
            if output.contains(rule.pattern) {
                output = output.replace(rule.pattern, rule.replacement);
            }
        }
        output
    }
}
