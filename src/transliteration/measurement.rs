//! Recognizer for physical unit tokens (`32°C`, `5kg`, `m/s²`)
//!
//! Unit symbols stay in Latin script inside Cyrillic text.

use std::sync::LazyLock;

use regex::Regex;

/// Unit symbol, with optional metric prefix, that must follow a number
const UNIT_ADJACENT_TO_NUMBER: &str =
    r"([zafpnμmcdhKMGTPEY]?([BVWJFSHCΩATNhlmg]|m[²³]?|s[²]?|cd|Pa|Wb|Hz))";

/// Unit symbol that may stand alone or follow a number
const UNIT_OPTIONALLY_ADJACENT: &str =
    r"(°[FC]|[kMGTPZY](B|Hz)|[pnμmcdhk]m[²³]?|m[²³]|[mcdh][lg]|kg|km)";

const NUMBER: &str = r"(\d+([\.,]\d)*)";

/// A number directly followed by a unit matches from the start of the word;
/// a bare unit or `unit/unit` ratio must span the whole word.
static MEASUREMENT_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "^(?:({NUMBER}{UNIT_ADJACENT_TO_NUMBER})|({NUMBER}?({UNIT_OPTIONALLY_ADJACENT}|{UNIT_ADJACENT_TO_NUMBER}/{UNIT_ADJACENT_TO_NUMBER}))$)"
    );
    Regex::new(&pattern).expect("measurement unit pattern is a valid regex")
});

/// Whether an already trimmed word is a measurement or unit symbol
pub fn is_measurement_unit(trimmed_word: &str) -> bool {
    MEASUREMENT_UNIT.is_match(trimmed_word)
}
