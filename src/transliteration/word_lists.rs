//! Word lists driving the foreign word classifier
//!
//! Every entry is lowercase. The lists are plain data: extending coverage
//! means adding entries here, not touching the classifier.

/// The four lists consulted by [`super::ForeignWordClassifier`]
#[derive(Debug, Clone, Copy)]
pub struct ForeignWordLists {
    /// Native words that contain otherwise foreign-looking clusters (prefix match)
    pub native_exceptions: &'static [&'static str],
    /// Letters and clusters that never occur in native words (substring match)
    pub foreign_substrings: &'static [&'static str],
    /// Brand names and anglicisms (prefix match)
    pub foreign_prefixes: &'static [&'static str],
    /// Short foreign words that are also valid native prefixes (exact match)
    pub whole_foreign_words: &'static [&'static str],
}

pub const SERBIAN_WORD_LISTS: ForeignWordLists = ForeignWordLists {
    native_exceptions: NATIVE_EXCEPTIONS,
    foreign_substrings: FOREIGN_SUBSTRINGS,
    foreign_prefixes: FOREIGN_PREFIXES,
    whole_foreign_words: WHOLE_FOREIGN_WORDS,
};

pub const NATIVE_EXCEPTIONS: &[&str] = &[
    "ammar",
    "amss",
    "aparthejd",
    "ddor",
    "dss",
    "dvadesettrog",
    "epp",
    "fss",
    "gss",
    "interreakc",
    "interresor",
    "izzzdiovns",
    "kss",
    "llsls",
    "mmf",
    "naddu",
    "natha",
    "natho",
    "ommetar",
    "penthaus",
    "palack",
    "poddirektor",
    "poddisciplin",
    "poddomen",
    "poddres",
    "posthumn",
    "posttrans",
    "posttraum",
    "pothodni",
    "pothranj",
    "preddijabetes",
    "prethod",
    "ptt",
    "sbb",
    "sdss",
    "ssp",
    "ssrnj",
    "sssr",
    "superračun",
    "šopingholi",
    "tass",
    "transseks",
    "transsibir",
    "tridesettrog",
    "uppr",
    "vannastav",
];

pub const FOREIGN_SUBSTRINGS: &[&str] = &[
    "q", "w", "x", "y", "é", "á", "ó", "ü", "ö", "ä", "ê", "è", "ú", "í", "ő", "ű", "ñ", "ş", "ç",
    "ğ", "ı", "ł", "ø", "ß", "&", "@", "#", "bb", "cc", "ck", "cs", "dd", "ee", "ff", "gg", "gy",
    "hh", "kk", "ll", "ly", "mm", "nn", "ny", "ph", "pp", "rr", "sh", "ss", "sz", "tt", "zs", "zz",
    "ch", "gh", "th", "'s", "'t", ".com", ".edu", ".net", ".info", ".rs", ".org", "©", "®", "™",
];

pub const FOREIGN_PREFIXES: &[&str] = &[
    "administration",
    "adobe",
    "advanced",
    "advertising",
    "autocad",
    "bitcoin",
    "book",
    "boot",
    "cancel",
    "canon",
    "carlsberg",
    "cisco",
    "clio",
    "cloud",
    "coca-col",
    "cookie",
    "cooking",
    "cool",
    "covid",
    "dacia",
    "default",
    "develop",
    "e-mail",
    "edge",
    "email",
    "emoji",
    "english",
    "facebook",
    "fashion",
    "food",
    "foundation",
    "gaming",
    "gmail",
    "gmt",
    "good",
    "google",
    "hdmi",
    "image",
    "iphon",
    "ipod",
    "javascript",
    "jazeera",
    "joomla",
    "league",
    "like",
    "linkedin",
    "look",
    "macbook",
    "mail",
    "manager",
    "maps",
    "mastercard",
    "mercator",
    "microsoft",
    "mitsubishi",
    "notebook",
    "nvidia",
    "online",
    "outlook",
    "panasonic",
    "pdf",
    "peugeot",
    "podcast",
    "postpaid",
    "printscreen",
    "procredit",
    "project",
    "punk",
    "renault",
    "rock",
    "screenshot",
    "seen",
    "selfie",
    "share",
    "shift",
    "shop",
    "smartphone",
    "space",
    "steam",
    "stream",
    "subscrib",
    "tool",
    "topic",
    "trailer",
    "ufc",
    "unicredit",
    "username",
    "viber",
];

pub const WHOLE_FOREIGN_WORDS: &[&str] = &[
    "air",
    "alpha",
    "and",
    "back",
    "bitcoin",
    "celebrities",
    "conditions",
    "co2",
    "cpu",
    "creative",
    "disclaimer",
    "dj",
    "electronics",
    "fresh",
    "fun",
    "geographic",
    "gmbh",
    "h2o",
    "hair",
    "have",
    "home",
    "ii",
    "iii",
    "idj",
    "idjtv",
    "life",
    "live",
    "login",
    "national",
    "made",
    "makeup",
    "must",
    "previous",
    "public",
    "reserved",
    "terms",
    "url",
    "vii",
    "viii",
    "visa",
];
