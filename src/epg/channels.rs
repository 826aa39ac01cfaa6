//! Channel identifier normalization and per-source channel tables

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::EpgSourceConfig;

static CHANNEL_ID_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s()/&!:*_+,'\-]").expect("channel id noise pattern is a valid regex")
});

/// Normalize a raw channel identifier for table lookups.
///
/// The id is trimmed and lowercased, decomposed to NFKD with every non-ASCII
/// code point dropped (so `č` becomes `c`), and stripped of whitespace and
/// common punctuation: `"RTS 1 (HD)"` becomes `"rts1hd"`.
pub fn normalize_channel_id(raw: &str) -> String {
    let ascii: String = raw
        .trim()
        .to_lowercase()
        .nfkd()
        .filter(char::is_ascii)
        .collect();
    CHANNEL_ID_NOISE.replace_all(&ascii, "").into_owned()
}

/// Query contract the streaming rewriter needs from the channel tables
pub trait ChannelClassificationQuery {
    /// Whether `title`/`desc` text of this normalized channel is transliterated
    fn is_translit_channel(&self, channel: &str) -> bool;

    /// Canonical identifier to emit for a normalized channel id
    fn resolve_channel(&self, channel: &str) -> String;

    /// Whether elements with this name are dropped together with their subtree
    fn is_invalid_tag(&self, tag: &str) -> bool;
}

/// Channel tables for one configured EPG source.
///
/// Every table key is normalized with [`normalize_channel_id`], so lookups are
/// case- and punctuation-insensitive. Missing tables are simply empty.
#[derive(Debug, Clone, Default)]
pub struct ChannelRules {
    translit: HashSet<String>,
    channel_map: HashMap<String, String>,
    dummy: HashSet<String>,
    invalid_tags: HashSet<String>,
}

impl ChannelRules {
    pub fn new<T, M, D, I>(translit: T, channel_map: M, dummy: D, invalid_tags: I) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        M: IntoIterator<Item = (String, String)>,
        D: IntoIterator,
        D::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            translit: translit
                .into_iter()
                .map(|id| normalize_channel_id(id.as_ref()))
                .collect(),
            channel_map: channel_map
                .into_iter()
                .map(|(from, to)| (normalize_channel_id(&from), to))
                .collect(),
            dummy: dummy
                .into_iter()
                .map(|id| normalize_channel_id(id.as_ref()))
                .collect(),
            invalid_tags: invalid_tags
                .into_iter()
                .map(|tag| tag.as_ref().trim().to_string())
                .collect(),
        }
    }

    pub fn from_config(config: &EpgSourceConfig) -> Self {
        Self::new(
            &config.channel_translit,
            config
                .channel_map
                .iter()
                .map(|(from, to)| (from.clone(), to.clone())),
            &config.dummy,
            &config.invalid_tags,
        )
    }

    pub fn translit_channel_count(&self) -> usize {
        self.translit.len()
    }
}

impl ChannelClassificationQuery for ChannelRules {
    fn is_translit_channel(&self, channel: &str) -> bool {
        self.translit.contains(channel)
    }

    /// `channel-map` wins over `dummy`; mapped ids are lowercased and dummy
    /// channels become `dummy (<id>)`.
    fn resolve_channel(&self, channel: &str) -> String {
        if let Some(mapped) = self.channel_map.get(channel) {
            mapped.to_lowercase()
        } else if self.dummy.contains(channel) {
            format!("dummy ({channel})")
        } else {
            channel.to_string()
        }
    }

    fn is_invalid_tag(&self, tag: &str) -> bool {
        self.invalid_tags.contains(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ChannelRules {
        ChannelRules::new(
            ["RTS 1", "Prva"],
            [
                ("N1 Srbija".to_string(), "N1".to_string()),
                ("promo".to_string(), "Info".to_string()),
            ],
            ["Promo", "Shop TV"],
            ["icon", "credits"],
        )
    }

    #[test]
    fn test_normalize_channel_id() {
        assert_eq!(normalize_channel_id("  RTS 1 (HD) "), "rts1hd");
        assert_eq!(normalize_channel_id("Nova_S+"), "novas");
        assert_eq!(normalize_channel_id("Arena Sport 1 - Premium"), "arenasport1premium");
        assert_eq!(normalize_channel_id("Čačak TV"), "cacaktv");
        assert_eq!(normalize_channel_id("Đurđevak"), "urevak");
        assert_eq!(normalize_channel_id("rts1.rs"), "rts1.rs");
    }

    #[test]
    fn test_translit_lookup_uses_normalized_keys() {
        let rules = rules();
        assert!(rules.is_translit_channel("rts1"));
        assert!(rules.is_translit_channel("prva"));
        assert!(!rules.is_translit_channel("rts2"));
        assert_eq!(rules.translit_channel_count(), 2);
    }

    #[test]
    fn test_resolve_channel() {
        let rules = rules();
        assert_eq!(rules.resolve_channel("n1srbija"), "n1");
        assert_eq!(rules.resolve_channel("shoptv"), "dummy (shoptv)");
        assert_eq!(rules.resolve_channel("rts1"), "rts1");
        // channel-map takes precedence over dummy
        assert_eq!(rules.resolve_channel("promo"), "info");
    }

    #[test]
    fn test_empty_rules_are_permissive() {
        let rules = ChannelRules::default();
        assert!(!rules.is_translit_channel("rts1"));
        assert_eq!(rules.resolve_channel("rts1"), "rts1");
        assert!(!rules.is_invalid_tag("icon"));
    }

    #[test]
    fn test_invalid_tags_are_exact_names() {
        let rules = rules();
        assert!(rules.is_invalid_tag("icon"));
        assert!(!rules.is_invalid_tag("Icon"));
        assert!(!rules.is_invalid_tag("title"));
    }
}
