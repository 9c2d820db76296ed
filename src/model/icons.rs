// File: ./src/model/icons.rs
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

// ASCII word characters only, so accented letters split words.
static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9A-Za-z_]+").expect("valid non-word regex"));

const PICKUP_ICONS: &[(&str, &str)] = &[
    ("garbage", "fas fa-trash"),
    ("trash", "fas fa-trash"),
    ("recycle", "fas fa-recycle"),
    ("recycling", "fas fa-recycle"),
    ("battery", "fas fa-car-battery"),
    ("yard", "fab fa-pagelines"),
];

pub fn default_icon_table() -> HashMap<String, String> {
    PICKUP_ICONS
        .iter()
        .map(|(word, class)| (word.to_string(), class.to_string()))
        .collect()
}

/// Maps keywords found in free text to icon classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordIconMatcher {
    icons: HashMap<String, String>,
}

impl Default for KeywordIconMatcher {
    fn default() -> Self {
        Self::new(default_icon_table())
    }
}

impl KeywordIconMatcher {
    /// Keywords are matched against lowercased words, so they are stored lowercased.
    pub fn new(icons: HashMap<String, String>) -> Self {
        Self {
            icons: icons
                .into_iter()
                .map(|(word, class)| (word.to_lowercase(), class))
                .collect(),
        }
    }

    /// Icon classes for every distinct keyword in `text`, in order of first
    /// appearance. A keyword repeated in the text yields one icon; two
    /// keywords sharing a class yield that class twice.
    pub fn icons_for(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();

        for word in NON_WORD_RE.split(&lowered) {
            if let Some((keyword, class)) = self.icons.get_key_value(word)
                && seen.insert(keyword.as_str())
            {
                out.push(class.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keyword_collapses() {
        let m = KeywordIconMatcher::default();
        assert_eq!(m.icons_for("Trash day: trash & TRASH"), vec!["fas fa-trash"]);
    }

    #[test]
    fn test_distinct_keywords_keep_order() {
        let m = KeywordIconMatcher::default();
        assert_eq!(
            m.icons_for("Recycling and Garbage pickup"),
            vec!["fas fa-recycle", "fas fa-trash"]
        );
    }

    #[test]
    fn test_shared_class_is_not_deduplicated() {
        let m = KeywordIconMatcher::default();
        assert_eq!(
            m.icons_for("garbage/trash"),
            vec!["fas fa-trash", "fas fa-trash"]
        );
    }

    #[test]
    fn test_no_match() {
        let m = KeywordIconMatcher::default();
        assert!(m.icons_for("").is_empty());
        assert!(m.icons_for("Dentist appointment").is_empty());
        // Substrings are not words.
        assert!(m.icons_for("Backyard party").is_empty());
    }

    #[test]
    fn test_custom_table_is_case_insensitive() {
        let mut table = HashMap::new();
        table.insert("Compost".to_string(), "fas fa-seedling".to_string());
        let m = KeywordIconMatcher::new(table);
        assert_eq!(m.icons_for("COMPOST bin"), vec!["fas fa-seedling"]);
        assert!(m.icons_for("garbage").is_empty());
    }
}
