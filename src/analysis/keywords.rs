//! Keyword frequency over document text.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::{MAX_KEYWORDS, MIN_KEYWORD_FREQUENCY};
use crate::model::Keyword;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z]{4,}\b").expect("keyword pattern is valid"));

/// Common English words never reported as keywords.
pub const STOP_WORDS: &[&str] = &[
    "after", "again", "air", "also", "america", "animal", "answer", "any", "around", "ask",
    "away", "back", "been", "before", "being", "boy", "came", "can", "change", "come", "could",
    "day", "did", "different", "each", "end", "first", "follow", "form", "found", "from", "get",
    "give", "good", "great", "hand", "has", "have", "help", "her", "here", "him", "his", "home",
    "house", "how", "into", "its", "just", "kind", "know", "land", "learn", "letter", "life",
    "line", "look", "made", "man", "mean", "men", "more", "most", "mother", "move", "much",
    "name", "need", "new", "now", "number", "off", "old", "only", "other", "our", "out", "over",
    "page", "part", "picture", "place", "play", "point", "put", "read", "right", "said", "same",
    "say", "see", "sentence", "set", "should", "show", "small", "some", "sound", "spell",
    "still", "study", "take", "tell", "than", "that", "their", "them", "then", "they", "thing",
    "think", "this", "three", "through", "time", "too", "try", "turn", "two", "use", "very",
    "want", "way", "went", "what", "when", "where", "which", "who", "why", "will", "with",
    "work", "world", "year", "your", "us",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Check if a lower-case word is in the stop-word set.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Most frequent words of four or more ASCII letters in `text`.
///
/// Matching is case-insensitive. Stop words and words seen
/// [`MIN_KEYWORD_FREQUENCY`] times or fewer are skipped. Ties on frequency
/// are broken alphabetically, so the result does not depend on hashing.
pub fn extract_keywords(text: &str) -> Vec<Keyword> {
    let lowered = text.to_lowercase();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for m in WORD.find_iter(&lowered) {
        *counts.entry(m.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts
        .into_iter()
        .filter(|(word, freq)| *freq > MIN_KEYWORD_FREQUENCY && !is_stop_word(word))
        .collect();
    ranked.sort_by_key(|&(word, freq)| (Reverse(freq), word));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, frequency)| Keyword {
            word: word.to_string(),
            frequency,
        })
        .collect()
}
