//! Keyword frequency over watched titles.
//!
//! Feeds the word cloud: titles are tokenized, common words are removed,
//! and the remaining tokens are ranked by how many titles contain them.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::types::WatchRecord;

/// Keywords must appear in more than this many titles.
pub const DEFAULT_KEYWORD_THRESHOLD: u32 = 2;

/// Maximum number of keywords returned.
pub const DEFAULT_MAX_KEYWORDS: usize = 100;

/// Tokens this short or shorter are never keywords.
const MIN_TOKEN_CHARS: usize = 3;

/// English function words.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "but", "by", "can", "could", "did", "does", "for", "from", "get", "got", "had", "has",
    "have", "her", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me",
    "more", "most", "my", "no", "not", "now", "of", "on", "one", "or", "our", "out", "over",
    "she", "should", "so", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "who", "why", "will", "with", "would", "you", "your",
];

/// Generic platform and web terms that show up in nearly every title.
pub const PLATFORM_STOP_WORDS: &[&str] = &[
    "channel", "com", "episode", "full", "http", "https", "live", "new", "official",
    "part", "playlist", "shorts", "stream", "subscribe", "video", "videos", "vs", "watch",
    "watched", "www", "youtube",
];

/// Set of tokens excluded from keyword counting.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Built-in English and platform tables.
    pub fn builtin() -> Self {
        Self {
            words: ENGLISH_STOP_WORDS
                .iter()
                .chain(PLATFORM_STOP_WORDS)
                .map(|w| w.to_string())
                .collect(),
        }
    }

    /// Built-in tables plus caller-supplied words (case-insensitive).
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stop_words = Self::builtin();
        stop_words
            .words
            .extend(extra.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        stop_words
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::builtin()
    }
}

/// One word-cloud entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub text: String,
    pub value: u32,
}

impl KeywordCount {
    /// Value relative to the top keyword's value, in `0.0..=1.0`.
    ///
    /// Returns 0.0 when `top` is 0 so callers can size fonts from an empty
    /// or degenerate ranking without dividing by zero.
    pub fn weight_against(&self, top: u32) -> f64 {
        if top == 0 {
            0.0
        } else {
            self.value as f64 / top as f64
        }
    }
}

/// Split a title into candidate tokens.
///
/// Lower-cases, drops every character that is neither a word character
/// (alphanumeric or `_`) nor whitespace, and splits on whitespace runs.
pub fn tokenize(title: &str) -> Vec<String> {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

fn is_keyword_candidate(token: &str, stop_words: &StopWords) -> bool {
    token.chars().count() >= MIN_TOKEN_CHARS
        && !stop_words.contains(token)
        && !token.chars().all(|c| c.is_numeric())
}

/// Rank keywords across all titles.
///
/// A token counts once per title. Tokens seen in `threshold` titles or
/// fewer are dropped, the rest are sorted by count (ties keep first-seen
/// order) and the first `limit` are yielded.
pub fn keyword_frequency(
    records: &[WatchRecord],
    stop_words: &StopWords,
    threshold: u32,
    limit: usize,
) -> impl Iterator<Item = KeywordCount> {
    // Insertion-ordered counts so the stable sort breaks ties by first sighting.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, u32)> = Vec::new();

    for record in records {
        let mut seen_in_title: HashSet<String> = HashSet::new();

        for token in tokenize(&record.title) {
            if !is_keyword_candidate(&token, stop_words) || !seen_in_title.insert(token.clone()) {
                continue;
            }
            match index.get(&token) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push((token, 1));
                }
            }
        }
    }

    counts.retain(|(_, count)| *count > threshold);
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(limit)
        .map(|(text, value)| KeywordCount { text, value })
}
