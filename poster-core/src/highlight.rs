//! # Keyword Highlighting
//!
//! Picks up to three words of a verse for decorative emphasis.
//!
//! Scoring per token (lower-cased, at least three characters, not a stop
//! word):
//!
//! | Rule                               | Points        |
//! |------------------------------------|---------------|
//! | in the thematic keyword set        | +20           |
//! | any remaining word                 | +length       |
//! | original token starts uppercase    | +5            |
//!
//! The highest scores win; ties keep text order.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::PosterMode;

/// Maximum number of highlighted words.
pub const MAX_HIGHLIGHTS: usize = 3;

const MIN_WORD_LEN: usize = 3;
const THEMATIC_BONUS: usize = 20;
const CAPITAL_BONUS: usize = 5;

const SEPARATORS: &[char] = &[',', '.', '!', '?', ';', ':', '"', '\'', '-'];

/// Domain vocabulary that earns the thematic bonus.
pub const THEMATIC_KEYWORDS: &[&str] = &[
    "god", "jesus", "christ", "lord", "faith", "grace", "love", "hope", "peace", "joy", "spirit",
    "holy", "mercy", "glory", "heaven", "light", "life", "truth", "eternal", "savior", "saviour",
    "salvation", "blessed", "kingdom", "father", "strength", "trust", "prayer", "praise",
    "worship", "righteous", "righteousness", "cross", "shepherd", "word", "power", "refuge",
];

/// Words that never score.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "but", "nor", "yet", "not", "all", "any", "are", "was", "were", "been",
    "being", "have", "has", "had", "does", "did", "will", "shall", "would", "should", "may",
    "might", "must", "can", "could", "his", "her", "him", "she", "they", "them", "their",
    "you", "your", "our", "ours", "who", "whom", "which", "what", "that", "this", "these",
    "those", "with", "from", "into", "unto", "upon", "onto", "thee", "thou", "thy", "thine",
    "hath", "also", "there", "then", "than", "when", "where", "because", "whoever",
    "whosoever", "its", "out", "over", "under", "about", "after", "before", "shalt", "let",
    "one", "every", "even",
];

fn is_thematic(word: &str) -> bool {
    THEMATIC_KEYWORDS.contains(&word)
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

/// Score a single token; zero means "never highlight".
#[must_use]
pub fn score_word(token: &str) -> usize {
    let lower = token.to_lowercase();
    let len = lower.chars().count();
    if len < MIN_WORD_LEN || is_stop_word(&lower) {
        return 0;
    }

    let mut score = if is_thematic(&lower) {
        THEMATIC_BONUS + len
    } else {
        len
    };
    if token.chars().next().is_some_and(char::is_uppercase) {
        score += CAPITAL_BONUS;
    }
    score
}

/// The selected words, lower-cased, in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSet {
    words: Vec<String>,
}

impl HighlightSet {
    /// An empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `word` (already lower-cased) was selected.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Selected words in rank order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of selected words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Choose the words of `text` to emphasize.
#[must_use]
pub fn select_highlights(text: &str) -> HighlightSet {
    let mut scored: Vec<(usize, String)> = text
        .split(is_separator)
        .filter(|token| !token.is_empty())
        .map(|token| (score_word(token), token.to_lowercase()))
        .filter(|(score, _)| *score > 0)
        .collect();

    // Stable: equal scores keep their order in the text.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut words: Vec<String> = Vec::with_capacity(MAX_HIGHLIGHTS);
    for (_, word) in scored {
        if words.len() == MAX_HIGHLIGHTS {
            break;
        }
        if !words.contains(&word) {
            words.push(word);
        }
    }
    HighlightSet { words }
}

/// A run of rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Text exactly as it appears in the source.
    pub text: String,
    /// Whether the run gets emphasis.
    pub highlighted: bool,
}

/// ASCII-alphanumeric, lower-cased form of a token used for matching.
#[must_use]
pub fn clean_token(token: &str) -> String {
    token
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Split `text` into word and whitespace runs for rendering.
///
/// Whitespace runs are kept verbatim so concatenating the segments gives
/// back `text`. A word run is highlighted when its cleaned form is longer
/// than two characters and in `set`.
#[must_use]
pub fn segment_text(text: &str, set: &HighlightSet) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_space = false;

    let mut flush = |run: &mut String, space: bool| {
        if run.is_empty() {
            return;
        }
        let highlighted = !space && {
            let cleaned = clean_token(run);
            cleaned.len() > 2 && set.contains(&cleaned)
        };
        segments.push(Segment {
            text: std::mem::take(run),
            highlighted,
        });
    };

    for c in text.chars() {
        let space = c.is_whitespace();
        if space != in_space {
            flush(&mut current, in_space);
            in_space = space;
        }
        current.push(c);
    }
    flush(&mut current, in_space);
    segments
}

/// Configuration for [`HighlightCache`].
#[derive(Debug, Clone)]
pub struct HighlightCacheConfig {
    /// Maximum number of memoized inputs.
    pub max_entries: usize,
}

impl Default for HighlightCacheConfig {
    fn default() -> Self {
        Self { max_entries: 32 }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightCacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that ran the scorer.
    pub misses: u64,
    /// Entries dropped to respect `max_entries`.
    pub evictions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    mode: PosterMode,
    text: String,
}

/// Memoizes [`select_highlights`] by exact (mode, text).
///
/// Event posters never highlight, so their key always maps to the empty set.
#[derive(Debug, Default)]
pub struct HighlightCache {
    entries: HashMap<CacheKey, Arc<HighlightSet>>,
    order: VecDeque<CacheKey>,
    config: HighlightCacheConfig,
    stats: HighlightCacheStats,
}

impl HighlightCache {
    /// Create a cache with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HighlightCacheConfig::default())
    }

    /// Create a cache with custom configuration.
    #[must_use]
    pub fn with_config(config: HighlightCacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            config,
            stats: HighlightCacheStats::default(),
        }
    }

    /// Highlight set for `text` under `mode`.
    pub fn get(&mut self, mode: PosterMode, text: &str) -> Arc<HighlightSet> {
        let key = CacheKey {
            mode,
            text: text.to_string(),
        };
        if let Some(set) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Arc::clone(set);
        }

        self.stats.misses += 1;
        let set = Arc::new(match mode {
            PosterMode::Verse => select_highlights(text),
            PosterMode::Event => HighlightSet::empty(),
        });

        while self.config.max_entries > 0 && self.entries.len() >= self.config.max_entries {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
        }
        if self.config.max_entries > 0 {
            self.order.push_back(key.clone());
            self.entries.insert(key, Arc::clone(&set));
        }
        set
    }

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> HighlightCacheStats {
        self.stats
    }

    /// Number of memoized inputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_john_3_16() {
        let set = select_highlights("For God so loved the world");
        assert!(set.contains("god"));
        assert!(!set.contains("for"));
        assert!(!set.contains("so"));
        assert!(!set.contains("the"));
        assert!(set.len() <= MAX_HIGHLIGHTS);
        assert_eq!(set.words().first().map(String::as_str), Some("god"));
    }

    #[test]
    fn test_scores() {
        assert_eq!(score_word("God"), 20 + 3 + 5);
        assert_eq!(score_word("faith"), 25);
        assert_eq!(score_word("world"), 5);
        assert_eq!(score_word("Shepherd"), 20 + 8 + 5);
        assert_eq!(score_word("so"), 0);
        assert_eq!(score_word("The"), 0);
    }

    #[test]
    fn test_ties_keep_text_order_and_dedupe() {
        let set = select_highlights("river, river; stone. cloud - field");
        assert_eq!(set.words(), ["river", "stone", "cloud"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(select_highlights("").is_empty());
        assert!(select_highlights(" ,.!?;:\"'- ").is_empty());
    }

    #[test]
    fn test_segments_round_trip_and_mark_words() {
        let text = "The LORD is my shepherd;  I shall not want.";
        let set = select_highlights(text);
        let segments = segment_text(text, &set);

        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, text);

        let marked: Vec<&str> = segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect();
        assert!(marked.contains(&"LORD"));
        assert!(marked.contains(&"shepherd;"));
    }

    #[test]
    fn test_short_cleaned_tokens_never_highlight() {
        let set = HighlightSet {
            words: vec!["ab".to_string()],
        };
        let segments = segment_text("ab ab!", &set);
        assert!(segments.iter().all(|s| !s.highlighted));
    }

    #[test]
    fn test_cache_hits_and_mode() {
        let mut cache = HighlightCache::new();
        let first = cache.get(PosterMode::Verse, "Jesus wept");
        let second = cache.get(PosterMode::Verse, "Jesus wept");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);

        let event = cache.get(PosterMode::Event, "Jesus wept");
        assert!(event.is_empty());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_cache_eviction() {
        let mut cache = HighlightCache::with_config(HighlightCacheConfig { max_entries: 2 });
        cache.get(PosterMode::Verse, "one");
        cache.get(PosterMode::Verse, "two");
        cache.get(PosterMode::Verse, "three");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }
}
