//! # Stop Words

use serde::{Deserialize, Serialize};

use crate::types::WTHashSet;

/// Common English stop words.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "you", "your", "yours", "yourself", "yourselves",
];

/// A stop-word set; matched exactly against analyzed tokens.
///
/// Serialized as a sorted word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct StopWords {
    words: WTHashSet<String>,
}

impl StopWords {
    /// Build a stop-word set from a word list.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_string()).collect(),
        }
    }

    /// The built-in English list.
    pub fn english() -> Self {
        Self::new(ENGLISH_STOP_WORDS)
    }

    /// The number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Is the set empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Is `token` a stop word.
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.words.contains(token)
    }
}

impl From<Vec<String>> for StopWords {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

impl From<StopWords> for Vec<String> {
    fn from(stop_words: StopWords) -> Self {
        let mut words: Vec<String> = stop_words.words.into_iter().collect();
        words.sort();
        words
    }
}
