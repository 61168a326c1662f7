//! # Term Analyzer
//!
//! `text -> tokens -> (case / accents) -> stop words -> n-grams`.

use regex::Regex;

use crate::{
    counting::{CountVectorizerOptions, StopWords},
    errors::{WTResult, WordtallyError},
    normalize::strip_diacritics,
};

/// Separator between the tokens of an n-gram term.
pub const NGRAM_SEPARATOR: &str = " ";

/// Compiled text analyzer of a [`crate::counting::CountVectorizer`].
///
/// The same analyzer is used for fitting, transforming, and vocabulary
/// merging; so every consumer sees identical terms.
#[derive(Debug, Clone)]
pub struct Analyzer {
    token_regex: Regex,
    lowercase: bool,
    strip_accents: bool,
    stop_words: Option<StopWords>,
    ngram_range: (usize, usize),
}

impl Analyzer {
    /// Compile an analyzer for `options`.
    ///
    /// ## Errors
    /// [`WordtallyError::InvalidConfiguration`] for a bad token pattern or n-gram range.
    pub fn new(options: &CountVectorizerOptions) -> WTResult<Self> {
        let (min_n, max_n) = options.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(WordtallyError::InvalidConfiguration(format!(
                "invalid n-gram range: ({min_n}, {max_n})"
            )));
        }

        let token_regex = Regex::new(&options.token_pattern).map_err(|e| {
            WordtallyError::InvalidConfiguration(format!(
                "invalid token pattern {:?}: {e}",
                options.token_pattern
            ))
        })?;

        Ok(Self {
            token_regex,
            lowercase: options.lowercase,
            strip_accents: options.strip_accents,
            stop_words: options.stop_words.clone(),
            ngram_range: options.ngram_range,
        })
    }

    /// Extract the filtered tokens of `text`.
    pub fn tokens(
        &self,
        text: &str,
    ) -> Vec<String> {
        self.token_regex
            .find_iter(text)
            .map(|m| {
                let mut token = m.as_str().to_string();
                if self.lowercase {
                    token = token.to_lowercase();
                }
                if self.strip_accents {
                    token = strip_diacritics(&token);
                }
                token
            })
            .filter(|t| {
                self.stop_words
                    .as_ref()
                    .is_none_or(|stop_words| !stop_words.contains(t))
            })
            .collect()
    }

    /// Analyze `text` into its terms; n-grams in increasing size.
    ///
    /// Repeated terms are kept; counts depend on them.
    pub fn analyze(
        &self,
        text: &str,
    ) -> Vec<String> {
        let tokens = self.tokens(text);
        let (min_n, max_n) = self.ngram_range;

        if min_n == 1 && max_n == 1 {
            return tokens;
        }

        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(NGRAM_SEPARATOR));
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unigrams() {
        let analyzer = Analyzer::new(&CountVectorizerOptions::default()).unwrap();
        assert_eq!(analyzer.analyze("a a b"), vec!["a", "a", "b"]);
        assert_eq!(analyzer.analyze("Hello, world!"), vec!["Hello", "world"]);
        assert!(analyzer.analyze("  ...  ").is_empty());
    }

    #[test]
    fn test_ngrams() {
        let options = CountVectorizerOptions::default().with_ngram_range(1, 2);
        let analyzer = Analyzer::new(&options).unwrap();
        assert_eq!(
            analyzer.analyze("a b c"),
            vec!["a", "b", "c", "a b", "b c"]
        );

        let options = CountVectorizerOptions::default().with_ngram_range(2, 3);
        let analyzer = Analyzer::new(&options).unwrap();
        assert_eq!(analyzer.analyze("a b c"), vec!["a b", "b c", "a b c"]);
        assert!(analyzer.analyze("a").is_empty());
    }

    #[test]
    fn test_case_accents_stop_words() {
        let options = CountVectorizerOptions::default()
            .with_lowercase(true)
            .with_strip_accents(true)
            .with_stop_words(Some(StopWords::english()));
        let analyzer = Analyzer::new(&options).unwrap();
        assert_eq!(analyzer.analyze("The Café is OPEN"), vec!["cafe", "open"]);
    }

    #[test]
    fn test_invalid_options() {
        let options = CountVectorizerOptions::default().with_ngram_range(0, 1);
        assert!(Analyzer::new(&options).is_err());

        let options = CountVectorizerOptions::default().with_ngram_range(3, 2);
        assert!(Analyzer::new(&options).is_err());

        let options = CountVectorizerOptions::default().with_token_pattern("(unclosed");
        assert!(matches!(
            Analyzer::new(&options),
            Err(WordtallyError::InvalidConfiguration(_))
        ));
    }
}
