//! # Orchestrator Options

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    corpus::TextUnit,
    counting::{CountVectorizerOptions, DEFAULT_TOKEN_PATTERN, StopWords},
    errors::{WTResult, WordtallyError},
    normalize::NormalizationOptions,
    vocab::{DEFAULT_UNKNOWN_TOKEN, TermMap, VocabularyOptions},
};

/// Configuration of a [`crate::orchestrator::VectorizerOrchestrator`].
///
/// Every key is optional in JSON; missing keys take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerOptions {
    /// Cap on distinct counted terms; unlimited when `None`.
    pub max_features: Option<usize>,

    /// Smallest n-gram size; inclusive.
    pub min_ngram: usize,

    /// Largest n-gram size; inclusive.
    pub max_ngram: usize,

    /// Drop stop words before counting.
    pub remove_stop_words: bool,

    /// Custom stop words; the built-in English list is used when empty.
    pub stop_words: Vec<String>,

    /// The token extraction regex.
    pub token_pattern: String,

    /// A previously trained vectorizer blob.
    pub path_to_trained_model: Option<PathBuf>,

    /// A stored vocabulary; line-delimited or a JSON object.
    pub path_to_stored_vocabulary: Option<PathBuf>,

    /// Directory receiving the trained vectorizer.
    pub path_to_save_model: Option<PathBuf>,

    /// Directory receiving the merged vocabulary.
    pub path_to_save_vocabulary: Option<PathBuf>,

    /// Merge the training terms into the stored vocabulary, and persist it.
    pub update_stored_vocabulary: bool,

    /// Let the counter discover its own vocabulary.
    ///
    /// When `false`, a [`crate::vocab::Vocabulary`] is built from the
    /// training corpus and seeds the counter.
    pub use_own_vocabulary_creator: bool,

    /// The unknown-token literal of self-built vocabularies.
    pub unknown_token: String,

    /// Fit a model loaded from disk again on the training corpus.
    pub refit_loaded_model: bool,

    /// Fallback model directory; a platform data directory when `None`.
    pub default_model_dir: Option<PathBuf>,

    /// Fallback vocabulary directory; a platform data directory when `None`.
    pub default_vocabulary_dir: Option<PathBuf>,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self {
            max_features: None,
            min_ngram: 1,
            max_ngram: 1,
            remove_stop_words: false,
            stop_words: Vec::new(),
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            path_to_trained_model: None,
            path_to_stored_vocabulary: None,
            path_to_save_model: None,
            path_to_save_vocabulary: None,
            update_stored_vocabulary: false,
            use_own_vocabulary_creator: true,
            unknown_token: DEFAULT_UNKNOWN_TOKEN.to_string(),
            refit_loaded_model: true,
            default_model_dir: None,
            default_vocabulary_dir: None,
        }
    }
}

impl VectorizerOptions {
    /// Load options from a JSON file.
    pub fn load_json_path<P: AsRef<Path>>(path: P) -> WTResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => WordtallyError::ArtifactMissing(path.to_path_buf()),
            _ => WordtallyError::Io(e),
        })?;
        let options: Self = serde_json::from_slice(&bytes)?;
        options.validate()?;
        Ok(options)
    }

    /// Set [`Self::max_features`].
    pub fn with_max_features(
        self,
        max_features: Option<usize>,
    ) -> Self {
        Self {
            max_features,
            ..self
        }
    }

    /// Set [`Self::min_ngram`] and [`Self::max_ngram`].
    pub fn with_ngram_range(
        self,
        min_ngram: usize,
        max_ngram: usize,
    ) -> Self {
        Self {
            min_ngram,
            max_ngram,
            ..self
        }
    }

    /// Set [`Self::remove_stop_words`].
    pub fn with_remove_stop_words(
        self,
        remove_stop_words: bool,
    ) -> Self {
        Self {
            remove_stop_words,
            ..self
        }
    }

    /// Set [`Self::stop_words`].
    pub fn with_stop_words<I, S>(
        self,
        stop_words: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Set [`Self::token_pattern`].
    pub fn with_token_pattern<S: Into<String>>(
        self,
        token_pattern: S,
    ) -> Self {
        Self {
            token_pattern: token_pattern.into(),
            ..self
        }
    }

    /// Set [`Self::path_to_trained_model`].
    pub fn with_path_to_trained_model<P: AsRef<Path>>(
        self,
        path: Option<P>,
    ) -> Self {
        Self {
            path_to_trained_model: path.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Set [`Self::path_to_stored_vocabulary`].
    pub fn with_path_to_stored_vocabulary<P: AsRef<Path>>(
        self,
        path: Option<P>,
    ) -> Self {
        Self {
            path_to_stored_vocabulary: path.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Set [`Self::path_to_save_model`].
    pub fn with_path_to_save_model<P: AsRef<Path>>(
        self,
        path: Option<P>,
    ) -> Self {
        Self {
            path_to_save_model: path.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Set [`Self::path_to_save_vocabulary`].
    pub fn with_path_to_save_vocabulary<P: AsRef<Path>>(
        self,
        path: Option<P>,
    ) -> Self {
        Self {
            path_to_save_vocabulary: path.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Set [`Self::update_stored_vocabulary`].
    pub fn with_update_stored_vocabulary(
        self,
        update_stored_vocabulary: bool,
    ) -> Self {
        Self {
            update_stored_vocabulary,
            ..self
        }
    }

    /// Set [`Self::use_own_vocabulary_creator`].
    pub fn with_use_own_vocabulary_creator(
        self,
        use_own_vocabulary_creator: bool,
    ) -> Self {
        Self {
            use_own_vocabulary_creator,
            ..self
        }
    }

    /// Set [`Self::unknown_token`].
    pub fn with_unknown_token<S: Into<String>>(
        self,
        unknown_token: S,
    ) -> Self {
        Self {
            unknown_token: unknown_token.into(),
            ..self
        }
    }

    /// Set [`Self::refit_loaded_model`].
    pub fn with_refit_loaded_model(
        self,
        refit_loaded_model: bool,
    ) -> Self {
        Self {
            refit_loaded_model,
            ..self
        }
    }

    /// Set [`Self::default_model_dir`].
    pub fn with_default_model_dir<P: AsRef<Path>>(
        self,
        dir: Option<P>,
    ) -> Self {
        Self {
            default_model_dir: dir.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Set [`Self::default_vocabulary_dir`].
    pub fn with_default_vocabulary_dir<P: AsRef<Path>>(
        self,
        dir: Option<P>,
    ) -> Self {
        Self {
            default_vocabulary_dir: dir.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Check the structural validity of the options.
    ///
    /// ## Errors
    /// [`WordtallyError::InvalidConfiguration`] for a bad n-gram range,
    /// a zero feature cap, an empty unknown token, or a bad token pattern.
    pub fn validate(&self) -> WTResult<()> {
        if self.min_ngram == 0 || self.min_ngram > self.max_ngram {
            return Err(WordtallyError::InvalidConfiguration(format!(
                "invalid n-gram range: ({}, {})",
                self.min_ngram, self.max_ngram
            )));
        }
        if self.max_features == Some(0) {
            return Err(WordtallyError::InvalidConfiguration(
                "max_features must be positive".to_string(),
            ));
        }
        if self.unknown_token.is_empty() {
            return Err(WordtallyError::InvalidConfiguration(
                "unknown_token must not be empty".to_string(),
            ));
        }
        if let Err(e) = regex::Regex::new(&self.token_pattern) {
            return Err(WordtallyError::InvalidConfiguration(format!(
                "invalid token pattern {:?}: {e}",
                self.token_pattern
            )));
        }
        Ok(())
    }

    /// The stop words applied by the counter, if any.
    pub fn resolved_stop_words(&self) -> Option<StopWords> {
        if !self.remove_stop_words {
            None
        } else if self.stop_words.is_empty() {
            Some(StopWords::english())
        } else {
            Some(StopWords::new(&self.stop_words))
        }
    }

    /// Counter parameters, seeded with `vocabulary`.
    ///
    /// Case and accent folding are never re-applied by the counter.
    pub fn counter_options(
        &self,
        vocabulary: Option<TermMap>,
    ) -> CountVectorizerOptions {
        CountVectorizerOptions::default()
            .with_max_features(self.max_features)
            .with_ngram_range(self.min_ngram, self.max_ngram)
            .with_lowercase(false)
            .with_strip_accents(false)
            .with_token_pattern(self.token_pattern.clone())
            .with_stop_words(self.resolved_stop_words())
            .with_vocabulary(vocabulary)
    }

    /// Options of a vocabulary built from analyzed counter terms.
    ///
    /// Terms are already analyzed; no further normalization applies.
    pub fn builder_vocabulary_options(&self) -> VocabularyOptions {
        VocabularyOptions::default()
            .with_unit(TextUnit::Token)
            .with_normalization(NormalizationOptions::none())
            .with_unknown_token(Some(self.unknown_token.clone()))
            .with_add_unknown(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let options: VectorizerOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, VectorizerOptions::default());
        assert_eq!(options.unknown_token, "<<UNK>>");
        assert!(options.use_own_vocabulary_creator);
        assert!(options.refit_loaded_model);
        assert!(options.validate().is_ok());

        let options: VectorizerOptions = serde_json::from_str(
            r#"{"max_features": 10, "max_ngram": 2, "path_to_save_model": "/tmp/m"}"#,
        )
        .unwrap();
        assert_eq!(options.max_features, Some(10));
        assert_eq!(options.min_ngram, 1);
        assert_eq!(options.max_ngram, 2);
        assert_eq!(options.path_to_save_model, Some(PathBuf::from("/tmp/m")));
    }

    #[test]
    fn test_validate() {
        let base = VectorizerOptions::default();
        assert!(base.clone().with_ngram_range(0, 1).validate().is_err());
        assert!(base.clone().with_ngram_range(2, 1).validate().is_err());
        assert!(base.clone().with_max_features(Some(0)).validate().is_err());
        assert!(base.clone().with_unknown_token("").validate().is_err());
        assert!(matches!(
            base.clone().with_token_pattern("[").validate(),
            Err(WordtallyError::InvalidConfiguration(_))
        ));
        assert!(base.with_ngram_range(1, 3).validate().is_ok());
    }

    #[test]
    fn test_counter_options() {
        let options = VectorizerOptions::default()
            .with_max_features(Some(5))
            .with_ngram_range(1, 2);
        let counter = options.counter_options(None);
        assert_eq!(counter.max_features, Some(5));
        assert_eq!(counter.ngram_range, (1, 2));
        assert!(!counter.lowercase);
        assert!(!counter.strip_accents);
        assert!(counter.stop_words.is_none());

        let counter = options
            .clone()
            .with_remove_stop_words(true)
            .counter_options(None);
        assert!(counter.stop_words.unwrap().contains("the"));

        let counter = options
            .with_remove_stop_words(true)
            .with_stop_words(["el", "la"])
            .counter_options(Some(TermMap::from_ordered(["x"])));
        let stop_words = counter.stop_words.unwrap();
        assert!(stop_words.contains("el"));
        assert!(!stop_words.contains("the"));
        assert_eq!(counter.vocabulary.unwrap().len(), 1);
    }

    #[test]
    fn test_load_json_path() {
        let dir = tempdir::TempDir::new("options_test").unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"remove_stop_words": true, "unknown_token": "<unk>"}"#).unwrap();

        let options = VectorizerOptions::load_json_path(&path).unwrap();
        assert!(options.remove_stop_words);
        assert_eq!(options.unknown_token, "<unk>");

        fs::write(&path, r#"{"min_ngram": 3}"#).unwrap();
        assert!(matches!(
            VectorizerOptions::load_json_path(&path),
            Err(WordtallyError::InvalidConfiguration(_))
        ));
    }
}
