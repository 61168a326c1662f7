//! # Count Vectorizer
//!
//! Converts documents into sparse term-count rows over a fitted vocabulary.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::{
    counting::{Analyzer, SparseCountVector, StopWords},
    errors::{WTResult, WordtallyError},
    types::{WTHashMap, hash_map_new},
    vocab::{TermMap, io::read_artifact_bytes},
};

/// Default token pattern; every run of word characters, including single characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\b\w+\b";

/// Options for [`CountVectorizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountVectorizerOptions {
    /// Keep at most this many terms, by corpus frequency.
    ///
    /// Ignored when a fixed vocabulary is supplied.
    pub max_features: Option<usize>,

    /// Inclusive ``(min_n, max_n)`` n-gram sizes.
    pub ngram_range: (usize, usize),

    /// Lowercase tokens before counting.
    pub lowercase: bool,

    /// Strip diacritics from tokens before counting.
    pub strip_accents: bool,

    /// The token extraction regex.
    pub token_pattern: String,

    /// Tokens to drop before n-gram construction.
    pub stop_words: Option<StopWords>,

    /// A fixed vocabulary; adopted as-is by [`CountVectorizer::fit`].
    pub vocabulary: Option<TermMap>,
}

impl Default for CountVectorizerOptions {
    fn default() -> Self {
        Self {
            max_features: None,
            ngram_range: (1, 1),
            lowercase: true,
            strip_accents: false,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            stop_words: None,
            vocabulary: None,
        }
    }
}

impl CountVectorizerOptions {
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

    /// Set [`Self::ngram_range`].
    pub fn with_ngram_range(
        self,
        min_n: usize,
        max_n: usize,
    ) -> Self {
        Self {
            ngram_range: (min_n, max_n),
            ..self
        }
    }

    /// Set [`Self::lowercase`].
    pub fn with_lowercase(
        self,
        lowercase: bool,
    ) -> Self {
        Self { lowercase, ..self }
    }

    /// Set [`Self::strip_accents`].
    pub fn with_strip_accents(
        self,
        strip_accents: bool,
    ) -> Self {
        Self {
            strip_accents,
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

    /// Set [`Self::stop_words`].
    pub fn with_stop_words(
        self,
        stop_words: Option<StopWords>,
    ) -> Self {
        Self { stop_words, ..self }
    }

    /// Set [`Self::vocabulary`].
    pub fn with_vocabulary(
        self,
        vocabulary: Option<TermMap>,
    ) -> Self {
        Self { vocabulary, ..self }
    }
}

/// A bag-of-terms counter.
///
/// Unfitted until [`CountVectorizer::fit`] succeeds. The fitted vocabulary
/// assigns every term a column; [`CountVectorizer::transform`] drops terms
/// outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountVectorizer {
    options: CountVectorizerOptions,
    vocabulary: Option<TermMap>,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new(CountVectorizerOptions::default())
    }
}

impl CountVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(options: CountVectorizerOptions) -> Self {
        Self {
            options,
            vocabulary: None,
        }
    }

    /// The construction options.
    pub fn options(&self) -> &CountVectorizerOptions {
        &self.options
    }

    /// Compile the analyzer described by the options.
    pub fn build_analyzer(&self) -> WTResult<Analyzer> {
        Analyzer::new(&self.options)
    }

    /// Has [`CountVectorizer::fit`] succeeded.
    pub fn is_fitted(&self) -> bool {
        self.vocabulary.is_some()
    }

    /// The fitted vocabulary.
    pub fn vocabulary(&self) -> Option<&TermMap> {
        self.vocabulary.as_ref()
    }

    /// The fitted terms, in column order.
    pub fn feature_names(&self) -> WTResult<&[String]> {
        self.vocabulary
            .as_ref()
            .map(TermMap::terms)
            .ok_or(WordtallyError::NotFitted)
    }

    /// Learn the vocabulary of `docs`.
    ///
    /// A fixed vocabulary in the options is adopted unchanged. Otherwise the
    /// `max_features` most frequent terms are kept (ties broken by term), and
    /// columns follow sorted term order.
    ///
    /// ## Errors
    /// * [`WordtallyError::InvalidConfiguration`] - bad analyzer options.
    /// * [`WordtallyError::EmptyVocabulary`] - no term survived analysis.
    pub fn fit<I, S>(
        &mut self,
        docs: I,
    ) -> WTResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let analyzer = self.build_analyzer()?;

        let vocabulary = match &self.options.vocabulary {
            Some(fixed) => {
                if fixed.is_empty() {
                    return Err(WordtallyError::EmptyVocabulary);
                }
                fixed.clone()
            }
            None => {
                let mut counts: WTHashMap<String, u64> = hash_map_new();
                for doc in docs {
                    for term in analyzer.analyze(doc.as_ref()) {
                        *counts.entry(term).or_default() += 1;
                    }
                }
                learn_vocabulary(counts, self.options.max_features)?
            }
        };

        log::debug!("fitted count vectorizer: {} terms", vocabulary.len());
        self.vocabulary = Some(vocabulary);
        Ok(self)
    }

    /// Count the fitted terms of each document; one row per document, in order.
    ///
    /// ## Errors
    /// [`WordtallyError::NotFitted`] before a successful fit.
    pub fn transform<I, S>(
        &self,
        docs: I,
    ) -> WTResult<Vec<SparseCountVector>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocabulary = self.vocabulary.as_ref().ok_or(WordtallyError::NotFitted)?;
        let analyzer = self.build_analyzer()?;
        let dim = vocabulary.len();

        Ok(docs
            .into_iter()
            .map(|doc| {
                let mut counts: BTreeMap<usize, u64> = BTreeMap::new();
                for term in analyzer.analyze(doc.as_ref()) {
                    if let Some(index) = vocabulary.get(&term) {
                        *counts.entry(index).or_default() += 1;
                    }
                }
                SparseCountVector::from_counts(dim, counts)
            })
            .collect())
    }

    /// [`CountVectorizer::fit`] then [`CountVectorizer::transform`] over the same documents.
    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        docs: &[S],
    ) -> WTResult<Vec<SparseCountVector>> {
        self.fit(docs)?;
        self.transform(docs)
    }

    /// Save as an opaque binary blob, overwriting any existing file.
    pub fn save_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> WTResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a blob written by [`CountVectorizer::save_path`].
    ///
    /// ## Errors
    /// * [`WordtallyError::ArtifactMissing`] - no such file.
    /// * [`WordtallyError::ArtifactMalformed`] - the file does not decode.
    pub fn load_path<P: AsRef<Path>>(path: P) -> WTResult<Self> {
        let path = path.as_ref();
        let bytes = read_artifact_bytes(path)?;
        Self::from_bytes(&bytes).map_err(|e| WordtallyError::malformed(path, e))
    }

    /// Decode a blob written by [`CountVectorizer::save_path`].
    ///
    /// Decoding is bounded by `bytes.len()`; a corrupt length prefix is an
    /// error, never an oversized allocation.
    pub fn from_bytes(bytes: &[u8]) -> WTResult<Self> {
        Ok(bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .allow_trailing_bytes()
            .with_limit(bytes.len() as u64)
            .deserialize(bytes)?)
    }
}

/// The `max_features` most frequent terms; count descending, then term ascending.
///
/// Without a cap every term is kept, in no particular order.
pub(crate) fn most_frequent_terms(
    counts: WTHashMap<String, u64>,
    max_features: Option<usize>,
) -> Vec<String> {
    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    if let Some(max_features) = max_features
        && max_features < ranked.len()
    {
        ranked.sort_by(|(a_term, a_count), (b_term, b_count)| {
            b_count.cmp(a_count).then_with(|| a_term.cmp(b_term))
        });
        ranked.truncate(max_features);
    }
    ranked.into_iter().map(|(term, _)| term).collect()
}

fn learn_vocabulary(
    counts: WTHashMap<String, u64>,
    max_features: Option<usize>,
) -> WTResult<TermMap> {
    if counts.is_empty() {
        return Err(WordtallyError::EmptyVocabulary);
    }

    let vocabulary = TermMap::from_terms(most_frequent_terms(counts, max_features));
    if vocabulary.is_empty() {
        return Err(WordtallyError::EmptyVocabulary);
    }
    Ok(vocabulary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_transform() {
        let mut vectorizer = CountVectorizer::default();
        assert!(!vectorizer.is_fitted());
        assert!(matches!(
            vectorizer.transform(["a"]),
            Err(WordtallyError::NotFitted)
        ));

        let rows = vectorizer.fit_transform(&["b a a", "c b"]).unwrap();
        assert_eq!(vectorizer.feature_names().unwrap(), &["a", "b", "c"]);
        assert_eq!(rows[0].to_dense(), vec![2, 1, 0]);
        assert_eq!(rows[1].to_dense(), vec![0, 1, 1]);

        let rows = vectorizer.transform(["a b c d", ""]).unwrap();
        assert_eq!(rows[0].to_dense(), vec![1, 1, 1]);
        assert_eq!(rows[1].nnz(), 0);
        assert_eq!(rows[1].dim(), 3);
    }

    #[test]
    fn test_max_features() {
        let options = CountVectorizerOptions::default().with_max_features(Some(2));
        let mut vectorizer = CountVectorizer::new(options);
        vectorizer.fit(["z z z y y x w"]).unwrap();
        assert_eq!(vectorizer.feature_names().unwrap(), &["y", "z"]);

        // ties go to the smaller term.
        let options = CountVectorizerOptions::default().with_max_features(Some(2));
        let mut vectorizer = CountVectorizer::new(options);
        vectorizer.fit(["d c b a"]).unwrap();
        assert_eq!(vectorizer.feature_names().unwrap(), &["a", "b"]);
    }

    #[test]
    fn test_fixed_vocabulary() {
        let fixed = TermMap::from_ordered(["dog", "cat"]);
        let options = CountVectorizerOptions::default()
            .with_vocabulary(Some(fixed.clone()))
            .with_max_features(Some(1));
        let mut vectorizer = CountVectorizer::new(options);
        vectorizer.fit(["fish fish"]).unwrap();

        assert_eq!(vectorizer.vocabulary(), Some(&fixed));
        let rows = vectorizer.transform(["cat cat dog fish"]).unwrap();
        assert_eq!(rows[0].to_dense(), vec![1, 2]);
    }

    #[test]
    fn test_empty_vocabulary() {
        let mut vectorizer = CountVectorizer::default();
        assert!(matches!(
            vectorizer.fit(["", "!!"]),
            Err(WordtallyError::EmptyVocabulary)
        ));

        let options =
            CountVectorizerOptions::default().with_stop_words(Some(StopWords::english()));
        let mut vectorizer = CountVectorizer::new(options);
        assert!(matches!(
            vectorizer.fit(["the and of"]),
            Err(WordtallyError::EmptyVocabulary)
        ));
        assert!(!vectorizer.is_fitted());
    }

    #[test]
    fn test_bigrams() {
        let options = CountVectorizerOptions::default().with_ngram_range(1, 2);
        let mut vectorizer = CountVectorizer::new(options);
        vectorizer.fit(["a b a b"]).unwrap();
        assert_eq!(
            vectorizer.feature_names().unwrap(),
            &["a", "a b", "b", "b a"]
        );
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir::TempDir::new("vectorizer_test").unwrap();
        let path = dir.path().join("vocabularies.bin");

        let options = CountVectorizerOptions::default()
            .with_stop_words(Some(StopWords::new(["x"])))
            .with_ngram_range(1, 2);
        let mut vectorizer = CountVectorizer::new(options);
        vectorizer.fit(["x y z", "y z"]).unwrap();
        vectorizer.save_path(&path).unwrap();

        let loaded = CountVectorizer::load_path(&path).unwrap();
        assert_eq!(loaded, vectorizer);
        assert_eq!(
            loaded.transform(["y z"]).unwrap(),
            vectorizer.transform(["y z"]).unwrap()
        );
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir::TempDir::new("vectorizer_test").unwrap();

        let missing = dir.path().join("missing.bin");
        assert!(matches!(
            CountVectorizer::load_path(&missing),
            Err(WordtallyError::ArtifactMissing(_))
        ));

        let garbage = dir.path().join("garbage.bin");
        std::fs::write(&garbage, b"\x01").unwrap();
        assert!(matches!(
            CountVectorizer::load_path(&garbage),
            Err(WordtallyError::ArtifactMalformed { .. })
        ));

        let oversized = dir.path().join("oversized.bin");
        std::fs::write(&oversized, oversized_length_blob()).unwrap();
        assert!(matches!(
            CountVectorizer::load_path(&oversized),
            Err(WordtallyError::ArtifactMalformed { .. })
        ));
    }

    /// Valid options prefix, then a token pattern claiming ~20 PB of text.
    fn oversized_length_blob() -> Vec<u8> {
        let mut blob = vec![0u8];
        blob.extend(1u64.to_le_bytes());
        blob.extend(1u64.to_le_bytes());
        blob.extend([1u8, 0u8]);
        blob.extend(b"ABCDEFG\x00");
        blob
    }
}
