//! # Normalizing Vocabulary
//!
//! [`Vocabulary`] is a [`TermMap`] fronted by a fixed [`Normalizer`],
//! with an optional reserved unknown token at index `0`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    corpus::{CorpusSource, TextUnit},
    errors::{WTResult, WordtallyError},
    normalize::{NormalizationOptions, Normalizer},
    vocab::{TermIndex, TermMap, io},
};

/// The default unknown token literal.
pub const DEFAULT_UNKNOWN_TOKEN: &str = "<<UNK>>";

/// Options for [`Vocabulary`]; immutable once the vocabulary exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyOptions {
    /// Token or sentence units.
    pub unit: TextUnit,

    /// Normalizations applied to every added or looked-up text.
    pub normalization: NormalizationOptions,

    /// The unknown token literal; reserved at index `0` when present.
    pub unknown_token: Option<String>,

    /// Fall back to the unknown index for out-of-vocabulary lookups.
    pub add_unknown: bool,
}

impl Default for VocabularyOptions {
    fn default() -> Self {
        Self {
            unit: TextUnit::Token,
            normalization: NormalizationOptions::none(),
            unknown_token: Some(DEFAULT_UNKNOWN_TOKEN.to_string()),
            add_unknown: true,
        }
    }
}

impl VocabularyOptions {
    /// Set the text unit.
    pub fn with_unit(
        mut self,
        unit: TextUnit,
    ) -> Self {
        self.unit = unit;
        self
    }

    /// Set the normalization options.
    pub fn with_normalization(
        mut self,
        normalization: NormalizationOptions,
    ) -> Self {
        self.normalization = normalization;
        self
    }

    /// Set the unknown token literal.
    pub fn with_unknown_token<S: Into<String>>(
        mut self,
        unknown_token: Option<S>,
    ) -> Self {
        self.unknown_token = unknown_token.map(Into::into);
        self
    }

    /// Set unknown-token fallback.
    pub fn with_add_unknown(
        mut self,
        add_unknown: bool,
    ) -> Self {
        self.add_unknown = add_unknown;
        self
    }

    /// Check the options, returning the normalized unknown token (if any).
    ///
    /// ## Errors
    /// [`WordtallyError::InvalidConfiguration`] if:
    /// * `add_unknown` is set but there is no unknown token;
    /// * the unknown token is empty, has a line break, or normalizes to nothing.
    pub fn validate(&self) -> WTResult<Option<String>> {
        let Some(literal) = self.unknown_token.as_deref() else {
            if self.add_unknown {
                return Err(WordtallyError::InvalidConfiguration(
                    "unknown-token fallback requires an unknown token".to_string(),
                ));
            }
            return Ok(None);
        };

        if literal.is_empty() {
            return Err(WordtallyError::InvalidConfiguration(
                "unknown token must be a non-empty string".to_string(),
            ));
        }
        if literal.contains(['\n', '\r']) {
            return Err(WordtallyError::InvalidConfiguration(format!(
                "unknown token must be a single line: {literal:?}"
            )));
        }

        let normalized = self.normalization.build().normalize(literal);
        if normalized.is_empty() {
            return Err(WordtallyError::InvalidConfiguration(format!(
                "unknown token {literal:?} is empty after normalization"
            )));
        }
        Ok(Some(normalized))
    }
}

/// Bidirectional index over normalized text units.
///
/// ## Invariants
/// * indices are dense: `0..len()`;
/// * the unknown token, when configured, is index `0`;
/// * entries are never reassigned or removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    options: VocabularyOptions,
    normalizer: Normalizer,
    terms: TermMap,
    unknown_index: Option<usize>,
}

impl Vocabulary {
    /// Build an empty vocabulary; holding only the unknown token, if configured.
    pub fn new(options: VocabularyOptions) -> WTResult<Self> {
        let unknown = options.validate()?;
        let normalizer = options.normalization.build();

        let mut vocab = Self {
            options,
            normalizer,
            terms: TermMap::new(),
            unknown_index: None,
        };

        if let Some(unknown) = unknown {
            vocab.unknown_index = Some(vocab.terms.push(&unknown));
        }

        Ok(vocab)
    }

    /// Build a vocabulary from any iterator of raw text units.
    pub fn from_units<I, S>(
        units: I,
        options: VocabularyOptions,
    ) -> WTResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::new(options)?;
        for unit in units {
            vocab.add_text(unit.as_ref());
        }
        Ok(vocab)
    }

    /// Build a vocabulary by streaming every unit of `source`.
    ///
    /// The source is split according to `options.unit`, and consumed eagerly.
    pub fn from_corpus(
        source: &CorpusSource,
        options: VocabularyOptions,
    ) -> WTResult<Self> {
        let mut vocab = Self::new(options)?;
        for unit in source.units(vocab.options.unit)? {
            vocab.add_text(&unit?);
        }
        Ok(vocab)
    }

    /// Rebuild a vocabulary from a persisted snapshot.
    ///
    /// Keys are taken as already normalized.
    ///
    /// ## Errors
    /// [`WordtallyError::VocabConflict`] if the snapshot does not hold the
    /// configured unknown token at index `0`.
    pub fn from_term_map(
        terms: TermMap,
        options: VocabularyOptions,
    ) -> WTResult<Self> {
        let unknown = options.validate()?;
        let normalizer = options.normalization.build();

        let unknown_index = match unknown {
            Some(unknown) => {
                if terms.get(&unknown) != Some(0) {
                    return Err(WordtallyError::VocabConflict(format!(
                        "snapshot must hold unknown token {unknown:?} at index 0"
                    )));
                }
                Some(0)
            }
            None => None,
        };

        Ok(Self {
            options,
            normalizer,
            terms,
            unknown_index,
        })
    }

    /// Load a JSON snapshot written by [`Vocabulary::save_json_path`].
    pub fn load_json_path<P: AsRef<Path>>(
        path: P,
        options: VocabularyOptions,
    ) -> WTResult<Self> {
        Self::from_term_map(io::load_term_map_json_path(path)?, options)
    }

    /// Save the ``{ text: index }`` mapping as JSON.
    pub fn save_json_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> WTResult<()> {
        io::save_term_map_json_path(&self.terms, path)
    }

    /// The construction options.
    pub fn options(&self) -> &VocabularyOptions {
        &self.options
    }

    /// The underlying mapping.
    pub fn term_map(&self) -> &TermMap {
        &self.terms
    }

    /// The unknown token index; `None` when no unknown token is reserved.
    pub fn unknown_index(&self) -> Option<usize> {
        self.unknown_index
    }

    /// The number of entries, including the unknown token.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Is the vocabulary empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Apply this vocabulary's normalization chain.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        self.normalizer.normalize(text)
    }

    /// Add `text`, returning its index.
    ///
    /// Idempotent: a text whose normalized form is known keeps its index.
    pub fn add_text(
        &mut self,
        text: &str,
    ) -> usize {
        let key = self.normalize(text);
        self.terms.push(&key)
    }

    /// Look up the index of `text` (normalized first).
    ///
    /// ## Errors
    /// [`WordtallyError::KeyNotFound`] if absent and fallback is disabled.
    pub fn index_of(
        &self,
        text: &str,
    ) -> WTResult<usize> {
        let key = self.normalize(text);
        if let Some(index) = self.terms.get(&key) {
            return Ok(index);
        }
        match self.unknown_index {
            Some(unknown) if self.options.add_unknown => Ok(unknown),
            _ => Err(WordtallyError::KeyNotFound(format!("{text:?}"))),
        }
    }

    /// Look up the stored (normalized) text at `index`.
    pub fn text_of(
        &self,
        index: usize,
    ) -> WTResult<&str> {
        self.terms
            .term(index)
            .ok_or_else(|| WordtallyError::KeyNotFound(format!("index {index}")))
    }

    /// Iterate the stored units, in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.terms().iter().map(String::as_str)
    }

    /// Iterate the stored units as token lists.
    ///
    /// Sentence units are split on whitespace; token units yield one-element lists.
    pub fn iter_split(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        let unit = self.options.unit;
        self.iter().map(move |text| match unit {
            TextUnit::Sentence => text.split_whitespace().collect(),
            TextUnit::Token => vec![text],
        })
    }
}

impl TermIndex for Vocabulary {
    fn len(&self) -> usize {
        Vocabulary::len(self)
    }

    fn index_of(
        &self,
        text: &str,
    ) -> WTResult<usize> {
        Vocabulary::index_of(self, text)
    }

    fn text_of(
        &self,
        index: usize,
    ) -> WTResult<&str> {
        Vocabulary::text_of(self, index)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, usize)> + '_> {
        Box::new(self.terms.iter())
    }

    fn to_term_map(&self) -> TermMap {
        self.terms.clone()
    }
}
