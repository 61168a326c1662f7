//! # Vectorizer Orchestrator
//!
//! Resolves a count vectorizer for a training run:
//!
//! 1. reuse the active vectorizer;
//! 2. else load a trained vectorizer from disk;
//! 3. else fit a fresh one, seeded by a stored vocabulary if one loads,
//!    or by the configured vocabulary creator.
//!
//! The fitted vectorizer, and optionally a merged vocabulary, are then
//! persisted. Missing or malformed artifacts are never fatal; each one
//! degrades to the next strategy with a warning.

use std::path::PathBuf;

use crate::{
    counting::{CountVectorizer, count_vectorizer::most_frequent_terms},
    errors::{WTResult, WordtallyError},
    orchestrator::{
        VectorizerOptions,
        artifact_paths::{ArtifactKind, write_output_file},
    },
    pipeline::Batch,
    types::{WTHashMap, WTHashSet, hash_map_new},
    vocab::{
        TermIndex,
        TermMap,
        Vocabulary,
        io::{load_stored_vocabulary_path, save_term_map_json_path},
        merge_append_only,
    },
};

/// Where an orchestrator is in its training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Nothing resolved yet.
    #[default]
    Start,

    /// A trained vectorizer was loaded from disk.
    LoadedExistingModel,

    /// A fresh vectorizer is being configured and fit.
    TrainingFresh,

    /// A vectorizer is active.
    Trained,

    /// The active vectorizer was written to disk.
    Persisted,
}

/// The files written by [`VectorizerOrchestrator::persist`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedArtifacts {
    /// The vectorizer blob; `None` when there was no active vectorizer.
    pub model_path: Option<PathBuf>,

    /// The merged vocabulary snapshot, when one was written.
    pub vocabulary_path: Option<PathBuf>,
}

/// Owns one count vectorizer and its load/train/merge/persist lifecycle.
#[derive(Debug)]
pub struct VectorizerOrchestrator {
    options: VectorizerOptions,
    state: LifecycleState,
    vectorizer: Option<CountVectorizer>,
    vocabulary: Option<Box<dyn TermIndex>>,
    updated_vocabulary: Option<TermMap>,
    training_corpus: Vec<String>,
}

impl VectorizerOrchestrator {
    /// Create an orchestrator with no active vectorizer.
    ///
    /// ## Errors
    /// [`WordtallyError::InvalidConfiguration`] if `options` do not validate.
    pub fn new(options: VectorizerOptions) -> WTResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            state: LifecycleState::Start,
            vectorizer: None,
            vocabulary: None,
            updated_vocabulary: None,
            training_corpus: Vec::new(),
        })
    }

    /// Create an orchestrator around an already trained vectorizer.
    pub fn with_vectorizer(
        options: VectorizerOptions,
        vectorizer: CountVectorizer,
    ) -> WTResult<Self> {
        let mut orchestrator = Self::new(options)?;
        orchestrator.load_trained_vectorizer(Some(vectorizer));
        Ok(orchestrator)
    }

    /// The configuration.
    pub fn options(&self) -> &VectorizerOptions {
        &self.options
    }

    /// The lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The active vectorizer.
    pub fn vectorizer(&self) -> Option<&CountVectorizer> {
        self.vectorizer.as_ref()
    }

    /// The vocabulary that seeded the active vectorizer, if any.
    pub fn vocabulary(&self) -> Option<&dyn TermIndex> {
        self.vocabulary.as_deref()
    }

    /// The last merged vocabulary written by [`Self::persist`].
    pub fn updated_vocabulary(&self) -> Option<&TermMap> {
        self.updated_vocabulary.as_ref()
    }

    /// The corpus of the last [`Self::train`] call.
    pub fn training_corpus(&self) -> &[String] {
        &self.training_corpus
    }

    /// Adopt `vectorizer`, or load one from `path_to_trained_model`.
    ///
    /// Returns whether a vectorizer is now active. Load failures are
    /// logged, not returned.
    pub fn load_trained_vectorizer(
        &mut self,
        vectorizer: Option<CountVectorizer>,
    ) -> bool {
        if let Some(vectorizer) = vectorizer {
            log::debug!("adopting supplied vectorizer");
            self.vectorizer = Some(vectorizer);
            self.state = LifecycleState::Trained;
            return true;
        }

        let Some(path) = self
            .options
            .path_to_trained_model
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
        else {
            log::warn!("no trained vectorizer configured in path_to_trained_model");
            return false;
        };

        match CountVectorizer::load_path(path) {
            Ok(vectorizer) => {
                log::info!("loaded trained vectorizer: {}", path.display());
                self.vectorizer = Some(vectorizer);
                self.state = LifecycleState::LoadedExistingModel;
                true
            }
            Err(e) => {
                log::warn!("no usable trained vectorizer: {e}");
                false
            }
        }
    }

    /// Resolve and fit a vectorizer over `corpus`, then persist it.
    ///
    /// A vectorizer that is already active is kept without refitting.
    ///
    /// ## Errors
    /// Fitting errors, such as [`WordtallyError::EmptyVocabulary`], and
    /// failures to write the artifacts. Unusable input artifacts are
    /// recovered from.
    pub fn train<S: AsRef<str>>(
        &mut self,
        corpus: &[S],
    ) -> WTResult<()> {
        self.training_corpus = corpus.iter().map(|s| s.as_ref().to_string()).collect();

        if self.vectorizer.is_some() {
            log::debug!("vectorizer already active; skipping fit");
        } else if self.load_trained_vectorizer(None) {
            self.train_loaded_vectorizer()?;
        } else {
            self.state = LifecycleState::TrainingFresh;
            self.train_vectorizer_from_scratch()?;
        }
        self.state = LifecycleState::Trained;

        self.persist(false)?;
        Ok(())
    }

    fn train_loaded_vectorizer(&mut self) -> WTResult<()> {
        if !self.options.refit_loaded_model {
            log::info!("reusing loaded vectorizer as-is");
            return Ok(());
        }
        if let Some(vectorizer) = self.vectorizer.as_mut() {
            log::info!("refitting loaded vectorizer on {} texts", self.training_corpus.len());
            vectorizer.fit(&self.training_corpus)?;
            log::info!("finished refitting vectorizer");
        }
        Ok(())
    }

    fn train_vectorizer_from_scratch(&mut self) -> WTResult<()> {
        self.vocabulary = match self.load_stored_vocabulary() {
            Some(stored) => Some(stored),
            None => self.create_vocabulary()?,
        };

        let seed = self.vocabulary.as_ref().map(|v| v.to_term_map());
        let mut vectorizer = CountVectorizer::new(self.options.counter_options(seed));

        log::info!("training vectorizer on {} texts", self.training_corpus.len());
        vectorizer.fit(&self.training_corpus)?;
        log::info!(
            "finished training vectorizer: {} terms",
            vectorizer.vocabulary().map_or(0, TermMap::len)
        );

        self.vectorizer = Some(vectorizer);
        Ok(())
    }

    fn load_stored_vocabulary(&self) -> Option<Box<dyn TermIndex>> {
        let Some(path) = self
            .options
            .path_to_stored_vocabulary
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
        else {
            log::warn!("no stored vocabulary configured in path_to_stored_vocabulary");
            return None;
        };

        match load_stored_vocabulary_path(path) {
            Ok(stored) => {
                log::info!(
                    "loaded stored vocabulary: {} ({} terms)",
                    path.display(),
                    stored.len()
                );
                Some(Box::new(stored.into_term_map()) as Box<dyn TermIndex>)
            }
            Err(e) => {
                log::warn!("no usable stored vocabulary: {e}");
                None
            }
        }
    }

    fn create_vocabulary(&self) -> WTResult<Option<Box<dyn TermIndex>>> {
        if self.options.use_own_vocabulary_creator {
            log::info!("the vectorizer will learn a new vocabulary");
            return Ok(None);
        }

        log::info!("building a new vocabulary from the training corpus");
        let analyzer = CountVectorizer::new(self.options.counter_options(None)).build_analyzer()?;
        let terms: Vec<String> = self
            .training_corpus
            .iter()
            .flat_map(|text| analyzer.analyze(text))
            .collect();

        // the seeded counter adopts this vocabulary as-is; so the cap applies here.
        let kept: Option<WTHashSet<String>> = self.options.max_features.map(|max_features| {
            let mut counts: WTHashMap<String, u64> = hash_map_new();
            for term in &terms {
                *counts.entry(term.clone()).or_default() += 1;
            }
            most_frequent_terms(counts, Some(max_features))
                .into_iter()
                .collect()
        });

        let vocabulary = Vocabulary::from_units(
            terms
                .into_iter()
                .filter(|term| kept.as_ref().is_none_or(|kept| kept.contains(term))),
            self.options.builder_vocabulary_options(),
        )?;
        Ok(Some(Box::new(vocabulary) as Box<dyn TermIndex>))
    }

    /// Terms of the training corpus merged, append-only, into the fitted vocabulary.
    fn merged_vocabulary(
        &self,
        vectorizer: &CountVectorizer,
    ) -> WTResult<TermMap> {
        let fitted = vectorizer.vocabulary().ok_or(WordtallyError::NotFitted)?;
        let analyzer = vectorizer.build_analyzer()?;
        Ok(merge_append_only(
            fitted,
            self.training_corpus
                .iter()
                .flat_map(|text| analyzer.analyze(text)),
        ))
    }

    /// Write the active vectorizer, and the merged vocabulary when configured.
    ///
    /// Unusable output directories, and failed writes to configured
    /// locations, fall back to the default directories.
    ///
    /// ## Errors
    /// Failures to write to the default locations.
    pub fn persist(
        &mut self,
        use_default_paths: bool,
    ) -> WTResult<PersistedArtifacts> {
        let Some(vectorizer) = self.vectorizer.as_ref() else {
            log::warn!("no active vectorizer; nothing persisted");
            return Ok(PersistedArtifacts::default());
        };

        let model_path = write_output_file(
            ArtifactKind::Model,
            &self.options,
            use_default_paths,
            |path| vectorizer.save_path(path),
        )?;
        log::info!("vectorizer stored at: {}", model_path.display());

        let mut vocabulary_path = None;
        if self.options.update_stored_vocabulary {
            if self.vocabulary.is_some() {
                let merged = self.merged_vocabulary(vectorizer)?;
                let path = write_output_file(
                    ArtifactKind::Vocabulary,
                    &self.options,
                    use_default_paths,
                    |path| save_term_map_json_path(&merged, path),
                )?;
                log::info!(
                    "vocabulary stored at: {} ({} terms)",
                    path.display(),
                    merged.len()
                );

                self.updated_vocabulary = Some(merged);
                vocabulary_path = Some(path);
            } else {
                log::warn!("no stored vocabulary was resolved; vocabulary not updated");
            }
        }

        self.state = LifecycleState::Persisted;
        Ok(PersistedArtifacts {
            model_path: Some(model_path),
            vocabulary_path,
        })
    }

    /// Vectorize `corpus` with the active vectorizer.
    ///
    /// Without a fitted vectorizer the input is passed through unchanged.
    pub fn process<S: AsRef<str>>(
        &self,
        corpus: &[S],
    ) -> WTResult<Batch> {
        match self.vectorizer.as_ref() {
            Some(vectorizer) if vectorizer.is_fitted() => {
                Ok(Batch::Vectors(vectorizer.transform(corpus)?))
            }
            _ => {
                log::warn!("{}; passing input through", WordtallyError::NotTrained);
                Ok(Batch::Texts(
                    corpus.iter().map(|s| s.as_ref().to_string()).collect(),
                ))
            }
        }
    }
}
