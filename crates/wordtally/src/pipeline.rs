//! # Processing Pipelines
//!
//! A [`Pipeline`] is an ordered list of [`ProcessStage`]s; each stage
//! consumes the [`Batch`] produced by the previous one.
//!
//! ```rust,no_run
//! use wordtally::normalize::NormalizationOptions;
//! use wordtally::orchestrator::{VectorizerOptions, VectorizerOrchestrator};
//! use wordtally::pipeline::{Batch, NormalizeStage, Pipeline};
//!
//! let mut orchestrator = VectorizerOrchestrator::new(VectorizerOptions::default())?;
//! orchestrator.train(&["the cat", "the dog"])?;
//!
//! let pipeline = Pipeline::new()
//!     .with_stage(NormalizeStage::new(
//!         NormalizationOptions::none().with_lowercase(true),
//!     ))
//!     .with_stage(orchestrator);
//!
//! let batch = pipeline.run(Batch::from_texts(["The Cat"]))?;
//! # Ok::<(), wordtally::errors::WordtallyError>(())
//! ```

use crate::{
    counting::SparseCountVector,
    errors::{WTResult, WordtallyError},
    normalize::{NormalizationOptions, Normalizer},
    orchestrator::VectorizerOrchestrator,
};

/// The data flowing between stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    /// Raw or normalized texts.
    Texts(Vec<String>),

    /// Sparse count rows; one per input text.
    Vectors(Vec<SparseCountVector>),
}

impl Batch {
    /// Build a text batch.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Batch::Texts(texts.into_iter().map(Into::into).collect())
    }

    /// The number of items.
    pub fn len(&self) -> usize {
        match self {
            Batch::Texts(texts) => texts.len(),
            Batch::Vectors(vectors) => vectors.len(),
        }
    }

    /// Is the batch empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One step of a [`Pipeline`].
pub trait ProcessStage {
    /// A short name, for logs and errors.
    fn name(&self) -> &str;

    /// Transform a batch.
    fn process_batch(
        &self,
        batch: Batch,
    ) -> WTResult<Batch>;
}

fn expect_texts(
    stage: &dyn ProcessStage,
    batch: Batch,
) -> WTResult<Vec<String>> {
    match batch {
        Batch::Texts(texts) => Ok(texts),
        Batch::Vectors(_) => Err(WordtallyError::InvalidConfiguration(format!(
            "stage {:?} expects texts, but received vectors",
            stage.name()
        ))),
    }
}

/// An ordered list of stages, run front to back.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn ProcessStage>>,
}

impl core::fmt::Debug for Pipeline {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

impl Pipeline {
    /// Create an empty pipeline; which passes batches through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn with_stage<S: ProcessStage + 'static>(
        mut self,
        stage: S,
    ) -> Self {
        self.push(Box::new(stage));
        self
    }

    /// Append a boxed stage.
    pub fn push(
        &mut self,
        stage: Box<dyn ProcessStage>,
    ) {
        self.stages.push(stage);
    }

    /// The number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Is the pipeline empty.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The stage names, in order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run `batch` through every stage.
    pub fn run(
        &self,
        batch: Batch,
    ) -> WTResult<Batch> {
        self.stages.iter().try_fold(batch, |batch, stage| {
            log::debug!("pipeline stage {:?}: {} items", stage.name(), batch.len());
            stage.process_batch(batch)
        })
    }
}

/// Applies a [`Normalizer`] to every text.
#[derive(Debug, Clone, Default)]
pub struct NormalizeStage {
    normalizer: Normalizer,
}

impl NormalizeStage {
    /// Create a stage for `options`.
    pub fn new(options: NormalizationOptions) -> Self {
        Self {
            normalizer: options.build(),
        }
    }
}

impl ProcessStage for NormalizeStage {
    fn name(&self) -> &str {
        "normalize"
    }

    fn process_batch(
        &self,
        batch: Batch,
    ) -> WTResult<Batch> {
        let texts = expect_texts(self, batch)?;
        Ok(Batch::Texts(
            texts
                .iter()
                .map(|text| self.normalizer.normalize(text))
                .collect(),
        ))
    }
}

impl ProcessStage for VectorizerOrchestrator {
    fn name(&self) -> &str {
        "vectorize"
    }

    fn process_batch(
        &self,
        batch: Batch,
    ) -> WTResult<Batch> {
        let texts = expect_texts(self, batch)?;
        self.process(&texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        counting::{CountVectorizer, CountVectorizerOptions},
        orchestrator::VectorizerOptions,
    };

    #[test]
    fn test_empty_pipeline() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        let batch = Batch::from_texts(["a"]);
        assert_eq!(pipeline.run(batch.clone()).unwrap(), batch);
    }

    #[test]
    fn test_normalize_then_vectorize() {
        let mut vectorizer =
            CountVectorizer::new(CountVectorizerOptions::default().with_lowercase(false));
        vectorizer.fit(["cafe open"]).unwrap();
        let orchestrator =
            VectorizerOrchestrator::with_vectorizer(VectorizerOptions::default(), vectorizer)
                .unwrap();

        let pipeline = Pipeline::new()
            .with_stage(NormalizeStage::new(
                NormalizationOptions::none()
                    .with_lowercase(true)
                    .with_strip_diacritics(true),
            ))
            .with_stage(orchestrator);
        assert_eq!(pipeline.stage_names(), vec!["normalize", "vectorize"]);

        let Batch::Vectors(rows) = pipeline.run(Batch::from_texts(["Café OPEN café"])).unwrap()
        else {
            panic!("expected vectors");
        };
        assert_eq!(rows[0].to_dense(), vec![2, 1]);
    }

    #[test]
    fn test_stage_rejects_vectors() {
        let pipeline = Pipeline::new()
            .with_stage(NormalizeStage::default())
            .with_stage(NormalizeStage::default());
        let batch = Batch::Vectors(vec![SparseCountVector::new(1)]);
        assert!(matches!(
            pipeline.run(batch),
            Err(WordtallyError::InvalidConfiguration(_))
        ));
    }
}
