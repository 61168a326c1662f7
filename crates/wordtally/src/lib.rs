//! # `wordtally` Stable Vocabularies and Count Vectorizers
//!
//! `wordtally` turns a text corpus into two durable artifacts:
//!
//! * a [`vocab::Vocabulary`]; a bijective, append-only map between
//!   normalized text units and dense integer indices;
//! * a trained [`counting::CountVectorizer`]; which turns text into
//!   [`counting::SparseCountVector`] rows over that vocabulary.
//!
//! See:
//! * [`vocab`] to build, load, save and merge vocabularies.
//! * [`counting`] for the term analyzer and count vectorizer.
//! * [`orchestrator`] for the load / train / merge / persist lifecycle.
//! * [`pipeline`] to chain normalization and vectorization stages.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::WTHash{*}`` type alias machinery.
//!
//! ## Training a Vectorizer
//!
//! ```rust,no_run
//! use wordtally::orchestrator::{VectorizerOptions, VectorizerOrchestrator};
//! use wordtally::pipeline::Batch;
//!
//! let options = VectorizerOptions::default()
//!     .with_ngram_range(1, 2)
//!     .with_path_to_stored_vocabulary(Some("vocab.json"))
//!     .with_update_stored_vocabulary(true)
//!     .with_path_to_save_model(Some("out/models"))
//!     .with_path_to_save_vocabulary(Some("out/vocab"));
//!
//! let mut orchestrator = VectorizerOrchestrator::new(options)?;
//! orchestrator.train(&["the cat sat", "the dog sat"])?;
//!
//! if let Batch::Vectors(rows) = orchestrator.process(&["the cat"])? {
//!     println!("{:?}", rows[0].to_dense());
//! }
//! # Ok::<(), wordtally::errors::WordtallyError>(())
//! ```
#![warn(missing_docs, unused)]

pub mod corpus;
pub mod counting;
pub mod errors;
pub mod normalize;
pub mod orchestrator;
pub mod pipeline;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{WTResult, WordtallyError};

#[doc(inline)]
pub use wordtally_dirs as dirs;
