//! # Vectorizer Lifecycle
//!
//! [`VectorizerOrchestrator`] decides whether a vectorizer is loaded,
//! trained fresh, or trained against a stored vocabulary; and where the
//! results are written.

pub mod artifact_paths;
pub mod options;

#[allow(clippy::module_inception)]
pub mod orchestrator;

#[doc(inline)]
pub use artifact_paths::{ArtifactKind, MODEL_FILE_NAME, VOCABULARY_FILE_NAME};
#[doc(inline)]
pub use options::VectorizerOptions;
#[doc(inline)]
pub use orchestrator::{LifecycleState, PersistedArtifacts, VectorizerOrchestrator};
