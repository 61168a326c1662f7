//! # Term Counting
//!
//! The counting capability behind the orchestrator:
//!
//! * [`Analyzer`] - `text -> terms`; regex tokens, stop words, n-grams.
//! * [`CountVectorizer`] - fits a [`crate::vocab::TermMap`] and emits
//!   [`SparseCountVector`] rows.

pub mod analyzer;
pub mod count_vectorizer;
pub mod sparse;
pub mod stop_words;

#[doc(inline)]
pub use analyzer::{Analyzer, NGRAM_SEPARATOR};
#[doc(inline)]
pub use count_vectorizer::{CountVectorizer, CountVectorizerOptions, DEFAULT_TOKEN_PATTERN};
#[doc(inline)]
pub use sparse::SparseCountVector;
#[doc(inline)]
pub use stop_words::{ENGLISH_STOP_WORDS, StopWords};
