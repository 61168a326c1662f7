//! # Vocabulary
//!
//! This module provides the vocabulary and related io mechanisms.
//!
//! * [`TermMap`] - a dense ``{ String <-> usize }`` bijection; append-only.
//! * [`Vocabulary`] - a [`TermMap`] behind a fixed normalizer, with an
//!   optional unknown token at index `0`.
//! * [`TermIndex`] - the lookup contract both satisfy.
//! * [`merge_append_only`] - grow a stored vocabulary without moving any index.

pub mod io;
pub mod merge;
pub mod term_index;
pub mod term_map;
pub mod vocabulary;

#[doc(inline)]
pub use io::StoredVocabulary;
#[doc(inline)]
pub use merge::merge_append_only;
#[doc(inline)]
pub use term_index::TermIndex;
#[doc(inline)]
pub use term_map::TermMap;
#[doc(inline)]
pub use vocabulary::{DEFAULT_UNKNOWN_TOKEN, Vocabulary, VocabularyOptions};
