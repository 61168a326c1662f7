//! # Term Index Lookup Contract

use core::fmt::Debug;

use crate::{
    errors::{WTResult, WordtallyError},
    vocab::TermMap,
};

/// Common lookup contract for vocabularies.
///
/// Implemented by [`crate::vocab::Vocabulary`] (normalizing, with unknown
/// fallback) and by [`TermMap`] (exact, strict); the orchestrator holds
/// either one as a `Box<dyn TermIndex>`.
pub trait TermIndex: Debug {
    /// The number of entries.
    fn len(&self) -> usize;

    /// Is the index empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the index of `text`.
    fn index_of(
        &self,
        text: &str,
    ) -> WTResult<usize>;

    /// Look up the text stored at `index`.
    fn text_of(
        &self,
        index: usize,
    ) -> WTResult<&str>;

    /// All ``(text, index)`` entries, in index order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, usize)> + '_>;

    /// Copy the entries into a [`TermMap`].
    fn to_term_map(&self) -> TermMap {
        TermMap::from_ordered(self.entries().map(|(text, _)| text))
    }
}

impl TermIndex for TermMap {
    fn len(&self) -> usize {
        TermMap::len(self)
    }

    fn index_of(
        &self,
        text: &str,
    ) -> WTResult<usize> {
        self.get(text)
            .ok_or_else(|| WordtallyError::KeyNotFound(format!("{text:?}")))
    }

    fn text_of(
        &self,
        index: usize,
    ) -> WTResult<&str> {
        self.term(index)
            .ok_or_else(|| WordtallyError::KeyNotFound(format!("index {index}")))
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, usize)> + '_> {
        Box::new(self.iter())
    }

    fn to_term_map(&self) -> TermMap {
        self.clone()
    }
}
