//! # Dense ``{ String <-> usize }`` Term Map

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize, Serializer};

use crate::{
    errors::{WTResult, WordtallyError},
    types::{WTHashMap, hash_map_new, hash_map_with_capacity},
};

/// A dense bijection between terms and indices `0..len`.
///
/// `text_to_index` and `index_to_text` are kept in lock-step;
/// [`TermMap::push`] is the only mutator, and it only appends.
///
/// Serializes as a map ``{ term: index }``, ordered by index.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "HashMap<String, usize>")]
pub struct TermMap {
    text_to_index: WTHashMap<String, usize>,
    index_to_text: Vec<String>,
}

impl PartialEq for TermMap {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.index_to_text == other.index_to_text
    }
}

impl Eq for TermMap {}

impl TermMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            text_to_index: hash_map_new(),
            index_to_text: Vec::new(),
        }
    }

    /// Build a map from a term set; indices follow sorted term order.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = terms.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::from_ordered(sorted)
    }

    /// Build a map assigning indices in iteration order; duplicates are ignored.
    pub fn from_ordered<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for term in terms {
            map.push(term.as_ref());
        }
        map
    }

    /// Build a map from ``{ term -> index }`` pairs.
    ///
    /// ## Errors
    /// [`WordtallyError::VocabConflict`] unless the indices are exactly `0..len`.
    pub fn try_from_pairs<I, S>(pairs: I) -> WTResult<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let pairs: Vec<(String, usize)> = pairs.into_iter().map(|(s, i)| (s.into(), i)).collect();
        let len = pairs.len();

        let mut slots: Vec<Option<String>> = vec![None; len];
        for (term, index) in pairs {
            if index >= len {
                return Err(WordtallyError::VocabConflict(format!(
                    "index {index} of {term:?} is outside the dense range 0..{len}"
                )));
            }
            if let Some(prior) = &slots[index] {
                return Err(WordtallyError::VocabConflict(format!(
                    "index {index} is assigned to both {prior:?} and {term:?}"
                )));
            }
            slots[index] = Some(term);
        }

        let index_to_text: Vec<String> = slots.into_iter().flatten().collect();
        let mut text_to_index = hash_map_with_capacity(len);
        for (index, term) in index_to_text.iter().enumerate() {
            if text_to_index.insert(term.clone(), index).is_some() {
                return Err(WordtallyError::VocabConflict(format!(
                    "term {term:?} appears more than once"
                )));
            }
        }

        Ok(Self {
            text_to_index,
            index_to_text,
        })
    }

    /// The number of terms.
    pub fn len(&self) -> usize {
        self.index_to_text.len()
    }

    /// Is the map empty.
    pub fn is_empty(&self) -> bool {
        self.index_to_text.is_empty()
    }

    /// Get the index of `term`, if present.
    pub fn get(
        &self,
        term: &str,
    ) -> Option<usize> {
        self.text_to_index.get(term).copied()
    }

    /// Get the term at `index`, if assigned.
    pub fn term(
        &self,
        index: usize,
    ) -> Option<&str> {
        self.index_to_text.get(index).map(String::as_str)
    }

    /// Does the map contain `term`.
    pub fn contains(
        &self,
        term: &str,
    ) -> bool {
        self.text_to_index.contains_key(term)
    }

    /// Insert `term` if absent; returns its index.
    ///
    /// New terms receive index `len()`. Known terms keep their index.
    pub fn push(
        &mut self,
        term: &str,
    ) -> usize {
        if let Some(&index) = self.text_to_index.get(term) {
            return index;
        }
        let index = self.index_to_text.len();
        self.index_to_text.push(term.to_string());
        self.text_to_index.insert(term.to_string(), index);
        index
    }

    /// Iterate ``(term, index)`` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.index_to_text
            .iter()
            .enumerate()
            .map(|(index, term)| (term.as_str(), index))
    }

    /// Terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.index_to_text
    }

    /// Copy out as a plain ``{ term -> index }`` map.
    pub fn to_hash_map(&self) -> HashMap<String, usize> {
        self.iter().map(|(t, i)| (t.to_string(), i)).collect()
    }
}

impl TryFrom<HashMap<String, usize>> for TermMap {
    type Error = WordtallyError;

    fn try_from(map: HashMap<String, usize>) -> Result<Self, Self::Error> {
        Self::try_from_pairs(map)
    }
}

impl Serialize for TermMap {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
