//! # Append-Only Vocabulary Merge

use std::collections::BTreeSet;

use crate::vocab::TermMap;

/// Merge `new_terms` into a copy of `base`.
///
/// Terms already in `base` keep their index. Missing terms are appended
/// in sorted order, starting at `base.len()`. The result is always a
/// superset of `base`.
pub fn merge_append_only<I, S>(
    base: &TermMap,
    new_terms: I,
) -> TermMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let new_terms: BTreeSet<String> = new_terms
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();

    let mut merged = base.clone();
    for term in &new_terms {
        merged.push(term);
    }

    log::debug!(
        "merged vocabulary: {} prior + {} new terms",
        base.len(),
        merged.len() - base.len()
    );

    merged
}
