//! # Corpus Iteration
//!
//! Lazy streams of raw text units over a [`CorpusSource`].

use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::{WTResult, WordtallyError};

/// The unit of text held by a vocabulary entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextUnit {
    /// One whitespace-delimited token.
    #[default]
    Token,

    /// One entire sentence (line).
    Sentence,
}

/// Where corpus text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// In-memory texts; one sentence each.
    Texts(Vec<String>),

    /// A text file; one sentence per line.
    File(PathBuf),
}

impl CorpusSource {
    /// An empty corpus.
    pub fn empty() -> Self {
        CorpusSource::Texts(Vec::new())
    }

    /// Build a source from in-memory texts.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CorpusSource::Texts(texts.into_iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// Build a source from a line-delimited text file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        CorpusSource::File(path.as_ref().to_path_buf())
    }

    /// Open a lazy stream of units.
    ///
    /// ## Errors
    /// * [`WordtallyError::ArtifactMissing`] if a file source does not exist.
    pub fn units(
        &self,
        unit: TextUnit,
    ) -> WTResult<CorpusUnits<'_>> {
        let lines: Box<dyn Iterator<Item = WTResult<String>> + '_> = match self {
            CorpusSource::Texts(texts) => Box::new(texts.iter().map(|t| Ok(t.clone()))),
            CorpusSource::File(path) => {
                let file = File::open(path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => WordtallyError::ArtifactMissing(path.clone()),
                    _ => WordtallyError::Io(e),
                })?;
                Box::new(
                    BufReader::new(file)
                        .lines()
                        .map(|line| line.map_err(WordtallyError::from)),
                )
            }
        };

        Ok(CorpusUnits {
            unit,
            lines,
            pending: VecDeque::new(),
        })
    }

    /// Collect every sentence of the corpus.
    pub fn read_sentences(&self) -> WTResult<Vec<String>> {
        self.units(TextUnit::Sentence)?.collect()
    }
}

/// Lazy unit stream; see [`CorpusSource::units`].
///
/// Blank lines are skipped; sentences are trimmed.
pub struct CorpusUnits<'a> {
    unit: TextUnit,
    lines: Box<dyn Iterator<Item = WTResult<String>> + 'a>,
    pending: VecDeque<String>,
}

impl Iterator for CorpusUnits<'_> {
    type Item = WTResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(unit) = self.pending.pop_front() {
                return Some(Ok(unit));
            }

            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };

            match self.unit {
                TextUnit::Sentence => {
                    let line = line.trim();
                    if !line.is_empty() {
                        return Some(Ok(line.to_string()));
                    }
                }
                TextUnit::Token => {
                    self.pending
                        .extend(line.split_whitespace().map(str::to_string));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_sentence_units() {
        let source = CorpusSource::from_texts(["the cat", "  ", " the dog "]);
        let units: Vec<String> = source
            .units(TextUnit::Sentence)
            .unwrap()
            .collect::<WTResult<_>>()
            .unwrap();
        assert_eq!(units, vec!["the cat", "the dog"]);
    }

    #[test]
    fn test_token_units() {
        let source = CorpusSource::from_texts(["the cat", "", "the  dog\tran"]);
        let units: Vec<String> = source
            .units(TextUnit::Token)
            .unwrap()
            .collect::<WTResult<_>>()
            .unwrap();
        assert_eq!(units, vec!["the", "cat", "the", "dog", "ran"]);
    }

    #[test]
    fn test_file_source() {
        let tmp = tempdir::TempDir::new("corpus_test").unwrap();
        let path = tmp.path().join("corpus.txt");
        fs::write(&path, "one two\n\nthree\n").unwrap();

        let source = CorpusSource::from_path(&path);
        assert_eq!(
            source.read_sentences().unwrap(),
            vec!["one two".to_string(), "three".to_string()]
        );

        let tokens: Vec<String> = source
            .units(TextUnit::Token)
            .unwrap()
            .collect::<WTResult<_>>()
            .unwrap();
        assert_eq!(tokens, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_missing_file() {
        let source = CorpusSource::from_path("/nonexistent/wordtally/corpus.txt");
        assert!(matches!(
            source.units(TextUnit::Sentence),
            Err(WordtallyError::ArtifactMissing(_))
        ));
    }

    #[test]
    fn test_empty() {
        assert_eq!(CorpusSource::empty().units(TextUnit::Token).unwrap().count(), 0);
    }
}
