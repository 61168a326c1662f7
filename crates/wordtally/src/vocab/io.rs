//! # Vocabulary IO
//!
//! Two on-disk vocabulary formats are accepted:
//!
//! * JSON object ``{ "text": index, ... }``; indices must be exactly `0..len`.
//! * Line-delimited text; one term per line, read as a set.
//!
//! Snapshots are always written as JSON.

use std::{
    collections::BTreeSet,
    fs::{self, File},
    io::{BufRead, BufWriter, Read, Write},
    path::Path,
};

use crate::{
    errors::{WTResult, WordtallyError},
    vocab::TermMap,
};

/// A vocabulary loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredVocabulary {
    /// A line-delimited term set; indices are not yet assigned.
    Terms(BTreeSet<String>),

    /// A JSON ``{ text: index }`` mapping.
    Mapping(TermMap),
}

impl StoredVocabulary {
    /// The number of terms.
    pub fn len(&self) -> usize {
        match self {
            StoredVocabulary::Terms(terms) => terms.len(),
            StoredVocabulary::Mapping(map) => map.len(),
        }
    }

    /// Is the stored vocabulary empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve to a [`TermMap`].
    ///
    /// Term sets are assigned indices in sorted order.
    pub fn into_term_map(self) -> TermMap {
        match self {
            StoredVocabulary::Terms(terms) => TermMap::from_ordered(terms),
            StoredVocabulary::Mapping(map) => map,
        }
    }
}

pub(crate) fn read_artifact_bytes(path: &Path) -> WTResult<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => WordtallyError::ArtifactMissing(path.to_path_buf()),
        _ => WordtallyError::Io(e),
    })
}

fn read_stored_terms(
    path: &Path,
    bytes: &[u8],
) -> WTResult<StoredVocabulary> {
    let terms = read_term_lines(bytes).map_err(|e| WordtallyError::malformed(path, e))?;
    Ok(StoredVocabulary::Terms(terms.into_iter().collect()))
}

/// Load a stored vocabulary in either accepted format.
///
/// Format detection: a file whose first non-whitespace byte is `{` or `[`
/// is read as JSON when it parses as a JSON document, and must then be a
/// ``{ text: index }`` object. Truncated JSON is malformed. Anything else,
/// such as a line list starting with `[PAD]`, is read as UTF-8 lines.
///
/// ## Errors
/// * [`WordtallyError::ArtifactMissing`] - no such file.
/// * [`WordtallyError::ArtifactMalformed`] - neither format, or no terms.
pub fn load_stored_vocabulary_path<P: AsRef<Path>>(path: P) -> WTResult<StoredVocabulary> {
    let path = path.as_ref();
    let bytes = read_artifact_bytes(path)?;

    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    let stored = match first {
        None => return Err(WordtallyError::malformed(path, "empty vocabulary file")),
        Some(b'{') | Some(b'[') => match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(_) => StoredVocabulary::Mapping(
                read_term_map_json(bytes.as_slice())
                    .map_err(|e| WordtallyError::malformed(path, e))?,
            ),
            Err(e) if e.is_eof() => return Err(WordtallyError::malformed(path, e)),
            Err(_) => read_stored_terms(path, &bytes)?,
        },
        Some(_) => read_stored_terms(path, &bytes)?,
    };

    if stored.is_empty() {
        return Err(WordtallyError::malformed(path, "no terms"));
    }
    Ok(stored)
}

/// Load a [`TermMap`] from a JSON file.
pub fn load_term_map_json_path<P: AsRef<Path>>(path: P) -> WTResult<TermMap> {
    let path = path.as_ref();
    let bytes = read_artifact_bytes(path)?;
    read_term_map_json(bytes.as_slice()).map_err(|e| WordtallyError::malformed(path, e))
}

/// Read a [`TermMap`] from a JSON reader.
pub fn read_term_map_json<R: Read>(reader: R) -> WTResult<TermMap> {
    Ok(serde_json::from_reader(reader)?)
}

/// Save a [`TermMap`] as a JSON file; overwriting any existing file.
pub fn save_term_map_json_path<P: AsRef<Path>>(
    map: &TermMap,
    path: P,
) -> WTResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_term_map_json(map, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [`TermMap`] as JSON; entries in index order.
pub fn write_term_map_json<W: Write>(
    map: &TermMap,
    writer: &mut W,
) -> WTResult<()> {
    serde_json::to_writer_pretty(&mut *writer, map)?;
    writeln!(writer)?;
    Ok(())
}

/// Read line-delimited terms; lines are trimmed and blank lines skipped.
pub fn read_term_lines<R: BufRead>(reader: R) -> WTResult<Vec<String>> {
    let mut terms = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let term = line.trim();
        if !term.is_empty() {
            terms.push(term.to_string());
        }
    }
    Ok(terms)
}
