//! # Output Artifact Paths

use std::path::{Path, PathBuf};

use wordtally_dirs::{ArtifactDirs, ArtifactDirsOptions, path_utils};

use crate::{
    errors::{WTResult, WordtallyError},
    orchestrator::VectorizerOptions,
};

/// File name of the persisted vectorizer blob.
pub const MODEL_FILE_NAME: &str = "vocabularies.bin";

/// File name of the persisted merged vocabulary.
pub const VOCABULARY_FILE_NAME: &str = "updated_vocab.json";

/// The kind of artifact being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A trained vectorizer blob.
    Model,

    /// A vocabulary JSON snapshot.
    Vocabulary,
}

impl ArtifactKind {
    /// The file name written for this kind.
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Model => MODEL_FILE_NAME,
            ArtifactKind::Vocabulary => VOCABULARY_FILE_NAME,
        }
    }

    fn configured_dir(
        self,
        options: &VectorizerOptions,
    ) -> Option<&Path> {
        match self {
            ArtifactKind::Model => options.path_to_save_model.as_deref(),
            ArtifactKind::Vocabulary => options.path_to_save_vocabulary.as_deref(),
        }
    }
}

/// Check that `dir` is a usable output directory, creating it if missing.
///
/// ## Errors
/// [`WordtallyError::InvalidOutputPath`] for an unset, empty,
/// non-directory, or uncreatable path.
pub fn check_output_dir(dir: Option<&Path>) -> WTResult<PathBuf> {
    let dir = match dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        Some(dir) => return Err(WordtallyError::InvalidOutputPath(dir.to_path_buf())),
        None => return Err(WordtallyError::InvalidOutputPath(PathBuf::new())),
    };
    path_utils::ensure_dir(dir).map_err(|_| WordtallyError::InvalidOutputPath(dir.to_path_buf()))
}

/// The default file location for `kind`; its directory is created.
pub fn default_output_file(
    kind: ArtifactKind,
    options: &VectorizerOptions,
) -> WTResult<PathBuf> {
    let dirs = ArtifactDirs::new(
        ArtifactDirsOptions::default()
            .with_model_dir(options.default_model_dir.as_ref())
            .with_vocabulary_dir(options.default_vocabulary_dir.as_ref()),
    )
    .map_err(|e| WordtallyError::External(format!("{e:#}")))?;

    let path = match kind {
        ArtifactKind::Model => dirs.ensure_model_path(kind.file_name()),
        ArtifactKind::Vocabulary => dirs.ensure_vocabulary_path(kind.file_name()),
    };
    path.map_err(|e| WordtallyError::External(format!("{e:#}")))
}

/// Resolve where `kind` is written.
///
/// With `use_default_paths`, or when the configured directory is unusable,
/// the default directory is used; the latter logs a warning.
pub fn resolve_output_file(
    kind: ArtifactKind,
    options: &VectorizerOptions,
    use_default_paths: bool,
) -> WTResult<PathBuf> {
    if use_default_paths {
        return default_output_file(kind, options);
    }

    match check_output_dir(kind.configured_dir(options)) {
        Ok(dir) => Ok(dir.join(kind.file_name())),
        Err(e) => {
            log::warn!("{e}; {kind:?} artifact falls back to the default directory");
            default_output_file(kind, options)
        }
    }
}

/// Write `kind` with `write`, at the location [`resolve_output_file`] picks.
///
/// When writing to a configured location fails, the failure is logged and
/// the write is retried once in the default directory.
///
/// ## Returns
/// The path actually written.
pub fn write_output_file<F>(
    kind: ArtifactKind,
    options: &VectorizerOptions,
    use_default_paths: bool,
    write: F,
) -> WTResult<PathBuf>
where
    F: Fn(&Path) -> WTResult<()>,
{
    let path = resolve_output_file(kind, options, use_default_paths)?;
    let err = match write(&path) {
        Ok(()) => return Ok(path),
        Err(err) => err,
    };

    let fallback = default_output_file(kind, options)?;
    if fallback == path {
        return Err(err);
    }
    log::warn!(
        "failed to write {}: {err}; {kind:?} artifact falls back to the default directory",
        path.display()
    );
    write(&fallback)?;
    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_check_output_dir() {
        let tmp = tempdir::TempDir::new("artifact_paths").unwrap();

        assert!(check_output_dir(None).is_err());
        assert!(check_output_dir(Some(Path::new(""))).is_err());

        let file = tmp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            check_output_dir(Some(&file)),
            Err(WordtallyError::InvalidOutputPath(_))
        ));

        let nested = tmp.path().join("out").join("models");
        assert_eq!(check_output_dir(Some(&nested)).unwrap(), nested);
        assert!(nested.is_dir());
    }

    #[test]
    fn test_resolve_output_file() {
        let tmp = tempdir::TempDir::new("artifact_paths").unwrap();
        let configured = tmp.path().join("configured");
        let fallback_models = tmp.path().join("default-models");
        let fallback_vocab = tmp.path().join("default-vocab");

        let options = VectorizerOptions::default()
            .with_path_to_save_model(Some(&configured))
            .with_default_model_dir(Some(&fallback_models))
            .with_default_vocabulary_dir(Some(&fallback_vocab));

        assert_eq!(
            resolve_output_file(ArtifactKind::Model, &options, false).unwrap(),
            configured.join(MODEL_FILE_NAME)
        );
        assert_eq!(
            resolve_output_file(ArtifactKind::Model, &options, true).unwrap(),
            fallback_models.join(MODEL_FILE_NAME)
        );
        assert_eq!(
            resolve_output_file(ArtifactKind::Vocabulary, &options, false).unwrap(),
            fallback_vocab.join(VOCABULARY_FILE_NAME)
        );
        assert!(fallback_vocab.is_dir());
    }

    #[test]
    fn test_write_output_file_falls_back() {
        let tmp = tempdir::TempDir::new("artifact_paths").unwrap();
        let configured = tmp.path().join("configured");
        let fallback_models = tmp.path().join("default-models");

        // the configured directory exists, but the file name is taken by a directory.
        fs::create_dir_all(configured.join(MODEL_FILE_NAME)).unwrap();

        let options = VectorizerOptions::default()
            .with_path_to_save_model(Some(&configured))
            .with_default_model_dir(Some(&fallback_models));

        let write = |path: &Path| -> WTResult<()> { Ok(fs::write(path, "blob")?) };
        let written = write_output_file(ArtifactKind::Model, &options, false, write).unwrap();
        assert_eq!(written, fallback_models.join(MODEL_FILE_NAME));
        assert_eq!(fs::read_to_string(&written).unwrap(), "blob");

        // failing at both locations returns the error.
        assert!(write_output_file(ArtifactKind::Model, &options, false, |_| {
            Err(WordtallyError::InvalidOutputPath(PathBuf::new()))
        })
        .is_err());
    }
}
