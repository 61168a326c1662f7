//! # Artifact Directories

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{MODELS_DIR_NAME, VOCABULARIES_DIR_NAME, WORDTALLY_DIRS_CONFIG, path_utils};

/// Options for [`ArtifactDirs`].
#[derive(Clone, Default, Debug)]
pub struct ArtifactDirsOptions {
    /// Optional path to the data directory.
    pub data_dir: Option<PathBuf>,

    /// Optional explicit model directory; overrides `data_dir/models`.
    pub model_dir: Option<PathBuf>,

    /// Optional explicit vocabulary directory; overrides `data_dir/vocabularies`.
    pub vocabulary_dir: Option<PathBuf>,
}

impl ArtifactDirsOptions {
    /// Set the data directory.
    pub fn with_data_dir<P: AsRef<Path>>(
        mut self,
        data_dir: Option<P>,
    ) -> Self {
        self.data_dir = data_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the model directory.
    pub fn with_model_dir<P: AsRef<Path>>(
        mut self,
        model_dir: Option<P>,
    ) -> Self {
        self.model_dir = model_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the vocabulary directory.
    pub fn with_vocabulary_dir<P: AsRef<Path>>(
        mut self,
        vocabulary_dir: Option<P>,
    ) -> Self {
        self.vocabulary_dir = vocabulary_dir.map(|p| p.as_ref().to_path_buf());
        self
    }
}

/// Default output directories for trained vectorizers and vocabularies.
///
/// Paths are resolved eagerly, but directories are only created by
/// [`ArtifactDirs::ensure_model_dir`] and [`ArtifactDirs::ensure_vocabulary_dir`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactDirs {
    model_dir: PathBuf,
    vocabulary_dir: PathBuf,
}

impl ArtifactDirs {
    /// Construct a new [`ArtifactDirs`].
    ///
    /// Explicit model/vocabulary dirs win; anything unset is placed
    /// under the resolved data directory.
    pub fn new(options: ArtifactDirsOptions) -> anyhow::Result<Self> {
        let ArtifactDirsOptions {
            data_dir,
            model_dir,
            vocabulary_dir,
        } = options;

        let data_dir = if model_dir.is_some() && vocabulary_dir.is_some() {
            None
        } else {
            Some(
                WORDTALLY_DIRS_CONFIG
                    .resolve_data_dir(data_dir)
                    .context("failed to resolve data directory")?,
            )
        };

        let under_data = |name: &str| -> anyhow::Result<PathBuf> {
            data_dir
                .as_ref()
                .map(|d| d.join(name))
                .context("no data directory available")
        };

        Ok(Self {
            model_dir: match model_dir {
                Some(dir) => dir,
                None => under_data(MODELS_DIR_NAME)?,
            },
            vocabulary_dir: match vocabulary_dir {
                Some(dir) => dir,
                None => under_data(VOCABULARIES_DIR_NAME)?,
            },
        })
    }

    /// Get the model directory.
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Get the vocabulary directory.
    pub fn vocabulary_dir(&self) -> &Path {
        &self.vocabulary_dir
    }

    /// Path of `file` under the model directory, creating the directory.
    pub fn ensure_model_path<F: AsRef<Path>>(
        &self,
        file: F,
    ) -> anyhow::Result<PathBuf> {
        let dir = self.ensure_model_dir()?;
        Ok(path_utils::extend_path(dir, &[] as &[&Path], file))
    }

    /// Path of `file` under the vocabulary directory, creating the directory.
    pub fn ensure_vocabulary_path<F: AsRef<Path>>(
        &self,
        file: F,
    ) -> anyhow::Result<PathBuf> {
        let dir = self.ensure_vocabulary_dir()?;
        Ok(path_utils::extend_path(dir, &[] as &[&Path], file))
    }

    /// Create the model directory if it does not exist.
    pub fn ensure_model_dir(&self) -> anyhow::Result<PathBuf> {
        path_utils::ensure_dir(&self.model_dir).with_context(|| {
            format!(
                "failed to create model directory: {}",
                self.model_dir.display()
            )
        })
    }

    /// Create the vocabulary directory if it does not exist.
    pub fn ensure_vocabulary_dir(&self) -> anyhow::Result<PathBuf> {
        path_utils::ensure_dir(&self.vocabulary_dir).with_context(|| {
            format!(
                "failed to create vocabulary directory: {}",
                self.vocabulary_dir.display()
            )
        })
    }
}
