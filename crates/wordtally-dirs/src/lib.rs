//! # wordtally-dirs
//!
//! Resolution of the directories `wordtally` falls back to when a
//! configured output location is unusable.
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod artifact_dirs;
pub mod path_resolver;
pub mod path_utils;

pub use artifact_dirs::{ArtifactDirs, ArtifactDirsOptions};

/// Environment variable key to override the default data directory.
pub const WORDTALLY_DATA_DIR: &str = "WORDTALLY_DATA_DIR";

/// Sub-directory of the data directory holding trained vectorizers.
pub const MODELS_DIR_NAME: &str = "models";

/// Sub-directory of the data directory holding vocabulary snapshots.
pub const VOCABULARIES_DIR_NAME: &str = "vocabularies";

/// Default [`PathResolver`] for wordtally.
pub const WORDTALLY_DIRS_CONFIG: PathResolver = PathResolver {
    qualifier: "io.crates.wordtally",
    organization: "",
    application: "wordtally",
    data_env_vars: &[WORDTALLY_DATA_DIR],
};
