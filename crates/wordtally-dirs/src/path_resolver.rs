//! # Data Directory Resolver

use std::{
    env,
    path::{Path, PathBuf},
};

use directories_next::ProjectDirs;

/// Static description of where an application keeps its data.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// Environment variables overriding the data directory; first non-empty wins.
    pub data_env_vars: &'static [&'static str],
}

impl PathResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.qualifier, self.organization, self.application)
    }

    /// The first non-empty data directory override in the environment.
    pub fn env_data_dir(&self) -> Option<PathBuf> {
        self.data_env_vars
            .iter()
            .filter_map(|var| env::var_os(var))
            .find(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// Resolve the data directory.
    ///
    /// Resolution order:
    /// 1. `path`, if present;
    /// 2. [`Self::env_data_dir`];
    /// 3. the platform data directory; e.g. `$XDG_DATA_HOME/wordtally` or
    ///    `$HOME/.local/share/wordtally` on Linux.
    pub fn resolve_data_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        path.map(|p| p.as_ref().to_path_buf())
            .or_else(|| self.env_data_dir())
            .or_else(|| {
                self.project_dirs()
                    .map(|pds| pds.data_dir().to_path_buf())
            })
    }
}
