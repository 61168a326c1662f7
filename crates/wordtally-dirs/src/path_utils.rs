//! # Path Utilities

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

/// Extend a path with a context and filename.
///
/// * Does not check that the path exists.
/// * Does not initialize the containing directories.
///
/// # Arguments
/// * `context` - prefix dirs, inserted between `path` and `filename`.
/// * `filename` - the final file name.
pub fn extend_path<P, S, F>(
    path: P,
    context: &[S],
    filename: F,
) -> PathBuf
where
    P: AsRef<Path>,
    S: AsRef<Path>,
    F: AsRef<Path>,
{
    let mut path = path.as_ref().to_path_buf();
    path.extend(context.iter().map(|s| s.as_ref()));
    path.push(filename.as_ref());
    path
}

/// Make sure `dir` exists and is a directory; creating it if missing.
///
/// # Errors
/// * `dir` names an existing non-directory.
/// * the directory cannot be created.
pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> io::Result<PathBuf> {
    let dir = dir.as_ref();
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("not a directory: {}", dir.display()),
        ));
    }
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}
