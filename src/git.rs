//! Utilities for interacting with `git` repositories for the `bookkeeper` application.

use anyhow::{anyhow, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Returns the repository containing `path`, and [None] if `path` is not within a git
/// repository or an error occurs.
pub fn discover_repository<P: AsRef<Path>>(path: P) -> Option<Repository> {
    Repository::discover(path).ok()
}

/// Extension trait for the [Repository] type to expose helper functions used by `bookkeeper`.
pub trait RepositoryExt {
    /// Returns the root of the repository's working copy.
    ///
    /// ## Returns
    /// - `Result<PathBuf>` - The working copy root, or an error if the repository is bare.
    fn working_copy_root(&self) -> Result<PathBuf>;

    /// Returns the id of the commit that `HEAD` points to, in [String] form.
    ///
    /// ## Returns
    /// - `Result<String>` - The full commit id, or an error if `HEAD` is unborn or detached from a commit.
    fn head_commit_id(&self) -> Result<String>;
}

impl RepositoryExt for Repository {
    fn working_copy_root(&self) -> Result<PathBuf> {
        self.workdir()
            .map(Path::to_path_buf)
            .ok_or(anyhow!("Repository does not have a working copy"))
    }

    fn head_commit_id(&self) -> Result<String> {
        let commit = self.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }
}
