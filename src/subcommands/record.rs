//! `record` subcommand.

use crate::git::{discover_repository, RepositoryExt};
use anyhow::{anyhow, Result};
use bookkeeper::metadata::{
    load_target_branch_metadata, write_target_branch_metadata, TargetBranchMetadata,
};
use clap::Args;
use nu_ansi_term::Color::Blue;
use std::path::{Path, PathBuf};
use tracing::info;

/// CLI arguments for the `record` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct RecordCmd {
    /// The source commit to record. Defaults to `HEAD` of the repository at `--source`.
    #[arg(long)]
    pub commit: Option<String>,
    /// The repository to resolve `HEAD` from when `--commit` is not given.
    #[arg(long, default_value = ".")]
    pub source: PathBuf,
    /// An image substitution applied to the target branch. May be repeated.
    #[arg(long = "image")]
    pub images: Vec<String>,
    /// Replace existing metadata without prompting.
    #[arg(short, long)]
    pub yes: bool,
}

impl RecordCmd {
    /// Run the `record` subcommand.
    pub fn run(self, working_copy: &Path) -> Result<()> {
        let metadata = self.metadata()?;

        if let Some(existing) = load_target_branch_metadata(working_copy)? {
            if !self.yes && existing.source_commit != metadata.source_commit {
                let prompt = format!(
                    "Replace recorded source commit `{}` with `{}`?",
                    Blue.paint(&existing.source_commit),
                    Blue.paint(&metadata.source_commit)
                );
                if !inquire::Confirm::new(prompt.as_str())
                    .with_default(false)
                    .prompt()?
                {
                    return Ok(());
                }
            }
        }

        write_target_branch_metadata(&metadata, working_copy)?;
        info!(source_commit = %metadata.source_commit, "Recorded branch metadata");
        println!("Recorded source commit `{}`.", Blue.paint(&metadata.source_commit));

        Ok(())
    }

    /// Assembles the [TargetBranchMetadata] to record from the arguments.
    fn metadata(&self) -> Result<TargetBranchMetadata> {
        let source_commit = match &self.commit {
            Some(commit) => commit.clone(),
            None => discover_repository(&self.source)
                .ok_or_else(|| {
                    anyhow!(
                        "No --commit given and {} is not in a git repository.",
                        self.source.display()
                    )
                })?
                .head_commit_id()?,
        };

        Ok(TargetBranchMetadata {
            source_commit,
            image_substitutions: self.images.clone(),
        })
    }
}
