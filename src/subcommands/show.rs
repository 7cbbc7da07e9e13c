//! `show` subcommand.

use anyhow::Result;
use bookkeeper::metadata::{load_target_branch_metadata, metadata_path, TargetBranchMetadata};
use clap::Args;
use nu_ansi_term::Color::{Blue, Green};
use std::{fmt::Write, path::Path};

/// CLI arguments for the `show` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct ShowCmd {
    /// Print the metadata document as it is stored on disk.
    #[arg(long)]
    pub yaml: bool,
}

impl ShowCmd {
    /// Run the `show` subcommand.
    pub fn run(self, working_copy: &Path) -> Result<()> {
        let Some(metadata) = load_target_branch_metadata(working_copy)? else {
            println!(
                "No branch metadata recorded at {}.",
                metadata_path(working_copy).display()
            );
            return Ok(());
        };

        if self.yaml {
            print!("{}", serde_yaml::to_string(&metadata)?);
        } else {
            print!("{}", render(&metadata)?);
        }

        Ok(())
    }
}

/// Renders [TargetBranchMetadata] for the terminal.
fn render(metadata: &TargetBranchMetadata) -> Result<String> {
    let mut buf = String::new();

    let source_commit = if metadata.source_commit.is_empty() {
        "<none>"
    } else {
        metadata.source_commit.as_str()
    };
    writeln!(buf, "{} {}", Blue.paint("Source commit:"), source_commit)?;

    if !metadata.image_substitutions.is_empty() {
        writeln!(buf, "{}", Blue.paint("Image substitutions:"))?;
        for image in &metadata.image_substitutions {
            writeln!(buf, "  {} {}", Green.paint("-"), image)?;
        }
    }

    Ok(buf)
}

#[cfg(test)]
mod test {
    use super::render;
    use bookkeeper::metadata::TargetBranchMetadata;

    #[test]
    fn render_empty_record() {
        let out = render(&TargetBranchMetadata::default()).unwrap();
        assert!(out.contains("<none>"));
        assert!(!out.contains("Image substitutions"));
    }

    #[test]
    fn render_lists_images() {
        let md = TargetBranchMetadata {
            source_commit: "1234567".to_string(),
            image_substitutions: vec!["app:v1".to_string()],
        };

        let out = render(&md).unwrap();
        assert!(out.contains("1234567"));
        assert!(out.contains("app:v1"));
    }
}
