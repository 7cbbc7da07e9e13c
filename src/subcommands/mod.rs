//! The subcommands for the `bookkeeper` application.

use clap::Subcommand;
use std::path::PathBuf;

mod record;
pub use record::RecordCmd;

mod show;
pub use show::ShowCmd;

#[derive(Debug, Clone, Eq, PartialEq, Subcommand)]
pub enum Subcommands {
    /// Print the target branch metadata recorded for the working copy.
    #[clap(alias = "s")]
    Show(ShowCmd),
    /// Record target branch metadata for the working copy, replacing any existing metadata.
    #[clap(alias = "r")]
    Record(RecordCmd),
}

impl Subcommands {
    /// Run the subcommand against the working copy at `working_copy`.
    pub async fn run(self, working_copy: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Show(args) => args.run(&working_copy),
            Self::Record(args) => args.run(&working_copy),
        }
    }
}
