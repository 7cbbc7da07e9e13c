//! The CLI for `bookkeeper`.

use crate::{
    git::{discover_repository, RepositoryExt},
    subcommands::Subcommands,
};
use anyhow::{anyhow, Result};
use clap::{
    builder::styling::{AnsiColor, Color, Style},
    ArgAction, Parser,
};
use std::{env, path::PathBuf};
use tracing::{debug, Level};

const ABOUT: &str = "bookkeeper records which source commit produced a target branch's content.";

/// The CLI application for `bookkeeper`.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(about = ABOUT, version, styles = cli_styles())]
pub struct Cli {
    /// Verbosity level (0-4)
    #[arg(short, action = ArgAction::Count, global = true)]
    pub v: u8,
    /// Root of the working copy. Defaults to the enclosing git repository's working copy, or the
    /// current directory.
    #[arg(long, global = true, env = "BOOKKEEPER_WORKING_COPY")]
    pub path: Option<PathBuf>,
    /// The subcommand to run
    #[clap(subcommand)]
    pub subcommand: Subcommands,
}

impl Cli {
    /// Run the CLI application with the given arguments.
    pub async fn run(self) -> Result<()> {
        let working_copy = self.working_copy_root()?;
        debug!(working_copy = %working_copy.display(), "Resolved working copy");

        self.subcommand.run(working_copy).await
    }

    /// Resolves the working copy root that the subcommand operates on.
    ///
    /// ## Returns
    /// - `Ok(PathBuf)` - The `--path` argument if given, otherwise the working copy of the git
    ///   repository enclosing the current directory, otherwise the current directory.
    /// - `Err(_)` - If the current directory cannot be determined.
    fn working_copy_root(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }

        let cwd = env::current_dir()?;
        match discover_repository(&cwd) {
            Some(repo) => repo.working_copy_root().or(Ok(cwd)),
            None => Ok(cwd),
        }
    }

    /// Installs a `fmt` subscriber on stderr, filtered by the `-v` count.
    pub(crate) fn init_tracing_subscriber(self) -> Result<Self> {
        tracing_subscriber::fmt()
            .with_max_level(verbosity_level(self.v))
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!(e))?;

        Ok(self)
    }
}

/// Maps the number of `-v` flags to the maximum [Level] that is logged.
fn verbosity_level(v: u8) -> Level {
    [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG]
        .get(v as usize)
        .copied()
        .unwrap_or(Level::TRACE)
}

const fn ansi(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Styles for the CLI application.
const fn cli_styles() -> clap::builder::Styles {
    let heading = ansi(AnsiColor::Cyan).bold();
    let failure = ansi(AnsiColor::Red).bold();

    clap::builder::Styles::styled()
        .header(heading)
        .usage(heading)
        .literal(ansi(AnsiColor::Green))
        .placeholder(ansi(AnsiColor::BrightBlack))
        .valid(ansi(AnsiColor::Green).underline())
        .invalid(failure)
        .error(failure)
}

#[cfg(test)]
mod test {
    use super::{verbosity_level, Cli};
    use crate::subcommands::Subcommands;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;
    use tracing::Level;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_record_with_images() {
        let cli = Cli::try_parse_from([
            "bookkeeper",
            "-vv",
            "--path",
            "/tmp/wc",
            "record",
            "--commit",
            "1234567",
            "--image",
            "app:v1",
            "--image",
            "worker:v2",
        ])
        .unwrap();

        assert_eq!(cli.v, 2);
        assert_eq!(cli.path, Some(PathBuf::from("/tmp/wc")));
        let Subcommands::Record(args) = cli.subcommand else {
            panic!("expected `record`");
        };
        assert_eq!(args.commit.as_deref(), Some("1234567"));
        assert_eq!(args.images, vec!["app:v1", "worker:v2"]);
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_level(0), Level::ERROR);
        assert_eq!(verbosity_level(2), Level::INFO);
        assert_eq!(verbosity_level(4), Level::TRACE);
        assert_eq!(verbosity_level(u8::MAX), Level::TRACE);
    }

    #[test]
    fn explicit_path_wins() {
        let cli = Cli::try_parse_from(["bookkeeper", "show", "--path", "/tmp/wc"]).unwrap();
        assert_eq!(cli.working_copy_root().unwrap(), PathBuf::from("/tmp/wc"));
    }
}
