use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    bookcase::logging::init().context("init logging")?;

    let cli = bookcase::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        bookcase::cli::Command::Browse(args) => {
            bookcase::browse::run(args).context("browse")?;
        }
        bookcase::cli::Command::List(args) => {
            bookcase::list::run(args).context("list")?;
        }
        bookcase::cli::Command::Show(args) => {
            bookcase::show::run(args).context("show")?;
        }
    }

    Ok(())
}
