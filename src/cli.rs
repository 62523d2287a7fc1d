use clap::{Args, Parser, Subcommand};

use crate::app::model::Theme;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Browse(BrowseArgs),
    List(ListArgs),
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Dataset file (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub data: String,

    /// Theme applied when the session starts.
    #[arg(long, value_enum, default_value_t = Theme::Day)]
    pub theme: Theme,

    /// Emit render instructions as JSON lines instead of text.
    #[arg(long)]
    pub json: bool,

    /// Read session commands from this file instead of stdin.
    #[arg(long)]
    pub script: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Dataset file (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub data: String,

    /// Genre id (default: any).
    #[arg(long)]
    pub genre: Option<String>,

    /// Author id (default: any).
    #[arg(long)]
    pub author: Option<String>,

    /// Case-insensitive title substring.
    #[arg(long)]
    pub title: Option<String>,

    /// Number of pages to render.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Dataset file (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub data: String,

    /// Book id.
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub json: bool,
}
