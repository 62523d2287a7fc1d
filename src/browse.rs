use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context as _;

use crate::app::dispatcher::{dispatch, initial_state};
use crate::app::model::{Action, AppConfig, Theme};
use crate::catalog::Catalog;
use crate::cli::BrowseArgs;
use crate::filter::SearchCriteria;
use crate::shell::{JsonSurface, Surface, TextSurface};

const SEARCH_FIELDS: [&str; 3] = ["genre", "author", "title"];

pub fn run(args: BrowseArgs) -> anyhow::Result<()> {
    let catalog = Catalog::load(Path::new(&args.data)).context("load catalog")?;
    let config = AppConfig::default();

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open script: {path}"))?,
        )),
        None => Box::new(std::io::stdin().lock()),
    };

    let stdout = std::io::stdout().lock();
    if args.json {
        run_session(&catalog, &config, args.theme, input, &mut JsonSurface::new(stdout))
    } else {
        run_session(&catalog, &config, args.theme, input, &mut TextSurface::new(stdout))
    }
}

/// Initializes the view, then feeds one command per input line through the
/// dispatcher until input ends or `quit` is read.
pub fn run_session<R, S>(
    catalog: &Catalog,
    config: &AppConfig,
    theme: Theme,
    input: R,
    surface: &mut S,
) -> anyhow::Result<()>
where
    R: BufRead,
    S: Surface,
{
    let (mut state, out) = dispatch(catalog, config, initial_state(catalog, theme), Action::Init);
    surface.apply_all(&out)?;

    for (index, line) in input.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                eprintln!("line {}: {err}", index + 1);
                continue;
            }
            Err(err) => return Err(err).context("read session command"),
        };
        let action = match parse_command(&line) {
            Ok(Step::Skip) => continue,
            Ok(Step::Quit) => break,
            Ok(Step::Dispatch(action)) => action,
            Err(err) => {
                eprintln!("line {}: {err:#}", index + 1);
                continue;
            }
        };

        let (next, out) = dispatch(catalog, config, state, action);
        state = next;
        surface.apply_all(&out)?;
    }

    tracing::debug!(page = state.page, matches = state.matches.len(), "session ended");
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Skip,
    Quit,
    Dispatch(Action),
}

pub fn parse_command(line: &str) -> anyhow::Result<Step> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Step::Skip);
    }

    let tokens = tokenize(line)?;
    let Some((head, rest)) = tokens.split_first() else {
        return Ok(Step::Skip);
    };

    let action = match head.as_str() {
        "quit" | "exit" => return Ok(Step::Quit),
        "search" => Action::SubmitSearch(parse_search(rest)?),
        "more" => Action::ShowMore,
        "open" => match rest {
            [id] => Action::SelectPreview(id.clone()),
            _ => anyhow::bail!("usage: open <book-id>"),
        },
        "close" => Action::CloseDetail,
        "find" => Action::OpenSearch,
        "find-cancel" => Action::CancelSearch,
        "settings" => Action::OpenSettings,
        "settings-cancel" => Action::CancelSettings,
        "theme" => Action::SubmitSettings(Theme::from_form(rest.first().map(String::as_str))),
        other => anyhow::bail!("unknown command: {other}"),
    };
    Ok(Step::Dispatch(action))
}

fn parse_search(tokens: &[String]) -> anyhow::Result<SearchCriteria> {
    let mut fields = BTreeMap::new();
    for token in tokens {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("expected key=value, got {token:?}"))?;
        if !SEARCH_FIELDS.contains(&key) {
            tracing::warn!(field = key, "ignoring unknown search field");
            continue;
        }
        fields.insert(key.to_owned(), value.to_owned());
    }
    Ok(SearchCriteria::from_form(&fields))
}

/// Splits on whitespace; double quotes group words and are dropped.
fn tokenize(line: &str) -> anyhow::Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        anyhow::bail!("unterminated quote in: {line}");
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
