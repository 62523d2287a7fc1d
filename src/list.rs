use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;

use crate::app::dispatcher::{dispatch, initial_state};
use crate::app::model::{Action, AppConfig, RenderInstruction, Theme};
use crate::catalog::Catalog;
use crate::cli::ListArgs;
use crate::filter::{SearchCriteria, Selection};
use crate::pagination::{Preview, ShowMoreButton};
use crate::shell::{NO_RESULTS_MESSAGE, Surface, TextSurface};

#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    pub page: usize,
    pub total_matches: usize,
    pub previews: Vec<Preview>,
    pub show_more: ShowMoreButton,
}

pub fn run(args: ListArgs) -> anyhow::Result<()> {
    let catalog = Catalog::load(Path::new(&args.data)).context("load catalog")?;
    let criteria = SearchCriteria {
        genre: Selection::from_form(args.genre.as_deref()),
        author: Selection::from_form(args.author.as_deref()),
        title: args.title.unwrap_or_default(),
    };

    let output = list(&catalog, &AppConfig::default(), criteria, args.pages as usize)?;

    let mut stdout = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &output).context("serialize list output")?;
        stdout.write_all(b"\n").context("write list newline")?;
    } else {
        if output.previews.is_empty() {
            writeln!(stdout, "{NO_RESULTS_MESSAGE}")?;
        }
        for preview in &output.previews {
            writeln!(stdout, "{}  {} by {}", preview.id, preview.title, preview.author)?;
        }
        writeln!(stdout, "{}", output.show_more.label())?;
    }
    stdout.flush().context("flush stdout")?;
    Ok(())
}

/// Runs a search followed by `pages - 1` "show more" requests and returns
/// everything a list container would be showing afterwards.
pub fn list(
    catalog: &Catalog,
    config: &AppConfig,
    criteria: SearchCriteria,
    pages: usize,
) -> anyhow::Result<ListOutput> {
    let mut surface = TextSurface::new(std::io::sink());
    let mut show_more = None;
    let mut state = initial_state(catalog, Theme::default());

    let mut action = Action::SubmitSearch(criteria);
    for _ in 0..pages.max(1) {
        let (next, out) = dispatch(catalog, config, state, action);
        state = next;
        for instruction in &out {
            if let RenderInstruction::UpdateShowMore { button } = instruction {
                show_more = Some(*button);
            }
        }
        surface.apply_all(&out)?;

        if show_more.is_some_and(|button| button.disabled) {
            break;
        }
        action = Action::ShowMore;
    }

    let show_more =
        show_more.ok_or_else(|| anyhow::anyhow!("search did not report show-more state"))?;
    Ok(ListOutput {
        page: state.page,
        total_matches: state.matches.len(),
        previews: surface.displayed().to_vec(),
        show_more,
    })
}
