use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::app::model::RenderInstruction;
use crate::catalog::Catalog;
use crate::cli::ShowArgs;
use crate::detail;
use crate::shell::{Surface, TextSurface};

pub fn run(args: ShowArgs) -> anyhow::Result<()> {
    let catalog = Catalog::load(Path::new(&args.data)).context("load catalog")?;
    let detail = detail::lookup(&catalog, &args.id)
        .ok_or_else(|| anyhow::anyhow!("book not found: {}", args.id))?;

    let mut stdout = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &detail).context("serialize book detail")?;
        stdout.write_all(b"\n").context("write detail newline")?;
        stdout.flush().context("flush stdout")?;
    } else {
        TextSurface::new(stdout).apply(&RenderInstruction::ShowDetail { detail })?;
    }
    Ok(())
}
