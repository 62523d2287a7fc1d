use std::io::Write;

use anyhow::Context as _;

use crate::app::model::{DropdownKind, Overlay, RenderInstruction, Theme};
use crate::pagination::Preview;

pub const NO_RESULTS_MESSAGE: &str = "No results found. Your filters might be too narrow.";

/// Display collaborator that turns render instructions into output.
pub trait Surface {
    fn apply(&mut self, instruction: &RenderInstruction) -> anyhow::Result<()>;

    fn apply_all(&mut self, instructions: &[RenderInstruction]) -> anyhow::Result<()> {
        for instruction in instructions {
            self.apply(instruction)?;
        }
        Ok(())
    }
}

/// Human-readable surface. Tracks the displayed list so append and clear
/// behave like the list container they stand in for.
pub struct TextSurface<W> {
    out: W,
    displayed: Vec<Preview>,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            displayed: Vec::new(),
        }
    }

    pub fn displayed(&self) -> &[Preview] {
        &self.displayed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TextSurface<W> {
    fn apply(&mut self, instruction: &RenderInstruction) -> anyhow::Result<()> {
        let out = &mut self.out;
        match instruction {
            RenderInstruction::ClearList => self.displayed.clear(),
            RenderInstruction::AppendPreviews { previews } => {
                for preview in previews {
                    writeln!(out, "{}  {} by {}", preview.id, preview.title, preview.author)?;
                }
                self.displayed.extend(previews.iter().cloned());
            }
            RenderInstruction::UpdateShowMore { button } => {
                let state = if button.disabled { " [disabled]" } else { "" };
                writeln!(out, "{}{state}", button.label())?;
            }
            RenderInstruction::SetListMessage { visible } => {
                if *visible {
                    writeln!(out, "{NO_RESULTS_MESSAGE}")?;
                }
            }
            RenderInstruction::ScrollToTop | RenderInstruction::FocusSearchTitle => {}
            RenderInstruction::PopulateDropdown { dropdown, options } => {
                let name = match dropdown {
                    DropdownKind::Genres => "genres",
                    DropdownKind::Authors => "authors",
                };
                let rendered = options
                    .iter()
                    .map(|option| format!("{} ({})", option.label, option.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(out, "{name}: {rendered}")?;
            }
            RenderInstruction::SetOverlay { overlay, open } => {
                let name = match overlay {
                    Overlay::Search => "search",
                    Overlay::Settings => "settings",
                    Overlay::Detail => "detail",
                };
                let state = if *open { "open" } else { "closed" };
                writeln!(out, "[{name} {state}]")?;
            }
            RenderInstruction::ApplyTheme { theme, colors } => {
                let theme = match theme {
                    Theme::Day => "day",
                    Theme::Night => "night",
                };
                writeln!(
                    out,
                    "theme: {theme} (--color-dark: {}; --color-light: {})",
                    colors.dark, colors.light
                )?;
            }
            RenderInstruction::ShowDetail { detail } => {
                writeln!(out, "{}", detail.title)?;
                writeln!(out, "{}", detail.subtitle())?;
                writeln!(out, "image: {}", detail.image)?;
                writeln!(out, "{}", detail.description)?;
            }
        }
        out.flush().context("flush text surface")?;
        Ok(())
    }
}

/// Emits every instruction as one JSON object per line.
pub struct JsonSurface<W> {
    out: W,
}

impl<W: Write> JsonSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for JsonSurface<W> {
    fn apply(&mut self, instruction: &RenderInstruction) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, instruction)
            .context("serialize render instruction")?;
        self.out
            .write_all(b"\n")
            .context("write render instruction newline")?;
        self.out.flush().context("flush json surface")?;
        Ok(())
    }
}
