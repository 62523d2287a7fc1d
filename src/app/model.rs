use std::num::NonZeroUsize;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Book;
use crate::detail::BookDetail;
use crate::filter::SearchCriteria;
use crate::pagination::{BOOKS_PER_PAGE, Preview, ShowMoreButton};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    /// Settings form value: `night` selects night, anything else day.
    pub fn from_form(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("night") => Self::Night,
            _ => Self::Day,
        }
    }

    pub fn colors(self) -> ThemeColors {
        const DARK: &str = "10, 10, 20";
        const LIGHT: &str = "255, 255, 255";
        match self {
            Self::Day => ThemeColors {
                dark: DARK,
                light: LIGHT,
            },
            Self::Night => ThemeColors {
                dark: LIGHT,
                light: DARK,
            },
        }
    }
}

/// RGB triples assigned to the `--color-dark` / `--color-light` variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    pub dark: &'static str,
    pub light: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub page_size: NonZeroUsize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: NonZeroUsize::new(BOOKS_PER_PAGE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// 1-based count of windows of `matches` on screen.
    pub page: usize,
    pub matches: Vec<Arc<Book>>,
    pub theme: Theme,
    pub search_open: bool,
    pub settings_open: bool,
    pub active: Option<BookDetail>,
}

impl AppState {
    pub fn new(matches: Vec<Arc<Book>>, theme: Theme) -> Self {
        Self {
            page: 1,
            matches,
            theme,
            search_open: false,
            settings_open: false,
            active: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Init,
    OpenSearch,
    CancelSearch,
    SubmitSearch(SearchCriteria),
    OpenSettings,
    CancelSettings,
    SubmitSettings(Theme),
    ShowMore,
    SelectPreview(String),
    CloseDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    Search,
    Settings,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropdownKind {
    Genres,
    Authors,
}

impl DropdownKind {
    pub fn any_label(self) -> &'static str {
        match self {
            Self::Genres => "All Genres",
            Self::Authors => "All Authors",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

/// Display-independent command produced by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderInstruction {
    ClearList,
    AppendPreviews { previews: Vec<Preview> },
    UpdateShowMore { button: ShowMoreButton },
    SetListMessage { visible: bool },
    ScrollToTop,
    PopulateDropdown {
        dropdown: DropdownKind,
        options: Vec<DropdownOption>,
    },
    SetOverlay { overlay: Overlay, open: bool },
    FocusSearchTitle,
    ApplyTheme { theme: Theme, colors: ThemeColors },
    ShowDetail { detail: BookDetail },
}
