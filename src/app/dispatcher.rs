use crate::app::model::{
    Action, AppConfig, AppState, DropdownKind, DropdownOption, Overlay, RenderInstruction, Theme,
};
use crate::catalog::Catalog;
use crate::detail;
use crate::filter::{ANY, SearchCriteria};
use crate::pagination::{self, ShowMoreButton};

/// State before `Action::Init`: every book matches, first page.
pub fn initial_state(catalog: &Catalog, theme: Theme) -> AppState {
    AppState::new(catalog.books().to_vec(), theme)
}

/// Applies one user action and returns the next state along with the render
/// instructions the display needs to reflect it.
pub fn dispatch(
    catalog: &Catalog,
    config: &AppConfig,
    mut state: AppState,
    action: Action,
) -> (AppState, Vec<RenderInstruction>) {
    tracing::debug!(?action, page = state.page, matches = state.matches.len(), "dispatch");
    let page_size = config.page_size.get();
    let mut out = Vec::new();

    match action {
        Action::Init => {
            state.matches = catalog.books().to_vec();
            state.page = 1;
            render_first_page(catalog, page_size, &state, &mut out);
            out.push(dropdown(DropdownKind::Genres, catalog));
            out.push(dropdown(DropdownKind::Authors, catalog));
            out.push(show_more(&state, page_size));
            out.push(RenderInstruction::ApplyTheme {
                theme: state.theme,
                colors: state.theme.colors(),
            });
        }
        Action::OpenSearch => {
            state.search_open = true;
            out.push(RenderInstruction::SetOverlay {
                overlay: Overlay::Search,
                open: true,
            });
            out.push(RenderInstruction::FocusSearchTitle);
        }
        Action::CancelSearch => {
            state.search_open = false;
            out.push(RenderInstruction::SetOverlay {
                overlay: Overlay::Search,
                open: false,
            });
        }
        Action::SubmitSearch(criteria) => {
            apply_search(catalog, &criteria, &mut state);
            render_first_page(catalog, page_size, &state, &mut out);
            out.push(show_more(&state, page_size));
            out.push(RenderInstruction::ScrollToTop);
            state.search_open = false;
            out.push(RenderInstruction::SetOverlay {
                overlay: Overlay::Search,
                open: false,
            });
        }
        Action::OpenSettings => {
            state.settings_open = true;
            out.push(RenderInstruction::SetOverlay {
                overlay: Overlay::Settings,
                open: true,
            });
        }
        Action::CancelSettings => {
            state.settings_open = false;
            out.push(RenderInstruction::SetOverlay {
                overlay: Overlay::Settings,
                open: false,
            });
        }
        Action::SubmitSettings(theme) => {
            state.theme = theme;
            state.settings_open = false;
            out.push(RenderInstruction::ApplyTheme {
                theme,
                colors: theme.colors(),
            });
            out.push(RenderInstruction::SetOverlay {
                overlay: Overlay::Settings,
                open: false,
            });
        }
        Action::ShowMore => {
            if pagination::remaining(state.matches.len(), state.page, page_size) == 0 {
                tracing::debug!(page = state.page, "show more ignored: nothing remaining");
                return (state, out);
            }
            let slice = pagination::window(&state.matches, state.page, page_size);
            out.push(RenderInstruction::AppendPreviews {
                previews: pagination::previews(slice, catalog),
            });
            state.page += 1;
            out.push(show_more(&state, page_size));
        }
        Action::SelectPreview(id) => match detail::lookup(catalog, &id) {
            Some(detail) => {
                state.active = Some(detail.clone());
                out.push(RenderInstruction::SetOverlay {
                    overlay: Overlay::Detail,
                    open: true,
                });
                out.push(RenderInstruction::ShowDetail { detail });
            }
            None => {
                tracing::debug!(%id, "selected preview not found in catalog");
            }
        },
        Action::CloseDetail => {
            state.active = None;
            out.push(RenderInstruction::SetOverlay {
                overlay: Overlay::Detail,
                open: false,
            });
        }
    }

    (state, out)
}

fn apply_search(catalog: &Catalog, criteria: &SearchCriteria, state: &mut AppState) {
    state.matches = criteria.apply(catalog.books());
    state.page = 1;
    tracing::debug!(?criteria, matches = state.matches.len(), "applied search filters");
}

fn render_first_page(
    catalog: &Catalog,
    page_size: usize,
    state: &AppState,
    out: &mut Vec<RenderInstruction>,
) {
    out.push(RenderInstruction::SetListMessage {
        visible: state.matches.is_empty(),
    });
    out.push(RenderInstruction::ClearList);
    let slice = pagination::window(&state.matches, 0, page_size);
    out.push(RenderInstruction::AppendPreviews {
        previews: pagination::previews(slice, catalog),
    });
}

fn show_more(state: &AppState, page_size: usize) -> RenderInstruction {
    RenderInstruction::UpdateShowMore {
        button: ShowMoreButton::new(state.matches.len(), state.page, page_size),
    }
}

fn dropdown(kind: DropdownKind, catalog: &Catalog) -> RenderInstruction {
    let entries = match kind {
        DropdownKind::Genres => catalog.genres(),
        DropdownKind::Authors => catalog.authors(),
    };
    let mut options = Vec::with_capacity(entries.len() + 1);
    options.push(DropdownOption {
        value: ANY.to_owned(),
        label: kind.any_label().to_owned(),
    });
    options.extend(entries.iter().map(|(id, name)| DropdownOption {
        value: id.clone(),
        label: name.clone(),
    }));
    RenderInstruction::PopulateDropdown {
        dropdown: kind,
        options,
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::catalog::testing::{catalog, numbered_catalog, record};
    use crate::filter::Selection;
    use crate::pagination::Preview;

    fn config(page_size: usize) -> AppConfig {
        AppConfig {
            page_size: NonZeroUsize::new(page_size).expect("non-zero page size"),
        }
    }

    fn appended(out: &[RenderInstruction]) -> Vec<String> {
        out.iter()
            .filter_map(|instruction| match instruction {
                RenderInstruction::AppendPreviews { previews } => Some(previews),
                _ => None,
            })
            .flatten()
            .map(|preview: &Preview| preview.id.clone())
            .collect()
    }

    fn button(out: &[RenderInstruction]) -> Option<ShowMoreButton> {
        out.iter().find_map(|instruction| match instruction {
            RenderInstruction::UpdateShowMore { button } => Some(*button),
            _ => None,
        })
    }

    #[test]
    fn init_renders_first_page_and_dropdowns() {
        let catalog = numbered_catalog(5);
        let state = initial_state(&catalog, Theme::Night);
        let (state, out) = dispatch(&catalog, &config(2), state, Action::Init);

        assert_eq!(state.page, 1);
        assert_eq!(appended(&out), vec!["b0", "b1"]);
        assert_eq!(
            button(&out),
            Some(ShowMoreButton {
                remaining: 3,
                disabled: false
            })
        );

        let genres = out.iter().find_map(|instruction| match instruction {
            RenderInstruction::PopulateDropdown {
                dropdown: DropdownKind::Genres,
                options,
            } => Some(options.clone()),
            _ => None,
        });
        let genres = genres.expect("genre dropdown populated");
        assert_eq!(genres[0].value, "any");
        assert_eq!(genres[0].label, "All Genres");
        assert_eq!(genres[1].label, "Fiction");
        assert_eq!(genres.len(), 3);

        assert!(out.contains(&RenderInstruction::ApplyTheme {
            theme: Theme::Night,
            colors: Theme::Night.colors(),
        }));
    }

    #[test]
    fn show_more_appends_until_exhausted() {
        let catalog = numbered_catalog(2);
        let config = config(1);
        let state = initial_state(&catalog, Theme::Day);

        let (state, out) = dispatch(&catalog, &config, state, Action::Init);
        assert_eq!(appended(&out), vec!["b0"]);
        assert!(out.contains(&RenderInstruction::ClearList));
        assert_eq!(button(&out).map(|b| b.remaining), Some(1));

        let (state, out) = dispatch(&catalog, &config, state, Action::ShowMore);
        assert_eq!(appended(&out), vec!["b1"]);
        assert!(!out.contains(&RenderInstruction::ClearList));
        assert_eq!(
            button(&out),
            Some(ShowMoreButton {
                remaining: 0,
                disabled: true
            })
        );
        assert_eq!(state.page, 2);

        let (state, out) = dispatch(&catalog, &config, state, Action::ShowMore);
        assert!(out.is_empty());
        assert_eq!(state.page, 2);
    }

    #[test]
    fn submit_search_resets_page_and_is_idempotent() {
        let catalog = numbered_catalog(10);
        let config = config(2);
        let state = initial_state(&catalog, Theme::Day);
        let (state, _) = dispatch(&catalog, &config, state, Action::Init);
        let (state, _) = dispatch(&catalog, &config, state, Action::ShowMore);
        assert_eq!(state.page, 2);

        let criteria = SearchCriteria {
            genre: Selection::Id("g1".to_owned()),
            ..SearchCriteria::default()
        };
        let (first, out) = dispatch(
            &catalog,
            &config,
            state,
            Action::SubmitSearch(criteria.clone()),
        );
        assert_eq!(first.page, 1);
        assert_eq!(appended(&out), vec!["b0", "b2"]);
        assert!(out.contains(&RenderInstruction::ScrollToTop));
        assert!(out.contains(&RenderInstruction::SetOverlay {
            overlay: Overlay::Search,
            open: false
        }));

        let (second, _) = dispatch(
            &catalog,
            &config,
            first.clone(),
            Action::SubmitSearch(criteria),
        );
        assert_eq!(second.page, 1);
        assert_eq!(second.matches, first.matches);
    }

    #[test]
    fn empty_results_show_list_message() {
        let catalog = numbered_catalog(3);
        let state = initial_state(&catalog, Theme::Day);
        let criteria = SearchCriteria {
            title: "no such title".to_owned(),
            ..SearchCriteria::default()
        };
        let (state, out) = dispatch(
            &catalog,
            &config(2),
            state,
            Action::SubmitSearch(criteria),
        );

        assert!(state.matches.is_empty());
        assert!(out.contains(&RenderInstruction::SetListMessage { visible: true }));
        assert_eq!(
            button(&out),
            Some(ShowMoreButton {
                remaining: 0,
                disabled: true
            })
        );
    }

    #[test]
    fn select_preview_reaches_books_outside_matches() {
        let catalog = catalog(vec![
            record("b1", "Cats", "a1", &["g1"]),
            record("b2", "Dogs", "a2", &["g2"]),
        ]);
        let config = config(36);
        let state = initial_state(&catalog, Theme::Day);
        let criteria = SearchCriteria {
            genre: Selection::Id("g1".to_owned()),
            ..SearchCriteria::default()
        };
        let (state, _) = dispatch(&catalog, &config, state, Action::SubmitSearch(criteria));

        let (state, out) = dispatch(
            &catalog,
            &config,
            state,
            Action::SelectPreview("b2".to_owned()),
        );
        let active = state.active.as_ref().expect("detail opened");
        assert_eq!(active.subtitle(), "Bob Writer (2001)");
        assert!(out.contains(&RenderInstruction::SetOverlay {
            overlay: Overlay::Detail,
            open: true
        }));
    }

    #[test]
    fn select_unknown_preview_keeps_modal_state() {
        let catalog = numbered_catalog(3);
        let config = config(36);
        let state = initial_state(&catalog, Theme::Day);
        let (state, _) = dispatch(
            &catalog,
            &config,
            state,
            Action::SelectPreview("b1".to_owned()),
        );
        let before = state.clone();

        let (after, out) = dispatch(
            &catalog,
            &config,
            state,
            Action::SelectPreview("gone".to_owned()),
        );
        assert!(out.is_empty());
        assert_eq!(after, before);
    }

    #[test]
    fn overlays_and_theme_toggle() {
        let catalog = numbered_catalog(1);
        let config = config(36);
        let state = initial_state(&catalog, Theme::Day);

        let (state, out) = dispatch(&catalog, &config, state, Action::OpenSearch);
        assert!(state.search_open);
        assert!(out.contains(&RenderInstruction::FocusSearchTitle));
        let (state, _) = dispatch(&catalog, &config, state, Action::CancelSearch);
        assert!(!state.search_open);

        let (state, _) = dispatch(&catalog, &config, state, Action::OpenSettings);
        assert!(state.settings_open);
        let (state, out) = dispatch(
            &catalog,
            &config,
            state,
            Action::SubmitSettings(Theme::Night),
        );
        assert!(!state.settings_open);
        assert_eq!(state.theme, Theme::Night);
        assert!(out.contains(&RenderInstruction::ApplyTheme {
            theme: Theme::Night,
            colors: Theme::Night.colors(),
        }));
    }
}
