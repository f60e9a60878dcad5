//! View state and its reducer

use super::{Route, Section};

/// What the top-level view shows: the highlighted section and the tag filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub active_section: Section,
    pub selected_tag: Option<String>,
}

/// Something that changes the view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ActivateSection(Section),
    SelectTag(String),
    ClearTag,
    Navigate(Route),
}

impl ViewState {
    /// State a visitor lands in when arriving at `route`
    pub fn for_route(route: &Route) -> Self {
        reduce(&ViewState::default(), Action::Navigate(route.clone()))
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active_section == section
    }
}

/// Apply one action; last write wins
pub fn reduce(state: &ViewState, action: Action) -> ViewState {
    match action {
        Action::ActivateSection(section) => ViewState {
            active_section: section,
            ..state.clone()
        },
        Action::SelectTag(tag) => ViewState {
            active_section: Section::Blog,
            selected_tag: Some(tag),
        },
        Action::ClearTag => ViewState {
            selected_tag: None,
            ..state.clone()
        },
        Action::Navigate(route) => match route {
            Route::Home => ViewState::default(),
            Route::Tag(tag) => ViewState {
                active_section: Section::Blog,
                selected_tag: Some(tag),
            },
            Route::Post(_) | Route::NotFound => ViewState {
                active_section: Section::Blog,
                selected_tag: None,
            },
        },
    }
}
