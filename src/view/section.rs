//! Page sections of the single-page layout

use serde::Serialize;

use crate::content::Icon;

/// One anchored section of the home page, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Hero,
    About,
    Skills,
    Experience,
    Projects,
    Blog,
    Contact,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Hero,
        Section::About,
        Section::Skills,
        Section::Experience,
        Section::Projects,
        Section::Blog,
        Section::Contact,
    ];

    /// Anchor id of the section element
    pub fn id(self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::About => "about",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Blog => "blog",
            Section::Contact => "contact",
        }
    }

    /// Navigation label
    pub fn label(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::Blog => "Blog",
            Section::Contact => "Contact",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            Section::Hero => Icon::Home,
            Section::About => Icon::User,
            Section::Skills => Icon::Code,
            Section::Experience => Icon::Briefcase,
            Section::Projects => Icon::FolderOpen,
            Section::Blog => Icon::Blog,
            Section::Contact => Icon::Email,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}
