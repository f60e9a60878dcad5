//! Content module - posts, profile data and markdown rendering

mod error;
mod frontmatter;
mod icon;
mod index;
pub mod loader;
pub mod markdown;
mod post;
mod profile;

pub use error::ContentError;
pub use frontmatter::{parse_date_string, FrontMatter};
pub use icon::{Icon, IconDescriptor};
pub use index::PostIndex;
pub use markdown::{Block, Inline, ListItem};
pub use post::Post;
pub use profile::{
    About, AboutParagraph, Contact, ContactInfo, Highlight, Metric, Profile, Project,
    ProjectLinks, ResourceGroup, ResourceLink, Role, SkillCategory, Skill, SocialLink,
};
