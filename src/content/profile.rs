//! Portfolio profile data (`source/_data/profile.yml`)
//!
//! Everything on the page apart from the blog: hero, about, skills,
//! experience, projects, contact and curated resources.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Icon;
use crate::config::SiteConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    /// Brand mark in the navigation bar; derived from `name` when empty
    pub initials: String,
    pub role: String,
    pub greeting: String,
    pub tagline: String,
    pub social: Vec<SocialLink>,
    pub about: About,
    pub skills: Vec<SkillCategory>,
    pub experience: Vec<Role>,
    pub metrics: Vec<Metric>,
    pub projects: Vec<Project>,
    pub contact: Contact,
    /// Named link groups, in author order
    pub resources: IndexMap<String, ResourceGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
    pub icon: Icon,
    /// Offer the target as a download (resume)
    pub download: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub intro: String,
    pub paragraphs: Vec<AboutParagraph>,
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutParagraph {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub icon: Icon,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub title: String,
    pub icon: Icon,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub icon: Icon,
    /// Proficiency, 0-100
    pub level: u8,
}

/// One position in the experience timeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub title: String,
    pub company: String,
    pub location: String,
    pub period: String,
    pub duration: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<Icon>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Emoji shown as the card image
    pub image: String,
    pub category: String,
    pub technologies: Vec<Icon>,
    pub links: ProjectLinks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub github: Option<String>,
    pub demo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub intro: String,
    pub info: Vec<ContactInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub icon: Icon,
    pub label: String,
    pub value: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceGroup {
    pub title: String,
    pub description: String,
    pub links: Vec<ResourceLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLink {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl Profile {
    /// Minimal profile for a site without profile data
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut profile = Profile {
            name: config.author.clone(),
            role: config.subtitle.clone(),
            tagline: config.description.clone(),
            ..Default::default()
        };
        profile.normalize();
        profile
    }

    /// Fill derived fields and clamp out-of-range values
    pub fn normalize(&mut self) {
        if self.initials.trim().is_empty() {
            self.initials = initials(&self.name);
        }
        for category in &mut self.skills {
            for skill in &mut category.skills {
                skill.level = skill.level.min(100);
            }
        }
    }

    /// Social links shown in the contact section (downloads excluded)
    pub fn contact_links(&self) -> Vec<&SocialLink> {
        self.social.iter().filter(|l| !l.download).collect()
    }
}

/// First letter of each word, at most three
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .take(3)
        .collect()
}
