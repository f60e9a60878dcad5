//! Icons for technologies, brands and sections
//!
//! Profile data names an icon by identifier (`kubernetes`, `github_actions`,
//! ...). Each variant maps to a descriptor the templates render as a badge:
//! a human label plus a glyph class. Unknown identifiers fall back to the
//! generic [`Icon::Code`] badge.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Icon {
    // Technologies
    Ansible,
    Argo,
    Aws,
    Docker,
    Git,
    GithubActions,
    Grafana,
    Helm,
    Javascript,
    Jenkins,
    Kubernetes,
    Linux,
    Postgresql,
    Prometheus,
    Python,
    Terraform,
    Vault,
    Yaml,

    // Brands
    Github,
    Instagram,
    Linkedin,

    // Generic
    Bell,
    Blog,
    Briefcase,
    Calendar,
    ChartLine,
    Clock,
    #[default]
    Code,
    Cogs,
    Database,
    Email,
    FolderOpen,
    Home,
    MapMarker,
    Pdf,
    Phone,
    Robot,
    Rocket,
    Server,
    Shield,
    Tag,
    User,
}

/// What a template needs to draw an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub glyph: &'static str,
}

impl Icon {
    /// Look up an icon by identifier, case and separator insensitive
    pub fn from_id(id: &str) -> Self {
        let key: String = id
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match key.as_str() {
            "ansible" => Icon::Ansible,
            "argo" | "argocd" => Icon::Argo,
            "aws" | "amazon" => Icon::Aws,
            "docker" => Icon::Docker,
            "git" => Icon::Git,
            "github_actions" | "githubactions" | "gha" => Icon::GithubActions,
            "grafana" => Icon::Grafana,
            "helm" => Icon::Helm,
            "javascript" | "js" => Icon::Javascript,
            "jenkins" => Icon::Jenkins,
            "kubernetes" | "k8s" => Icon::Kubernetes,
            "linux" => Icon::Linux,
            "postgresql" | "postgres" => Icon::Postgresql,
            "prometheus" => Icon::Prometheus,
            "python" => Icon::Python,
            "terraform" => Icon::Terraform,
            "vault" => Icon::Vault,
            "yaml" => Icon::Yaml,
            "github" => Icon::Github,
            "instagram" => Icon::Instagram,
            "linkedin" => Icon::Linkedin,
            "bell" => Icon::Bell,
            "blog" => Icon::Blog,
            "briefcase" => Icon::Briefcase,
            "calendar" => Icon::Calendar,
            "chart_line" | "chart" => Icon::ChartLine,
            "clock" => Icon::Clock,
            "cogs" | "cog" => Icon::Cogs,
            "database" | "db" => Icon::Database,
            "email" | "mail" | "envelope" => Icon::Email,
            "folder_open" | "folder" => Icon::FolderOpen,
            "home" => Icon::Home,
            "map_marker" | "location" => Icon::MapMarker,
            "pdf" | "resume" => Icon::Pdf,
            "phone" => Icon::Phone,
            "robot" => Icon::Robot,
            "rocket" => Icon::Rocket,
            "server" => Icon::Server,
            "shield" => Icon::Shield,
            "tag" => Icon::Tag,
            "user" => Icon::User,
            _ => Icon::Code,
        }
    }

    pub fn descriptor(self) -> IconDescriptor {
        let (id, label, glyph) = match self {
            Icon::Ansible => ("ansible", "Ansible", "si-ansible"),
            Icon::Argo => ("argo", "ArgoCD", "si-argo"),
            Icon::Aws => ("aws", "AWS", "fa-aws"),
            Icon::Docker => ("docker", "Docker", "fa-docker"),
            Icon::Git => ("git", "Git", "fa-git-alt"),
            Icon::GithubActions => ("github_actions", "GitHub Actions", "si-githubactions"),
            Icon::Grafana => ("grafana", "Grafana", "si-grafana"),
            Icon::Helm => ("helm", "Helm", "si-helm"),
            Icon::Javascript => ("javascript", "JavaScript", "si-javascript"),
            Icon::Jenkins => ("jenkins", "Jenkins", "si-jenkins"),
            Icon::Kubernetes => ("kubernetes", "Kubernetes", "si-kubernetes"),
            Icon::Linux => ("linux", "Linux", "fa-linux"),
            Icon::Postgresql => ("postgresql", "PostgreSQL", "si-postgresql"),
            Icon::Prometheus => ("prometheus", "Prometheus", "si-prometheus"),
            Icon::Python => ("python", "Python", "fa-python"),
            Icon::Terraform => ("terraform", "Terraform", "si-terraform"),
            Icon::Vault => ("vault", "Vault", "si-vault"),
            Icon::Yaml => ("yaml", "YAML", "si-yaml"),
            Icon::Github => ("github", "GitHub", "fa-github"),
            Icon::Instagram => ("instagram", "Instagram", "fa-instagram"),
            Icon::Linkedin => ("linkedin", "LinkedIn", "fa-linkedin"),
            Icon::Bell => ("bell", "Alerting", "fa-bell"),
            Icon::Blog => ("blog", "Blog", "fa-blog"),
            Icon::Briefcase => ("briefcase", "Work", "fa-briefcase"),
            Icon::Calendar => ("calendar", "Date", "fa-calendar-alt"),
            Icon::ChartLine => ("chart_line", "Monitoring", "fa-chart-line"),
            Icon::Clock => ("clock", "Reading time", "fa-clock"),
            Icon::Code => ("code", "Code", "fa-code"),
            Icon::Cogs => ("cogs", "Automation", "fa-cogs"),
            Icon::Database => ("database", "Databases", "fa-database"),
            Icon::Email => ("email", "Email", "fa-envelope"),
            Icon::FolderOpen => ("folder_open", "Projects", "fa-folder-open"),
            Icon::Home => ("home", "Home", "fa-home"),
            Icon::MapMarker => ("map_marker", "Location", "fa-map-marker-alt"),
            Icon::Pdf => ("pdf", "Resume", "fa-file-pdf"),
            Icon::Phone => ("phone", "Phone", "fa-phone"),
            Icon::Robot => ("robot", "Bots", "fa-robot"),
            Icon::Rocket => ("rocket", "Launch", "fa-rocket"),
            Icon::Server => ("server", "Infrastructure", "fa-server"),
            Icon::Shield => ("shield", "Security", "fa-shield-alt"),
            Icon::Tag => ("tag", "Tag", "fa-tag"),
            Icon::User => ("user", "About", "fa-user"),
        };
        IconDescriptor { id, label, glyph }
    }
}

impl<'de> Deserialize<'de> for Icon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        Ok(Icon::from_id(&id))
    }
}

/// Icons serialize as their descriptor so templates can read label and glyph
impl Serialize for Icon {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.descriptor().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_aliases() {
        assert_eq!(Icon::from_id("kubernetes"), Icon::Kubernetes);
        assert_eq!(Icon::from_id("K8s"), Icon::Kubernetes);
        assert_eq!(Icon::from_id("github-actions"), Icon::GithubActions);
        assert_eq!(Icon::from_id("GitHub Actions"), Icon::GithubActions);
        assert_eq!(Icon::from_id("argocd"), Icon::Argo);
    }

    #[test]
    fn test_unknown_id_falls_back_to_code() {
        assert_eq!(Icon::from_id("zabbix"), Icon::Code);
        assert_eq!(Icon::from_id(""), Icon::Code);
    }

    #[test]
    fn test_descriptor_round_trips_through_id() {
        for icon in [Icon::Aws, Icon::GithubActions, Icon::MapMarker, Icon::Pdf] {
            assert_eq!(Icon::from_id(icon.descriptor().id), icon);
        }
    }

    #[test]
    fn test_serde_shape() {
        let icons: Vec<Icon> = serde_yaml::from_str("[terraform, helm, nope]").unwrap();
        assert_eq!(icons, vec![Icon::Terraform, Icon::Helm, Icon::Code]);

        let json = serde_json::to_value(Icon::Terraform).unwrap();
        assert_eq!(json["label"], "Terraform");
        assert_eq!(json["glyph"], "si-terraform");
    }
}
