use serde::{Deserialize, Serialize};
use tracing::warn;

use super::LinkEntry;

/// Built-in metadata templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    #[default]
    Tutorial,
    QuickTip,
    ProjectShowcase,
}

impl Template {
    pub const ALL: [Template; 3] = [Self::Tutorial, Self::QuickTip, Self::ProjectShowcase];

    /// Resolves a template by its exact name. Anything else, including
    /// padded or differently cased names, resolves to [`Template::Tutorial`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "tutorial" => Self::Tutorial,
            "quick_tip" => Self::QuickTip,
            "project_showcase" => Self::ProjectShowcase,
            other => {
                warn!(
                    template = other,
                    "Unknown metadata template; using 'tutorial'"
                );
                Self::Tutorial
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tutorial => "tutorial",
            Self::QuickTip => "quick_tip",
            Self::ProjectShowcase => "project_showcase",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Tutorial | Self::QuickTip => "Education",
            Self::ProjectShowcase => "Science & Technology",
        }
    }

    pub fn tags(&self) -> Vec<String> {
        let tags: &[&str] = match self {
            Self::Tutorial => &["tutorial", "programming", "coding", "education", "learn"],
            Self::QuickTip => &["quick tip", "programming", "coding", "howto"],
            Self::ProjectShowcase => &["project", "showcase", "demo", "coding"],
        };
        tags.iter().map(|tag| tag.to_string()).collect()
    }

    pub fn links(&self) -> Vec<LinkEntry> {
        match self {
            Self::Tutorial => vec![
                LinkEntry::new("GitHub Repository", "https://github.com/yourusername/repo"),
                LinkEntry::new("Documentation", "https://docs.example.com"),
            ],
            Self::QuickTip => Vec::new(),
            Self::ProjectShowcase => vec![
                LinkEntry::new("Live Demo", "https://demo.example.com"),
                LinkEntry::new("GitHub", "https://github.com/yourusername/project"),
            ],
        }
    }
}
