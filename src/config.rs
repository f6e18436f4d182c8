use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::metadata::LinkEntry;
use crate::placement::Corner;
use crate::video::Preset;

/// Top-level configuration. Every section falls back to built-in defaults
/// when absent from the YAML document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub project: ProjectSettings,
    pub paths: PathSettings,
    pub tools: ToolSettings,
    pub video: VideoSettings,
    pub youtube: UploadSettings,
    pub thumbnail: ThumbnailSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub name: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            name: "Tutorial Series".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PathSettings {
    pub metadata_dir: PathBuf,
    pub output_dir: PathBuf,
    pub thumbnail_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            metadata_dir: PathBuf::from("metadata"),
            output_dir: PathBuf::from("processed-videos"),
            thumbnail_dir: PathBuf::from("thumbnails"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolSettings {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VideoSettings {
    pub compression: CompressionSettings,
    pub watermark: WatermarkSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompressionSettings {
    pub crf: u8,
    pub preset: Preset,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            crf: 23,
            preset: Preset::Medium,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WatermarkSettings {
    pub enabled: bool,
    pub file: Option<PathBuf>,
    pub position: Corner,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadSettings {
    pub defaults: UploadDefaults,
    pub default_tags: Vec<String>,
    pub standard_links: Vec<LinkEntry>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            defaults: UploadDefaults::default(),
            default_tags: vec!["tutorial".to_string(), "coding".to_string()],
            standard_links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadDefaults {
    pub category: String,
}

impl Default for UploadDefaults {
    fn default() -> Self {
        Self {
            category: crate::metadata::DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    /// TrueType/OpenType font used for titles. System fonts are searched when unset.
    pub font: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            font: None,
            width: 1280,
            height: 720,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        // An empty document deserializes as unit, not as a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config YAML: {}", path.display()))?;
        Ok(settings)
    }

    /// Loads `path` when it exists, otherwise returns the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(
                config = %path.display(),
                "Config file not found; using built-in defaults"
            );
            Ok(Self::default())
        }
    }

    pub fn write(&self, destination: &Path) -> Result<PathBuf> {
        let rendered = serde_yaml::to_string(self)?;
        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(destination, rendered)
            .with_context(|| format!("Failed to write config file: {}", destination.display()))?;
        Ok(destination.to_path_buf())
    }
}
