//! Upload metadata records and their on-disk JSON/YAML pairs.

mod description;
mod template;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::persist::write_atomic;

pub use description::{
    COMMON_SEO_TAGS, FOOTER, METADATA_SUFFIX, build_description, dedupe, derived_file_name,
    generate_seo_tags, parse_timestamps, safe_stem,
};
pub use template::Template;

pub const DEFAULT_CATEGORY: &str = "Education";
const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimestampEntry {
    pub time: String,
    pub label: String,
}

impl TimestampEntry {
    pub fn new(time: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinkEntry {
    pub label: String,
    pub url: String,
}

impl LinkEntry {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Unlisted,
    Private,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum License {
    #[default]
    #[serde(rename = "youtube")]
    Youtube,
    #[serde(rename = "creativeCommon")]
    CreativeCommon,
}

/// Everything an upload needs besides the media itself, as produced by
/// generation. Stored documents are read back untyped, see
/// [`MetadataDocument`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub privacy_status: Privacy,
    #[serde(default)]
    pub made_for_kids: bool,
    #[serde(default = "enabled")]
    pub embeddable: bool,
    #[serde(default)]
    pub license: License,
    #[serde(default = "enabled")]
    pub public_stats_viewable: bool,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default = "today")]
    pub recording_date: NaiveDate,
    #[serde(default)]
    pub playlist: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_language")]
    pub default_audio_language: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn enabled() -> bool {
    true
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl MetadataRecord {
    /// Builds a record with the fixed upload defaults. Tags are deduplicated
    /// in first-occurrence order.
    pub fn assemble(request: &MetadataRequest) -> Self {
        Self {
            title: request.title.clone(),
            description: build_description(
                &request.description,
                &request.timestamps,
                &request.links,
            ),
            tags: dedupe(request.tags.iter().cloned()),
            category: request
                .category
                .clone()
                .unwrap_or_else(default_category),
            privacy_status: Privacy::Public,
            made_for_kids: false,
            embeddable: true,
            license: License::Youtube,
            public_stats_viewable: true,
            publish_at: None,
            recording_date: today(),
            playlist: None,
            language: default_language(),
            default_audio_language: default_language(),
        }
    }
}

/// Caller input for [`MetadataStore::generate`]. Also the entry format of
/// batch manifests, where `title` and `description` are required keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MetadataRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub timestamps: Vec<TimestampEntry>,
    #[serde(default)]
    pub links: Vec<LinkEntry>,
    #[serde(default)]
    pub output_file: Option<String>,
}

impl MetadataRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_timestamps(mut self, timestamps: Vec<TimestampEntry>) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn with_links(mut self, links: Vec<LinkEntry>) -> Self {
        self.links = links;
        self
    }

    pub fn with_output_file(mut self, name: impl Into<String>) -> Self {
        self.output_file = Some(name.into());
        self
    }

    /// File name the record is stored under: the override, or one derived
    /// from the title.
    pub fn file_name(&self) -> String {
        self.output_file
            .clone()
            .unwrap_or_else(|| derived_file_name(&self.title))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFiles {
    pub json: PathBuf,
    pub yaml: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedMetadata {
    pub record: MetadataRecord,
    pub files: MetadataFiles,
}

/// A record as stored on disk, untyped. Loading and updating never validate
/// the fields, so hand-edited values pass through unchanged.
pub type MetadataDocument = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct SavedDocument {
    pub document: MetadataDocument,
    pub files: MetadataFiles,
}

/// Reads and writes metadata record pairs below one directory.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    dir: PathBuf,
}

impl MetadataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves both halves of a record pair. A YAML-named file maps onto its
    /// JSON sibling so the pair never collapses into one path.
    pub fn paths_for(&self, file_name: &str) -> MetadataFiles {
        let requested = self.dir.join(file_name);
        let json = if is_yaml(&requested) {
            requested.with_extension("json")
        } else {
            requested
        };
        let yaml = json.with_extension("yaml");
        MetadataFiles { json, yaml }
    }

    pub fn generate(&self, request: &MetadataRequest) -> Result<SavedMetadata> {
        let record = MetadataRecord::assemble(request);
        let files = self.save(&record, &request.file_name())?;
        Ok(SavedMetadata { record, files })
    }

    /// Applies `template` defaults: template category, template tags and
    /// links first, followed by the caller's own.
    pub fn create_from_template(
        &self,
        template: Template,
        request: &MetadataRequest,
    ) -> Result<SavedMetadata> {
        let mut tags = template.tags();
        tags.extend(request.tags.iter().cloned());
        let mut links = template.links();
        links.extend(request.links.iter().cloned());

        let merged = MetadataRequest {
            category: Some(template.category().to_string()),
            tags,
            links,
            ..request.clone()
        };
        self.generate(&merged)
    }

    /// Generates one record per entry; the first failure aborts the batch.
    pub fn generate_batch(&self, requests: &[MetadataRequest]) -> Result<Vec<SavedMetadata>> {
        let mut saved = Vec::with_capacity(requests.len());
        for (idx, request) in requests.iter().enumerate() {
            let entry = self.generate(request).with_context(|| {
                format!("Batch entry {} ('{}') failed", idx + 1, request.title)
            })?;
            saved.push(entry);
        }
        info!(count = saved.len(), "Batch metadata created");
        Ok(saved)
    }

    pub fn save(&self, record: &MetadataRecord, file_name: &str) -> Result<MetadataFiles> {
        self.write_pair(record, file_name)
    }

    /// Persists a free-form document through the same pair writer as
    /// [`MetadataStore::save`].
    pub fn save_document(&self, document: &MetadataDocument, file_name: &str) -> Result<MetadataFiles> {
        self.write_pair(document, file_name)
    }

    /// Loads a document, as YAML when the name carries a YAML extension and
    /// as JSON otherwise. Any well-formed mapping is returned as-is.
    pub fn load(&self, file_name: &str) -> Result<MetadataDocument> {
        let path = self.dir.join(file_name);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read metadata file: {}", path.display()))?;
        if is_yaml(&path) {
            parse_yaml(&content, &path)
        } else {
            parse_json(&content, &path)
        }
    }

    /// Shallow merge: each top-level key in `partial` replaces the stored
    /// value wholesale.
    pub fn update(&self, file_name: &str, partial: Map<String, Value>) -> Result<SavedDocument> {
        let mut document = self.load(file_name)?;
        for (key, field) in partial {
            document.insert(key, field);
        }
        let files = self.save_document(&document, file_name)?;
        Ok(SavedDocument { document, files })
    }

    fn write_pair<T: Serialize>(&self, contents: &T, file_name: &str) -> Result<MetadataFiles> {
        let files = self.paths_for(file_name);

        let json = serde_json::to_vec_pretty(contents)
            .with_context(|| format!("Failed to serialize metadata for {}", files.json.display()))?;
        let yaml = serde_yaml::to_string(contents)
            .with_context(|| format!("Failed to serialize metadata for {}", files.yaml.display()))?;

        write_atomic(&files.json, &json)?;
        info!(path = %files.json.display(), "Metadata saved");
        write_atomic(&files.yaml, yaml.as_bytes())?;
        info!(path = %files.yaml.display(), "YAML version saved");

        Ok(files)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn parse_yaml<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T> {
    serde_yaml::from_str(content)
        .with_context(|| format!("Failed to parse metadata YAML: {}", path.display()))
}

fn parse_json<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T> {
    serde_json::from_str(content)
        .with_context(|| format!("Failed to parse metadata JSON: {}", path.display()))
}

/// Reads a batch manifest: a YAML or JSON list of [`MetadataRequest`]s.
pub fn load_manifest(path: &Path) -> Result<Vec<MetadataRequest>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    if is_yaml(path) {
        parse_yaml(&content, path)
    } else {
        parse_json(&content, path)
    }
}
