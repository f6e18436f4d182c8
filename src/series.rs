//! Tutorial series registries.
//!
//! A registry is a single JSON document listing the episodes of one series.
//! Every mutation is a compare-and-swap: the document is read together with
//! its SHA-256 revision, and the write only goes through when the file on
//! disk still carries that revision.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::metadata::{
    LinkEntry, MetadataRecord, MetadataRequest, MetadataStore, SavedMetadata, TimestampEntry,
};
use crate::persist::{digest, write_atomic};

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("Series registry not found: {} (create the series first)", .0.display())]
    NotFound(PathBuf),
    #[error(
        "Series registry {} changed since it was read (expected revision {expected}, found {found})",
        .path.display()
    )]
    Conflict {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error("Episode numbers must be positive")]
    InvalidEpisode,
}

/// Registry document. `created_at` is local time without an offset, e.g.
/// `2024-05-01T12:00:00.123456`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeriesDocument {
    pub series_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub playlist_id: Option<String>,
    #[serde(default)]
    pub videos: Vec<EpisodeRef>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EpisodeRef {
    pub episode: u32,
    pub title: String,
    pub metadata_file: String,
}

/// A registry document as read from disk, tagged with its revision.
#[derive(Debug, Clone)]
pub struct SeriesSnapshot {
    pub document: SeriesDocument,
    revision: String,
}

impl SeriesSnapshot {
    pub fn revision(&self) -> &str {
        &self.revision
    }
}

#[derive(Debug, Clone, Default)]
pub struct EpisodeRequest {
    pub number: u32,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub timestamps: Vec<TimestampEntry>,
    pub links: Vec<LinkEntry>,
}

impl EpisodeRequest {
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            ..Self::default()
        }
    }
}

pub struct SeriesRegistry {
    name: String,
    store: MetadataStore,
    path: PathBuf,
}

impl SeriesRegistry {
    pub fn new(name: impl Into<String>, store: MetadataStore) -> Self {
        let name = name.into();
        let path = store.dir().join(format!("{name}_series.json"));
        Self { name, store, path }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tag attached to every episode: lower-cased, spaces as underscores.
    pub fn series_tag(&self) -> String {
        self.name.to_lowercase().replace(' ', "_")
    }

    pub fn episode_file_name(&self, number: u32) -> String {
        format!("{}_ep{:02}_metadata.json", self.name.replace(' ', "_"), number)
    }

    /// Starts a fresh registry, replacing any existing document of the same name.
    pub fn create(&self, description: &str, playlist_id: Option<String>) -> Result<SeriesDocument> {
        let document = SeriesDocument {
            series_name: self.name.clone(),
            description: description.to_string(),
            playlist_id,
            videos: Vec::new(),
            created_at: Local::now().naive_local(),
        };
        if self.path.exists() {
            warn!(path = %self.path.display(), "Replacing existing series registry");
        }
        write_atomic(&self.path, &render(&document)?)?;
        info!(series = %self.name, path = %self.path.display(), "Created series");
        Ok(document)
    }

    pub fn read(&self) -> Result<SeriesSnapshot> {
        let bytes = self.read_bytes()?;
        let document: SeriesDocument = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse series registry: {}", self.path.display()))?;
        Ok(SeriesSnapshot {
            document,
            revision: digest(&bytes),
        })
    }

    /// Writes `snapshot.document` if the registry still matches the revision
    /// the snapshot was read at. Returns the snapshot of the new revision.
    pub fn commit(&self, snapshot: SeriesSnapshot) -> Result<SeriesSnapshot> {
        self.ensure_unchanged(&snapshot)?;
        let rendered = render(&snapshot.document)?;
        write_atomic(&self.path, &rendered)?;
        Ok(SeriesSnapshot {
            document: snapshot.document,
            revision: digest(&rendered),
        })
    }

    pub fn add_episode(&self, request: &EpisodeRequest) -> Result<SavedMetadata> {
        if request.number == 0 {
            return Err(SeriesError::InvalidEpisode.into());
        }
        let mut snapshot = self.read()?;
        let number = request.number;

        if snapshot
            .document
            .videos
            .iter()
            .any(|episode| episode.episode == number)
        {
            warn!(
                series = %self.name,
                episode = number,
                "Episode number already registered; adding another entry"
            );
        }

        let title = format!("{} #{}: {}", self.name, number, request.title);
        let description = format!(
            "Part {} of the {} series.\n\n{}",
            number, self.name, request.description
        );
        let mut tags = request.tags.clone();
        tags.push(self.series_tag());
        let file_name = self.episode_file_name(number);

        let metadata_request = MetadataRequest {
            title: title.clone(),
            description,
            tags,
            category: request.category.clone(),
            timestamps: request.timestamps.clone(),
            links: request.links.clone(),
            output_file: Some(file_name.clone()),
        };
        let mut record = MetadataRecord::assemble(&metadata_request);
        if let Some(playlist) = snapshot
            .document
            .playlist_id
            .as_ref()
            .filter(|id| !id.is_empty())
        {
            record.playlist = Some(playlist.clone());
        }

        snapshot.document.videos.push(EpisodeRef {
            episode: number,
            title,
            metadata_file: file_name.clone(),
        });

        // Bail before touching the metadata pair when another writer got in first.
        self.ensure_unchanged(&snapshot)?;
        let files = self.store.save(&record, &file_name)?;
        self.commit(snapshot)?;

        info!(series = %self.name, episode = number, "Added episode to series");
        Ok(SavedMetadata { record, files })
    }

    fn ensure_unchanged(&self, snapshot: &SeriesSnapshot) -> Result<()> {
        let current = digest(&self.read_bytes()?);
        if current != snapshot.revision {
            return Err(SeriesError::Conflict {
                path: self.path.clone(),
                expected: snapshot.revision.clone(),
                found: current,
            }
            .into());
        }
        Ok(())
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(SeriesError::NotFound(self.path.clone()).into())
            }
            Err(err) => Err(err)
                .with_context(|| format!("Failed to read series registry: {}", self.path.display())),
        }
    }
}

fn render(document: &SeriesDocument) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(document).context("Failed to serialize series registry")
}
