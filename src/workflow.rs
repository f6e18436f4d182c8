//! End-to-end run: processed video, thumbnail, then upload metadata.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use crate::config::Settings;
use crate::metadata::{
    LinkEntry, MetadataRequest, MetadataStore, SavedMetadata, TimestampEntry, dedupe,
};
use crate::observability::MetricsCollector;
use crate::thumbnail::{DEFAULT_FRAME_TIMESTAMP, Finish, ThumbnailGenerator};
use crate::video::{CommandRunner, Invocation, MediaError, VideoProcessor};

#[derive(Debug, Clone)]
pub struct WorkflowRequest {
    pub video: PathBuf,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub timestamps: Vec<TimestampEntry>,
    pub links: Vec<LinkEntry>,
    pub thumbnail_timestamp: String,
}

impl WorkflowRequest {
    pub fn new(
        video: impl Into<PathBuf>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            video: video.into(),
            title: title.into(),
            description: description.into(),
            tags: Vec::new(),
            timestamps: Vec::new(),
            links: Vec::new(),
            thumbnail_timestamp: DEFAULT_FRAME_TIMESTAMP.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowOutcome {
    pub video: PathBuf,
    pub thumbnail: PathBuf,
    pub metadata: SavedMetadata,
}

pub struct Workflow {
    settings: Settings,
    runner: Arc<dyn CommandRunner>,
    metrics: MetricsCollector,
}

impl Workflow {
    pub fn new(settings: Settings, runner: Arc<dyn CommandRunner>) -> Self {
        let metrics = MetricsCollector::new();
        let runner = Arc::new(MeteredRunner {
            inner: runner,
            metrics: metrics.clone(),
        });
        Self {
            settings,
            runner,
            metrics,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn metrics(&self) -> MetricsCollector {
        self.metrics.clone()
    }

    /// Compresses, optionally watermarks, and renders the YouTube formats.
    /// Returns the 1080p rendition.
    pub fn process_video(&self, input: &Path) -> Result<PathBuf> {
        let _timer = self.metrics.start_step("video");
        let output_dir = &self.settings.paths.output_dir;
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "video".to_string());

        let compression = &self.settings.video.compression;
        let mut current = VideoProcessor::new(input, output_dir, self.runner.clone())?.compress(
            Some(&format!("{stem}_compressed.mp4")),
            compression.crf,
            compression.preset,
        )?;

        let watermark = &self.settings.video.watermark;
        if watermark.enabled {
            match watermark.file.as_deref() {
                Some(file) if file.is_file() => {
                    current = VideoProcessor::new(&current, output_dir, self.runner.clone())?
                        .add_watermark(file, watermark.position, Some(&format!("{stem}_final.mp4")))?;
                }
                _ => warn!("Watermark enabled but file is missing; skipping watermark"),
            }
        }

        let formats =
            VideoProcessor::new(&current, output_dir, self.runner.clone())?.create_youtube_formats()?;
        info!(
            hd1080 = %formats.hd1080.display(),
            hd720 = %formats.hd720.display(),
            "Video processing complete"
        );
        Ok(formats.hd1080)
    }

    pub fn create_thumbnail(&self, video: &Path, title: &str, timestamp: &str) -> Result<PathBuf> {
        let _timer = self.metrics.start_step("thumbnail");
        ThumbnailGenerator::from_settings(&self.settings, self.runner.clone())?
            .create_from_video(video, title, timestamp, None, &Finish::default())
    }

    /// Caller tags follow the configured defaults; configured standard links
    /// come before caller links.
    pub fn generate_metadata(&self, request: &WorkflowRequest) -> Result<SavedMetadata> {
        let _timer = self.metrics.start_step("metadata");
        let upload = &self.settings.youtube;
        let tags = dedupe(upload.default_tags.iter().chain(request.tags.iter()).cloned());
        let links: Vec<LinkEntry> = upload
            .standard_links
            .iter()
            .chain(request.links.iter())
            .cloned()
            .collect();

        let metadata_request = MetadataRequest::new(&request.title, &request.description)
            .with_tags(tags)
            .with_category(&upload.defaults.category)
            .with_timestamps(request.timestamps.clone())
            .with_links(links);
        MetadataStore::new(&self.settings.paths.metadata_dir).generate(&metadata_request)
    }

    /// Runs the three steps in order. The first failure aborts the run.
    pub fn run(&self, request: &WorkflowRequest) -> Result<WorkflowOutcome> {
        let span = info_span!("workflow", video = %request.video.display());
        let _guard = span.enter();
        let started = Instant::now();

        let outcome = self.run_steps(request);
        self.metrics.record_total_duration(started.elapsed());
        outcome
    }

    fn step<T>(&self, name: &str, action: impl FnOnce() -> Result<T>) -> Result<T> {
        action().inspect_err(|_| self.metrics.record_failed_step(name))
    }

    fn run_steps(&self, request: &WorkflowRequest) -> Result<WorkflowOutcome> {
        info!("Step 1/3: processing video");
        let video = self
            .step("video", || self.process_video(&request.video))
            .context("Video processing step failed")?;

        info!("Step 2/3: creating thumbnail");
        let thumbnail = self
            .step("thumbnail", || {
                self.create_thumbnail(&request.video, &request.title, &request.thumbnail_timestamp)
            })
            .context("Thumbnail step failed")?;

        info!("Step 3/3: generating metadata");
        let metadata = self
            .step("metadata", || self.generate_metadata(request))
            .context("Metadata step failed")?;

        info!(
            video = %video.display(),
            thumbnail = %thumbnail.display(),
            metadata = %metadata.files.json.display(),
            "Workflow complete"
        );
        Ok(WorkflowOutcome {
            video,
            thumbnail,
            metadata,
        })
    }
}

/// Times every tool call made on behalf of a workflow and tallies failures.
struct MeteredRunner {
    inner: Arc<dyn CommandRunner>,
    metrics: MetricsCollector,
}

impl CommandRunner for MeteredRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, MediaError> {
        let started = Instant::now();
        let result = self.inner.run(invocation);
        self.metrics
            .record_tool_run(invocation.tool, started.elapsed(), result.is_ok());
        result
    }
}
