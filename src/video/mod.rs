//! Video operations delegated to ffmpeg.
//!
//! Each operation builds one fixed command line and hands it to a
//! [`CommandRunner`]. Output files land in the processor's output directory.

mod runner;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::placement::Corner;

pub use runner::{CommandRunner, Invocation, MediaError, SystemRunner, Tool};

/// x264 speed/compression trade-off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Ultrafast,
    Superfast,
    Veryfast,
    Faster,
    Fast,
    #[default]
    Medium,
    Slow,
    Slower,
    Veryslow,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ultrafast => "ultrafast",
            Self::Superfast => "superfast",
            Self::Veryfast => "veryfast",
            Self::Faster => "faster",
            Self::Fast => "fast",
            Self::Medium => "medium",
            Self::Slow => "slow",
            Self::Slower => "slower",
            Self::Veryslow => "veryslow",
        }
    }
}

/// Start/end pair accepted by ffmpeg `-ss`/`-to` (`HH:MM:SS` or seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRange {
    pub start: String,
    pub end: String,
}

impl ClipRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl FromStr for ClipRange {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let (start, end) = value
            .split_once(',')
            .ok_or_else(|| anyhow!("Clip range '{value}' must look like START,END"))?;
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            anyhow::bail!("Clip range '{value}' has an empty bound");
        }
        Ok(Self::new(start, end))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoutubeFormats {
    pub hd1080: PathBuf,
    pub hd720: PathBuf,
}

pub struct VideoProcessor {
    input: PathBuf,
    output_dir: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl VideoProcessor {
    /// Fails with [`MediaError::InputNotFound`] before anything runs when the
    /// input is missing.
    pub fn new(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self> {
        let input = input.into();
        if !input.is_file() {
            return Err(MediaError::InputNotFound(input).into());
        }
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;
        Ok(Self {
            input,
            output_dir,
            runner,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn stem(&self) -> String {
        self.input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "video".to_string())
    }

    fn output_path(&self, name: Option<&str>, default_suffix: &str) -> PathBuf {
        match name {
            Some(name) => self.output_dir.join(name),
            None => self
                .output_dir
                .join(format!("{}{}", self.stem(), default_suffix)),
        }
    }

    fn execute(&self, invocation: Invocation) -> Result<Vec<u8>> {
        self.runner
            .run(&invocation)
            .with_context(|| format!("{} failed for {}", invocation.tool, self.input.display()))
    }

    /// Container and stream details as reported by `ffprobe`.
    pub fn info(&self) -> Result<Value> {
        let stdout = self.execute(
            Invocation::ffprobe()
                .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
                .arg(&self.input),
        )?;
        serde_json::from_slice(&stdout).context("ffprobe returned invalid JSON")
    }

    /// H.264/AAC re-encode. Lower `crf` means higher quality; 23 is x264's default.
    pub fn compress(&self, output_name: Option<&str>, crf: u8, preset: Preset) -> Result<PathBuf> {
        let output = self.output_path(output_name, "_compressed.mp4");
        info!(crf, preset = preset.as_str(), "Compressing video");
        self.execute(
            Invocation::ffmpeg()
                .arg("-i")
                .arg(&self.input)
                .args(["-c:v", "libx264", "-crf"])
                .arg(crf.to_string())
                .arg("-preset")
                .arg(preset.as_str())
                .args(["-c:a", "aac", "-b:a", "128k", "-y"])
                .arg(&output),
        )?;
        info!(output = %output.display(), "Compressed video saved");
        Ok(output)
    }

    /// Concatenates intro, main video and outro with stream copy. Intro and
    /// outro files that do not exist are left out.
    pub fn add_intro_outro(
        &self,
        intro: Option<&Path>,
        outro: Option<&Path>,
        output_name: Option<&str>,
    ) -> Result<PathBuf> {
        let output = self.output_path(output_name, "_final.mp4");
        let list_path = self.output_dir.join("concat_list.txt");

        let mut list = String::new();
        for part in [intro, Some(self.input.as_path()), outro]
            .into_iter()
            .flatten()
            .filter(|path| path.exists())
        {
            let absolute = std::path::absolute(part)
                .with_context(|| format!("Failed to resolve {}", part.display()))?;
            list.push_str(&format!("file '{}'\n", absolute.display()));
        }
        fs::write(&list_path, list)
            .with_context(|| format!("Failed to write concat list: {}", list_path.display()))?;

        info!("Adding intro/outro");
        let result = self.execute(
            Invocation::ffmpeg()
                .args(["-f", "concat", "-safe", "0", "-i"])
                .arg(&list_path)
                .args(["-c", "copy", "-y"])
                .arg(&output),
        );
        let _ = fs::remove_file(&list_path);
        result?;

        info!(output = %output.display(), "Final video saved");
        Ok(output)
    }

    pub fn add_watermark(
        &self,
        watermark: &Path,
        corner: Corner,
        output_name: Option<&str>,
    ) -> Result<PathBuf> {
        if !watermark.is_file() {
            return Err(MediaError::InputNotFound(watermark.to_path_buf()).into());
        }
        let output = self.output_path(output_name, "_watermarked.mp4");
        let filter = format!(
            "[1:v]scale=120:-1[wm];[0:v][wm]overlay={}",
            corner.overlay_expr()
        );

        info!(position = corner.as_str(), "Adding watermark");
        self.execute(
            Invocation::ffmpeg()
                .arg("-i")
                .arg(&self.input)
                .arg("-i")
                .arg(watermark)
                .arg("-filter_complex")
                .arg(filter)
                .args(["-c:a", "copy", "-y"])
                .arg(&output),
        )?;
        info!(output = %output.display(), "Watermarked video saved");
        Ok(output)
    }

    pub fn extract_audio(&self, output_name: Option<&str>) -> Result<PathBuf> {
        let output = self.output_path(output_name, "_audio.mp3");
        info!("Extracting audio");
        self.execute(
            Invocation::ffmpeg()
                .arg("-i")
                .arg(&self.input)
                .args(["-vn", "-acodec", "libmp3lame", "-q:a", "2", "-y"])
                .arg(&output),
        )?;
        info!(output = %output.display(), "Audio saved");
        Ok(output)
    }

    /// Cuts `{prefix}_01.mp4`, `{prefix}_02.mp4`, ... with stream copy.
    pub fn create_clips(&self, ranges: &[ClipRange], prefix: &str) -> Result<Vec<PathBuf>> {
        let mut clips = Vec::with_capacity(ranges.len());
        for (idx, range) in ranges.iter().enumerate() {
            let output = self
                .output_dir
                .join(format!("{}_{:02}.mp4", prefix, idx + 1));
            info!(
                clip = idx + 1,
                start = range.start.as_str(),
                end = range.end.as_str(),
                "Creating clip"
            );
            self.execute(
                Invocation::ffmpeg()
                    .arg("-i")
                    .arg(&self.input)
                    .arg("-ss")
                    .arg(&range.start)
                    .arg("-to")
                    .arg(&range.end)
                    .args(["-c", "copy", "-y"])
                    .arg(&output),
            )?;
            clips.push(output);
        }
        info!(count = clips.len(), "Clips created");
        Ok(clips)
    }

    /// Burns a subtitle file into the picture.
    pub fn add_subtitles(&self, subtitles: &Path, output_name: Option<&str>) -> Result<PathBuf> {
        if !subtitles.is_file() {
            return Err(MediaError::InputNotFound(subtitles.to_path_buf()).into());
        }
        let output = self.output_path(output_name, "_subtitled.mp4");
        let absolute = std::path::absolute(subtitles)
            .with_context(|| format!("Failed to resolve {}", subtitles.display()))?;

        info!("Adding subtitles");
        self.execute(
            Invocation::ffmpeg()
                .arg("-i")
                .arg(&self.input)
                .arg("-vf")
                .arg(format!("subtitles='{}'", escape_filter_path(&absolute)))
                .args(["-c:a", "copy", "-y"])
                .arg(&output),
        )?;
        info!(output = %output.display(), "Subtitled video saved");
        Ok(output)
    }

    pub fn resize(&self, width: u32, height: u32, output_name: Option<&str>) -> Result<PathBuf> {
        let output = self.output_path(output_name, &format!("_{width}x{height}.mp4"));
        info!(width, height, "Resizing video");
        self.execute(
            Invocation::ffmpeg()
                .arg("-i")
                .arg(&self.input)
                .arg("-vf")
                .arg(format!("scale={width}:{height}"))
                .args(["-c:a", "copy", "-y"])
                .arg(&output),
        )?;
        info!(output = %output.display(), "Resized video saved");
        Ok(output)
    }

    /// 1080p and 720p renditions.
    pub fn create_youtube_formats(&self) -> Result<YoutubeFormats> {
        let stem = self.stem();
        let hd1080 = self.resize(1920, 1080, Some(&format!("{stem}_1080p.mp4")))?;
        let hd720 = self.resize(1280, 720, Some(&format!("{stem}_720p.mp4")))?;
        Ok(YoutubeFormats { hd1080, hd720 })
    }
}

/// Escapes a path for use inside an ffmpeg filter argument.
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .replace(':', "\\:")
}
