use std::path::Path;

use serde::Serialize;

use crate::config::Settings;

const MAX_CRF: u8 = 51;

#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

pub fn validate_settings(settings: &Settings) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.merge(validate_paths(settings));

    let crf = settings.video.compression.crf;
    if crf > MAX_CRF {
        report.errors.push(format!(
            "video.compression.crf must be between 0 and {MAX_CRF} (got {crf})"
        ));
    }

    let watermark = &settings.video.watermark;
    if watermark.enabled {
        match &watermark.file {
            None => report
                .warnings
                .push("video.watermark is enabled but no file is configured".into()),
            Some(file) if !file.is_file() => report.warnings.push(format!(
                "video.watermark.file '{}' does not exist; watermarking will be skipped",
                file.display()
            )),
            Some(_) => {}
        }
    }

    let thumbnail = &settings.thumbnail;
    if thumbnail.width == 0 || thumbnail.height == 0 {
        report.errors.push(format!(
            "thumbnail dimensions must be non-zero (got {}x{})",
            thumbnail.width, thumbnail.height
        ));
    }
    if let Some(font) = &thumbnail.font
        && !font.is_file()
    {
        report.warnings.push(format!(
            "thumbnail.font '{}' does not exist",
            font.display()
        ));
    }

    if settings.youtube.defaults.category.trim().is_empty() {
        report
            .warnings
            .push("youtube.defaults.category is empty".into());
    }
    for (idx, link) in settings.youtube.standard_links.iter().enumerate() {
        if link.url.trim().is_empty() {
            report.errors.push(format!(
                "youtube.standard_links[{idx}] ('{}') has an empty url",
                link.label
            ));
        }
    }

    report
}

fn validate_paths(settings: &Settings) -> ValidationReport {
    let mut report = ValidationReport::default();
    let paths = &settings.paths;
    for (key, value) in [
        ("paths.metadata_dir", &paths.metadata_dir),
        ("paths.output_dir", &paths.output_dir),
        ("paths.thumbnail_dir", &paths.thumbnail_dir),
    ] {
        if is_blank(value) {
            report.errors.push(format!("{key} cannot be empty"));
        }
    }
    for (key, value) in [
        ("tools.ffmpeg", &settings.tools.ffmpeg),
        ("tools.ffprobe", &settings.tools.ffprobe),
    ] {
        if is_blank(value) {
            report.errors.push(format!("{key} cannot be empty"));
        }
    }
    report
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}
