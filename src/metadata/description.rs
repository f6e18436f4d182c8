//! Text assembly for upload descriptions, tags and derived file names.
//!
//! Everything here is a pure function of its arguments: identical inputs
//! always produce byte-identical output.

use super::{LinkEntry, TimestampEntry};

const TIMESTAMPS_HEADER: &str = "📌 TIMESTAMPS";
const LINKS_HEADER: &str = "🔗 LINKS & RESOURCES";
const RULE_WIDTH: usize = 40;
const MAX_STEM_CHARS: usize = 50;
const MAX_SEO_TAGS: usize = 15;

/// Appended to every description. Not configurable.
pub const FOOTER: [&str; 9] = [
    "━━━━━━━━━━━━━━━━━━━━━━━━",
    "📺 SUBSCRIBE for more tutorials!",
    "👍 Like this video if you found it helpful",
    "💬 Leave a comment with your questions",
    "",
    "━━━━━━━━━━━━━━━━━━━━━━━━",
    "🔔 Turn on notifications to never miss a video!",
    "",
    "#tutorial #coding #programming",
];

/// Suffix appended to a derived metadata file stem.
pub const METADATA_SUFFIX: &str = "_metadata.json";

/// Generic words used to pad SEO tag lists.
pub const COMMON_SEO_TAGS: [&str; 9] = [
    "tutorial",
    "how to",
    "learn",
    "beginner",
    "guide",
    "programming",
    "coding",
    "development",
    "software",
];

pub fn build_description(
    base: &str,
    timestamps: &[TimestampEntry],
    links: &[LinkEntry],
) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut lines: Vec<String> = vec![base.to_string(), String::new()];

    if !timestamps.is_empty() {
        lines.push(TIMESTAMPS_HEADER.to_string());
        lines.push(rule.clone());
        lines.extend(
            timestamps
                .iter()
                .map(|entry| format!("{} - {}", entry.time, entry.label)),
        );
        lines.push(String::new());
    }

    if !links.is_empty() {
        lines.push(LINKS_HEADER.to_string());
        lines.push(rule);
        lines.extend(
            links
                .iter()
                .map(|link| format!("{}: {}", link.label, link.url)),
        );
        lines.push(String::new());
    }

    lines.extend(FOOTER.iter().map(|line| line.to_string()));
    lines.join("\n")
}

/// Reduces a title to a file-system friendly stem: alphanumerics, `-` and
/// `_` survive, spaces become `_`, at most 50 characters.
pub fn safe_stem(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim_end()
        .replace(' ', "_")
        .chars()
        .take(MAX_STEM_CHARS)
        .collect()
}

pub fn derived_file_name(title: &str) -> String {
    format!("{}{}", safe_stem(title), METADATA_SUFFIX)
}

/// Order-preserving deduplication; the first occurrence wins.
pub fn dedupe<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let item = item.into();
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

pub fn generate_seo_tags(base_tags: &[String], topic: &str) -> Vec<String> {
    let mut tags: Vec<String> = base_tags.to_vec();

    let lowered = topic.to_lowercase();
    tags.extend(
        lowered
            .split_whitespace()
            .filter(|word| word.chars().count() > 3)
            .map(str::to_string),
    );

    for common in COMMON_SEO_TAGS {
        if !tags.iter().any(|tag| tag == common) {
            tags.push(common.to_string());
        }
    }

    let mut tags = dedupe(tags);
    tags.truncate(MAX_SEO_TAGS);
    tags
}

/// Parses `"0:00 - Intro"` style lines. Lines without the ` - ` separator are
/// skipped.
pub fn parse_timestamps(text: &str) -> Vec<TimestampEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split_once(" - "))
        .map(|(time, label)| TimestampEntry::new(time.trim(), label.trim()))
        .collect()
}
