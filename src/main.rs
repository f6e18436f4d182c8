use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use image::Rgb;
use serde_json::{Map, Value};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, prelude::*};
use vidforge::config::Settings;
use vidforge::inputs::expand_inputs;
use vidforge::metadata::{
    LinkEntry, MetadataRequest, MetadataStore, Template, TimestampEntry, generate_seo_tags,
    load_manifest, parse_timestamps,
};
use vidforge::observability::{log_snapshot, write_snapshot};
use vidforge::placement::Corner;
use vidforge::series::{EpisodeRequest, SeriesRegistry};
use vidforge::thumbnail::{
    BandPosition, Branding, DEFAULT_FRAME_TIMESTAMP, DEFAULT_LOGO_SCALE, Effects, Finish,
    ThumbnailGenerator, TitleStyle,
};
use vidforge::validation::validate_settings;
use vidforge::video::{ClipRange, CommandRunner, Preset, SystemRunner, VideoProcessor};
use vidforge::workflow::{Workflow, WorkflowRequest};

#[cfg(feature = "otel")]
use opentelemetry::KeyValue;
#[cfg(feature = "otel")]
use opentelemetry_otlp::WithExportConfig;
#[cfg(feature = "otel")]
use opentelemetry_sdk::{resource::Resource, trace as sdktrace};

fn main() -> Result<()> {
    let Cli {
        config,
        otlp_endpoint,
        command,
    } = Cli::parse();

    configure_tracing(otlp_endpoint.as_deref())?;

    let result = dispatch(&config, command);

    #[cfg(feature = "otel")]
    if otlp_endpoint.is_some() {
        opentelemetry::global::shutdown_tracer_provider();
    }

    result
}

fn dispatch(config_path: &Path, command: Commands) -> Result<()> {
    let load = || Settings::load_or_default(config_path);
    match command {
        Commands::Video { output_dir, action } => video_command(&load()?, output_dir, action),
        Commands::Thumbnail { output_dir, action } => {
            thumbnail_command(load()?, output_dir, action)
        }
        Commands::Metadata { action } => metadata_command(&load()?, action),
        Commands::Series { action } => series_command(&load()?, action),
        Commands::Workflow(args) => workflow_command(load()?, args),
        Commands::Config { action } => config_command(config_path, action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn configure_tracing(otlp_endpoint: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(feature = "otel")]
    {
        if let Some(endpoint) = otlp_endpoint {
            let tracer =
                opentelemetry_otlp::new_pipeline()
                    .tracing()
                    .with_trace_config(sdktrace::Config::default().with_resource(Resource::new(
                        vec![KeyValue::new("service.name", "vidforge")],
                    )))
                    .with_exporter(
                        opentelemetry_otlp::new_exporter()
                            .tonic()
                            .with_endpoint(endpoint),
                    )
                    .install_simple()?;

            tracing_subscriber::registry()
                .with(filter.clone())
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()
                .map_err(|err| anyhow!(err.to_string()))?;
        } else {
            tracing_subscriber::registry()
                .with(filter.clone())
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .try_init()
                .map_err(|err| anyhow!(err.to_string()))?;
        }
    }

    #[cfg(not(feature = "otel"))]
    {
        if let Some(endpoint) = otlp_endpoint {
            eprintln!(
                "warning: --otlp-endpoint '{}' requested but OpenTelemetry support is not enabled. Rebuild with --features otel.",
                endpoint
            );
        }

        tracing_subscriber::registry()
            .with(filter.clone())
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init()
            .map_err(|err| anyhow!(err.to_string()))?;
    }

    Ok(())
}

fn system_runner(settings: &Settings) -> Arc<dyn CommandRunner> {
    Arc::new(SystemRunner::new(&settings.tools))
}

fn video_command(settings: &Settings, output_dir: Option<PathBuf>, action: VideoCommands) -> Result<()> {
    let output_dir = output_dir.unwrap_or_else(|| settings.paths.output_dir.clone());
    let runner = system_runner(settings);
    let processor = |input: &Path| VideoProcessor::new(input, &output_dir, runner.clone());

    match action {
        VideoCommands::Info { input } => {
            let info = processor(&input)?.info()?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        VideoCommands::Compress {
            inputs,
            crf,
            preset,
            output,
        } => {
            let inputs = resolve_inputs(&inputs, output.as_deref())?;
            let crf = crf.unwrap_or(settings.video.compression.crf);
            let preset = preset.unwrap_or(settings.video.compression.preset);
            for input in inputs {
                let path = processor(&input)?.compress(output.as_deref(), crf, preset)?;
                println!("{}", path.display());
            }
        }
        VideoCommands::Resize {
            input,
            width,
            height,
            output,
        } => {
            let path = processor(&input)?.resize(width, height, output.as_deref())?;
            println!("{}", path.display());
        }
        VideoCommands::Watermark {
            input,
            watermark,
            position,
            output,
        } => {
            let watermark = watermark
                .or_else(|| settings.video.watermark.file.clone())
                .ok_or_else(|| anyhow!("No watermark given and none configured"))?;
            let position = position.unwrap_or(settings.video.watermark.position);
            let path = processor(&input)?.add_watermark(&watermark, position, output.as_deref())?;
            println!("{}", path.display());
        }
        VideoCommands::IntroOutro {
            input,
            intro,
            outro,
            output,
        } => {
            let path = processor(&input)?.add_intro_outro(
                intro.as_deref(),
                outro.as_deref(),
                output.as_deref(),
            )?;
            println!("{}", path.display());
        }
        VideoCommands::ExtractAudio { inputs, output } => {
            for input in resolve_inputs(&inputs, output.as_deref())? {
                let path = processor(&input)?.extract_audio(output.as_deref())?;
                println!("{}", path.display());
            }
        }
        VideoCommands::Clips {
            input,
            ranges,
            prefix,
        } => {
            if ranges.is_empty() {
                bail!("At least one --range START,END is required");
            }
            for path in processor(&input)?.create_clips(&ranges, &prefix)? {
                println!("{}", path.display());
            }
        }
        VideoCommands::Subtitles {
            input,
            subtitles,
            output,
        } => {
            let path = processor(&input)?.add_subtitles(&subtitles, output.as_deref())?;
            println!("{}", path.display());
        }
        VideoCommands::Youtube { inputs } => {
            for input in expand_inputs(&inputs)? {
                let formats = processor(&input)?.create_youtube_formats()?;
                println!("1080p: {}", formats.hd1080.display());
                println!("720p: {}", formats.hd720.display());
            }
        }
    }
    Ok(())
}

/// An explicit output name only makes sense for a single input.
fn resolve_inputs(patterns: &[String], output: Option<&str>) -> Result<Vec<PathBuf>> {
    let inputs = expand_inputs(patterns)?;
    if output.is_some() && inputs.len() > 1 {
        bail!(
            "--output names a single file but {} inputs matched",
            inputs.len()
        );
    }
    Ok(inputs)
}

fn thumbnail_command(
    mut settings: Settings,
    output_dir: Option<PathBuf>,
    action: ThumbnailCommands,
) -> Result<()> {
    if let Some(dir) = output_dir {
        settings.paths.thumbnail_dir = dir;
    }
    let generator = ThumbnailGenerator::from_settings(&settings, system_runner(&settings))?;

    let path = match action {
        ThumbnailCommands::Video {
            video,
            title,
            timestamp,
            output,
            finish,
        } => generator.create_from_video(&video, &title, &timestamp, output.as_deref(), &finish.into())?,
        ThumbnailCommands::Image {
            image,
            title,
            output,
            finish,
        } => generator.create_from_image(&image, &title, output.as_deref(), &finish.into())?,
        ThumbnailCommands::Custom {
            title,
            subtitle,
            background,
            output,
        } => generator.custom(background, &title, subtitle.as_deref(), &output)?,
    };
    println!("{}", path.display());
    Ok(())
}

fn metadata_command(settings: &Settings, action: MetadataCommands) -> Result<()> {
    let store = MetadataStore::new(&settings.paths.metadata_dir);
    match action {
        MetadataCommands::Generate { content, category } => {
            let request = content
                .into_request()?
                .with_category(category.unwrap_or_else(|| settings.youtube.defaults.category.clone()));
            let saved = store.generate(&request)?;
            print_files(&saved.files.json, &saved.files.yaml);
        }
        MetadataCommands::Template { template, content } => {
            let template = Template::from_name(&template);
            let saved = store.create_from_template(template, &content.into_request()?)?;
            print_files(&saved.files.json, &saved.files.yaml);
        }
        MetadataCommands::SeoTags { topic, tags } => {
            for tag in generate_seo_tags(&tags, &topic) {
                println!("{tag}");
            }
        }
        MetadataCommands::ParseTimestamps { file } => {
            let text = read_text(file.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&parse_timestamps(&text))?);
        }
        MetadataCommands::Show { file } => {
            let document = store.load(&file)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        MetadataCommands::Update { file, json, set } => {
            let mut partial = match json {
                Some(raw) => match serde_json::from_str::<Value>(&raw)
                    .context("--json must be a JSON object")?
                {
                    Value::Object(map) => map,
                    other => bail!("--json must be a JSON object, got {other}"),
                },
                None => Map::new(),
            };
            for assignment in set {
                let (key, value) = parse_assignment(&assignment)?;
                partial.insert(key, value);
            }
            if partial.is_empty() {
                bail!("Nothing to update; pass --json or --set");
            }
            let saved = store.update(&file, partial)?;
            print_files(&saved.files.json, &saved.files.yaml);
        }
        MetadataCommands::Batch { manifest } => {
            let requests = load_manifest(&manifest)?;
            let saved = store.generate_batch(&requests)?;
            for entry in &saved {
                print_files(&entry.files.json, &entry.files.yaml);
            }
            info!(count = saved.len(), manifest = %manifest.display(), "Batch complete");
        }
    }
    Ok(())
}

fn series_command(settings: &Settings, action: SeriesCommands) -> Result<()> {
    let store = MetadataStore::new(&settings.paths.metadata_dir);
    match action {
        SeriesCommands::Create {
            name,
            description,
            playlist_id,
        } => {
            let registry = SeriesRegistry::new(name, store);
            registry.create(&description, playlist_id)?;
            println!("{}", registry.path().display());
        }
        SeriesCommands::Add {
            name,
            episode,
            content,
            category,
        } => {
            let registry = SeriesRegistry::new(name, store);
            let MetadataRequest {
                title,
                description,
                tags,
                timestamps,
                links,
                output_file,
                ..
            } = content.into_request()?;
            if output_file.is_some() {
                warn!("--output is ignored for series episodes; the file name follows the episode number");
            }
            let mut request = EpisodeRequest::new(episode, title);
            request.description = description;
            request.tags = tags;
            request.category = category;
            request.timestamps = timestamps;
            request.links = links;

            let saved = registry.add_episode(&request)?;
            print_files(&saved.files.json, &saved.files.yaml);
        }
    }
    Ok(())
}

fn workflow_command(settings: Settings, args: WorkflowArgs) -> Result<()> {
    let runner = system_runner(&settings);
    let workflow = Workflow::new(settings, runner);

    let mut request = WorkflowRequest::new(args.video, args.title, args.description);
    request.tags = args.tags;
    request.timestamps = parse_timestamp_pairs(&args.timestamps);
    request.links = parse_link_pairs(&args.links);
    request.thumbnail_timestamp = args.thumbnail_time;

    let result = workflow.run(&request);

    let snapshot = workflow.metrics().snapshot();
    if args.print_metrics {
        log_snapshot(&snapshot);
    }
    if let Some(path) = &args.metrics_json {
        write_snapshot(&snapshot, path)?;
    }

    let outcome = result?;
    println!("video: {}", outcome.video.display());
    println!("thumbnail: {}", outcome.thumbnail.display());
    println!("metadata: {}", outcome.metadata.files.json.display());
    Ok(())
}

fn config_command(config_path: &Path, action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Init { output, force } => {
            let destination = output.unwrap_or_else(|| config_path.to_path_buf());
            if destination.exists() && !force {
                bail!(
                    "{} already exists; pass --force to overwrite",
                    destination.display()
                );
            }
            let written = Settings::default().write(&destination)?;
            info!(config = %written.display(), "Default configuration written");
            println!("{}", written.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let settings = Settings::load_or_default(config_path)?;
            print!("{}", serde_yaml::to_string(&settings)?);
            Ok(())
        }
        ConfigCommands::Validate => {
            let settings = Settings::load(config_path)?;
            let report = validate_settings(&settings);

            for warning in &report.warnings {
                warn!(file = %config_path.display(), "{warning}");
            }

            if report.is_ok() {
                info!(file = %config_path.display(), "Configuration validation passed");
                Ok(())
            } else {
                for error_msg in &report.errors {
                    error!(file = %config_path.display(), "{error_msg}");
                }
                Err(anyhow!(
                    "Configuration validation failed with {} error(s)",
                    report.errors.len()
                ))
            }
        }
    }
}

fn print_files(json: &Path, yaml: &Path) {
    println!("{}", json.display());
    println!("{}", yaml.display());
}

fn read_text(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => io::read_to_string(io::stdin()).context("Failed to read standard input"),
    }
}

/// `KEY=VALUE`; the value is parsed as JSON when it can be, else kept as text.
fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("'{raw}' must look like KEY=VALUE"))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("'{raw}' has an empty key");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Splits `A,B` pairs on the first comma. Entries without a comma are dropped.
fn split_pairs(raw: &[String], kind: &str) -> Vec<(String, String)> {
    raw.iter()
        .filter_map(|entry| match entry.split_once(',') {
            Some((left, right)) => Some((left.trim().to_string(), right.trim().to_string())),
            None => {
                warn!(entry = entry.as_str(), "Ignoring {kind} without a comma");
                None
            }
        })
        .collect()
}

fn parse_timestamp_pairs(raw: &[String]) -> Vec<TimestampEntry> {
    split_pairs(raw, "timestamp")
        .into_iter()
        .map(|(time, label)| TimestampEntry::new(time, label))
        .collect()
}

fn parse_link_pairs(raw: &[String]) -> Vec<LinkEntry> {
    split_pairs(raw, "link")
        .into_iter()
        .map(|(label, url)| LinkEntry::new(label, url))
        .collect()
}

fn parse_rgb(raw: &str) -> Result<Rgb<u8>> {
    let channels: Vec<u8> = raw
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("'{raw}' must be R,G,B with values 0-255"))?;
    match channels.as_slice() {
        [r, g, b] => Ok(Rgb([*r, *g, *b])),
        _ => bail!("'{raw}' must have exactly three channels"),
    }
}

#[derive(Parser)]
#[command(
    name = "vidforge",
    version,
    about = "Tutorial video production toolkit: ffmpeg processing, thumbnails and upload metadata"
)]
struct Cli {
    #[arg(long, global = true, default_value = "config.yaml", value_hint = ValueHint::FilePath)]
    config: PathBuf,
    #[arg(long = "otlp-endpoint", global = true)]
    otlp_endpoint: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ffmpeg-backed video operations.
    Video {
        #[arg(long = "output-dir", value_hint = ValueHint::DirPath)]
        output_dir: Option<PathBuf>,
        #[command(subcommand)]
        action: VideoCommands,
    },
    Thumbnail {
        #[arg(long = "output-dir", value_hint = ValueHint::DirPath)]
        output_dir: Option<PathBuf>,
        #[command(subcommand)]
        action: ThumbnailCommands,
    },
    Metadata {
        #[command(subcommand)]
        action: MetadataCommands,
    },
    Series {
        #[command(subcommand)]
        action: SeriesCommands,
    },
    /// Process a video, create its thumbnail and write its metadata.
    Workflow(WorkflowArgs),
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum VideoCommands {
    Info {
        input: PathBuf,
    },
    Compress {
        #[arg(required = true)]
        inputs: Vec<String>,
        #[arg(long)]
        crf: Option<u8>,
        #[arg(long, value_enum)]
        preset: Option<Preset>,
        #[arg(long)]
        output: Option<String>,
    },
    Resize {
        input: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        #[arg(long)]
        output: Option<String>,
    },
    Watermark {
        input: PathBuf,
        #[arg(long)]
        watermark: Option<PathBuf>,
        #[arg(long, value_enum)]
        position: Option<Corner>,
        #[arg(long)]
        output: Option<String>,
    },
    IntroOutro {
        input: PathBuf,
        #[arg(long)]
        intro: Option<PathBuf>,
        #[arg(long)]
        outro: Option<PathBuf>,
        #[arg(long)]
        output: Option<String>,
    },
    ExtractAudio {
        #[arg(required = true)]
        inputs: Vec<String>,
        #[arg(long)]
        output: Option<String>,
    },
    Clips {
        input: PathBuf,
        /// START,END in ffmpeg time syntax. Repeat for several clips.
        #[arg(long = "range")]
        ranges: Vec<ClipRange>,
        #[arg(long, default_value = "clip")]
        prefix: String,
    },
    Subtitles {
        input: PathBuf,
        #[arg(long)]
        subtitles: PathBuf,
        #[arg(long)]
        output: Option<String>,
    },
    /// Render 1080p and 720p versions.
    Youtube {
        #[arg(required = true)]
        inputs: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ThumbnailCommands {
    Video {
        video: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = DEFAULT_FRAME_TIMESTAMP)]
        timestamp: String,
        #[arg(long)]
        output: Option<String>,
        #[command(flatten)]
        finish: FinishArgs,
    },
    Image {
        image: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        output: Option<String>,
        #[command(flatten)]
        finish: FinishArgs,
    },
    Custom {
        #[arg(long)]
        title: String,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long, default_value = "30,30,30", value_parser = parse_rgb)]
        background: Rgb<u8>,
        #[arg(long, default_value = "custom_thumbnail.jpg")]
        output: String,
    },
}

#[derive(Args)]
struct FinishArgs {
    #[arg(long, value_enum, default_value_t = BandPosition::Bottom)]
    band: BandPosition,
    #[arg(long = "font-size", default_value_t = 80.0)]
    font_size: f32,
    #[arg(long, default_value_t = 1.0)]
    brightness: f32,
    #[arg(long, default_value_t = 1.0)]
    contrast: f32,
    #[arg(long, default_value_t = 1.0)]
    saturation: f32,
    #[arg(long)]
    blur: bool,
    #[arg(long)]
    logo: Option<PathBuf>,
    #[arg(long = "logo-position", value_enum, default_value_t = Corner::BottomRight)]
    logo_position: Corner,
    #[arg(long = "logo-scale", default_value_t = DEFAULT_LOGO_SCALE)]
    logo_scale: f32,
}

impl From<FinishArgs> for Finish {
    fn from(args: FinishArgs) -> Self {
        Finish {
            effects: Effects {
                brightness: args.brightness,
                contrast: args.contrast,
                saturation: args.saturation,
                blur: args.blur,
            },
            style: TitleStyle {
                font_size: args.font_size,
                position: args.band,
                ..TitleStyle::default()
            },
            branding: args.logo.map(|logo| Branding {
                logo,
                corner: args.logo_position,
                scale: args.logo_scale,
            }),
        }
    }
}

/// Title, description and the optional extras shared by metadata commands.
#[derive(Args)]
struct ContentArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,
    /// TIME,LABEL chapter marker. Repeatable.
    #[arg(long = "timestamp")]
    timestamps: Vec<String>,
    /// File of "TIME - LABEL" lines, appended after --timestamp entries.
    #[arg(long = "timestamps-file")]
    timestamps_file: Option<PathBuf>,
    /// LABEL,URL resource link. Repeatable.
    #[arg(long = "link")]
    links: Vec<String>,
    #[arg(long)]
    output: Option<String>,
}

impl ContentArgs {
    fn into_request(self) -> Result<MetadataRequest> {
        let mut timestamps = parse_timestamp_pairs(&self.timestamps);
        if let Some(path) = &self.timestamps_file {
            timestamps.extend(parse_timestamps(&read_text(Some(path))?));
        }
        let mut request = MetadataRequest::new(self.title, self.description)
            .with_tags(self.tags)
            .with_timestamps(timestamps)
            .with_links(parse_link_pairs(&self.links));
        if let Some(output) = self.output {
            request = request.with_output_file(output);
        }
        Ok(request)
    }
}

#[derive(Subcommand)]
enum MetadataCommands {
    Generate {
        #[command(flatten)]
        content: ContentArgs,
        #[arg(long)]
        category: Option<String>,
    },
    /// Generate from a named template (tutorial, quick_tip, project_showcase).
    Template {
        template: String,
        #[command(flatten)]
        content: ContentArgs,
    },
    SeoTags {
        topic: String,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Parse "TIME - LABEL" lines from a file, or standard input.
    ParseTimestamps {
        file: Option<PathBuf>,
    },
    Show {
        file: String,
    },
    Update {
        file: String,
        /// JSON object whose top-level keys replace the stored ones.
        #[arg(long)]
        json: Option<String>,
        #[arg(long = "set")]
        set: Vec<String>,
    },
    Batch {
        manifest: PathBuf,
    },
}

#[derive(Subcommand)]
enum SeriesCommands {
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "playlist-id")]
        playlist_id: Option<String>,
    },
    Add {
        name: String,
        #[arg(long)]
        episode: u32,
        #[command(flatten)]
        content: ContentArgs,
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Args)]
struct WorkflowArgs {
    video: PathBuf,
    title: String,
    description: String,
    #[arg(long, num_args = 1..)]
    tags: Vec<String>,
    /// TIME,LABEL chapter markers.
    #[arg(long, num_args = 1..)]
    timestamps: Vec<String>,
    /// LABEL,URL resource links.
    #[arg(long, num_args = 1..)]
    links: Vec<String>,
    #[arg(long = "thumbnail-time", default_value = DEFAULT_FRAME_TIMESTAMP)]
    thumbnail_time: String,
    #[arg(long)]
    print_metrics: bool,
    #[arg(long = "metrics-json")]
    metrics_json: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the built-in defaults as YAML.
    Init {
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    Show,
    Validate,
}
