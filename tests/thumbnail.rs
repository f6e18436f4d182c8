mod common;

use std::fs;
use std::sync::Arc;

use common::RecordingRunner;
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgb, Rgba};
use tempfile::tempdir;
use vidforge::placement::Corner;
use vidforge::thumbnail::{BandPosition, Finish, ThumbnailGenerator, TitleStyle};
use vidforge::video::{MediaError, Tool};

fn solid(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(ImageBuffer::from_pixel(width, height, Rgba(color)))
}

#[test]
fn frame_is_extracted_through_ffmpeg_and_cleaned_up() {
    let temp = tempdir().unwrap();
    let video = temp.path().join("lesson.mp4");
    fs::write(&video, b"video").unwrap();
    let thumbs = temp.path().join("thumbs");
    let runner = Arc::new(RecordingRunner::new());
    let generator = ThumbnailGenerator::new(&thumbs, runner.clone())
        .unwrap()
        .with_font(None);

    let output = generator
        .create_from_video(&video, "Async Rust", "00:00:10", None, &Finish::default())
        .unwrap();

    assert_eq!(output, thumbs.join("lesson_thumbnail.jpg"));
    let saved = image::open(&output).unwrap();
    assert_eq!(saved.dimensions(), (1280, 720));

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tool, Tool::Ffmpeg);
    let args = calls[0].arg_strings();
    assert_eq!(args[..2], ["-ss", "00:00:10"]);
    assert_eq!(args[4..9], ["-vframes", "1", "-q:v", "2", "-y"]);
    assert!(args[9].ends_with(".jpg"));

    let leftovers: Vec<_> = fs::read_dir(&thumbs)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name != "lesson_thumbnail.jpg")
        .collect();
    assert!(leftovers.is_empty(), "temp frame left behind: {leftovers:?}");
}

#[test]
fn missing_video_is_rejected() {
    let temp = tempdir().unwrap();
    let runner = Arc::new(RecordingRunner::new());
    let generator = ThumbnailGenerator::new(temp.path(), runner.clone()).unwrap();

    let err = generator
        .extract_frame(&temp.path().join("gone.mp4"), "00:00:05")
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MediaError>(),
        Some(MediaError::InputNotFound(_))
    ));
    assert!(runner.calls().is_empty());
}

#[test]
fn image_thumbnail_is_resized_to_canvas() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("screen.png");
    solid(300, 200, [10, 200, 30, 255]).save(&source).unwrap();
    let generator = ThumbnailGenerator::new(temp.path().join("t"), Arc::new(RecordingRunner::new()))
        .unwrap()
        .with_size(640, 360)
        .with_font(None);

    let output = generator
        .create_from_image(&source, "Title", Some("cover.png"), &Finish::default())
        .unwrap();

    assert!(output.ends_with("cover.png"));
    let saved = image::open(&output).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (640, 360));
    // Top rows sit above the bottom band and keep the source colour.
    assert_eq!(saved.get_pixel(5, 5).0, [10, 200, 30, 255]);
    // Band is a translucent black blend over the source.
    let band = saved.get_pixel(5, 355);
    assert!(band[1] < 200);
}

#[test]
fn title_band_position_follows_style() {
    let temp = tempdir().unwrap();
    let generator = ThumbnailGenerator::new(temp.path(), Arc::new(RecordingRunner::new()))
        .unwrap()
        .with_font(None);
    let base = solid(400, 400, [255, 255, 255, 255]);

    let style = TitleStyle {
        font_size: 20.0,
        position: BandPosition::Top,
        ..TitleStyle::default()
    };
    let out = generator.add_title_overlay(&base, "x", &style).to_rgba8();
    // Band height is font size plus padding on both sides: 20 + 80.
    assert!(out.get_pixel(200, 10)[0] < 255);
    assert!(out.get_pixel(200, 99)[0] < 255);
    assert_eq!(out.get_pixel(200, 100)[0], 255);
    assert_eq!(out.get_pixel(200, 399)[0], 255);
}

#[test]
fn missing_logo_leaves_image_unchanged() {
    let temp = tempdir().unwrap();
    let generator = ThumbnailGenerator::new(temp.path(), Arc::new(RecordingRunner::new())).unwrap();
    let base = solid(200, 100, [1, 2, 3, 255]);

    let out = generator
        .add_branding(&base, &temp.path().join("logo.png"), Corner::BottomRight, 0.15)
        .unwrap();
    assert_eq!(out.to_rgba8(), base.to_rgba8());
}

#[test]
fn logo_is_pasted_into_requested_corner() {
    let temp = tempdir().unwrap();
    let logo_path = temp.path().join("logo.png");
    solid(50, 50, [255, 0, 0, 255]).save(&logo_path).unwrap();
    let generator = ThumbnailGenerator::new(temp.path(), Arc::new(RecordingRunner::new())).unwrap();
    let base = solid(400, 200, [0, 0, 255, 255]);

    let out = generator
        .add_branding(&base, &logo_path, Corner::TopLeft, 0.25)
        .unwrap()
        .to_rgba8();

    // 25% of 400 is a 100x100 logo, 20px from the edges.
    assert_eq!(out.get_pixel(25, 25).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(119, 119).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(10, 10).0, [0, 0, 255, 255]);
    assert_eq!(out.get_pixel(300, 150).0, [0, 0, 255, 255]);
}

#[test]
fn custom_thumbnail_uses_background() {
    let temp = tempdir().unwrap();
    let generator = ThumbnailGenerator::new(temp.path(), Arc::new(RecordingRunner::new()))
        .unwrap()
        .with_size(320, 180)
        .with_font(None);

    let output = generator
        .custom(Rgb([30, 30, 30]), "Hello", Some("World"), "custom.png")
        .unwrap();

    let saved = image::open(&output).unwrap().to_rgb8();
    assert_eq!(saved.dimensions(), (320, 180));
    assert!(saved.pixels().all(|p| p.0 == [30, 30, 30]));
}
