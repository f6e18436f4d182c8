use std::fs;

use serde_json::{Map, Value, json};
use tempfile::tempdir;
use vidforge::metadata::{
    LinkEntry, MetadataRecord, MetadataRequest, MetadataStore, Template, TimestampEntry,
    build_description, generate_seo_tags, load_manifest, parse_timestamps,
};

fn sample_request() -> MetadataRequest {
    MetadataRequest::new("Build a REST API in Rust!", "We build an API from scratch.")
        .with_tags(["rust", "api", "rust"])
        .with_timestamps(vec![
            TimestampEntry::new("0:00", "Intro"),
            TimestampEntry::new("3:15", "Routing"),
        ])
        .with_links(vec![LinkEntry::new("Code", "https://example.com/code")])
}

#[test]
fn generated_pair_round_trips_through_json_and_yaml() {
    let temp = tempdir().unwrap();
    let store = MetadataStore::new(temp.path().join("metadata"));

    let saved = store.generate(&sample_request()).unwrap();

    assert!(saved.files.json.ends_with("Build_a_REST_API_in_Rust_metadata.json"));
    assert!(saved.files.yaml.ends_with("Build_a_REST_API_in_Rust_metadata.yaml"));
    assert_eq!(saved.record.tags, vec!["rust", "api"]);

    let expected = serde_json::to_value(&saved.record).unwrap();
    let from_json = store.load("Build_a_REST_API_in_Rust_metadata.json").unwrap();
    assert_eq!(Value::Object(from_json), expected);
    let from_yaml = store.load("Build_a_REST_API_in_Rust_metadata.yaml").unwrap();
    assert_eq!(Value::Object(from_yaml), expected);
}

#[test]
fn json_file_uses_upload_field_names() {
    let temp = tempdir().unwrap();
    let store = MetadataStore::new(temp.path());
    let saved = store
        .generate(&MetadataRequest::new("Plain", "Body").with_output_file("plain.json"))
        .unwrap();

    let raw: Value = serde_json::from_str(&fs::read_to_string(&saved.files.json).unwrap()).unwrap();
    assert_eq!(raw["privacyStatus"], "public");
    assert_eq!(raw["license"], "youtube");
    assert_eq!(raw["madeForKids"], false);
    assert_eq!(raw["publicStatsViewable"], true);
    assert_eq!(raw["publishAt"], Value::Null);
    assert_eq!(raw["defaultAudioLanguage"], "en");
    assert!(raw["recordingDate"].as_str().unwrap().len() == 10);
}

#[test]
fn description_assembly_is_deterministic() {
    let request = sample_request();
    let first = build_description(&request.description, &request.timestamps, &request.links);
    let second = build_description(&request.description, &request.timestamps, &request.links);
    assert_eq!(first, second);
    assert!(first.starts_with("We build an API from scratch.\n\n📌 TIMESTAMPS\n"));
}

#[test]
fn timestamps_parse_drops_malformed_lines() {
    let parsed = parse_timestamps("0:00 - Intro\n2:30 - Setup\nnotavalidline\n");
    assert_eq!(
        parsed,
        vec![
            TimestampEntry::new("0:00", "Intro"),
            TimestampEntry::new("2:30", "Setup"),
        ]
    );
}

#[test]
fn seo_tags_follow_topic_then_generic_words() {
    let tags = generate_seo_tags(&["python".to_string()], "Learn Async Programming");
    assert_eq!(
        tags,
        vec![
            "python",
            "learn",
            "async",
            "programming",
            "tutorial",
            "how to",
            "beginner",
            "guide",
            "coding",
            "development",
            "software",
        ]
    );
}

#[test]
fn update_replaces_top_level_keys_only() {
    let temp = tempdir().unwrap();
    let store = MetadataStore::new(temp.path());
    let original = store
        .generate(&sample_request().with_output_file("api.json"))
        .unwrap();

    let mut partial = Map::new();
    partial.insert("tags".to_string(), json!(["new"]));
    let updated = store.update("api.json", partial).unwrap();

    assert_eq!(updated.document["tags"], json!(["new"]));
    let expected = serde_json::to_value(MetadataRecord {
        tags: vec!["new".to_string()],
        ..original.record.clone()
    })
    .unwrap();
    assert_eq!(Value::Object(updated.document), expected);
    assert_eq!(Value::Object(store.load("api.yaml").unwrap()), expected);
}

#[test]
fn update_keeps_unknown_keys() {
    let temp = tempdir().unwrap();
    let store = MetadataStore::new(temp.path());
    store
        .generate(&MetadataRequest::new("T", "D").with_output_file("t.json"))
        .unwrap();

    let mut partial = Map::new();
    partial.insert("thumbnail".to_string(), json!("thumbs/t.jpg"));
    partial.insert("privacyStatus".to_string(), json!("unlisted"));
    store.update("t.json", partial).unwrap();

    let raw: Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("t.json")).unwrap()).unwrap();
    assert_eq!(raw["thumbnail"], "thumbs/t.jpg");
    assert_eq!(raw["privacyStatus"], "unlisted");
    assert_eq!(raw["title"], "T");
}

#[test]
fn update_of_missing_file_fails() {
    let temp = tempdir().unwrap();
    let store = MetadataStore::new(temp.path());
    assert!(store.update("missing.json", Map::new()).is_err());
}

#[test]
fn template_defaults_come_first() {
    let temp = tempdir().unwrap();
    let store = MetadataStore::new(temp.path());
    let saved = store
        .create_from_template(
            Template::ProjectShowcase,
            &MetadataRequest::new("My App", "Tour").with_tags(["demo", "rust"]),
        )
        .unwrap();

    assert_eq!(saved.record.category, "Science & Technology");
    assert_eq!(
        saved.record.tags,
        vec!["project", "showcase", "demo", "coding", "rust"]
    );
    assert!(saved.record.description.contains("Live Demo: https://demo.example.com"));
}

#[test]
fn unknown_template_name_falls_back_to_tutorial() {
    assert_eq!(Template::from_name("tutorail"), Template::Tutorial);
    assert_eq!(Template::from_name("quick_tip"), Template::QuickTip);
}

#[test]
fn batch_manifest_generates_every_entry() {
    let temp = tempdir().unwrap();
    let manifest = temp.path().join("batch.yaml");
    fs::write(
        &manifest,
        "- title: First Video\n  description: One\n  tags: [a]\n\
         - title: Second Video\n  description: Two\n  output_file: second.json\n  \
         timestamps:\n    - { time: '0:00', label: Start }\n",
    )
    .unwrap();

    let requests = load_manifest(&manifest).unwrap();
    let store = MetadataStore::new(temp.path().join("out"));
    let saved = store.generate_batch(&requests).unwrap();

    assert_eq!(saved.len(), 2);
    assert!(saved[0].files.json.ends_with("First_Video_metadata.json"));
    assert!(saved[1].files.json.ends_with("second.json"));
    assert!(saved[1].record.description.contains("0:00 - Start"));
}

#[test]
fn malformed_manifest_entry_is_rejected_before_writing() {
    let temp = tempdir().unwrap();
    let manifest = temp.path().join("batch.json");
    fs::write(
        &manifest,
        r#"[{"title": "Ok", "description": "x", "timestamps": [{"time": "0:00"}]}]"#,
    )
    .unwrap();

    assert!(load_manifest(&manifest).is_err());
}

#[test]
fn hand_edited_json_loads_and_updates_as_is() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("hand.json"),
        r#"{"title": "T", "tags": ["a", 1], "privacyStatus": "Public", "publishAt": "2024-06-01T10:00:00"}"#,
    )
    .unwrap();
    let store = MetadataStore::new(temp.path());

    let loaded = store.load("hand.json").unwrap();
    assert_eq!(loaded["tags"], json!(["a", 1]));
    assert_eq!(loaded["privacyStatus"], "Public");
    assert_eq!(loaded["publishAt"], "2024-06-01T10:00:00");
    assert!(!loaded.contains_key("category"));

    let mut partial = Map::new();
    partial.insert("publishAt".to_string(), json!("2024-07-01T09:30:00"));
    let updated = store.update("hand.json", partial).unwrap();

    assert_eq!(updated.document["publishAt"], "2024-07-01T09:30:00");
    assert_eq!(updated.document["tags"], json!(["a", 1]));
    let reread = store.load("hand.yaml").unwrap();
    assert_eq!(reread, updated.document);
}

#[test]
fn yaml_document_with_unmodelled_values_is_kept() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("notes.yaml"),
        "title: Notes\nprivacyStatus: Friends only\nchapters:\n  - { at: 12, name: Start }\nrating: 4.5\n",
    )
    .unwrap();
    let store = MetadataStore::new(temp.path());

    let loaded = store.load("notes.yaml").unwrap();

    assert_eq!(loaded["privacyStatus"], "Friends only");
    assert_eq!(loaded["chapters"][0]["at"], 12);
    assert_eq!(loaded["rating"], 4.5);
}

#[test]
fn update_accepts_values_of_any_type() {
    let temp = tempdir().unwrap();
    let store = MetadataStore::new(temp.path());
    store
        .generate(&MetadataRequest::new("Typed", "D").with_output_file("typed.json"))
        .unwrap();

    let mut partial = Map::new();
    partial.insert("tags".to_string(), json!({"primary": "rust"}));
    partial.insert("madeForKids".to_string(), json!("no"));
    let updated = store.update("typed.json", partial).unwrap();

    assert_eq!(updated.document["tags"]["primary"], "rust");
    assert_eq!(updated.document["madeForKids"], "no");
    let raw: Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("typed.json")).unwrap()).unwrap();
    assert_eq!(raw["madeForKids"], "no");
    assert_eq!(raw["title"], "Typed");
}
