use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use fontshelf_core::fixtures::{self, FakeFace};
use serde_json::Value;
use tempfile::tempdir;

fn fontshelf(args: &[&str], store: &Path, cache: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fontshelf"))
        .args(args)
        .env("FONTSHELF_STORE_DIR", store)
        .env("FONTSHELF_CACHE_DIR", cache)
        .env_remove("FONTSHELF_PUBLIC_URL")
        .env_remove("FONTSHELF_MAX_UPLOAD_BYTES")
        .env("RUST_LOG", "warn")
        .output()
        .expect("run fontshelf")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn add_stores_font_and_remembers_it() {
    let tmp = tempdir().expect("tempdir");
    let store = tmp.path().join("store");
    let cache = tmp.path().join("cache");
    let font = tmp.path().join("Dunlin.ttf");
    fs::write(
        &font,
        fixtures::single_font(FakeFace::new(Some("Dunlin"), &["liga", "ss11"])),
    )
    .expect("write font");

    let path = font.to_str().expect("utf8 path");
    let output = fontshelf(
        &["add", "--json", "--public-url", "https://cdn.example.com", path],
        &store,
        &cache,
    );
    assert_success(&output);

    let added: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(added["familyName"], "Dunlin");
    assert_eq!(added["format"], "truetype");
    assert_eq!(added["accessUrl"], "https://cdn.example.com/Dunlin.ttf");
    assert_eq!(added["features"][1]["info"]["name"], "Stylistic Set");
    assert!(store.join("Dunlin.ttf").is_file());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Saving to cloud..."), "stderr: {stderr}");
    assert!(stderr.contains("Font ready!"), "stderr: {stderr}");

    let last = fontshelf(&["last", "--json"], &store, &cache);
    assert_success(&last);
    let remembered: Value = serde_json::from_slice(&last.stdout).expect("json output");
    assert_eq!(remembered, added);

    assert_success(&fontshelf(&["forget"], &store, &cache));
    let last = fontshelf(&["last", "--json"], &store, &cache);
    assert_success(&last);
    assert!(last.stdout.is_empty());
}

#[test]
fn add_rejects_non_font_and_keeps_store_empty() {
    let tmp = tempdir().expect("tempdir");
    let store = tmp.path().join("store");
    let cache = tmp.path().join("cache");
    let bogus = tmp.path().join("Bogus.otf");
    fs::write(&bogus, b"this is not a font").expect("write bogus");

    let output = fontshelf(
        &["add", bogus.to_str().expect("utf8 path")],
        &store,
        &cache,
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Upload failed: Invalid font file"), "stderr: {stderr}");
    assert!(stderr.contains("error: Invalid font file"), "stderr: {stderr}");
    assert!(!store.join("Bogus.otf").exists());
    assert!(!cache.join("fontshelf-saved-font.json").exists());
}

#[test]
fn add_rejects_unknown_extension_as_wrong_type() {
    let tmp = tempdir().expect("tempdir");
    let store = tmp.path().join("store");
    let cache = tmp.path().join("cache");
    let font = tmp.path().join("Dunlin.bin");
    fs::write(&font, fixtures::single_font(FakeFace::new(Some("Dunlin"), &[])))
        .expect("write font");

    let output = fontshelf(&["add", font.to_str().expect("utf8 path")], &store, &cache);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: Invalid font file type"), "stderr: {stderr}");
}

#[test]
fn oversized_files_are_rejected_by_size() {
    let tmp = tempdir().expect("tempdir");
    let store = tmp.path().join("store");
    let cache = tmp.path().join("cache");
    let font = tmp.path().join("Dunlin.ttf");
    fs::write(
        &font,
        fixtures::single_font(FakeFace::new(Some("Dunlin"), &["liga", "kern"])),
    )
    .expect("write font");
    let path = font.to_str().expect("utf8 path");

    for command in ["add", "inspect"] {
        let output = fontshelf(&[command, "--max-upload-bytes", "64", path], &store, &cache);
        assert!(!output.status.success(), "{command} accepted an oversized file");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("error: File size should not exceed 64 bytes"),
            "{command} stderr: {stderr}"
        );
    }
    assert!(!store.join("Dunlin.ttf").exists());
}

#[test]
fn add_accepts_woff_upload() {
    let tmp = tempdir().expect("tempdir");
    let store = tmp.path().join("store");
    let cache = tmp.path().join("cache");
    let font = tmp.path().join("Dunlin.woff");
    let sfnt = fixtures::single_font(FakeFace::new(Some("Dunlin"), &["liga", "kern"]));
    fs::write(&font, fixtures::woff(&sfnt, true)).expect("write font");

    let output = fontshelf(
        &["add", "--json", font.to_str().expect("utf8 path")],
        &store,
        &cache,
    );
    assert_success(&output);

    let added: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(added["familyName"], "Dunlin");
    assert_eq!(added["format"], "woff");
    assert_eq!(added["accessUrl"], "/fonts/Dunlin.woff");
    assert!(store.join("Dunlin.woff").is_file());
}

#[test]
fn inspect_reports_collection_without_storing() {
    let tmp = tempdir().expect("tempdir");
    let store = tmp.path().join("store");
    let cache = tmp.path().join("cache");
    let font = tmp.path().join("Shorebirds.ttc");
    fs::write(
        &font,
        fixtures::collection(&[
            FakeFace::new(None, &["salt"]),
            FakeFace::new(Some("Turnstone"), &["onum", "pnum"]),
        ]),
    )
    .expect("write font");

    let output = fontshelf(
        &["inspect", "--json", font.to_str().expect("utf8 path")],
        &store,
        &cache,
    );
    assert_success(&output);

    let report: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(report["familyName"], "Turnstone");
    assert_eq!(report["format"], "unknown");
    assert_eq!(report["features"].as_array().map(Vec::len), Some(2));
    assert!(!store.exists());
}

#[test]
fn inspect_ndjson_emits_one_feature_per_line() {
    let tmp = tempdir().expect("tempdir");
    let font = tmp.path().join("Knot.otf");
    fs::write(
        &font,
        fixtures::single_font(FakeFace::new(Some("Knot"), &["kern", "mark", "mkmk"])),
    )
    .expect("write font");

    let output = fontshelf(
        &["inspect", "--ndjson", font.to_str().expect("utf8 path")],
        tmp.path(),
        tmp.path(),
    );
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let tags: Vec<String> = stdout
        .lines()
        .map(|line| {
            let value: Value = serde_json::from_str(line).expect("json line");
            value["tag"].as_str().expect("tag").to_string()
        })
        .collect();
    assert_eq!(tags, vec!["kern", "mark", "mkmk"]);
}
