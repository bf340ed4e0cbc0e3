use super::*;
use fontshelf_core::features::enrich;

fn sample_font() -> FontMetadata {
    FontMetadata {
        family_name: "Avocet".to_string(),
        format: FontFormat::TrueType,
        features: enrich(["kern", "ss04", "zzzz"]),
        access_url: "/fonts/Avocet.ttf".to_string(),
        file_name: "Avocet.ttf".to_string(),
    }
}

#[test]
fn parses_add_args() {
    let cli = Cli::try_parse_from([
        "fontshelf",
        "add",
        "--name",
        "Renamed.otf",
        "--store-dir",
        "/srv/fonts",
        "--public-url",
        "https://cdn.example.com",
        "--max-upload-bytes",
        "1024",
        "--cache-dir",
        "/tmp/fs-cache",
        "--json",
        "-q",
        "Avocet.otf",
    ])
    .expect("parse cli");

    let Command::Add(args) = cli.command else {
        panic!("expected add");
    };
    assert_eq!(args.path, PathBuf::from("Avocet.otf"));
    assert_eq!(args.name.as_deref(), Some("Renamed.otf"));
    assert!(args.output.json);
    assert!(args.quiet);
    assert!(!args.no_cache);
    assert_eq!(args.cache.cache_dir, Some(PathBuf::from("/tmp/fs-cache")));

    let config = args.store.config();
    assert_eq!(config.max_bytes, 1024);
    assert_eq!(config.access, AccessUrl::public("https://cdn.example.com"));
}

#[test]
fn verbose_flag_is_global() {
    let cli = Cli::try_parse_from(["fontshelf", "last", "-vv"]).expect("parse cli");
    assert_eq!(cli.verbose, 2);
}

#[test]
fn inspect_json_and_ndjson_conflict() {
    let parse = Cli::try_parse_from(["fontshelf", "inspect", "--json", "--ndjson", "A.ttf"]);
    assert!(parse.is_err());
}

#[test]
fn content_type_follows_extension() {
    assert_eq!(guess_content_type("A.ttf"), "font/ttf");
    assert_eq!(guess_content_type("A.OTF"), "font/otf");
    assert_eq!(guess_content_type("A.woff"), "font/woff");
    assert_eq!(guess_content_type("A.woff2"), "font/woff2");
    assert_eq!(guess_content_type("Family.ttc"), "application/font-sfnt");
    assert_eq!(guess_content_type("Legacy.eot"), "application/vnd.ms-fontobject");
    assert_eq!(guess_content_type("notes.txt"), "application/octet-stream");
    assert_eq!(guess_content_type("README"), "application/octet-stream");
}

#[test]
fn submitted_name_prefers_explicit_name() {
    let path = Path::new("/fonts/Avocet-Regular.ttf");
    assert_eq!(
        submitted_name(path, None).expect("name"),
        "Avocet-Regular.ttf"
    );
    assert_eq!(
        submitted_name(path, Some("Avocet.ttf")).expect("name"),
        "Avocet.ttf"
    );
    assert!(submitted_name(Path::new("/"), None).is_err());
}

#[test]
fn explicit_cache_dir_wins() {
    let dir = resolve_cache_dir(Some(Path::new("/tmp/elsewhere"))).expect("dir");
    assert_eq!(dir, PathBuf::from("/tmp/elsewhere"));
}

#[test]
fn plain_output_lists_features_with_names() {
    let mut buf = Vec::new();
    write_font(&sample_font(), &mut buf, false).expect("write");

    let text = String::from_utf8(buf).expect("utf8");
    assert_eq!(
        text,
        "Avocet  truetype  /fonts/Avocet.ttf\n  kern  Kerning\n  ss04  Stylistic Set\n  zzzz\n"
    );
}

#[test]
fn colored_output_wraps_tags() {
    let mut buf = Vec::new();
    write_features(&enrich(["liga"]), &mut buf, true).expect("write");

    let text = String::from_utf8(buf).expect("utf8");
    assert!(text.contains("\u{1b}[32mliga\u{1b}[0m"));
    assert!(text.ends_with("Standard Ligatures\n"));
}

#[test]
fn inspect_report_uses_camel_case() {
    let font = sample_font();
    let report = InspectReport {
        family_name: font.family_name,
        format: font.format,
        file_name: font.file_name,
        features: font.features,
    };
    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["familyName"], "Avocet");
    assert_eq!(json["fileName"], "Avocet.ttf");
    assert_eq!(json["format"], "truetype");
    assert_eq!(json["features"][1]["tag"], "ss04");
}

#[test]
fn capped_read_stops_one_byte_past_the_limit() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("Large.ttf");
    std::fs::write(&path, vec![7u8; 4096]).expect("write");

    assert_eq!(read_capped(&path, 100).expect("read").len(), 101);
    assert_eq!(read_capped(&path, 4096).expect("read").len(), 4096);
    assert!(read_capped(&tmp.path().join("missing.ttf"), 100).is_err());
}
