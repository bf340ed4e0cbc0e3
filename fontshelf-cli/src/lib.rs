//! fontshelf CLI (made by FontLab https://www.fontlab.com/)

pub mod frames;
pub mod report;
pub mod server;

use std::env;
use std::fs::File;
use std::future::Future;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use serde::Serialize;
use tokio::task;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use fontshelf_core::cache::{FileKv, FontCache};
use fontshelf_core::features::FeatureTag;
use fontshelf_core::format::FontFormat;
use fontshelf_core::introspect::{FontIntrospector, FontationsIntrospector};
use fontshelf_core::output::{write_json_pretty, write_ndjson};
use fontshelf_core::progress::{
    estimate_duration, Clock, ProgressAnimator, SystemClock, DEFAULT_MAX_PROGRESS,
};
use fontshelf_core::storage::{FsStore, MemoryStore, ObjectStore};
use fontshelf_core::upload::{
    AccessUrl, FontMetadata, UploadRequest, Uploader, UploaderConfig, MAX_UPLOAD_BYTES,
};

use crate::frames::{lock, FRAME_INTERVAL};
use crate::report::Reporter;

/// CLI entrypoint for fontshelf.
#[derive(Debug, Parser)]
#[command(
    name = "fontshelf",
    about = "Font upload and OpenType feature extraction (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Accept font uploads over HTTP
    Serve(ServeArgs),
    /// Validate, inspect and store a font file
    Add(AddArgs),
    /// Report a font's family, format and features without storing it
    Inspect(InspectArgs),
    /// Show the most recently added font
    Last(LastArgs),
    /// Forget the most recently added font
    Forget(CacheArgs),
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long = "bind", env = "FONTSHELF_BIND", default_value = "127.0.0.1:8765")]
    bind: String,

    #[command(flatten)]
    store: StoreArgs,
}

#[derive(Debug, Args)]
struct StoreArgs {
    /// Directory holding stored fonts
    #[arg(
        long = "store-dir",
        env = "FONTSHELF_STORE_DIR",
        default_value = "fontshelf-store",
        value_hint = ValueHint::DirPath
    )]
    store_dir: PathBuf,

    /// Base URL that stored file names are joined onto
    #[arg(long = "public-url", env = "FONTSHELF_PUBLIC_URL", default_value = "/fonts")]
    public_url: String,

    /// Largest accepted font, in bytes
    #[arg(
        long = "max-upload-bytes",
        env = "FONTSHELF_MAX_UPLOAD_BYTES",
        default_value_t = MAX_UPLOAD_BYTES
    )]
    max_upload_bytes: usize,
}

impl StoreArgs {
    fn config(&self) -> UploaderConfig {
        UploaderConfig::default()
            .with_max_bytes(self.max_upload_bytes)
            .with_access(AccessUrl::public(self.public_url.clone()))
    }

    fn open(&self) -> Result<FsStore> {
        FsStore::open(&self.store_dir)
            .with_context(|| format!("opening font store at {}", self.store_dir.display()))
    }
}

#[derive(Debug, Args)]
struct CacheArgs {
    /// Directory for the last-font cache (defaults to $XDG_CACHE_HOME/fontshelf)
    #[arg(long = "cache-dir", env = "FONTSHELF_CACHE_DIR", value_hint = ValueHint::DirPath)]
    cache_dir: Option<PathBuf>,
}

impl CacheArgs {
    fn open(&self) -> Result<FontCache<FileKv>> {
        Ok(FontCache::new(FileKv::new(resolve_cache_dir(
            self.cache_dir.as_deref(),
        )?)))
    }
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Font file to add
    #[arg(value_hint = ValueHint::FilePath)]
    path: PathBuf,

    /// Store under this file name instead of the path's own
    #[arg(long = "name")]
    name: Option<String>,

    /// Declared MIME type (guessed from the extension when omitted)
    #[arg(long = "content-type")]
    content_type: Option<String>,

    /// Do not remember this font as the last one added
    #[arg(long = "no-cache", action = ArgAction::SetTrue)]
    no_cache: bool,

    /// Hide the progress display
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    store: StoreArgs,

    #[command(flatten)]
    cache: CacheArgs,
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Font file to inspect
    #[arg(value_hint = ValueHint::FilePath)]
    path: PathBuf,

    /// Declared MIME type (guessed from the extension when omitted)
    #[arg(long = "content-type")]
    content_type: Option<String>,

    /// Largest accepted font, in bytes
    #[arg(
        long = "max-upload-bytes",
        env = "FONTSHELF_MAX_UPLOAD_BYTES",
        default_value_t = MAX_UPLOAD_BYTES
    )]
    max_upload_bytes: usize,

    /// Emit features as newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue, conflicts_with = "json")]
    ndjson: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct LastArgs {
    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    cache: CacheArgs,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Emit JSON instead of text
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

impl OutputArgs {
    fn use_color(&self, stream: &impl IsTerminal) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => stream.is_terminal(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// What `inspect` reports: everything `add` would, minus the access URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectReport {
    family_name: String,
    format: FontFormat,
    file_name: String,
    features: Vec<FeatureTag>,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Serve(args) => run_serve(args),
        Command::Add(args) => run_add(args),
        Command::Inspect(args) => run_inspect(args),
        Command::Last(args) => run_last(args),
        Command::Forget(args) => run_forget(args),
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn ObjectStore> = Arc::new(args.store.open()?);
    let introspector: Arc<dyn FontIntrospector> = Arc::new(FontationsIntrospector);
    let state = server::AppState::new(Uploader::new(introspector, store, args.store.config()));

    runtime()?.block_on(server::serve(&args.bind, state))
}

fn run_add(args: AddArgs) -> Result<()> {
    let font = runtime()?.block_on(add(&args))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.output.json {
        write_json_pretty(&font, &mut handle)?;
    } else {
        let color = args.output.use_color(&handle);
        write_font(&font, &mut handle, color)?;
    }
    Ok(())
}

type SharedReporter = Arc<Mutex<Reporter<io::Stderr>>>;

/// Walk one file through the upload stages, animating the slow ones.
async fn add(args: &AddArgs) -> Result<FontMetadata> {
    let uploader = Arc::new(Uploader::new(
        FontationsIntrospector,
        args.store.open()?,
        args.store.config(),
    ));
    let request_name = submitted_name(&args.path, args.name.as_deref())?;
    let content_type = args
        .content_type
        .clone()
        .unwrap_or_else(|| guess_content_type(&request_name).to_string());

    let stderr = io::stderr();
    let live = stderr.is_terminal();
    let reporter: SharedReporter = Arc::new(Mutex::new(Reporter::new(stderr, args.quiet, live)));
    let clock = SystemClock::new();

    let size = tokio::fs::metadata(&args.path)
        .await
        .with_context(|| format!("reading {}", args.path.display()))?
        .len();
    lock(&reporter).apply(|s| s.start_upload(size, clock.now()))?;
    let path = args.path.clone();
    let max_bytes = uploader.config().max_bytes;
    let bytes = animated(&reporter, clock, size, async move {
        task::spawn_blocking(move || read_capped(&path, max_bytes))
            .await
            .context("joining read task")?
    })
    .await;
    let bytes = fail_on_err(&reporter, bytes)?;

    lock(&reporter).apply(|s| s.start_processing())?;
    let request = UploadRequest::new(bytes, content_type, request_name);
    let worker = Arc::clone(&uploader);
    let prepared = task::spawn_blocking(move || worker.prepare(request))
        .await
        .context("joining parse task")?
        .map_err(anyhow::Error::from);
    let prepared = fail_on_err(&reporter, prepared)?;

    lock(&reporter).apply(|s| s.start_saving(size, clock.now()))?;
    let worker = Arc::clone(&uploader);
    let stored = animated(&reporter, clock, size, async move {
        task::spawn_blocking(move || worker.persist(prepared))
            .await
            .context("joining storage task")?
            .map_err(anyhow::Error::from)
    })
    .await;
    let font = fail_on_err(&reporter, stored)?;

    lock(&reporter).apply(|s| s.start_loading_font())?;
    if !args.no_cache {
        remember(&args.cache, &font);
    }
    lock(&reporter).apply(|s| s.complete())?;
    Ok(font)
}

/// Store `font` as the last one added. A cache that cannot be written is not
/// worth failing an upload that already succeeded.
fn remember(cache: &CacheArgs, font: &FontMetadata) {
    let saved = cache
        .open()
        .and_then(|cache| cache.set(Some(font)).context("caching font"));
    if let Err(err) = saved {
        warn!(error = %err, "could not remember font");
    }
}

/// Run `work` with a projected progress bar; 100 is only shown on success.
async fn animated<T, E, F>(
    reporter: &SharedReporter,
    clock: SystemClock,
    size: u64,
    work: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let sink = Arc::clone(reporter);
    let animator = Arc::new(Mutex::new(ProgressAnimator::new(
        clock,
        estimate_duration(size),
        DEFAULT_MAX_PROGRESS,
        move |value| lock(&sink).progress(value),
    )));
    let driver = frames::spawn(Arc::clone(&animator), FRAME_INTERVAL);

    let outcome = work.await;
    match &outcome {
        Ok(_) => lock(&animator).complete(),
        Err(_) => lock(&animator).cancel(),
    }
    if let Err(err) = driver.await {
        warn!(error = %err, "progress driver stopped abnormally");
    }
    outcome
}

/// Read at most `max_bytes + 1` bytes of `path`. Anything past the limit
/// never reaches memory; the short read is still over the limit, so
/// validation rejects it with the usual size message.
pub(crate) fn read_capped(path: &Path, max_bytes: usize) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("reading {}", path.display()))?;
    let mut bytes = Vec::new();
    file.take(max_bytes as u64 + 1)
        .read_to_end(&mut bytes)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(bytes)
}

fn fail_on_err<T>(reporter: &SharedReporter, outcome: Result<T>) -> Result<T> {
    outcome.inspect_err(|err| lock(reporter).fail(err.to_string()))
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let uploader = Uploader::new(
        FontationsIntrospector,
        MemoryStore::new(),
        UploaderConfig::default().with_max_bytes(args.max_upload_bytes),
    );
    let file_name = submitted_name(&args.path, None)?;
    let content_type = args
        .content_type
        .clone()
        .unwrap_or_else(|| guess_content_type(&file_name).to_string());
    let bytes = read_capped(&args.path, args.max_upload_bytes)?;

    let prepared = uploader.prepare(UploadRequest::new(bytes, content_type, file_name))?;
    let report = InspectReport {
        family_name: prepared.family_name,
        format: prepared.format,
        file_name: prepared.request.file_name,
        features: prepared.features,
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.ndjson {
        write_ndjson(&report.features, &mut handle)?;
    } else if args.output.json {
        write_json_pretty(&report, &mut handle)?;
    } else {
        let color = args.output.use_color(&handle);
        write_heading(&report.family_name, report.format, None, &mut handle, color)?;
        write_features(&report.features, &mut handle, color)?;
    }
    Ok(())
}

fn run_last(args: LastArgs) -> Result<()> {
    let Some(font) = args.cache.open()?.load() else {
        eprintln!("no font has been added yet");
        return Ok(());
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.output.json {
        write_json_pretty(&font, &mut handle)?;
    } else {
        let color = args.output.use_color(&handle);
        write_font(&font, &mut handle, color)?;
    }
    Ok(())
}

fn run_forget(args: CacheArgs) -> Result<()> {
    args.open()?.clear().context("clearing cached font")
}

/// The storage key for a submission: an explicit name or the path's file name.
fn submitted_name(path: &Path, explicit: Option<&str>) -> Result<String> {
    if let Some(name) = explicit {
        return Ok(name.to_string());
    }
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("{} has no usable file name", path.display()))
}

/// MIME type a browser would most likely send for this file name.
fn guess_content_type(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttc") | Some("otc") => "application/font-sfnt",
        Some("eot") => "application/vnd.ms-fontobject",
        _ => "application/octet-stream",
    }
}

fn resolve_cache_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(xdg) = env::var_os("XDG_CACHE_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join("fontshelf"));
    }
    if let Some(home) = env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".cache").join("fontshelf"));
    }
    Err(anyhow!(
        "no cache directory found; set FONTSHELF_CACHE_DIR or pass --cache-dir"
    ))
}

fn write_font(font: &FontMetadata, mut w: impl Write, color: bool) -> Result<()> {
    write_heading(
        &font.family_name,
        font.format,
        Some(&font.access_url),
        &mut w,
        color,
    )?;
    write_features(&font.features, &mut w, color)
}

fn write_heading(
    family: &str,
    format: FontFormat,
    url: Option<&str>,
    mut w: impl Write,
    color: bool,
) -> Result<()> {
    let family = apply_color(family, color, AnsiColor::Yellow);
    match url {
        Some(url) => {
            let url = apply_color(url, color, AnsiColor::Cyan);
            writeln!(w, "{family}  {format}  {url}")?;
        }
        None => writeln!(w, "{family}  {format}")?,
    }
    Ok(())
}

fn write_features(features: &[FeatureTag], mut w: impl Write, color: bool) -> Result<()> {
    for feature in features {
        let tag = apply_color(&feature.tag, color, AnsiColor::Green);
        match &feature.info {
            Some(info) => writeln!(w, "  {tag}  {}", info.name)?,
            None => writeln!(w, "  {tag}")?,
        }
    }
    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}

#[cfg(test)]
mod tests;
