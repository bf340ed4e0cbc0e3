//! Upload orchestration (made by FontLab https://www.fontlab.com/)
//!
//! The path a submitted font takes from raw bytes to [`FontMetadata`]:
//!
//! 1. **validate** the submission (file present, allowed type, size cap);
//! 2. **parse** it through a [`FontIntrospector`], picking one face when the
//!    bytes hold a collection;
//! 3. **enrich** every reported feature tag from the catalog;
//! 4. **classify** the container format from the file name;
//! 5. **persist** the bytes to an [`ObjectStore`] in a single put;
//! 6. **derive** an access URL, public or signed.
//!
//! Steps 1-4 make up [`Uploader::prepare`] and never touch storage, so a bad
//! file is turned away without side effects. Steps 5-6 are
//! [`Uploader::persist`]. [`Uploader::handle`] runs both.
//!
//! An [`Uploader`] keeps no per-request state; share one behind an `Arc`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{ParseError, UploadError};
use crate::features::{enrich, FeatureTag};
use crate::format::{classify, FontFormat};
use crate::introspect::{FontIntrospector, ParsedFont};
use crate::storage::{is_plain_key, ObjectStore, Visibility};

/// Largest accepted upload: 5 MiB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// MIME types a submission may declare.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "font/ttf",
    "font/otf",
    "font/woff",
    "font/woff2",
    "application/font-sfnt",
    "application/vnd.ms-fontobject",
    "application/font-woff",
    "application/font-woff2",
];

/// Validity window for signed read URLs unless configured otherwise.
pub const DEFAULT_SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

/// Family name reported for a single font that does not declare one.
pub const UNKNOWN_FAMILY: &str = "Unknown";

/// Form field that carries the font file.
pub const FONT_FIELD: &str = "font";

/// A font file as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl UploadRequest {
    pub fn new(
        bytes: impl Into<Vec<u8>>,
        content_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
            file_name: file_name.into(),
        }
    }
}

/// Everything a client learns about a stored font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetadata {
    pub family_name: String,
    pub format: FontFormat,
    pub features: Vec<FeatureTag>,
    pub access_url: String,
    pub file_name: String,
}

/// How the access URL for a stored font is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessUrl {
    /// `base` joined with the storage key, e.g. a CDN origin.
    Public { base: String },
    /// A time-limited URL issued by the store.
    Signed { ttl: Duration },
}

impl AccessUrl {
    pub fn public(base: impl Into<String>) -> Self {
        AccessUrl::Public { base: base.into() }
    }
}

/// Knobs for an [`Uploader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploaderConfig {
    pub max_bytes: usize,
    pub access: AccessUrl,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            access: AccessUrl::public("/fonts"),
        }
    }
}

impl UploaderConfig {
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_access(mut self, access: AccessUrl) -> Self {
        self.access = access;
        self
    }

    /// Rejection message for a submission larger than `max_bytes`.
    pub fn size_limit_message(&self) -> String {
        format!("File size should not exceed {}", human_size(self.max_bytes))
    }
}

/// A validated, parsed upload that has not been written anywhere yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedUpload {
    pub request: UploadRequest,
    pub family_name: String,
    pub format: FontFormat,
    pub features: Vec<FeatureTag>,
}

/// Runs submissions through validation, parsing, storage and URL derivation.
#[derive(Debug)]
pub struct Uploader<P, S> {
    introspector: P,
    store: S,
    config: UploaderConfig,
}

impl<P, S> Uploader<P, S>
where
    P: FontIntrospector,
    S: ObjectStore,
{
    pub fn new(introspector: P, store: S, config: UploaderConfig) -> Self {
        Self {
            introspector,
            store,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    /// Validate, parse, store and describe one submission.
    pub fn handle(&self, request: UploadRequest) -> Result<FontMetadata, UploadError> {
        let prepared = self.prepare(request)?;
        self.persist(prepared)
    }

    /// Check the submission shape without looking at its contents.
    pub fn validate(&self, request: &UploadRequest) -> Result<(), UploadError> {
        if request.file_name.is_empty() {
            return Err(UploadError::validation(
                FONT_FIELD,
                "Please upload a font file",
            ));
        }
        if !ALLOWED_CONTENT_TYPES.contains(&request.content_type.as_str()) {
            return Err(UploadError::validation(FONT_FIELD, "Invalid font file type"));
        }
        if request.bytes.len() > self.config.max_bytes {
            return Err(UploadError::validation(
                FONT_FIELD,
                self.config.size_limit_message(),
            ));
        }
        if !is_plain_key(&request.file_name) {
            return Err(UploadError::validation(FONT_FIELD, "Invalid file name"));
        }
        Ok(())
    }

    /// Validate, parse, enrich and classify. Nothing is stored.
    pub fn prepare(&self, request: UploadRequest) -> Result<PreparedUpload, UploadError> {
        if let Err(err) = self.validate(&request) {
            warn!(file = %request.file_name, size = request.bytes.len(), error = %err, "rejected upload");
            return Err(err);
        }

        let parsed = self
            .introspector
            .parse(&request.bytes)
            .and_then(select_face)
            .map_err(|err| {
                warn!(file = %request.file_name, error = %err, "font did not parse");
                UploadError::Parse(err)
            })?;

        let (family_name, raw_features) = parsed;
        let features = enrich(raw_features);
        let format = classify(&request.file_name);

        Ok(PreparedUpload {
            request,
            family_name,
            format,
            features,
        })
    }

    /// Write a prepared upload to the store and assemble its metadata.
    pub fn persist(&self, prepared: PreparedUpload) -> Result<FontMetadata, UploadError> {
        let PreparedUpload {
            request,
            family_name,
            format,
            features,
        } = prepared;
        let key = request.file_name;

        self.store
            .put(
                &key,
                &request.bytes,
                &request.content_type,
                Visibility::PublicRead,
            )
            .map_err(|err| {
                error!(key = %key, error = %err, "error uploading file");
                UploadError::Storage(err)
            })?;

        let access_url = match &self.config.access {
            AccessUrl::Public { base } => join_url(base, &key),
            AccessUrl::Signed { ttl } => {
                self.store.signed_read_url(&key, *ttl).map_err(|err| {
                    error!(key = %key, error = %err, "could not sign access url");
                    UploadError::Storage(err)
                })?
            }
        };

        info!(
            key = %key,
            family = %family_name,
            format = %format,
            features = features.len(),
            size = request.bytes.len(),
            "stored font"
        );

        Ok(FontMetadata {
            family_name,
            format,
            features,
            access_url,
            file_name: key,
        })
    }
}

/// Reduce a parse result to one family name and its raw feature tags.
fn select_face(parsed: ParsedFont) -> Result<(String, Vec<String>), ParseError> {
    match parsed {
        ParsedFont::Single(face) => Ok((
            face.family_name
                .unwrap_or_else(|| UNKNOWN_FAMILY.to_string()),
            face.available_features,
        )),
        ParsedFont::Collection(collection) => {
            if collection.fonts.is_empty() {
                return Err(ParseError::EmptyCollection);
            }
            let family = collection
                .first_family()
                .ok_or(ParseError::NoFamily)?
                .to_string();
            let face = collection
                .get_font(&family)
                .ok_or_else(|| ParseError::UnresolvedFamily(family.clone()))?;
            let features = face.available_features.clone();
            Ok((family, features))
        }
    }
}

fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}

fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}
