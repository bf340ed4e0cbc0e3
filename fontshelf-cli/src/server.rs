//! HTTP server for fontshelf - the drop-off window of the font library (made by FontLab https://www.fontlab.com/)
//!
//! Visitors hand a font over the counter as a multipart form, we check it,
//! read its name and features, shelve it, and slip back a card saying where
//! it now lives. Fonts shelved for public reading can be fetched back through
//! the same window.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use fontshelf_core::error::{StoreError, UploadError};
use fontshelf_core::features::FeatureTag;
use fontshelf_core::format::FontFormat;
use fontshelf_core::introspect::FontIntrospector;
use fontshelf_core::storage::{ObjectStore, Visibility};
use fontshelf_core::upload::{FontMetadata, UploadRequest, Uploader, FONT_FIELD};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task;
use tracing::{error, info};

/// Room for multipart boundaries and part headers on top of the font itself.
const FORM_OVERHEAD: usize = 64 * 1024;

/// The uploader every request shares, with its collaborators behind trait objects.
pub type SharedUploader = Arc<Uploader<Arc<dyn FontIntrospector>, Arc<dyn ObjectStore>>>;

/// Everything the handlers need, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    uploader: SharedUploader,
}

impl AppState {
    pub fn new(uploader: Uploader<Arc<dyn FontIntrospector>, Arc<dyn ObjectStore>>) -> Self {
        Self {
            uploader: Arc::new(uploader),
        }
    }
}

/// The happy little receipt handed back after a font is shelved.
///
/// Field names match what form clients already expect, including the
/// `type: "success"` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub url: String,
    pub name: String,
    pub file_name: String,
    pub features: Vec<FeatureTag>,
    pub format: FontFormat,
}

impl From<FontMetadata> for UploadResponse {
    fn from(font: FontMetadata) -> Self {
        Self {
            kind: "success".to_string(),
            text: "File uploaded successfully!".to_string(),
            url: font.access_url,
            name: font.family_name,
            file_name: font.file_name,
            features: font.features,
            format: font.format,
        }
    }
}

/// What a visitor sees when the counter says no.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub message: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// A [`Failure`] paired with its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    failure: Failure,
}

impl ApiError {
    fn new(status: StatusCode, kind: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            failure: Failure {
                message: message.into(),
                kind: kind.to_string(),
                field: None,
            },
        }
    }

    fn internal(err: impl std::fmt::Display) -> Self {
        error!(error = %err, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", err.to_string())
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        let status = match &err {
            UploadError::Validation { .. } => StatusCode::BAD_REQUEST,
            UploadError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
            UploadError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let field = match &err {
            UploadError::Validation { field, .. } => Some(field.to_string()),
            _ => None,
        };
        Self {
            status,
            failure: Failure {
                message: err.to_string(),
                kind: err.kind().to_string(),
                field,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.failure)).into_response()
    }
}

/// Opens the window and starts taking fonts.
pub async fn serve(bind: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;
    info!(bind = %bind, "accepting uploads");

    axum::serve(listener, router(state))
        .await
        .context("serving HTTP")?;
    Ok(())
}

/// Routes for health checks, uploads and fetching shelved fonts.
pub fn router(state: AppState) -> Router {
    let body_limit = state.uploader.config().max_bytes + FORM_OVERHEAD;
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/fonts", post(upload_handler))
        .route("/fonts/{key}", get(fetch_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Takes the `font` field off the form and runs it through the uploader.
///
/// At most one byte past the size limit is buffered; that is enough for
/// validation to reject the file without holding the whole body in memory.
async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let max_bytes = state.uploader.config().max_bytes;
    let size_message = || state.uploader.config().size_limit_message();
    let mut request = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|err| form_error(err, size_message()))?
    {
        if field.name() != Some(FONT_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|err| form_error(err, size_message()))?
        {
            let room = (max_bytes + 1).saturating_sub(bytes.len());
            bytes.extend_from_slice(&chunk[..chunk.len().min(room)]);
            if bytes.len() > max_bytes {
                break;
            }
        }

        request = Some(UploadRequest::new(bytes, content_type, file_name));
        break;
    }

    // no font field at all reads the same as an empty file input
    let request = request.unwrap_or_else(|| UploadRequest::new(Vec::new(), "", ""));
    let uploader = Arc::clone(&state.uploader);
    let font = task::spawn_blocking(move || uploader.handle(request))
        .await
        .map_err(ApiError::internal)??;

    Ok(Json(UploadResponse::from(font)))
}

/// Hands back a publicly shelved font with its stored content type.
async fn fetch_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let uploader = Arc::clone(&state.uploader);
    let object = task::spawn_blocking(move || uploader.store().get(&key))
        .await
        .map_err(ApiError::internal)?;

    match object {
        Ok(object) if object.visibility == Visibility::PublicRead => {
            Ok(([(header::CONTENT_TYPE, object.content_type)], object.bytes).into_response())
        }
        Ok(_) | Err(StoreError::NotFound(_)) | Err(StoreError::InvalidKey(_)) => Err(
            ApiError::new(StatusCode::NOT_FOUND, "not_found", "Font not found"),
        ),
        Err(err) => {
            error!(error = %err, "could not read stored font");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage",
                "Error reading file",
            ))
        }
    }
}

/// A body over the transport limit is the same mistake as an oversized file.
fn form_error(err: MultipartError, size_message: String) -> ApiError {
    let message = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        size_message
    } else {
        err.body_text()
    };
    let mut api = ApiError::new(StatusCode::BAD_REQUEST, "validation", message);
    api.failure.field = Some(FONT_FIELD.to_string());
    api
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use fontshelf_core::fixtures::{self, FakeFace};
    use fontshelf_core::introspect::FontationsIntrospector;
    use fontshelf_core::storage::MemoryStore;
    use fontshelf_core::upload::UploaderConfig;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::io::Write;
    use std::time::Duration;
    use tower::util::ServiceExt;

    const BOUNDARY: &str = "fontshelf-test-boundary";

    /// A store that refuses every write, like a shelf that is already full.
    struct FullShelf;

    impl ObjectStore for FullShelf {
        fn put(&self, key: &str, _: &[u8], _: &str, _: Visibility) -> Result<(), StoreError> {
            Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            })
        }

        fn get(&self, key: &str) -> Result<fontshelf_core::storage::StoredObject, StoreError> {
            Err(StoreError::NotFound(key.to_string()))
        }
    }

    fn app_with(store: Arc<dyn ObjectStore>, config: UploaderConfig) -> Router {
        let introspector: Arc<dyn FontIntrospector> = Arc::new(FontationsIntrospector);
        router(AppState::new(Uploader::new(introspector, store, config)))
    }

    fn app(store: Arc<MemoryStore>) -> Router {
        app_with(store, UploaderConfig::default())
    }

    fn form(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        write!(
            body,
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .unwrap();
        body.extend_from_slice(bytes);
        write!(body, "\r\n--{BOUNDARY}--\r\n").unwrap();

        Request::post("/fonts")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).expect("json body")
    }

    fn sample_font() -> Vec<u8> {
        fixtures::single_font(FakeFace::new(Some("Sandpiper"), &["liga", "ss03", "qqqq"]))
    }

    #[tokio::test]
    async fn upload_returns_success_payload() {
        let store = Arc::new(MemoryStore::new());
        let response = app(Arc::clone(&store))
            .oneshot(form("font", "Sandpiper.ttf", "font/ttf", &sample_font()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: UploadResponse = serde_json::from_slice(&body).expect("parse response");
        assert_eq!(parsed.kind, "success");
        assert_eq!(parsed.text, "File uploaded successfully!");
        assert_eq!(parsed.name, "Sandpiper");
        assert_eq!(parsed.file_name, "Sandpiper.ttf");
        assert_eq!(parsed.url, "/fonts/Sandpiper.ttf");
        assert_eq!(parsed.format, FontFormat::TrueType);

        let tags: Vec<&str> = parsed.features.iter().map(|f| f.tag.as_str()).collect();
        assert_eq!(tags, vec!["liga", "ss03", "qqqq"]);
        assert!(parsed.features[2].info.is_none());
        assert_eq!(store.put_count(), 1);
    }

    #[tokio::test]
    async fn wrong_type_is_a_validation_failure() {
        let store = Arc::new(MemoryStore::new());
        let response = app(Arc::clone(&store))
            .oneshot(form("font", "Sandpiper.ttf", "text/plain", &sample_font()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["message"], "Invalid font file type");
        assert_eq!(body["kind"], "validation");
        assert_eq!(body["field"], "font");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn missing_font_field_asks_for_a_file() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(form("avatar", "me.png", "image/png", b"png"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "Please upload a font file"
        );
    }

    #[tokio::test]
    async fn oversized_file_is_rejected_with_the_limit() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with(
            store.clone(),
            UploaderConfig::default().with_max_bytes(64),
        );
        let response = app
            .oneshot(form("font", "Big.ttf", "font/ttf", &vec![0u8; 4096]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["message"], "File size should not exceed 64 bytes");
        assert_eq!(body["kind"], "validation");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn garbage_bytes_are_unprocessable() {
        let store = Arc::new(MemoryStore::new());
        let response = app(Arc::clone(&store))
            .oneshot(form("font", "Fake.woff2", "font/woff2", b"definitely not a font"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["message"], "Invalid font file");
        assert_eq!(body["kind"], "parse");
        assert!(body.get("field").is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_a_server_error() {
        let response = app_with(Arc::new(FullShelf), UploaderConfig::default())
            .oneshot(form("font", "Sandpiper.ttf", "font/ttf", &sample_font()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["message"], "Error uploading file");
        assert_eq!(body["kind"], "storage");
    }

    #[tokio::test]
    async fn uploaded_font_can_be_fetched_back() {
        let store = Arc::new(MemoryStore::new());
        let font = sample_font();
        let app = app(Arc::clone(&store));

        let response = app
            .clone()
            .oneshot(form("font", "Sandpiper.ttf", "font/ttf", &font))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::get("/fonts/Sandpiper.ttf")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "font/ttf");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), font.as_slice());
    }

    #[tokio::test]
    async fn private_and_unknown_fonts_are_not_found() {
        let store = Arc::new(MemoryStore::new());
        store
            .put("Secret.ttf", b"x", "font/ttf", Visibility::Private)
            .unwrap();
        let app = app(Arc::clone(&store));

        for path in ["/fonts/Secret.ttf", "/fonts/Nobody.ttf"] {
            let request = Request::get(path).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        }
    }

    #[tokio::test]
    async fn signed_access_urls_come_from_the_store() {
        let store = Arc::new(MemoryStore::new());
        let config = UploaderConfig::default().with_access(
            fontshelf_core::upload::AccessUrl::Signed {
                ttl: Duration::from_secs(60),
            },
        );
        let response = app_with(store, config)
            .oneshot(form("font", "Sandpiper.ttf", "font/ttf", &sample_font()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let url = body["url"].as_str().expect("url");
        assert!(url.starts_with("memory://Sandpiper.ttf?expires="), "{url}");
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), b"ok");
    }
}
