// src/web/mod.rs

// --- Imports ---
use crate::extractors::section::{SectionMap, SectionSplitter};
use crate::extractors::text::TextExtractor;
use crate::pdf::ReportPdf;
use crate::utils::error::{AppError, PdfError};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

// --- Static assets (embedded) ---
const INDEX_HTML: &str = include_str!("index.html");
const APP_JS: &str = include_str!("app.js");
const APP_CSS: &str = include_str!("app.css");

// --- Shared state ---
/// Everything a request needs. Nothing here is mutated per request; each
/// upload is processed independently.
pub struct AppState {
    extractor: TextExtractor,
    splitter: SectionSplitter,
    max_upload_bytes: usize,
}

impl AppState {
    pub fn new(extractor: TextExtractor, splitter: SectionSplitter, max_upload_bytes: usize) -> Self {
        Self {
            extractor,
            splitter,
            max_upload_bytes,
        }
    }
}

// --- Response DTOs ---
#[derive(Serialize, Debug)]
pub struct ExtractResponse {
    pub full_text: String,
    pub sections: SectionMap,
    pub warnings: Vec<String>,
    pub meta: ExtractionMeta,
}

#[derive(Serialize, Debug)]
pub struct ExtractionMeta {
    pub pages_total: usize,
    pub pages_native: usize,
    pub pages_ocr: usize,
    pub pages_unreadable: usize,
    pub extracted_at: String,
}

// --- Error type ---
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

fn bad_request(msg: impl Into<String>) -> ApiError {
    ApiError(StatusCode::BAD_REQUEST, msg.into())
}

fn internal(msg: impl Into<String>) -> ApiError {
    ApiError(StatusCode::INTERNAL_SERVER_ERROR, msg.into())
}

// --- Route handlers ---

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}

async fn app_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], APP_CSS)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}

/// Accepts a multipart upload with a `file` field holding the PDF and
/// returns the combined text plus the section split.
async fn extract_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let mut upload: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| bad_request(format!("failed to read upload: {}", e)))?;
            upload = Some(bytes);
        }
    }

    let bytes = upload.ok_or_else(|| bad_request("missing 'file' field in upload"))?;
    if bytes.is_empty() {
        return Err(bad_request("uploaded file is empty"));
    }
    tracing::info!("Received upload ({} bytes)", bytes.len());

    // PDF parsing, rasterization and OCR are blocking CPU/subprocess
    // work; keep them off the async executor.
    let worker_state = state.clone();
    let result = tokio::task::spawn_blocking(move || process_upload(&worker_state, &bytes))
        .await
        .map_err(|e| internal(format!("extraction task failed: {}", e)))?;

    match result {
        Ok(response) => Ok(Json(response)),
        // Spool I/O is our fault; a document that will not parse is the
        // upload's. Malformed uploads fail loudly with the parser message.
        Err(err @ PdfError::Io(_)) => Err(internal(err.to_string())),
        Err(err) => Err(ApiError(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())),
    }
}

/// Synchronous upload pipeline: spool to disk, open, extract, split.
/// The spool file is removed when it drops, on every path.
fn process_upload(state: &AppState, bytes: &[u8]) -> Result<ExtractResponse, PdfError> {
    let mut spool = NamedTempFile::new()?;
    spool.write_all(bytes)?;
    spool.flush()?;

    let pdf = ReportPdf::open(spool.path())?;
    let report = state.extractor.extract(&pdf);
    let sections = state.splitter.split(&report.full_text);

    Ok(ExtractResponse {
        meta: ExtractionMeta {
            pages_total: report.pages_total,
            pages_native: report.pages_native,
            pages_ocr: report.pages_ocr,
            pages_unreadable: report.pages_unreadable,
            extracted_at: chrono::Utc::now().to_rfc3339(),
        },
        full_text: report.full_text,
        sections,
        warnings: report.warnings,
    })
}

// --- Router build + server run ---

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_upload_bytes;
    Router::new()
        .route("/", get(index))
        .route("/app.js", get(app_js))
        .route("/app.css", get(app_css))
        .route("/api/extract", post(extract_handler))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub async fn serve(bind: &str, state: Arc<AppState>) -> Result<(), AppError> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Listening on http://{}", bind);
    axum::serve(listener, app).await?;
    Ok(())
}
