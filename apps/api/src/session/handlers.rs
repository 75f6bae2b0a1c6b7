use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::html::render_preview_html;
use crate::layout::{build_preview, ScreenPreview};
use crate::models::{lenient, ResumeData};
use crate::pdf::{render_pdf, PdfArtifact, PdfLayout, RenderError};
use crate::sections::{
    build_header, build_sections, build_sections_content, requested_order, Section, SectionId,
};
use crate::session::ResumeSession;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub resume: ResumeData,
    /// Present sections in layout order.
    pub sections: Vec<Section>,
    /// All seven section kinds in canonical order with their presence flags.
    pub catalog: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeSession> for SessionResponse {
    fn from(s: ResumeSession) -> Self {
        SessionResponse {
            id: s.id,
            sections: s
                .order
                .iter()
                .map(|id| Section {
                    id: *id,
                    title: id.title().to_string(),
                    present: true,
                })
                .collect(),
            catalog: build_sections(&s.data),
            resume: s.data,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
}

#[derive(Deserialize)]
pub struct RenderRequest {
    pub resume: ResumeData,
    /// Requested section ids; unknown or malformed ids are ignored.
    #[serde(default, deserialize_with = "lenient::members")]
    pub order: Vec<SectionId>,
}

// ────────────────────────────────────────────────────────────────────────────
// Session CRUD
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = state.store.create(data).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    Ok(Json(state.store.get(id).await?.into()))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_replace(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<ResumeData>,
) -> Result<Json<SessionResponse>, AppError> {
    Ok(Json(state.store.replace(id, data).await?.into()))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/:id/sections/reorder
pub async fn handle_reorder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    Ok(Json(state.store.reorder(id, req.from, req.to).await?.into()))
}

// ────────────────────────────────────────────────────────────────────────────
// Layout outputs
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes/:id/pages
pub async fn handle_pages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScreenPreview>, AppError> {
    let session = state.store.get(id).await?;
    let cfg = &state.page_config;
    Ok(Json(build_preview(
        &session.data,
        &session.order,
        cfg.format,
        &cfg.screen,
    )))
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let session = state.store.get(id).await?;
    let cfg = &state.page_config;
    let preview = build_preview(&session.data, &session.order, cfg.format, &cfg.screen);
    let header = build_header(&session.data);
    let sections = build_sections_content(&session.order, &session.data);
    Ok(Html(render_preview_html(
        &preview,
        &header,
        &sections,
        &cfg.screen,
    )))
}

/// GET /api/v1/resumes/:id/pdf
pub async fn handle_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let session = state.store.get(id).await?;
    info!(session_id = %id, sections = session.order.len(), "PDF requested");
    let artifact = generate(session.data, session.order, state.page_config.pdf.clone()).await?;
    Ok(pdf_response(artifact))
}

/// POST /api/v1/render/pdf
///
/// Stateless generation. Requested sections lead; absent ones and duplicates are
/// dropped, and present sections the request left out follow in canonical order.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let order = requested_order(&req.order, &req.resume);
    let artifact = generate(req.resume, order, state.page_config.pdf.clone()).await?;
    Ok(pdf_response(artifact))
}

async fn generate(
    data: ResumeData,
    order: Vec<SectionId>,
    layout: PdfLayout,
) -> Result<PdfArtifact, AppError> {
    let artifact = tokio::task::spawn_blocking(move || render_pdf(&data, &order, &layout))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;
    Ok(artifact)
}

fn pdf_response(artifact: PdfArtifact) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        ascii_file_name(&artifact.file_name)
    );
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}

/// Header values must be visible ASCII.
fn ascii_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .collect()
}
