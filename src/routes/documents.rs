use axum::extract::{Json, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use diesel::dsl::exists;
use diesel::{prelude::*, select};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::{AppError, AppResult};
use crate::ingest::{ingest_document, DocumentUpload};
use crate::models::Document;
use crate::routes::cases::to_iso;
use crate::schema::{cases, documents};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: i64,
    pub case_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_at: String,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            case_id: document.case_id,
            file_name: document.file_name,
            content_type: document.content_type,
            size_bytes: document.size_bytes,
            uploaded_at: to_iso(document.uploaded_at),
        }
    }
}

pub async fn upload_document(
    State(state): State<AppState>,
    Path(case_id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DocumentResponse>)> {
    let mut upload: Option<DocumentUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        error!(error = %err, "invalid multipart data");
        AppError::validation(format!("invalid multipart data: {err}"))
    })? {
        if field.name() != Some("document") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|name| name.to_string())
            .ok_or_else(|| AppError::validation("filename is required"))?;
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .ok_or_else(|| AppError::validation("content type is required"))?;
        let bytes = field.bytes().await.map_err(|err| {
            error!(error = %err, "failed to read file bytes");
            AppError::validation(format!("failed to read file bytes: {err}"))
        })?;

        upload = Some(DocumentUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let upload = upload.ok_or_else(|| AppError::validation("document field is required"))?;
    if upload.bytes.is_empty() {
        return Err(AppError::validation("document field must not be empty"));
    }

    let document = ingest_document(&state, case_id, upload).await?;
    Ok((StatusCode::CREATED, Json(DocumentResponse::from(document))))
}

pub async fn list_documents(
    State(state): State<AppState>,
    Path(case_id): Path<i64>,
) -> AppResult<Json<Vec<DocumentResponse>>> {
    let mut conn = state.db()?;

    let case_exists: bool =
        select(exists(cases::table.filter(cases::id.eq(case_id)))).get_result(&mut conn)?;
    if !case_exists {
        return Err(AppError::NotFound("case"));
    }

    // Insertion order, made explicit.
    let rows: Vec<Document> = documents::table
        .filter(documents::case_id.eq(case_id))
        .order(documents::id.asc())
        .load(&mut conn)?;

    Ok(Json(rows.into_iter().map(DocumentResponse::from).collect()))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path((case_id, document_id)): Path<(i64, i64)>,
) -> AppResult<impl IntoResponse> {
    let storage_key = {
        let mut conn = state.db()?;
        let document: Document = documents::table
            .filter(documents::id.eq(document_id))
            .filter(documents::case_id.eq(case_id))
            .first(&mut conn)
            .map_err(|err| match err {
                diesel::result::Error::NotFound => AppError::NotFound("document"),
                other => AppError::from(other),
            })?;

        diesel::delete(documents::table.find(document_id)).execute(&mut conn)?;
        document.storage_key
    };

    // The row is authoritative; losing the bytes is logged, never reported.
    if let Err(err) = state.storage.delete_object(&storage_key).await {
        warn!(key = %storage_key, error = %err, "failed to delete stored bytes for document");
    }

    Ok(StatusCode::NO_CONTENT)
}
