use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use diesel::dsl::exists;
use diesel::{prelude::*, select};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{NewProgressNote, ProgressNote};
use crate::routes::cases::to_iso;
use crate::schema::{cases, progress_notes};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteRequest {
    pub note: String,
    pub user_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressNoteResponse {
    pub id: i64,
    pub case_id: i64,
    pub user_id: Option<i64>,
    pub note: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProgressNote> for ProgressNoteResponse {
    fn from(note: ProgressNote) -> Self {
        Self {
            id: note.id,
            case_id: note.case_id,
            user_id: note.user_id,
            note: note.note,
            created_at: to_iso(note.created_at),
            updated_at: to_iso(note.updated_at),
        }
    }
}

pub async fn add_note(
    State(state): State<AppState>,
    Path(case_id): Path<i64>,
    Json(payload): Json<AddNoteRequest>,
) -> AppResult<(StatusCode, Json<ProgressNoteResponse>)> {
    if payload.note.trim().is_empty() {
        return Err(AppError::validation("note must not be empty"));
    }

    let mut conn = state.db()?;

    let case_exists: bool =
        select(exists(cases::table.filter(cases::id.eq(case_id)))).get_result(&mut conn)?;
    if !case_exists {
        return Err(AppError::NotFound("case"));
    }

    let new_note = NewProgressNote {
        case_id,
        user_id: payload.user_id,
        note: payload.note.trim().to_string(),
    };

    let note: ProgressNote = diesel::insert_into(progress_notes::table)
        .values(&new_note)
        .get_result(&mut conn)?;

    Ok((StatusCode::CREATED, Json(ProgressNoteResponse::from(note))))
}

pub async fn list_notes(
    State(state): State<AppState>,
    Path(case_id): Path<i64>,
) -> AppResult<Json<Vec<ProgressNoteResponse>>> {
    let mut conn = state.db()?;

    let case_exists: bool =
        select(exists(cases::table.filter(cases::id.eq(case_id)))).get_result(&mut conn)?;
    if !case_exists {
        return Err(AppError::NotFound("case"));
    }

    let rows: Vec<ProgressNote> = progress_notes::table
        .filter(progress_notes::case_id.eq(case_id))
        .order((progress_notes::created_at.desc(), progress_notes::id.desc()))
        .load(&mut conn)?;

    Ok(Json(
        rows.into_iter().map(ProgressNoteResponse::from).collect(),
    ))
}
