use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Case, NewCase};
use crate::reference::{format_reference, next_case_id};
use crate::schema::cases;
use crate::state::AppState;
use crate::workflow::{CaseStage, CaseStatus};

const DEFAULT_PAGE_LIMIT: i64 = 10;
const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Deserialize)]
pub struct CaseListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub sender_name: String,
    pub subject: String,
    pub country_of_origin: String,
    pub distressed_person_name: String,
    pub nature_of_case: String,
    pub case_details: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaseRequest {
    pub sender_name: String,
    pub subject: String,
    pub country_of_origin: String,
    pub distressed_person_name: String,
    pub nature_of_case: String,
    pub case_details: String,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub stage: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResponse {
    pub id: i64,
    pub reference_number: String,
    pub sender_name: String,
    pub receiving_date: String,
    pub subject: String,
    pub country_of_origin: String,
    pub distressed_person_name: String,
    pub nature_of_case: String,
    pub case_details: String,
    pub status: String,
    pub stage: String,
    pub assigned_officer_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Case> for CaseResponse {
    fn from(case: Case) -> Self {
        Self {
            id: case.id,
            reference_number: case.reference_number,
            sender_name: case.sender_name,
            receiving_date: to_iso(case.receiving_date),
            subject: case.subject,
            country_of_origin: case.country_of_origin,
            distressed_person_name: case.distressed_person_name,
            nature_of_case: case.nature_of_case,
            case_details: case.case_details,
            status: case.status,
            stage: case.stage,
            assigned_officer_id: case.assigned_officer_id,
            created_at: to_iso(case.created_at),
            updated_at: to_iso(case.updated_at),
        }
    }
}

pub(crate) fn to_iso(dt: NaiveDateTime) -> String {
    DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc).to_rfc3339()
}

fn require_field(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

pub async fn list_cases(
    State(state): State<AppState>,
    Query(params): Query<CaseListQuery>,
) -> AppResult<Json<Vec<CaseResponse>>> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);
    let offset = (page - 1) * limit;

    let mut conn = state.db()?;
    let rows: Vec<Case> = cases::table
        .order((cases::created_at.desc(), cases::id.desc()))
        .limit(limit)
        .offset(offset)
        .load(&mut conn)?;

    Ok(Json(rows.into_iter().map(CaseResponse::from).collect()))
}

pub async fn get_case(
    State(state): State<AppState>,
    Path(case_id): Path<i64>,
) -> AppResult<Json<CaseResponse>> {
    let mut conn = state.db()?;
    let case: Case = cases::table
        .find(case_id)
        .first(&mut conn)
        .map_err(|err| match err {
            diesel::result::Error::NotFound => AppError::NotFound("case"),
            other => AppError::from(other),
        })?;
    Ok(Json(CaseResponse::from(case)))
}

pub async fn create_case(
    State(state): State<AppState>,
    Json(payload): Json<CreateCaseRequest>,
) -> AppResult<(StatusCode, Json<CaseResponse>)> {
    let sender_name = require_field(&payload.sender_name, "senderName")?;
    let subject = require_field(&payload.subject, "subject")?;
    let nature_of_case = require_field(&payload.nature_of_case, "natureOfCase")?;

    let mut conn = state.db()?;
    let case = conn.transaction::<Case, AppError, _>(|conn| {
        // The id comes from the sequence before the insert so the unique
        // reference number can be derived from it in the same transaction.
        let id = next_case_id(conn)?;
        let new_case = NewCase {
            id,
            reference_number: format_reference(id),
            sender_name: sender_name.clone(),
            receiving_date: Utc::now().naive_utc(),
            subject: subject.clone(),
            country_of_origin: payload.country_of_origin.trim().to_string(),
            distressed_person_name: payload.distressed_person_name.trim().to_string(),
            nature_of_case: nature_of_case.clone(),
            case_details: payload.case_details.clone(),
            status: CaseStatus::Pending.to_string(),
            stage: CaseStage::INITIAL.to_string(),
            assigned_officer_id: None,
        };

        let case: Case = diesel::insert_into(cases::table)
            .values(&new_case)
            .get_result(conn)?;
        Ok(case)
    })?;

    info!(
        case_id = case.id,
        reference = %case.reference_number,
        "case created"
    );

    Ok((StatusCode::CREATED, Json(CaseResponse::from(case))))
}

pub async fn update_case(
    State(state): State<AppState>,
    Path(case_id): Path<i64>,
    Json(payload): Json<UpdateCaseRequest>,
) -> AppResult<Json<CaseResponse>> {
    let sender_name = require_field(&payload.sender_name, "senderName")?;
    let subject = require_field(&payload.subject, "subject")?;
    let nature_of_case = require_field(&payload.nature_of_case, "natureOfCase")?;

    let mut conn = state.db()?;
    let updated = diesel::update(cases::table.find(case_id))
        .set((
            cases::sender_name.eq(&sender_name),
            cases::subject.eq(&subject),
            cases::country_of_origin.eq(payload.country_of_origin.trim()),
            cases::distressed_person_name.eq(payload.distressed_person_name.trim()),
            cases::nature_of_case.eq(&nature_of_case),
            cases::case_details.eq(&payload.case_details),
            cases::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)?;

    if updated == 0 {
        return Err(AppError::NotFound("case"));
    }

    let case: Case = cases::table.find(case_id).first(&mut conn)?;
    Ok(Json(CaseResponse::from(case)))
}

pub async fn update_case_status(
    State(state): State<AppState>,
    Path(case_id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<CaseResponse>> {
    let status: CaseStatus = payload.status.parse()?;
    let stage: CaseStage = payload.stage.parse()?;

    let mut conn = state.db()?;
    let updated = diesel::update(cases::table.find(case_id))
        .set((
            cases::status.eq(status.as_str()),
            cases::stage.eq(stage.as_str()),
            cases::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)?;

    if updated == 0 {
        return Err(AppError::NotFound("case"));
    }

    info!(case_id, %status, %stage, "case status updated");

    let case: Case = cases::table.find(case_id).first(&mut conn)?;
    Ok(Json(CaseResponse::from(case)))
}
