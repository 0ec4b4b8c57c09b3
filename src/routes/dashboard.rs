use std::collections::HashMap;

use axum::extract::{Json, State};
use diesel::dsl::count_star;
use diesel::prelude::*;
use serde::Serialize;

use crate::error::AppResult;
use crate::schema::cases;
use crate::state::AppState;

const RECENT_CASE_LIMIT: i64 = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_cases: i64,
    pub cases_by_status: HashMap<String, i64>,
    pub cases_by_nature: HashMap<String, i64>,
    pub cases_by_country_origin: HashMap<String, i64>,
    pub recent_cases: Vec<RecentCase>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCase {
    pub id: i64,
    pub reference_number: String,
    pub subject: String,
    pub status: String,
    pub nature_of_case: String,
}

/// Computes the dashboard aggregates fresh on every call. Grouped maps only
/// carry values that occur at least once; unseen categories are absent, not
/// zero-filled.
pub async fn dashboard_stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let mut conn = state.db()?;

    let total_cases: i64 = cases::table.select(count_star()).first(&mut conn)?;

    let status_rows: Vec<(String, i64)> = cases::table
        .group_by(cases::status)
        .select((cases::status, count_star()))
        .load(&mut conn)?;

    let nature_rows: Vec<(String, i64)> = cases::table
        .group_by(cases::nature_of_case)
        .select((cases::nature_of_case, count_star()))
        .load(&mut conn)?;

    let country_rows: Vec<(String, i64)> = cases::table
        .group_by(cases::country_of_origin)
        .select((cases::country_of_origin, count_star()))
        .load(&mut conn)?;

    let recent_rows: Vec<(i64, String, String, String, String)> = cases::table
        .order((cases::created_at.desc(), cases::id.desc()))
        .limit(RECENT_CASE_LIMIT)
        .select((
            cases::id,
            cases::reference_number,
            cases::subject,
            cases::status,
            cases::nature_of_case,
        ))
        .load(&mut conn)?;

    let recent_cases = recent_rows
        .into_iter()
        .map(
            |(id, reference_number, subject, status, nature_of_case)| RecentCase {
                id,
                reference_number,
                subject,
                status,
                nature_of_case,
            },
        )
        .collect();

    Ok(Json(DashboardStats {
        total_cases,
        cases_by_status: status_rows.into_iter().collect(),
        cases_by_nature: nature_rows.into_iter().collect(),
        cases_by_country_origin: country_rows.into_iter().collect(),
        recent_cases,
    }))
}
