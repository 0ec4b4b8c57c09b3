use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::password::hash_password;
use crate::routes::cases::to_iso;
use crate::schema::users;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub department: String,
}

/// Outward user shape. The password hash never appears here: credential
/// material does not leave the store boundary, not even straight after
/// creation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub active: bool,
    pub last_login: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            department: user.department,
            active: user.active,
            last_login: user.last_login.map(to_iso),
            created_at: to_iso(user.created_at),
            updated_at: to_iso(user.updated_at),
        }
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let email = payload.email.trim().to_string();
    if email.is_empty() {
        return Err(AppError::validation("email must not be empty"));
    }
    if payload.password.trim().is_empty() {
        return Err(AppError::validation("password must not be empty"));
    }

    let password_hash = hash_password(&payload.password)?;

    let new_user = NewUser {
        name: payload.name.trim().to_string(),
        email,
        password_hash,
        role: payload.role.trim().to_string(),
        department: payload.department.trim().to_string(),
        active: true,
    };

    let mut conn = state.db()?;
    let user: User = diesel::insert_into(users::table)
        .values(&new_user)
        .get_result(&mut conn)
        .map_err(|err| match err {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => AppError::conflict("email already exists"),
            other => AppError::from(other),
        })?;

    info!(user_id = user.id, "user created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let mut conn = state.db()?;
    let rows: Vec<User> = users::table
        .order(users::created_at.desc())
        .load(&mut conn)?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let mut conn = state.db()?;
    let user: User = users::table
        .find(user_id)
        .first(&mut conn)
        .map_err(|err| match err {
            diesel::result::Error::NotFound => AppError::NotFound("user"),
            other => AppError::from(other),
        })?;
    Ok(Json(UserResponse::from(user)))
}
