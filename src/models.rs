use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::*;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = cases)]
pub struct Case {
    pub id: i64,
    pub reference_number: String,
    pub sender_name: String,
    pub receiving_date: NaiveDateTime,
    pub subject: String,
    pub country_of_origin: String,
    pub distressed_person_name: String,
    pub nature_of_case: String,
    pub case_details: String,
    pub status: String,
    pub stage: String,
    pub assigned_officer_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cases)]
pub struct NewCase {
    pub id: i64,
    pub reference_number: String,
    pub sender_name: String,
    pub receiving_date: NaiveDateTime,
    pub subject: String,
    pub country_of_origin: String,
    pub distressed_person_name: String,
    pub nature_of_case: String,
    pub case_details: String,
    pub status: String,
    pub stage: String,
    pub assigned_officer_id: Option<i64>,
}

#[derive(Debug, Clone, Queryable, Identifiable, Associations)]
#[diesel(table_name = documents)]
#[diesel(belongs_to(Case))]
pub struct Document {
    pub id: i64,
    pub case_id: i64,
    pub file_name: String,
    pub storage_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocument {
    pub case_id: i64,
    pub file_name: String,
    pub storage_key: String,
    pub content_type: String,
    pub size_bytes: i64,
}

#[derive(Debug, Clone, Queryable, Identifiable, Associations)]
#[diesel(table_name = progress_notes)]
#[diesel(belongs_to(Case))]
pub struct ProgressNote {
    pub id: i64,
    pub case_id: i64,
    pub user_id: Option<i64>,
    pub note: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = progress_notes)]
pub struct NewProgressNote {
    pub case_id: i64,
    pub user_id: Option<i64>,
    pub note: String,
}

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub department: String,
    pub active: bool,
    pub last_login: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub department: String,
    pub active: bool,
}
