use std::path::Path;

use diesel::dsl::exists;
use diesel::{prelude::*, select};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Document, NewDocument};
use crate::schema::{cases, documents};
use crate::state::AppState;

/// Hard ceiling on uploaded document size.
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Content types a case document may declare.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "image/jpeg",
    "image/png",
    "image/gif",
];

pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

fn is_allowed_content_type(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES.iter().any(|ty| *ty == content_type)
}

/// Builds a collision-resistant storage key for an upload. A random UUID
/// keeps concurrent uploads to the same case from clobbering each other; the
/// original extension is retained so stored blobs stay recognizable.
fn storage_key_for(case_id: i64, file_name: &str) -> String {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    format!("cases/{case_id}/{}{ext}", Uuid::new_v4())
}

/// Persists an uploaded file as bytes plus a Document row.
///
/// The byte store and the database cannot share a transaction, so the bytes
/// go in first and are deleted again if the row insert fails. The residual
/// window (process crash between insert and response) leaves an orphaned
/// blob, accepted and recoverable by offline reconciliation.
pub async fn ingest_document(
    state: &AppState,
    case_id: i64,
    upload: DocumentUpload,
) -> AppResult<Document> {
    {
        let mut conn = state.db()?;
        let case_exists: bool =
            select(exists(cases::table.filter(cases::id.eq(case_id)))).get_result(&mut conn)?;
        if !case_exists {
            return Err(AppError::NotFound("case"));
        }
    }

    if upload.bytes.len() as u64 > MAX_DOCUMENT_BYTES {
        return Err(AppError::PayloadTooLarge(MAX_DOCUMENT_BYTES));
    }

    if !is_allowed_content_type(&upload.content_type) {
        return Err(AppError::UnsupportedMediaType(upload.content_type));
    }

    let storage_key = storage_key_for(case_id, &upload.file_name);
    let size_bytes = upload.bytes.len() as i64;

    state
        .storage
        .put_object(&storage_key, upload.bytes, &upload.content_type)
        .await
        .map_err(|err| {
            error!(error = %err, key = %storage_key, "failed to store document bytes");
            AppError::storage(err)
        })?;

    let new_document = NewDocument {
        case_id,
        file_name: upload.file_name,
        storage_key: storage_key.clone(),
        content_type: upload.content_type,
        size_bytes,
    };

    let inserted = {
        let mut conn = state.db()?;
        diesel::insert_into(documents::table)
            .values(&new_document)
            .get_result::<Document>(&mut conn)
    };

    match inserted {
        Ok(document) => {
            info!(
                document_id = document.id,
                case_id,
                key = %storage_key,
                size_bytes,
                "document ingested"
            );
            Ok(document)
        }
        Err(err) => {
            // Compensate: the row never landed, so the bytes must go too.
            if let Err(delete_err) = state.storage.delete_object(&storage_key).await {
                warn!(
                    key = %storage_key,
                    error = %delete_err,
                    "failed to remove stored bytes after record insert failure"
                );
            }
            error!(case_id, error = %err, "document record insert failed");
            Err(AppError::from(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_covers_document_and_image_types() {
        assert!(is_allowed_content_type("application/pdf"));
        assert!(is_allowed_content_type("image/gif"));
        assert!(!is_allowed_content_type("text/x-shellscript"));
        assert!(!is_allowed_content_type("application/octet-stream"));
    }

    #[test]
    fn storage_keys_retain_extension_and_differ() {
        let first = storage_key_for(7, "letter.pdf");
        let second = storage_key_for(7, "letter.pdf");
        assert!(first.starts_with("cases/7/"));
        assert!(first.ends_with(".pdf"));
        assert_ne!(first, second);
    }

    #[test]
    fn storage_keys_without_extension() {
        let key = storage_key_for(3, "README");
        assert!(key.starts_with("cases/3/"));
        assert!(!key.contains('.'));
    }
}
