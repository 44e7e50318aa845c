//! Logo upload.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::AppState;
use crate::auth::CurrentUser;
use crate::db::models::Role;
use crate::error::{AppError, AppResult};

/// Roles allowed to upload a logo.
const UPLOAD_ROLES: &[Role] = &[Role::Admin, Role::Accountant];

/// Name of the multipart field carrying the file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Stored file name, `{email}_{original name}`.
    pub filename: String,
    pub path: String,
}

/// POST /upload/logo
pub async fn upload_logo(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    user.require_any(UPLOAD_ROLES)?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        if e.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::BadRequest(format!("Failed to read multipart field: {e}"))
        }
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original = field
            .file_name()
            .and_then(sanitize_file_name)
            .ok_or_else(|| AppError::BadRequest("A file name is required".to_string()))?;

        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(&original)
                    .first_or_octet_stream()
                    .to_string()
            });
        if !content_type.starts_with("image/") {
            return Err(AppError::BadRequest(format!(
                "File '{original}' has unsupported type: {content_type}"
            )));
        }

        let data = field.bytes().await.map_err(|e| {
            if e.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::BadRequest(format!("Failed to read file '{original}': {e}"))
            }
        })?;

        let dir = PathBuf::from(&state.config.storage.uploads_dir);
        tokio::fs::create_dir_all(&dir).await?;

        let filename = stored_file_name(&user.user.email, &original);
        let path = dir.join(&filename);
        if path.parent() != Some(dir.as_path()) {
            warn!(
                name: "upload.logo.rejected",
                user = %user.user.email,
                filename = %filename,
                "Stored name escapes the uploads directory"
            );
            return Err(AppError::BadRequest(format!("Invalid file name '{original}'")));
        }
        tokio::fs::write(&path, &data).await?;

        info!(
            name: "upload.logo.stored",
            user = %user.user.email,
            filename = %filename,
            size = data.len(),
            "Logo stored"
        );

        return Ok(Json(UploadResponse {
            filename,
            path: path.display().to_string(),
        }));
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

/// Reduce a client-supplied name to its final path component.
fn sanitize_file_name(name: &str) -> Option<String> {
    let normalized = name.replace('\\', "/");
    let last = Path::new(&normalized).file_name()?.to_str()?.trim();
    (!last.is_empty() && last != "." && last != "..").then(|| last.to_string())
}

/// `{email}_{original}` as a single path component. Separators in the email
/// become underscores.
fn stored_file_name(email: &str, original: &str) -> String {
    let owner: String = email
        .chars()
        .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '_' } else { c })
        .collect();
    format!("{owner}_{original}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_file_name("logo.png").as_deref(), Some("logo.png"));
    }

    #[test]
    fn strips_directories() {
        assert_eq!(
            sanitize_file_name("../../etc/passwd").as_deref(),
            Some("passwd")
        );
        assert_eq!(
            sanitize_file_name(r"C:\Users\me\logo.svg").as_deref(),
            Some("logo.svg")
        );
    }

    #[test]
    fn rejects_empty_names() {
        assert_eq!(sanitize_file_name(""), None);
        assert_eq!(sanitize_file_name("dir/"), Some("dir".to_string()));
        assert_eq!(sanitize_file_name(".."), None);
    }

    #[test]
    fn stored_name_keeps_plain_emails() {
        assert_eq!(
            stored_file_name("acc@example.com", "logo.png"),
            "acc@example.com_logo.png"
        );
    }

    #[test]
    fn stored_name_is_one_component() {
        for email in ["../escaped", r"..\escaped", "a/../../b", "/abs"] {
            let name = stored_file_name(email, "logo.png");
            let dir = Path::new("uploads");
            assert_eq!(dir.join(&name).parent(), Some(dir), "{email} -> {name}");
            assert!(!name.contains(['/', '\\']));
        }
    }
}
