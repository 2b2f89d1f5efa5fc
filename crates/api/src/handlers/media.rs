//! Media library: listing, upload to local disk and archival.

use std::io::{Cursor, ErrorKind};
use std::path::Path as FsPath;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use shifa_core::error::CoreError;
use shifa_core::pagination::{clamp_limit, clamp_offset};
use shifa_core::types::DbId;
use shifa_db::models::media::{CreateMedia, Media, MediaFilter};
use shifa_db::repositories::MediaRepo;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireEditor};
use crate::response::{ApiResponse, ListMeta};
use crate::state::AppState;

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// URL prefix uploaded files are served under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

#[derive(Debug, Default, Deserialize)]
pub struct MediaListParams {
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/media
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<MediaListParams>,
) -> AppResult<Json<ApiResponse<Vec<Media>>>> {
    let filter = MediaFilter {
        tag: params.tag.filter(|t| !t.trim().is_empty()),
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    };
    let (items, total) = MediaRepo::list(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::list(
        items,
        ListMeta {
            total,
            limit: filter.limit,
            offset: filter.offset,
        },
    )))
}

#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    bytes: Vec<u8>,
    alt_en: Option<String>,
    alt_ar: Option<String>,
    tags: Vec<String>,
}

/// POST /api/v1/media/upload
///
/// Multipart fields: `file` (required), `alt_en`, `alt_ar`, and `tags` as a
/// comma-separated list. Returns 501 when no upload directory is configured.
pub async fn upload(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Media>>)> {
    let Some(upload_dir) = state.config.media_upload_dir.clone() else {
        return Err(AppError::NotImplemented(
            "Media uploads are not configured".into(),
        ));
    };

    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                form.file_name = field.file_name().map(str::to_string);
                form.bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?
                    .to_vec();
            }
            "alt_en" | "alt_ar" | "tags" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid field {name}: {e}")))?;
                match name.as_str() {
                    "alt_en" => form.alt_en = non_blank(text),
                    "alt_ar" => form.alt_ar = non_blank(text),
                    _ => form.tags = parse_tags(&text),
                }
            }
            _ => {}
        }
    }

    let file_name = match form.file_name.as_deref() {
        Some(name) if !form.bytes.is_empty() => name,
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "No file provided".into(),
            )))
        }
    };

    let (format, width, height) = image_metadata(&form.bytes)?;
    let key = storage_key(Utc::now().timestamp_millis(), file_name);

    let stored_path = store_upload(&upload_dir, &key, &form.bytes).await?;

    let created = MediaRepo::create(
        &state.pool,
        &CreateMedia {
            url: format!("{UPLOADS_URL_PREFIX}/{key}"),
            variants: Some(json!({
                "optimized": format!("{UPLOADS_URL_PREFIX}/optimized/{key}"),
                "thumbnail": format!("{UPLOADS_URL_PREFIX}/thumbnails/{key}"),
            })),
            key,
            width: Some(width),
            height: Some(height),
            format: Some(format),
            size_bytes: form.bytes.len() as i64,
            alt_en: form.alt_en,
            alt_ar: form.alt_ar,
            tags: form.tags,
        },
    )
    .await;
    let media = match created {
        Ok(media) => media,
        Err(e) => {
            if let Err(remove_err) = tokio::fs::remove_file(&stored_path).await {
                tracing::warn!(
                    path = %stored_path.display(),
                    error = %remove_err,
                    "Failed to remove orphaned upload"
                );
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        media_id = media.id,
        key = %media.key,
        size_bytes = media.size_bytes,
        user_id = user.user_id,
        "Media uploaded"
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(media))))
}

/// DELETE /api/v1/media/{id}
///
/// Archives the row; the stored file is left on disk.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MediaRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Media",
            id,
        }));
    }
    tracing::info!(media_id = id, user_id = admin.user_id, "Media archived");
    Ok(StatusCode::NO_CONTENT)
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// `{unix_ms}-{name}` with whitespace runs replaced by `-`. Directory parts
/// of the client-supplied name are dropped.
pub fn storage_key(unix_ms: i64, file_name: &str) -> String {
    let base = FsPath::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let cleaned = base.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{unix_ms}-{cleaned}")
}

/// Write `bytes` to `{dir}/{key}` without replacing an existing file.
///
/// A key that is already on disk is reported as a conflict.
async fn store_upload(dir: &FsPath, key: &str, bytes: &[u8]) -> Result<std::path::PathBuf, AppError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload directory: {e}")))?;

    let path = dir.join(key);
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => AppError::Core(CoreError::Conflict(format!(
                "A file with key '{key}' already exists"
            ))),
            _ => AppError::InternalError(format!("Failed to store upload: {e}")),
        })?;
    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;
    if let Err(e) = written {
        drop(file);
        let _ = tokio::fs::remove_file(&path).await;
        return Err(AppError::InternalError(format!("Failed to store upload: {e}")));
    }
    Ok(path)
}

/// Format name and pixel size from the image header. Pixel data is not decoded.
fn image_metadata(bytes: &[u8]) -> Result<(String, i32, i32), AppError> {
    let unsupported = || AppError::BadRequest("Unsupported or corrupt image file".into());

    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| unsupported())?;
    let format = reader.format().ok_or_else(unsupported)?;
    let (width, height) = reader.into_dimensions().map_err(|_| unsupported())?;

    let name = format
        .to_mime_type()
        .trim_start_matches("image/")
        .to_string();
    Ok((name, width as i32, height as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_replaces_whitespace_and_strips_directories() {
        assert_eq!(
            storage_key(1_767_000_000_000, "Apollo  Chennai lobby.jpg"),
            "1767000000000-Apollo-Chennai-lobby.jpg"
        );
        assert_eq!(storage_key(5, "../../etc/passwd"), "5-passwd");
    }

    #[test]
    fn tags_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(parse_tags(" hospital, ,chennai ,"), vec!["hospital", "chennai"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn png_header_gives_dimensions() {
        let mut png = Vec::new();
        image::RgbImage::new(3, 2)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let (format, width, height) = image_metadata(&png).unwrap();
        assert_eq!(format, "png");
        assert_eq!((width, height), (3, 2));
    }

    #[tokio::test]
    async fn existing_key_is_a_conflict_and_keeps_the_first_file() {
        let dir = tempfile::tempdir().unwrap();
        let key = storage_key(1_767_000_000_000, "lobby.jpg");

        let path = store_upload(dir.path(), &key, b"first").await.unwrap();
        let second = store_upload(dir.path(), &key, b"second").await;

        assert!(matches!(second, Err(AppError::Core(CoreError::Conflict(_)))));
        assert_eq!(std::fs::read(&path).unwrap(), b"first");
    }

    #[tokio::test]
    async fn missing_upload_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("media").join("2026");

        let path = store_upload(&nested, "1-scan.png", b"png").await.unwrap();

        assert_eq!(path, nested.join("1-scan.png"));
        assert_eq!(std::fs::read(path).unwrap(), b"png");
    }

    #[test]
    fn non_image_bytes_are_rejected() {
        assert!(matches!(
            image_metadata(b"%PDF-1.7 not an image"),
            Err(AppError::BadRequest(_))
        ));
    }
}
