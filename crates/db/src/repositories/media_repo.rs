//! Repository for the `media` table.

use sqlx::PgPool;
use shifa_core::types::DbId;

use crate::models::media::{CreateMedia, Media, MediaFilter};

const COLUMNS: &str = "id, key, url, width, height, format, size_bytes, alt_en, alt_ar, tags, \
    variants, is_archived, created_at, updated_at";

pub struct MediaRepo;

impl MediaRepo {
    pub async fn create(pool: &PgPool, input: &CreateMedia) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media (key, url, width, height, format, size_bytes, alt_en, alt_ar,
                tags, variants)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(&input.key)
            .bind(&input.url)
            .bind(input.width)
            .bind(input.height)
            .bind(&input.format)
            .bind(input.size_bytes)
            .bind(&input.alt_en)
            .bind(&input.alt_ar)
            .bind(&input.tags)
            .bind(&input.variants)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = $1 AND is_archived = FALSE");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest first, optionally restricted to assets carrying `tag`.
    pub async fn list(pool: &PgPool, filter: &MediaFilter) -> Result<(Vec<Media>, i64), sqlx::Error> {
        const WHERE: &str = "WHERE is_archived = FALSE AND ($1::text IS NULL OR $1 = ANY(tags))";

        let query = format!(
            "SELECT {COLUMNS} FROM media {WHERE} ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Media>(&query)
            .bind(&filter.tag)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM media {WHERE}"))
            .bind(&filter.tag)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE media SET is_archived = TRUE WHERE id = $1 AND is_archived = FALSE")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
