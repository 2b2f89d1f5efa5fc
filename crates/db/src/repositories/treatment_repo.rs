//! Repository for the `treatments` table.

use sqlx::PgPool;

use super::SlugStamp;
use crate::models::treatment::{CreateTreatment, Treatment, TreatmentFilter, UpdateTreatment};

const COLUMNS: &str = "id, slug, title_en, title_ar, summary_en, summary_ar, \
    content_blocks_en, content_blocks_ar, cost_min, cost_max, currency, faq, hospital_ids, \
    seo_title_en, seo_title_ar, seo_desc_en, seo_desc_ar, published, is_archived, \
    created_at, updated_at";

pub struct TreatmentRepo;

impl TreatmentRepo {
    pub async fn create(pool: &PgPool, input: &CreateTreatment) -> Result<Treatment, sqlx::Error> {
        let query = format!(
            "INSERT INTO treatments (slug, title_en, title_ar, summary_en, summary_ar,
                content_blocks_en, content_blocks_ar, cost_min, cost_max, currency, faq,
                hospital_ids, seo_title_en, seo_title_ar, seo_desc_en, seo_desc_ar, published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 'USD'), $11,
                $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Treatment>(&query)
            .bind(&input.slug)
            .bind(&input.title_en)
            .bind(&input.title_ar)
            .bind(&input.summary_en)
            .bind(&input.summary_ar)
            .bind(&input.content_blocks_en)
            .bind(&input.content_blocks_ar)
            .bind(input.cost_min)
            .bind(input.cost_max)
            .bind(&input.currency)
            .bind(&input.faq)
            .bind(&input.hospital_ids)
            .bind(&input.seo_title_en)
            .bind(&input.seo_title_ar)
            .bind(&input.seo_desc_en)
            .bind(&input.seo_desc_ar)
            .bind(input.published)
            .fetch_one(pool)
            .await
    }

    /// Find a non-archived treatment by slug. With `published_only`, drafts
    /// are treated as absent.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<Treatment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM treatments
             WHERE slug = $1 AND is_archived = FALSE AND ($2 = FALSE OR published = TRUE)"
        );
        sqlx::query_as::<_, Treatment>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    /// One page of non-archived treatments, newest first, plus the total
    /// matching count.
    pub async fn list(
        pool: &PgPool,
        filter: &TreatmentFilter,
    ) -> Result<(Vec<Treatment>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM treatments
             WHERE is_archived = FALSE AND ($1::bool IS NULL OR published = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Treatment>(&query)
            .bind(filter.published)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM treatments
             WHERE is_archived = FALSE AND ($1::bool IS NULL OR published = $1)",
        )
        .bind(filter.published)
        .fetch_one(pool)
        .await?;

        Ok((rows, total))
    }

    /// Apply the non-`None` fields of `input`. Returns `None` when no
    /// non-archived row has `slug`.
    pub async fn update_by_slug(
        pool: &PgPool,
        slug: &str,
        input: &UpdateTreatment,
    ) -> Result<Option<Treatment>, sqlx::Error> {
        let query = format!(
            "UPDATE treatments SET
                slug = COALESCE($2, slug),
                title_en = COALESCE($3, title_en),
                title_ar = COALESCE($4, title_ar),
                summary_en = COALESCE($5, summary_en),
                summary_ar = COALESCE($6, summary_ar),
                content_blocks_en = COALESCE($7, content_blocks_en),
                content_blocks_ar = COALESCE($8, content_blocks_ar),
                cost_min = COALESCE($9, cost_min),
                cost_max = COALESCE($10, cost_max),
                currency = COALESCE($11, currency),
                faq = COALESCE($12, faq),
                hospital_ids = COALESCE($13, hospital_ids),
                seo_title_en = COALESCE($14, seo_title_en),
                seo_title_ar = COALESCE($15, seo_title_ar),
                seo_desc_en = COALESCE($16, seo_desc_en),
                seo_desc_ar = COALESCE($17, seo_desc_ar),
                published = COALESCE($18, published)
             WHERE slug = $1 AND is_archived = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Treatment>(&query)
            .bind(slug)
            .bind(&input.slug)
            .bind(&input.title_en)
            .bind(&input.title_ar)
            .bind(&input.summary_en)
            .bind(&input.summary_ar)
            .bind(&input.content_blocks_en)
            .bind(&input.content_blocks_ar)
            .bind(input.cost_min)
            .bind(input.cost_max)
            .bind(&input.currency)
            .bind(&input.faq)
            .bind(&input.hospital_ids)
            .bind(&input.seo_title_en)
            .bind(&input.seo_title_ar)
            .bind(&input.seo_desc_en)
            .bind(&input.seo_desc_ar)
            .bind(input.published)
            .fetch_optional(pool)
            .await
    }

    /// Mark a treatment archived. Returns `true` if a row was archived.
    pub async fn soft_delete_by_slug(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE treatments SET is_archived = TRUE WHERE slug = $1 AND is_archived = FALSE",
        )
        .bind(slug)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Slugs of every published, non-archived treatment.
    pub async fn published_slugs(pool: &PgPool) -> Result<Vec<SlugStamp>, sqlx::Error> {
        sqlx::query_as::<_, SlugStamp>(
            "SELECT slug, updated_at FROM treatments
             WHERE published = TRUE AND is_archived = FALSE
             ORDER BY slug",
        )
        .fetch_all(pool)
        .await
    }
}
