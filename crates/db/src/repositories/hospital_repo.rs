//! Repository for the `hospitals` table.

use sqlx::PgPool;
use shifa_core::types::DbId;

use super::SlugStamp;
use crate::models::hospital::{CreateHospital, Hospital, HospitalFilter, UpdateHospital};

const COLUMNS: &str = "id, slug, name_en, name_ar, description_en, description_ar, address, \
    city, country, accreditations, languages_supported, images, seo_title_en, seo_title_ar, \
    seo_desc_en, seo_desc_ar, published, is_archived, created_at, updated_at";

pub struct HospitalRepo;

impl HospitalRepo {
    pub async fn create(pool: &PgPool, input: &CreateHospital) -> Result<Hospital, sqlx::Error> {
        let query = format!(
            "INSERT INTO hospitals (slug, name_en, name_ar, description_en, description_ar,
                address, city, country, accreditations, languages_supported, images,
                seo_title_en, seo_title_ar, seo_desc_en, seo_desc_ar, published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'India'), $9, $10, $11,
                $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hospital>(&query)
            .bind(&input.slug)
            .bind(&input.name_en)
            .bind(&input.name_ar)
            .bind(&input.description_en)
            .bind(&input.description_ar)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.country)
            .bind(&input.accreditations)
            .bind(&input.languages_supported)
            .bind(&input.images)
            .bind(&input.seo_title_en)
            .bind(&input.seo_title_ar)
            .bind(&input.seo_desc_en)
            .bind(&input.seo_desc_ar)
            .bind(input.published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<Hospital>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hospitals
             WHERE slug = $1 AND is_archived = FALSE AND ($2 = FALSE OR published = TRUE)"
        );
        sqlx::query_as::<_, Hospital>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-archived hospital by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Hospital>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hospitals WHERE id = $1 AND is_archived = FALSE");
        sqlx::query_as::<_, Hospital>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of non-archived hospitals ordered by English name. `city`
    /// matches case-insensitively.
    pub async fn list(
        pool: &PgPool,
        filter: &HospitalFilter,
    ) -> Result<(Vec<Hospital>, i64), sqlx::Error> {
        const WHERE: &str = "WHERE is_archived = FALSE
               AND ($1::bool IS NULL OR published = $1)
               AND ($2::text IS NULL OR LOWER(city) = LOWER($2))";

        let query = format!(
            "SELECT {COLUMNS} FROM hospitals {WHERE} ORDER BY name_en ASC LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, Hospital>(&query)
            .bind(filter.published)
            .bind(&filter.city)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM hospitals {WHERE}"))
            .bind(filter.published)
            .bind(&filter.city)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    pub async fn update_by_slug(
        pool: &PgPool,
        slug: &str,
        input: &UpdateHospital,
    ) -> Result<Option<Hospital>, sqlx::Error> {
        let query = format!(
            "UPDATE hospitals SET
                slug = COALESCE($2, slug),
                name_en = COALESCE($3, name_en),
                name_ar = COALESCE($4, name_ar),
                description_en = COALESCE($5, description_en),
                description_ar = COALESCE($6, description_ar),
                address = COALESCE($7, address),
                city = COALESCE($8, city),
                country = COALESCE($9, country),
                accreditations = COALESCE($10, accreditations),
                languages_supported = COALESCE($11, languages_supported),
                images = COALESCE($12, images),
                seo_title_en = COALESCE($13, seo_title_en),
                seo_title_ar = COALESCE($14, seo_title_ar),
                seo_desc_en = COALESCE($15, seo_desc_en),
                seo_desc_ar = COALESCE($16, seo_desc_ar),
                published = COALESCE($17, published)
             WHERE slug = $1 AND is_archived = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hospital>(&query)
            .bind(slug)
            .bind(&input.slug)
            .bind(&input.name_en)
            .bind(&input.name_ar)
            .bind(&input.description_en)
            .bind(&input.description_ar)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.country)
            .bind(&input.accreditations)
            .bind(&input.languages_supported)
            .bind(&input.images)
            .bind(&input.seo_title_en)
            .bind(&input.seo_title_ar)
            .bind(&input.seo_desc_en)
            .bind(&input.seo_desc_ar)
            .bind(input.published)
            .fetch_optional(pool)
            .await
    }

    pub async fn soft_delete_by_slug(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE hospitals SET is_archived = TRUE WHERE slug = $1 AND is_archived = FALSE",
        )
        .bind(slug)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn published_slugs(pool: &PgPool) -> Result<Vec<SlugStamp>, sqlx::Error> {
        sqlx::query_as::<_, SlugStamp>(
            "SELECT slug, updated_at FROM hospitals
             WHERE published = TRUE AND is_archived = FALSE
             ORDER BY slug",
        )
        .fetch_all(pool)
        .await
    }
}
