//! Repository for the `doctors` table.

use sqlx::PgPool;

use super::SlugStamp;
use crate::models::doctor::{CreateDoctor, Doctor, DoctorFilter, UpdateDoctor};

const COLUMNS: &str = "id, hospital_id, slug, name_en, name_ar, bio_en, bio_ar, qualifications, \
    specialties, languages, profile_image, consultation_fee, currency, telemedicine_available, \
    seo_title_en, seo_title_ar, seo_desc_en, seo_desc_ar, published, is_archived, \
    created_at, updated_at";

pub struct DoctorRepo;

impl DoctorRepo {
    pub async fn create(pool: &PgPool, input: &CreateDoctor) -> Result<Doctor, sqlx::Error> {
        let query = format!(
            "INSERT INTO doctors (hospital_id, slug, name_en, name_ar, bio_en, bio_ar,
                qualifications, specialties, languages, profile_image, consultation_fee,
                currency, telemedicine_available, seo_title_en, seo_title_ar, seo_desc_en,
                seo_desc_ar, published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                COALESCE($12, 'USD'), COALESCE($13, TRUE), $14, $15, $16, $17, $18)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Doctor>(&query)
            .bind(input.hospital_id)
            .bind(&input.slug)
            .bind(&input.name_en)
            .bind(&input.name_ar)
            .bind(&input.bio_en)
            .bind(&input.bio_ar)
            .bind(&input.qualifications)
            .bind(&input.specialties)
            .bind(&input.languages)
            .bind(&input.profile_image)
            .bind(input.consultation_fee)
            .bind(&input.currency)
            .bind(input.telemedicine_available)
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
    ) -> Result<Option<Doctor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM doctors
             WHERE slug = $1 AND is_archived = FALSE AND ($2 = FALSE OR published = TRUE)"
        );
        sqlx::query_as::<_, Doctor>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    /// One page of non-archived doctors ordered by English name.
    pub async fn list(
        pool: &PgPool,
        filter: &DoctorFilter,
    ) -> Result<(Vec<Doctor>, i64), sqlx::Error> {
        const WHERE: &str = "WHERE is_archived = FALSE
               AND ($1::bool IS NULL OR published = $1)
               AND ($2::bigint IS NULL OR hospital_id = $2)
               AND ($3::text IS NULL OR $3 = ANY(specialties))";

        let query = format!(
            "SELECT {COLUMNS} FROM doctors {WHERE} ORDER BY name_en ASC LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, Doctor>(&query)
            .bind(filter.published)
            .bind(filter.hospital_id)
            .bind(&filter.specialty)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM doctors {WHERE}"))
            .bind(filter.published)
            .bind(filter.hospital_id)
            .bind(&filter.specialty)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    pub async fn update_by_slug(
        pool: &PgPool,
        slug: &str,
        input: &UpdateDoctor,
    ) -> Result<Option<Doctor>, sqlx::Error> {
        let query = format!(
            "UPDATE doctors SET
                hospital_id = COALESCE($2, hospital_id),
                slug = COALESCE($3, slug),
                name_en = COALESCE($4, name_en),
                name_ar = COALESCE($5, name_ar),
                bio_en = COALESCE($6, bio_en),
                bio_ar = COALESCE($7, bio_ar),
                qualifications = COALESCE($8, qualifications),
                specialties = COALESCE($9, specialties),
                languages = COALESCE($10, languages),
                profile_image = COALESCE($11, profile_image),
                consultation_fee = COALESCE($12, consultation_fee),
                currency = COALESCE($13, currency),
                telemedicine_available = COALESCE($14, telemedicine_available),
                seo_title_en = COALESCE($15, seo_title_en),
                seo_title_ar = COALESCE($16, seo_title_ar),
                seo_desc_en = COALESCE($17, seo_desc_en),
                seo_desc_ar = COALESCE($18, seo_desc_ar),
                published = COALESCE($19, published)
             WHERE slug = $1 AND is_archived = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Doctor>(&query)
            .bind(slug)
            .bind(input.hospital_id)
            .bind(&input.slug)
            .bind(&input.name_en)
            .bind(&input.name_ar)
            .bind(&input.bio_en)
            .bind(&input.bio_ar)
            .bind(&input.qualifications)
            .bind(&input.specialties)
            .bind(&input.languages)
            .bind(&input.profile_image)
            .bind(input.consultation_fee)
            .bind(&input.currency)
            .bind(input.telemedicine_available)
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
            "UPDATE doctors SET is_archived = TRUE WHERE slug = $1 AND is_archived = FALSE",
        )
        .bind(slug)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn published_slugs(pool: &PgPool) -> Result<Vec<SlugStamp>, sqlx::Error> {
        sqlx::query_as::<_, SlugStamp>(
            "SELECT slug, updated_at FROM doctors
             WHERE published = TRUE AND is_archived = FALSE
             ORDER BY slug",
        )
        .fetch_all(pool)
        .await
    }
}
