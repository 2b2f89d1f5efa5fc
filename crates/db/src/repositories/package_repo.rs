//! Repository for the `packages` table.

use sqlx::PgPool;

use super::SlugStamp;
use crate::models::package::{CreatePackage, Package, PackageFilter, UpdatePackage};

const COLUMNS: &str = "id, slug, name_en, name_ar, description_en, description_ar, price, \
    currency, features, published, is_archived, created_at, updated_at";

pub struct PackageRepo;

impl PackageRepo {
    pub async fn create(pool: &PgPool, input: &CreatePackage) -> Result<Package, sqlx::Error> {
        let query = format!(
            "INSERT INTO packages (slug, name_en, name_ar, description_en, description_ar,
                price, currency, features, published)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'USD'), $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Package>(&query)
            .bind(&input.slug)
            .bind(&input.name_en)
            .bind(&input.name_ar)
            .bind(&input.description_en)
            .bind(&input.description_ar)
            .bind(input.price)
            .bind(&input.currency)
            .bind(&input.features)
            .bind(input.published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<Package>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM packages
             WHERE slug = $1 AND is_archived = FALSE AND ($2 = FALSE OR published = TRUE)"
        );
        sqlx::query_as::<_, Package>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    /// One page of non-archived packages, cheapest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PackageFilter,
    ) -> Result<(Vec<Package>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM packages
             WHERE is_archived = FALSE AND ($1::bool IS NULL OR published = $1)
             ORDER BY price ASC NULLS LAST, id ASC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Package>(&query)
            .bind(filter.published)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM packages
             WHERE is_archived = FALSE AND ($1::bool IS NULL OR published = $1)",
        )
        .bind(filter.published)
        .fetch_one(pool)
        .await?;

        Ok((rows, total))
    }

    pub async fn update_by_slug(
        pool: &PgPool,
        slug: &str,
        input: &UpdatePackage,
    ) -> Result<Option<Package>, sqlx::Error> {
        let query = format!(
            "UPDATE packages SET
                slug = COALESCE($2, slug),
                name_en = COALESCE($3, name_en),
                name_ar = COALESCE($4, name_ar),
                description_en = COALESCE($5, description_en),
                description_ar = COALESCE($6, description_ar),
                price = COALESCE($7, price),
                currency = COALESCE($8, currency),
                features = COALESCE($9, features),
                published = COALESCE($10, published)
             WHERE slug = $1 AND is_archived = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Package>(&query)
            .bind(slug)
            .bind(&input.slug)
            .bind(&input.name_en)
            .bind(&input.name_ar)
            .bind(&input.description_en)
            .bind(&input.description_ar)
            .bind(input.price)
            .bind(&input.currency)
            .bind(&input.features)
            .bind(input.published)
            .fetch_optional(pool)
            .await
    }

    pub async fn soft_delete_by_slug(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE packages SET is_archived = TRUE WHERE slug = $1 AND is_archived = FALSE",
        )
        .bind(slug)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn published_slugs(pool: &PgPool) -> Result<Vec<SlugStamp>, sqlx::Error> {
        sqlx::query_as::<_, SlugStamp>(
            "SELECT slug, updated_at FROM packages
             WHERE published = TRUE AND is_archived = FALSE
             ORDER BY slug",
        )
        .fetch_all(pool)
        .await
    }
}
