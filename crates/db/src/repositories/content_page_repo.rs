//! Repository for the `content_pages` table.

use sqlx::PgPool;

use super::SlugStamp;
use crate::models::content_page::{
    BlogFeedRow, ContentPage, ContentPageFilter, CreateContentPage, UpdateContentPage,
    CONTENT_TYPE_BLOG,
};

const COLUMNS: &str = "id, slug, type, title_en, title_ar, excerpt_en, excerpt_ar, blocks_en, \
    blocks_ar, featured_image, author, seo_title_en, seo_title_ar, seo_desc_en, seo_desc_ar, \
    published, published_at, scheduled_for, is_archived, created_at, updated_at";

pub struct ContentPageRepo;

impl ContentPageRepo {
    /// Insert a page. `published_at` is stamped when the page is created
    /// already published.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContentPage,
    ) -> Result<ContentPage, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_pages (slug, type, title_en, title_ar, excerpt_en, excerpt_ar,
                blocks_en, blocks_ar, featured_image, author, seo_title_en, seo_title_ar,
                seo_desc_en, seo_desc_ar, published, published_at, scheduled_for)
             VALUES ($1, COALESCE($2, 'page'), $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, CASE WHEN $15 THEN NOW() END, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentPage>(&query)
            .bind(&input.slug)
            .bind(&input.page_type)
            .bind(&input.title_en)
            .bind(&input.title_ar)
            .bind(&input.excerpt_en)
            .bind(&input.excerpt_ar)
            .bind(&input.blocks_en)
            .bind(&input.blocks_ar)
            .bind(&input.featured_image)
            .bind(&input.author)
            .bind(&input.seo_title_en)
            .bind(&input.seo_title_ar)
            .bind(&input.seo_desc_en)
            .bind(&input.seo_desc_ar)
            .bind(input.published)
            .bind(input.scheduled_for)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<ContentPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_pages
             WHERE slug = $1 AND is_archived = FALSE AND ($2 = FALSE OR published = TRUE)"
        );
        sqlx::query_as::<_, ContentPage>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    /// One page of non-archived content of a single type, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ContentPageFilter,
    ) -> Result<(Vec<ContentPage>, i64), sqlx::Error> {
        const WHERE: &str = "WHERE is_archived = FALSE
               AND type = $1
               AND ($2::bool IS NULL OR published = $2)";

        let query = format!(
            "SELECT {COLUMNS} FROM content_pages {WHERE}
             ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, ContentPage>(&query)
            .bind(&filter.page_type)
            .bind(filter.published)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM content_pages {WHERE}"))
                .bind(&filter.page_type)
                .bind(filter.published)
                .fetch_one(pool)
                .await?;

        Ok((rows, total))
    }

    /// Partial update. The first transition to published stamps
    /// `published_at`; later edits keep the original stamp.
    pub async fn update_by_slug(
        pool: &PgPool,
        slug: &str,
        input: &UpdateContentPage,
    ) -> Result<Option<ContentPage>, sqlx::Error> {
        let query = format!(
            "UPDATE content_pages SET
                slug = COALESCE($2, slug),
                type = COALESCE($3, type),
                title_en = COALESCE($4, title_en),
                title_ar = COALESCE($5, title_ar),
                excerpt_en = COALESCE($6, excerpt_en),
                excerpt_ar = COALESCE($7, excerpt_ar),
                blocks_en = COALESCE($8, blocks_en),
                blocks_ar = COALESCE($9, blocks_ar),
                featured_image = COALESCE($10, featured_image),
                author = COALESCE($11, author),
                seo_title_en = COALESCE($12, seo_title_en),
                seo_title_ar = COALESCE($13, seo_title_ar),
                seo_desc_en = COALESCE($14, seo_desc_en),
                seo_desc_ar = COALESCE($15, seo_desc_ar),
                published = COALESCE($16, published),
                published_at = CASE
                    WHEN $16 = TRUE AND published_at IS NULL THEN NOW()
                    ELSE published_at
                END,
                scheduled_for = COALESCE($17, scheduled_for)
             WHERE slug = $1 AND is_archived = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentPage>(&query)
            .bind(slug)
            .bind(&input.slug)
            .bind(&input.page_type)
            .bind(&input.title_en)
            .bind(&input.title_ar)
            .bind(&input.excerpt_en)
            .bind(&input.excerpt_ar)
            .bind(&input.blocks_en)
            .bind(&input.blocks_ar)
            .bind(&input.featured_image)
            .bind(&input.author)
            .bind(&input.seo_title_en)
            .bind(&input.seo_title_ar)
            .bind(&input.seo_desc_en)
            .bind(&input.seo_desc_ar)
            .bind(input.published)
            .bind(input.scheduled_for)
            .fetch_optional(pool)
            .await
    }

    pub async fn soft_delete_by_slug(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE content_pages SET is_archived = TRUE WHERE slug = $1 AND is_archived = FALSE",
        )
        .bind(slug)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Newest published blog posts for the RSS feed.
    pub async fn published_blog_feed(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<BlogFeedRow>, sqlx::Error> {
        sqlx::query_as::<_, BlogFeedRow>(
            "SELECT slug, title_en, title_ar, seo_desc_en, seo_desc_ar, excerpt_en, excerpt_ar,
                    created_at
             FROM content_pages
             WHERE type = $1 AND published = TRUE AND is_archived = FALSE
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(CONTENT_TYPE_BLOG)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn published_blog_slugs(pool: &PgPool) -> Result<Vec<SlugStamp>, sqlx::Error> {
        sqlx::query_as::<_, SlugStamp>(
            "SELECT slug, updated_at FROM content_pages
             WHERE type = $1 AND published = TRUE AND is_archived = FALSE
             ORDER BY slug",
        )
        .bind(CONTENT_TYPE_BLOG)
        .fetch_all(pool)
        .await
    }
}
