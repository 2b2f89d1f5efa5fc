//! Repository for the `bookings` table.

use sqlx::PgPool;
use shifa_core::booking::BookingStatus;
use shifa_core::types::DbId;

use crate::models::booking::{
    Booking, BookingChanges, BookingFilter, BookingWithRefs, CreateBooking,
};

const COLUMNS: &str = "id, patient_name, email, phone, country_of_origin, locale, treatment_id, \
    hospital_id, doctor_id, package_id, preferred_dates, notes, admin_notes, status, \
    confirmed_at, completed_at, is_archived, created_at, updated_at";

/// Booking columns qualified with `b.` plus the referenced display names.
const JOINED_SELECT: &str = "SELECT b.id, b.patient_name, b.email, b.phone, b.country_of_origin,
        b.locale, b.treatment_id, b.hospital_id, b.doctor_id, b.package_id, b.preferred_dates,
        b.notes, b.admin_notes, b.status, b.confirmed_at, b.completed_at, b.is_archived,
        b.created_at, b.updated_at,
        t.title_en AS treatment_title_en,
        h.name_en AS hospital_name_en,
        d.name_en AS doctor_name_en,
        p.name_en AS package_name_en
     FROM bookings b
     LEFT JOIN treatments t ON t.id = b.treatment_id
     LEFT JOIN hospitals h ON h.id = b.hospital_id
     LEFT JOIN doctors d ON d.id = b.doctor_id
     LEFT JOIN packages p ON p.id = b.package_id";

pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new lead. The status is always `LEAD`.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (patient_name, email, phone, country_of_origin, locale,
                treatment_id, hospital_id, doctor_id, package_id, preferred_dates, notes, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(&input.patient_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.country_of_origin)
            .bind(&input.locale)
            .bind(input.treatment_id)
            .bind(input.hospital_id)
            .bind(input.doctor_id)
            .bind(input.package_id)
            .bind(&input.preferred_dates)
            .bind(&input.notes)
            .bind(BookingStatus::Lead.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM bookings WHERE id = $1 AND is_archived = FALSE");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A booking with the names of its treatment, hospital, doctor and package.
    pub async fn find_with_refs(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookingWithRefs>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} WHERE b.id = $1 AND b.is_archived = FALSE");
        sqlx::query_as::<_, BookingWithRefs>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest first. `country` matches `country_of_origin` case-insensitively.
    pub async fn list(
        pool: &PgPool,
        filter: &BookingFilter,
    ) -> Result<(Vec<BookingWithRefs>, i64), sqlx::Error> {
        const WHERE: &str = "WHERE b.is_archived = FALSE
               AND ($1::text IS NULL OR b.status = $1)
               AND ($2::text IS NULL OR LOWER(b.country_of_origin) = LOWER($2))
               AND ($3::bigint IS NULL OR b.treatment_id = $3)";

        let query = format!(
            "{JOINED_SELECT} {WHERE} ORDER BY b.created_at DESC, b.id DESC LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, BookingWithRefs>(&query)
            .bind(&filter.status)
            .bind(&filter.country)
            .bind(filter.treatment_id)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM bookings b {WHERE}"))
                .bind(&filter.status)
                .bind(&filter.country)
                .bind(filter.treatment_id)
                .fetch_one(pool)
                .await?;

        Ok((rows, total))
    }

    /// Apply resolved changes. `None` keeps the stored value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &BookingChanges,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET
                status = COALESCE($2, status),
                confirmed_at = COALESCE($3, confirmed_at),
                completed_at = COALESCE($4, completed_at),
                admin_notes = COALESCE($5, admin_notes),
                treatment_id = COALESCE($6, treatment_id),
                hospital_id = COALESCE($7, hospital_id),
                doctor_id = COALESCE($8, doctor_id),
                package_id = COALESCE($9, package_id),
                preferred_dates = COALESCE($10, preferred_dates)
             WHERE id = $1 AND is_archived = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(&changes.status)
            .bind(changes.confirmed_at)
            .bind(changes.completed_at)
            .bind(&changes.admin_notes)
            .bind(changes.treatment_id)
            .bind(changes.hospital_id)
            .bind(changes.doctor_id)
            .bind(changes.package_id)
            .bind(&changes.preferred_dates)
            .fetch_optional(pool)
            .await
    }

    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE bookings SET is_archived = TRUE WHERE id = $1 AND is_archived = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
