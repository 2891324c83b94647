//! Schema setup for the tables this layer reads and writes

use sqlx::PgPool;

use crate::db::repos::DbError;

/// Create the users, properties, reservations, and review tables.
///
/// Safe to run on every startup; every statement is IF NOT EXISTS.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running store migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS properties (
            id BIGSERIAL PRIMARY KEY,
            owner_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            thumbnail_photo_url TEXT NOT NULL DEFAULT '',
            cover_photo_url TEXT NOT NULL DEFAULT '',
            cost_per_night BIGINT NOT NULL,
            parking_spaces INTEGER NOT NULL DEFAULT 0,
            number_of_bathrooms INTEGER NOT NULL DEFAULT 0,
            number_of_bedrooms INTEGER NOT NULL DEFAULT 0,
            country TEXT NOT NULL,
            street TEXT NOT NULL,
            city TEXT NOT NULL,
            province TEXT NOT NULL,
            post_code TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id BIGSERIAL PRIMARY KEY,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            property_id BIGINT NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
            guest_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS property_reviews (
            id BIGSERIAL PRIMARY KEY,
            guest_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            property_id BIGINT NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
            reservation_id BIGINT NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
            rating SMALLINT NOT NULL,
            message TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Store migrations complete");
    Ok(())
}
