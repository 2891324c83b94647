//! Property repository
//!
//! The search statement is assembled per call: each active criterion
//! contributes one predicate and everything else stays out of the text.
//! A criteria set with nothing active takes a fixed fast-path query
//! instead of walking the filter list.

use serde::Serialize;
use sqlx::{PgPool, Row};

use super::DbError;
use crate::db::plan::{QueryPlan, SqlValue};
use crate::models::SearchCriteria;

/// Property row with the synthetic review average.
///
/// `average_rating` is NULL for properties that have never been reviewed,
/// which can only appear on the filtered path (the browse query's inner
/// join drops them).
#[derive(Debug, Clone, Serialize)]
pub struct PropertyWithRating {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i64,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub average_rating: Option<f64>,
}

/// Unfiltered browse query, limit placeholder appended per call.
const BROWSE_SQL: &str = "SELECT properties.*, AVG(property_reviews.rating)::float8 AS average_rating \
     FROM properties \
     JOIN property_reviews ON property_reviews.property_id = properties.id \
     GROUP BY properties.id";

/// Base for the filtered path. LEFT JOIN so unreviewed properties still
/// reach the WHERE-level predicates.
const SEARCH_SQL: &str = "SELECT properties.*, AVG(property_reviews.rating)::float8 AS average_rating \
     FROM properties \
     LEFT JOIN property_reviews ON property_reviews.property_id = properties.id";

/// Assemble the search statement for the given criteria.
///
/// Predicates apply in a fixed order: owner, city, price range, then the
/// rating floor as HAVING after the GROUP BY. The price range requires
/// both bounds; a lone bound is dropped.
pub fn build_search(criteria: &SearchCriteria, limit: i64) -> QueryPlan {
    if criteria.is_empty() {
        let mut plan = QueryPlan::new(BROWSE_SQL);
        plan.append(" LIMIT {}", [SqlValue::Int(limit)]);
        return plan;
    }

    let mut plan = QueryPlan::new(SEARCH_SQL);

    if let Some(owner_id) = criteria.owner_id {
        plan.filter("properties.owner_id = {}", [SqlValue::Int(owner_id)]);
    }

    if let Some(city) = criteria.city() {
        plan.filter(
            "LOWER(properties.city) LIKE LOWER({})",
            [SqlValue::Text(format!("%{}%", city))],
        );
    }

    match (
        criteria.minimum_price_per_night,
        criteria.maximum_price_per_night,
    ) {
        (Some(min), Some(max)) => {
            // Bounds are in currency units; the column is cents.
            plan.filter(
                "properties.cost_per_night / 100 > {} AND properties.cost_per_night / 100 < {}",
                [SqlValue::Int(min), SqlValue::Int(max)],
            );
        }
        (None, None) => {}
        _ => {
            tracing::debug!("partial price range ignored; both bounds are required");
        }
    }

    plan.push(" GROUP BY properties.id");

    if let Some(minimum_rating) = criteria.minimum_rating {
        plan.append(
            " HAVING AVG(property_reviews.rating) >= {}",
            [SqlValue::Float(minimum_rating)],
        );
    }

    plan.push(" ORDER BY properties.cost_per_night");
    plan.append(" LIMIT {}", [SqlValue::Int(limit)]);

    plan
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search properties against the active criteria, cheapest first.
    ///
    /// A store failure is logged and masked as an empty list rather than
    /// surfaced to the caller.
    pub async fn search(&self, criteria: &SearchCriteria, limit: i64) -> Vec<PropertyWithRating> {
        match self.try_search(criteria, limit).await {
            Ok(properties) => properties,
            Err(err) => {
                tracing::error!(error = %err, "property search failed");
                Vec::new()
            }
        }
    }

    async fn try_search(
        &self,
        criteria: &SearchCriteria,
        limit: i64,
    ) -> Result<Vec<PropertyWithRating>, DbError> {
        let plan = build_search(criteria, limit);
        let rows = plan.build().fetch_all(self.pool).await?;

        let properties = rows
            .into_iter()
            .map(|r| PropertyWithRating {
                id: r.get("id"),
                owner_id: r.get("owner_id"),
                title: r.get("title"),
                description: r.get("description"),
                thumbnail_photo_url: r.get("thumbnail_photo_url"),
                cover_photo_url: r.get("cover_photo_url"),
                cost_per_night: r.get("cost_per_night"),
                parking_spaces: r.get("parking_spaces"),
                number_of_bathrooms: r.get("number_of_bathrooms"),
                number_of_bedrooms: r.get("number_of_bedrooms"),
                country: r.get("country"),
                street: r.get("street"),
                city: r.get("city"),
                province: r.get("province"),
                post_code: r.get("post_code"),
                average_rating: r.get("average_rating"),
            })
            .collect();

        Ok(properties)
    }
}
