//! stayfinder-db: data access for the StayFinder rental platform
//!
//! Builds and executes the SQL behind user lookup, reservation listing,
//! and filtered property search. The embedding application owns the
//! connection pool and hands it to the repositories here; this crate has
//! no global state and no HTTP surface.
//!
//! ```ignore
//! use stayfinder_db::{PropertyRepo, SearchCriteria, StoreConfig};
//!
//! let pool = StoreConfig::default().connect().await?;
//! stayfinder_db::db::migrations::run(&pool).await?;
//!
//! let criteria = SearchCriteria {
//!     city: Some("austin".to_string()),
//!     ..Default::default()
//! };
//! let results = PropertyRepo::new(&pool).search(&criteria, 10).await;
//! ```

pub mod db;
pub mod models;

pub use db::drafts::{DraftProperty, DraftPropertyStore};
pub use db::pool::StoreConfig;
pub use db::repos::{
    DbError, GuestReservation, PropertyRepo, PropertyWithRating, ReservationRepo, User, UserRepo,
    DEFAULT_LIMIT,
};
pub use models::{NewProperty, NewUser, SearchCriteria};
