//! Database layer - pool, schema, query plans, and repositories
//!
//! # Design notes
//!
//! - The pool is constructed by the caller and passed by reference; no
//!   process-wide connection state.
//! - Dynamic statements are assembled on a `QueryPlan`, which numbers each
//!   placeholder at the moment its value is pushed.
//! - Every call is an independent autocommit statement; this layer opens
//!   no transactions.

pub mod drafts;
pub mod migrations;
pub mod plan;
pub mod pool;
pub mod repos;

pub use drafts::{DraftProperty, DraftPropertyStore};
pub use plan::{QueryPlan, SqlValue};
pub use pool::StoreConfig;
pub use repos::*;
