//! User insertion input

use serde::Deserialize;

/// A signup as received from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}
