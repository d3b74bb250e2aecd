/// User domain type
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// User account (credentials live outside this system)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login name, unique
    pub username: String,

    /// Display name
    pub fullname: String,
}

/// Data for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub fullname: String,
}
