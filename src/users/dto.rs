use serde::{Deserialize, Serialize};

use crate::users::repo::User;

/// Request body for user creation.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Public part of the user returned to clients. The password hash never
/// appears here.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Response for the internal verification route.
#[derive(Debug, Serialize)]
pub struct VerifiedUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub verified: bool,
}

impl From<User> for VerifiedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            verified: true,
        }
    }
}

/// Request body for the internal batch route. A missing `user_ids` field is
/// treated as an empty list.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub user_ids: Vec<i64>,
}
