use serde::{Deserialize, Serialize};

use crate::api::PublicUser;

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: PublicUser,
}

pub const LOGIN: &str = "login";
