use db::models::user::StoreConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct InitiateRegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRegisterRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued on successful verification or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub username: String,
    pub store_config: StoreConfig,
}
