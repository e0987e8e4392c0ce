use std::sync::Arc;

use actix_web::{Responder, post, web};
use common::env_config::Config;
use common::error::Res;
use common::http::Success;
use mailer::Mailer;
use sqlx::PgPool;

use crate::dtos::auth::{InitiateRegisterRequest, LoginRequest, VerifyRegisterRequest};
use crate::services;

/// Starts a registration and emails a one-time verification code.
///
/// # Input
/// - `req`: JSON payload containing email, username and password
/// - `pool`: Database connection pool
/// - `mailer`: OTP delivery channel
///
/// # Output
/// - Success: `{"message": "OTP sent"}`; the account stays unverified
///   until the code is confirmed
/// - Error: Returns 409 Conflict when a verified user already holds the
///   email or username
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/initiate-register', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json'
///   },
///   body: JSON.stringify({
///     email: 'owner@example.com',
///     username: 'owner',
///     password: 'securepassword'
///   })
/// });
///
/// if (response.ok) {
///   // Show the OTP entry form next
/// }
/// ```
#[post("/initiate-register")]
pub async fn post_initiate_register(
    req: web::Json<InitiateRegisterRequest>,
    pool: web::Data<Arc<PgPool>>,
    mailer: web::Data<Mailer>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    services::auth::initiate_registration(pg_pool, &mailer, &req.into_inner()).await?;
    Success::message("OTP sent")
}

/// Confirms the emailed code and issues the first session token.
///
/// # Input
/// - `req`: JSON payload containing email and the 6-digit code
///
/// # Output
/// - Success: `{token, email, username, storeConfig}`
/// - Error: Returns 400 Bad Request when the code is wrong or expired
#[post("/verify-register")]
pub async fn post_verify_register(
    req: web::Json<VerifyRegisterRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let auth = services::auth::verify_registration(pg_pool, &config, &req.into_inner()).await?;
    Success::ok(auth)
}

/// Authenticates a user with username and password.
///
/// # Input
/// - `login_data`: JSON payload containing username and password
///
/// # Output
/// - Success: `{token, email, username, storeConfig}` with a token
///   valid for 24 hours
/// - Error: 404 for an unknown username, 403 before OTP verification,
///   401 for a wrong password
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/login', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json'
///   },
///   body: JSON.stringify({
///     username: 'owner',
///     password: 'securepassword'
///   })
/// });
///
/// if (response.ok) {
///   const authData = await response.json();
///   // Store token for authenticated requests
///   localStorage.setItem('authToken', authData.token);
/// }
/// ```
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let auth = services::auth::login(pg_pool, &config, &login_data.into_inner()).await?;
    Success::ok(auth)
}
