use chrono::{Duration, NaiveDateTime, Utc};
use common::{
    env_config::Config,
    error::{AppError, Res},
    jwt::{self, ClaimsSpec},
    password,
};
use db::{dtos::user::RegistrationUpsert, models::user::User};
use mailer::Mailer;
use rand::Rng;
use sqlx::PgPool;

use crate::dtos::auth::{AuthResponse, InitiateRegisterRequest, LoginRequest, VerifyRegisterRequest};

/// How long a one-time code stays usable.
const OTP_VALIDITY_MINUTES: i64 = 5;

/// Starts (or restarts) a registration.
///
/// A verified user already holding the email or username is a conflict.
/// An unverified match gets fresh credentials and a fresh code; anything
/// else becomes a new unverified row. OTP delivery failure is logged,
/// never surfaced: the code can be re-requested by initiating again.
///
/// # Arguments
///
/// * `pool` - A reference to the database connection pool.
/// * `mailer` - The OTP delivery channel.
/// * `req` - The registration data.
pub async fn initiate_registration(
    pool: &PgPool,
    mailer: &Mailer,
    req: &InitiateRegisterRequest,
) -> Res<()> {
    validate_registration(req)?;

    let existing = db::user::find_by_email_or_username(pool, &req.email, &req.username).await?;
    if let Some(user) = &existing {
        if user.verified {
            return Err(AppError::AlreadyExists("User already exists".to_string()));
        }
    }

    let otp = generate_otp();
    let password_hash = password::hash_password(&req.password)?;
    let otp_expires = Utc::now().naive_utc() + Duration::minutes(OTP_VALIDITY_MINUTES);

    match existing {
        Some(user) => {
            db::user::refresh_registration(pool, user.id, &password_hash, &otp, otp_expires)
                .await?;
        }
        None => {
            db::user::insert_unverified(
                pool,
                RegistrationUpsert {
                    username: req.username.clone(),
                    email: req.email.clone(),
                    password_hash,
                    otp: otp.clone(),
                    otp_expires,
                },
            )
            .await?;
        }
    }

    if let Err(error) = mailer.send_otp(&req.email, &otp).await {
        log::error!("Failed to deliver OTP to {}: {}", req.email, error);
    }

    Ok(())
}

/// Confirms a pending registration with the emailed code.
///
/// Rejects with `InvalidOtp` unless the user exists, the code matches and
/// the stored expiry is still in the future. On success the user is
/// promoted to verified (terminal state), the OTP fields are cleared and
/// a session token is issued.
pub async fn verify_registration(
    pool: &PgPool,
    config: &Config,
    req: &VerifyRegisterRequest,
) -> Res<AuthResponse> {
    let now = Utc::now().naive_utc();
    let user = match db::user::find_by_email(pool, &req.email).await? {
        Some(user) if otp_is_valid(user.otp.as_deref(), user.otp_expires, &req.otp, now) => user,
        _ => return Err(AppError::InvalidOtp("Invalid or expired OTP".to_string())),
    };

    let user = db::user::mark_verified(pool, user.id).await?;
    auth_response(user, config)
}

/// Authenticates an existing verified user with username and password.
///
/// # Arguments
///
/// * `pool` - A reference to the database connection pool.
/// * `config` - The application configuration (JWT settings).
/// * `req` - The login data.
///
/// # Returns
///
/// A `Result` containing the `AuthResponse` or an `AppError` if the user
/// is unknown, unverified, or the password does not match.
pub async fn login(pool: &PgPool, config: &Config, req: &LoginRequest) -> Res<AuthResponse> {
    let user = db::user::find_by_username(pool, &req.username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !user.verified {
        return Err(AppError::NotVerified("Account not verified".to_string()));
    }

    if !password::password_matches(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    auth_response(user, config)
}

fn auth_response(user: User, config: &Config) -> Res<AuthResponse> {
    let token = jwt::generate_jwt(ClaimsSpec { user_id: user.id }, &config.jwt_config)?;
    Ok(AuthResponse {
        token,
        email: user.email,
        username: user.username,
        store_config: user.store_config.0,
    })
}

fn validate_registration(req: &InitiateRegisterRequest) -> Res<()> {
    if req.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    if !req.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }
    Ok(())
}

/// Six decimal digits, never with a leading zero.
fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

/// A code is only good when it matches the stored one and the expiry has
/// not passed. No stored code means nothing to verify against.
fn otp_is_valid(
    stored: Option<&str>,
    expires: Option<NaiveDateTime>,
    supplied: &str,
    now: NaiveDateTime,
) -> bool {
    stored == Some(supplied) && expires.is_some_and(|t| t > now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_has_six_digits() {
        for _ in 0..32 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn matching_unexpired_otp_is_valid() {
        let now = Utc::now().naive_utc();
        assert!(otp_is_valid(
            Some("123456"),
            Some(now + Duration::minutes(3)),
            "123456",
            now
        ));
    }

    #[test]
    fn expired_otp_is_rejected_even_when_correct() {
        let now = Utc::now().naive_utc();
        assert!(!otp_is_valid(
            Some("123456"),
            Some(now - Duration::seconds(1)),
            "123456",
            now
        ));
    }

    #[test]
    fn wrong_or_absent_otp_is_rejected() {
        let now = Utc::now().naive_utc();
        let expires = Some(now + Duration::minutes(3));
        assert!(!otp_is_valid(Some("123456"), expires, "654321", now));
        assert!(!otp_is_valid(None, expires, "123456", now));
        assert!(!otp_is_valid(Some("123456"), None, "123456", now));
    }
}
