use chrono::NaiveDateTime;

pub struct RegistrationUpsert {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub otp: String,
    pub otp_expires: NaiveDateTime,
}
