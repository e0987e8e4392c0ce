use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use common::env_config::SmtpConfig;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
}

/// Delivery channel for one-time verification codes.
///
/// Built once at startup and cloned into the worker threads. Without SMTP
/// credentials the transport stays unset and `send_otp` logs the code
/// instead of sending it, so registration works out of the box in
/// development.
#[derive(Clone)]
pub struct Mailer {
    from_address: String,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl Mailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = if config.is_configured() {
            Some(
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
                    .credentials(Credentials::new(
                        config.username.clone(),
                        config.password.clone(),
                    ))
                    .build(),
            )
        } else {
            None
        };
        Ok(Mailer {
            from_address: config.from_address.clone(),
            transport,
        })
    }

    pub async fn send_otp(&self, to: &str, otp: &str) -> Result<(), MailError> {
        let transport = match &self.transport {
            Some(transport) => transport,
            None => {
                log::info!("[DEV MODE] OTP for {}: {}", to, otp);
                return Ok(());
            }
        };

        let email = Message::builder()
            .from(self.from_address.parse::<Mailbox>()?)
            .to(to.parse::<Mailbox>()?)
            .subject("Verification Code")
            .header(ContentType::TEXT_HTML)
            .body(format!(
                "<h2>Your OTP is: {}</h2><p>Valid for 5 minutes.</p>",
                otp
            ))?;

        transport.send(email).await?;
        Ok(())
    }
}
