use anyhow::{Context, Result};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::SmtpConfig;

/// Outbound email relay. When SMTP is disabled in config the reset link is
/// logged instead of sent, so local development never needs a mail server.
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    reset_url_base: String,
}

impl Mailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let transport = if config.enabled {
            let builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .context("Failed to build SMTP transport")?
                .port(config.port)
                .credentials(Credentials::new(
                    config.username.clone(),
                    config.password.clone(),
                ));
            Some(builder.build())
        } else {
            None
        };

        Ok(Self {
            transport,
            from: config.from.clone(),
            reset_url_base: config.reset_url_base.clone(),
        })
    }

    pub async fn send_password_reset(&self, to: &str, token: &str) -> Result<()> {
        let reset_link = format!("{}/{}", self.reset_url_base.trim_end_matches('/'), token);

        let Some(transport) = &self.transport else {
            info!("SMTP disabled; password reset link for {to}: {reset_link}");
            return Ok(());
        };

        let email = Message::builder()
            .from(self.from.parse().context("Invalid from address")?)
            .to(to.parse().context("Invalid recipient address")?)
            .subject("Reset your password")
            .body(format!(
                "A password reset was requested for your account.\n\n\
                 Open the link below within one hour to choose a new password:\n\n\
                 {reset_link}\n\n\
                 If you did not request this, you can ignore this email."
            ))
            .context("Failed to build reset email")?;

        transport
            .send(email)
            .await
            .context("Failed to send reset email")?;

        info!("Password reset email sent to {to}");
        Ok(())
    }
}
