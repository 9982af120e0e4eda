use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::models::config::SmtpConfig;
use crate::notify::{Mailer, NotifyError};

/// SMTP transport for notification email.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(smtp: &SmtpConfig, from: &str) -> Result<Self, NotifyError> {
        let builder = if smtp.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
                .map_err(|e| NotifyError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
        };
        let mut builder = builder.port(smtp.port);
        if let (Some(user), Some(password)) = (&smtp.username, &smtp.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        let from = from
            .parse()
            .map_err(|_| NotifyError::InvalidAddress(from.to_string()))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &[String], subject: &str, html: String) -> Result<(), NotifyError> {
        let mut builder = Message::builder().from(self.from.clone()).subject(subject);

        let mut any_recipient = false;
        for address in to {
            match address.parse::<Mailbox>() {
                Ok(mailbox) => {
                    builder = builder.to(mailbox);
                    any_recipient = true;
                }
                Err(_) => log::warn!("Skipping invalid notification recipient: {address}"),
            }
        }
        if !any_recipient {
            return Err(NotifyError::InvalidAddress(
                "no valid recipient addresses".to_string(),
            ));
        }

        let message = builder
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(())
    }
}
