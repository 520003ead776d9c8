//! SMTP delivery via Lettre.

use crate::error::MailError;
use crate::message::OutgoingEmail;
use crate::transport::Mailer;
use crate::Result;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Body, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// SMTP connection settings.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    /// SMTP server address, e.g. `smtp.gmail.com`.
    pub host: String,
    /// SMTP server port (usually 587 for TLS, 465 for SSL).
    pub port: u16,
    /// Authentication username.
    pub username: String,
    /// Authentication password.
    pub password: String,
}

/// Production mailer: sends real email over SMTP.
///
/// A fresh transport is built per send to avoid connection pooling
/// issues; delivery runs on the blocking pool so the async worker is not
/// stalled by SMTP round-trips.
#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Credentials,
}

impl SmtpMailer {
    /// Create an SMTP mailer from connection settings.
    #[must_use]
    pub fn new(config: SmtpConfig) -> Self {
        let credentials = Credentials::new(config.username, config.password);
        Self {
            host: config.host,
            port: config.port,
            credentials,
        }
    }

    fn build_transport(&self) -> Result<SmtpTransport> {
        let builder = SmtpTransport::relay(&self.host)
            .map_err(|e| MailError::Transport(format!("SMTP relay error: {e}")))?;
        Ok(builder
            .port(self.port)
            .credentials(self.credentials.clone())
            .build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let message = compose(email)?;
        let transport = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            transport
                .send(&message)
                .map(|_| ())
                .map_err(|e| MailError::Transport(e.to_string()))
        })
        .await
        .map_err(|e| MailError::Transport(format!("send task failed: {e}")))?
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address.parse().map_err(|e| MailError::InvalidAddress {
        address: address.to_string(),
        reason: format!("{e}"),
    })
}

/// Assemble the MIME message: multipart/alternative of text and HTML,
/// wrapped in multipart/related when an inline image is attached.
pub(crate) fn compose(email: &OutgoingEmail) -> Result<Message> {
    let mut builder = Message::builder()
        .from(parse_mailbox(&email.from)?)
        .subject(&email.subject);

    for to in &email.to {
        builder = builder.to(parse_mailbox(to)?);
    }
    for cc in &email.cc {
        builder = builder.cc(parse_mailbox(cc)?);
    }

    let alternative =
        MultiPart::alternative_plain_html(email.text_body.clone(), email.html_body.clone());

    let body = match &email.inline_image {
        Some(image) => {
            let content_type = ContentType::parse(&image.content_type)
                .map_err(|e| MailError::Build(format!("bad image content type: {e}")))?;
            let part = Attachment::new_inline(image.content_id.clone())
                .body(Body::new(image.bytes.clone()), content_type);
            MultiPart::related().multipart(alternative).singlepart(part)
        }
        None => alternative,
    };

    builder
        .multipart(body)
        .map_err(|e| MailError::Build(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::message::InlineImage;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            subject: "Booking Received: Serengeti Safari Week - Toss & Trips".to_string(),
            text_body: "Thank you for booking with us.".to_string(),
            html_body: "<html><body><p>Thank you for booking with us.</p></body></html>"
                .to_string(),
            from: "noreply@tossntrips.com".to_string(),
            to: vec!["asha@example.com".to_string()],
            cc: vec!["bookings@tossntrips.com".to_string()],
            inline_image: None,
        }
    }

    #[test]
    fn compose_plain_message() {
        let message = compose(&email()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Booking Received"));
        assert!(raw.contains("To: asha@example.com"));
        assert!(raw.contains("Cc: bookings@tossntrips.com"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[test]
    fn compose_with_inline_logo() {
        let mut mail = email();
        mail.inline_image = Some(InlineImage {
            content_id: "logo".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        });
        let message = compose(&mail).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("multipart/related"));
        assert!(raw.contains("Content-ID: <logo>"));
    }

    #[test]
    fn compose_rejects_bad_address() {
        let mut mail = email();
        mail.to = vec!["not an address".to_string()];
        assert!(matches!(
            compose(&mail),
            Err(MailError::InvalidAddress { .. })
        ));
    }
}
