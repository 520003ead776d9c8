//! The job handler: load, price, render, compose, send.

use crate::config::PipelineConfig;
use crate::context::BookingEmailContext;
use crate::job::Job;
use crate::render;
use crate::source::BookingSource;
use async_trait::async_trait;
use thiserror::Error;
use tnt_core::ids::{ContactMessageId, VisitingId};
use tnt_core::PricingPolicy;
use tnt_mailer::{InlineImage, Mailer, OutgoingEmail};
use tnt_queue::{JobHandler, TaskOutcome};
use tracing::{error, info, warn};

/// Content id the HTML references for the inline brand logo.
const LOGO_CONTENT_ID: &str = "logo";

/// How one attempt failed.
#[derive(Debug, Error)]
enum AttemptError {
    /// The record no longer exists — terminal, never retried.
    #[error("{0}")]
    Gone(String),

    /// Anything else — handed to the worker's retry policy.
    #[error(transparent)]
    Retryable(#[from] anyhow::Error),
}

/// Executes [`Job`]s against a [`BookingSource`] and a [`Mailer`].
///
/// Stateless between invocations; every attempt re-reads the database,
/// so redelivered or retried jobs send current data.
pub struct ConfirmationPipeline<S, M> {
    source: S,
    mailer: M,
    config: PipelineConfig,
    pricing: PricingPolicy,
}

impl<S: BookingSource, M: Mailer + 'static> ConfirmationPipeline<S, M> {
    /// Create the handler.
    #[must_use]
    pub fn new(source: S, mailer: M, config: PipelineConfig, pricing: PricingPolicy) -> Self {
        Self {
            source,
            mailer,
            config,
            pricing,
        }
    }

    /// One attempt of the booking-confirmation email.
    async fn booking_confirmation(&self, id: VisitingId) -> Result<String, AttemptError> {
        let view = self
            .source
            .confirmation_view(id)
            .await?
            .ok_or_else(|| AttemptError::Gone(format!("visiting {id} not found")))?;

        info!(
            visiting_id = %id,
            traveller = %view.traveller.name,
            tour = %view.tour.title,
            "booking loaded for confirmation email"
        );

        // The count is optional and its read failure must not abort the
        // email — fall back to the default breakdown.
        let count = match self.source.traveller_count(view.traveller.id).await {
            Ok(count) => count,
            Err(err) => {
                warn!(
                    traveller_id = %view.traveller.id,
                    error = %err,
                    "traveller count unreadable, using fallback breakdown"
                );
                None
            }
        };

        let context = BookingEmailContext::build(&view, count, self.pricing, &self.config.company);
        let html = render::booking_confirmation(&context);
        let text = render::strip_tags(&html);

        let subject = format!(
            "Booking Received: {} - {}",
            view.tour.title, self.config.company.name
        );
        let email = OutgoingEmail {
            subject,
            text_body: text,
            html_body: html,
            from: self.config.from_email.clone(),
            to: vec![view.traveller.email.clone()],
            cc: self.config.operator_email.iter().cloned().collect(),
            inline_image: self.load_logo().await,
        };

        self.mailer.send(&email).await.map_err(anyhow::Error::from)?;
        metrics::counter!("emails.booking_confirmation.sent").increment(1);

        Ok(format!(
            "Email sent successfully to {}",
            view.traveller.email
        ))
    }

    /// One attempt of the contact thank-you email.
    async fn contact_thank_you(&self, id: ContactMessageId) -> Result<String, AttemptError> {
        let message = self
            .source
            .contact_message(id)
            .await?
            .ok_or_else(|| AttemptError::Gone(format!("contact message {id} not found")))?;

        let html = render::contact_thank_you(
            &message,
            &self.config.company.name,
            &self.config.company.url,
        );
        let text = render::strip_tags(&html);

        let email = OutgoingEmail {
            subject: format!("Thank you for contacting {}", self.config.company.name),
            text_body: text,
            html_body: html,
            from: self.config.from_email.clone(),
            to: vec![message.email.clone()],
            cc: self.config.operator_email.iter().cloned().collect(),
            inline_image: None,
        };

        self.mailer.send(&email).await.map_err(anyhow::Error::from)?;
        metrics::counter!("emails.contact_thank_you.sent").increment(1);

        Ok(format!("Thank-you email sent to {}", message.email))
    }

    /// Read the brand logo from the assets directory; a missing file is
    /// non-fatal.
    async fn load_logo(&self) -> Option<InlineImage> {
        let path = self.config.assets_dir.join("logo.png");
        match tokio::fs::read(&path).await {
            Ok(bytes) => Some(InlineImage {
                content_id: LOGO_CONTENT_ID.to_string(),
                content_type: "image/png".to_string(),
                bytes,
            }),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "logo missing, sending without it");
                None
            }
        }
    }
}

#[async_trait]
impl<S: BookingSource, M: Mailer + 'static> JobHandler for ConfirmationPipeline<S, M> {
    type Job = Job;

    async fn handle(&self, job: &Job, retries_so_far: u32) -> TaskOutcome {
        let result = match job {
            Job::SendBookingConfirmation { visiting_id } => {
                self.booking_confirmation(*visiting_id).await
            }
            Job::SendContactThankYou { contact_message_id } => {
                self.contact_thank_you(*contact_message_id).await
            }
        };

        match result {
            Ok(confirmation) => TaskOutcome::Completed(confirmation),
            Err(AttemptError::Gone(reason)) => {
                error!(job = ?job, reason = %reason, "record gone, not retrying");
                TaskOutcome::Abort(reason)
            }
            Err(AttemptError::Retryable(err)) => {
                error!(
                    job = ?job,
                    retries_so_far,
                    error = ?err,
                    "confirmation attempt failed"
                );
                TaskOutcome::Retry(err)
            }
        }
    }
}
