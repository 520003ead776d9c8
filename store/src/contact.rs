//! Contact-message repository.

use crate::error::StoreError;
use crate::pagination::{Page, Paginated};
use crate::{Result, Store};
use sqlx::Row;
use tnt_core::ids::ContactMessageId;
use tnt_core::ContactMessage;

/// Input for a contact-form submission.
#[derive(Clone, Debug)]
pub struct NewContactMessage {
    /// Sender's full name.
    pub full_name: String,
    /// Sender's email.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

fn row_to_message(row: &sqlx::postgres::PgRow) -> ContactMessage {
    ContactMessage {
        id: ContactMessageId::from_uuid(row.get("id")),
        full_name: row.get("full_name"),
        email: row.get("email"),
        subject: row.get("subject"),
        message: row.get("message"),
        created_at: row.get("created_at"),
    }
}

impl Store {
    /// Persist a contact message. Like booking creation, the thank-you
    /// job is enqueued by the caller only after this commits.
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn create_contact_message(&self, new: NewContactMessage) -> Result<ContactMessage> {
        let id = ContactMessageId::new();
        let row = sqlx::query(
            r"
            INSERT INTO contact_messages (id, full_name, email, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, full_name, email, subject, message, created_at
            ",
        )
        .bind(id.as_uuid())
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.subject)
        .bind(&new.message)
        .fetch_one(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;

        let message = row_to_message(&row);
        tracing::info!(contact_message_id = %message.id, "contact message received");
        Ok(message)
    }

    /// Fetch one contact message, `Ok(None)` when it no longer exists.
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn contact_message(&self, id: ContactMessageId) -> Result<Option<ContactMessage>> {
        Ok(sqlx::query(
            r"
            SELECT id, full_name, email, subject, message, created_at
            FROM contact_messages
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .map(|row| row_to_message(&row)))
    }

    /// List contact messages, newest first.
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn contact_messages(&self, page: Page) -> Result<Paginated<ContactMessage>> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?;

        let rows = sqlx::query(
            r"
            SELECT id, full_name, email, subject, message, created_at
            FROM contact_messages
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;

        Ok(Paginated {
            count,
            results: rows.iter().map(row_to_message).collect(),
        })
    }
}
