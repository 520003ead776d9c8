//! Store errors.

use thiserror::Error;
use uuid::Uuid;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity name for the message.
        entity: &'static str,
        /// The id that missed.
        id: Uuid,
    },

    /// This traveller already has a booking for this tour.
    #[error("traveller already has a booking for this tour")]
    DuplicateBooking,

    /// The tour still has bookings referencing it.
    #[error("tour has bookings and cannot be deleted")]
    TourDeleteProtected,

    /// Domain validation rejected the input before it reached the database.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// Anything the database driver reported.
    #[error("database error: {0}")]
    Database(String),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Translate a sqlx error, recognizing the constraint violations the
    /// domain gives names to.
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if let Some(db) = err.as_database_error() {
            if let Some(code) = db.code() {
                // 23505: unique_violation — the (traveller, tour) pair
                if code == "23505" && db.constraint() == Some("visitings_traveller_id_tour_id_key")
                {
                    return Self::DuplicateBooking;
                }
                // 23503: foreign_key_violation — delete-protected tour
                if code == "23503" && db.message().contains("visitings") {
                    return Self::TourDeleteProtected;
                }
            }
        }
        Self::Database(err.to_string())
    }
}
