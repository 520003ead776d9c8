//! Visiting (booking) repository and the confirmation view.

use crate::error::StoreError;
use crate::pagination::{Page, Paginated};
use crate::travellers::{insert_traveller, row_to_traveller, NewTraveller};
use crate::tours::row_to_tour;
use crate::{Result, Store};
use sqlx::Row;
use tnt_core::ids::{TourId, TravellerId, VisitingId};
use tnt_core::{Tour, Traveller, Visiting};

/// The traveller side of a new booking: reference an existing traveller
/// or create one inline, exactly like the nested create of the HTTP API.
#[derive(Clone, Debug)]
pub enum TravellerRef {
    /// Book for a traveller that already exists.
    Existing(TravellerId),
    /// Create the traveller (with optional count) in the same transaction.
    New(NewTraveller),
}

/// Input for creating a booking.
#[derive(Clone, Debug)]
pub struct NewVisiting {
    /// Country the request originated from.
    pub request_country: String,
    /// The traveller, existing or inline.
    pub traveller: TravellerRef,
    /// The tour being booked.
    pub tour_id: TourId,
    /// Special requests; empty for none.
    pub notes: String,
}

/// A visiting joined with the tour title, the shape list and detail
/// responses need.
#[derive(Clone, Debug)]
pub struct VisitingRecord {
    /// The booking row.
    pub visiting: Visiting,
    /// Title of the booked tour.
    pub tour_title: String,
}

/// Everything the confirmation email needs, eager-loaded in one query
/// (plus a destinations batch): the booking, its traveller, its tour, and
/// the display names the context wants. The optional traveller count is
/// *not* part of this view — the pipeline loads it separately so a
/// failure there stays recoverable.
#[derive(Clone, Debug)]
pub struct ConfirmationView {
    /// The booking.
    pub visiting: Visiting,
    /// The lead traveller.
    pub traveller: Traveller,
    /// The booked tour.
    pub tour: Tour,
    /// Name of the tour's country.
    pub tour_country: String,
    /// Name of the tour's adventure style.
    pub adventure_style: String,
    /// Destination names, A–Z.
    pub destinations: Vec<String>,
}

fn row_to_visiting(row: &sqlx::postgres::PgRow) -> Visiting {
    Visiting {
        id: VisitingId::from_uuid(row.get("id")),
        request_country: row.get("request_country"),
        traveller_id: TravellerId::from_uuid(row.get("traveller_id")),
        tour_id: TourId::from_uuid(row.get("tour_id")),
        booked_on: row.get("booked_on"),
        notes: row.get("notes"),
    }
}

impl Store {
    /// Create a booking in one transaction, creating the traveller inline
    /// when asked to.
    ///
    /// The returned [`Visiting`] is fully committed when this resolves —
    /// callers enqueue the confirmation job *after* this returns, which
    /// is what guarantees the worker can read the row.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateBooking`] when the (traveller, tour) pair
    /// already exists, [`StoreError::Invalid`] for bad traveller data,
    /// [`StoreError::NotFound`] for an unknown tour or traveller.
    pub async fn create_visiting(&self, new: NewVisiting) -> Result<Visiting> {
        // Fail fast on an unknown tour; the insert would also catch it,
        // but this keeps the error shape consistent with the detail read.
        self.tour(new.tour_id).await?;

        let mut tx = self.pool().begin().await.map_err(StoreError::from_sqlx)?;

        let traveller_id = match new.traveller {
            TravellerRef::Existing(id) => {
                let exists: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM travellers WHERE id = $1")
                        .bind(id.as_uuid())
                        .fetch_one(&mut *tx)
                        .await
                        .map_err(StoreError::from_sqlx)?;
                if exists == 0 {
                    return Err(StoreError::not_found("traveller", *id.as_uuid()));
                }
                id
            }
            TravellerRef::New(new_traveller) => {
                let id = TravellerId::new();
                let (traveller, count) = new_traveller.into_traveller(id);
                insert_traveller(&mut tx, &traveller, count.as_ref()).await?;
                id
            }
        };

        let id = VisitingId::new();
        let row = sqlx::query(
            r"
            INSERT INTO visitings (id, request_country, traveller_id, tour_id, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, request_country, traveller_id, tour_id, booked_on, notes
            ",
        )
        .bind(id.as_uuid())
        .bind(&new.request_country)
        .bind(traveller_id.as_uuid())
        .bind(new.tour_id.as_uuid())
        .bind(&new.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(StoreError::from_sqlx)?;

        let visiting = row_to_visiting(&row);
        tx.commit().await.map_err(StoreError::from_sqlx)?;

        tracing::info!(
            visiting_id = %visiting.id,
            traveller_id = %visiting.traveller_id,
            tour_id = %visiting.tour_id,
            "booking created"
        );
        Ok(visiting)
    }

    /// Fetch one booking with its tour title.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown booking.
    pub async fn visiting(&self, id: VisitingId) -> Result<VisitingRecord> {
        sqlx::query(
            r"
            SELECT v.id, v.request_country, v.traveller_id, v.tour_id,
                   v.booked_on, v.notes, t.title AS tour_title
            FROM visitings v
            JOIN tours t ON t.id = v.tour_id
            WHERE v.id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .map(|row| VisitingRecord {
            visiting: row_to_visiting(&row),
            tour_title: row.get("tour_title"),
        })
        .ok_or_else(|| StoreError::not_found("visiting", *id.as_uuid()))
    }

    /// List bookings, newest first.
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn visitings(&self, page: Page) -> Result<Paginated<VisitingRecord>> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitings")
            .fetch_one(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?;

        let rows = sqlx::query(
            r"
            SELECT v.id, v.request_country, v.traveller_id, v.tour_id,
                   v.booked_on, v.notes, t.title AS tour_title
            FROM visitings v
            JOIN tours t ON t.id = v.tour_id
            ORDER BY v.booked_on DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;

        let results = rows
            .iter()
            .map(|row| VisitingRecord {
                visiting: row_to_visiting(row),
                tour_title: row.get("tour_title"),
            })
            .collect();

        Ok(Paginated { count, results })
    }

    /// Update the only mutable field of a booking: its notes.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown booking.
    pub async fn update_visiting_notes(
        &self,
        id: VisitingId,
        notes: &str,
    ) -> Result<VisitingRecord> {
        let updated = sqlx::query("UPDATE visitings SET notes = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(notes)
            .execute(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::not_found("visiting", *id.as_uuid()));
        }
        self.visiting(id).await
    }

    /// Delete a booking.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown booking.
    pub async fn delete_visiting(&self, id: VisitingId) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM visitings WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?;

        if deleted.rows_affected() == 0 {
            return Err(StoreError::not_found("visiting", *id.as_uuid()));
        }
        Ok(())
    }

    /// Eager-load a booking for the confirmation email.
    ///
    /// Returns `Ok(None)` when the booking no longer exists — the
    /// pipeline's terminal, non-retried outcome — rather than an error,
    /// so callers can't confuse "gone" with "database down".
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn confirmation_view(&self, id: VisitingId) -> Result<Option<ConfirmationView>> {
        let Some(row) = sqlx::query(
            r"
            SELECT v.id, v.request_country, v.traveller_id, v.tour_id,
                   v.booked_on, v.notes,
                   tr.id AS t_id, tr.name, tr.phone, tr.email, tr.nationality,
                   tr.check_in_date, tr.check_out_date, tr.hotel_rating,
                   tr.is_direct_flight,
                   t.id AS tour_pk, t.title, t.country_id, t.days, t.nights,
                   t.rating, t.review_count, t.price_cents, t.discount_percent,
                   t.departure_date, t.adventure_style_id, t.start_city, t.end_city,
                   c.name AS country_name, s.name AS style_name
            FROM visitings v
            JOIN travellers tr ON tr.id = v.traveller_id
            JOIN tours t ON t.id = v.tour_id
            JOIN countries c ON c.id = t.country_id
            JOIN adventure_styles s ON s.id = t.adventure_style_id
            WHERE v.id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        else {
            return Ok(None);
        };

        let visiting = row_to_visiting(&row);
        let traveller = {
            // The traveller columns carry their own aliases where they
            // collide with the visiting's.
            let mut traveller = row_to_traveller(&row);
            traveller.id = TravellerId::from_uuid(row.get("t_id"));
            traveller
        };
        let tour = {
            let mut tour = row_to_tour(&row);
            tour.id = TourId::from_uuid(row.get("tour_pk"));
            tour
        };

        let mut destinations = self.destinations_for(&[*tour.id.as_uuid()]).await?;

        Ok(Some(ConfirmationView {
            destinations: destinations.remove(tour.id.as_uuid()).unwrap_or_default(),
            tour_country: row.get("country_name"),
            adventure_style: row.get("style_name"),
            visiting,
            traveller,
            tour,
        }))
    }
}
