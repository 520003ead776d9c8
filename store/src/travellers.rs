//! Traveller repository, including the nested one-to-one count.

use crate::error::StoreError;
use crate::pagination::{Page, Paginated};
use crate::{Result, Store};
use chrono::NaiveDate;
use sqlx::{PgConnection, Row};
use std::collections::HashMap;
use tnt_core::ids::TravellerId;
use tnt_core::{Traveller, TravellerCount};
use uuid::Uuid;

/// Input for creating (or replacing the fields of) a traveller.
#[derive(Clone, Debug)]
pub struct NewTraveller {
    /// Full name of the lead traveller.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Country of citizenship.
    pub nationality: String,
    /// Check-in date.
    pub check_in_date: NaiveDate,
    /// Check-out date.
    pub check_out_date: NaiveDate,
    /// Hotel star rating, 1–5.
    pub hotel_rating: u8,
    /// Direct-flight preference.
    pub is_direct_flight: bool,
    /// Optional party breakdown.
    pub count: Option<TravellerCount>,
}

impl NewTraveller {
    pub(crate) fn into_traveller(self, id: TravellerId) -> (Traveller, Option<TravellerCount>) {
        (
            Traveller {
                id,
                name: self.name,
                phone: self.phone,
                email: self.email,
                nationality: self.nationality,
                check_in_date: self.check_in_date,
                check_out_date: self.check_out_date,
                hotel_rating: self.hotel_rating,
                is_direct_flight: self.is_direct_flight,
            },
            self.count,
        )
    }
}

/// A traveller together with their optional party breakdown.
#[derive(Clone, Debug)]
pub struct TravellerWithCount {
    /// The traveller row.
    pub traveller: Traveller,
    /// The one-to-one count, when present.
    pub count: Option<TravellerCount>,
}

pub(crate) fn row_to_traveller(row: &sqlx::postgres::PgRow) -> Traveller {
    let hotel_rating: i16 = row.get("hotel_rating");
    Traveller {
        id: TravellerId::from_uuid(row.get("id")),
        name: row.get("name"),
        phone: row.get("phone"),
        email: row.get("email"),
        nationality: row.get("nationality"),
        check_in_date: row.get("check_in_date"),
        check_out_date: row.get("check_out_date"),
        hotel_rating: u8::try_from(hotel_rating).unwrap_or_default(),
        is_direct_flight: row.get("is_direct_flight"),
    }
}

fn row_to_count(row: &sqlx::postgres::PgRow) -> TravellerCount {
    let adults: i16 = row.get("adults");
    let children: i16 = row.get("children");
    let infants: i16 = row.get("infants");
    TravellerCount {
        adults: u16::try_from(adults).unwrap_or_default(),
        children: u16::try_from(children).unwrap_or_default(),
        infants: u16::try_from(infants).unwrap_or_default(),
    }
}

/// Insert a traveller row (and its count) inside an open transaction.
pub(crate) async fn insert_traveller(
    conn: &mut PgConnection,
    traveller: &Traveller,
    count: Option<&TravellerCount>,
) -> Result<()> {
    traveller
        .validate()
        .map_err(|e| StoreError::Invalid(e.to_string()))?;

    sqlx::query(
        r"
        INSERT INTO travellers (
            id, name, phone, email, nationality,
            check_in_date, check_out_date, hotel_rating, is_direct_flight
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ",
    )
    .bind(traveller.id.as_uuid())
    .bind(&traveller.name)
    .bind(&traveller.phone)
    .bind(&traveller.email)
    .bind(&traveller.nationality)
    .bind(traveller.check_in_date)
    .bind(traveller.check_out_date)
    .bind(i16::from(traveller.hotel_rating))
    .bind(traveller.is_direct_flight)
    .execute(&mut *conn)
    .await
    .map_err(StoreError::from_sqlx)?;

    if let Some(count) = count {
        upsert_count(conn, traveller.id, count).await?;
    }
    Ok(())
}

async fn upsert_count(
    conn: &mut PgConnection,
    traveller_id: TravellerId,
    count: &TravellerCount,
) -> Result<()> {
    sqlx::query(
        r"
        INSERT INTO traveller_counts (traveller_id, adults, children, infants)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (traveller_id)
        DO UPDATE SET adults = $2, children = $3, infants = $4
        ",
    )
    .bind(traveller_id.as_uuid())
    .bind(i16::try_from(count.adults).unwrap_or(i16::MAX))
    .bind(i16::try_from(count.children).unwrap_or(i16::MAX))
    .bind(i16::try_from(count.infants).unwrap_or(i16::MAX))
    .execute(conn)
    .await
    .map_err(StoreError::from_sqlx)?;
    Ok(())
}

impl Store {
    /// Create a traveller, with the optional nested count, in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// [`StoreError::Invalid`] when domain validation rejects the input,
    /// otherwise database errors.
    pub async fn create_traveller(&self, new: NewTraveller) -> Result<TravellerWithCount> {
        let (traveller, count) = new.into_traveller(TravellerId::new());

        let mut tx = self.pool().begin().await.map_err(StoreError::from_sqlx)?;
        insert_traveller(&mut tx, &traveller, count.as_ref()).await?;
        tx.commit().await.map_err(StoreError::from_sqlx)?;

        tracing::info!(traveller_id = %traveller.id, "traveller created");
        Ok(TravellerWithCount { traveller, count })
    }

    /// Fetch one traveller with their count.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown traveller.
    pub async fn traveller(&self, id: TravellerId) -> Result<TravellerWithCount> {
        let row = sqlx::query(
            r"
            SELECT id, name, phone, email, nationality,
                   check_in_date, check_out_date, hotel_rating, is_direct_flight
            FROM travellers
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .ok_or_else(|| StoreError::not_found("traveller", *id.as_uuid()))?;

        let traveller = row_to_traveller(&row);
        let count = self.traveller_count(id).await?;
        Ok(TravellerWithCount { traveller, count })
    }

    /// List travellers, most recent check-in first.
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn travellers(&self, page: Page) -> Result<Paginated<TravellerWithCount>> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM travellers")
            .fetch_one(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?;

        let rows = sqlx::query(
            r"
            SELECT id, name, phone, email, nationality,
                   check_in_date, check_out_date, hotel_rating, is_direct_flight
            FROM travellers
            ORDER BY check_in_date DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;

        let travellers: Vec<Traveller> = rows.iter().map(row_to_traveller).collect();
        let ids: Vec<Uuid> = travellers.iter().map(|t| *t.id.as_uuid()).collect();
        let mut counts = self.counts_for(&ids).await?;

        let results = travellers
            .into_iter()
            .map(|traveller| TravellerWithCount {
                count: counts.remove(traveller.id.as_uuid()),
                traveller,
            })
            .collect();

        Ok(Paginated { count, results })
    }

    /// Replace a traveller's fields (and upsert the count when given).
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown traveller,
    /// [`StoreError::Invalid`] on validation failure.
    pub async fn update_traveller(
        &self,
        id: TravellerId,
        new: NewTraveller,
    ) -> Result<TravellerWithCount> {
        let (traveller, count) = new.into_traveller(id);
        traveller
            .validate()
            .map_err(|e| StoreError::Invalid(e.to_string()))?;

        let mut tx = self.pool().begin().await.map_err(StoreError::from_sqlx)?;

        let updated = sqlx::query(
            r"
            UPDATE travellers
            SET name = $2, phone = $3, email = $4, nationality = $5,
                check_in_date = $6, check_out_date = $7,
                hotel_rating = $8, is_direct_flight = $9
            WHERE id = $1
            ",
        )
        .bind(traveller.id.as_uuid())
        .bind(&traveller.name)
        .bind(&traveller.phone)
        .bind(&traveller.email)
        .bind(&traveller.nationality)
        .bind(traveller.check_in_date)
        .bind(traveller.check_out_date)
        .bind(i16::from(traveller.hotel_rating))
        .bind(traveller.is_direct_flight)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from_sqlx)?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::not_found("traveller", *id.as_uuid()));
        }
        if let Some(count) = &count {
            upsert_count(&mut tx, id, count).await?;
        }
        tx.commit().await.map_err(StoreError::from_sqlx)?;

        let count = match count {
            Some(count) => Some(count),
            None => self.traveller_count(id).await?,
        };
        Ok(TravellerWithCount { traveller, count })
    }

    /// Delete a traveller; their count and visitings cascade.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown traveller.
    pub async fn delete_traveller(&self, id: TravellerId) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM travellers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?;

        if deleted.rows_affected() == 0 {
            return Err(StoreError::not_found("traveller", *id.as_uuid()));
        }
        tracing::info!(traveller_id = %id, "traveller deleted (bookings cascade)");
        Ok(())
    }

    /// The optional party breakdown for one traveller.
    ///
    /// The confirmation pipeline treats a failure here as recoverable,
    /// which is why it is a separate read and not part of the
    /// confirmation view query.
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn traveller_count(&self, id: TravellerId) -> Result<Option<TravellerCount>> {
        Ok(sqlx::query(
            r"
            SELECT adults, children, infants
            FROM traveller_counts
            WHERE traveller_id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .map(|row| row_to_count(&row)))
    }

    /// Counts for a set of travellers.
    async fn counts_for(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, TravellerCount>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query(
            r"
            SELECT traveller_id, adults, children, infants
            FROM traveller_counts
            WHERE traveller_id = ANY($1)
            ",
        )
        .bind(ids)
        .fetch_all(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;

        Ok(rows
            .iter()
            .map(|row| (row.get("traveller_id"), row_to_count(row)))
            .collect())
    }
}
