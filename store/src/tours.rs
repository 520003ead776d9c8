//! Tour catalog repository: detail lookup and the filtered listing.

use crate::error::StoreError;
use crate::pagination::{Page, Paginated};
use crate::{Result, Store};
use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder, Row};
use std::collections::HashMap;
use tnt_core::ids::{AdventureStyleId, CountryId, DestinationId, TourId};
use tnt_core::{Destination, Money, Tour};
use uuid::Uuid;

/// Filter set for the country tour listing.
///
/// Every field is optional; an empty filter set matches all tours of the
/// country.
#[derive(Clone, Debug, Default)]
pub struct TourFilters {
    /// Minimum base price, inclusive.
    pub min_price: Option<Money>,
    /// Maximum base price, inclusive.
    pub max_price: Option<Money>,
    /// Only tours visiting this destination.
    pub city_id: Option<DestinationId>,
    /// Only tours with a destination city containing this text
    /// (case-insensitive).
    pub city_name: Option<String>,
    /// Exact departure date.
    pub departure_date: Option<NaiveDate>,
    /// Departure month, 1–12.
    pub month: Option<u32>,
    /// Any of these adventure styles.
    pub adventure_styles: Vec<AdventureStyleId>,
    /// Exact start city.
    pub start_city: Option<String>,
    /// Exact end city.
    pub end_city: Option<String>,
}

/// Orderings accepted by the listing endpoint's `filter=` parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TourOrdering {
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Shortest trip first.
    DurationShort,
    /// Longest trip first.
    DurationLong,
    /// Most reviewed first.
    MostReviews,
    /// Highest absolute savings (`price × discount / 100`) first.
    HighestSavings,
    /// Most popular (`rating × review_count`) first.
    MostPopular,
    /// Soonest departure first (the default).
    #[default]
    DepartureSoonest,
}

impl TourOrdering {
    fn sql(self) -> &'static str {
        match self {
            Self::PriceLow => "t.price_cents ASC NULLS LAST",
            Self::PriceHigh => "t.price_cents DESC NULLS LAST",
            Self::DurationShort => "t.nights ASC",
            Self::DurationLong => "t.nights DESC",
            Self::MostReviews => "t.review_count DESC",
            Self::HighestSavings => {
                "(COALESCE(t.price_cents, 0) * COALESCE(t.discount_percent, 0) / 100) DESC"
            }
            Self::MostPopular => "(COALESCE(t.rating, 0) * t.review_count) DESC",
            Self::DepartureSoonest => "t.departure_date ASC",
        }
    }
}

/// A tour joined with its display names and destination list.
#[derive(Clone, Debug)]
pub struct TourWithDestinations {
    /// The tour row.
    pub tour: Tour,
    /// Name of the tour's country.
    pub country_name: String,
    /// Name of the tour's adventure style.
    pub adventure_style: String,
    /// Destination names, A–Z.
    pub destinations: Vec<String>,
}

pub(crate) fn row_to_tour(row: &sqlx::postgres::PgRow) -> Tour {
    let rating: Option<i16> = row.get("rating");
    let price_cents: Option<i64> = row.get("price_cents");
    let days: i16 = row.get("days");
    let nights: i16 = row.get("nights");
    let review_count: i32 = row.get("review_count");
    Tour {
        id: TourId::from_uuid(row.get("id")),
        title: row.get("title"),
        country_id: CountryId::from_uuid(row.get("country_id")),
        days: u16::try_from(days).unwrap_or_default(),
        nights: u16::try_from(nights).unwrap_or_default(),
        rating: rating.and_then(|r| u8::try_from(r).ok()),
        review_count: u32::try_from(review_count).unwrap_or_default(),
        price: price_cents
            .and_then(|c| u64::try_from(c).ok())
            .map(Money::from_cents),
        discount_percent: row.get("discount_percent"),
        departure_date: row.get("departure_date"),
        adventure_style_id: AdventureStyleId::from_uuid(row.get("adventure_style_id")),
        start_city: row.get("start_city"),
        end_city: row.get("end_city"),
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, country: &Uuid, filters: &TourFilters) {
    builder.push(" WHERE t.country_id = ").push_bind(*country);

    if let Some(min) = filters.min_price {
        builder
            .push(" AND t.price_cents >= ")
            .push_bind(i64::try_from(min.cents()).unwrap_or(i64::MAX));
    }
    if let Some(max) = filters.max_price {
        builder
            .push(" AND t.price_cents <= ")
            .push_bind(i64::try_from(max.cents()).unwrap_or(i64::MAX));
    }
    if let Some(city_id) = filters.city_id {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM tour_destinations td \
                 WHERE td.tour_id = t.id AND td.destination_id = ",
            )
            .push_bind(*city_id.as_uuid())
            .push(")");
    }
    if let Some(city_name) = &filters.city_name {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM tour_destinations td \
                 JOIN destinations d ON d.id = td.destination_id \
                 WHERE td.tour_id = t.id AND d.city ILIKE ",
            )
            .push_bind(format!("%{city_name}%"))
            .push(")");
    }
    if let Some(date) = filters.departure_date {
        builder.push(" AND t.departure_date = ").push_bind(date);
    }
    if let Some(month) = filters.month {
        builder
            .push(" AND date_part('month', t.departure_date) = ")
            .push_bind(f64::from(month));
    }
    if !filters.adventure_styles.is_empty() {
        let ids: Vec<Uuid> = filters
            .adventure_styles
            .iter()
            .map(|id| *id.as_uuid())
            .collect();
        builder
            .push(" AND t.adventure_style_id = ANY(")
            .push_bind(ids)
            .push(")");
    }
    if let Some(start_city) = &filters.start_city {
        builder.push(" AND t.start_city = ").push_bind(start_city.clone());
    }
    if let Some(end_city) = &filters.end_city {
        builder.push(" AND t.end_city = ").push_bind(end_city.clone());
    }
}

impl Store {
    /// Fetch one tour with its related display data.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown tour.
    pub async fn tour(&self, id: TourId) -> Result<TourWithDestinations> {
        let row = sqlx::query(
            r"
            SELECT t.id, t.title, t.country_id, t.days, t.nights, t.rating,
                   t.review_count, t.price_cents, t.discount_percent,
                   t.departure_date, t.adventure_style_id, t.start_city, t.end_city,
                   c.name AS country_name, s.name AS style_name
            FROM tours t
            JOIN countries c ON c.id = t.country_id
            JOIN adventure_styles s ON s.id = t.adventure_style_id
            WHERE t.id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .ok_or_else(|| StoreError::not_found("tour", *id.as_uuid()))?;

        let tour = row_to_tour(&row);
        let mut destinations = self.destinations_for(&[*id.as_uuid()]).await?;

        Ok(TourWithDestinations {
            destinations: destinations.remove(id.as_uuid()).unwrap_or_default(),
            country_name: row.get("country_name"),
            adventure_style: row.get("style_name"),
            tour,
        })
    }

    /// The filtered, ordered, paginated tour listing for one country.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown country, or
    /// [`StoreError::Database`] on driver failure.
    pub async fn tours_by_country(
        &self,
        country_id: CountryId,
        filters: &TourFilters,
        ordering: TourOrdering,
        page: Page,
    ) -> Result<Paginated<TourWithDestinations>> {
        // 404 before an empty page, like the original endpoint.
        self.country(country_id).await?;

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM tours t");
        push_filters(&mut count_query, country_id.as_uuid(), filters);
        let count: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?;

        let mut query = QueryBuilder::new(
            "SELECT t.id, t.title, t.country_id, t.days, t.nights, t.rating, \
             t.review_count, t.price_cents, t.discount_percent, t.departure_date, \
             t.adventure_style_id, t.start_city, t.end_city, \
             c.name AS country_name, s.name AS style_name \
             FROM tours t \
             JOIN countries c ON c.id = t.country_id \
             JOIN adventure_styles s ON s.id = t.adventure_style_id",
        );
        push_filters(&mut query, country_id.as_uuid(), filters);
        query.push(" ORDER BY ").push(ordering.sql());
        query
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = query
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.get("id")).collect();
        let mut destinations = self.destinations_for(&ids).await?;

        let results = rows
            .iter()
            .map(|row| {
                let tour = row_to_tour(row);
                TourWithDestinations {
                    destinations: destinations
                        .remove(tour.id.as_uuid())
                        .unwrap_or_default(),
                    country_name: row.get("country_name"),
                    adventure_style: row.get("style_name"),
                    tour,
                }
            })
            .collect();

        Ok(Paginated { count, results })
    }

    /// Distinct destination cities of a country, sorted.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown country.
    pub async fn country_cities(&self, country_id: CountryId) -> Result<Vec<String>> {
        self.country(country_id).await?;

        let rows = sqlx::query(
            r"
            SELECT DISTINCT city
            FROM destinations
            WHERE country_id = $1
            ORDER BY city
            ",
        )
        .bind(country_id.as_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;

        Ok(rows.iter().map(|row| row.get("city")).collect())
    }

    /// Destination names for a set of tours, A–Z per tour.
    pub(crate) async fn destinations_for(
        &self,
        tour_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<String>>> {
        if tour_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query(
            r"
            SELECT td.tour_id, d.name
            FROM tour_destinations td
            JOIN destinations d ON d.id = td.destination_id
            WHERE td.tour_id = ANY($1)
            ORDER BY d.name
            ",
        )
        .bind(tour_ids)
        .fetch_all(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;

        let mut map: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in &rows {
            map.entry(row.get("tour_id"))
                .or_default()
                .push(row.get("name"));
        }
        Ok(map)
    }

    /// Insert a destination (seeding and tests).
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on constraint or driver failure.
    pub async fn create_destination(&self, destination: &Destination) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO destinations (id, name, country_id, city, description)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(destination.id.as_uuid())
        .bind(&destination.name)
        .bind(destination.country_id.as_uuid())
        .bind(&destination.city)
        .bind(&destination.description)
        .execute(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(())
    }

    /// Insert a tour and link its destinations (seeding and tests).
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on constraint or driver failure.
    pub async fn create_tour(&self, tour: &Tour, destinations: &[DestinationId]) -> Result<()> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(StoreError::from_sqlx)?;

        sqlx::query(
            r"
            INSERT INTO tours (
                id, title, country_id, days, nights, rating, review_count,
                price_cents, discount_percent, departure_date,
                adventure_style_id, start_city, end_city
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(tour.id.as_uuid())
        .bind(&tour.title)
        .bind(tour.country_id.as_uuid())
        .bind(i16::try_from(tour.days).unwrap_or(i16::MAX))
        .bind(i16::try_from(tour.nights).unwrap_or(i16::MAX))
        .bind(tour.rating.map(i16::from))
        .bind(i32::try_from(tour.review_count).unwrap_or(i32::MAX))
        .bind(
            tour.price
                .map(|p| i64::try_from(p.cents()).unwrap_or(i64::MAX)),
        )
        .bind(tour.discount_percent)
        .bind(tour.departure_date)
        .bind(tour.adventure_style_id.as_uuid())
        .bind(&tour.start_city)
        .bind(&tour.end_city)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from_sqlx)?;

        for destination in destinations {
            sqlx::query(
                r"
                INSERT INTO tour_destinations (tour_id, destination_id)
                VALUES ($1, $2)
                ",
            )
            .bind(tour.id.as_uuid())
            .bind(destination.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(StoreError::from_sqlx)?;
        }

        tx.commit().await.map_err(StoreError::from_sqlx)?;
        Ok(())
    }
}
