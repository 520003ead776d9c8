//! Bulk maintenance operations backing the `tnt-admin` binary.

use crate::error::StoreError;
use crate::{Result, Store};
use chrono::NaiveDate;
use rand::Rng;
use tnt_core::Money;

impl Store {
    /// Set every tour's price to a random amount in [10, 50000] dollars
    /// (two decimal places) and its discount to a random 10–50 percent.
    ///
    /// Returns the number of tours updated.
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn randomize_tour_prices(&self) -> Result<u64> {
        let ids: Vec<uuid::Uuid> = sqlx::query_scalar("SELECT id FROM tours")
            .fetch_all(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?;

        // Draw all random values up front; ThreadRng must not be held
        // across await points.
        let updates: Vec<(uuid::Uuid, Money, f64)> = {
            let mut rng = rand::thread_rng();
            ids.into_iter()
                .map(|id| {
                    let price = Money::from_dollars_f64(rng.gen_range(10.0..=50_000.0));
                    let discount = (rng.gen_range(10.0..=50.0_f64) * 100.0).round() / 100.0;
                    (id, price, discount)
                })
                .collect()
        };

        let mut updated = 0u64;
        for (id, price, discount) in updates {
            sqlx::query(
                r"
                UPDATE tours
                SET price_cents = $2, discount_percent = $3
                WHERE id = $1
                ",
            )
            .bind(id)
            .bind(i64::try_from(price.cents()).unwrap_or(i64::MAX))
            .bind(discount)
            .execute(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?;
            updated += 1;
        }

        tracing::info!(updated, "tour prices randomized");
        Ok(updated)
    }

    /// Set every tour's departure date to `date`.
    ///
    /// Returns the number of tours updated.
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn reset_departure_dates(&self, date: NaiveDate) -> Result<u64> {
        let updated = sqlx::query("UPDATE tours SET departure_date = $1")
            .bind(date)
            .execute(self.pool())
            .await
            .map_err(StoreError::from_sqlx)?
            .rows_affected();

        tracing::info!(updated, %date, "departure dates reset");
        Ok(updated)
    }
}
