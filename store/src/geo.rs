//! Continent, country, and adventure-style repositories.

use crate::error::StoreError;
use crate::{Result, Store};
use sqlx::Row;
use tnt_core::ids::{AdventureStyleId, ContinentId, CountryId};
use tnt_core::{AdventureStyle, Continent, Country};

fn row_to_country(row: &sqlx::postgres::PgRow) -> Country {
    Country {
        id: CountryId::from_uuid(row.get("id")),
        name: row.get("name"),
        code: row.get("code"),
        slug: row.get("slug"),
        continent_id: ContinentId::from_uuid(row.get("continent_id")),
    }
}

fn row_to_style(row: &sqlx::postgres::PgRow) -> AdventureStyle {
    AdventureStyle {
        id: AdventureStyleId::from_uuid(row.get("id")),
        name: row.get("name"),
        description: row.get("description"),
    }
}

impl Store {
    /// Fetch a continent together with its countries, A–Z.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown continent.
    pub async fn continent_with_countries(
        &self,
        id: ContinentId,
    ) -> Result<(Continent, Vec<Country>)> {
        let row = sqlx::query(
            r"
            SELECT id, name, code
            FROM continents
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .ok_or_else(|| StoreError::not_found("continent", *id.as_uuid()))?;

        let continent = Continent {
            id: ContinentId::from_uuid(row.get("id")),
            name: row.get("name"),
            code: row.get("code"),
        };

        let countries = sqlx::query(
            r"
            SELECT id, name, code, slug, continent_id
            FROM countries
            WHERE continent_id = $1
            ORDER BY name
            ",
        )
        .bind(id.as_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .iter()
        .map(row_to_country)
        .collect();

        Ok((continent, countries))
    }

    /// Fetch a country by id.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown country.
    pub async fn country(&self, id: CountryId) -> Result<Country> {
        sqlx::query(
            r"
            SELECT id, name, code, slug, continent_id
            FROM countries
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .map(|row| row_to_country(&row))
        .ok_or_else(|| StoreError::not_found("country", *id.as_uuid()))
    }

    /// Fetch a country by its URL slug, `Ok(None)` when unknown.
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn country_by_slug(&self, slug: &str) -> Result<Option<Country>> {
        Ok(sqlx::query(
            r"
            SELECT id, name, code, slug, continent_id
            FROM countries
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .map(|row| row_to_country(&row)))
    }

    /// All adventure styles, A–Z.
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on driver failure.
    pub async fn adventure_styles(&self) -> Result<Vec<AdventureStyle>> {
        Ok(sqlx::query(
            r"
            SELECT id, name, description
            FROM adventure_styles
            ORDER BY name
            ",
        )
        .fetch_all(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .iter()
        .map(row_to_style)
        .collect())
    }

    /// Fetch one adventure style.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown style.
    pub async fn adventure_style(&self, id: AdventureStyleId) -> Result<AdventureStyle> {
        sqlx::query(
            r"
            SELECT id, name, description
            FROM adventure_styles
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?
        .map(|row| row_to_style(&row))
        .ok_or_else(|| StoreError::not_found("adventure style", *id.as_uuid()))
    }

    /// Insert a continent (seeding and tests).
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on constraint or driver failure.
    pub async fn create_continent(&self, continent: &Continent) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO continents (id, name, code)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(continent.id.as_uuid())
        .bind(&continent.name)
        .bind(&continent.code)
        .execute(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(())
    }

    /// Insert a country (seeding and tests).
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on constraint or driver failure.
    pub async fn create_country(&self, country: &Country) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO countries (id, name, code, slug, continent_id)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(country.id.as_uuid())
        .bind(&country.name)
        .bind(&country.code)
        .bind(&country.slug)
        .bind(country.continent_id.as_uuid())
        .execute(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(())
    }

    /// Insert an adventure style (seeding and tests).
    ///
    /// # Errors
    ///
    /// [`StoreError::Database`] on constraint or driver failure.
    pub async fn create_adventure_style(&self, style: &AdventureStyle) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO adventure_styles (id, name, description)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(style.id.as_uuid())
        .bind(&style.name)
        .bind(&style.description)
        .execute(self.pool())
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(())
    }
}
