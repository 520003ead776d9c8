//! Geography catalog: continents and countries.

use crate::ids::{ContinentId, CountryId};
use serde::{Deserialize, Serialize};

/// A continent grouping countries, e.g. "Africa".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continent {
    /// Identifier.
    pub id: ContinentId,
    /// Continent name, unique.
    pub name: String,
    /// Short code, e.g. `AF`.
    pub code: Option<String>,
}

/// A country tours operate in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Identifier.
    pub id: CountryId,
    /// Country name, unique.
    pub name: String,
    /// ISO 3-letter code, e.g. `USA`.
    pub code: String,
    /// URL slug, e.g. `south-africa`.
    pub slug: String,
    /// Continent this country belongs to.
    pub continent_id: ContinentId,
}
