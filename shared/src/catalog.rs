use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, instrument};

use crate::error::CatalogError;
use crate::geo::{Coordinate, GeoRegion, RegionDelta};
use crate::FALLBACK_REGION_PADDING;

const BUNDLED_PLACES: &str = include_str!("../data/places.json");

/// Filter value meaning "every country".
pub const ALL_COUNTRIES: &str = "all";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub country: String,
    pub address: String,
    pub description: String,
    pub coordinates: Coordinate,
}

impl Place {
    #[must_use]
    pub fn country_key(&self) -> String {
        self.country.to_lowercase()
    }

    fn matches_search(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.name.to_lowercase().contains(needle_lower)
            || self.address.to_lowercase().contains(needle_lower)
    }
}

/// `"all"` or a lower-cased country name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CountryFilter {
    #[default]
    All,
    Country(String),
}

impl CountryFilter {
    /// Case-insensitive; surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let key = value.trim().to_lowercase();
        if key == ALL_COUNTRIES {
            Self::All
        } else {
            Self::Country(key)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_COUNTRIES,
            Self::Country(c) => c,
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub fn admits(&self, place: &Place) -> bool {
        match self {
            Self::All => true,
            Self::Country(c) => place.country_key() == *c,
        }
    }
}

impl From<String> for CountryFilter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CountryFilter> for String {
    fn from(value: CountryFilter) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CountryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The immutable, ordered list of places shown on the map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaceCatalog {
    places: Vec<Place>,
    countries: Vec<String>,
}

impl PlaceCatalog {
    pub fn new(places: Vec<Place>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(places.len());
        for (idx, place) in places.iter().enumerate() {
            if place.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(idx));
            }
            if !seen.insert(place.name.as_str()) {
                return Err(CatalogError::DuplicateName(place.name.clone()));
            }
            place
                .coordinates
                .validate()
                .map_err(|source| CatalogError::InvalidCoordinate {
                    name: place.name.clone(),
                    source,
                })?;
        }

        let mut countries: Vec<String> = Vec::new();
        for place in &places {
            let key = place.country_key();
            if !countries.contains(&key) {
                countries.push(key);
            }
        }

        Ok(Self { places, countries })
    }

    #[instrument(skip(json), fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let places: Vec<Place> = serde_json::from_str(json)?;
        let catalog = Self::new(places)?;
        debug!(
            places = catalog.places.len(),
            countries = catalog.countries.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog shipped with the app.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_PLACES)
    }

    #[must_use]
    pub fn all_places(&self) -> &[Place] {
        &self.places
    }

    /// Distinct lower-cased countries in first-occurrence order.
    #[must_use]
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn first_in_country(&self, country: &str) -> Option<&Place> {
        let key = country.to_lowercase();
        self.places.iter().find(|p| p.country_key() == key)
    }

    /// Places passing both the country filter and the case-insensitive
    /// name/address search, in catalog order.
    #[must_use]
    pub fn filter(&self, active: &CountryFilter, search_text: &str) -> Vec<&Place> {
        let needle = search_text.to_lowercase();
        self.places
            .iter()
            .filter(|p| active.admits(p) && p.matches_search(&needle))
            .collect()
    }

    /// Region covering every place, used when the device location is unknown.
    /// Never narrower than `min_span`.
    #[must_use]
    pub fn fallback_region(&self, min_span: RegionDelta) -> Option<GeoRegion> {
        GeoRegion::bounding(
            self.places.iter().map(|p| p.coordinates),
            FALLBACK_REGION_PADDING,
            min_span,
        )
    }
}
