use tracing::{info, warn};

use crate::camera::CameraReason;
use crate::catalog::{CountryFilter, PlaceCatalog};
use crate::config::MapConfig;
use crate::error::{MapError, MapResult};
use crate::geo::{Coordinate, GeoRegion};
use crate::selection::{SelectionChange, SelectionController};

/// A camera move that has not been issued yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntent {
    pub region: GeoRegion,
    pub duration_ms: u32,
    pub reason: CameraReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountrySwitch {
    pub filter: CountryFilter,
    pub camera: Option<CameraIntent>,
    pub selection: SelectionChange,
}

/// Owns the active country filter. Valid values are `all` and the
/// countries known when the controller was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryFilterController {
    active: CountryFilter,
    countries: Vec<String>,
}

impl CountryFilterController {
    #[must_use]
    pub fn new(countries: Vec<String>) -> Self {
        Self {
            active: CountryFilter::All,
            countries,
        }
    }

    #[must_use]
    pub fn for_catalog(catalog: &PlaceCatalog) -> Self {
        Self::new(catalog.countries().to_vec())
    }

    pub fn switch_to(
        &mut self,
        country: &str,
        catalog: &PlaceCatalog,
        device: Option<Coordinate>,
        config: &MapConfig,
        selection: &mut SelectionController,
    ) -> MapResult<CountrySwitch> {
        let filter = CountryFilter::parse(country);
        if let CountryFilter::Country(key) = &filter {
            if !self.countries.contains(key) {
                warn!(country = key.as_str(), "rejected unknown country filter");
                return Err(MapError::InvalidCountryFilter {
                    country: key.clone(),
                });
            }
        }

        let camera = match &filter {
            CountryFilter::All => device.map(|center| CameraIntent {
                region: GeoRegion::around(center, config.reset_delta),
                duration_ms: config.reset_duration_ms,
                reason: CameraReason::Reset,
            }),
            CountryFilter::Country(key) => match catalog.first_in_country(key) {
                Some(place) => Some(CameraIntent {
                    region: GeoRegion::around(place.coordinates, config.country_delta),
                    duration_ms: config.country_duration_ms,
                    reason: CameraReason::CountrySwitch,
                }),
                None => {
                    let err = MapError::EmptyCountryMatch {
                        country: key.clone(),
                    };
                    warn!(code = err.code(), "{err}");
                    None
                }
            },
        };

        info!(filter = %filter, camera = camera.is_some(), "country filter switched");
        self.active = filter.clone();

        Ok(CountrySwitch {
            filter,
            camera,
            selection: selection.clear(),
        })
    }

    #[must_use]
    pub const fn active(&self) -> &CountryFilter {
        &self.active
    }

    #[must_use]
    pub fn countries(&self) -> &[String] {
        &self.countries
    }
}
