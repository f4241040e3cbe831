use serde::{Deserialize, Serialize};

use crate::camera::CameraRequest;
use crate::catalog::{Place, ALL_COUNTRIES};
use crate::controller::RenderSnapshot;
use crate::error::UserFacingError;
use crate::geo::{Coordinate, GeoRegion};
use crate::location::LocationStatus;
use crate::model::Model;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinColor {
    Blue,
    Green,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MarkerView {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pin_color: PinColor,
    pub is_selected: bool,
    /// Text of the detail label, present only on the selected marker.
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlaceDetail {
    pub name: String,
    pub country: String,
    pub address: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Place> for PlaceDetail {
    fn from(p: &Place) -> Self {
        Self {
            name: p.name.clone(),
            country: p.country.clone(),
            address: p.address.clone(),
            description: p.description.clone(),
            latitude: p.coordinates.latitude,
            longitude: p.coordinates.longitude,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryOption {
    pub value: String,
    pub label: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub is_mounted: bool,
    pub location_status: LocationStatus,
    pub initial_region: Option<GeoRegion>,
    pub user_marker: Option<Coordinate>,
    pub markers: Vec<MarkerView>,
    pub selected: Option<PlaceDetail>,
    pub pending_camera_request: Option<CameraRequest>,
    pub active_country_filter: String,
    pub country_options: Vec<CountryOption>,
    pub search_text: String,
    pub error: Option<UserFacingError>,
}

/// "usa" -> "USA", "canada" -> "Canada".
#[must_use]
pub fn country_label(country: &str) -> String {
    if country == ALL_COUNTRIES {
        return "All".into();
    }
    if country.chars().count() <= 3 {
        return country.to_uppercase();
    }
    let mut chars = country.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

fn country_options(countries: &[String], active: &str) -> Vec<CountryOption> {
    std::iter::once(ALL_COUNTRIES)
        .chain(countries.iter().map(String::as_str))
        .map(|value| CountryOption {
            value: value.to_string(),
            label: country_label(value),
            is_active: value == active,
        })
        .collect()
}

fn build_markers(snapshot: &RenderSnapshot, highlight: Option<&str>) -> Vec<MarkerView> {
    let selected = snapshot.selection.selected_name.as_deref();
    snapshot
        .filtered_places
        .iter()
        .map(|place| {
            let is_selected = selected == Some(place.name.as_str());
            let pin_color = if highlight == Some(place.country_key().as_str()) {
                PinColor::Green
            } else {
                PinColor::Blue
            };
            MarkerView {
                name: place.name.clone(),
                latitude: place.coordinates.latitude,
                longitude: place.coordinates.longitude,
                pin_color,
                is_selected,
                label: is_selected.then(|| place.name.clone()),
            }
        })
        .collect()
}

impl ViewModel {
    #[must_use]
    pub fn from_model(model: &Model) -> Self {
        let model_error = model.active_error.as_ref().map(UserFacingError::from);

        let Some(screen) = &model.screen else {
            return Self {
                is_mounted: false,
                location_status: LocationStatus::Unknown,
                initial_region: None,
                user_marker: None,
                markers: Vec::new(),
                selected: None,
                pending_camera_request: None,
                active_country_filter: ALL_COUNTRIES.into(),
                country_options: Vec::new(),
                search_text: String::new(),
                error: model_error,
            };
        };

        let snapshot = screen.snapshot();
        let highlight = screen.config().highlight_country.as_deref();
        let active = snapshot.active_country_filter.as_str();

        Self {
            is_mounted: true,
            markers: build_markers(&snapshot, highlight),
            selected: snapshot.selected_place.as_ref().map(PlaceDetail::from),
            country_options: country_options(&snapshot.countries, active),
            active_country_filter: active.to_string(),
            location_status: snapshot.location_status.clone(),
            initial_region: snapshot.initial_region,
            user_marker: snapshot.user_location,
            pending_camera_request: snapshot.pending_camera_request,
            search_text: snapshot.search_text.clone(),
            error: snapshot
                .error
                .as_ref()
                .map(UserFacingError::from)
                .or(model_error),
        }
    }
}
