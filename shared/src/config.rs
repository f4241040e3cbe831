use serde::{Deserialize, Serialize};

use crate::geo::RegionDelta;
use crate::{
    COUNTRY_DELTA, COUNTRY_DURATION_MS, DEFAULT_HIGHLIGHT_COUNTRY, MARKER_DELTA,
    MARKER_DURATION_MS, MAX_ANIMATION_MS, MIN_SELECTION_EXPIRY_MS, RESET_DELTA, RESET_DURATION_MS,
    SELECTION_EXPIRY_MS,
};

/// Tunables for the map screen. Every field has a default, so the shell may
/// send a partial JSON object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub selection_expiry_ms: u64,
    pub marker_delta: RegionDelta,
    pub marker_duration_ms: u32,
    pub country_delta: RegionDelta,
    pub country_duration_ms: u32,
    pub reset_delta: RegionDelta,
    pub reset_duration_ms: u32,
    /// Markers in this country get a green pin.
    pub highlight_country: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            selection_expiry_ms: SELECTION_EXPIRY_MS,
            marker_delta: MARKER_DELTA,
            marker_duration_ms: MARKER_DURATION_MS,
            country_delta: COUNTRY_DELTA,
            country_duration_ms: COUNTRY_DURATION_MS,
            reset_delta: RESET_DELTA,
            reset_duration_ms: RESET_DURATION_MS,
            highlight_country: Some(DEFAULT_HIGHLIGHT_COUNTRY.into()),
        }
    }
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    #[must_use]
    pub fn validated(mut self) -> Self {
        self.selection_expiry_ms = self.selection_expiry_ms.max(MIN_SELECTION_EXPIRY_MS);
        self.marker_delta = self.marker_delta.clamped(MARKER_DELTA);
        self.country_delta = self.country_delta.clamped(COUNTRY_DELTA);
        self.reset_delta = self.reset_delta.clamped(RESET_DELTA);
        self.marker_duration_ms = self.marker_duration_ms.min(MAX_ANIMATION_MS);
        self.country_duration_ms = self.country_duration_ms.min(MAX_ANIMATION_MS);
        self.reset_duration_ms = self.reset_duration_ms.min(MAX_ANIMATION_MS);
        self.highlight_country = self
            .highlight_country
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());
        self
    }

    #[must_use]
    pub fn with_selection_expiry_ms(mut self, ms: u64) -> Self {
        self.selection_expiry_ms = ms;
        self.validated()
    }
}
