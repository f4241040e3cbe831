use serde::{Deserialize, Serialize};

use crate::location::{DenialReason, LocationReading};
use crate::selection::TimerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Noop,

    Mounted,
    Unmounted,
    /// JSON `MapConfig`; missing fields keep their defaults. Applies from
    /// the next mount.
    ConfigProvided {
        json: String,
    },

    // Location capability results, only ever produced by the core
    #[serde(skip)]
    LocationPermissionResolved {
        granted: bool,
    },
    #[serde(skip)]
    LocationResolved(LocationReading),
    #[serde(skip)]
    LocationDenied(DenialReason),

    MarkerPressed {
        name: String,
    },
    CountrySwitched {
        country: String,
    },
    RegionChangedByUser,
    SearchTextChanged {
        text: String,
    },

    #[serde(skip)]
    SelectionTimerElapsed {
        timer_id: TimerId,
    },
    CameraRequestApplied {
        seq: u64,
    },

    DismissError,
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Mounted => "mounted",
            Self::Unmounted => "unmounted",
            Self::ConfigProvided { .. } => "config_provided",
            Self::LocationPermissionResolved { .. } => "location_permission_resolved",
            Self::LocationResolved(_) => "location_resolved",
            Self::LocationDenied(_) => "location_denied",
            Self::MarkerPressed { .. } => "marker_pressed",
            Self::CountrySwitched { .. } => "country_switched",
            Self::RegionChangedByUser => "region_changed_by_user",
            Self::SearchTextChanged { .. } => "search_text_changed",
            Self::SelectionTimerElapsed { .. } => "selection_timer_elapsed",
            Self::CameraRequestApplied { .. } => "camera_request_applied",
            Self::DismissError => "dismiss_error",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::MarkerPressed { .. }
                | Self::CountrySwitched { .. }
                | Self::RegionChangedByUser
                | Self::SearchTextChanged { .. }
                | Self::DismissError
        )
    }

    /// Events that only make sense while the map screen is mounted.
    #[must_use]
    pub const fn needs_screen(&self) -> bool {
        !matches!(
            self,
            Self::Noop | Self::Mounted | Self::Unmounted | Self::ConfigProvided { .. }
        )
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::Noop
    }
}
