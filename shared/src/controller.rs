use tracing::{debug, info, warn};

use crate::camera::{CameraController, CameraReason, CameraRequest};
use crate::catalog::{CountryFilter, Place, PlaceCatalog};
use crate::config::MapConfig;
use crate::error::MapError;
use crate::filter::{CameraIntent, CountryFilterController};
use crate::geo::{Coordinate, GeoRegion};
use crate::location::{DenialReason, LocationReading, LocationSession, LocationStatus, PermissionStep};
use crate::selection::{SelectionChange, SelectionController, SelectionState, TimerId};

/// Side effects the shell has to perform for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    RequestLocationPermission,
    FetchLocation,
    StartTimer { id: TimerId, after_ms: u64 },
    CancelTimer { id: TimerId },
}

/// Everything the map screen needs to draw itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub location_status: LocationStatus,
    pub initial_region: Option<GeoRegion>,
    pub user_location: Option<Coordinate>,
    pub filtered_places: Vec<Place>,
    pub selection: SelectionState,
    pub selected_place: Option<Place>,
    pub pending_camera_request: Option<CameraRequest>,
    pub active_country_filter: CountryFilter,
    pub countries: Vec<String>,
    pub search_text: String,
    pub error: Option<MapError>,
}

/// State of one mounted map screen. Built on mount, dropped on unmount;
/// every handler runs to completion on the shell's event loop.
#[derive(Debug, Clone)]
pub struct MapInteractionController {
    catalog: PlaceCatalog,
    config: MapConfig,
    location: LocationSession,
    selection: SelectionController,
    camera: CameraController,
    filter: CountryFilterController,
    search_text: String,
    error: Option<MapError>,
}

impl MapInteractionController {
    #[must_use]
    pub fn new(catalog: PlaceCatalog, config: MapConfig, mount: u64) -> Self {
        let filter = CountryFilterController::for_catalog(&catalog);
        Self {
            catalog,
            config,
            location: LocationSession::new(),
            selection: SelectionController::new(mount),
            camera: CameraController::new(),
            filter,
            search_text: String::new(),
            error: None,
        }
    }

    pub fn on_mount(&mut self) -> Vec<ShellCommand> {
        if self.location.begin() {
            vec![ShellCommand::RequestLocationPermission]
        } else {
            Vec::new()
        }
    }

    pub fn on_permission_resolved(&mut self, granted: bool) -> Vec<ShellCommand> {
        match self.location.permission_resolved(granted) {
            PermissionStep::FetchPosition => vec![ShellCommand::FetchLocation],
            PermissionStep::Denied => {
                self.record_denial();
                Vec::new()
            }
            PermissionStep::Ignored => Vec::new(),
        }
    }

    pub fn on_location_resolved(&mut self, reading: LocationReading) {
        if self.location.resolve(reading) {
            self.record_denial();
        }
    }

    pub fn on_location_denied(&mut self, reason: DenialReason) {
        if self.location.deny(reason) {
            self.record_denial();
        }
    }

    fn record_denial(&mut self) {
        if let Some(reason) = self.location.denial() {
            self.error = Some(MapError::from(reason));
        }
    }

    /// Only markers currently on the map can be pressed; a name hidden by the
    /// country filter or the search text is treated as unknown.
    pub fn on_marker_press(&mut self, place_name: &str) -> Vec<ShellCommand> {
        let Some(center) = self
            .catalog
            .filter(self.filter.active(), &self.search_text)
            .into_iter()
            .find(|p| p.name == place_name)
            .map(|p| p.coordinates)
        else {
            let err = MapError::UnknownPlace {
                name: place_name.to_string(),
            };
            let hidden = self.catalog.find(place_name).is_some();
            warn!(code = err.code(), hidden, "{err}");
            return Vec::new();
        };

        let change = self.selection.select_or_toggle(place_name);
        if change.state.is_selected() {
            self.apply_camera(CameraIntent {
                region: GeoRegion::around(center, self.config.marker_delta),
                duration_ms: self.config.marker_duration_ms,
                reason: CameraReason::MarkerSelect,
            });
        }
        self.timer_commands(&change)
    }

    pub fn on_country_switch(&mut self, country: &str) -> Vec<ShellCommand> {
        let device = self.location.coordinate();
        match self.filter.switch_to(
            country,
            &self.catalog,
            device,
            &self.config,
            &mut self.selection,
        ) {
            Ok(switch) => {
                if let Some(intent) = switch.camera {
                    self.apply_camera(intent);
                }
                self.timer_commands(&switch.selection)
            }
            Err(e) => {
                debug!(code = e.code(), "country switch ignored");
                Vec::new()
            }
        }
    }

    /// A pan or zoom by the user dismisses the open label; the filter stays.
    pub fn on_region_changed_by_user(&mut self) -> Vec<ShellCommand> {
        let change = self.selection.clear();
        self.timer_commands(&change)
    }

    pub fn on_search_text_change(&mut self, text: &str) {
        text.clone_into(&mut self.search_text);
    }

    /// Returns `true` when the timer was live and the selection was cleared.
    pub fn on_selection_timer(&mut self, timer: TimerId) -> bool {
        self.selection.expire(timer).is_some()
    }

    pub fn on_camera_applied(&mut self, seq: u64) -> bool {
        self.camera.acknowledge(seq)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Cancels the live expiry timer, if any.
    pub fn teardown(&mut self) -> Vec<ShellCommand> {
        let change = self.selection.clear();
        info!(cancelled_timer = change.cancel_timer.is_some(), "map screen torn down");
        self.timer_commands(&change)
    }

    fn apply_camera(&mut self, intent: CameraIntent) {
        self.camera
            .request(intent.region, intent.duration_ms, intent.reason);
    }

    fn timer_commands(&self, change: &SelectionChange) -> Vec<ShellCommand> {
        let mut commands = Vec::with_capacity(2);
        if let Some(id) = change.cancel_timer {
            commands.push(ShellCommand::CancelTimer { id });
        }
        if let Some(id) = change.start_timer {
            commands.push(ShellCommand::StartTimer {
                id,
                after_ms: self.config.selection_expiry_ms,
            });
        }
        commands
    }

    fn initial_region(&self) -> Option<GeoRegion> {
        if let Some(device) = self.location.coordinate() {
            return Some(GeoRegion::around(device, self.config.reset_delta));
        }
        self.location
            .denial()
            .and_then(|_| self.catalog.fallback_region(self.config.reset_delta))
    }

    #[must_use]
    pub fn snapshot(&self) -> RenderSnapshot {
        let selection = self.selection.state();
        let selected_place = selection
            .selected_name
            .as_deref()
            .and_then(|name| self.catalog.find(name))
            .cloned();

        RenderSnapshot {
            location_status: self.location.status(),
            initial_region: self.initial_region(),
            user_location: self.location.coordinate(),
            filtered_places: self
                .catalog
                .filter(self.filter.active(), &self.search_text)
                .into_iter()
                .cloned()
                .collect(),
            selection,
            selected_place,
            pending_camera_request: self.camera.pending().copied(),
            active_country_filter: self.filter.active().clone(),
            countries: self.filter.countries().to_vec(),
            search_text: self.search_text.clone(),
            error: self.error.clone(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    #[must_use]
    pub const fn location(&self) -> &LocationSession {
        &self.location
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionController {
        &self.selection
    }

    #[must_use]
    pub const fn camera(&self) -> &CameraController {
        &self.camera
    }
}
