//! Shared core for the places map screen.
//!
//! The platform shell renders the map and owns the location service and
//! timers; this crate decides which places are shown, which one is
//! selected, and where the camera should go.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod camera;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod filter;
pub mod geo;
pub mod location;
pub mod model;
pub mod selection;
pub mod view;

use geo::RegionDelta;

pub use app::App;
pub use camera::{CameraController, CameraReason, CameraRequest};
pub use capabilities::{Capabilities, Effect};
pub use catalog::{CountryFilter, Place, PlaceCatalog};
pub use config::MapConfig;
pub use controller::{MapInteractionController, RenderSnapshot, ShellCommand};
pub use crux_core::{render::Render, App as CruxApp};
pub use error::{ErrorKind, ErrorSeverity, MapError, MapResult, UserFacingError};
pub use event::Event;
pub use geo::{Coordinate, GeoRegion};
pub use location::{DenialReason, LocationReading, LocationSession, LocationStatus};
pub use model::Model;
pub use selection::{SelectionController, SelectionState, TimerId};
pub use view::{MarkerView, PinColor, ViewModel};

pub const SELECTION_EXPIRY_MS: u64 = 30_000;
pub const MIN_SELECTION_EXPIRY_MS: u64 = 1_000;
pub const MAX_ANIMATION_MS: u32 = 10_000;

pub const MARKER_DELTA: RegionDelta = RegionDelta::new(0.0922, 0.0421);
pub const MARKER_DURATION_MS: u32 = 1_000;
pub const COUNTRY_DELTA: RegionDelta = RegionDelta::new(12.0, 12.0);
pub const COUNTRY_DURATION_MS: u32 = 1_500;
pub const RESET_DELTA: RegionDelta = RegionDelta::new(0.0922, 0.0421);
pub const RESET_DURATION_MS: u32 = 1_000;

/// Extra margin around the catalog when no device location is available.
pub const FALLBACK_REGION_PADDING: f64 = 0.1;
pub const DEFAULT_HIGHLIGHT_COUNTRY: &str = "moldova";
