use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::MapError;
use crate::geo::Coordinate;

/// A single device position fix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationReading {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub timestamp_ms: u64,
}

impl LocationReading {
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(self.latitude, self.longitude).ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DenialReason {
    PermissionDenied,
    Unavailable { reason: String },
}

impl From<&DenialReason> for MapError {
    fn from(reason: &DenialReason) -> Self {
        match reason {
            DenialReason::PermissionDenied => Self::PermissionDenied,
            DenialReason::Unavailable { reason } => Self::LocationUnavailable {
                reason: reason.clone(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum SessionState {
    Unrequested,
    AwaitingPermission,
    FetchingPosition,
    Granted {
        reading: LocationReading,
        coordinate: Coordinate,
    },
    Denied(DenialReason),
}

/// What the shell needs to do after a permission answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStep {
    FetchPosition,
    Denied,
    /// The answer arrived out of order and was dropped.
    Ignored,
}

/// Coarse status exposed to the view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocationStatus {
    Unknown,
    Requesting,
    Granted {
        latitude: f64,
        longitude: f64,
        accuracy: Option<f64>,
    },
    Denied {
        reason: DenialReason,
    },
}

/// One-shot permission request plus position fetch. Each session leaves
/// `Unrequested` exactly once and ends in exactly one terminal state;
/// nothing is retried.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationSession {
    state: SessionState,
}

impl Default for LocationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SessionState::Unrequested,
        }
    }

    /// Returns `true` if the permission request should be sent now.
    pub fn begin(&mut self) -> bool {
        if self.state != SessionState::Unrequested {
            return false;
        }
        self.state = SessionState::AwaitingPermission;
        true
    }

    pub fn permission_resolved(&mut self, granted: bool) -> PermissionStep {
        if self.state != SessionState::AwaitingPermission {
            warn!(granted, "permission answer outside of a pending request");
            return PermissionStep::Ignored;
        }
        if granted {
            self.state = SessionState::FetchingPosition;
            PermissionStep::FetchPosition
        } else {
            self.finish_denied(DenialReason::PermissionDenied);
            PermissionStep::Denied
        }
    }

    /// Accepts the fix only while a fetch is outstanding, that is after a
    /// grant. A fix with invalid coordinates ends the session as unavailable.
    pub fn resolve(&mut self, reading: LocationReading) -> bool {
        if self.state != SessionState::FetchingPosition {
            warn!(pending = self.is_pending(), "location reading without an outstanding fetch");
            return false;
        }
        match Coordinate::new(reading.latitude, reading.longitude) {
            Ok(coordinate) => {
                info!(accuracy = ?reading.accuracy, "location granted");
                self.state = SessionState::Granted {
                    reading,
                    coordinate,
                };
            }
            Err(e) => self.finish_denied(DenialReason::Unavailable {
                reason: e.to_string(),
            }),
        }
        true
    }

    pub fn deny(&mut self, reason: DenialReason) -> bool {
        if !self.is_pending() {
            warn!(?reason, "location denial after session completed");
            return false;
        }
        self.finish_denied(reason);
        true
    }

    fn finish_denied(&mut self, reason: DenialReason) {
        info!(?reason, "location denied");
        self.state = SessionState::Denied(reason);
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(
            self.state,
            SessionState::AwaitingPermission | SessionState::FetchingPosition
        )
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            SessionState::Granted { .. } | SessionState::Denied(_)
        )
    }

    #[must_use]
    pub fn reading(&self) -> Option<&LocationReading> {
        match &self.state {
            SessionState::Granted { reading, .. } => Some(reading),
            _ => None,
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self.state {
            SessionState::Granted { coordinate, .. } => Some(coordinate),
            _ => None,
        }
    }

    #[must_use]
    pub fn denial(&self) -> Option<&DenialReason> {
        match &self.state {
            SessionState::Denied(reason) => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> LocationStatus {
        match &self.state {
            SessionState::Unrequested => LocationStatus::Unknown,
            SessionState::AwaitingPermission | SessionState::FetchingPosition => {
                LocationStatus::Requesting
            }
            SessionState::Granted {
                reading,
                coordinate,
            } => LocationStatus::Granted {
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
                accuracy: reading.accuracy,
            },
            SessionState::Denied(reason) => LocationStatus::Denied {
                reason: reason.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(lat: f64, lon: f64) -> LocationReading {
        LocationReading {
            latitude: lat,
            longitude: lon,
            accuracy: Some(5.0),
            timestamp_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_begin_happens_once() {
        let mut session = LocationSession::new();
        assert_eq!(session.status(), LocationStatus::Unknown);
        assert!(session.begin());
        assert!(!session.begin());
        assert_eq!(session.status(), LocationStatus::Requesting);
    }

    #[test]
    fn test_granted_flow() {
        let mut session = LocationSession::new();
        session.begin();
        assert_eq!(session.permission_resolved(true), PermissionStep::FetchPosition);
        assert!(session.is_pending());
        assert!(session.resolve(reading(47.0, 28.8)));
        assert!(session.is_terminal());
        assert_eq!(session.coordinate().unwrap().latitude, 47.0);
        assert!(matches!(session.status(), LocationStatus::Granted { accuracy: Some(_), .. }));
    }

    #[test]
    fn test_permission_denied_is_terminal() {
        let mut session = LocationSession::new();
        session.begin();
        assert_eq!(session.permission_resolved(false), PermissionStep::Denied);
        assert_eq!(session.denial(), Some(&DenialReason::PermissionDenied));
        assert!(!session.resolve(reading(1.0, 1.0)));
        assert!(!session.deny(DenialReason::PermissionDenied));
        assert!(session.reading().is_none());
    }

    #[test]
    fn test_answers_before_begin_are_ignored() {
        let mut session = LocationSession::new();
        assert_eq!(session.permission_resolved(true), PermissionStep::Ignored);
        assert!(!session.resolve(reading(1.0, 1.0)));
        assert_eq!(session.status(), LocationStatus::Unknown);
    }

    #[test]
    fn test_reading_before_grant_is_ignored() {
        let mut session = LocationSession::new();
        session.begin();
        assert!(!session.resolve(reading(1.0, 2.0)));
        assert_eq!(session.status(), LocationStatus::Requesting);
        assert!(session.coordinate().is_none());

        assert_eq!(session.permission_resolved(false), PermissionStep::Denied);
        assert_eq!(
            session.status(),
            LocationStatus::Denied {
                reason: DenialReason::PermissionDenied
            }
        );
    }

    #[test]
    fn test_failure_while_awaiting_permission_is_terminal() {
        let mut session = LocationSession::new();
        session.begin();
        assert!(session.deny(DenialReason::Unavailable {
            reason: "services off".into()
        }));
        assert_eq!(session.permission_resolved(true), PermissionStep::Ignored);
        assert!(session.is_terminal());
    }

    #[test]
    fn test_invalid_fix_becomes_unavailable() {
        let mut session = LocationSession::new();
        session.begin();
        session.permission_resolved(true);
        assert!(session.resolve(reading(f64::NAN, 0.0)));
        assert!(matches!(
            session.denial(),
            Some(DenialReason::Unavailable { .. })
        ));
    }

    #[test]
    fn test_second_terminal_outcome_is_dropped() {
        let mut session = LocationSession::new();
        session.begin();
        session.permission_resolved(true);
        assert!(session.resolve(reading(10.0, 10.0)));
        assert!(!session.resolve(reading(20.0, 20.0)));
        assert_eq!(session.coordinate().unwrap().latitude, 10.0);
    }

    #[test]
    fn test_denial_maps_to_error() {
        assert_eq!(
            MapError::from(&DenialReason::PermissionDenied),
            MapError::PermissionDenied
        );
        assert!(matches!(
            MapError::from(&DenialReason::Unavailable { reason: "timeout".into() }),
            MapError::LocationUnavailable { .. }
        ));
    }
}
