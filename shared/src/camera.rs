use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::GeoRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraReason {
    MarkerSelect,
    CountrySwitch,
    Reset,
}

/// An animated viewport change for the map renderer. `duration_ms` is a
/// hint; the renderer decides how to animate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRequest {
    pub seq: u64,
    pub region: GeoRegion,
    pub duration_ms: u32,
    pub reason: CameraReason,
}

/// Single-slot register for camera requests. A new request overwrites the
/// pending one; nothing is queued.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraController {
    next_seq: u64,
    pending: Option<CameraRequest>,
}

impl CameraController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_seq: 0,
            pending: None,
        }
    }

    pub fn request(
        &mut self,
        region: GeoRegion,
        duration_ms: u32,
        reason: CameraReason,
    ) -> CameraRequest {
        self.next_seq += 1;
        let request = CameraRequest {
            seq: self.next_seq,
            region,
            duration_ms,
            reason,
        };
        if let Some(previous) = self.pending.replace(request) {
            debug!(
                superseded = previous.seq,
                by = request.seq,
                ?reason,
                "camera request superseded"
            );
        }
        request
    }

    /// The renderer applied request `seq`. Only clears the slot if nothing
    /// newer has been written since.
    pub fn acknowledge(&mut self, seq: u64) -> bool {
        match self.pending {
            Some(pending) if pending.seq == seq => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&CameraRequest> {
        self.pending.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{Coordinate, RegionDelta};

    fn region(lat: f64, lon: f64) -> GeoRegion {
        GeoRegion::around(
            Coordinate::new(lat, lon).unwrap(),
            RegionDelta::new(0.0922, 0.0421),
        )
    }

    #[test]
    fn test_last_request_wins() {
        let mut camera = CameraController::new();
        let a = camera.request(region(1.0, 1.0), 1000, CameraReason::MarkerSelect);
        let b = camera.request(region(2.0, 2.0), 1500, CameraReason::CountrySwitch);
        let pending = camera.pending().unwrap();
        assert_eq!(pending.seq, b.seq);
        assert_eq!(pending.region, region(2.0, 2.0));
        assert_eq!(pending.reason, CameraReason::CountrySwitch);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_stale_acknowledge_keeps_newer_request() {
        let mut camera = CameraController::new();
        let a = camera.request(region(1.0, 1.0), 1000, CameraReason::MarkerSelect);
        let b = camera.request(region(2.0, 2.0), 1000, CameraReason::Reset);
        assert!(!camera.acknowledge(a.seq));
        assert_eq!(camera.pending().map(|r| r.seq), Some(b.seq));
        assert!(camera.acknowledge(b.seq));
        assert!(camera.pending().is_none());
        assert!(!camera.acknowledge(b.seq));
    }
}
