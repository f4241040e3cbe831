use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// Validated lat/lon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn validate(self) -> Result<Self, CoordinateError> {
        Self::new(self.latitude, self.longitude)
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = CoordinateError;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(latitude, longitude)
    }
}

/// Size of a viewport in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionDelta {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl RegionDelta {
    #[must_use]
    pub const fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }

    /// Clamp into `(0, 180]` x `(0, 360]`, replacing non-finite or
    /// non-positive values with `fallback`.
    #[must_use]
    pub fn clamped(self, fallback: Self) -> Self {
        let fix = |v: f64, max: f64, default: f64| {
            if v.is_finite() && v > 0.0 {
                v.min(max)
            } else {
                default
            }
        };
        Self {
            latitude_delta: fix(self.latitude_delta, 180.0, fallback.latitude_delta),
            longitude_delta: fix(self.longitude_delta, 360.0, fallback.longitude_delta),
        }
    }
}

/// A camera viewport: center plus span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl GeoRegion {
    #[must_use]
    pub const fn around(center: Coordinate, delta: RegionDelta) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: delta.latitude_delta,
            longitude_delta: delta.longitude_delta,
        }
    }

    #[must_use]
    pub const fn center(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Smallest region containing every point, grown by `padding` on each
    /// side and never narrower than `min_delta`. `None` for no points.
    #[must_use]
    pub fn bounding<I>(points: I, padding: f64, min_delta: RegionDelta) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_lat, mut max_lat) = (first.latitude, first.latitude);
        let (mut min_lon, mut max_lon) = (first.longitude, first.longitude);

        for p in iter {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lon = min_lon.min(p.longitude);
            max_lon = max_lon.max(p.longitude);
        }

        let lat_span = ((max_lat - min_lat) * (1.0 + 2.0 * padding)).max(min_delta.latitude_delta);
        let lon_span =
            ((max_lon - min_lon) * (1.0 + 2.0 * padding)).max(min_delta.longitude_delta);

        Some(Self {
            latitude: (min_lat + max_lat) / 2.0,
            longitude: (min_lon + max_lon) / 2.0,
            latitude_delta: lat_span.min(180.0),
            longitude_delta: lon_span.min(360.0),
        })
    }
}
