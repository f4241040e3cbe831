use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Logged and ignored; the screen keeps working.
    Recoverable,
    /// Terminal for the current screen session.
    Permanent,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    LocationPermissionDenied,
    LocationUnavailable,
    EmptyCountryMatch,
    InvalidCountryFilter,
    UnknownPlace,
    InvalidConfig,
    CatalogLoad,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::LocationPermissionDenied => "LOCATION_PERMISSION_DENIED",
            Self::LocationUnavailable => "LOCATION_UNAVAILABLE",
            Self::EmptyCountryMatch => "EMPTY_COUNTRY_MATCH",
            Self::InvalidCountryFilter => "INVALID_COUNTRY_FILTER",
            Self::UnknownPlace => "UNKNOWN_PLACE",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::CatalogLoad => "CATALOG_LOAD_ERROR",
        }
    }

    #[must_use]
    pub const fn default_severity(self) -> ErrorSeverity {
        match self {
            Self::EmptyCountryMatch
            | Self::InvalidCountryFilter
            | Self::UnknownPlace
            | Self::InvalidConfig => ErrorSeverity::Recoverable,
            Self::LocationPermissionDenied | Self::LocationUnavailable => ErrorSeverity::Permanent,
            Self::CatalogLoad => ErrorSeverity::Fatal,
        }
    }

    /// Whether an error of this kind is shown to the user rather than only logged.
    #[must_use]
    pub const fn is_surfaced(self) -> bool {
        !matches!(self.default_severity(), ErrorSeverity::Recoverable)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapError {
    #[error("permission to access location was denied")]
    PermissionDenied,

    #[error("location unavailable: {reason}")]
    LocationUnavailable { reason: String },

    #[error("no places found for country {country:?}")]
    EmptyCountryMatch { country: String },

    #[error("country filter {country:?} is not one of the catalog countries")]
    InvalidCountryFilter { country: String },

    #[error("no place named {name:?} in the catalog")]
    UnknownPlace { name: String },

    #[error("map config rejected: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to load place catalog: {reason}")]
    CatalogLoad { reason: String },
}

impl MapError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied => ErrorKind::LocationPermissionDenied,
            Self::LocationUnavailable { .. } => ErrorKind::LocationUnavailable,
            Self::EmptyCountryMatch { .. } => ErrorKind::EmptyCountryMatch,
            Self::InvalidCountryFilter { .. } => ErrorKind::InvalidCountryFilter,
            Self::UnknownPlace { .. } => ErrorKind::UnknownPlace,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            Self::CatalogLoad { .. } => ErrorKind::CatalogLoad,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Nothing in the map core is retried automatically; denial needs the
    /// user to change settings outside the app.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self {
            Self::PermissionDenied => {
                "Permission to access location was denied. Enable location access in Settings to see where you are."
                    .into()
            }
            Self::LocationUnavailable { .. } => {
                "Your current location could not be determined.".into()
            }
            Self::EmptyCountryMatch { .. } | Self::InvalidCountryFilter { .. } => {
                "That country is not available.".into()
            }
            Self::UnknownPlace { .. } => "That place could not be found.".into(),
            Self::InvalidConfig { .. } => "Map settings could not be applied.".into(),
            Self::CatalogLoad { .. } => "Places could not be loaded.".into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoordinateError {
    #[error("coordinate is not finite")]
    NonFinite,
    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate place name {0:?}")]
    DuplicateName(String),

    #[error("place at index {0} has an empty name")]
    EmptyName(usize),

    #[error("place {name:?} has invalid coordinates: {source}")]
    InvalidCoordinate {
        name: String,
        #[source]
        source: CoordinateError,
    },
}

impl From<CatalogError> for MapError {
    fn from(e: CatalogError) -> Self {
        Self::CatalogLoad {
            reason: e.to_string(),
        }
    }
}

pub type MapResult<T> = Result<T, MapError>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserFacingError {
    pub code: String,
    pub message: String,
    pub is_retryable: bool,
}

impl From<&MapError> for UserFacingError {
    fn from(e: &MapError) -> Self {
        Self {
            code: e.code().to_string(),
            message: e.user_facing_message(),
            is_retryable: e.is_retryable(),
        }
    }
}
