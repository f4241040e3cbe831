use crate::catalog::PlaceCatalog;
use crate::config::MapConfig;
use crate::controller::MapInteractionController;
use crate::error::MapError;

/// Core state. The map screen itself lives in `screen` and only exists
/// between `Mounted` and `Unmounted`.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub config: MapConfig,
    pub catalog: Option<PlaceCatalog>,
    pub screen: Option<MapInteractionController>,
    /// Incremented on every mount; tags timer ids.
    pub mount_generation: u64,
    pub active_error: Option<MapError>,
}

impl Model {
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        Self {
            config: config.validated(),
            ..Self::default()
        }
    }

    /// A model whose catalog is already loaded, so mounting skips the
    /// bundled catalog.
    #[must_use]
    pub fn with_catalog(config: MapConfig, catalog: PlaceCatalog) -> Self {
        Self {
            catalog: Some(catalog),
            ..Self::new(config)
        }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.screen.is_some()
    }

    pub fn set_error(&mut self, error: MapError) {
        self.active_error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.active_error = None;
    }
}
