//! Facility data loading pipeline.
//!
//! This module provides functionality for:
//! - Fetching category source documents (browser fetch or local files)
//! - Filtering records per category and reprojecting their points
//! - Loading every category concurrently and reporting readiness
//! - Formatting per-facility popup content

mod channel;
mod fetch;
mod loader;
mod orchestrator;
mod popup;
mod record;

pub use channel::{LoadChannel, LoadPoll};
pub use fetch::{platform_fetcher, SharedSourceCache};
pub use loader::load_category;
pub use orchestrator::{apply_readiness, load_all};
pub use popup::FacilityPopup;
pub use record::{props, FacilityRecord, SourceDocument};

use crate::geo::TransformError;
use std::future::Future;

/// Errors that can occur while loading a category.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The source could not be retrieved (network failure, bad status, missing file).
    Fetch(String),
    /// The source was retrieved but is not a usable GeoJSON document.
    Parse(String),
    /// The source declares coordinates that cannot be converted.
    Transform(TransformError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch(msg) => write!(f, "Fetch failed: {}", msg),
            LoadError::Parse(msg) => write!(f, "Parse error: {}", msg),
            LoadError::Transform(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<TransformError> for LoadError {
    fn from(e: TransformError) -> Self {
        LoadError::Transform(e)
    }
}

/// Retrieves source documents by location.
///
/// Note: no `Send` bound; on WASM the returned future holds JS values.
pub trait SourceFetcher {
    /// Fetches the document body at `location`.
    fn fetch(&self, location: &str) -> impl Future<Output = Result<String, LoadError>>;
}

/// Load status of a category layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    LoadFailed(LoadError),
    /// The category has no source; permanent, not a failure.
    NoDataAvailable,
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }
}

/// The records of one category for one load cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLayer {
    pub category_id: String,
    pub records: Vec<FacilityRecord>,
    pub state: LoadState,
}

impl CategoryLayer {
    pub fn not_loaded(category_id: impl Into<String>) -> Self {
        Self::with_state(category_id, LoadState::NotLoaded)
    }

    pub fn no_data(category_id: impl Into<String>) -> Self {
        Self::with_state(category_id, LoadState::NoDataAvailable)
    }

    pub fn failed(category_id: impl Into<String>, error: LoadError) -> Self {
        Self::with_state(category_id, LoadState::LoadFailed(error))
    }

    pub fn loaded(category_id: impl Into<String>, records: Vec<FacilityRecord>) -> Self {
        Self {
            category_id: category_id.into(),
            records,
            state: LoadState::Loaded,
        }
    }

    fn with_state(category_id: impl Into<String>, state: LoadState) -> Self {
        Self {
            category_id: category_id.into(),
            records: Vec::new(),
            state,
        }
    }
}

/// All category layers of one load cycle, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryLayers {
    layers: Vec<CategoryLayer>,
}

impl CategoryLayers {
    pub fn new(layers: Vec<CategoryLayer>) -> Self {
        Self { layers }
    }

    /// Placeholder layers for a catalog whose load has not finished.
    pub fn not_loaded<'a>(ids: impl Iterator<Item = &'a str>) -> Self {
        Self::new(ids.map(CategoryLayer::not_loaded).collect())
    }

    pub fn get(&self, category_id: &str) -> Option<&CategoryLayer> {
        self.layers.iter().find(|l| l.category_id == category_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryLayer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Ids of every layer that finished loading.
    pub fn loaded_ids(&self) -> impl Iterator<Item = &str> {
        self.layers
            .iter()
            .filter(|l| l.state.is_loaded())
            .map(|l| l.category_id.as_str())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory fetcher shared by the pipeline and state tests.

    use super::{LoadError, SourceFetcher};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned bodies and records every requested location.
    #[derive(Default)]
    pub struct FakeFetcher {
        bodies: HashMap<String, Result<String, LoadError>>,
        pub requests: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_body(mut self, location: &str, body: impl Into<String>) -> Self {
            self.bodies.insert(location.to_string(), Ok(body.into()));
            self
        }

        pub fn with_error(mut self, location: &str, error: LoadError) -> Self {
            self.bodies.insert(location.to_string(), Err(error));
            self
        }

        pub fn request_count(&self, location: &str) -> usize {
            self.requests
                .borrow()
                .iter()
                .filter(|l| l.as_str() == location)
                .count()
        }
    }

    impl SourceFetcher for FakeFetcher {
        async fn fetch(&self, location: &str) -> Result<String, LoadError> {
            self.requests.borrow_mut().push(location.to_string());
            self.bodies
                .get(location)
                .cloned()
                .unwrap_or_else(|| Err(LoadError::Fetch(format!("404 Not Found: {}", location))))
        }
    }
}
