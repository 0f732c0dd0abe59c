//! Source fetchers.
//!
//! On WASM sources are requested with the browser `fetch` API relative to
//! the page's data root. Native builds read the same relative paths from a
//! local data directory.

use super::{LoadError, SourceFetcher};
use futures_util::future::{LocalBoxFuture, Shared};
use futures_util::FutureExt;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Joins a catalog source location onto a data root.
///
/// Absolute URLs and absolute paths are used as-is.
pub fn resolve_location(root: &str, location: &str) -> String {
    if location.contains("://") || location.starts_with('/') || root.is_empty() {
        return location.to_string();
    }
    format!(
        "{}/{}",
        root.trim_end_matches('/'),
        location.trim_start_matches("./")
    )
}

/// Browser fetcher backed by `window.fetch`.
#[cfg(target_arch = "wasm32")]
pub struct WebFetcher {
    data_root: String,
}

#[cfg(target_arch = "wasm32")]
impl WebFetcher {
    pub fn new(data_root: impl Into<String>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl SourceFetcher for WebFetcher {
    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let url = resolve_location(&self.data_root, location);
        let js_err = |e: wasm_bindgen::JsValue| LoadError::Fetch(format!("{}: {:?}", url, e));

        let window = web_sys::window().ok_or_else(|| LoadError::Fetch("No window".to_string()))?;

        let init = web_sys::RequestInit::new();
        init.set_method("GET");
        init.set_mode(web_sys::RequestMode::Cors);
        let request = web_sys::Request::new_with_str_and_init(&url, &init).map_err(js_err)?;
        request
            .headers()
            .set("Accept", "application/geo+json, application/json")
            .map_err(js_err)?;

        let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;

        if !response.ok() {
            return Err(LoadError::Fetch(format!(
                "HTTP {} {} for {}",
                response.status(),
                response.status_text(),
                url
            )));
        }

        let body = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        body.as_string()
            .ok_or_else(|| LoadError::Parse(format!("{}: response body is not text", url)))
    }
}

/// Native fetcher reading sources from a local data directory.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileFetcher {
    data_root: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileFetcher {
    pub fn new(data_root: impl Into<String>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SourceFetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        let path = resolve_location(&self.data_root, location);
        std::fs::read_to_string(&path).map_err(|e| LoadError::Fetch(format!("{}: {}", path, e)))
    }
}

/// The fetcher for the current platform.
#[cfg(target_arch = "wasm32")]
pub fn platform_fetcher(data_root: &str) -> WebFetcher {
    WebFetcher::new(data_root)
}

/// The fetcher for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub fn platform_fetcher(data_root: &str) -> FileFetcher {
    FileFetcher::new(data_root)
}

type SharedFetch = Shared<LocalBoxFuture<'static, Result<String, LoadError>>>;

/// Fetcher wrapper that requests each location at most once.
///
/// Categories sharing a source file all await the same in-flight request.
/// Lives for one load cycle; a reload starts with an empty cache.
pub struct SharedSourceCache<F> {
    inner: Rc<F>,
    fetches: RefCell<HashMap<String, SharedFetch>>,
}

impl<F: SourceFetcher + 'static> SharedSourceCache<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner: Rc::new(inner),
            fetches: RefCell::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: SourceFetcher + 'static> SourceFetcher for SharedSourceCache<F> {
    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        let fetch = self
            .fetches
            .borrow_mut()
            .entry(location.to_string())
            .or_insert_with(|| {
                let inner = Rc::clone(&self.inner);
                let location = location.to_string();
                async move { inner.fetch(&location).await }
                    .boxed_local()
                    .shared()
            })
            .clone();
        fetch.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::testing::FakeFetcher;

    #[test]
    fn test_resolve_location() {
        assert_eq!(resolve_location("data", "a.geojson"), "data/a.geojson");
        assert_eq!(resolve_location("data/", "./a.geojson"), "data/a.geojson");
        assert_eq!(resolve_location("", "a.geojson"), "a.geojson");
        assert_eq!(
            resolve_location("data", "https://example.org/a.geojson"),
            "https://example.org/a.geojson"
        );
        assert_eq!(resolve_location("data", "/srv/a.geojson"), "/srv/a.geojson");
    }

    #[test]
    fn test_cache_shares_errors_too() {
        let cache = SharedSourceCache::new(FakeFetcher::new());
        let first = pollster::block_on(cache.fetch("missing.geojson"));
        let second = pollster::block_on(cache.fetch("missing.geojson"));

        assert!(matches!(first, Err(LoadError::Fetch(_))));
        assert_eq!(first, second);
        assert_eq!(cache.inner().request_count("missing.geojson"), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_fetcher_reports_missing_files() {
        let fetcher = FileFetcher::new("definitely/not/a/real/dir");
        let result = pollster::block_on(fetcher.fetch("a.geojson"));
        assert!(matches!(result, Err(LoadError::Fetch(msg)) if msg.contains("a.geojson")));
    }
}
