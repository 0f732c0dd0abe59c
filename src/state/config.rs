//! Runtime configuration.
//!
//! On WASM the configuration comes from the page URL's query string
//! (`?data=...&dedupe=0&debounce=300&show=mrf,glass`). Native builds start
//! from an optional `facility-map.json` in the working directory and then
//! apply the same keys from `FACILITY_MAP_*` environment variables.

use serde::Deserialize;

/// Viewer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root that catalog source locations are resolved against.
    pub data_root: String,
    /// Fetch each shared source location once per load cycle.
    pub dedupe_fetches: bool,
    /// Delay between a canvas resize and the layout refit.
    pub resize_debounce_ms: u64,
    /// Categories to show once the first load completes.
    pub initially_visible: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_root: "data".to_string(),
            dedupe_fetches: true,
            resize_debounce_ms: 250,
            initially_visible: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Applies `key=value` settings over the defaults.
    ///
    /// Unknown keys are ignored; unparseable values are logged and skipped.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::default().with_pairs(pairs)
    }

    /// Applies `key=value` settings over this configuration.
    pub fn with_pairs<'a>(mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (key, value) in pairs {
            match key {
                "data" if !value.is_empty() => self.data_root = value.to_string(),
                "dedupe" => match parse_bool(value) {
                    Some(v) => self.dedupe_fetches = v,
                    None => log::warn!("Ignoring invalid dedupe value: {}", value),
                },
                "debounce" => match value.parse() {
                    Ok(ms) => self.resize_debounce_ms = ms,
                    Err(e) => log::warn!("Ignoring invalid debounce value {}: {}", value, e),
                },
                "show" => {
                    self.initially_visible = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
        }

        self
    }

    /// Parses a JSON configuration document; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a URL query string (with or without the leading `?`).
    ///
    /// Pairs are split on the raw `&` and `=` first; each key and value is
    /// then percent-decoded on its own, with `+` read as a space.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Loads configuration for the current platform.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let config = Self::from_query(&search);
        log::info!("Loaded config from URL: {:?}", config);
        config
    }

    /// Loads configuration for the current platform.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        const CONFIG_FILE: &str = "facility-map.json";
        const VARS: [(&str, &str); 4] = [
            ("FACILITY_MAP_DATA", "data"),
            ("FACILITY_MAP_DEDUPE", "dedupe"),
            ("FACILITY_MAP_DEBOUNCE_MS", "debounce"),
            ("FACILITY_MAP_SHOW", "show"),
        ];

        let values: Vec<(&str, String)> = VARS
            .iter()
            .filter_map(|(var, key)| std::env::var(var).ok().map(|v| (*key, v)))
            .collect();

        let base = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid {}: {}", CONFIG_FILE, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        let config = base.with_pairs(values.iter().map(|(k, v)| (*k, v.as_str())));
        log::info!("Loaded config: {:?}", config);
        config
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
