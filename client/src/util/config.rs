//! Client configuration resolved at startup.
//!
//! Values come from build-time environment variables with an optional
//! runtime override read from `window.ITDESK_CONFIG`, so a static deployment
//! can point at a different backend without rebuilding. Everything here is
//! public; never place secrets in it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
/// Request timeout applied by the browser transport.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// OAuth client id for Google Identity Services; empty disables the button.
    pub google_client_id: String,
    pub request_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            google_client_id: String::new(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Build-time values with runtime overrides applied.
    pub fn load() -> Self {
        let mut config = Self {
            api_base_url: option_env!("ITDESK_API_BASE_URL")
                .and_then(normalize_value)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned()),
            google_client_id: option_env!("ITDESK_GOOGLE_CLIENT_ID")
                .and_then(normalize_value)
                .unwrap_or_default(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        };
        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }
        log::debug!("api base url: {}", config.api_base_url);
        config
    }

    #[must_use]
    pub fn google_enabled(&self) -> bool {
        !self.google_client_id.is_empty()
    }

    /// Absolute URL for a backend path.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        build_url_with_base(&self.api_base_url, path)
    }
}

#[derive(Debug, Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    google_client_id: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.google_client_id {
        config.google_client_id = value;
    }
}

/// Join a base URL and a path with exactly one slash between them.
pub(crate) fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();
    if base.is_empty() {
        path.to_owned()
    } else {
        format!("{base}/{}", path.trim_start_matches('/'))
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(feature = "csr")]
fn runtime_config() -> Option<RuntimeConfig> {
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = js_sys::Reflect::get(&window, &JsValue::from_str("ITDESK_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let read = |key: &str| {
        js_sys::Reflect::get(&config, &JsValue::from_str(key))
            .ok()?
            .as_string()
            .as_deref()
            .and_then(normalize_value)
    };
    Some(RuntimeConfig {
        api_base_url: read("api_base_url"),
        google_client_id: read("google_client_id"),
    })
}

#[cfg(not(feature = "csr"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}
