use super::*;

fn config(base: &str) -> AppConfig {
    AppConfig { api_base_url: base.to_owned(), ..AppConfig::default() }
}

#[test]
fn build_url_joins_with_single_slash() {
    assert_eq!(config("https://api.example.com/api/").build_url("/login/"), "https://api.example.com/api/login/");
    assert_eq!(config("https://api.example.com/api").build_url("login/"), "https://api.example.com/api/login/");
}

#[test]
fn build_url_with_empty_base_is_relative() {
    assert_eq!(config("  ").build_url("/logout/"), "/logout/");
}

#[test]
fn runtime_overrides_replace_present_values_only() {
    let mut cfg = AppConfig::default();
    apply_runtime_overrides(
        &mut cfg,
        RuntimeConfig { api_base_url: None, google_client_id: normalize_value(" client-123 ") },
    );
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.google_client_id, "client-123");
    assert!(cfg.google_enabled());
}

#[test]
fn blank_values_normalize_to_none() {
    assert_eq!(normalize_value(""), None);
    assert_eq!(normalize_value("   "), None);
    assert_eq!(normalize_value(" https://x.io ").as_deref(), Some("https://x.io"));
}

#[test]
fn default_has_ten_second_timeout_and_no_google() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.request_timeout_ms, 10_000);
    assert!(!cfg.google_enabled());
}
