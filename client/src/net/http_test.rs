use session::Access;

use super::*;

fn transport(base: &str) -> GlooTransport {
    GlooTransport::new(&AppConfig { api_base_url: base.to_owned(), ..AppConfig::default() })
}

#[test]
fn url_joins_base_and_request_path() {
    let request = OutboundRequest::post("/logout/", &serde_json::json!({ "refresh": "r" }), Access::Bearer).unwrap();
    assert_eq!(transport("https://it.example.com/api/").url(&request), "https://it.example.com/api/logout/");
}

#[test]
fn aborted_fetch_is_a_timeout() {
    assert_eq!(
        classify_failure("AbortError: The user aborted a request."),
        TransportError::Timeout
    );
}

#[test]
fn other_fetch_failures_are_network_errors() {
    assert_eq!(
        classify_failure("TypeError: Failed to fetch"),
        TransportError::Network("TypeError: Failed to fetch".to_owned())
    );
}

#[cfg(not(feature = "csr"))]
#[tokio::test]
async fn send_outside_browser_reports_network_error() {
    let request = OutboundRequest::post("/login/", &serde_json::json!({}), Access::Public).unwrap();
    let result = transport("http://localhost").send(&request).await;
    assert!(matches!(result, Err(TransportError::Network(_))));
}
