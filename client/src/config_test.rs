use super::*;

/// # Safety
/// Env mutation is process-wide; all env assertions live in one test.
unsafe fn clear_studio_env() {
    unsafe {
        std::env::remove_var("STUDIO_BASE_URL");
        std::env::remove_var("STUDIO_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("STUDIO_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults_and_overrides() {
    unsafe { clear_studio_env() };
    let cfg = ClientConfig::from_env();
    assert_eq!(cfg, ClientConfig::default());

    unsafe {
        std::env::set_var("STUDIO_BASE_URL", "https://shop.example.test/");
        std::env::set_var("STUDIO_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("STUDIO_CONNECT_TIMEOUT_SECS", "not-a-number");
    }
    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.base_url, "https://shop.example.test");
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);

    unsafe { clear_studio_env() };
}

#[test]
fn api_url_joins_prefix_and_endpoint() {
    let cfg = ClientConfig { base_url: "http://localhost:8080".to_owned(), ..ClientConfig::default() };
    assert_eq!(cfg.api_url("/cart/3"), "http://localhost:8080/api/v1/cart/3");
}

#[test]
fn normalize_base_url_trims_whitespace_and_slashes() {
    assert_eq!(normalize_base_url("  http://h:1// "), "http://h:1");
}
