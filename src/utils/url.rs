//! URL utilities for consistent URL handling
//!
//! The backend is addressed by a base URL that may or may not carry a
//! trailing slash depending on where it was configured; these helpers
//! normalize it so endpoint construction never produces double slashes.

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use vitrina::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://shop.example:8000"), "http://shop.example:8000");
/// assert_eq!(normalize_base_url("http://shop.example:8000/"), "http://shop.example:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a base URL and endpoint path
///
/// # Examples
///
/// ```
/// use vitrina::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://shop.example:8000", "products/cpu"),
///     "http://shop.example:8000/products/cpu"
/// );
/// assert_eq!(
///     construct_api_url("http://shop.example:8000/", "/ai/chat/"),
///     "http://shop.example:8000/ai/chat/"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}
