//! URL helpers for the platform record API

/// Base URL of the record API when `[api] base_url` is empty
///
/// The dashboard is served by the site itself, so the API lives on the
/// page origin. Empty string if window is not available.
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    match location.origin() {
        Ok(origin) => origin,
        Err(_) => {
            let protocol = location.protocol().unwrap_or_else(|_| "https:".to_string());
            let host = location.host().unwrap_or_default();
            format!("{}//{}", protocol, host)
        }
    }
}

/// URL of a collection endpoint, optionally of one record in it
///
/// ```rust,ignore
/// let url = collection_url("", "faq", Some("123"));
/// // https://site.example/api/collections/faq/123
/// ```
pub fn collection_url(base: &str, collection: &str, id: Option<&str>) -> String {
    let base = match base.trim_end_matches('/') {
        "" => api_base(),
        configured => configured.to_string(),
    };
    let mut url = format!("{}/api/collections/{}", base, urlencoding::encode(collection));
    if let Some(id) = id {
        url.push('/');
        url.push_str(&urlencoding::encode(id));
    }
    url
}
