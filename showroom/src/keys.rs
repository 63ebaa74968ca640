//! Cache key derivation.
//!
//! Response keys are the request path plus the raw query string, exactly as
//! received. Query parameters are not reordered, so `?a=1&b=2` and `?b=2&a=1`
//! are distinct entries. Patterns use Redis glob syntax.

/// Key for a response cached by the read-through layer.
pub fn request_key(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{path}?{q}"),
        _ => path.to_string(),
    }
}

/// Profile entry of a dealer, populated cache-aside by the `me` handler.
pub fn profile(dealer_id: &str) -> String {
    format!("user:{dealer_id}")
}

pub fn dealer_directory() -> String {
    "/api/dealer".to_string()
}

/// Paginated/filtered variants of the dealer directory.
pub fn dealer_directory_queries() -> String {
    "/api/dealer[?]*".to_string()
}

pub fn dealer(dealer_id: &str) -> String {
    format!("/api/dealer/{dealer_id}")
}

/// Every cached response under one of a dealer's collections (list, items,
/// queries, search).
pub fn collection_pattern(dealer_id: &str, collection: &str) -> String {
    format!("/api/dealer/{dealer_id}/{collection}*")
}
