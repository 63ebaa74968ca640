//! Read-through response cache for GET routes.
//!
//! Each request moves through `Checking -> HitServed` or
//! `Checking -> PassThroughArmed -> WritebackDone`. A cache read failure
//! counts as a miss and a failed write-back never affects the response the
//! client receives.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, StatusCode, header, response::Parts},
    response::{IntoResponse, Response},
};
use crate::error::ApiError;
use bytes::Bytes;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use shared::TtlSecs;
use showroom::{Cache, keys};
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, warn};

pub const X_CACHE: &str = "x-cache";

/// Response lifetime when a route does not pick its own. Shorter than the
/// store-level `TtlSecs::DEFAULT`.
pub const DEFAULT_TTL: TtlSecs = TtlSecs(300);

/// What the cache keeps for a response: the status and the exact JSON body.
#[derive(Debug, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub body: Box<RawValue>,
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        let body = String::from(self.body.get());
        (
            status,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
                (header::HeaderName::from_static(X_CACHE), HeaderValue::from_static("HIT")),
            ],
            body,
        )
            .into_response()
    }
}

/// Layer caching successful JSON responses for `ttl`, keyed by path and query.
#[derive(Clone, Debug)]
pub struct ReadThroughLayer {
    cache: Cache,
    ttl: TtlSecs,
}

impl ReadThroughLayer {
    pub fn new(cache: Cache, ttl: TtlSecs) -> Self {
        Self { cache, ttl }
    }

    pub fn with_default_ttl(cache: Cache) -> Self {
        Self::new(cache, DEFAULT_TTL)
    }

    pub fn ttl(&self) -> TtlSecs {
        self.ttl
    }
}

impl<S> Layer<S> for ReadThroughLayer {
    type Service = ReadThroughService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ReadThroughService {
            inner,
            cache: self.cache.clone(),
            ttl: self.ttl,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReadThroughService<S> {
    inner: S,
    cache: Cache,
    ttl: TtlSecs,
}

impl<S> Service<Request> for ReadThroughService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // The readied service handles this request; the clone waits for the next
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let cache = self.cache.clone();
        let ttl = self.ttl;

        Box::pin(async move {
            let key = keys::request_key(request.uri().path(), request.uri().query());

            if let Some(cached) = cache.get::<CachedResponse>(&key).await {
                debug!(key = %key, "Serving cached response");
                return Ok(cached.into_response());
            }

            let response = inner.call(request).await?;
            Ok(write_back(&cache, &key, ttl, response).await)
        })
    }
}

/// Buffer a fresh response and store it when it is cacheable.
///
/// A body stream that fails mid-read has already lost the handler's output,
/// so the client gets a JSON 500 marked as a miss and nothing is stored.
async fn write_back(cache: &Cache, key: &str, ttl: TtlSecs, response: Response) -> Response {
    if !cache.is_enabled() || !is_cacheable(&response) {
        return mark_miss(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read response body");
            let error = ApiError::Internal(format!("response body for {key}: {e}"));
            return mark_miss(error.into_response());
        }
    };

    match serde_json::from_slice::<Box<RawValue>>(&bytes) {
        Ok(body) => {
            let entry = CachedResponse {
                status: parts.status.as_u16(),
                body,
            };
            if cache.set(key, &entry, Some(ttl)).await {
                debug!(key = %key, ttl = ttl.0, "Cached response");
            }
        }
        Err(e) => warn!(key = %key, error = %e, "Response is not valid JSON, not caching"),
    }

    mark_miss(rebuild(parts, bytes))
}

fn is_cacheable(response: &Response) -> bool {
    response.status().is_success()
        && response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"))
}

fn rebuild(parts: Parts, bytes: Bytes) -> Response {
    Response::from_parts(parts, Body::from(bytes))
}

fn mark_miss(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::HeaderName::from_static(X_CACHE),
        HeaderValue::from_static("MISS"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::get};
    use serde_json::{Value, json};
    use showroom::test_support::FailingStore;
    use showroom::{KeyValueStore, StoreClient};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage_engine::MokaStore;
    use tower::ServiceExt;

    fn memory_cache() -> Cache {
        Cache::new(StoreClient::connected(Arc::new(MokaStore::new("test", None))))
    }

    /// Router whose single GET route counts handler invocations.
    fn counting_app<F, R>(cache: Cache, handler: F) -> (Router, Arc<AtomicUsize>)
    where
        F: Fn() -> R + Clone + Send + Sync + 'static,
        R: IntoResponse + 'static,
    {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let route = get(move || {
            let counter = counter.clone();
            let handler = handler.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                handler()
            }
        })
        .layer(ReadThroughLayer::new(cache, TtlSecs(1800)));

        (Router::new().route("/items", route), calls)
    }

    async fn send(app: &Router, uri: &str) -> (StatusCode, Option<String>, Value) {
        let response = app
            .clone()
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let x_cache = response
            .headers()
            .get(X_CACHE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, x_cache, body)
    }

    #[tokio::test]
    async fn test_second_request_served_from_cache_with_status() {
        let (app, calls) = counting_app(memory_cache(), || {
            (StatusCode::CREATED, Json(json!({"id": "a1"})))
        });

        let (status, x_cache, body) = send(&app, "/items").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(x_cache.as_deref(), Some("MISS"));
        assert_eq!(body, json!({"id": "a1"}));

        let (status, x_cache, body) = send(&app, "/items").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(x_cache.as_deref(), Some("HIT"));
        assert_eq!(body, json!({"id": "a1"}));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_query_string_is_part_of_key() {
        let (app, calls) = counting_app(memory_cache(), || Json(json!({"ok": true})));

        send(&app, "/items?a=1&b=2").await;
        send(&app, "/items?b=2&a=1").await;
        send(&app, "/items").await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let (_, x_cache, _) = send(&app, "/items?a=1&b=2").await;
        assert_eq!(x_cache.as_deref(), Some("HIT"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_error_responses_are_not_cached() {
        let (app, calls) = counting_app(memory_cache(), || {
            (StatusCode::NOT_FOUND, Json(json!({"error": "Vehicle not found"})))
        });

        let (status, _, _) = send(&app, "/items").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, x_cache, _) = send(&app, "/items").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(x_cache.as_deref(), Some("MISS"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_json_responses_are_not_cached() {
        let (app, calls) = counting_app(memory_cache(), || "plain text");

        send(&app, "/items").await;
        send(&app, "/items").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failing_store_falls_through_to_handler() {
        let cache = Cache::new(StoreClient::connected(Arc::new(FailingStore)));
        let (app, calls) = counting_app(cache, || Json(json!({"vehicles": []})));

        for _ in 0..2 {
            let (status, x_cache, body) = send(&app, "/items").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(x_cache.as_deref(), Some("MISS"));
            assert_eq!(body, json!({"vehicles": []}));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_runs_handler() {
        let (app, calls) = counting_app(Cache::disabled(), || Json(json!({"ok": true})));

        send(&app, "/items").await;
        send(&app, "/items").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_treated_as_miss_and_rewritten() {
        let store = Arc::new(MokaStore::new("test", None));
        store
            .set_with_expiry("/items", "not json".to_string(), TtlSecs(60))
            .await
            .unwrap();
        let cache = Cache::new(StoreClient::connected(store));
        let (app, calls) = counting_app(cache, || Json(json!({"id": "a1"})));

        let (status, x_cache, body) = send(&app, "/items").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(x_cache.as_deref(), Some("MISS"));
        assert_eq!(body, json!({"id": "a1"}));

        let (_, x_cache, _) = send(&app, "/items").await;
        assert_eq!(x_cache.as_deref(), Some("HIT"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hit_replays_exact_body_bytes() {
        let cache = memory_cache();
        let (app, _) = counting_app(cache.clone(), || {
            ([(header::CONTENT_TYPE, "application/json")], r#"{"z":1,"a":2}"#)
        });

        send(&app, "/items").await;

        let entry: CachedResponse = cache.get("/items").await.unwrap();
        assert_eq!(entry.status, 200);
        assert_eq!(entry.body.get(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_default_ttl_is_shorter_than_store_default() {
        let layer = ReadThroughLayer::with_default_ttl(Cache::disabled());
        assert_eq!(layer.ttl(), TtlSecs(300));
        assert!(layer.ttl() < TtlSecs::DEFAULT);

        let layer = ReadThroughLayer::new(Cache::disabled(), TtlSecs(1800));
        assert_eq!(layer.ttl(), TtlSecs(1800));
    }

    #[tokio::test]
    async fn test_broken_body_stream_returns_json_error_and_is_not_cached() {
        let cache = memory_cache();
        let (app, calls) = counting_app(cache.clone(), || {
            let stream = futures::stream::once(async {
                Err::<Bytes, std::io::Error>(std::io::Error::other("connection reset"))
            });
            (
                [(header::CONTENT_TYPE, "application/json")],
                Body::from_stream(stream),
            )
        });

        for _ in 0..2 {
            let (status, x_cache, body) = send(&app, "/items").await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(x_cache.as_deref(), Some("MISS"));
            assert_eq!(body, json!({"error": "Server error"}));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.get::<CachedResponse>("/items").await.is_none());
    }
}
