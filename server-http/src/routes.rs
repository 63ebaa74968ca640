use crate::handlers;
use crate::middleware::{ReadThroughLayer, auth_middleware, require_owner};
use crate::state::AppState;
use axum::{
    Extension, Router,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};
use shared::TtlSecs;
use showroom::documents::Collection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;

/// How long each route family stays cached.
pub mod ttl {
    use shared::TtlSecs;

    pub const INVENTORY: TtlSecs = TtlSecs(1800);
    pub const POSTS: TtlSecs = TtlSecs(900);
    pub const POST_SEARCH: TtlSecs = TtlSecs(300);
    pub const LEADS: TtlSecs = TtlSecs(600);
    pub const LEAD_ANALYTICS: TtlSecs = TtlSecs(1800);
    pub const PROFILE: TtlSecs = TtlSecs(300);
}

/// Build and configure the application router
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let cached = |ttl: TtlSecs| ReadThroughLayer::new(state.cache.clone(), ttl);
    let directory = || ReadThroughLayer::with_default_ttl(state.cache.clone());

    let public = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/api/auth/register", post(handlers::register))
        // Dealer directory
        .route("/api/dealer", get(handlers::list_dealers).layer(directory()))
        .route("/api/dealer/{id}", get(handlers::get_dealer).layer(directory()))
        .route(
            "/api/dealer/{id}/posts/search",
            get(handlers::search_posts).layer(cached(ttl::POST_SEARCH)),
        )
        .route("/api/dealer/{id}/leads", post(handlers::create_lead));

    let account = Router::new()
        .route("/api/auth/me", get(handlers::me))
        .route("/api/auth/profile", put(handlers::update_profile))
        .route("/api/auth/password", put(handlers::change_password))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    // Owner checks run before the cache so private entries are never served
    // to another dealer
    let leads = Router::new()
        .route(
            "/api/dealer/{id}/leads",
            get(handlers::list_leads).layer(cached(ttl::LEADS)),
        )
        .route(
            "/api/dealer/{id}/leads/analytics/summary",
            get(handlers::lead_summary).layer(cached(ttl::LEAD_ANALYTICS)),
        )
        .route(
            "/api/dealer/{id}/leads/{lead_id}",
            get(handlers::get_lead).put(handlers::update_lead),
        )
        .route("/api/dealer/{id}/leads/{lead_id}/notes", post(handlers::add_lead_note))
        .route_layer(from_fn(require_owner))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public)
        .merge(account)
        .merge(leads)
        .merge(collection_routes(&state, Collection::Vehicles, ttl::INVENTORY))
        .merge(collection_routes(&state, Collection::Accessories, ttl::INVENTORY))
        .merge(collection_routes(&state, Collection::Posts, ttl::POSTS))
        // Middleware
        .layer(NormalizePathLayer::trim_trailing_slash())
        .layer(TraceLayer::new_for_http())
        .layer(cors(allowed_origins))
        .with_state(state)
}

/// Public cached reads plus owner-only writes for one dealer collection.
fn collection_routes(state: &AppState, collection: Collection, ttl: TtlSecs) -> Router<AppState> {
    let list_path = format!("/api/dealer/{{id}}/{collection}");
    let item_path = format!("/api/dealer/{{id}}/{collection}/{{item_id}}");

    let reads = Router::new()
        .route(
            &list_path,
            get(handlers::list_documents).layer(ReadThroughLayer::new(state.cache.clone(), ttl)),
        )
        .route(
            &item_path,
            get(handlers::get_document).layer(ReadThroughLayer::new(state.cache.clone(), ttl)),
        );

    let writes = Router::new()
        .route(&list_path, post(handlers::create_document))
        .route(
            &item_path,
            put(handlers::update_document).delete(handlers::delete_document),
        )
        .route_layer(from_fn(require_owner))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    reads.merge(writes).layer(Extension(collection))
}

fn cors(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
