use axum::Router;
use hbnb::domain::constants::API_PREFIX;
use hbnb::kernel::server::{ApiState, not_found};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "HBnB API", description = "States, cities, users, places, reviews and amenities"))]
struct ApiDoc;

pub(crate) fn init(state: ApiState) -> Router {
    // Separate the OpenAPI routes and the API documentation object
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest(API_PREFIX, hbnb::server::api_router())
        .with_state(state)
        .split_for_parts();

    Router::new()
        .merge(api_routes)
        .merge(Scalar::with_url("/api", api_doc))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
