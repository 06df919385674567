use super::state::ApiState;
use super::system;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `/status` and `/stats`.
pub fn system_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(system::status)).routes(routes!(system::stats))
}
