use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};

use utoipa::OpenApi as OpenApiT;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, errors::ApiError, handlers};

pub fn api_router<T: OpenApiT>(_state: AppState) -> Router<AppState> {
    let open_api = T::openapi();
    // Group the table endpoints under a dedicated "/allocations" router
    let allocations_router = Router::new()
        .route("/", get(handlers::get_allocations))
        .route("/chains", get(handlers::list_chains))
        .route("/columns", get(handlers::get_table_columns))
        .route("/summary", get(handlers::get_allocations_summary))
        .route("/aggregate", post(handlers::aggregate_snapshot));

    Router::new()
        .route("/health", get(health))
        .nest("/v1/allocations", allocations_router)
        .merge(SwaggerUi::new("/v1/docs").url("/v1/docs/openapi.json", open_api))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> ApiError {
    ApiError::NotFound("The requested resource was not found".to_string())
}
