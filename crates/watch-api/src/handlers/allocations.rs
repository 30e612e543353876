use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    response::IntoResponse,
};
use watch_allocations::{ChainSelector, aggregate, parse_sort_key, parse_sort_order};
use watch_types::ChainData;

use crate::{
    AppState,
    dto::{AllocationsQuery, AllocationsResponse, AllocationsSummaryResponse, ApiResponse},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/allocations",
    tag = "Allocations",
    params(
        ("chain" = Option<String>, Query, description = "Chain to display, `All` aggregates every chain", example = "All"),
        ("sort_by" = Option<String>, Query, description = "Column to sort by: name, tvl, strategiesAmount or allocatedStrategiesAmount", example = "tvl"),
        ("order" = Option<String>, Query, description = "asc or desc, defaults to the column's natural order", example = "desc")
    ),
    responses(
        (status = 200, description = "Protocol allocations of the selected chain", body = AllocationsResponse),
        (status = 400, description = "Invalid parameters")
    )
)]
pub async fn get_allocations(
    State(state): State<AppState>,
    Query(params): Query<AllocationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sort_by = params
        .sort_by
        .as_deref()
        .map(parse_sort_key)
        .transpose()?
        .unwrap_or_default();
    let order = params
        .order
        .as_deref()
        .map(parse_sort_order)
        .transpose()?
        .unwrap_or_else(|| sort_by.default_order());

    let protocols = state.current_allocations();
    let selector = ChainSelector::new(params.chain);
    let response = match selector.view(&protocols) {
        Some(summary) => AllocationsResponse::from_summary(summary, sort_by, order),
        None => {
            tracing::debug!(chain = selector.selected(), "Unknown chain selected");
            AllocationsResponse::empty(selector.selected(), sort_by, order)
        }
    };

    Ok(Json(ApiResponse::ok(response)))
}

#[utoipa::path(
    get,
    path = "/allocations/summary",
    tag = "Allocations",
    responses(
        (status = 200, description = "Protocol allocations of every chain", body = AllocationsSummaryResponse)
    )
)]
pub async fn get_allocations_summary(State(state): State<AppState>) -> impl IntoResponse {
    let protocols = state.current_allocations();
    Json(ApiResponse::ok(AllocationsSummaryResponse::from(
        protocols.as_ref(),
    )))
}

#[utoipa::path(
    post,
    path = "/allocations/aggregate",
    tag = "Allocations",
    request_body = Vec<ChainData>,
    responses(
        (status = 200, description = "Protocol allocations of the posted snapshot", body = AllocationsSummaryResponse),
        (status = 400, description = "Malformed snapshot")
    )
)]
pub async fn aggregate_snapshot(
    payload: Result<Json<Vec<ChainData>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(chains) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let protocols = aggregate(&chains);
    Ok(Json(ApiResponse::ok(AllocationsSummaryResponse::from(
        &protocols,
    ))))
}
