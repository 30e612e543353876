use axum::{Json, extract::Query, response::IntoResponse};
use watch_allocations::{TableHeader, parse_sort_key};

use crate::{
    dto::{ApiResponse, ColumnsQuery, TableHeaderResponse},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/allocations/columns",
    tag = "Allocations",
    params(
        ("sort_by" = Option<String>, Query, description = "Active sort column", example = "tvl")
    ),
    responses(
        (status = 200, description = "Header of the allocations table", body = TableHeaderResponse),
        (status = 400, description = "Unknown sort column")
    )
)]
pub async fn get_table_columns(
    Query(params): Query<ColumnsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut header = TableHeader::default();
    if let Some(key) = params.sort_by.as_deref() {
        header.select(parse_sort_key(key)?);
    }

    Ok(Json(ApiResponse::ok(TableHeaderResponse {
        sort_by: header.sort_by(),
        columns: header.columns(),
    })))
}
