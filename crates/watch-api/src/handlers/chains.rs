use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use watch_allocations::ChainSelector;

use crate::{
    AppState,
    dto::{ApiResponse, ChainListResponse, ChainsQuery},
};

#[utoipa::path(
    get,
    path = "/allocations/chains",
    tag = "Allocations",
    params(
        ("selected" = Option<String>, Query, description = "Currently selected chain", example = "All")
    ),
    responses(
        (status = 200, description = "Chains available in the selector", body = ChainListResponse)
    )
)]
pub async fn list_chains(
    State(state): State<AppState>,
    Query(params): Query<ChainsQuery>,
) -> impl IntoResponse {
    let protocols = state.current_allocations();
    let selector = ChainSelector::new(params.selected);

    Json(ApiResponse::ok(ChainListResponse {
        selected: selector.selected().to_string(),
        chains: selector.options(&protocols),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_helpers::{read_json, state};

    async fn chains(selected: &str) -> serde_json::Value {
        let params = Query(ChainsQuery {
            selected: selected.to_string(),
        });
        let response = list_chains(State(state()), params).await.into_response();
        read_json(response).await.1
    }

    #[tokio::test]
    async fn test_all_is_listed_first() {
        let body = chains("All").await;

        assert_eq!(body["data"]["selected"], "All");
        let options = body["data"]["chains"].as_array().unwrap();
        let names: Vec<_> = options.iter().map(|o| o["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["All", "Ethereum", "Fantom"]);
        assert_eq!(options[0]["selected"], true);
        assert_eq!(options[0]["protocols_count"], 3);
        assert_eq!(options[1]["protocols_count"], 2);
    }

    #[tokio::test]
    async fn test_selected_chain_is_flagged() {
        let body = chains("Fantom").await;
        let options = body["data"]["chains"].as_array().unwrap();

        let selected: Vec<_> = options
            .iter()
            .filter(|o| o["selected"] == true)
            .map(|o| o["name"].as_str().unwrap())
            .collect();
        assert_eq!(selected, vec!["Fantom"]);
    }

    #[tokio::test]
    async fn test_unknown_selection_flags_nothing() {
        let body = chains("Solana").await;

        assert_eq!(body["data"]["selected"], "Solana");
        assert!(
            body["data"]["chains"]
                .as_array()
                .unwrap()
                .iter()
                .all(|o| o["selected"] == false)
        );
    }
}
