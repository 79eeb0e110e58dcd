//! Aggregate statistics endpoints

use axum::{Json, extract::State};
use tracing::info;

use crate::{
    api::{
        error::ApiResult,
        extract::ValidatedQuery,
        state::ApiState,
        types::{ErrorResponse, StatisticsQuery},
    },
    stats::{StatisticsBundle, compute_bundle},
    store::{Collection, Document},
};

/// GET /statistics/setups
///
/// Every setup document, unaggregated
#[utoipa::path(
    get,
    path = "/statistics/setups",
    responses(
        (status = 200, description = "All setup documents"),
        (status = 500, description = "Store failure"),
    ),
    tag = "statistics"
)]
pub async fn list_setups(State(state): State<ApiState>) -> ApiResult<Json<Vec<Document>>> {
    Ok(Json(state.store.find_all(Collection::Setup).await?))
}

/// GET /statistics/general?stats_for=<resource>
///
/// Statistics bundle for one resource type. An empty collection answers
/// `{"<resource>_count": 0, "empty": true}`.
#[utoipa::path(
    get,
    path = "/statistics/general",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Flat statistics bundle keyed by metric name"),
        (status = 400, description = "Missing or unknown stats_for", body = ErrorResponse),
        (status = 500, description = "Store failure"),
    ),
    tag = "statistics"
)]
pub async fn general_statistics(
    State(state): State<ApiState>,
    ValidatedQuery(query): ValidatedQuery<StatisticsQuery>,
) -> ApiResult<Json<StatisticsBundle>> {
    info!("computing statistics for {}", query.stats_for);

    let bundle = compute_bundle(state.store.as_ref(), query.stats_for).await?;
    Ok(Json(bundle))
}
