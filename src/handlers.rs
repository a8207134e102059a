use crate::errors::AppError;
use crate::models::{
    Contribution, ContributionRecord, ProjectionQuery, ProjectionResponse, SaveResponse,
};
use crate::projection::{compute_future_impact, format_currency, incremental_annual};
use crate::state::AppState;
use crate::storage::persist_record;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let record = state.record.lock().await;
    Html(render_index(&record))
}

pub async fn get_contribution(State(state): State<AppState>) -> Json<ContributionRecord> {
    let record = state.record.lock().await;
    Json(record.clone())
}

/// Applies the editable pair from `payload`; everything else stays as stored.
pub async fn update_contribution(
    State(state): State<AppState>,
    Json(payload): Json<ContributionRecord>,
) -> Result<Json<SaveResponse>, AppError> {
    if !payload.contribution_value.is_finite() {
        return Err(AppError::bad_request("contribution_value must be a finite number"));
    }

    let mut record = state.record.lock().await;
    let updated = record.with_contribution(payload.contribution());
    persist_record(&state.data_path, &updated).await?;
    *record = updated.clone();

    info!(
        contribution_type = %updated.contribution_type,
        value = updated.contribution_value,
        "contribution updated"
    );
    Ok(Json(SaveResponse::success(updated)))
}

pub async fn get_projection(
    State(state): State<AppState>,
    Query(query): Query<ProjectionQuery>,
) -> Json<ProjectionResponse> {
    let record = state.record.lock().await;
    let proposed = Contribution::new(query.contribution_type, query.contribution_value);
    let future_impact = compute_future_impact(
        record.contribution(),
        proposed,
        record.user_info.age,
        record.user_info.salary,
    );

    Json(ProjectionResponse {
        incremental_annual: incremental_annual(
            record.contribution(),
            proposed,
            record.user_info.salary,
        ),
        formatted: format_currency(future_impact),
        future_impact,
    })
}
