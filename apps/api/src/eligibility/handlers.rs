//! Axum route handlers for single-candidate scoring and the weight configuration.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::eligibility::weights::Weights;
use crate::eligibility::EligibilityResult;
use crate::models::candidate::CandidateSubmission;
use crate::models::filters::FilterCriteria;
use crate::models::lenient;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequest {
    #[serde(default, deserialize_with = "lenient::record_or_default")]
    pub candidate: CandidateSubmission,
    #[serde(default)]
    pub filters: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct WeightsResponse {
    pub weights: Weights,
}

/// POST /api/v1/eligibility
///
/// Scores one candidate. Never rejects on content: missing or malformed
/// fields fall back to their defaults.
pub async fn handle_compute_eligibility(
    State(state): State<AppState>,
    Json(request): Json<EligibilityRequest>,
) -> Json<EligibilityResult> {
    let filters = FilterCriteria::from_loose_value(request.filters.as_ref());
    let candidate = &request.candidate;

    Json(state.engine.compute(
        &candidate.analysis,
        &candidate.resume_text,
        &filters,
        &request.job_description,
    ))
}

/// GET /api/v1/weights
///
/// Returns the weight set currently used for scoring.
pub async fn handle_get_weights(State(state): State<AppState>) -> Json<WeightsResponse> {
    Json(WeightsResponse {
        weights: state.engine.weights().get_weights(),
    })
}

/// POST /api/v1/weights/reload
///
/// Re-reads the weight sources and atomically replaces the active set.
pub async fn handle_reload_weights(State(state): State<AppState>) -> Json<WeightsResponse> {
    let weights = state.engine.weights().reload_weights();
    Json(WeightsResponse { weights })
}
