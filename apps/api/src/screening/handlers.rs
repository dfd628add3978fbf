//! Axum route handlers for the Screening API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::eligibility::weights::Weights;
use crate::errors::AppError;
use crate::models::candidate::CandidateSubmission;
use crate::models::filters::FilterCriteria;
use crate::models::lenient;
use crate::screening::export::{render_csv, CSV_FILENAME};
use crate::screening::shortlist::{apply_shortlist, ShortlistQuery};
use crate::screening::{screen_batch, CandidateReport};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenRequest {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub job_description: String,
    /// Object or JSON-encoded string; see `FilterCriteria::from_loose_value`.
    #[serde(default)]
    pub filters: Option<Value>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub candidates: Vec<CandidateSubmission>,
    #[serde(default)]
    pub shortlist: Option<ShortlistQuery>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenResponse {
    pub results: Vec<CandidateReport>,
    /// Candidates scored, before any shortlist filtering.
    pub total: usize,
    pub weights: Weights,
    pub scored_at: DateTime<Utc>,
}

struct ScreenOutcome {
    results: Vec<CandidateReport>,
    total: usize,
    weights: Weights,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Validate → score (off the async runtime) → rank → optional shortlist.
async fn run_screening(state: &AppState, request: ScreenRequest) -> Result<ScreenOutcome, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation("Job description is missing.".to_string()));
    }
    if request.candidates.is_empty() {
        return Err(AppError::Validation("No candidates submitted.".to_string()));
    }

    let filters = FilterCriteria::from_loose_value(request.filters.as_ref());
    let weights = state.engine.weights().get_weights();
    let total = request.candidates.len();

    info!(candidates = total, "Screening batch");

    let job_description = request.job_description;
    let candidates = request.candidates;
    let ranked = tokio::task::spawn_blocking(move || {
        screen_batch(candidates, &filters, &job_description, &weights)
    })
    .await
    .map_err(|e| anyhow::anyhow!("screening task failed: {e}"))?;

    let results = match &request.shortlist {
        Some(query) => apply_shortlist(&ranked, query),
        None => ranked,
    };

    Ok(ScreenOutcome {
        results,
        total,
        weights,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screen
///
/// Scores every submitted candidate against the job description and filters.
/// Results come back ranked by score, highest first, unless a shortlist query
/// asks for something else.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreenResponse>, AppError> {
    let outcome = run_screening(&state, request).await?;

    Ok(Json(ScreenResponse {
        results: outcome.results,
        total: outcome.total,
        weights: outcome.weights,
        scored_at: Utc::now(),
    }))
}

/// POST /api/v1/screen/export
///
/// Same pipeline as `/screen`, rendered as a CSV download.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Response, AppError> {
    let outcome = run_screening(&state, request).await?;
    let csv = render_csv(&outcome.results);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
