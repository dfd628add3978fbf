use std::sync::Arc;

use crate::eligibility::EligibilityEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Scoring engine; owns the reloadable weight set.
    pub engine: Arc<EligibilityEngine>,
}
