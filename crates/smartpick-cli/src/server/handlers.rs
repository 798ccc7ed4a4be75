use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use smartpick_lib::config::{DEFAULT_TOP_N, NO_MATCH_MESSAGE};
use smartpick_lib::pipeline::Recommendation;
use smartpick_lib::runtime::Runtime;
use tracing::debug;

use super::error::ApiError;
use super::types::{HealthResponse, MessageResponse, RecommendRequest, RecommendResponse};

/// `POST /api/recommend`: envelope with a status message and the rows.
pub async fn api_recommend(
    State(runtime): State<Arc<Runtime>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let recommendation = run(runtime, payload?.0).await?;
    let status = status_for(&recommendation);
    let body = RecommendResponse {
        message: recommendation.message(),
        data: match recommendation {
            Recommendation::NoMatch => Vec::new(),
            Recommendation::Matches(phones) => phones,
        },
    };
    Ok((status, Json(body)).into_response())
}

/// `POST /recommend`: bare list of rows, or a message on no match.
pub async fn legacy_recommend(
    State(runtime): State<Arc<Runtime>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let recommendation = run(runtime, payload?.0).await?;
    Ok(match recommendation {
        Recommendation::NoMatch => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: NO_MATCH_MESSAGE,
            }),
        )
            .into_response(),
        Recommendation::Matches(phones) => Json(phones).into_response(),
    })
}

/// `GET /health`: dataset size and held-out model metrics.
pub async fn health(State(runtime): State<Arc<Runtime>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        phones: runtime.catalog.len(),
        brands: runtime.catalog.brands().len(),
        missing_columns: runtime.catalog.missing_columns().to_vec(),
        model: runtime.model.report.clone(),
    })
}

async fn run(runtime: Arc<Runtime>, request: RecommendRequest) -> Result<Recommendation, ApiError> {
    let top_n = request.top_n.unwrap_or(DEFAULT_TOP_N);
    debug!(query = %request.query, top_n, "Recommendation request");
    tokio::task::spawn_blocking(move || runtime.recommend(&request.query, top_n))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))
}

fn status_for(recommendation: &Recommendation) -> StatusCode {
    if recommendation.is_match() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}
