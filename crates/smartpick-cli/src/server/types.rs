use serde::{Deserialize, Serialize};
use smartpick_lib::model::metrics::RegressionReport;
use smartpick_lib::pipeline::PhoneSummary;

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub query: String,
    /// Defaults to five phones.
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub message: &'static str,
    pub data: Vec<PhoneSummary>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub phones: usize,
    pub brands: usize,
    pub missing_columns: Vec<&'static str>,
    pub model: RegressionReport,
}
