use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{RelevanceTier, ScoreBreakdown, Tender};

/// One ranked tender
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub tender: Tender,
    /// Total score rounded to 3 decimals
    pub score: f64,
    pub category: RelevanceTier,
    pub breakdown: ScoreBreakdown,
}

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
    pub total_candidates: usize,
    pub total_results: usize,
    pub min_score: f64,
    pub generated_at: DateTime<Utc>,
}

/// Response for the single score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub score: f64,
    pub category: RelevanceTier,
    pub breakdown: ScoreBreakdown,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesResponse {
    pub region: Option<String>,
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityResponse {
    pub affinity: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorSummary {
    pub name: String,
    pub keyword_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorsResponse {
    pub sectors: Vec<SectorSummary>,
}

/// Round a score for display
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Breakdown with every score rounded for display
pub fn rounded_breakdown(breakdown: ScoreBreakdown) -> ScoreBreakdown {
    ScoreBreakdown {
        sector: round_score(breakdown.sector),
        geography: round_score(breakdown.geography),
        financial: round_score(breakdown.financial),
        temporal: round_score(breakdown.temporal),
        keyword: round_score(breakdown.keyword),
        classification: round_score(breakdown.classification),
        total: round_score(breakdown.total),
        ..breakdown
    }
}
