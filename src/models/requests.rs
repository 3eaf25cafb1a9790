use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Profile, Tender};

/// Request to rank candidate tenders for a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub profile: Profile,
    #[validate(length(max = 10000))]
    pub tenders: Vec<Tender>,
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<usize>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_score: Option<f64>,
    /// Reference instant for deadlines, defaults to the server clock
    pub now: Option<DateTime<Utc>>,
    /// Expand the profile's business keywords with known synonyms
    #[serde(default)]
    pub expand_keywords: bool,
}

/// Request to score a single tender
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub profile: Profile,
    pub tender: Tender,
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct KeywordSuggestQuery {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub sector: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CitySuggestQuery {
    #[validate(length(max = 200))]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RelatedKeywordsQuery {
    #[validate(length(min = 1, max = 200))]
    pub keyword: String,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

/// Request to extract keywords from free text
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtractKeywordsRequest {
    #[validate(length(max = 100000))]
    pub text: String,
    #[validate(range(min = 1, max = 50))]
    pub min_length: Option<usize>,
}

/// Request to compute sector affinity of a keyword list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AffinityRequest {
    #[validate(length(max = 1000))]
    pub keywords: Vec<String>,
}
