// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    parse_deadline, DelayPreference, InterventionRadius, Profile, RelevanceTier, ScoreBreakdown,
    ScoringWeights, Tender,
};
pub use requests::{
    AffinityRequest, CitySuggestQuery, ExtractKeywordsRequest, KeywordSuggestQuery,
    RecommendRequest, RelatedKeywordsQuery, ScoreRequest,
};
pub use responses::{
    round_score, rounded_breakdown, AffinityResponse, CitiesResponse, ErrorResponse, HealthResponse,
    KeywordsResponse, Recommendation, RecommendationsResponse, ScoreResponse, SectorSummary,
    SectorsResponse,
};
