//! Tender Match - relevance scoring service for public procurement tenders
//!
//! This library scores tenders against a business profile on six weighted
//! criteria, ranks them, explains each score and suggests profile keywords
//! and cities.

pub mod config;
pub mod core;
pub mod error;
pub mod lexicon;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{EngineConfig, ScoringEngine, SimilarityMetric};
pub use error::EngineError;
pub use lexicon::Lexicon;
pub use models::{Profile, RelevanceTier, ScoreBreakdown, ScoringWeights, Tender};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let engine = ScoringEngine::default();
        assert_eq!(engine.config().weights, ScoringWeights::default());
        assert!(!Lexicon::default().sectors().is_empty());
    }
}
