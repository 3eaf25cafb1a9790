// Core algorithm exports
pub mod engine;
pub mod filters;
pub mod regions;
pub mod scoring;
pub mod similarity;

pub use engine::{EngineConfig, ScoringEngine};
pub use filters::{find_exclusion, is_excluded, Exclusion};
pub use regions::{region_of, same_region, suggest_cities, Region, REGIONS};
pub use scoring::calculate_breakdown;
pub use similarity::{SimilarityFn, SimilarityMetric};
