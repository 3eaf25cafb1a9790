use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{
    scoring::calculate_breakdown,
    similarity::{SimilarityFn, SimilarityMetric},
};
use crate::error::EngineError;
use crate::models::{Profile, RelevanceTier, ScoreBreakdown, ScoringWeights, Tender};

pub const DEFAULT_RECOMMENDATION_THRESHOLD: f64 = 0.6;
pub const DEFAULT_HIGH_RELEVANCE_THRESHOLD: f64 = 0.8;

/// Engine tuning, validated once at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    pub recommendation_threshold: f64,
    pub high_relevance_threshold: f64,
    pub similarity: SimilarityMetric,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            recommendation_threshold: DEFAULT_RECOMMENDATION_THRESHOLD,
            high_relevance_threshold: DEFAULT_HIGH_RELEVANCE_THRESHOLD,
            similarity: SimilarityMetric::default(),
        }
    }
}

impl EngineConfig {
    /// Weights must sum to 1.0 and 0 <= recommendation <= high relevance <= 1
    pub fn validate(&self) -> Result<(), EngineError> {
        self.weights.validate()?;

        for (name, value) in [
            ("recommendation_threshold", self.recommendation_threshold),
            ("high_relevance_threshold", self.high_relevance_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::InvalidThreshold {
                    name,
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }

        if self.recommendation_threshold > self.high_relevance_threshold {
            return Err(EngineError::InvalidThreshold {
                name: "recommendation_threshold",
                reason: format!(
                    "{} is above the high relevance threshold {}",
                    self.recommendation_threshold, self.high_relevance_threshold
                ),
            });
        }

        Ok(())
    }
}

/// Relevance scoring and ranking engine
///
/// # Pipeline
/// 1. Six criterion scores per tender (sector, geography, financial,
///    temporal, keyword, classification)
/// 2. Weighted aggregation
/// 3. Exclusion override
/// 4. Threshold, stable ranking and truncation
#[derive(Clone)]
pub struct ScoringEngine {
    config: EngineConfig,
    similarity: SimilarityFn,
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ScoringEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            similarity: config.similarity.function(),
            config,
        })
    }

    pub fn with_default_config() -> Self {
        let config = EngineConfig::default();
        Self {
            similarity: config.similarity.function(),
            config,
        }
    }

    /// Replace the sector similarity metric
    pub fn with_similarity(mut self, similarity: SimilarityFn) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score one tender against a profile at instant `now`
    pub fn compute_score(&self, profile: &Profile, tender: &Tender, now: DateTime<Utc>) -> ScoreBreakdown {
        calculate_breakdown(profile, tender, now, &self.config.weights, self.similarity)
    }

    /// Rank tenders for a profile.
    ///
    /// # Arguments
    /// * `profile` - The business profile
    /// * `tenders` - Candidate tenders, in the caller's order
    /// * `limit` - Maximum number of results
    /// * `threshold` - Minimum total score kept
    /// * `now` - Reference instant for deadlines
    ///
    /// # Returns
    /// Annotated tenders with their breakdown, by descending total. Tenders
    /// with equal totals keep their input order.
    pub fn rank(
        &self,
        profile: &Profile,
        tenders: Vec<Tender>,
        limit: usize,
        threshold: f64,
        now: DateTime<Utc>,
    ) -> Vec<(Tender, ScoreBreakdown)> {
        if limit == 0 || tenders.is_empty() {
            return Vec::new();
        }

        let total_candidates = tenders.len();

        // Indexed parallel map: the collected Vec is in input order
        let scored: Vec<(Tender, ScoreBreakdown)> = tenders
            .into_par_iter()
            .map(|tender| {
                let breakdown = self.compute_score(profile, &tender, now);
                (tender, breakdown)
            })
            .collect();

        let mut ranked: Vec<(Tender, ScoreBreakdown)> = scored
            .into_iter()
            .filter(|(_, breakdown)| breakdown.total >= threshold)
            .map(|(tender, breakdown)| (tender.annotated(&breakdown), breakdown))
            .collect();

        // sort_by is stable, equal totals stay in candidate order
        ranked.sort_by(|a, b| b.1.total.total_cmp(&a.1.total));
        ranked.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} tenders (threshold {:.2}, limit {})",
            ranked.len(),
            total_candidates,
            threshold,
            limit
        );

        ranked
    }

    /// `rank` with the configured recommendation threshold
    pub fn recommend(
        &self,
        profile: &Profile,
        tenders: Vec<Tender>,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<(Tender, ScoreBreakdown)> {
        self.rank(profile, tenders, limit, self.config.recommendation_threshold, now)
    }

    /// Tier of a total score using the configured thresholds
    pub fn categorize(&self, total: f64) -> RelevanceTier {
        self.categorize_with(total, self.config.recommendation_threshold)
    }

    /// Tier of a total score using the threshold passed to `rank`
    pub fn categorize_with(&self, total: f64, threshold: f64) -> RelevanceTier {
        if total >= self.config.high_relevance_threshold {
            RelevanceTier::High
        } else if total >= threshold {
            RelevanceTier::Relevant
        } else {
            RelevanceTier::Low
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::with_default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DelayPreference, InterventionRadius};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn create_profile() -> Profile {
        Profile {
            sectors: vec!["informatique".to_string()],
            preferred_cities: vec!["Rabat".to_string()],
            intervention_radius: Some(InterventionRadius::Regional),
            budget_max: Some(500_000.0),
            delay_preference: Some(DelayPreference::Medium),
            business_keywords: vec!["développement web".to_string()],
            ..Profile::default()
        }
    }

    fn create_tender(reference: &str, city: &str, days_ahead: i64) -> Tender {
        let mut tender = Tender::new(
            "Informatique",
            city,
            "Développement web pour portail",
            now() + Duration::days(days_ahead),
        );
        tender.reference = Some(reference.to_string());
        tender.budget = Some(300_000.0);
        tender
    }

    #[test]
    fn test_invalid_weights_rejected_at_construction() {
        let config = EngineConfig {
            weights: ScoringWeights {
                sector: 0.9,
                ..ScoringWeights::default()
            },
            ..EngineConfig::default()
        };
        assert!(matches!(
            ScoringEngine::new(config),
            Err(EngineError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn test_thresholds_validated() {
        let config = EngineConfig {
            recommendation_threshold: 0.9,
            ..EngineConfig::default()
        };
        assert!(ScoringEngine::new(config).is_err());

        let config = EngineConfig {
            high_relevance_threshold: 1.5,
            ..EngineConfig::default()
        };
        assert!(ScoringEngine::new(config).is_err());
    }

    #[test]
    fn test_rank_sorted_and_filtered() {
        let engine = ScoringEngine::with_default_config();
        let profile = create_profile();

        let tenders = vec![
            create_tender("far", "Agadir", 45),
            create_tender("home", "Rabat", 45),
            create_tender("expired", "Rabat", -3),
            create_tender("region", "Salé", 45),
        ];

        // expired scores 0.825, far 0.855
        let ranked = engine.rank(&profile, tenders, 10, 0.85, now());

        let refs: Vec<_> = ranked
            .iter()
            .map(|(t, _)| t.reference.clone().unwrap())
            .collect();
        assert_eq!(refs, vec!["home", "region", "far"]);
        assert!(ranked.iter().all(|(_, b)| b.total >= 0.85));
        assert!(ranked.windows(2).all(|w| w[0].1.total >= w[1].1.total));
    }

    #[test]
    fn test_rank_annotates_tenders() {
        let engine = ScoringEngine::with_default_config();
        let ranked = engine.rank(&create_profile(), vec![create_tender("a", "Rabat", 45)], 5, 0.0, now());

        let (tender, breakdown) = &ranked[0];
        assert_eq!(tender.relevance_score, Some(breakdown.total));
        assert_eq!(tender.recommendation_reasons, breakdown.reasons);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let engine = ScoringEngine::with_default_config();
        let tenders: Vec<Tender> = (0..50)
            .map(|i| create_tender(&i.to_string(), "Rabat", 45))
            .collect();

        let ranked = engine.rank(&create_profile(), tenders, 50, 0.0, now());

        let refs: Vec<String> = ranked.into_iter().map(|(t, _)| t.reference.unwrap()).collect();
        let expected: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        assert_eq!(refs, expected);
    }

    #[test]
    fn test_rank_respects_limit() {
        let engine = ScoringEngine::with_default_config();
        let tenders: Vec<Tender> = (0..20)
            .map(|i| create_tender(&i.to_string(), "Rabat", 30 + i))
            .collect();

        assert_eq!(engine.rank(&create_profile(), tenders.clone(), 5, 0.0, now()).len(), 5);
        assert!(engine.rank(&create_profile(), tenders, 0, 0.0, now()).is_empty());
    }

    #[test]
    fn test_rank_empty_candidates() {
        let engine = ScoringEngine::with_default_config();
        assert!(engine.rank(&create_profile(), Vec::new(), 10, 0.6, now()).is_empty());
    }

    #[test]
    fn test_categorize_boundaries() {
        let engine = ScoringEngine::with_default_config();
        assert_eq!(engine.categorize(0.8), RelevanceTier::High);
        assert_eq!(engine.categorize(0.6), RelevanceTier::Relevant);
        assert_eq!(engine.categorize(0.59), RelevanceTier::Low);
        assert_eq!(engine.categorize_with(0.55, 0.5), RelevanceTier::Relevant);
    }

    #[test]
    fn test_custom_similarity() {
        let engine = ScoringEngine::with_default_config().with_similarity(|_, _| 0.0);
        let mut profile = create_profile();
        profile.sectors = vec!["santé".to_string()];

        let breakdown = engine.compute_score(&profile, &create_tender("a", "Rabat", 45), now());
        assert_eq!(breakdown.sector, 0.1);
    }
}
