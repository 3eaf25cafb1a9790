use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EngineError;

/// Geographic reach a business is willing to work in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum InterventionRadius {
    Local,
    Regional,
    National,
    International,
}

impl FromStr for InterventionRadius {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "regional" | "régional" => Ok(Self::Regional),
            "national" => Ok(Self::National),
            "international" => Ok(Self::International),
            other => Err(EngineError::invalid_field(
                "interventionRadius",
                format!("unknown value `{other}`, expected one of local, regional, national, international"),
            )),
        }
    }
}

impl TryFrom<String> for InterventionRadius {
    type Error = EngineError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// How far ahead a business likes tender deadlines to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DelayPreference {
    /// 30 days or less
    Short,
    /// between 30 and 90 days
    Medium,
    /// more than 90 days
    Long,
    Any,
}

impl FromStr for DelayPreference {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // French values as emitted by tender feeds
        match raw.trim().to_lowercase().as_str() {
            "short" | "court" => Ok(Self::Short),
            "medium" | "moyen" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            "any" | "tous" => Ok(Self::Any),
            other => Err(EngineError::invalid_field(
                "delayPreference",
                format!("unknown value `{other}`, expected one of short, medium, long, any"),
            )),
        }
    }
}

impl TryFrom<String> for DelayPreference {
    type Error = EngineError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// Business profile with the preferences used for tender matching.
///
/// Every list may be empty, which means "no constraint" for the matching
/// criterion. Only sectors and cities can exclude a tender; classifications
/// are a preference, never an exclusion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub preferred_cities: Vec<String>,
    #[serde(default)]
    pub excluded_cities: Vec<String>,
    #[serde(default)]
    pub excluded_sectors: Vec<String>,
    #[serde(default)]
    pub intervention_radius: Option<InterventionRadius>,
    #[serde(default)]
    pub budget_min: Option<f64>,
    #[serde(default)]
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub max_guarantee: Option<f64>,
    #[serde(default)]
    pub delay_preference: Option<DelayPreference>,
    #[serde(default)]
    pub business_keywords: Vec<String>,
    #[serde(default)]
    pub preferred_classifications: Vec<String>,
}

/// A public tender candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    pub sector: String,
    pub city: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub guarantee: Option<f64>,
    #[serde(deserialize_with = "deserialize_deadline")]
    pub deadline: DateTime<Utc>,
    pub object: String,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub analyzed_text: Option<String>,
    /// Filled in on ranked copies only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendation_reasons: Vec<String>,
}

impl Tender {
    pub fn new(
        sector: impl Into<String>,
        city: impl Into<String>,
        object: impl Into<String>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            reference: None,
            issuer: None,
            sector: sector.into(),
            city: city.into(),
            budget: None,
            guarantee: None,
            deadline,
            object: object.into(),
            classification: None,
            analyzed_text: None,
            relevance_score: None,
            recommendation_reasons: Vec::new(),
        }
    }

    /// Copy of this tender carrying the score and reasons of a breakdown
    pub fn annotated(mut self, breakdown: &ScoreBreakdown) -> Self {
        self.relevance_score = Some(breakdown.total);
        self.recommendation_reasons = breakdown.reasons.clone();
        self
    }
}

/// Parse a tender deadline.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.f]` or
/// `YYYY-MM-DD HH:MM:SS` (read as UTC), and bare dates (midnight UTC).
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, EngineError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(EngineError::invalid_field("deadline", "deadline is empty"));
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            EngineError::invalid_field("deadline", format!("`{raw}` is not a valid timestamp"))
        })
}

fn deserialize_deadline<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_deadline(&raw).map_err(serde::de::Error::custom)
}

/// Per (profile, tender) relevance result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub sector: f64,
    pub geography: f64,
    pub financial: f64,
    pub temporal: f64,
    pub keyword: f64,
    pub classification: f64,
    pub total: f64,
    pub reasons: Vec<String>,
    pub penalties: Vec<String>,
    pub excluded: bool,
}

/// Recommendation tier of a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelevanceTier {
    #[serde(rename = "high relevance")]
    High,
    #[serde(rename = "relevant")]
    Relevant,
    #[serde(rename = "low relevance")]
    Low,
}

impl RelevanceTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high relevance",
            Self::Relevant => "relevant",
            Self::Low => "low relevance",
        }
    }
}

impl fmt::Display for RelevanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub sector: f64,
    pub geography: f64,
    pub financial: f64,
    pub temporal: f64,
    pub keyword: f64,
    pub classification: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.sector
            + self.geography
            + self.financial
            + self.temporal
            + self.keyword
            + self.classification
    }

    fn as_array(&self) -> [f64; 6] {
        [
            self.sector,
            self.geography,
            self.financial,
            self.temporal,
            self.keyword,
            self.classification,
        ]
    }

    /// Weights must be finite, non-negative and sum to 1.0
    pub fn validate(&self) -> Result<(), EngineError> {
        let sum = self.sum();
        let well_formed = self
            .as_array()
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0);

        if !well_formed || (sum - 1.0).abs() > 1e-6 {
            return Err(EngineError::InvalidWeights { sum });
        }
        Ok(())
    }

    /// Weighted dot product of the six sub-scores
    pub fn weighted_total(&self, breakdown: &ScoreBreakdown) -> f64 {
        breakdown.sector * self.sector
            + breakdown.geography * self.geography
            + breakdown.financial * self.financial
            + breakdown.temporal * self.temporal
            + breakdown.keyword * self.keyword
            + breakdown.classification * self.classification
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            sector: 0.25,
            geography: 0.20,
            financial: 0.20,
            temporal: 0.15,
            keyword: 0.15,
            classification: 0.05,
        }
    }
}
