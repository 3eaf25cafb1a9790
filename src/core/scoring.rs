use chrono::{DateTime, Utc};

use crate::core::{filters::find_exclusion, regions::same_region, similarity::SimilarityFn};
use crate::models::{DelayPreference, InterventionRadius, Profile, ScoreBreakdown, ScoringWeights, Tender};

/// Score returned when a profile expresses no preference for a criterion
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Financial penalties never push the score below this; 0 is reserved for
/// exclusions
pub const FINANCIAL_FLOOR: f64 = 0.1;

/// Penalty appended when an exclusion rule forces the total to 0
pub const EXCLUSION_PENALTY: &str = "Sector or city excluded by your profile";

const SECTOR_STRONG_SIMILARITY: f64 = 0.7;
const SECTOR_WEAK_SIMILARITY: f64 = 0.4;
const SECTOR_MISMATCH_SCORE: f64 = 0.1;

const BUDGET_OVER_MAX_FACTOR: f64 = 0.2;
const BUDGET_UNDER_MIN_FACTOR: f64 = 0.7;
const GUARANTEE_OVER_MAX_FACTOR: f64 = 0.1;

const SHORT_DELAY_DAYS: i64 = 30;
const LONG_DELAY_DAYS: i64 = 90;

const SECONDS_PER_DAY: i64 = 86_400;

/// Reasons collected while scoring one tender
#[derive(Debug, Default, Clone)]
pub struct Explanation {
    pub reasons: Vec<String>,
    pub penalties: Vec<String>,
}

impl Explanation {
    fn reason(&mut self, text: String) {
        self.reasons.push(text);
    }

    fn penalty(&mut self, text: String) {
        self.penalties.push(text);
    }
}

/// Compute the full six-criterion breakdown for one tender.
///
/// total = sector * w_sector + geography * w_geography + financial * w_financial
///       + temporal * w_temporal + keyword * w_keyword
///       + classification * w_classification
///
/// An exclusion forces the total to 0 but keeps the sub-scores.
pub fn calculate_breakdown(
    profile: &Profile,
    tender: &Tender,
    now: DateTime<Utc>,
    weights: &ScoringWeights,
    similarity: SimilarityFn,
) -> ScoreBreakdown {
    let mut notes = Explanation::default();

    let sector = score_sector(profile, tender, similarity, &mut notes);
    let geography = score_geography(profile, tender, &mut notes);
    let financial = score_financial(profile, tender, &mut notes);
    let temporal = score_temporal(profile, tender, now, &mut notes);
    let keyword = score_keywords(profile, tender, &mut notes);
    let classification = score_classification(profile, tender, &mut notes);

    let mut breakdown = ScoreBreakdown {
        sector,
        geography,
        financial,
        temporal,
        keyword,
        classification,
        total: 0.0,
        reasons: notes.reasons,
        penalties: notes.penalties,
        excluded: false,
    };

    match find_exclusion(profile, tender) {
        Some(exclusion) => {
            tracing::trace!("tender {:?} excluded: {}", tender.reference, exclusion);
            breakdown.excluded = true;
            breakdown.penalties.push(EXCLUSION_PENALTY.to_string());
        }
        None => breakdown.total = weights.weighted_total(&breakdown).clamp(0.0, 1.0),
    }

    breakdown
}

/// Sector score (0-1): exact match, then fuzzy similarity
pub fn score_sector(
    profile: &Profile,
    tender: &Tender,
    similarity: SimilarityFn,
    notes: &mut Explanation,
) -> f64 {
    let sectors = non_blank_lowercase(&profile.sectors);
    if sectors.is_empty() {
        return NEUTRAL_SCORE;
    }

    let tender_sector = tender.sector.trim().to_lowercase();
    if sectors.iter().any(|s| *s == tender_sector) {
        notes.reason(format!("Sector {} matches your activities", tender.sector));
        return 1.0;
    }

    let best = sectors
        .iter()
        .map(|s| similarity(s, &tender_sector).clamp(0.0, 1.0))
        .fold(0.0_f64, f64::max);

    if best > SECTOR_STRONG_SIMILARITY {
        notes.reason(format!("Sector {} is similar to your activities", tender.sector));
        best
    } else if best > SECTOR_WEAK_SIMILARITY {
        best
    } else {
        notes.penalty(format!("Sector {} is far from your activities (sector mismatch)", tender.sector));
        SECTOR_MISMATCH_SCORE
    }
}

/// Geography score (0-1): preferred city, then intervention radius
pub fn score_geography(profile: &Profile, tender: &Tender, notes: &mut Explanation) -> f64 {
    let tender_city = tender.city.trim().to_lowercase();

    if non_blank_lowercase(&profile.preferred_cities)
        .iter()
        .any(|c| *c == tender_city)
    {
        notes.reason(format!("Located in your preferred area: {}", tender.city));
        return 1.0;
    }

    match profile.intervention_radius {
        Some(InterventionRadius::National) => {
            notes.reason("Compatible with your national intervention radius".to_string());
            0.8
        }
        Some(InterventionRadius::Regional) => {
            if same_region(&profile.preferred_cities, &tender.city) {
                notes.reason("Within your intervention region".to_string());
                0.9
            } else {
                0.4
            }
        }
        Some(InterventionRadius::Local) => {
            notes.penalty(format!("City {} is outside your local area", tender.city));
            0.2
        }
        Some(InterventionRadius::International) | None => NEUTRAL_SCORE,
    }
}

/// Financial score (0.1-1): multiplicative penalties for budget and guarantee.
///
/// Penalties compound (budget over max and guarantee over max give
/// 0.2 * 0.1 = 0.02) and the floor is applied once on the product.
pub fn score_financial(profile: &Profile, tender: &Tender, notes: &mut Explanation) -> f64 {
    let mut score = 1.0;

    if let Some(budget) = tender.budget {
        match (profile.budget_min, profile.budget_max) {
            (_, Some(max)) if budget > max => {
                notes.penalty(format!("Budget {} MAD exceeds your capacity", format_amount(budget)));
                score *= BUDGET_OVER_MAX_FACTOR;
            }
            (Some(min), _) if budget < min => {
                notes.penalty(format!("Budget {} MAD is below your expectations", format_amount(budget)));
                score *= BUDGET_UNDER_MIN_FACTOR;
            }
            (None, None) => {}
            _ => notes.reason(format!("Budget {} MAD is compatible", format_amount(budget))),
        }
    }

    if let (Some(guarantee), Some(max)) = (tender.guarantee, profile.max_guarantee) {
        if guarantee > max {
            notes.penalty(format!("Guarantee {} MAD is too high", format_amount(guarantee)));
            score *= GUARANTEE_OVER_MAX_FACTOR;
        } else {
            notes.reason(format!("Guarantee {} MAD is acceptable", format_amount(guarantee)));
        }
    }

    f64::max(score, FINANCIAL_FLOOR)
}

/// Whole days between `now` and `deadline`, rounded towards negative infinity
/// so that a deadline one hour ago is already day -1
#[inline]
pub fn days_remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Temporal score (0-1) according to the delay preference
pub fn score_temporal(
    profile: &Profile,
    tender: &Tender,
    now: DateTime<Utc>,
    notes: &mut Explanation,
) -> f64 {
    let days = days_remaining(tender.deadline, now);

    if days < 0 {
        notes.penalty("Tender expired".to_string());
        return 0.0;
    }

    match profile.delay_preference {
        Some(DelayPreference::Any) => 0.8,
        Some(DelayPreference::Short) => {
            if days <= SHORT_DELAY_DAYS {
                notes.reason(format!("Short deadline ({days} days) as you prefer"));
                1.0
            } else {
                // Linear decay past 30 days, floored
                f64::max(0.3, 1.0 - (days - SHORT_DELAY_DAYS) as f64 / 100.0)
            }
        }
        Some(DelayPreference::Medium) => {
            if (SHORT_DELAY_DAYS..=LONG_DELAY_DAYS).contains(&days) {
                notes.reason(format!("Medium deadline ({days} days) as you prefer"));
                1.0
            } else {
                0.6
            }
        }
        Some(DelayPreference::Long) => {
            if days > LONG_DELAY_DAYS {
                notes.reason(format!("Long deadline ({days} days) as you prefer"));
                1.0
            } else {
                0.7
            }
        }
        None => NEUTRAL_SCORE,
    }
}

/// Keyword score (0-1): share of business keywords found in the tender text
pub fn score_keywords(profile: &Profile, tender: &Tender, notes: &mut Explanation) -> f64 {
    let keywords: Vec<&str> = profile
        .business_keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();

    if keywords.is_empty() {
        return NEUTRAL_SCORE;
    }

    let haystack = format!(
        "{} {}",
        tender.object,
        tender.analyzed_text.as_deref().unwrap_or("")
    )
    .to_lowercase();

    let matched: Vec<&str> = keywords
        .iter()
        .copied()
        .filter(|k| haystack.contains(&k.to_lowercase()))
        .collect();

    if matched.is_empty() {
        return 0.2;
    }

    notes.reason(format!("Matching keywords: {}", matched.join(", ")));
    f64::min(1.0, matched.len() as f64 / keywords.len() as f64 * 1.5)
}

/// Classification score (0-1): substring match in either direction
pub fn score_classification(profile: &Profile, tender: &Tender, notes: &mut Explanation) -> f64 {
    let Some(classification) = tender
        .classification
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    else {
        return NEUTRAL_SCORE;
    };

    let preferred: Vec<String> = profile
        .preferred_classifications
        .iter()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect();

    if preferred.is_empty() {
        return NEUTRAL_SCORE;
    }

    let tender_class = classification.to_lowercase();
    if preferred
        .iter()
        .any(|p| tender_class.contains(p.as_str()) || p.contains(tender_class.as_str()))
    {
        notes.reason(format!("Classification {classification} matches your preferences"));
        1.0
    } else {
        0.3
    }
}

/// Trimmed, lowercased entries, blank ones dropped
fn non_blank_lowercase(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Format an amount with thousands separators, e.g. 1234567.8 -> "1,234,568"
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
