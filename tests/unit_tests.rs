// Unit tests for Tender Match

use chrono::{DateTime, Duration, TimeZone, Utc};
use tender_match::core::{
    regions::{find_region, region_of, same_region, suggest_cities, POPULAR_CITIES},
    scoring::{
        days_remaining, score_financial, score_geography, score_temporal, Explanation,
        FINANCIAL_FLOOR,
    },
    similarity::{indel_ratio, jaro_winkler_ratio, levenshtein_ratio},
};
use tender_match::models::{
    parse_deadline, DelayPreference, InterventionRadius, Profile, ScoringWeights, Tender,
};
use tender_match::{EngineError, ScoringEngine};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn create_tender(city: &str, days_ahead: i64) -> Tender {
    Tender::new(
        "Bâtiment",
        city,
        "Construction d'un centre de santé",
        now() + Duration::days(days_ahead),
    )
}

#[test]
fn test_similarity_is_symmetric_and_normalized() {
    let pairs = [
        ("informatique", "informatique et télécommunications"),
        ("santé", "bâtiment"),
        ("", "transport"),
    ];
    for (a, b) in pairs {
        for metric in [indel_ratio, jaro_winkler_ratio, levenshtein_ratio] {
            let ab = metric(a, b);
            assert!((ab - metric(b, a)).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&ab));
            assert!(ab < 1.0);
        }
    }
    assert_eq!(indel_ratio("énergie", "énergie"), 1.0);
    assert_eq!(jaro_winkler_ratio("énergie", "énergie"), 1.0);
    assert_eq!(levenshtein_ratio("énergie", "énergie"), 1.0);
}

#[test]
fn test_region_lookup_folds_accents_and_case() {
    let fes = region_of(" FES ").unwrap();
    assert_eq!(region_of("Fès"), Some(fes));
    assert_eq!(region_of("meknes"), Some(fes));
    assert!(region_of("Paris").is_none());
    assert!(region_of("").is_none());
}

#[test]
fn test_same_region() {
    let preferred = vec!["Casablanca".to_string(), "Unknown town".to_string()];
    assert!(same_region(&preferred, "Mohammedia"));
    assert!(!same_region(&preferred, "Agadir"));
    assert!(!same_region(&[], "Casablanca"));
}

#[test]
fn test_suggest_cities() {
    let region = find_region("souss_massa").unwrap();
    assert_eq!(suggest_cities(Some("souss_massa")), region.cities);
    assert_eq!(suggest_cities(Some(region.name)), region.cities);
    assert_eq!(suggest_cities(Some("atlantis")), POPULAR_CITIES);
    assert_eq!(suggest_cities(None), POPULAR_CITIES);
}

#[test]
fn test_geography_radius_rules() {
    let mut profile = Profile {
        preferred_cities: vec!["Rabat".to_string()],
        ..Profile::default()
    };
    let cases = [
        (Some(InterventionRadius::National), "Agadir", 0.8),
        (Some(InterventionRadius::Regional), "Kénitra", 0.9),
        (Some(InterventionRadius::Regional), "Agadir", 0.4),
        (Some(InterventionRadius::Local), "Agadir", 0.2),
        (Some(InterventionRadius::International), "Agadir", 0.5),
        (None, "Agadir", 0.5),
        (Some(InterventionRadius::Local), " rabat ", 1.0),
    ];

    for (radius, city, expected) in cases {
        profile.intervention_radius = radius;
        let mut notes = Explanation::default();
        let score = score_geography(&profile, &create_tender(city, 40), &mut notes);
        assert_eq!(score, expected, "radius {:?} city {}", radius, city);
    }
}

#[test]
fn test_financial_compound_penalties_floor_once() {
    let profile = Profile {
        budget_max: Some(100_000.0),
        max_guarantee: Some(5_000.0),
        ..Profile::default()
    };
    let mut tender = create_tender("Rabat", 40);
    tender.budget = Some(1_000_000.0);
    tender.guarantee = Some(50_000.0);

    let mut notes = Explanation::default();
    let score = score_financial(&profile, &tender, &mut notes);

    // 0.2 * 0.1 = 0.02 before the floor
    assert_eq!(score, FINANCIAL_FLOOR);
    assert_eq!(notes.penalties.len(), 2);
    assert!(notes.penalties[0].contains("1,000,000 MAD"));
}

#[test]
fn test_financial_budget_below_min_without_max() {
    let profile = Profile {
        budget_min: Some(200_000.0),
        ..Profile::default()
    };
    let mut tender = create_tender("Rabat", 40);
    tender.budget = Some(50_000.0);

    let mut notes = Explanation::default();
    let score = score_financial(&profile, &tender, &mut notes);
    assert!((score - 0.7).abs() < 1e-12);
    assert_eq!(notes.penalties.len(), 1);
}

#[test]
fn test_financial_without_bounds_is_silent() {
    let mut tender = create_tender("Rabat", 40);
    tender.budget = Some(50_000.0);

    let mut notes = Explanation::default();
    assert_eq!(score_financial(&Profile::default(), &tender, &mut notes), 1.0);
    assert!(notes.reasons.is_empty());
    assert!(notes.penalties.is_empty());
}

#[test]
fn test_days_remaining_floors() {
    assert_eq!(days_remaining(now() + Duration::hours(23), now()), 0);
    assert_eq!(days_remaining(now() - Duration::hours(1), now()), -1);
    assert_eq!(days_remaining(now() + Duration::days(45), now()), 45);
}

#[test]
fn test_temporal_buckets() {
    let mut profile = Profile::default();
    let cases = [
        (Some(DelayPreference::Short), 10, 1.0),
        (Some(DelayPreference::Short), 50, 0.8),
        (Some(DelayPreference::Short), 200, 0.3),
        (Some(DelayPreference::Medium), 30, 1.0),
        (Some(DelayPreference::Medium), 90, 1.0),
        (Some(DelayPreference::Medium), 91, 0.6),
        (Some(DelayPreference::Long), 91, 1.0),
        (Some(DelayPreference::Long), 90, 0.7),
        (Some(DelayPreference::Any), 5, 0.8),
        (None, 5, 0.5),
    ];

    for (preference, days, expected) in cases {
        profile.delay_preference = preference;
        let mut notes = Explanation::default();
        let score = score_temporal(&profile, &create_tender("Rabat", days), now(), &mut notes);
        assert!(
            (score - expected).abs() < 1e-9,
            "{:?} at {} days: {} != {}",
            preference,
            days,
            score,
            expected
        );
    }
}

#[test]
fn test_expired_tender_scores_zero_for_every_preference() {
    for preference in [
        None,
        Some(DelayPreference::Short),
        Some(DelayPreference::Medium),
        Some(DelayPreference::Long),
        Some(DelayPreference::Any),
    ] {
        let profile = Profile {
            delay_preference: preference,
            ..Profile::default()
        };
        let mut notes = Explanation::default();
        let score = score_temporal(&profile, &create_tender("Rabat", -1), now(), &mut notes);
        assert_eq!(score, 0.0);
        assert_eq!(notes.penalties, vec!["Tender expired".to_string()]);
    }
}

#[test]
fn test_parse_deadline_formats() {
    let expected = Utc.with_ymd_and_hms(2024, 4, 15, 0, 0, 0).unwrap();
    assert_eq!(parse_deadline("2024-04-15").unwrap(), expected);
    assert_eq!(parse_deadline("2024-04-15T00:00:00").unwrap(), expected);
    assert_eq!(parse_deadline("2024-04-15 00:00:00").unwrap(), expected);
    assert_eq!(parse_deadline("2024-04-15T02:00:00+02:00").unwrap(), expected);

    assert!(matches!(
        parse_deadline("next week"),
        Err(EngineError::InvalidField { field: "deadline", .. })
    ));
    assert!(parse_deadline("  ").is_err());
}

#[test]
fn test_unknown_radius_rejected_when_deserializing() {
    let err = serde_json::from_str::<Profile>(r#"{"interventionRadius": "galactic"}"#)
        .unwrap_err()
        .to_string();
    assert!(err.contains("interventionRadius"), "{}", err);

    let profile: Profile =
        serde_json::from_str(r#"{"interventionRadius": "regional", "delayPreference": "court"}"#)
            .unwrap();
    assert_eq!(profile.intervention_radius, Some(InterventionRadius::Regional));
    assert_eq!(profile.delay_preference, Some(DelayPreference::Short));
}

#[test]
fn test_classifications_never_exclude() {
    let profile: Profile = serde_json::from_str(
        r#"{"preferredClassifications": ["services"], "excludedClassifications": ["travaux"]}"#,
    )
    .unwrap();
    let mut tender = create_tender("Rabat", 40);
    tender.classification = Some("Travaux".to_string());

    let breakdown = ScoringEngine::with_default_config().compute_score(&profile, &tender, now());
    assert!(!breakdown.excluded);
    assert_eq!(breakdown.classification, 0.3);
    assert!(breakdown.total > 0.0);
}

#[test]
fn test_weights_validation() {
    assert!(ScoringWeights::default().validate().is_ok());

    let negative = ScoringWeights {
        sector: -0.05,
        classification: 0.35,
        ..ScoringWeights::default()
    };
    assert!(negative.validate().is_err());
}
