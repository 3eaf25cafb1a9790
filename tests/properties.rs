// Property tests for scoring, ranking and keyword extraction

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use tender_match::models::{DelayPreference, InterventionRadius, Profile, Tender};
use tender_match::{Lexicon, ScoringEngine, ScoringWeights};

const SECTORS: &[&str] = &[
    "informatique",
    "Informatique et télécommunications",
    "bâtiment",
    "Bâtiment et travaux publics",
    "santé",
    "transport",
    "",
];

const CITIES: &[&str] = &["Rabat", "Salé", "Casablanca", "Fès", "Agadir", "Laâyoune", "Paris", ""];

const KEYWORDS: &[&str] = &["développement web", "maintenance", "réseau", "portail", "  "];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn pick(pool: &'static [&'static str]) -> impl Strategy<Value = String> {
    proptest::sample::select(pool).prop_map(str::to_string)
}

fn radius() -> impl Strategy<Value = Option<InterventionRadius>> {
    prop_oneof![
        Just(None),
        Just(Some(InterventionRadius::Local)),
        Just(Some(InterventionRadius::Regional)),
        Just(Some(InterventionRadius::National)),
        Just(Some(InterventionRadius::International)),
    ]
}

fn delay() -> impl Strategy<Value = Option<DelayPreference>> {
    prop_oneof![
        Just(None),
        Just(Some(DelayPreference::Short)),
        Just(Some(DelayPreference::Medium)),
        Just(Some(DelayPreference::Long)),
        Just(Some(DelayPreference::Any)),
    ]
}

fn amount() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of(0.0..5_000_000.0_f64)
}

prop_compose! {
    fn profile()(
        sectors in proptest::collection::vec(pick(SECTORS), 0..3),
        preferred_cities in proptest::collection::vec(pick(CITIES), 0..3),
        excluded_cities in proptest::collection::vec(pick(CITIES), 0..2),
        excluded_sectors in proptest::collection::vec(pick(SECTORS), 0..2),
        intervention_radius in radius(),
        budget_min in amount(),
        budget_max in amount(),
        max_guarantee in amount(),
        delay_preference in delay(),
        business_keywords in proptest::collection::vec(pick(KEYWORDS), 0..3),
    ) -> Profile {
        Profile {
            sectors,
            preferred_cities,
            excluded_cities,
            excluded_sectors,
            intervention_radius,
            budget_min,
            budget_max,
            max_guarantee,
            delay_preference,
            business_keywords,
            preferred_classifications: vec!["travaux".to_string()],
        }
    }
}

prop_compose! {
    fn tender()(
        id in 0u32..1000,
        sector in pick(SECTORS),
        city in pick(CITIES),
        budget in amount(),
        guarantee in amount(),
        days in -100i64..400,
        classification in proptest::option::of(pick(SECTORS)),
    ) -> Tender {
        let mut tender = Tender::new(sector, city, "Développement web et maintenance réseau", now() + Duration::hours(days * 7));
        tender.reference = Some(id.to_string());
        tender.budget = budget;
        tender.guarantee = guarantee;
        tender.classification = classification;
        tender
    }
}

proptest! {
    #[test]
    fn prop_scores_bounded_and_total_is_weighted_sum(profile in profile(), tender in tender()) {
        let engine = ScoringEngine::with_default_config();
        let b = engine.compute_score(&profile, &tender, now());

        for score in [b.sector, b.geography, b.financial, b.temporal, b.keyword, b.classification, b.total] {
            prop_assert!((0.0..=1.0).contains(&score), "score out of range: {}", score);
        }
        prop_assert!(b.financial >= 0.1);

        if b.excluded {
            prop_assert_eq!(b.total, 0.0);
        } else {
            let expected = ScoringWeights::default().weighted_total(&b);
            prop_assert!((b.total - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_exclusion_dominates(mut profile in profile(), tender in tender()) {
        prop_assume!(!tender.city.trim().is_empty());
        profile.excluded_cities.push(tender.city.to_uppercase());

        let b = ScoringEngine::with_default_config().compute_score(&profile, &tender, now());
        prop_assert!(b.excluded);
        prop_assert_eq!(b.total, 0.0);
    }

    #[test]
    fn prop_rank_invariants(
        profile in profile(),
        tenders in proptest::collection::vec(tender(), 0..40),
        limit in 0usize..20,
        threshold in 0.0..1.0_f64,
    ) {
        let engine = ScoringEngine::with_default_config();
        let ranked = engine.rank(&profile, tenders.clone(), limit, threshold, now());

        prop_assert!(ranked.len() <= limit);
        prop_assert!(ranked.iter().all(|(_, b)| b.total >= threshold));
        prop_assert!(ranked.windows(2).all(|w| w[0].1.total >= w[1].1.total));

        let again = engine.rank(&profile, tenders, limit, threshold, now());
        let first: Vec<_> = ranked.iter().map(|(t, b)| (t.reference.clone(), b.total)).collect();
        let second: Vec<_> = again.iter().map(|(t, b)| (t.reference.clone(), b.total)).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_extract_keywords_deterministic(text in "[a-zA-Zéèàç0-9 ,.;'-]{0,200}", min_length in 1usize..6) {
        let lexicon = Lexicon::builtin();
        let first = lexicon.extract_keywords(&text, min_length);

        prop_assert_eq!(&first, &lexicon.extract_keywords(&text, min_length));
        prop_assert!(first.len() <= 20);
        for word in &first {
            prop_assert!(word.chars().count() >= min_length);
            prop_assert!(!lexicon.is_stop_word(word));
            prop_assert!(!word.starts_with('-') && !word.ends_with('-'));
        }
    }
}
