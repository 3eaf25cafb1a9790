use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use validator::Validate;

use crate::core::scoring::days_remaining;
use crate::models::{
    round_score, rounded_breakdown, ErrorResponse, Recommendation, RecommendRequest,
    RecommendationsResponse, ScoreRequest, ScoreResponse, Tender,
};
use crate::routes::{bad_request, AppState};

/// Configure scoring routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::post().to(recommend))
        .route("/score", web::post().to(score));
}

/// Rank tenders for a profile
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "profile": { "sectors": ["informatique"], "preferredCities": ["Rabat"] },
///   "tenders": [{ "sector": "...", "city": "...", "deadline": "2024-05-01", "object": "..." }],
///   "limit": 10,
///   "minScore": 0.6,
///   "now": "2024-03-01T12:00:00Z",
///   "expandKeywords": false
/// }
/// ```
///
/// Tenders whose deadline has passed are dropped before ranking.
async fn recommend(state: web::Data<AppState>, req: web::Json<RecommendRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendations request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let RecommendRequest {
        mut profile,
        tenders,
        limit,
        min_score,
        now,
        expand_keywords,
    } = req.into_inner();

    let limit = limit.unwrap_or(state.default_limit);
    if limit > state.max_limit {
        return bad_request(
            "Validation failed",
            format!("limit must be at most {}", state.max_limit),
        );
    }

    if expand_keywords {
        profile.business_keywords = state.lexicon.expand_keywords(&profile.business_keywords);
    }

    let threshold = min_score.unwrap_or(state.engine.config().recommendation_threshold);
    let now = now.unwrap_or_else(Utc::now);

    // Only open tenders are candidates
    let tenders: Vec<Tender> = tenders
        .into_iter()
        .filter(|tender| days_remaining(tender.deadline, now) >= 0)
        .collect();
    let total_candidates = tenders.len();

    tracing::info!(
        "Ranking {} tenders (limit {}, min score {:.2})",
        total_candidates,
        limit,
        threshold
    );

    let engine = state.engine.clone();
    let ranked = match web::block(move || engine.rank(&profile, tenders, limit, threshold, now)).await {
        Ok(ranked) => ranked,
        Err(e) => {
            tracing::error!("Ranking task failed: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Ranking failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let recommendations: Vec<Recommendation> = ranked
        .into_iter()
        .map(|(mut tender, breakdown)| {
            let category = state.engine.categorize_with(breakdown.total, threshold);
            tender.relevance_score = tender.relevance_score.map(round_score);
            Recommendation {
                tender,
                score: round_score(breakdown.total),
                category,
                breakdown: rounded_breakdown(breakdown),
            }
        })
        .collect();

    HttpResponse::Ok().json(RecommendationsResponse {
        total_results: recommendations.len(),
        recommendations,
        total_candidates,
        min_score: threshold,
        generated_at: Utc::now(),
    })
}

/// Score a single tender
///
/// POST /api/v1/score
async fn score(state: web::Data<AppState>, req: web::Json<ScoreRequest>) -> impl Responder {
    let now = req.now.unwrap_or_else(Utc::now);
    let breakdown = state.engine.compute_score(&req.profile, &req.tender, now);

    HttpResponse::Ok().json(ScoreResponse {
        score: round_score(breakdown.total),
        category: state.engine.categorize(breakdown.total),
        breakdown: rounded_breakdown(breakdown),
    })
}
