use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::regions::{find_region, suggest_cities};
use crate::lexicon::{DEFAULT_MIN_KEYWORD_LENGTH, DEFAULT_RELATED_LIMIT};
use crate::models::{
    AffinityRequest, AffinityResponse, CitiesResponse, CitySuggestQuery, ExtractKeywordsRequest,
    KeywordSuggestQuery, KeywordsResponse, RelatedKeywordsQuery, SectorSummary, SectorsResponse,
};
use crate::routes::{bad_request, AppState};

/// Configure profile suggestion and keyword routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/suggest/keywords", web::get().to(suggest_keywords))
        .route("/suggest/cities", web::get().to(suggest_city_list))
        .route("/keywords/related", web::get().to(related_keywords))
        .route("/keywords/extract", web::post().to(extract_keywords))
        .route("/keywords/affinity", web::post().to(sector_affinity))
        .route("/sectors", web::get().to(list_sectors));
}

/// GET /api/v1/suggest/keywords?sector={sector}
async fn suggest_keywords(
    state: web::Data<AppState>,
    query: web::Query<KeywordSuggestQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    HttpResponse::Ok().json(KeywordsResponse {
        keywords: state.lexicon.keywords_for_sector(&query.sector),
    })
}

/// GET /api/v1/suggest/cities?region={slug or name}
///
/// Without a known region, returns the most popular cities.
async fn suggest_city_list(query: web::Query<CitySuggestQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let region = query.region.as_deref();
    HttpResponse::Ok().json(CitiesResponse {
        region: region.and_then(find_region).map(|r| r.name.to_string()),
        cities: suggest_cities(region).iter().map(|c| c.to_string()).collect(),
    })
}

/// GET /api/v1/keywords/related?keyword={keyword}&limit={limit}
async fn related_keywords(
    state: web::Data<AppState>,
    query: web::Query<RelatedKeywordsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let limit = query.limit.unwrap_or(DEFAULT_RELATED_LIMIT);
    HttpResponse::Ok().json(KeywordsResponse {
        keywords: state.lexicon.related_keywords(&query.keyword, limit),
    })
}

/// POST /api/v1/keywords/extract
async fn extract_keywords(
    state: web::Data<AppState>,
    req: web::Json<ExtractKeywordsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let min_length = req.min_length.unwrap_or(DEFAULT_MIN_KEYWORD_LENGTH);
    HttpResponse::Ok().json(KeywordsResponse {
        keywords: state.lexicon.extract_keywords(&req.text, min_length),
    })
}

/// POST /api/v1/keywords/affinity
async fn sector_affinity(
    state: web::Data<AppState>,
    req: web::Json<AffinityRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    HttpResponse::Ok().json(AffinityResponse {
        affinity: state.lexicon.sector_affinity(&req.keywords),
    })
}

/// GET /api/v1/sectors
async fn list_sectors(state: web::Data<AppState>) -> impl Responder {
    let sectors = state
        .lexicon
        .sector_keyword_counts()
        .into_iter()
        .map(|(name, keyword_count)| SectorSummary {
            name: name.to_string(),
            keyword_count,
        })
        .collect();

    HttpResponse::Ok().json(SectorsResponse { sectors })
}
