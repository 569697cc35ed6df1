use actix_web::{web, HttpResponse, Responder};
use crate::models::{MatchRecord, MatchSummary, MessageResponse};
use crate::routes::{store_failure, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/matches", web::get().to(list_matches))
        .route("/matches", web::delete().to(clear_matches))
        .route("/matches/process", web::post().to(process_matches))
        .route("/matches/summary", web::get().to(match_summary));
}

/// GET /api/matches
async fn list_matches(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_matches().await {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => store_failure("Failed to fetch matches", e),
    }
}

/// Pair up every registered entry
///
/// POST /api/matches/process
///
/// Replaces any previously stored fights with a fresh pairing run and
/// returns the fights joined with both competitors. An empty list is a
/// normal outcome.
async fn process_matches(state: web::Data<AppState>) -> impl Responder {
    let competitors = match state.store.list_competitors().await {
        Ok(competitors) => competitors,
        Err(e) => return store_failure("Failed to process matches", e),
    };

    tracing::info!("Processing matches for {} entries", competitors.len());

    let records = state.matcher.run(&competitors);

    if let Err(e) = state.store.replace_matches(records).await {
        return store_failure("Failed to process matches", e);
    }

    match state.store.list_matches().await {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => store_failure("Failed to process matches", e),
    }
}

/// GET /api/matches/summary
async fn match_summary(state: web::Data<AppState>) -> impl Responder {
    let stored = match state.store.list_stored_matches().await {
        Ok(stored) => stored,
        Err(e) => return store_failure("Failed to summarize matches", e),
    };
    let competitors = match state.store.list_competitors().await {
        Ok(competitors) => competitors,
        Err(e) => return store_failure("Failed to summarize matches", e),
    };

    let records: Vec<MatchRecord> = stored.into_iter().map(|m| m.record).collect();

    HttpResponse::Ok().json(MatchSummary::from_records(&competitors, &records))
}

/// DELETE /api/matches
async fn clear_matches(state: web::Data<AppState>) -> impl Responder {
    match state.store.clear_matches().await {
        Ok(removed) => {
            tracing::info!("Cleared {} matches", removed);
            HttpResponse::Ok().json(MessageResponse::new("All matches cleared successfully"))
        }
        Err(e) => store_failure("Failed to clear matches", e),
    }
}
