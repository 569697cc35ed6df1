use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{CompetitorId, CreateCompetitorRequest, ErrorResponse, HealthResponse, MessageResponse};
use crate::routes::{store_failure, AppState};

/// Configure entry routes and the health check
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/entries", web::get().to(list_entries))
        .route("/entries", web::post().to(create_entry))
        .route("/entries", web::delete().to(clear_entries))
        .route("/entries/{id}", web::delete().to(delete_entry));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.store.health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/entries
async fn list_entries(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_competitors().await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => store_failure("Failed to fetch entries", e),
    }
}

/// Register a competitor
///
/// POST /api/entries
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "teamColor": "red",
///   "weight": 150,
///   "isPriority": 0
/// }
/// ```
async fn create_entry(
    state: web::Data<AppState>,
    req: web::Json<CreateCompetitorRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_entry request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid entry data".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.store.create_competitor(req.into_inner().into_new_competitor()).await {
        Ok(entry) => {
            tracing::info!(
                "Registered entry {} ({}, team {}, weight {})",
                entry.id,
                entry.name,
                entry.team,
                entry.weight
            );
            HttpResponse::Ok().json(entry)
        }
        Err(e) => store_failure("Failed to create entry", e),
    }
}

/// DELETE /api/entries/{id}
async fn delete_entry(
    state: web::Data<AppState>,
    path: web::Path<CompetitorId>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.delete_competitor(id).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Entry deleted successfully")),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Entry not found".to_string(),
            message: format!("No entry with id {}", id),
            status_code: 404,
        }),
        Err(e) => store_failure("Failed to delete entry", e),
    }
}

/// DELETE /api/entries
async fn clear_entries(state: web::Data<AppState>) -> impl Responder {
    match state.store.clear_competitors().await {
        Ok(removed) => {
            tracing::info!("Cleared {} entries", removed);
            HttpResponse::Ok().json(MessageResponse::new("All entries cleared successfully"))
        }
        Err(e) => store_failure("Failed to clear entries", e),
    }
}
