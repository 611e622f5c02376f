use actix_web::HttpResponse;
use uuid::Uuid;

/// Liveness check; answers `200` with an empty body.
#[tracing::instrument(name = "Checking service health", fields(request_id = %Uuid::new_v4()))]
pub async fn health_check() -> HttpResponse {
    tracing::debug!("Lead relay is up");
    HttpResponse::Ok().finish()
}
