use crate::handlers::responses::HealthResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    description = "Liveness probe, independent of the calendar catalog",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse),
    ),
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
