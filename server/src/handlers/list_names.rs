use crate::{errors::ServerError, models::CalendarName, server::ServerState};
use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/names.json",
    tag = "Calendars",
    description = "List the names of all calendars in the catalog, sorted ascending",
    responses(
        (status = 200, description = "Calendar names", body = Vec<String>, example = json!(["family", "work"])),
        (status = 500, description = "Internal Server Error"),
    ),
)]
#[instrument(skip(state))]
pub async fn list_names(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<CalendarName>>, ServerError> {
    // storage failures are logged by the service
    let names = state
        .calendar_service()
        .list_names()
        .await
        .map_err(ServerError::from)?;

    Ok(Json(names))
}
