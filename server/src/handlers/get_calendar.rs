use crate::{
    errors::ServerError, models::CALENDAR_MEDIA_TYPE, server::ServerState,
    services::CalendarServiceError,
};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[utoipa::path(
    get,
    path = "/cal/{name}",
    tag = "Calendars",
    description = "Retrieve the raw iCalendar text of a calendar",
    params(
        ("name" = String, Path, description = "Calendar name, the file name without `.ics`"),
    ),
    responses(
        (status = 200, description = "Calendar content", body = String, content_type = "text/calendar"),
        (status = 400, description = "Invalid calendar name"),
        (status = 404, description = "Calendar not found"),
        (status = 500, description = "Internal Server Error"),
    ),
)]
#[instrument(skip(state), fields(name = %name))]
pub async fn get_calendar(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let content = state
        .calendar_service()
        .get_calendar(&name)
        .await
        .map_err(|e| {
            match &e {
                CalendarServiceError::CalendarNotFound => debug!("Calendar {} not found", name),
                CalendarServiceError::InvalidName(_) => warn!("Rejected calendar name {:?}", name),
                // already logged with its cause by the service
                CalendarServiceError::StorageError(_) => {}
            }
            ServerError::from(e)
        })?;

    Ok(([(header::CONTENT_TYPE, CALENDAR_MEDIA_TYPE)], content))
}
