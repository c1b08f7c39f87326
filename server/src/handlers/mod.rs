use crate::server::ServerState;
use std::sync::Arc;
use utoipa_axum::{router::OpenApiRouter, routes};

mod get_calendar;
mod health;
mod list_names;
pub mod responses;

pub fn router(state: Arc<ServerState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(health::health))
        .routes(routes!(list_names::list_names))
        .routes(routes!(get_calendar::get_calendar))
        .with_state(state)
}
