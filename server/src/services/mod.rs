mod calendar_service;
pub use calendar_service::{CalendarService, CalendarServiceError, CalendarServiceImpl};

use crate::repositories::CalendarStorage;
use std::sync::Arc;

pub async fn init_services(
    calendar_storage: Arc<dyn CalendarStorage>,
) -> anyhow::Result<Arc<dyn CalendarService>> {
    let calendar_service =
        Arc::new(CalendarServiceImpl::new(calendar_storage)) as Arc<dyn CalendarService>;
    Ok(calendar_service)
}
