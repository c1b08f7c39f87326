use calendar_server::models::{CalendarContent, CalendarName};
use calendar_server::services::{CalendarService, CalendarServiceError};
use mockall::mock;

mock! {
    pub CalendarServiceImpl {}

    #[async_trait::async_trait]
    impl CalendarService for CalendarServiceImpl {
        async fn list_names(&self) -> Result<Vec<CalendarName>, CalendarServiceError>;
        async fn get_calendar(&self, name: &str) -> Result<CalendarContent, CalendarServiceError>;
    }
}
