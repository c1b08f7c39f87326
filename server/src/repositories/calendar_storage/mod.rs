use crate::models::{CalendarContent, CalendarName};
use async_trait::async_trait;

#[async_trait]
pub trait CalendarStorage: Send + Sync {
    /// Names of every calendar currently stored, in no particular order.
    async fn list_names(&self) -> anyhow::Result<Vec<CalendarName>>;
    async fn get_content(&self, name: &str) -> anyhow::Result<Option<CalendarContent>>;
}

mod file_system;
pub use file_system::{CatalogConfig, FileSystemCalendarStorage};
