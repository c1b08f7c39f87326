mod calendar_storage;

use std::sync::Arc;

pub use calendar_storage::{CalendarStorage, CatalogConfig, FileSystemCalendarStorage};

pub async fn init_repositories() -> anyhow::Result<Arc<dyn CalendarStorage>> {
    let config = CatalogConfig::load_from_env()?;
    let calendar_storage = Arc::new(FileSystemCalendarStorage::init(config).await?);

    Ok(calendar_storage)
}
