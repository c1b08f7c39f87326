use crate::{
    models::{self, CalendarContent, CalendarName},
    repositories::CalendarStorage,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum CalendarServiceError {
    #[error("calendar not found")]
    CalendarNotFound,
    #[error("invalid calendar name: {0:?}")]
    InvalidName(String),
    #[error("storage error: {0}")]
    StorageError(String),
}

#[async_trait]
pub trait CalendarService: Send + Sync {
    async fn list_names(&self) -> Result<Vec<CalendarName>, CalendarServiceError>;
    async fn get_calendar(&self, name: &str) -> Result<CalendarContent, CalendarServiceError>;
}

pub struct CalendarServiceImpl {
    calendar_storage: Arc<dyn CalendarStorage>,
}

impl CalendarServiceImpl {
    pub fn new(calendar_storage: Arc<dyn CalendarStorage>) -> Self {
        Self { calendar_storage }
    }
}

#[async_trait]
impl CalendarService for CalendarServiceImpl {
    async fn list_names(&self) -> Result<Vec<CalendarName>, CalendarServiceError> {
        let mut names = self.calendar_storage.list_names().await.map_err(|e| {
            error!("Failed to list calendars: {:#}", e);
            CalendarServiceError::StorageError(e.to_string())
        })?;

        // String ordering is byte-wise, which is what clients expect here.
        names.sort();

        Ok(names)
    }

    async fn get_calendar(&self, name: &str) -> Result<CalendarContent, CalendarServiceError> {
        if !models::is_valid_calendar_name(name) {
            return Err(CalendarServiceError::InvalidName(name.to_owned()));
        }

        self.calendar_storage
            .get_content(name)
            .await
            .map_err(|e| {
                error!("Failed to read calendar {}: {:#}", name, e);
                CalendarServiceError::StorageError(e.to_string())
            })?
            .ok_or(CalendarServiceError::CalendarNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct StubCalendarStorage {
        names: Vec<CalendarName>,
        fail: bool,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl CalendarStorage for StubCalendarStorage {
        async fn list_names(&self) -> anyhow::Result<Vec<CalendarName>> {
            if self.fail {
                anyhow::bail!("permission denied");
            }
            Ok(self.names.clone())
        }

        async fn get_content(&self, name: &str) -> anyhow::Result<Option<CalendarContent>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("permission denied");
            }
            Ok(self
                .names
                .iter()
                .find(|n| n.as_str() == name)
                .map(|n| format!("BEGIN:VCALENDAR\nX-WR-CALNAME:{n}\nEND:VCALENDAR\n")))
        }
    }

    fn service(storage: StubCalendarStorage) -> (CalendarServiceImpl, Arc<StubCalendarStorage>) {
        let storage = Arc::new(storage);
        (CalendarServiceImpl::new(storage.clone()), storage)
    }

    fn names(names: &[&str]) -> Vec<CalendarName> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_list_names_sorts_byte_wise() {
        let (service, _) = service(StubCalendarStorage {
            names: names(&["work", "b", "family", "Z", "B", "a"]),
            ..Default::default()
        });

        let listed = service.list_names().await.unwrap();

        assert_eq!(listed, names(&["B", "Z", "a", "b", "family", "work"]));
    }

    #[tokio::test]
    async fn test_list_names_on_empty_storage_is_empty() {
        let (service, _) = service(StubCalendarStorage::default());

        assert!(service.list_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_names_maps_storage_failure() {
        let (service, _) = service(StubCalendarStorage {
            fail: true,
            ..Default::default()
        });

        let result = service.list_names().await;

        assert!(matches!(result, Err(CalendarServiceError::StorageError(_))));
    }

    #[tokio::test]
    async fn test_get_calendar_returns_content() {
        let (service, _) = service(StubCalendarStorage {
            names: names(&["family"]),
            ..Default::default()
        });

        let content = service.get_calendar("family").await.unwrap();

        assert!(content.contains("X-WR-CALNAME:family"));
    }

    #[tokio::test]
    async fn test_get_calendar_unknown_name_is_not_found() {
        let (service, _) = service(StubCalendarStorage {
            names: names(&["family"]),
            ..Default::default()
        });

        let result = service.get_calendar("missing").await;

        assert!(matches!(result, Err(CalendarServiceError::CalendarNotFound)));
    }

    #[tokio::test]
    async fn test_get_calendar_rejects_traversal_without_touching_storage() {
        let (service, storage) = service(StubCalendarStorage::default());

        for name in ["../secret", "..", "a/b", ""] {
            let result = service.get_calendar(name).await;
            assert!(
                matches!(result, Err(CalendarServiceError::InvalidName(ref n)) if n == name),
                "{name:?} should be rejected"
            );
        }

        assert_eq!(storage.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_calendar_maps_storage_failure() {
        let (service, _) = service(StubCalendarStorage {
            fail: true,
            ..Default::default()
        });

        let result = service.get_calendar("family").await;

        assert!(matches!(result, Err(CalendarServiceError::StorageError(_))));
    }
}
