use crate::models::{self, CalendarContent, CalendarName};
use crate::repositories::CalendarStorage;
use anyhow::Context;
use async_trait::async_trait;
use config::Config;
use serde::Deserialize;
use std::{
    ffi::OsStr,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct CatalogConfig {
    pub directory: PathBuf,
}

impl CatalogConfig {
    const CONFIG_PREFIX: &'static str = "CATALOG";
    const DEFAULT_DIRECTORY: &'static str = "calendars";

    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::load(config::Environment::with_prefix(Self::CONFIG_PREFIX).separator("__"))
    }

    pub fn load(source: config::Environment) -> anyhow::Result<Self> {
        Config::builder()
            .set_default("directory", Self::DEFAULT_DIRECTORY)?
            .add_source(source)
            .build()?
            .try_deserialize::<CatalogConfig>()
            .map_err(|e| anyhow::anyhow!("failed to load CatalogConfig: {}", e))
    }
}

/// Serves calendars straight from a directory. Nothing is cached, every call
/// reflects the directory as it is at that moment.
#[derive(Debug, Clone)]
pub struct FileSystemCalendarStorage {
    directory: PathBuf,
}

impl FileSystemCalendarStorage {
    /// Creates the catalog directory if it is missing.
    pub async fn init(config: CatalogConfig) -> anyhow::Result<Self> {
        fs::create_dir_all(&config.directory)
            .await
            .with_context(|| {
                format!(
                    "failed to create catalog directory {}",
                    config.directory.display()
                )
            })?;

        info!(directory = %config.directory.display(), "Calendar catalog ready");

        Ok(Self::from_directory(config.directory))
    }

    pub fn from_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn calendar_path(&self, name: &str) -> anyhow::Result<PathBuf> {
        let path = self.directory.join(models::calendar_file_name(name));

        if path.parent() != Some(self.directory.as_path()) {
            anyhow::bail!("calendar name {name:?} escapes the catalog directory");
        }

        Ok(path)
    }
}

#[async_trait]
impl CalendarStorage for FileSystemCalendarStorage {
    async fn list_names(&self) -> anyhow::Result<Vec<CalendarName>> {
        let mut entries = fs::read_dir(&self.directory).await.with_context(|| {
            format!(
                "failed to read catalog directory {}",
                self.directory.display()
            )
        })?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .context("failed to read catalog directory entry")?
        {
            let path = entry.path();
            if path.extension() != Some(OsStr::new(models::CALENDAR_EXTENSION)) {
                continue;
            }

            // follows symlinks, like the existence check in `get_content`
            match fs::metadata(&path).await {
                Ok(metadata) if metadata.is_file() => {}
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to stat {}", path.display()));
                }
            }

            match path.file_stem().and_then(OsStr::to_str) {
                Some(stem) if models::is_valid_calendar_name(stem) => names.push(stem.to_owned()),
                Some(stem) => {
                    warn!(path = %path.display(), name = stem, "Skipping calendar with unservable name")
                }
                None => warn!(path = %path.display(), "Skipping calendar with non UTF-8 name"),
            }
        }

        debug!(count = names.len(), "Scanned calendar catalog");

        Ok(names)
    }

    async fn get_content(&self, name: &str) -> anyhow::Result<Option<CalendarContent>> {
        let path = self.calendar_path(name)?;

        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to stat {}", path.display()));
            }
        }

        let bytes = fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;

        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}
