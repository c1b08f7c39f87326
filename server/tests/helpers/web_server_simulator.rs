use calendar_server::{
    repositories::{CatalogConfig, FileSystemCalendarStorage},
    server::{self, ServerState},
    services::{CalendarService, CalendarServiceImpl},
};
use reqwest::{Client, redirect::Policy};
use std::{path::Path, sync::Arc};
use tokio::{net::TcpListener, task::JoinHandle};

use crate::helpers::mocks::MockCalendarServiceImpl;

pub struct WebServerSimulator {
    base_url: String,
    listener: TcpListener,
    calendar_service: MockCalendarServiceImpl,
}

impl WebServerSimulator {
    pub async fn new() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let host = listener.local_addr()?;
        let base_url = format!("http://{}", host);

        Ok(Self {
            base_url,
            listener,
            calendar_service: MockCalendarServiceImpl::new(),
        })
    }

    pub fn url(&self) -> String {
        self.base_url.clone()
    }

    #[allow(dead_code)]
    pub fn configure_calendar_service(
        &mut self,
        mut callback: impl FnMut(&mut MockCalendarServiceImpl),
    ) {
        callback(&mut self.calendar_service);
    }

    /// Serves the full application backed by the mocked service.
    #[allow(dead_code)]
    pub async fn start(self) -> JoinHandle<()> {
        let calendar_service = Arc::new(self.calendar_service) as Arc<dyn CalendarService>;
        serve(self.listener, calendar_service)
    }

    /// Serves the full application backed by a real catalog directory.
    #[allow(dead_code)]
    pub async fn start_with_catalog(self, directory: &Path) -> anyhow::Result<JoinHandle<()>> {
        let storage = FileSystemCalendarStorage::init(CatalogConfig {
            directory: directory.to_path_buf(),
        })
        .await?;
        let calendar_service =
            Arc::new(CalendarServiceImpl::new(Arc::new(storage))) as Arc<dyn CalendarService>;

        Ok(serve(self.listener, calendar_service))
    }
}

fn serve(listener: TcpListener, calendar_service: Arc<dyn CalendarService>) -> JoinHandle<()> {
    let app = server::build_router(ServerState::new(calendar_service));
    let server = axum::serve(listener, app.into_make_service());

    tokio::spawn(async move {
        server.await.unwrap();
    })
}

/// Redirects are asserted on, never followed.
pub fn http_client() -> Client {
    Client::builder().redirect(Policy::none()).build().unwrap()
}
