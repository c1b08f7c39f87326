use crate::apidoc::{ApiDoc, DOCS_PATH, OPENAPI_JSON_PATH};
use crate::infrastructure::{DocsRedirectExtensions, TracingExtensions};
use crate::services::CalendarService;
use crate::{handlers, repositories, services};
use axum::Router;
use config::Config;
use serde::Deserialize;
use std::{net::Ipv4Addr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct ServerState {
    calendar_service: Arc<dyn CalendarService>,
}

impl ServerState {
    pub fn new(calendar_service: Arc<dyn CalendarService>) -> Self {
        Self { calendar_service }
    }

    pub fn calendar_service(&self) -> Arc<dyn CalendarService> {
        Arc::clone(&self.calendar_service)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    const CONFIG_PREFIX: &'static str = "SERVER_CONFIG";
    const DEFAULT_PORT: u16 = 5000;

    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::load(config::Environment::with_prefix(Self::CONFIG_PREFIX).separator("__"))
    }

    pub fn load(source: config::Environment) -> anyhow::Result<Self> {
        let config = Config::builder()
            .set_default("port", i64::from(Self::DEFAULT_PORT))?
            .add_source(source)
            .build()?
            .try_deserialize::<ServerConfig>()?;

        Ok(config)
    }
}

/// Assembles the full application: catalog routes, OpenAPI docs, the `/`
/// redirect and the tracing layers.
pub fn build_router(state: ServerState) -> Router {
    let server_routes = handlers::router(Arc::new(state));

    let (server, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(server_routes)
        .split_for_parts();

    server
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, api))
        .with_docs_redirect(DOCS_PATH)
        .with_tracing()
        .with_request_id()
        .with_correlation_id()
}

pub async fn init_server() -> anyhow::Result<(Router, TcpListener)> {
    let config = ServerConfig::load_from_env()?;

    let calendar_storage = repositories::init_repositories().await?;
    let calendar_service = services::init_services(calendar_storage).await?;
    let server = build_router(ServerState::new(calendar_service));

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    Ok((server, listener))
}
