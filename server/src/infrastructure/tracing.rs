use axum::{
    Router,
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub trait TracingExtensions {
    fn with_tracing(self) -> Self;
    fn with_request_id(self) -> Self;
    fn with_correlation_id(self) -> Self;
}

pub fn init_tracing() -> anyhow::Result<()> {
    LogTracer::init()?;

    let fmt_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .boxed();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let subscriber = Registry::default().with(filter_layer).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

impl<S> TracingExtensions for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// One span per request, carrying the request id so handler logs can be
    /// grouped. Must be layered before `with_request_id` so the id is already
    /// on the request when the span is created.
    fn with_tracing(self) -> Self {
        self.layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();

                    tracing::info_span!(
                        "request",
                        %request_id,
                        method = %req.method(),
                        uri = %req.uri(),
                        version = ?req.version()
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(tower_http::LatencyUnit::Millis),
                ),
        )
    }

    fn with_request_id(self) -> Self {
        self.layer(middleware::from_fn(request_id_middleware))
    }

    fn with_correlation_id(self) -> Self {
        self.layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let correlation_id = req
                    .headers()
                    .get(CORRELATION_ID_HEADER)
                    .and_then(|v| v.to_str().ok());

                if let Some(cid) = correlation_id {
                    tracing::info_span!("correlation_id", correlation_id = %cid)
                } else {
                    Span::none()
                }
            }),
        )
        .layer(middleware::from_fn(correlation_id_middleware))
    }
}

/// Correlation ID is chosen by whoever starts a flow and travels through every
/// service involved. It is echoed back untouched and never generated here.
async fn correlation_id_middleware(req: Request<Body>, next: Next) -> Response {
    let header_name = HeaderName::from_static(CORRELATION_ID_HEADER);
    let correlation_id = req.headers().get(&header_name).cloned();

    let mut res = next.run(req).await;

    if let Some(cid) = correlation_id {
        res.headers_mut().insert(header_name, cid);
    }

    res
}

/// Request ID identifies all logs of a single request. A client-supplied id is
/// kept, otherwise a UUID v4 is generated. Either way it is returned in the
/// response headers.
async fn request_id_middleware(mut req: Request<Body>, next: Next) -> Response {
    let header_name = HeaderName::from_static(REQUEST_ID_HEADER);

    let request_id = match req.headers().get(&header_name) {
        Some(value) => value.clone(),
        None => match HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            Ok(value) => value,
            Err(_) => return next.run(req).await,
        },
    };

    req.headers_mut()
        .insert(header_name.clone(), request_id.clone());
    req.extensions_mut().insert(request_id.clone());

    let mut res = next.run(req).await;

    res.headers_mut().insert(header_name, request_id);
    res
}
