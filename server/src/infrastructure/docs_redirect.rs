use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

pub trait DocsRedirectExtensions {
    /// Sends requests for `/` to the API documentation with a `302 Found`.
    fn with_docs_redirect(self, docs_path: &'static str) -> Self;
}

impl<S> DocsRedirectExtensions for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_docs_redirect(self, docs_path: &'static str) -> Self {
        self.layer(middleware::from_fn_with_state(
            docs_path,
            docs_redirect_middleware,
        ))
    }
}

async fn docs_redirect_middleware(
    State(docs_path): State<&'static str>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.uri().path() != "/" {
        return next.run(req).await;
    }

    (
        StatusCode::FOUND,
        [(header::LOCATION, HeaderValue::from_static(docs_path))],
    )
        .into_response()
}
