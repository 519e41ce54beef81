use std::any::Any;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;
use crate::{admin, auth, tasks};

pub fn build_app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(|| async { "API running..." }))
        .nest(
            "/api/v1",
            Router::new()
                .merge(auth::router())
                .merge(tasks::router(&state))
                .merge(admin::router(&state))
                .route("/health", get(|| async { "ok" })),
        )
        .fallback(route_not_found)
        .with_state(state);
    with_middleware(routes)
}

/// Outer stack shared by every route: unmatched methods become the JSON 404,
/// panics become the internal-error envelope, then CORS and request tracing.
fn with_middleware(router: Router) -> Router {
    router
        .layer(middleware::map_response(method_mismatch_as_not_found))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, ?latency, "response");
                        } else {
                            tracing::info!(%status, ?latency, "response");
                        }
                    },
                ),
        )
}

async fn route_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "Route not found".into(),
            errors: None,
        }),
    )
}

async fn method_mismatch_as_not_found(res: Response) -> Response {
    if res.status() == StatusCode::METHOD_NOT_ALLOWED {
        route_not_found().await.into_response()
    } else {
        res
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".into());
    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

pub async fn serve(app: Router, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
