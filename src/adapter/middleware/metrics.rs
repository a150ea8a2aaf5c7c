use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::adapter::handler::AppState;

/// HTTP リクエストごとに件数とレイテンシのメトリクスを記録する。
pub async fn track_metrics(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    let elapsed = start.elapsed().as_secs_f64();
    state.metrics.record_http_request(&method, &path, &status);
    state.metrics.record_http_duration(&method, &path, elapsed);

    response
}
