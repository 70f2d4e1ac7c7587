//! Local stand-ins for the completions endpoint, used by client and analyzer tests.

use axum::{http::header, http::StatusCode, routing::post, Router};
use tokio::net::TcpListener;

/// Serves `body` with `status` for every completion request and returns the
/// endpoint URL. The server lives until the test runtime shuts down.
pub async fn serve_completions(status: StatusCode, body: &str) -> String {
    let body = body.to_string();
    let app = Router::new().route(
        "/v1/completions",
        post(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/v1/completions")
}

/// An endpoint on a port that was free a moment ago, so connecting is refused.
pub fn closed_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1/completions")
}
