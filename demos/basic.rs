//! Minimal enfold example: timing and auth middleware around an async handler.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Set RUST_LOG=trace to also see the composer's own events.

use std::time::Instant;

use enfold::Composer;
use enfold::handler::{self, Handler};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct Request {
    user: Option<&'static str>,
    path: &'static str,
}

struct Response {
    status: u16,
    body: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = Composer::new()
        .append([handler::middleware(timing), handler::middleware(require_user)])
        .finalize(handler::from_fn(greet));

    for req in [
        Request { user: Some("alice"), path: "/hello" },
        Request { user: None, path: "/hello" },
    ] {
        let res = app(req).await;
        info!(status = res.status, body = %res.body, "response");
    }
}

// Outermost: sees every request, including the ones auth rejects.
async fn timing(req: Request, next: Handler<Request, Response>) -> Response {
    let path = req.path;
    let started = Instant::now();
    let res = next(req).await;
    info!(path, status = res.status, elapsed = ?started.elapsed(), "handled");
    res
}

async fn require_user(req: Request, next: Handler<Request, Response>) -> Response {
    if req.user.is_none() {
        warn!(path = req.path, "anonymous request rejected");
        return Response { status: 401, body: String::new() };
    }
    next(req).await
}

async fn greet(req: Request) -> Response {
    let user = req.user.unwrap_or("stranger");
    Response { status: 200, body: format!("hello, {user}") }
}
