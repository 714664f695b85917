//! Type-erased async handlers, ready to be wrapped.
//!
//! A [`Composer`](crate::Composer) folds values of one type, so every layer of
//! an async middleware stack has to be the *same* type. Named `async fn`s and
//! closures all have distinct types, so they are erased behind a trait object:
//!
//! ```text
//! async fn hello(req: Req) -> Res { … }      ← user writes this
//!        ↓ handler::from_fn(hello)
//! Arc<dyn Fn(Req) -> BoxFuture<Res>>         ← Handler<Req, Res>
//!        ↓ handler::middleware(log)          ← Wrapper<Handler<Req, Res>>
//! composer.finalize(handler)                 ← still a Handler<Req, Res>
//! ```
//!
//! `Arc` rather than `Box` because a middleware keeps the next handler and
//! clones it into every future it produces.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::composer::{Wrapper, wrapper};

/// A heap-allocated, type-erased future that resolves to `R`.
///
/// `Send + 'static` let any multi-threaded executor move it between threads.
pub type BoxFuture<R> = Pin<Box<dyn Future<Output = R> + Send + 'static>>;

/// A shareable async function from `Req` to `Res`.
pub type Handler<Req, Res> = Arc<dyn Fn(Req) -> BoxFuture<Res> + Send + Sync + 'static>;

/// Erases an async function into a [`Handler`].
///
/// ```rust
/// use enfold::handler;
///
/// async fn double(n: u64) -> u64 { n * 2 }
///
/// let h = handler::from_fn(double);
/// # let _ = h;
/// ```
pub fn from_fn<Req, Res, F, Fut>(f: F) -> Handler<Req, Res>
where
    Req: 'static,
    Res: 'static,
    F: Fn(Req) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Res> + Send + 'static,
{
    Arc::new(move |req: Req| Box::pin(f(req)) as BoxFuture<Res>)
}

/// Builds a [`Wrapper`] from a middleware function.
///
/// `f` receives each request together with the next handler in the chain and
/// decides when (or whether) to call it. Work before `next(req).await` runs on
/// the way in, work after it on the way out.
///
/// ```rust
/// use enfold::{Composer, handler::{self, Handler}};
///
/// let chain = Composer::new().append([handler::middleware(
///     |req: String, next: Handler<String, String>| async move {
///         let res = next(req).await;
///         format!("<{res}>")
///     },
/// )]);
///
/// let app = chain.finalize(handler::from_fn(|req: String| async move { req }));
/// # let _ = app;
/// ```
pub fn middleware<Req, Res, F, Fut>(f: F) -> Wrapper<Handler<Req, Res>>
where
    Req: 'static,
    Res: 'static,
    F: Fn(Req, Handler<Req, Res>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Res> + Send + 'static,
{
    let f = Arc::new(f);
    wrapper(move |next: Handler<Req, Res>| {
        let f = Arc::clone(&f);
        Arc::new(move |req: Req| Box::pin(f(req, Arc::clone(&next))) as BoxFuture<Res>)
            as Handler<Req, Res>
    })
}
