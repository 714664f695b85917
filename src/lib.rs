//! # enfold
//!
//! Wrap a value in an ordered stack of decorators. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! You hand enfold a list of `T -> T` functions and, later, the innermost `T`.
//! enfold hands back `w0(w1(…wn(inner)…))`. The first wrapper you append is
//! the outermost layer; the last one sits right next to the core.
//!
//! What enfold intentionally leaves to the wrappers:
//!
//! - **Errors**: a wrapper that panics unwinds through [`Composer::finalize`]
//!   untouched
//! - **Scheduling and I/O**: the fold is synchronous and does no work of its own
//! - **Threads**: nothing is synchronized. Appending needs ownership; wrap the
//!   composer in your own lock if several threads must append. Wrappers only
//!   need to be `Send + Sync` if you want them to be; see [`Composer::local`]
//!
//! ## Quick start
//!
//! ```rust
//! use enfold::{Composer, wrapper};
//!
//! let chain = Composer::new().append([
//!     wrapper(|x: String| format!("[A{x}A]")),
//!     wrapper(|x: String| format!("[B{x}B]")),
//! ]);
//!
//! assert_eq!(chain.finalize("core".to_owned()), "[A[BcoreB]A]");
//! ```
//!
//! The usual `T` is itself a handler. [`handler`] erases async functions into
//! one [`Handler`](handler::Handler) type so middleware can be stacked the same
//! way.

mod composer;

pub mod handler;

pub use composer::{Composer, LocalWrapper, Wrapper, local_wrapper, wrapper};
