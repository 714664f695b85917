//! The wrapper chain and its fold.
//!
//! A [`Composer`] is a list of `T -> T` functions. Nothing runs until
//! [`Composer::finalize`] is handed the innermost value; the wrappers are then
//! applied last-appended first, so the first wrapper you append ends up on the
//! outside:
//!
//! ```text
//! Composer::new().append([w0, w1, w2]).finalize(core)
//!        ↓
//! w0(w1(w2(core)))
//! ```

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

// ── Wrapper ───────────────────────────────────────────────────────────────────

/// A heap-allocated wrapper function that can cross threads.
///
/// Every closure has its own anonymous type, so a list of them has to be
/// stored behind a trait object. This is the default storage: a
/// `Composer<T>` built from these is `Send + Sync` and can be finalized from
/// several threads through a shared reference.
pub type Wrapper<T> = Box<dyn Fn(T) -> T + Send + Sync + 'static>;

/// A heap-allocated wrapper function confined to one thread.
///
/// No `Send`, `Sync` or `'static` requirement: the closure may capture `Rc`,
/// `Cell`, or borrow locals that outlive `'a`.
pub type LocalWrapper<'a, T> = Box<dyn Fn(T) -> T + 'a>;

/// Boxes a closure into a [`Wrapper`].
///
/// Use it to pass several differently-typed closures to one
/// [`Composer::append`] call:
///
/// ```rust
/// use enfold::{Composer, wrapper};
///
/// let chain = Composer::new().append([
///     wrapper(|n: u32| n + 1),
///     wrapper(|n: u32| n * 10),
/// ]);
/// assert_eq!(chain.finalize(2), 21);
/// ```
pub fn wrapper<T, F>(f: F) -> Wrapper<T>
where
    F: Fn(T) -> T + Send + Sync + 'static,
{
    Box::new(f)
}

/// Boxes a closure into a [`LocalWrapper`].
pub fn local_wrapper<'a, T, F>(f: F) -> LocalWrapper<'a, T>
where
    F: Fn(T) -> T + 'a,
{
    Box::new(f)
}

// ── Composer ──────────────────────────────────────────────────────────────────

/// An ordered chain of wrappers over a single value type `T`.
///
/// Build it once, then [`finalize`](Composer::finalize) it around as many
/// terminal values as you like. Append calls take and return `self`, so they
/// chain.
///
/// `W` is how each wrapper is stored. It defaults to [`Wrapper<T>`];
/// [`Composer::local`] picks [`LocalWrapper`] instead, and any `Fn(T) -> T`
/// type works through [`Default`]:
///
/// ```rust
/// use std::cell::Cell;
/// use enfold::Composer;
///
/// let calls = Cell::new(0);
/// let chain = Composer::local().wrap_local(|n: u32| {
///     calls.set(calls.get() + 1);
///     n + 1
/// });
///
/// assert_eq!(chain.finalize(1), 2);
/// assert_eq!(calls.get(), 1);
/// ```
pub struct Composer<T, W = Wrapper<T>> {
    wrappers: Vec<W>,
    _value: PhantomData<fn(T) -> T>,
}

impl<T> Composer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single closure. Shorthand for `append([wrapper(f)])`.
    pub fn wrap<F>(self, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.append([wrapper(f)])
    }
}

impl<'a, T> Composer<T, LocalWrapper<'a, T>> {
    /// An empty chain of single-threaded wrappers.
    pub fn local() -> Self {
        Self::default()
    }

    /// Appends a single closure. Shorthand for `append([local_wrapper(f)])`.
    pub fn wrap_local<F>(self, f: F) -> Self
    where
        F: Fn(T) -> T + 'a,
    {
        self.append([local_wrapper(f)])
    }
}

impl<T, W> Composer<T, W>
where
    W: Fn(T) -> T,
{
    /// Appends `wrappers`, in iteration order, to the end of the chain.
    ///
    /// An empty iterator leaves the chain untouched. Appending in two calls is
    /// the same as appending once with both wrappers.
    pub fn append<I>(mut self, wrappers: I) -> Self
    where
        I: IntoIterator<Item = W>,
    {
        self.extend(wrappers);
        self
    }

    /// Folds the chain around `terminal`.
    ///
    /// With wrappers `[w0, w1, …, wn]` this returns `w0(w1(…wn(terminal)…))`;
    /// with none it returns `terminal` unchanged. The chain itself is only
    /// read, so every call applies the same composition.
    ///
    /// A panicking wrapper unwinds straight through this call.
    pub fn finalize(&self, terminal: T) -> T {
        trace!(wrappers = self.wrappers.len(), "finalizing chain");
        self.wrappers
            .iter()
            .rev()
            .fold(terminal, |inner, layer| layer(inner))
    }

    /// Number of wrappers appended so far.
    pub fn len(&self) -> usize { self.wrappers.len() }

    /// `true` if `finalize` would return its terminal unchanged.
    pub fn is_empty(&self) -> bool { self.wrappers.is_empty() }
}

impl<T, W> Default for Composer<T, W> {
    fn default() -> Self {
        Self { wrappers: Vec::new(), _value: PhantomData }
    }
}

impl<T, W> Extend<W> for Composer<T, W>
where
    W: Fn(T) -> T,
{
    fn extend<I: IntoIterator<Item = W>>(&mut self, iter: I) {
        let before = self.wrappers.len();
        self.wrappers.extend(iter);
        trace!(
            added = self.wrappers.len() - before,
            total = self.wrappers.len(),
            "wrappers appended"
        );
    }
}

impl<T, W> FromIterator<W> for Composer<T, W>
where
    W: Fn(T) -> T,
{
    fn from_iter<I: IntoIterator<Item = W>>(iter: I) -> Self {
        Self::default().append(iter)
    }
}

impl<T, W> fmt::Debug for Composer<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("wrappers", &self.wrappers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use super::*;

    fn tag(label: &'static str) -> Wrapper<String> {
        wrapper(move |inner: String| format!("[{label}{inner}{label}]"))
    }

    #[test]
    fn empty_chain_returns_terminal() {
        let chain = Composer::<String>::new();
        assert!(chain.is_empty());
        assert_eq!(chain.finalize("core".to_owned()), "core");
    }

    #[test]
    fn first_appended_is_outermost() {
        let chain = Composer::new().append([tag("A"), tag("B")]);
        assert_eq!(chain.finalize("core".to_owned()), "[A[BcoreB]A]");
    }

    #[test]
    fn wrappers_run_last_appended_first() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let record = |id: usize| {
            let order = Arc::clone(&order);
            wrapper(move |n: usize| {
                order.lock().unwrap().push(id);
                n + 1
            })
        };

        let chain = Composer::new().append((0..4).map(record));
        assert_eq!(chain.finalize(0), 4);
        assert_eq!(*order.lock().unwrap(), vec![3, 2, 1, 0]);
    }

    #[test]
    fn split_appends_match_single_append() {
        let split = Composer::new().append([tag("A")]).append([tag("B")]);
        let joined = Composer::new().append([tag("A"), tag("B")]);
        assert_eq!(
            split.finalize("x".to_owned()),
            joined.finalize("x".to_owned()),
        );
    }

    #[test]
    fn empty_append_is_a_no_op() {
        let chain = Composer::new().wrap(|n: i32| n * 2).append(Vec::new());
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.finalize(21), 42);
    }

    #[test]
    fn collects_and_extends_in_order() {
        let mut chain: Composer<String> = [tag("A")].into_iter().collect();
        chain.extend([tag("B")]);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.finalize("c".to_owned()), "[A[BcB]A]");
    }

    #[test]
    fn debug_shows_wrapper_count() {
        let chain = Composer::new().append([tag("A"), tag("B")]);
        assert_eq!(format!("{chain:?}"), "Composer { wrappers: 2 }");
    }

    #[test]
    fn local_wrappers_may_hold_rc_state() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let chain = Composer::local().wrap_local(move |n: u32| {
            counter.set(counter.get() + 1);
            n + 1
        });

        assert_eq!(chain.finalize(1), 2);
        assert_eq!(chain.finalize(5), 6);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn local_wrappers_may_borrow() {
        let prefix = String::from(">");
        let chain = Composer::local().append([
            local_wrapper(|s: String| format!("{prefix}{s}")),
            local_wrapper(|s: String| format!("{s}{prefix}")),
        ]);
        assert_eq!(chain.finalize("x".to_owned()), ">x>");
    }

    #[test]
    fn stores_a_concrete_closure_type() {
        let double = |n: u64| n * 2;
        let chain: Composer<u64, _> = Composer::default().append([double, double]);
        assert_eq!(chain.finalize(3), 12);
    }
}
