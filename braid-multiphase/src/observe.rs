/// Receives diagnostic events and optionally requests an action.
///
/// Observers let callers watch a composition without changing its API,
/// enabling logging or custom bookkeeping. The `observe` method returns
/// `Option<A>`, where `Some(action)` requests an action and `None` lets the
/// caller continue unchanged. Composition diagnostics are informational
/// only, so the composer uses `A = ()` and ignores any returned action.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer that always returns `None`.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

/// Blanket implementation for observer closures.
impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
