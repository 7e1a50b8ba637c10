use std::future::Future;

use async_trait::async_trait;

use pullseq_core::error::Result;
use pullseq_core::sequence::{AsyncPullSource, PullSource};
use pullseq_core::source::{AsyncSource, Source};
use pullseq_core::step::Step;

/// A pull-shaped object backed by a closure.
pub struct PullFn<F> {
    func: F,
}

impl<F> PullFn<F> {
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F, T> PullSource for PullFn<F>
where
    F: FnMut() -> Result<Step<T>>,
{
    type Item = T;

    fn next(&mut self) -> Result<Step<T>> {
        (self.func)()
    }
}

/// A suspension-capable pull-shaped object backed by a closure returning a future.
pub struct AsyncPullFn<F> {
    func: F,
}

impl<F> AsyncPullFn<F> {
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F, Fut, T> AsyncPullSource for AsyncPullFn<F>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<Step<T>>> + Send,
    T: Send + 'static,
{
    type Item = T;

    async fn next(&mut self) -> Result<Step<T>> {
        (self.func)().await
    }
}

/// Build a sequence whose elements come from repeated calls to `func`.
///
/// ```
/// use pullseq_chain::lambda::from_fn;
/// use pullseq_chain::ext::SequenceExt;
/// use pullseq_core::step::Step;
///
/// let mut n = 0;
/// let evens = from_fn(move || {
///     n += 2;
///     Ok(if n <= 6 { Step::yielded(n) } else { Step::done() })
/// });
/// assert_eq!(evens.to_vec().unwrap(), vec![2, 4, 6]);
/// ```
pub fn from_fn<F, T>(func: F) -> Source<T>
where
    F: FnMut() -> Result<Step<T>> + 'static,
    T: 'static,
{
    Source::from_pull(PullFn::new(func))
}

/// Async counterpart of [`from_fn`].
pub fn from_async_fn<F, Fut, T>(func: F) -> AsyncSource<T>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Step<T>>> + Send + 'static,
    T: Send + 'static,
{
    AsyncSource::from_pull(AsyncPullFn::new(func))
}
