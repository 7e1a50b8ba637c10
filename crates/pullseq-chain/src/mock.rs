use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use pullseq_core::error::{Result, SeqError};
use pullseq_core::sequence::{AsyncPullSource, AsyncSequence, Sequence};
use pullseq_core::source::AsyncSource;
use pullseq_core::step::Step;

/// Shared view of how many times a mock source has been pulled.
#[derive(Debug, Clone, Default)]
pub struct PullCounter(Arc<AtomicUsize>);

impl PullCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

/// A sequence over preset values that counts every pull, including those past the end.
pub struct CountingSource<T> {
    items: std::vec::IntoIter<T>,
    pulls: PullCounter,
}

impl<T> CountingSource<T> {
    /// Create the source together with a handle to its pull counter.
    pub fn new(items: Vec<T>) -> (Self, PullCounter) {
        let pulls = PullCounter::default();
        let source = Self {
            items: items.into_iter(),
            pulls: pulls.clone(),
        };
        (source, pulls)
    }
}

impl<T> Sequence for CountingSource<T> {
    type Item = T;

    fn pull(&mut self) -> Result<Option<T>> {
        self.pulls.bump();
        Ok(self.items.next())
    }
}

/// Async counterpart of [`CountingSource`]; yields to the scheduler before each pull.
pub struct AsyncCountingSource<T> {
    items: std::vec::IntoIter<T>,
    pulls: PullCounter,
}

impl<T> AsyncCountingSource<T> {
    pub fn new(items: Vec<T>) -> (Self, PullCounter) {
        let pulls = PullCounter::default();
        let source = Self {
            items: items.into_iter(),
            pulls: pulls.clone(),
        };
        (source, pulls)
    }
}

#[async_trait]
impl<T: Send + 'static> AsyncSequence for AsyncCountingSource<T> {
    type Item = T;

    async fn pull(&mut self) -> Result<Option<T>> {
        tokio::task::yield_now().await;
        self.pulls.bump();
        Ok(self.items.next())
    }
}

/// A pull-shaped object that sleeps before answering each `next` call.
///
/// The last element is delivered together with `done == true`, and calls
/// past the end return no value.
pub struct DelayedSource<T> {
    items: Vec<T>,
    position: usize,
    delay: Duration,
}

impl<T: Clone + Send + 'static> DelayedSource<T> {
    pub fn new(items: Vec<T>, delay: Duration) -> Self {
        Self {
            items,
            position: 0,
            delay,
        }
    }

    /// Wrap preset values in an [`AsyncSource`] with a one millisecond delay per step.
    pub fn from_vec(items: Vec<T>) -> AsyncSource<T> {
        AsyncSource::from_pull(Self::new(items, Duration::from_millis(1)))
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> AsyncPullSource for DelayedSource<T> {
    type Item = T;

    async fn next(&mut self) -> Result<Step<T>> {
        tokio::time::sleep(self.delay).await;
        let value = self.items.get(self.position).cloned();
        self.position += 1;
        Ok(Step {
            value,
            done: self.position >= self.items.len(),
        })
    }
}

/// A sequence that yields `0..ok_count` and then fails on every pull.
pub struct FailingSource {
    yielded: usize,
    ok_count: usize,
}

impl FailingSource {
    pub fn new(ok_count: usize) -> Self {
        Self {
            yielded: 0,
            ok_count,
        }
    }

    fn step(&mut self) -> Result<Option<usize>> {
        if self.yielded < self.ok_count {
            self.yielded += 1;
            Ok(Some(self.yielded - 1))
        } else {
            Err(SeqError::Producer(format!(
                "source failed after {} values",
                self.ok_count
            )))
        }
    }
}

impl Sequence for FailingSource {
    type Item = usize;

    fn pull(&mut self) -> Result<Option<usize>> {
        self.step()
    }
}

/// Async counterpart of [`FailingSource`].
pub struct AsyncFailingSource(FailingSource);

impl AsyncFailingSource {
    pub fn new(ok_count: usize) -> Self {
        Self(FailingSource::new(ok_count))
    }
}

#[async_trait]
impl AsyncSequence for AsyncFailingSource {
    type Item = usize;

    async fn pull(&mut self) -> Result<Option<usize>> {
        tokio::task::yield_now().await;
        self.0.step()
    }
}
