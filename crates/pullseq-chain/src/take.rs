use async_trait::async_trait;

use pullseq_core::error::Result;
use pullseq_core::sequence::{AsyncSequence, Sequence};

/// Yields at most `remaining` upstream values.
///
/// Once the budget is spent, upstream is never pulled again.
pub struct Take<S> {
    pub(crate) upstream: S,
    pub(crate) remaining: usize,
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;

    fn pull(&mut self) -> Result<Option<S::Item>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        let next = self.upstream.pull()?;
        if next.is_none() {
            self.remaining = 0;
        }
        Ok(next)
    }
}

/// Async counterpart of [`Take`].
pub struct AsyncTake<S> {
    pub(crate) upstream: S,
    pub(crate) remaining: usize,
}

#[async_trait]
impl<S: AsyncSequence> AsyncSequence for AsyncTake<S> {
    type Item = S::Item;

    async fn pull(&mut self) -> Result<Option<S::Item>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        let next = self.upstream.pull().await?;
        if next.is_none() {
            self.remaining = 0;
        }
        Ok(next)
    }
}
