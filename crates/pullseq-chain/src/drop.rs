use async_trait::async_trait;

use pullseq_core::error::Result;
use pullseq_core::sequence::{AsyncSequence, Sequence};

/// Discards the first `remaining` upstream values, then passes the rest through.
pub struct DropFirst<S> {
    pub(crate) upstream: S,
    pub(crate) remaining: usize,
}

impl<S: Sequence> Sequence for DropFirst<S> {
    type Item = S::Item;

    fn pull(&mut self) -> Result<Option<S::Item>> {
        while self.remaining > 0 {
            self.remaining -= 1;
            if self.upstream.pull()?.is_none() {
                self.remaining = 0;
                return Ok(None);
            }
        }
        self.upstream.pull()
    }
}

/// Async counterpart of [`DropFirst`].
pub struct AsyncDropFirst<S> {
    pub(crate) upstream: S,
    pub(crate) remaining: usize,
}

#[async_trait]
impl<S: AsyncSequence> AsyncSequence for AsyncDropFirst<S> {
    type Item = S::Item;

    async fn pull(&mut self) -> Result<Option<S::Item>> {
        while self.remaining > 0 {
            self.remaining -= 1;
            if self.upstream.pull().await?.is_none() {
                self.remaining = 0;
                return Ok(None);
            }
        }
        self.upstream.pull().await
    }
}
