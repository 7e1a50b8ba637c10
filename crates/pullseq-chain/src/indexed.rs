use async_trait::async_trait;

use pullseq_core::error::Result;
use pullseq_core::sequence::{AsyncSequence, Sequence};

/// Pairs each upstream value with its zero-based position.
pub struct IndexedPairs<S> {
    pub(crate) upstream: S,
    pub(crate) index: usize,
}

impl<S: Sequence> Sequence for IndexedPairs<S> {
    type Item = (usize, S::Item);

    fn pull(&mut self) -> Result<Option<Self::Item>> {
        let Some(value) = self.upstream.pull()? else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;
        Ok(Some((index, value)))
    }
}

pub struct AsyncIndexedPairs<S> {
    pub(crate) upstream: S,
    pub(crate) index: usize,
}

#[async_trait]
impl<S: AsyncSequence> AsyncSequence for AsyncIndexedPairs<S> {
    type Item = (usize, S::Item);

    async fn pull(&mut self) -> Result<Option<Self::Item>> {
        let Some(value) = self.upstream.pull().await? else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;
        Ok(Some((index, value)))
    }
}
