use async_trait::async_trait;

use pullseq_core::error::Result;
use pullseq_core::sequence::{AsyncSequence, Sequence};

/// Yields only the upstream values for which `predicate` holds.
///
/// A single pull may drain several rejected upstream values.
pub struct Filter<S, P> {
    pub(crate) upstream: S,
    pub(crate) predicate: P,
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> Result<bool>,
{
    type Item = S::Item;

    fn pull(&mut self) -> Result<Option<S::Item>> {
        while let Some(value) = self.upstream.pull()? {
            if (self.predicate)(&value)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

/// Async counterpart of [`Filter`].
pub struct AsyncFilter<S, P> {
    pub(crate) upstream: S,
    pub(crate) predicate: P,
}

#[async_trait]
impl<S, P> AsyncSequence for AsyncFilter<S, P>
where
    S: AsyncSequence,
    P: FnMut(&S::Item) -> Result<bool> + Send,
{
    type Item = S::Item;

    async fn pull(&mut self) -> Result<Option<S::Item>> {
        while let Some(value) = self.upstream.pull().await? {
            if (self.predicate)(&value)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}
