use async_trait::async_trait;

use pullseq_core::error::Result;
use pullseq_core::sequence::{AsyncSequence, IntoAsyncSequence, Sequence};

/// Expands each upstream value into a collection and yields its elements in order.
///
/// Upstream is pulled only once the current expansion runs dry.
pub struct FlatMap<S, F, I>
where
    I: IntoIterator,
{
    pub(crate) upstream: S,
    pub(crate) transform: F,
    pub(crate) current: Option<I::IntoIter>,
    pub(crate) exhausted: bool,
}

impl<S, F, I> Sequence for FlatMap<S, F, I>
where
    S: Sequence,
    F: FnMut(S::Item) -> Result<I>,
    I: IntoIterator,
{
    type Item = I::Item;

    fn pull(&mut self) -> Result<Option<I::Item>> {
        loop {
            if let Some(expansion) = self.current.as_mut() {
                if let Some(value) = expansion.next() {
                    return Ok(Some(value));
                }
                self.current = None;
            }
            if self.exhausted {
                return Ok(None);
            }
            match self.upstream.pull()? {
                Some(value) => self.current = Some((self.transform)(value)?.into_iter()),
                None => {
                    self.exhausted = true;
                    return Ok(None);
                }
            }
        }
    }
}

/// Async counterpart of [`FlatMap`].
///
/// The expansion may itself be an async sequence, pulled one element at a time.
pub struct AsyncFlatMap<S, F, E>
where
    E: IntoAsyncSequence,
{
    pub(crate) upstream: S,
    pub(crate) transform: F,
    pub(crate) current: Option<E::IntoSeq>,
    pub(crate) exhausted: bool,
}

#[async_trait]
impl<S, F, E> AsyncSequence for AsyncFlatMap<S, F, E>
where
    S: AsyncSequence,
    F: FnMut(S::Item) -> Result<E> + Send,
    E: IntoAsyncSequence + Send,
{
    type Item = E::Item;

    async fn pull(&mut self) -> Result<Option<E::Item>> {
        loop {
            if let Some(expansion) = self.current.as_mut() {
                if let Some(value) = expansion.pull().await? {
                    return Ok(Some(value));
                }
                self.current = None;
            }
            if self.exhausted {
                return Ok(None);
            }
            match self.upstream.pull().await? {
                Some(value) => {
                    self.current = Some((self.transform)(value)?.into_async_sequence());
                }
                None => {
                    self.exhausted = true;
                    return Ok(None);
                }
            }
        }
    }
}
