//! Bridges from pull sequences to `std` iterators and `futures` streams.

use std::pin::Pin;

use futures::Stream;

use pullseq_core::error::Result;
use pullseq_core::sequence::{AsyncSequence, Sequence};

/// Iterator over a [`Sequence`]. Ends after exhaustion or after the first error.
pub struct SeqIter<S> {
    inner: Option<S>,
}

impl<S> SeqIter<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { inner: Some(seq) }
    }
}

impl<S: Sequence> Iterator for SeqIter<S> {
    type Item = Result<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let seq = self.inner.as_mut()?;
        match seq.pull() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.inner = None;
                None
            }
            Err(err) => {
                self.inner = None;
                Some(Err(err))
            }
        }
    }
}

impl<S: Sequence> std::iter::FusedIterator for SeqIter<S> {}

pub type BoxSeqStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// Stream over an [`AsyncSequence`], with the same stop rule as [`SeqIter`].
pub(crate) fn into_stream<S>(seq: S) -> BoxSeqStream<S::Item>
where
    S: AsyncSequence + 'static,
{
    Box::pin(futures::stream::unfold(Some(seq), |state| async move {
        let mut seq = state?;
        match seq.pull().await {
            Ok(Some(value)) => Some((Ok(value), Some(seq))),
            Ok(None) => None,
            Err(err) => Some((Err(err), None)),
        }
    }))
}
