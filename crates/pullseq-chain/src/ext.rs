//! Extension traits carrying the combinators and consuming operations.
//!
//! [`SequenceExt`] and [`AsyncSequenceExt`] mirror each other method for
//! method. Combinators take their upstream by value and return a new node;
//! consuming operations drain the chain in pull order.

use std::future::Future;

use async_trait::async_trait;

use pullseq_core::error::Result;
use pullseq_core::sequence::{AsyncSequence, IntoAsyncSequence, Sequence};

use crate::bridge::{self, BoxSeqStream, SeqIter};
use crate::drop::{AsyncDropFirst, DropFirst};
use crate::filter::{AsyncFilter, Filter};
use crate::flat_map::{AsyncFlatMap, FlatMap};
use crate::indexed::{AsyncIndexedPairs, IndexedPairs};
use crate::map::{AsyncMap, Map};
use crate::take::{AsyncTake, Take};

/// Combinators and consuming operations for [`Sequence`].
pub trait SequenceExt: Sequence + Sized {
    fn map<U, F>(self, transform: F) -> Map<Self, F>
    where
        F: FnMut(Self::Item) -> Result<U>,
    {
        Map {
            upstream: self,
            transform,
        }
    }

    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Item) -> Result<bool>,
    {
        Filter {
            upstream: self,
            predicate,
        }
    }

    /// Yield at most `count` values; upstream is not pulled once they are delivered.
    fn take(self, count: usize) -> Take<Self> {
        Take {
            upstream: self,
            remaining: count,
        }
    }

    /// Skip the first `count` values.
    fn drop(self, count: usize) -> DropFirst<Self> {
        DropFirst {
            upstream: self,
            remaining: count,
        }
    }

    fn as_indexed_pairs(self) -> IndexedPairs<Self> {
        IndexedPairs {
            upstream: self,
            index: 0,
        }
    }

    fn flat_map<I, F>(self, transform: F) -> FlatMap<Self, F, I>
    where
        F: FnMut(Self::Item) -> Result<I>,
        I: IntoIterator,
    {
        FlatMap {
            upstream: self,
            transform,
            current: None,
            exhausted: false,
        }
    }

    /// Borrow this sequence so a chain can be built without giving it up.
    fn by_ref(&mut self) -> &mut Self {
        self
    }

    fn iter(self) -> SeqIter<Self> {
        SeqIter::new(self)
    }

    /// Fold every remaining value into `initial` with `combine`.
    fn reduce<A, F>(mut self, mut combine: F, initial: A) -> Result<A>
    where
        F: FnMut(A, Self::Item) -> Result<A>,
    {
        let mut accumulator = initial;
        while let Some(value) = self.pull()? {
            accumulator = combine(accumulator, value)?;
        }
        Ok(accumulator)
    }

    fn to_vec(mut self) -> Result<Vec<Self::Item>> {
        let mut values = Vec::new();
        while let Some(value) = self.pull()? {
            values.push(value);
        }
        Ok(values)
    }

    fn for_each<F>(mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(Self::Item) -> Result<()>,
    {
        while let Some(value) = self.pull()? {
            callback(value)?;
        }
        Ok(())
    }

    /// True at the first value satisfying `predicate`; nothing further is pulled.
    fn some<P>(mut self, mut predicate: P) -> Result<bool>
    where
        P: FnMut(Self::Item) -> Result<bool>,
    {
        while let Some(value) = self.pull()? {
            if predicate(value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// False at the first value failing `predicate`; nothing further is pulled.
    fn every<P>(mut self, mut predicate: P) -> Result<bool>
    where
        P: FnMut(Self::Item) -> Result<bool>,
    {
        while let Some(value) = self.pull()? {
            if !predicate(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<S: Sequence + Sized> SequenceExt for S {}

/// Combinators and consuming operations for [`AsyncSequence`].
///
/// Each consuming operation awaits one pull at a time; `for_each` also awaits
/// its callback before pulling again.
#[async_trait]
pub trait AsyncSequenceExt: AsyncSequence + Sized {
    fn map<U, F>(self, transform: F) -> AsyncMap<Self, F>
    where
        F: FnMut(Self::Item) -> Result<U> + Send,
        U: Send + 'static,
    {
        AsyncMap {
            upstream: self,
            transform,
        }
    }

    fn filter<P>(self, predicate: P) -> AsyncFilter<Self, P>
    where
        P: FnMut(&Self::Item) -> Result<bool> + Send,
    {
        AsyncFilter {
            upstream: self,
            predicate,
        }
    }

    fn take(self, count: usize) -> AsyncTake<Self> {
        AsyncTake {
            upstream: self,
            remaining: count,
        }
    }

    fn drop(self, count: usize) -> AsyncDropFirst<Self> {
        AsyncDropFirst {
            upstream: self,
            remaining: count,
        }
    }

    fn as_indexed_pairs(self) -> AsyncIndexedPairs<Self> {
        AsyncIndexedPairs {
            upstream: self,
            index: 0,
        }
    }

    /// Expand each value into a `Vec` or another async sequence.
    fn flat_map<E, F>(self, transform: F) -> AsyncFlatMap<Self, F, E>
    where
        F: FnMut(Self::Item) -> Result<E> + Send,
        E: IntoAsyncSequence + Send,
    {
        AsyncFlatMap {
            upstream: self,
            transform,
            current: None,
            exhausted: false,
        }
    }

    fn by_ref(&mut self) -> &mut Self {
        self
    }

    fn into_stream(self) -> BoxSeqStream<Self::Item>
    where
        Self: 'static,
    {
        bridge::into_stream(self)
    }

    async fn reduce<A, F>(mut self, mut combine: F, initial: A) -> Result<A>
    where
        A: Send,
        F: FnMut(A, Self::Item) -> Result<A> + Send,
    {
        let mut accumulator = initial;
        while let Some(value) = self.pull().await? {
            accumulator = combine(accumulator, value)?;
        }
        Ok(accumulator)
    }

    async fn to_vec(mut self) -> Result<Vec<Self::Item>> {
        let mut values = Vec::new();
        while let Some(value) = self.pull().await? {
            values.push(value);
        }
        Ok(values)
    }

    async fn for_each<F, Fut>(mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(Self::Item) -> Fut + Send,
        Fut: Future<Output = Result<()>> + Send,
    {
        while let Some(value) = self.pull().await? {
            callback(value).await?;
        }
        Ok(())
    }

    async fn some<P>(mut self, mut predicate: P) -> Result<bool>
    where
        P: FnMut(Self::Item) -> Result<bool> + Send,
    {
        while let Some(value) = self.pull().await? {
            if predicate(value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn every<P>(mut self, mut predicate: P) -> Result<bool>
    where
        P: FnMut(Self::Item) -> Result<bool> + Send,
    {
        while let Some(value) = self.pull().await? {
            if !predicate(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<S: AsyncSequence + Sized> AsyncSequenceExt for S {}
