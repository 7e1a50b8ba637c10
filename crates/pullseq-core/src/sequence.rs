use async_trait::async_trait;

use crate::error::Result;
use crate::step::Step;

/// Core abstraction for a single-pass, pull-based sequence.
///
/// Every stage of a pipeline (sources, combinator nodes) implements this
/// trait. `Ok(None)` signals exhaustion; once returned, every later call must
/// return `Ok(None)` again without side effects. Errors raised by the
/// underlying producer are handed back unchanged.
pub trait Sequence {
    type Item;

    /// Advance by one element.
    fn pull(&mut self) -> Result<Option<Self::Item>>;
}

impl<S: Sequence + ?Sized> Sequence for &mut S {
    type Item = S::Item;

    fn pull(&mut self) -> Result<Option<Self::Item>> {
        (**self).pull()
    }
}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
    type Item = S::Item;

    fn pull(&mut self) -> Result<Option<Self::Item>> {
        (**self).pull()
    }
}

/// The suspension-capable counterpart of [`Sequence`].
///
/// Same contract; a pull may yield to the scheduler before its result is
/// available. Callers never issue a second pull before the first resolves.
#[async_trait]
pub trait AsyncSequence: Send {
    type Item: Send + 'static;

    /// Advance by one element.
    async fn pull(&mut self) -> Result<Option<Self::Item>>;
}

#[async_trait]
impl<S: AsyncSequence + ?Sized> AsyncSequence for &mut S {
    type Item = S::Item;

    async fn pull(&mut self) -> Result<Option<Self::Item>> {
        (**self).pull().await
    }
}

#[async_trait]
impl<S: AsyncSequence + ?Sized> AsyncSequence for Box<S> {
    type Item = S::Item;

    async fn pull(&mut self) -> Result<Option<Self::Item>> {
        (**self).pull().await
    }
}

/// Conversion into an [`AsyncSequence`], used for flat-map expansions.
pub trait IntoAsyncSequence {
    type Item: Send + 'static;
    type IntoSeq: AsyncSequence<Item = Self::Item>;

    fn into_async_sequence(self) -> Self::IntoSeq;
}

impl<S: AsyncSequence> IntoAsyncSequence for S {
    type Item = S::Item;
    type IntoSeq = S;

    fn into_async_sequence(self) -> S {
        self
    }
}

/// An object exposing a `next` method, wrapped by the construction adapter.
pub trait PullSource {
    type Item;

    fn next(&mut self) -> Result<Step<Self::Item>>;
}

/// An object whose `next` result arrives after a suspension.
#[async_trait]
pub trait AsyncPullSource: Send {
    type Item: Send + 'static;

    async fn next(&mut self) -> Result<Step<Self::Item>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown(u32);

    impl Sequence for Countdown {
        type Item = u32;

        fn pull(&mut self) -> Result<Option<u32>> {
            if self.0 == 0 {
                return Ok(None);
            }
            self.0 -= 1;
            Ok(Some(self.0))
        }
    }

    struct AsyncCountdown(u32);

    #[async_trait]
    impl AsyncSequence for AsyncCountdown {
        type Item = u32;

        async fn pull(&mut self) -> Result<Option<u32>> {
            tokio::task::yield_now().await;
            if self.0 == 0 {
                return Ok(None);
            }
            self.0 -= 1;
            Ok(Some(self.0))
        }
    }

    #[test]
    fn exhaustion_is_monotonic() {
        let mut seq = Countdown(1);
        assert_eq!(seq.pull().unwrap(), Some(0));
        assert_eq!(seq.pull().unwrap(), None);
        assert_eq!(seq.pull().unwrap(), None);
    }

    #[test]
    fn mutable_reference_is_a_sequence() {
        let mut seq = Countdown(3);
        {
            let mut borrowed = &mut seq;
            assert_eq!(Sequence::pull(&mut borrowed).unwrap(), Some(2));
        }
        assert_eq!(seq.pull().unwrap(), Some(1));
    }

    #[test]
    fn boxed_trait_object_is_a_sequence() {
        let mut seq: Box<dyn Sequence<Item = u32>> = Box::new(Countdown(2));
        assert_eq!(seq.pull().unwrap(), Some(1));
        assert_eq!(seq.pull().unwrap(), Some(0));
        assert_eq!(seq.pull().unwrap(), None);
    }

    #[tokio::test]
    async fn async_boxed_and_borrowed() {
        let mut seq: Box<dyn AsyncSequence<Item = u32>> = Box::new(AsyncCountdown(2));
        assert_eq!((&mut seq).pull().await.unwrap(), Some(1));
        assert_eq!(seq.pull().await.unwrap(), Some(0));
        assert_eq!(seq.pull().await.unwrap(), None);
    }

    #[tokio::test]
    async fn async_sequence_converts_into_itself() {
        let mut seq = AsyncCountdown(1).into_async_sequence();
        assert_eq!(seq.pull().await.unwrap(), Some(0));
        assert_eq!(seq.pull().await.unwrap(), None);
    }
}
