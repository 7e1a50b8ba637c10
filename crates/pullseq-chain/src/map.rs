use async_trait::async_trait;

use pullseq_core::error::Result;
use pullseq_core::sequence::{AsyncSequence, Sequence};

/// Applies `transform` to each upstream value as it is pulled.
pub struct Map<S, F> {
    pub(crate) upstream: S,
    pub(crate) transform: F,
}

impl<S, F, U> Sequence for Map<S, F>
where
    S: Sequence,
    F: FnMut(S::Item) -> Result<U>,
{
    type Item = U;

    fn pull(&mut self) -> Result<Option<U>> {
        match self.upstream.pull()? {
            Some(value) => (self.transform)(value).map(Some),
            None => Ok(None),
        }
    }
}

/// Async counterpart of [`Map`].
pub struct AsyncMap<S, F> {
    pub(crate) upstream: S,
    pub(crate) transform: F,
}

#[async_trait]
impl<S, F, U> AsyncSequence for AsyncMap<S, F>
where
    S: AsyncSequence,
    F: FnMut(S::Item) -> Result<U> + Send,
    U: Send + 'static,
{
    type Item = U;

    async fn pull(&mut self) -> Result<Option<U>> {
        match self.upstream.pull().await? {
            Some(value) => (self.transform)(value).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use pullseq_core::error::SeqError;
    use pullseq_core::sequence::Sequence;
    use pullseq_core::source::{AsyncSource, Source};

    use crate::ext::{AsyncSequenceExt, SequenceExt};
    use crate::mock::{CountingSource, DelayedSource};

    #[test]
    fn map_transforms_each_value() {
        let values = Source::from_vec(vec![1, 2, 3])
            .map(|x| Ok(x + 1))
            .to_vec()
            .unwrap();
        assert_eq!(values, vec![2, 3, 4]);
    }

    #[test]
    fn map_is_lazy() {
        let (source, pulls) = CountingSource::new(vec![1, 2, 3]);
        let mut calls = 0;
        let mut mapped = source.map(|x| {
            calls += 1;
            Ok(x * 10)
        });
        assert_eq!(pulls.get(), 0);
        assert_eq!(mapped.pull().unwrap(), Some(10));
        assert_eq!(pulls.get(), 1);
        drop(mapped);
        assert_eq!(calls, 1);
    }

    #[test]
    fn map_error_stops_the_pull() {
        let (source, pulls) = CountingSource::new(vec![1, 2, 3]);
        let mut mapped = source.map(|x| {
            if x == 2 {
                Err(SeqError::Callback("two".into()))
            } else {
                Ok(x)
            }
        });
        assert_eq!(mapped.pull().unwrap(), Some(1));
        assert!(matches!(mapped.pull(), Err(SeqError::Callback(_))));
        assert_eq!(pulls.get(), 2);
        assert_eq!(mapped.pull().unwrap(), Some(3));
    }

    #[test]
    fn map_changes_type() {
        let values = Source::from_vec(vec![1, 2])
            .map(|x| Ok(format!("#{x}")))
            .to_vec()
            .unwrap();
        assert_eq!(values, vec!["#1", "#2"]);
    }

    #[tokio::test]
    async fn async_map_over_delayed_source() {
        let values = DelayedSource::from_vec(vec![1, 2, 3])
            .map(|x| Ok(x + 1))
            .to_vec()
            .await
            .unwrap();
        assert_eq!(values, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn async_map_error_propagates() {
        let result = AsyncSource::from_vec(vec![1, 2])
            .map(|_| Err::<i32, _>(SeqError::Callback("nope".into())))
            .to_vec()
            .await;
        assert!(result.is_err());
    }
}
