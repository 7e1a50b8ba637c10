//! The construction adapter: turn a collection or a pull-shaped object into a sequence.
//!
//! Inputs are classified into a [`SourceKind`] before anything is built, so
//! an unusable input is rejected up front with [`SourceError`].

use std::any::Any;
use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde_json::Value;

use crate::config::SeqConfig;
use crate::error::{Result, SourceError};
use crate::sequence::{AsyncPullSource, AsyncSequence, IntoAsyncSequence, PullSource, Sequence};
use crate::step::Step;

/// A boxed pull-shaped object, as accepted by [`Source`].
pub type BoxPullSource<T> = Box<dyn PullSource<Item = T>>;

/// A boxed suspension-capable pull-shaped object, as accepted by [`AsyncSource`].
pub type BoxAsyncPullSource<T> = Box<dyn AsyncPullSource<Item = T>>;

/// The shape of a construction input, decided before dispatch.
pub enum SourceKind<T, P> {
    /// No input at all.
    Empty,
    /// A finite ordered collection, replayed in order.
    Collection(Vec<T>),
    /// An object exposing `next`.
    Pull(P),
    /// Anything else.
    Invalid(SourceError),
}

impl<T: 'static, P: 'static> SourceKind<T, P> {
    /// Classify a dynamically typed input.
    ///
    /// `None` is the "no argument" case. `()` stands in for a null input.
    pub fn classify(input: Option<Box<dyn Any>>) -> Self {
        let Some(input) = input else {
            return Self::Empty;
        };
        let input = match input.downcast::<Vec<T>>() {
            Ok(items) => return Self::Collection(*items),
            Err(other) => other,
        };
        let input = match input.downcast::<P>() {
            Ok(pull) => return Self::Pull(*pull),
            Err(other) => other,
        };
        if input.is::<()>() {
            Self::Invalid(SourceError::Null)
        } else {
            Self::Invalid(SourceError::Unsupported {
                found: "value without a next method".into(),
            })
        }
    }
}

impl<T, P> SourceKind<T, P> {
    fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Collection(_) => "collection",
            Self::Pull(_) => "pull",
            Self::Invalid(_) => "invalid",
        }
    }
}

impl<T, P> From<Vec<T>> for SourceKind<T, P> {
    fn from(items: Vec<T>) -> Self {
        Self::Collection(items)
    }
}

impl<P> SourceKind<Value, P> {
    /// Classify a JSON input: arrays are collections, `null` and scalars are rejected.
    pub fn from_json(input: Option<Value>) -> Self {
        match input {
            None => Self::Empty,
            Some(Value::Array(items)) => Self::Collection(items),
            Some(Value::Null) => Self::Invalid(SourceError::Null),
            Some(other) => Self::Invalid(SourceError::Unsupported {
                found: json_kind(&other).into(),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

enum State<T, P> {
    Collection(std::vec::IntoIter<T>),
    Pull(P),
    Exhausted,
}

/// A [`Sequence`] built by the construction adapter.
pub struct Source<T> {
    state: State<T, BoxPullSource<T>>,
    config: SeqConfig,
}

impl<T: 'static> Source<T> {
    /// Build a sequence from a classified input.
    pub fn from(kind: SourceKind<T, BoxPullSource<T>>) -> Result<Self> {
        Self::with_config(kind, SeqConfig::default())
    }

    pub fn with_config(kind: SourceKind<T, BoxPullSource<T>>, config: SeqConfig) -> Result<Self> {
        tracing::debug!(source = config.label_or_default(), kind = kind.label(), "building source");
        let state = match kind {
            SourceKind::Empty => State::Exhausted,
            SourceKind::Collection(items) => State::Collection(items.into_iter()),
            SourceKind::Pull(pull) => State::Pull(pull),
            SourceKind::Invalid(err) => return Err(err.into()),
        };
        Ok(Self { state, config })
    }

    /// Classify `input` and build a sequence from it.
    pub fn from_any(input: Option<Box<dyn Any>>) -> Result<Self> {
        Self::from(SourceKind::classify(input))
    }

    pub fn empty() -> Self {
        Self {
            state: State::Exhausted,
            config: SeqConfig::default(),
        }
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            state: State::Collection(items.into_iter()),
            config: SeqConfig::default(),
        }
    }

    pub fn from_pull<P>(pull: P) -> Self
    where
        P: PullSource<Item = T> + 'static,
    {
        Self {
            state: State::Pull(Box::new(pull)),
            config: SeqConfig::default(),
        }
    }
}

impl Source<Value> {
    /// Build a sequence over the elements of a JSON array.
    pub fn from_json(input: Option<Value>) -> Result<Self> {
        Self::from(SourceKind::from_json(input))
    }
}

impl<T> Sequence for Source<T> {
    type Item = T;

    fn pull(&mut self) -> Result<Option<T>> {
        let next = match &mut self.state {
            State::Exhausted => return Ok(None),
            State::Collection(items) => items.next(),
            State::Pull(pull) => pull.next()?.into_value(self.config.exhaustion),
        };
        if next.is_none() {
            tracing::debug!(source = self.config.label_or_default(), "source exhausted");
            self.state = State::Exhausted;
        }
        Ok(next)
    }
}

/// An [`AsyncSequence`] built by the construction adapter.
pub struct AsyncSource<T> {
    state: State<T, BoxAsyncPullSource<T>>,
    config: SeqConfig,
}

impl<T: Send + 'static> AsyncSource<T> {
    /// Build a sequence from a classified input.
    pub fn from(kind: SourceKind<T, BoxAsyncPullSource<T>>) -> Result<Self> {
        Self::with_config(kind, SeqConfig::default())
    }

    pub fn with_config(
        kind: SourceKind<T, BoxAsyncPullSource<T>>,
        config: SeqConfig,
    ) -> Result<Self> {
        tracing::debug!(source = config.label_or_default(), kind = kind.label(), "building async source");
        let state = match kind {
            SourceKind::Empty => State::Exhausted,
            SourceKind::Collection(items) => State::Collection(items.into_iter()),
            SourceKind::Pull(pull) => State::Pull(pull),
            SourceKind::Invalid(err) => return Err(err.into()),
        };
        Ok(Self { state, config })
    }

    /// Classify `input` and build a sequence from it.
    pub fn from_any(input: Option<Box<dyn Any>>) -> Result<Self> {
        Self::from(SourceKind::classify(input))
    }

    pub fn empty() -> Self {
        Self {
            state: State::Exhausted,
            config: SeqConfig::default(),
        }
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            state: State::Collection(items.into_iter()),
            config: SeqConfig::default(),
        }
    }

    pub fn from_pull<P>(pull: P) -> Self
    where
        P: AsyncPullSource<Item = T> + 'static,
    {
        Self {
            state: State::Pull(Box::new(pull)),
            config: SeqConfig::default(),
        }
    }
}

impl AsyncSource<Value> {
    /// Build a sequence over the elements of a JSON array.
    pub fn from_json(input: Option<Value>) -> Result<Self> {
        Self::from(SourceKind::from_json(input))
    }
}

#[async_trait]
impl<T: Send + 'static> AsyncSequence for AsyncSource<T> {
    type Item = T;

    async fn pull(&mut self) -> Result<Option<T>> {
        let next = match &mut self.state {
            State::Exhausted => return Ok(None),
            State::Collection(items) => items.next(),
            State::Pull(pull) => pull.next().await?.into_value(self.config.exhaustion),
        };
        if next.is_none() {
            tracing::debug!(source = self.config.label_or_default(), "async source exhausted");
            self.state = State::Exhausted;
        }
        Ok(next)
    }
}

impl<T: Send + 'static> IntoAsyncSequence for Vec<T> {
    type Item = T;
    type IntoSeq = AsyncSource<T>;

    fn into_async_sequence(self) -> AsyncSource<T> {
        AsyncSource::from_vec(self)
    }
}

/// Adapts a [`std::iter::Iterator`] into a pull-shaped object.
pub struct IterSource<I>(I);

impl<I: Iterator> IterSource<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self(iter.into_iter())
    }
}

impl<I: Iterator> PullSource for IterSource<I> {
    type Item = I::Item;

    fn next(&mut self) -> Result<Step<I::Item>> {
        Ok(self.0.next().into())
    }
}

/// Adapts a [`futures::Stream`] into a suspension-capable pull-shaped object.
pub struct StreamSource<S>(Pin<Box<S>>);

impl<S> StreamSource<S>
where
    S: Stream + Send,
{
    pub fn new(stream: S) -> Self {
        Self(Box::pin(stream))
    }
}

#[async_trait]
impl<S> AsyncPullSource for StreamSource<S>
where
    S: Stream + Send,
    S::Item: Send + 'static,
{
    type Item = S::Item;

    async fn next(&mut self) -> Result<Step<S::Item>> {
        Ok(self.0.next().await.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExhaustionPolicy;
    use crate::error::SeqError;

    /// Replays preset steps, then keeps reporting `done`.
    struct Scripted<T> {
        steps: std::collections::VecDeque<Step<T>>,
        calls: usize,
    }

    impl<T> Scripted<T> {
        fn new(steps: Vec<Step<T>>) -> Self {
            Self {
                steps: steps.into(),
                calls: 0,
            }
        }
    }

    impl<T> PullSource for Scripted<T> {
        type Item = T;

        fn next(&mut self) -> Result<Step<T>> {
            self.calls += 1;
            Ok(self.steps.pop_front().unwrap_or_else(Step::done))
        }
    }

    #[async_trait]
    impl<T: Send + 'static> AsyncPullSource for Scripted<T> {
        type Item = T;

        async fn next(&mut self) -> Result<Step<T>> {
            tokio::task::yield_now().await;
            self.calls += 1;
            Ok(self.steps.pop_front().unwrap_or_else(Step::done))
        }
    }

    fn drain<S: Sequence>(mut seq: S) -> Vec<S::Item> {
        let mut out = Vec::new();
        while let Some(v) = seq.pull().unwrap() {
            out.push(v);
        }
        out
    }

    #[test]
    fn collection_replays_in_order() {
        let seq = Source::from(SourceKind::from(vec![1, 2, 3])).unwrap();
        assert_eq!(drain(seq), vec![1, 2, 3]);
    }

    #[test]
    fn empty_input_is_exhausted() {
        let mut seq = Source::<i32>::from(SourceKind::Empty).unwrap();
        assert_eq!(seq.pull().unwrap(), None);
        assert_eq!(seq.pull().unwrap(), None);
    }

    #[test]
    fn pull_source_stops_on_absent_value() {
        let scripted = Scripted::new(vec![
            Step::yielded(1),
            Step::yielded(2),
            Step::last(3),
            Step::yielded(4),
        ]);
        let seq = Source::from_pull(scripted);
        // The value carried alongside `done` is kept; the trailing 4 is too,
        // because exhaustion is read from the value alone.
        assert_eq!(drain(seq), vec![1, 2, 3, 4]);
    }

    #[test]
    fn pull_source_with_done_flag_policy() {
        let scripted: BoxPullSource<i32> =
            Box::new(Scripted::new(vec![Step::yielded(1), Step::last(2), Step::yielded(3)]));
        let config = SeqConfig::new().with_exhaustion(ExhaustionPolicy::DoneFlag);
        let seq = Source::with_config(SourceKind::Pull(scripted), config).unwrap();
        assert_eq!(drain(seq), vec![1]);
    }

    #[test]
    fn pull_source_is_not_called_after_exhaustion() {
        struct Resurrecting(usize);

        impl PullSource for Resurrecting {
            type Item = usize;

            fn next(&mut self) -> Result<Step<usize>> {
                self.0 += 1;
                if self.0 == 2 {
                    Ok(Step::done())
                } else {
                    Ok(Step::yielded(self.0))
                }
            }
        }

        let mut seq = Source::from_pull(Resurrecting(0));
        assert_eq!(seq.pull().unwrap(), Some(1));
        assert_eq!(seq.pull().unwrap(), None);
        assert_eq!(seq.pull().unwrap(), None);
    }

    #[test]
    fn producer_error_propagates() {
        struct Broken;

        impl PullSource for Broken {
            type Item = i32;

            fn next(&mut self) -> Result<Step<i32>> {
                Err(SeqError::Producer("disk on fire".into()))
            }
        }

        let mut seq = Source::from_pull(Broken);
        let err = seq.pull().unwrap_err();
        assert!(matches!(err, SeqError::Producer(_)));
    }

    #[test]
    fn classify_dynamic_inputs() {
        type Kind = SourceKind<i32, BoxPullSource<i32>>;

        assert!(matches!(Kind::classify(None), SourceKind::Empty));
        assert!(matches!(
            Kind::classify(Some(Box::new(vec![1, 2]))),
            SourceKind::Collection(ref items) if items == &[1, 2]
        ));
        let pull: BoxPullSource<i32> = Box::new(IterSource::new(vec![7]));
        assert!(matches!(Kind::classify(Some(Box::new(pull))), SourceKind::Pull(_)));
        assert!(matches!(
            Kind::classify(Some(Box::new(()))),
            SourceKind::Invalid(SourceError::Null)
        ));
        assert!(matches!(
            Kind::classify(Some(Box::new("not a sequence"))),
            SourceKind::Invalid(SourceError::Unsupported { .. })
        ));
    }

    #[test]
    fn from_any_rejects_invalid_input() {
        let err = Source::<i32>::from_any(Some(Box::new(42u8))).err().unwrap();
        assert!(matches!(err, SeqError::InvalidSource(_)));
        assert!(err.to_string().contains("expected array or iterator-like object"));
    }

    #[test]
    fn from_any_pull_source() {
        let pull: BoxPullSource<&str> = Box::new(IterSource::new(["a", "b"]));
        let seq = Source::<&str>::from_any(Some(Box::new(pull))).unwrap();
        assert_eq!(drain(seq), vec!["a", "b"]);
    }

    #[test]
    fn json_inputs() {
        let seq = Source::from_json(Some(serde_json::json!([1, "two", null]))).unwrap();
        assert_eq!(
            drain(seq),
            vec![serde_json::json!(1), serde_json::json!("two"), Value::Null]
        );

        let mut empty = Source::from_json(None).unwrap();
        assert_eq!(empty.pull().unwrap(), None);

        let null = Source::from_json(Some(Value::Null)).err().unwrap();
        assert!(matches!(null, SeqError::InvalidSource(SourceError::Null)));

        let scalar = Source::from_json(Some(serde_json::json!({"next": 1}))).err().unwrap();
        assert_eq!(
            scalar.to_string(),
            "Invalid source: expected array or iterator-like object, got object"
        );
    }

    #[tokio::test]
    async fn async_collection_and_pull() {
        let mut seq = AsyncSource::from(SourceKind::from(vec![1, 2])).unwrap();
        assert_eq!(seq.pull().await.unwrap(), Some(1));
        assert_eq!(seq.pull().await.unwrap(), Some(2));
        assert_eq!(seq.pull().await.unwrap(), None);

        let mut seq = AsyncSource::from_pull(Scripted::new(vec![
            Step::yielded("x"),
            Step::last("y"),
        ]));
        assert_eq!(seq.pull().await.unwrap(), Some("x"));
        assert_eq!(seq.pull().await.unwrap(), Some("y"));
        assert_eq!(seq.pull().await.unwrap(), None);
        assert_eq!(seq.pull().await.unwrap(), None);
    }

    #[tokio::test]
    async fn async_done_flag_policy() {
        let pull: BoxAsyncPullSource<i32> =
            Box::new(Scripted::new(vec![Step::yielded(1), Step::last(2)]));
        let config = SeqConfig::new().with_exhaustion(ExhaustionPolicy::DoneFlag);
        let mut seq = AsyncSource::with_config(SourceKind::Pull(pull), config).unwrap();
        assert_eq!(seq.pull().await.unwrap(), Some(1));
        assert_eq!(seq.pull().await.unwrap(), None);
    }

    #[tokio::test]
    async fn async_invalid_and_empty() {
        assert!(AsyncSource::<i32>::from_any(Some(Box::new(()))).is_err());
        let mut empty = AsyncSource::<i32>::from_any(None).unwrap();
        assert_eq!(empty.pull().await.unwrap(), None);
    }

    #[tokio::test]
    async fn stream_source_adapts_futures_stream() {
        let stream = futures::stream::iter(vec![10, 20]);
        let mut seq = AsyncSource::from_pull(StreamSource::new(stream));
        assert_eq!(seq.pull().await.unwrap(), Some(10));
        assert_eq!(seq.pull().await.unwrap(), Some(20));
        assert_eq!(seq.pull().await.unwrap(), None);
    }

    #[tokio::test]
    async fn vec_into_async_sequence() {
        let mut seq = vec!['a', 'b'].into_async_sequence();
        assert_eq!(seq.pull().await.unwrap(), Some('a'));
        assert_eq!(seq.pull().await.unwrap(), Some('b'));
        assert_eq!(seq.pull().await.unwrap(), None);
    }
}
