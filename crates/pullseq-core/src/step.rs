use crate::config::ExhaustionPolicy;

/// The result of asking a pull-shaped object for its next element.
///
/// Mirrors the `{ value, done }` pair that iterator-like producers hand back.
/// Whether `done` is honoured is decided by the reading side's
/// [`ExhaustionPolicy`], not by the producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<T> {
    pub value: Option<T>,
    pub done: bool,
}

impl<T> Step<T> {
    /// A value with more to come.
    pub fn yielded(value: T) -> Self {
        Self {
            value: Some(value),
            done: false,
        }
    }

    /// The final value, delivered together with `done`.
    pub fn last(value: T) -> Self {
        Self {
            value: Some(value),
            done: true,
        }
    }

    /// Nothing left.
    pub fn done() -> Self {
        Self {
            value: None,
            done: true,
        }
    }

    /// Interpret this step under `policy`, returning the value to yield, if any.
    pub fn into_value(self, policy: ExhaustionPolicy) -> Option<T> {
        match policy {
            ExhaustionPolicy::AbsentValue => self.value,
            ExhaustionPolicy::DoneFlag if self.done => None,
            ExhaustionPolicy::DoneFlag => self.value,
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::yielded(v),
            None => Self::done(),
        }
    }
}
