pub mod config;
pub mod error;
pub mod registry;
pub mod sequence;
pub mod source;
pub mod step;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{ExhaustionPolicy, SeqConfig};
    pub use crate::error::{Result, SeqError, SourceError};
    pub use crate::registry::{Capability, Namespace, Registry, register_builtins};
    pub use crate::sequence::{
        AsyncPullSource, AsyncSequence, IntoAsyncSequence, PullSource, Sequence,
    };
    pub use crate::source::{AsyncSource, IterSource, Source, SourceKind, StreamSource};
    pub use crate::step::Step;
}
