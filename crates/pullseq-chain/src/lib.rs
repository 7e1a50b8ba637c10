pub mod bridge;
pub mod drop;
pub mod ext;
pub mod filter;
pub mod flat_map;
pub mod indexed;
pub mod lambda;
pub mod map;
pub mod mock;
pub mod take;

pub mod prelude {
    pub use crate::bridge::SeqIter;
    pub use crate::ext::{AsyncSequenceExt, SequenceExt};
    pub use crate::lambda::{from_async_fn, from_fn};
    pub use pullseq_core::prelude::*;
}
