//! Transaction handlers.
//!
//! Each handler is a strictly sequential chain: mutate in memory, obtain the
//! registry, persist, then emit. Every step is awaited before the next one
//! starts and the first failure ends the invocation. An event is emitted only
//! once its mutation has been persisted.

pub mod customs;
pub mod sample;
pub mod setup_demo;

pub use customs::review_import_goods;
pub use sample::sample_transaction;
pub use setup_demo::{SeedSummary, setup_demo};
