//! Transaction runtime for the customs network.
//!
//! Handlers receive every host capability (registries, factory, event bus)
//! through an explicit [`TransactionContext`]; nothing here is ambient.

pub mod config;
pub mod context;
pub mod factory;
pub mod fixture;
pub mod handlers;
pub mod processor;
pub mod registry;
pub mod transaction;
pub mod world;


pub use config::{ConfigError, RuntimeConfig};
pub use context::TransactionContext;
pub use factory::Factory;
pub use fixture::{DemoFixture, MAX_DEMO_INVOICES};
pub use handlers::{SeedSummary, review_import_goods, sample_transaction, setup_demo};
pub use processor::{HistorianRecord, TransactionError, TransactionProcessor, TransactionReceipt};
pub use registry::{InMemoryRegistry, Registry, RegistryError, RegistryProvider};
pub use transaction::{SampleTransaction, SetupDemo, ShipmentCustomsReview, TransactionRequest};
pub use world::InMemoryWorldState;
