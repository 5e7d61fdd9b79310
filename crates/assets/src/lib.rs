//! Assets of the customs network and the events raised when they change.
//!
//! Everything here is deterministic record logic (no registries, no IO). The
//! handlers that persist these records live in `customsnet-runtime`.

pub mod event;
pub mod invoice;
pub mod sample;
pub mod shipment;

pub use event::NetworkEvent;
pub use invoice::{Invoice, NewInvoice};
pub use sample::{SampleAsset, SampleEvent};
pub use shipment::{CustomsEvent, CustomsStatus, Shipment};
