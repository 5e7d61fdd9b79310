//! Participants of the customs network (customs agencies, logistics
//! providers, importers and shippers).
//!
//! Participants are data only: they are created once by the demo setup and
//! referenced by invoices. No transaction in the network mutates them.

pub mod address;
pub mod participant;

pub use address::Address;
pub use participant::{
    CompanyContact, CustomsParticipant, ImporterParticipant, LogisticsParticipant,
    ShipperParticipant,
};
