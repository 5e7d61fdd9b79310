use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use customsnet_events::Event;

use crate::sample::SampleEvent;
use crate::shipment::CustomsEvent;

/// Every event the network emits.
///
/// Serialized untagged: the payload is the event's own fields, and the type
/// travels in the envelope's `event_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkEvent {
    SampleEvent(SampleEvent),
    CustomsEvent(CustomsEvent),
}

impl Event for NetworkEvent {
    fn event_type(&self) -> &'static str {
        match self {
            NetworkEvent::SampleEvent(_) => "org.acme.sample.SampleEvent",
            NetworkEvent::CustomsEvent(_) => "org.acme.sample.CustomsEvent",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            NetworkEvent::SampleEvent(e) => e.occurred_at,
            NetworkEvent::CustomsEvent(e) => e.occurred_at,
        }
    }
}

impl From<SampleEvent> for NetworkEvent {
    fn from(value: SampleEvent) -> Self {
        NetworkEvent::SampleEvent(value)
    }
}

impl From<CustomsEvent> for NetworkEvent {
    fn from(value: CustomsEvent) -> Self {
        NetworkEvent::CustomsEvent(value)
    }
}
