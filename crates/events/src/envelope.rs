use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use customsnet_core::{EventId, TransactionId};

use crate::event::Event;

/// Envelope for an emitted event, carrying transaction metadata.
///
/// Notes:
/// - `transaction_id` ties the event to the transaction whose mutation it
///   describes; one committed mutation yields exactly one envelope.
/// - `event_type` and `occurred_at` are copied from the payload so consumers
///   can route without decoding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: EventId,
    transaction_id: TransactionId,
    event_type: String,
    occurred_at: DateTime<Utc>,

    payload: E,
}

impl<E: Event> EventEnvelope<E> {
    pub fn new(event_id: EventId, transaction_id: TransactionId, payload: E) -> Self {
        Self {
            event_id,
            transaction_id,
            event_type: payload.event_type().to_string(),
            occurred_at: payload.occurred_at(),
            payload,
        }
    }
}

impl<E> EventEnvelope<E> {
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

impl<E: Serialize> EventEnvelope<E> {
    /// Re-encode the payload as JSON, e.g. for an external subscriber.
    pub fn to_json(&self) -> Result<EventEnvelope<serde_json::Value>, serde_json::Error> {
        Ok(EventEnvelope {
            event_id: self.event_id,
            transaction_id: self.transaction_id,
            event_type: self.event_type.clone(),
            occurred_at: self.occurred_at,
            payload: serde_json::to_value(&self.payload)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Pinged {
        at: DateTime<Utc>,
        count: u32,
    }

    impl Event for Pinged {
        fn event_type(&self) -> &'static str {
            "org.acme.test.Pinged"
        }

        fn version(&self) -> u32 {
            1
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    #[test]
    fn envelope_copies_event_metadata() {
        let at = Utc::now();
        let tx = TransactionId::new();
        let env = EventEnvelope::new(EventId::new(), tx, Pinged { at, count: 3 });

        assert_eq!(env.event_type(), "org.acme.test.Pinged");
        assert_eq!(env.occurred_at(), at);
        assert_eq!(env.transaction_id(), tx);
        assert_eq!(env.payload().count, 3);
    }

    #[test]
    fn to_json_keeps_ids_and_encodes_payload() {
        let env = EventEnvelope::new(
            EventId::new(),
            TransactionId::new(),
            Pinged {
                at: Utc::now(),
                count: 7,
            },
        );

        let json = env.to_json().unwrap();
        assert_eq!(json.event_id(), env.event_id());
        assert_eq!(json.payload()["count"], 7);
    }
}
