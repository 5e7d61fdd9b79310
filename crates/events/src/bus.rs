//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is the emission collaborator handed to every transaction. Handlers
//! publish after their registry write has succeeded; the bus fans each message
//! out to whoever subscribed.
//!
//! - **Transport-agnostic**: in-memory channels here; the host may plug in
//!   anything else
//! - **No persistence**: the bus distributes, it does not store
//! - **Broadcast**: every subscription receives a copy of every message

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// let receipt = processor.submit(request).await?;
/// for envelope in subscription.drain() {
///     println!("{}", envelope.event_type());
/// }
/// ```
///
/// Subscriptions are meant for a single consumer. Messages arrive in the
/// order they were published.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything published so far that has not been received yet.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail (bus closed, lock poisoned, broker down). Callers that
/// treat emission as fire-and-forget log the failure instead of propagating it.
///
/// The trait requires `Send + Sync` so one bus can be shared by every
/// transaction context.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
