//! Channel client capability consumed by the comment feed.
//!
//! DESIGN
//! ======
//! The feed never reaches for a global socket. It receives something that
//! implements [`ChannelClient`], subscribes to the event kinds it cares about,
//! and reads a single ordered queue per subscription. Dropping the
//! subscription through [`ChannelClient::unsubscribe`] ends that queue.

use feed_events::{CodecError, EventKind, InboundEvent, OutboundEvent};
use futures::channel::mpsc::UnboundedReceiver;
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Error returned when the channel cannot carry an outbound event.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The transport side of the channel has gone away.
    #[error("channel closed")]
    Closed,
    /// The event could not be encoded for the wire.
    #[error("failed to encode event: {0}")]
    Encode(#[from] CodecError),
}

/// Transport connection state as seen by subscribers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// One item on a subscription queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    /// A decoded event of a subscribed kind.
    Event(InboundEvent),
    /// A subscribed event arrived with a payload that failed to decode.
    Rejected { kind: EventKind, reason: String },
    /// The transport changed state.
    Status(ConnectionStatus),
}

/// Identifier handed out by [`ChannelClient::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Receiving end of a subscription, in arrival order.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    items: UnboundedReceiver<Inbound>,
}

impl Subscription {
    pub fn new(id: SubscriptionId, items: UnboundedReceiver<Inbound>) -> Self {
        Self { id, items }
    }

    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Take the next ready item without waiting.
    ///
    /// Returns `None` both when nothing is queued and when the queue has ended.
    pub fn try_next(&mut self) -> Option<Inbound> {
        self.items.try_next().ok().flatten()
    }

}

impl Stream for Subscription {
    type Item = Inbound;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.items).poll_next(cx)
    }
}

/// Publish/subscribe access to the realtime channel.
pub trait ChannelClient {
    /// Register a passive listener for `kinds`.
    fn subscribe(&self, kinds: &[EventKind]) -> Subscription;

    /// Remove a listener registered by [`ChannelClient::subscribe`].
    fn unsubscribe(&self, id: SubscriptionId);

    /// Send an event to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Closed`] when the transport is gone and
    /// [`ChannelError::Encode`] when the event cannot be encoded.
    fn emit(&self, event: &OutboundEvent) -> Result<(), ChannelError>;

    /// Current transport state. Later changes arrive as [`Inbound::Status`].
    fn status(&self) -> ConnectionStatus;
}

impl<C: ChannelClient + ?Sized> ChannelClient for &C {
    fn subscribe(&self, kinds: &[EventKind]) -> Subscription {
        (**self).subscribe(kinds)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        (**self).unsubscribe(id);
    }

    fn emit(&self, event: &OutboundEvent) -> Result<(), ChannelError> {
        (**self).emit(event)
    }

    fn status(&self) -> ConnectionStatus {
        (**self).status()
    }
}
