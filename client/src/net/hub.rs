//! In-memory dispatcher between the socket transport and feed subscribers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The transport decodes packets and hands named events to [`ChannelHub::deliver`];
//! the hub decodes payloads once and fans them out to every subscriber of that
//! kind. Outbound events are encoded into Engine.IO text packets and queued on
//! an unbounded channel that the transport drains once it is connected.
//!
//! The hub is `Clone + Send + Sync` so it can live in Leptos context.

#[cfg(test)]
#[path = "hub_test.rs"]
mod hub_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use feed_events::{CodecError, EnginePacket, EventKind, OutboundEvent, decode_inbound, encode_engine};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::channel::{ChannelClient, ChannelError, ConnectionStatus, Inbound, Subscription, SubscriptionId};

struct Subscriber {
    id: SubscriptionId,
    kinds: Vec<EventKind>,
    tx: UnboundedSender<Inbound>,
}

struct HubInner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
    outbound: UnboundedSender<String>,
    status: ConnectionStatus,
}

/// Shared handle to the channel dispatcher.
#[derive(Clone)]
pub struct ChannelHub {
    inner: Arc<Mutex<HubInner>>,
}

impl std::fmt::Debug for ChannelHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ChannelHub")
            .field("subscribers", &inner.subscribers.len())
            .field("status", &inner.status)
            .finish()
    }
}

impl ChannelHub {
    /// Create a hub and the receiver of its encoded outbound packets.
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<String>) {
        let (outbound, outbound_rx) = mpsc::unbounded();
        let inner = HubInner { next_id: 1, subscribers: Vec::new(), outbound, status: ConnectionStatus::default() };
        (Self { inner: Arc::new(Mutex::new(inner)) }, outbound_rx)
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decode a named event and hand it to every subscriber of its kind.
    ///
    /// Returns how many subscribers received it. Unknown events are dropped;
    /// malformed payloads reach subscribers as [`Inbound::Rejected`].
    pub fn deliver(&self, name: &str, data: serde_json::Value) -> usize {
        let (kind, item) = match decode_inbound(name, data) {
            Ok(event) => (event.kind(), Inbound::Event(event)),
            Err(CodecError::UnknownEvent(name)) => {
                log::debug!("hub: ignoring event {name:?}");
                return 0;
            }
            Err(e) => {
                log::warn!("hub: rejected {name:?} payload: {e}");
                let Some(kind) = EventKind::from_name(name) else {
                    return 0;
                };
                (kind, Inbound::Rejected { kind, reason: e.to_string() })
            }
        };

        let mut inner = self.lock();
        inner.subscribers.retain(|s| !s.tx.is_closed());
        let mut delivered = 0;
        for subscriber in inner.subscribers.iter().filter(|s| s.kinds.contains(&kind)) {
            if subscriber.tx.unbounded_send(item.clone()).is_ok() {
                delivered += 1;
            }
        }
        log::debug!("hub: delivered {kind} to {delivered} subscriber(s)");
        delivered
    }

    /// Record a transport state change and tell every subscriber.
    pub fn set_status(&self, status: ConnectionStatus) {
        let mut inner = self.lock();
        if inner.status == status {
            return;
        }
        inner.status = status;
        log::info!("hub: connection {status:?}");
        for subscriber in &inner.subscribers {
            let _ = subscriber.tx.unbounded_send(Inbound::Status(status));
        }
    }

    /// Queue an already-encoded packet for the transport.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Closed`] when the outbound receiver is gone.
    pub fn send_raw(&self, text: String) -> Result<(), ChannelError> {
        self.lock().outbound.unbounded_send(text).map_err(|_| ChannelError::Closed)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Drop every subscriber, ending their queues.
    pub fn close(&self) {
        self.lock().subscribers.clear();
    }
}

impl ChannelClient for ChannelHub {
    fn subscribe(&self, kinds: &[EventKind]) -> Subscription {
        let (tx, rx) = mpsc::unbounded();
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push(Subscriber { id, kinds: kinds.to_vec(), tx });
        log::debug!("hub: subscription {} for {kinds:?}", id.0);
        Subscription::new(id, rx)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.lock();
        inner.subscribers.retain(|s| s.id != id);
        log::debug!("hub: unsubscribed {}", id.0);
    }

    fn emit(&self, event: &OutboundEvent) -> Result<(), ChannelError> {
        let text = encode_engine(&EnginePacket::Message(event.to_packet()?));
        log::debug!("hub: emit {}", event.kind());
        self.send_raw(text)
    }

    fn status(&self) -> ConnectionStatus {
        self.lock().status
    }
}
