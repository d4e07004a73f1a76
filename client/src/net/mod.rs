//! Realtime channel plumbing.
//!
//! SYSTEM CONTEXT
//! ==============
//! `channel` defines the capability the feed depends on, `hub` is the
//! in-memory implementation shared through Leptos context, and
//! `socket_client` drives the Socket.IO websocket that feeds the hub.

pub mod channel;
pub mod hub;
pub mod socket_client;

pub use channel::{ChannelClient, ChannelError, ConnectionStatus, Inbound, Subscription, SubscriptionId};
pub use hub::ChannelHub;
