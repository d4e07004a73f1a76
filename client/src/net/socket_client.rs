//! Websocket transport that feeds the [`ChannelHub`].
//!
//! The transport owns the Socket.IO session: it opens the websocket, answers
//! the Engine.IO open packet with a namespace connect, replies to heartbeats,
//! and only starts draining the hub's outbound queue once the server has
//! acknowledged the namespace. Dropped connections are retried with
//! exponential backoff.
//!
//! All websocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment. Packet handling is kept in [`react_to_text`]
//! so it can be tested natively.
//!
//! ERROR HANDLING
//! ==============
//! Undecodable packets are logged and skipped. Transport errors end the current
//! connection; the hub reports the disconnect to subscribers and the loop
//! reconnects.

#[cfg(test)]
#[path = "socket_client_test.rs"]
mod socket_client_test;

use feed_events::{EnginePacket, SocketPacket, decode_engine, encode_engine};

#[cfg(feature = "hydrate")]
use super::channel::ConnectionStatus;
#[cfg(feature = "hydrate")]
use super::hub::ChannelHub;
#[cfg(feature = "hydrate")]
use crate::config::FeedConfig;

/// What the transport should do with one inbound text frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Reaction {
    /// Write this packet back to the server.
    Reply(String),
    /// The namespace connect was acknowledged.
    Connected,
    /// Hand a named event to the hub.
    Deliver { name: String, data: serde_json::Value },
    /// The server ended the session.
    Disconnected(String),
    Ignore,
}

/// Decide how to handle one websocket text frame.
pub fn react_to_text(text: &str) -> Reaction {
    match decode_engine(text) {
        Ok(packet) => react(packet),
        Err(e) => {
            log::warn!("socket: undecodable packet {text:?}: {e}");
            Reaction::Ignore
        }
    }
}

fn react(packet: EnginePacket) -> Reaction {
    match packet {
        EnginePacket::Open(handshake) => {
            log::debug!("socket: engine open sid={} ping_interval={}ms", handshake.sid, handshake.ping_interval);
            Reaction::Reply(encode_engine(&EnginePacket::Message(SocketPacket::Connect(None))))
        }
        EnginePacket::Ping(body) => Reaction::Reply(encode_engine(&EnginePacket::Pong(body))),
        EnginePacket::Close => Reaction::Disconnected("engine closed".to_owned()),
        EnginePacket::Message(SocketPacket::Connect(_)) => Reaction::Connected,
        EnginePacket::Message(SocketPacket::Event { name, data, .. }) => Reaction::Deliver { name, data },
        EnginePacket::Message(SocketPacket::Disconnect) => Reaction::Disconnected("namespace disconnected".to_owned()),
        EnginePacket::Message(SocketPacket::ConnectError(data)) => {
            let message = data
                .get("message")
                .and_then(|v| v.as_str())
                .map_or_else(|| data.to_string(), ToOwned::to_owned);
            Reaction::Disconnected(format!("connect refused: {message}"))
        }
        EnginePacket::Message(SocketPacket::Ack { .. })
        | EnginePacket::Pong(_)
        | EnginePacket::Upgrade
        | EnginePacket::Noop => Reaction::Ignore,
    }
}

/// Spawn the websocket lifecycle as a local async task.
#[cfg(feature = "hydrate")]
pub fn spawn_socket_client(
    hub: ChannelHub,
    outbound: futures::channel::mpsc::UnboundedReceiver<String>,
    config: FeedConfig,
) {
    leptos::task::spawn_local(socket_client_loop(hub, outbound, config));
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "hydrate")]
async fn socket_client_loop(
    hub: ChannelHub,
    mut outbound: futures::channel::mpsc::UnboundedReceiver<String>,
    config: FeedConfig,
) {
    let mut backoff_ms = config.reconnect_initial_ms;

    loop {
        hub.set_status(ConnectionStatus::Connecting);

        let href = web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default();
        let host = web_sys::window()
            .and_then(|w| w.location().host().ok())
            .unwrap_or_default();
        let url = config.socket_url(&href, &host);

        match connect_and_run(&url, &hub, &mut outbound).await {
            Ok(true) => {
                log::info!("socket: disconnected cleanly");
                backoff_ms = config.reconnect_initial_ms;
            }
            Ok(false) => log::warn!("socket: closed before namespace connect"),
            Err(e) => log::warn!("socket: {e}"),
        }

        hub.set_status(ConnectionStatus::Disconnected);

        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = config.next_backoff(backoff_ms);
    }
}

/// Connect, complete the handshake, and pump packets until disconnect.
///
/// Returns whether the namespace connect was acknowledged.
#[cfg(feature = "hydrate")]
async fn connect_and_run(
    url: &str,
    hub: &ChannelHub,
    outbound: &mut futures::channel::mpsc::UnboundedReceiver<String>,
) -> Result<bool, String> {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    // Handshake: outbound events stay queued until the namespace is ours.
    let mut connected = false;
    while let Some(msg) = ws_read.next().await {
        let Message::Text(text) = msg.map_err(|e| e.to_string())? else {
            continue;
        };
        match react_to_text(&text) {
            Reaction::Reply(reply) => ws_write.send(Message::Text(reply)).await.map_err(|e| e.to_string())?,
            Reaction::Connected => {
                connected = true;
                break;
            }
            Reaction::Disconnected(reason) => return Err(reason),
            Reaction::Deliver { name, .. } => log::debug!("socket: dropping {name:?} before connect"),
            Reaction::Ignore => {}
        }
    }
    if !connected {
        return Ok(false);
    }

    hub.set_status(ConnectionStatus::Connected);

    let send_task = async {
        while let Some(text) = outbound.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => match react_to_text(&text) {
                    Reaction::Reply(reply) => {
                        if hub.send_raw(reply).is_err() {
                            break;
                        }
                    }
                    Reaction::Deliver { name, data } => {
                        hub.deliver(&name, data);
                    }
                    Reaction::Disconnected(reason) => {
                        log::info!("socket: {reason}");
                        break;
                    }
                    Reaction::Connected | Reaction::Ignore => {}
                },
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    log::warn!("socket: recv error: {e}");
                    break;
                }
            }
        }
    };

    // Run both tasks; when either finishes, the connection is done.
    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    Ok(true)
}
