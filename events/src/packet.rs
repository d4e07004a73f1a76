//! Engine.IO v4 / Socket.IO v5 text packet codec.
//!
//! WIRE FORMAT
//! ===========
//! Every websocket text frame is one Engine.IO packet: a single type digit
//! followed by its body. Message packets (`4`) wrap a Socket.IO packet, which
//! is again a type digit, an optional `/namespace,` prefix, an optional ack id,
//! and a JSON body. Only the default namespace is spoken; a namespace prefix
//! on inbound packets is skipped. Binary attachments are not supported.

#[cfg(test)]
#[path = "packet_test.rs"]
mod packet_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CodecError;

/// Body of the Engine.IO open packet sent by the server on connect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    /// Engine.IO session id.
    pub sid: String,
    /// Transports the server offers to upgrade to.
    #[serde(default)]
    pub upgrades: Vec<String>,
    /// Milliseconds between server pings.
    pub ping_interval: u64,
    /// Milliseconds the server waits for a pong.
    pub ping_timeout: u64,
    /// Largest payload the server accepts, in bytes.
    #[serde(default)]
    pub max_payload: u64,
}

/// One Engine.IO packet.
#[derive(Clone, Debug, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    /// Heartbeat from the server; the body is echoed back in the pong.
    Ping(String),
    Pong(String),
    Message(SocketPacket),
    Upgrade,
    Noop,
}

/// One Socket.IO packet carried inside an Engine.IO message.
#[derive(Clone, Debug, PartialEq)]
pub enum SocketPacket {
    /// Namespace connect request (client) or acknowledgement (server).
    Connect(Option<Value>),
    Disconnect,
    /// Named event with its first argument as payload.
    Event { name: String, data: Value, ack: Option<u64> },
    Ack { id: u64, args: Vec<Value> },
    ConnectError(Value),
}

/// Decode one websocket text frame.
///
/// # Errors
///
/// Returns a [`CodecError`] describing the first malformed section.
pub fn decode_engine(text: &str) -> Result<EnginePacket, CodecError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(CodecError::Empty)?;
    let body = chars.as_str();
    match kind {
        '0' => Ok(EnginePacket::Open(serde_json::from_str(body)?)),
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping(body.to_owned())),
        '3' => Ok(EnginePacket::Pong(body.to_owned())),
        '4' => decode_socket(body).map(EnginePacket::Message),
        '5' => Ok(EnginePacket::Upgrade),
        '6' => Ok(EnginePacket::Noop),
        other => Err(CodecError::UnknownEngineType(other)),
    }
}

/// Encode one Engine.IO packet as a websocket text frame.
#[must_use]
pub fn encode_engine(packet: &EnginePacket) -> String {
    match packet {
        // Serializing a struct of strings and integers cannot fail.
        EnginePacket::Open(handshake) => format!("0{}", serde_json::to_string(handshake).unwrap_or_default()),
        EnginePacket::Close => "1".to_owned(),
        EnginePacket::Ping(body) => format!("2{body}"),
        EnginePacket::Pong(body) => format!("3{body}"),
        EnginePacket::Message(socket) => format!("4{}", encode_socket(socket)),
        EnginePacket::Upgrade => "5".to_owned(),
        EnginePacket::Noop => "6".to_owned(),
    }
}

fn encode_socket(packet: &SocketPacket) -> String {
    match packet {
        SocketPacket::Connect(None) => "0".to_owned(),
        SocketPacket::Connect(Some(auth)) => format!("0{auth}"),
        SocketPacket::Disconnect => "1".to_owned(),
        SocketPacket::Event { name, data, ack } => {
            let args = Value::Array(vec![Value::String(name.clone()), data.clone()]);
            match ack {
                Some(id) => format!("2{id}{args}"),
                None => format!("2{args}"),
            }
        }
        SocketPacket::Ack { id, args } => format!("3{id}{}", Value::Array(args.clone())),
        SocketPacket::ConnectError(data) => format!("4{data}"),
    }
}

fn decode_socket(text: &str) -> Result<SocketPacket, CodecError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(CodecError::Empty)?;
    let (ack, body) = split_ack_id(skip_namespace(chars.as_str()));
    match kind {
        '0' => Ok(SocketPacket::Connect(parse_optional(body)?)),
        '1' => Ok(SocketPacket::Disconnect),
        '2' => {
            let (name, data) = event_parts(parse_args(body)?)?;
            Ok(SocketPacket::Event { name, data, ack })
        }
        '3' => {
            let id = ack.ok_or(CodecError::Unsupported("ack without id"))?;
            Ok(SocketPacket::Ack { id, args: parse_args(body)? })
        }
        '4' => Ok(SocketPacket::ConnectError(parse_optional(body)?.unwrap_or(Value::Null))),
        '5' | '6' => Err(CodecError::Unsupported("binary packets")),
        other => Err(CodecError::UnknownSocketType(other)),
    }
}

fn skip_namespace(text: &str) -> &str {
    if !text.starts_with('/') {
        return text;
    }
    text.find(',').map_or("", |i| &text[i + 1..])
}

fn split_ack_id(text: &str) -> (Option<u64>, &str) {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return (None, text);
    }
    (text[..digits].parse().ok(), &text[digits..])
}

fn parse_optional(body: &str) -> Result<Option<Value>, CodecError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}

fn parse_args(body: &str) -> Result<Vec<Value>, CodecError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(args) => Ok(args),
        _ => Err(CodecError::MissingEventName),
    }
}

fn event_parts(args: Vec<Value>) -> Result<(String, Value), CodecError> {
    let mut args = args.into_iter();
    let Some(Value::String(name)) = args.next() else {
        return Err(CodecError::MissingEventName);
    };
    Ok((name, args.next().unwrap_or(Value::Null)))
}
