//! Shared event model and packet codec for the comment feed channel.
//!
//! This crate owns the wire representation spoken between the comment feed
//! and its realtime server. Event names and payload shapes are fixed by the
//! server contract; the transport framing is Engine.IO v4 carrying
//! Socket.IO v5 text packets (see [`packet`]).

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

pub mod packet;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use packet::{EnginePacket, Handshake, SocketPacket, decode_engine, encode_engine};

/// Error returned by the event and packet decoders.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text frame was empty.
    #[error("empty packet")]
    Empty,
    /// The leading Engine.IO type digit is not a known packet type.
    #[error("unknown engine packet type: {0:?}")]
    UnknownEngineType(char),
    /// The Socket.IO type digit inside a message packet is not a known type.
    #[error("unknown socket packet type: {0:?}")]
    UnknownSocketType(char),
    /// The packet is well-formed but uses a feature this client does not speak.
    #[error("unsupported packet: {0}")]
    Unsupported(&'static str),
    /// A JSON section of the packet failed to parse.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    /// An EVENT packet carried an empty argument list or a non-string name.
    #[error("event packet is missing a name")]
    MissingEventName,
    /// The event name is not part of the comment feed contract.
    #[error("unknown event: {0}")]
    UnknownEvent(String),
    /// A known event arrived with a payload that does not match its shape.
    #[error("malformed `{event}` payload: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Named events on the comment channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Outbound request for a tab's comment history.
    GetComments,
    /// Inbound full snapshot reply.
    OldComments,
    /// Inbound single-comment push; also the outbound name for posting.
    NewComment,
}

impl EventKind {
    /// Every event kind, in wire-table order.
    pub const ALL: [Self; 3] = [Self::GetComments, Self::OldComments, Self::NewComment];

    /// Exact event name used on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetComments => "get comments",
            Self::OldComments => "old comments",
            Self::NewComment => "new comment",
        }
    }

    /// Look up an event kind by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single comment as broadcast by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment body.
    pub text: String,
    /// Display name of the author.
    pub name: String,
    /// Server timestamp, normalized to text.
    #[serde(default, deserialize_with = "deserialize_time")]
    pub time: String,
}

/// Payload of the outbound `"get comments"` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetComments {
    pub tab: String,
}

/// Payload of the inbound `"old comments"` snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldComments {
    pub comments: Vec<Comment>,
}

/// Payload the input box emits under `"new comment"`.
///
/// The server stamps `time` and rebroadcasts it to every client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostComment {
    pub text: String,
    pub name: String,
    pub tab: String,
}

/// Events the feed consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    /// Wholesale replacement of the comment list.
    OldComments(Vec<Comment>),
    /// One comment to place ahead of everything already shown.
    NewComment(Comment),
}

impl InboundEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::OldComments(_) => EventKind::OldComments,
            Self::NewComment(_) => EventKind::NewComment,
        }
    }
}

/// Events the feed produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutboundEvent {
    GetComments(GetComments),
    PostComment(PostComment),
}

impl OutboundEvent {
    /// Build a history request for `tab`.
    pub fn get_comments(tab: impl Into<String>) -> Self {
        Self::GetComments(GetComments { tab: tab.into() })
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::GetComments(_) => EventKind::GetComments,
            Self::PostComment(_) => EventKind::NewComment,
        }
    }

    /// JSON payload for this event.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if the payload cannot be serialized.
    pub fn payload(&self) -> Result<Value, CodecError> {
        let value = match self {
            Self::GetComments(p) => serde_json::to_value(p)?,
            Self::PostComment(p) => serde_json::to_value(p)?,
        };
        Ok(value)
    }

    /// Wrap this event in a Socket.IO EVENT packet on the default namespace.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if the payload cannot be serialized.
    pub fn to_packet(&self) -> Result<SocketPacket, CodecError> {
        Ok(SocketPacket::Event { name: self.kind().name().to_owned(), data: self.payload()?, ack: None })
    }
}

/// Decode an inbound event from its wire name and JSON payload.
///
/// # Errors
///
/// Returns [`CodecError::UnknownEvent`] for names the feed does not consume
/// and [`CodecError::Payload`] when the payload does not match the event.
pub fn decode_inbound(name: &str, data: Value) -> Result<InboundEvent, CodecError> {
    let payload_err = |source| CodecError::Payload { event: name.to_owned(), source };
    match EventKind::from_name(name) {
        Some(EventKind::OldComments) => {
            let snapshot: OldComments = serde_json::from_value(data).map_err(payload_err)?;
            Ok(InboundEvent::OldComments(snapshot.comments))
        }
        Some(EventKind::NewComment) => {
            let comment: Comment = serde_json::from_value(data).map_err(payload_err)?;
            Ok(InboundEvent::NewComment(comment))
        }
        Some(EventKind::GetComments) | None => Err(CodecError::UnknownEvent(name.to_owned())),
    }
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected time string or number, got {other}"))),
    }
}
