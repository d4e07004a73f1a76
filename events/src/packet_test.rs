use super::*;
use serde_json::json;

#[test]
fn decode_open_parses_handshake() {
    let packet = decode_engine(r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#)
        .expect("open packet");
    let EnginePacket::Open(handshake) = packet else {
        panic!("expected open packet");
    };
    assert_eq!(handshake.sid, "abc");
    assert_eq!(handshake.ping_interval, 25000);
    assert_eq!(handshake.ping_timeout, 20000);
    assert_eq!(handshake.max_payload, 1_000_000);
}

#[test]
fn decode_heartbeats_keep_their_body() {
    assert_eq!(decode_engine("2").expect("ping"), EnginePacket::Ping(String::new()));
    assert_eq!(decode_engine("2probe").expect("ping"), EnginePacket::Ping("probe".to_owned()));
    assert_eq!(decode_engine("3").expect("pong"), EnginePacket::Pong(String::new()));
}

#[test]
fn decode_event_takes_name_and_first_argument() {
    let packet = decode_engine(r#"42["new comment",{"text":"hi","name":"Joe","time":"t"}]"#).expect("event");
    assert_eq!(
        packet,
        EnginePacket::Message(SocketPacket::Event {
            name: "new comment".to_owned(),
            data: json!({"text":"hi","name":"Joe","time":"t"}),
            ack: None,
        })
    );
}

#[test]
fn decode_event_without_payload_uses_null() {
    let packet = decode_engine(r#"42["old comments"]"#).expect("event");
    let EnginePacket::Message(SocketPacket::Event { data, .. }) = packet else {
        panic!("expected event");
    };
    assert_eq!(data, serde_json::Value::Null);
}

#[test]
fn decode_event_skips_namespace_and_reads_ack_id() {
    let packet = decode_engine(r#"42/chat,17["get comments",{"tab":"Home"}]"#).expect("event");
    let EnginePacket::Message(SocketPacket::Event { name, ack, .. }) = packet else {
        panic!("expected event");
    };
    assert_eq!(name, "get comments");
    assert_eq!(ack, Some(17));
}

#[test]
fn decode_connect_ack_with_and_without_body() {
    assert_eq!(decode_engine("40").expect("connect"), EnginePacket::Message(SocketPacket::Connect(None)));
    assert_eq!(
        decode_engine(r#"40{"sid":"xyz"}"#).expect("connect"),
        EnginePacket::Message(SocketPacket::Connect(Some(json!({"sid":"xyz"}))))
    );
}

#[test]
fn decode_connect_error_carries_message() {
    let packet = decode_engine(r#"44{"message":"Not authorized"}"#).expect("connect error");
    assert_eq!(packet, EnginePacket::Message(SocketPacket::ConnectError(json!({"message":"Not authorized"}))));
}

#[test]
fn decode_rejects_bad_input() {
    assert!(matches!(decode_engine(""), Err(CodecError::Empty)));
    assert!(matches!(decode_engine("9"), Err(CodecError::UnknownEngineType('9'))));
    assert!(matches!(decode_engine("4"), Err(CodecError::Empty)));
    assert!(matches!(decode_engine("47"), Err(CodecError::UnknownSocketType('7'))));
    assert!(matches!(decode_engine(r#"451-["x",{}]"#), Err(CodecError::Unsupported(_))));
    assert!(matches!(decode_engine("42[1,2]"), Err(CodecError::MissingEventName)));
    assert!(matches!(decode_engine("42{}"), Err(CodecError::MissingEventName)));
    assert!(matches!(decode_engine("42[oops"), Err(CodecError::Json(_))));
}

#[test]
fn encode_event_matches_socket_io_text_format() {
    let packet = EnginePacket::Message(SocketPacket::Event {
        name: "get comments".to_owned(),
        data: json!({"tab":"Home"}),
        ack: None,
    });
    assert_eq!(encode_engine(&packet), r#"42["get comments",{"tab":"Home"}]"#);
}

#[test]
fn encode_control_packets() {
    assert_eq!(encode_engine(&EnginePacket::Message(SocketPacket::Connect(None))), "40");
    assert_eq!(encode_engine(&EnginePacket::Pong(String::new())), "3");
    assert_eq!(encode_engine(&EnginePacket::Pong("probe".to_owned())), "3probe");
    assert_eq!(encode_engine(&EnginePacket::Close), "1");
    assert_eq!(encode_engine(&EnginePacket::Message(SocketPacket::Disconnect)), "41");
}

#[test]
fn encode_ack_places_id_before_args() {
    let packet = EnginePacket::Message(SocketPacket::Ack { id: 5, args: vec![json!("ok")] });
    assert_eq!(encode_engine(&packet), r#"435["ok"]"#);
}
