use super::*;
use serde_json::json;

fn comment(text: &str, name: &str, time: &str) -> Comment {
    Comment { text: text.to_owned(), name: name.to_owned(), time: time.to_owned() }
}

// =============================================================
// EventKind
// =============================================================

#[test]
fn event_kind_names_match_wire_contract() {
    assert_eq!(EventKind::GetComments.name(), "get comments");
    assert_eq!(EventKind::OldComments.name(), "old comments");
    assert_eq!(EventKind::NewComment.name(), "new comment");
}

#[test]
fn event_kind_from_name_is_exact() {
    for kind in EventKind::ALL {
        assert_eq!(EventKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(EventKind::from_name("New Comment"), None);
    assert_eq!(EventKind::from_name("new_comment"), None);
}

// =============================================================
// decode_inbound
// =============================================================

#[test]
fn decode_old_comments_preserves_server_order() {
    let data = json!({
        "comments": [
            {"text": "first", "name": "Ann", "time": "2020-11-01 10:00"},
            {"text": "second", "name": "Bob", "time": "2020-11-01 09:00"}
        ]
    });
    let event = decode_inbound("old comments", data).expect("snapshot");
    assert_eq!(
        event,
        InboundEvent::OldComments(vec![
            comment("first", "Ann", "2020-11-01 10:00"),
            comment("second", "Bob", "2020-11-01 09:00"),
        ])
    );
}

#[test]
fn decode_new_comment_ignores_extra_fields() {
    let data = json!({"text": "hey", "name": "Joe", "time": "now", "tab": "Sports"});
    let event = decode_inbound("new comment", data).expect("push");
    assert_eq!(event, InboundEvent::NewComment(comment("hey", "Joe", "now")));
    assert_eq!(event.kind(), EventKind::NewComment);
}

#[test]
fn decode_new_comment_normalizes_time() {
    let numeric = decode_inbound("new comment", json!({"text": "a", "name": "b", "time": 1_604_224_800})).expect("numeric");
    assert_eq!(numeric, InboundEvent::NewComment(comment("a", "b", "1604224800")));

    let missing = decode_inbound("new comment", json!({"text": "a", "name": "b"})).expect("missing time");
    assert_eq!(missing, InboundEvent::NewComment(comment("a", "b", "")));

    let null = decode_inbound("new comment", json!({"text": "a", "name": "b", "time": null})).expect("null time");
    assert_eq!(null, InboundEvent::NewComment(comment("a", "b", "")));
}

#[test]
fn decode_rejects_malformed_payload_with_event_name() {
    let err = decode_inbound("new comment", json!({"text": 9, "name": "Joe"})).expect_err("bad text");
    assert!(matches!(err, CodecError::Payload { ref event, .. } if event == "new comment"));

    let err = decode_inbound("old comments", json!({"t": []})).expect_err("missing comments");
    assert!(matches!(err, CodecError::Payload { ref event, .. } if event == "old comments"));

    let err = decode_inbound("new comment", json!({"text": "a", "name": "b", "time": [1]})).expect_err("bad time");
    assert!(matches!(err, CodecError::Payload { .. }));
}

#[test]
fn decode_rejects_outbound_and_unknown_names() {
    assert!(matches!(decode_inbound("get comments", json!({"tab": "Home"})), Err(CodecError::UnknownEvent(_))));
    assert!(matches!(decode_inbound("user login", json!({})), Err(CodecError::UnknownEvent(_))));
}

// =============================================================
// OutboundEvent
// =============================================================

#[test]
fn get_comments_packet_carries_tab() {
    let packet = OutboundEvent::get_comments("Home").to_packet().expect("packet");
    assert_eq!(
        packet,
        SocketPacket::Event { name: "get comments".to_owned(), data: json!({"tab": "Home"}), ack: None }
    );
}

#[test]
fn post_comment_is_emitted_under_new_comment() {
    let event = OutboundEvent::PostComment(PostComment {
        text: "Hello, I'm Joe".to_owned(),
        name: "Joe".to_owned(),
        tab: "Home".to_owned(),
    });
    assert_eq!(event.kind(), EventKind::NewComment);
    assert_eq!(
        event.payload().expect("payload"),
        json!({"text": "Hello, I'm Joe", "name": "Joe", "tab": "Home"})
    );
}
