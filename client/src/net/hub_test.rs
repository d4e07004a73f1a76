use super::*;
use feed_events::{Comment, InboundEvent, PostComment};
use futures::StreamExt;
use futures::executor::block_on;
use serde_json::json;

fn comment(text: &str) -> Comment {
    Comment { text: text.to_owned(), name: "Joe".to_owned(), time: "t".to_owned() }
}

fn drain_outbound(rx: &mut UnboundedReceiver<String>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(Some(text)) = rx.try_next() {
        out.push(text);
    }
    out
}

// =============================================================
// Fan-out
// =============================================================

#[test]
fn deliver_reaches_only_matching_subscribers() {
    let (hub, _outbound) = ChannelHub::new();
    let mut pushes = hub.subscribe(&[EventKind::NewComment]);
    let mut snapshots = hub.subscribe(&[EventKind::OldComments]);

    let delivered = hub.deliver("new comment", json!({"text": "hi", "name": "Joe", "time": "t"}));

    assert_eq!(delivered, 1);
    assert_eq!(pushes.try_next(), Some(Inbound::Event(InboundEvent::NewComment(comment("hi")))));
    assert_eq!(snapshots.try_next(), None);
}

#[test]
fn deliver_preserves_arrival_order_across_kinds() {
    let (hub, _outbound) = ChannelHub::new();
    let mut sub = hub.subscribe(&[EventKind::NewComment, EventKind::OldComments]);

    hub.deliver("old comments", json!({"comments": [{"text": "a", "name": "Joe", "time": "t"}]}));
    hub.deliver("new comment", json!({"text": "b", "name": "Joe", "time": "t"}));

    assert_eq!(sub.try_next(), Some(Inbound::Event(InboundEvent::OldComments(vec![comment("a")]))));
    assert_eq!(sub.try_next(), Some(Inbound::Event(InboundEvent::NewComment(comment("b")))));
    assert_eq!(sub.try_next(), None);
}

#[test]
fn deliver_surfaces_malformed_payload_as_rejection() {
    let (hub, _outbound) = ChannelHub::new();
    let mut sub = hub.subscribe(&[EventKind::NewComment]);

    let delivered = hub.deliver("new comment", json!({"text": 9}));

    assert_eq!(delivered, 1);
    let Some(Inbound::Rejected { kind, reason }) = sub.try_next() else {
        panic!("expected rejection");
    };
    assert_eq!(kind, EventKind::NewComment);
    assert!(reason.contains("new comment"));
}

#[test]
fn deliver_drops_unknown_events() {
    let (hub, _outbound) = ChannelHub::new();
    let mut sub = hub.subscribe(&EventKind::ALL);
    assert_eq!(hub.deliver("user login", json!({})), 0);
    assert_eq!(sub.try_next(), None);
}

#[test]
fn deliver_prunes_subscribers_whose_queue_was_dropped() {
    let (hub, _outbound) = ChannelHub::new();
    let dropped = hub.subscribe(&[EventKind::NewComment]);
    let _kept = hub.subscribe(&[EventKind::NewComment]);
    drop(dropped);

    let delivered = hub.deliver("new comment", json!({"text": "x", "name": "Joe"}));
    assert_eq!(delivered, 1);
    assert_eq!(hub.subscriber_count(), 1);
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn unsubscribe_ends_the_queue() {
    let (hub, _outbound) = ChannelHub::new();
    let mut sub = hub.subscribe(&[EventKind::NewComment]);

    hub.unsubscribe(sub.id());

    assert_eq!(hub.subscriber_count(), 0);
    assert_eq!(block_on(sub.next()), None);
}

#[test]
fn subscription_ids_are_unique() {
    let (hub, _outbound) = ChannelHub::new();
    let a = hub.subscribe(&[EventKind::NewComment]);
    let b = hub.subscribe(&[EventKind::NewComment]);
    assert_ne!(a.id(), b.id());
}

#[test]
fn close_drops_every_subscriber() {
    let (hub, _outbound) = ChannelHub::new();
    let mut a = hub.subscribe(&[EventKind::NewComment]);
    let mut b = hub.subscribe(&[EventKind::OldComments]);

    hub.close();

    assert_eq!(hub.subscriber_count(), 0);
    assert_eq!(block_on(a.next()), None);
    assert_eq!(block_on(b.next()), None);
}

#[test]
fn set_status_notifies_once_per_change() {
    let (hub, _outbound) = ChannelHub::new();
    let mut sub = hub.subscribe(&[EventKind::OldComments]);

    hub.set_status(ConnectionStatus::Connecting);
    hub.set_status(ConnectionStatus::Connecting);
    hub.set_status(ConnectionStatus::Connected);

    assert_eq!(hub.status(), ConnectionStatus::Connected);
    assert_eq!(sub.try_next(), Some(Inbound::Status(ConnectionStatus::Connecting)));
    assert_eq!(sub.try_next(), Some(Inbound::Status(ConnectionStatus::Connected)));
    assert_eq!(sub.try_next(), None);
}

#[test]
fn new_subscribers_read_current_status_instead_of_a_queued_transition() {
    let (hub, _outbound) = ChannelHub::new();
    hub.set_status(ConnectionStatus::Connected);

    let mut sub = hub.subscribe(&[EventKind::NewComment]);

    assert_eq!(hub.status(), ConnectionStatus::Connected);
    assert_eq!(sub.try_next(), None);
}

// =============================================================
// Outbound
// =============================================================

#[test]
fn emit_queues_encoded_event_packets() {
    let (hub, mut outbound) = ChannelHub::new();

    hub.emit(&OutboundEvent::get_comments("Home")).expect("emit");
    hub.emit(&OutboundEvent::PostComment(PostComment {
        text: "hello".to_owned(),
        name: "Joe".to_owned(),
        tab: "Home".to_owned(),
    }))
    .expect("emit");

    let sent = drain_outbound(&mut outbound);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], r#"42["get comments",{"tab":"Home"}]"#);
    assert_eq!(
        feed_events::decode_engine(&sent[1]).expect("packet"),
        EnginePacket::Message(feed_events::SocketPacket::Event {
            name: "new comment".to_owned(),
            data: json!({"text": "hello", "name": "Joe", "tab": "Home"}),
            ack: None,
        })
    );
}

#[test]
fn emit_fails_once_transport_is_gone() {
    let (hub, outbound) = ChannelHub::new();
    drop(outbound);
    let err = hub.emit(&OutboundEvent::get_comments("Home")).expect_err("closed");
    assert!(matches!(err, ChannelError::Closed));
}

#[test]
fn hub_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ChannelHub>();
}
