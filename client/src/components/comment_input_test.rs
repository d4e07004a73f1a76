use super::*;

#[test]
fn post_carries_trimmed_text_with_author_and_tab() {
    let post = build_post("  nice work \n", "Ann", "Home").expect("post");
    assert_eq!(post, PostComment { text: "nice work".to_owned(), name: "Ann".to_owned(), tab: "Home".to_owned() });
}

#[test]
fn blank_text_is_not_posted() {
    assert_eq!(build_post("", "Ann", "Home"), None);
    assert_eq!(build_post(" \n\t", "Ann", "Home"), None);
}

#[test]
fn posted_comment_goes_out_as_new_comment_event() {
    let (hub, mut outbound) = ChannelHub::new();
    let post = build_post("hi", "Ann", "Home").expect("post");

    hub.emit(&OutboundEvent::PostComment(post)).expect("emit");

    let sent = outbound.try_next().expect("queued").expect("open");
    assert!(sent.starts_with(r#"42["new comment","#));
}
