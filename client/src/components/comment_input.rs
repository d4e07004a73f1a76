//! Text box that posts a new comment to the channel.
//!
//! The input never touches the list. A posted comment shows up only when the
//! server broadcasts it back as a `new comment` push.

#[cfg(test)]
#[path = "comment_input_test.rs"]
mod comment_input_test;

use feed_events::{OutboundEvent, PostComment};
use leptos::prelude::*;

use crate::net::{ChannelClient, ChannelHub};

/// Build the post for `text`, or `None` when there is nothing to send.
#[must_use]
pub fn build_post(text: &str, name: &str, tab: &str) -> Option<PostComment> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(PostComment { text: text.to_owned(), name: name.to_owned(), tab: tab.to_owned() })
}

#[component]
pub fn CommentInput(#[prop(into)] curr_tab: Signal<String>, #[prop(into)] my_name: Signal<String>) -> impl IntoView {
    let hub = StoredValue::new(expect_context::<ChannelHub>());
    let input = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let do_send = move || {
        let Some(post) = build_post(&input.get(), &my_name.get(), &curr_tab.get()) else {
            return;
        };
        match hub.with_value(|h| h.emit(&OutboundEvent::PostComment(post))) {
            Ok(()) => {
                input.set(String::new());
                error.set(None);
            }
            Err(e) => {
                log::warn!("comment input: post failed: {e}");
                error.set(Some(format!("Could not post comment: {e}")));
            }
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let can_send = move || !input.get().trim().is_empty();

    view! {
        <div class="comment-input">
            <textarea
                class="comment-input__text"
                rows="2"
                placeholder=move || format!("Comment as {}...", my_name.get())
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=on_keydown
            ></textarea>
            <button class="btn btn--primary comment-input__send" on:click=move |_| do_send() disabled=move || !can_send()>
                "Post"
            </button>
            <Show when=move || error.get().is_some()>
                <p class="comment-input__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
