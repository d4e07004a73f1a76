//! Comment list rendered from the block's feed state.

#[cfg(test)]
#[path = "comment_list_test.rs"]
mod comment_list_test;

use feed_events::Comment;
use leptos::prelude::*;

use crate::net::ConnectionStatus;
use crate::state::comments::CommentState;

/// Byline shown under a comment: author, plus the timestamp when present.
#[must_use]
pub fn comment_meta(comment: &Comment) -> String {
    let name = if comment.name.trim().is_empty() { "anonymous" } else { comment.name.as_str() };
    if comment.time.is_empty() {
        name.to_owned()
    } else {
        format!("{name} · {}", comment.time)
    }
}

/// Channel condition worth telling the reader about, if any.
#[must_use]
pub fn status_note(state: &CommentState) -> Option<String> {
    if let Some(error) = &state.last_error {
        return Some(error.clone());
    }
    match state.connection {
        ConnectionStatus::Connected => None,
        ConnectionStatus::Connecting => Some("Connecting...".to_owned()),
        ConnectionStatus::Disconnected => Some("Offline. Reconnecting...".to_owned()),
    }
}

#[component]
pub fn CommentList(#[prop(into)] state: Signal<CommentState>, #[prop(into)] logged_in: Signal<bool>) -> impl IntoView {
    view! {
        <div class="comment-list">
            {move || {
                status_note(&state.get()).map(|note| view! { <p class="comment-list__status">{note}</p> })
            }}
            <Show when=move || !logged_in.get()>
                <p class="comment-list__hint">"Sign in to join the conversation."</p>
            </Show>
            {move || {
                let comments = state.get().comments;
                if comments.is_empty() {
                    return view! { <div class="comment-list__empty">"No comments yet"</div> }.into_any();
                }

                comments
                    .iter()
                    .map(|comment| {
                        let meta = comment_meta(comment);
                        let text = comment.text.clone();
                        view! {
                            <div class="comment-list__item">
                                <p class="comment-list__text">{text}</p>
                                <span class="comment-list__meta">{meta}</span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
        </div>
    }
}
