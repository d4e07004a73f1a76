//! Heading shown above the comment list.

use leptos::prelude::*;

#[component]
pub fn CommentTitle() -> impl IntoView {
    view! {
        <div class="comment-title">
            <h2 class="comment-title__text">"Comments"</h2>
        </div>
    }
}
