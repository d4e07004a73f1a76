//! Live comment block bound to the realtime channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounting the block mounts a [`CommentFeed`] on the shared [`ChannelHub`]
//! and runs it on the local executor; every state the feed publishes is
//! written into a signal the list renders. Changes to `curr_tab` are forwarded
//! through the feed handle, and dropping the handle on cleanup stops the feed,
//! which unsubscribes.

#[cfg(test)]
#[path = "comment_block_test.rs"]
mod comment_block_test;

use leptos::prelude::*;

use crate::components::comment_input::CommentInput;
use crate::components::comment_list::CommentList;
use crate::components::comment_title::CommentTitle;
use crate::feed::FeedHandle;
use crate::net::ChannelHub;
use crate::state::comments::CommentState;

/// Structural pieces of the block, in render order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockSection {
    Title,
    List,
    Input,
}

/// Sections to render; the input box only exists for signed-in users.
#[must_use]
pub fn block_sections(logged_in: bool) -> &'static [BlockSection] {
    if logged_in {
        &[BlockSection::Title, BlockSection::List, BlockSection::Input]
    } else {
        &[BlockSection::Title, BlockSection::List]
    }
}

/// Comment feed for `curr_tab` with an input box when `logged_in`.
#[component]
pub fn CommentBlock(
    #[prop(into)] curr_tab: Signal<String>,
    #[prop(into)] my_name: Signal<String>,
    #[prop(into)] logged_in: Signal<bool>,
) -> impl IntoView {
    let hub = expect_context::<ChannelHub>();
    let comments = RwSignal::new(CommentState::default());
    let handle = StoredValue::new(start_feed(hub, curr_tab.get_untracked(), comments));

    Effect::new(move || {
        let tab = curr_tab.get();
        handle.with_value(|h| {
            if let Some(h) = h {
                h.set_tab(tab);
            }
        });
    });

    on_cleanup(move || handle.set_value(None));

    view! {
        <div class="comment-block">
            {move || {
                block_sections(logged_in.get())
                    .iter()
                    .map(|section| match section {
                        BlockSection::Title => view! { <CommentTitle/> }.into_any(),
                        BlockSection::List => view! { <CommentList state=comments logged_in=logged_in/> }.into_any(),
                        BlockSection::Input => view! { <CommentInput curr_tab=curr_tab my_name=my_name/> }.into_any(),
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

/// Mount the feed and run it on the browser's local executor.
#[cfg(feature = "hydrate")]
fn start_feed(hub: ChannelHub, tab: String, comments: RwSignal<CommentState>) -> Option<FeedHandle> {
    use crate::feed::CommentFeed;

    match CommentFeed::mount(hub, tab) {
        Ok((feed, handle)) => {
            let initial = feed.initial_state();
            comments.set(initial.clone());
            leptos::task::spawn_local(async move {
                feed.run(initial, move |state| comments.set(state.clone())).await;
            });
            Some(handle)
        }
        Err(e) => {
            log::warn!("comment block: feed mount failed: {e}");
            comments.update(|s| s.record_error(format!("Could not load comments: {e}")));
            None
        }
    }
}

/// Server rendering has no socket; the feed starts after hydration.
#[cfg(not(feature = "hydrate"))]
fn start_feed(_hub: ChannelHub, _tab: String, _comments: RwSignal<CommentState>) -> Option<FeedHandle> {
    None
}
