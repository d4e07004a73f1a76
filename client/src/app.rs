//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`ChannelHub`] is created per page and shared through context; in the
//! browser the websocket transport is spawned against it. Every comment block
//! rendered below subscribes to that hub.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::hooks::use_params_map;
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::comment_block::CommentBlock;
use crate::components::sign_in::SignIn;
use crate::config::FeedConfig;
use crate::net::ChannelHub;
use crate::state::auth::AuthState;
use crate::util::storage::load_auth;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = FeedConfig::default();
    let (hub, outbound) = ChannelHub::new();

    #[cfg(feature = "hydrate")]
    crate::net::socket_client::spawn_socket_client(hub.clone(), outbound, config.clone());
    #[cfg(not(feature = "hydrate"))]
    drop(outbound);

    provide_context(hub);
    provide_context(config);
    provide_context(RwSignal::new(load_auth()));

    view! {
        <Stylesheet id="leptos" href="/pkg/comment-feed.css"/>
        <Title text="Comments"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=FeedPage/>
                <Route path=(StaticSegment("tab"), ParamSegment("tab")) view=FeedPage/>
            </Routes>
        </Router>
    }
}

/// Page hosting the sign-in bar and the comment block for the routed tab.
#[component]
fn FeedPage() -> impl IntoView {
    let config = expect_context::<FeedConfig>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();

    let default_tab = config.default_tab;
    let curr_tab = Signal::derive(move || params.read().get("tab").unwrap_or_else(|| default_tab.clone()));
    let my_name = Signal::derive(move || auth.get().display_name());
    let logged_in = Signal::derive(move || auth.get().logged_in());

    view! {
        <div class="feed-page">
            <SignIn/>
            <CommentBlock curr_tab=curr_tab my_name=my_name logged_in=logged_in/>
        </div>
    }
}
