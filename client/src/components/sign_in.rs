//! Display-name sign-in bar.
//!
//! Signing in only records a name in this browser. It decides whether the
//! comment block offers an input box and what name posts carry.

use leptos::prelude::*;

use crate::state::auth::{AuthState, MAX_NAME_CHARS};
use crate::util::storage::save_auth;

#[component]
pub fn SignIn() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let draft = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut next = auth.get_untracked();
        if !next.sign_in(&draft.get()) {
            info.set("Enter a display name first.".to_owned());
            return;
        }
        save_auth(&next);
        log::info!("sign in: signed in as {:?}", next.display_name());
        auth.set(next);
        draft.set(String::new());
        info.set(String::new());
    };

    let on_sign_out = move |_| {
        auth.update(AuthState::sign_out);
        save_auth(&auth.get_untracked());
    };

    view! {
        <div class="sign-in">
            <Show
                when=move || auth.get().logged_in()
                fallback=move || {
                    view! {
                        <form class="sign-in__form" on:submit=on_submit>
                            <input
                                class="sign-in__input"
                                type="text"
                                maxlength=MAX_NAME_CHARS.to_string()
                                placeholder="Display name"
                                prop:value=move || draft.get()
                                on:input=move |ev| draft.set(event_target_value(&ev))
                            />
                            <button class="btn btn--primary sign-in__button" type="submit">
                                "Sign In"
                            </button>
                            <Show when=move || !info.get().is_empty()>
                                <p class="sign-in__message">{move || info.get()}</p>
                            </Show>
                        </form>
                    }
                }
            >
                <span class="sign-in__name">{move || format!("Signed in as {}", auth.get().display_name())}</span>
                <button class="btn sign-in__button" on:click=on_sign_out>
                    "Sign Out"
                </button>
            </Show>
        </div>
    }
}
