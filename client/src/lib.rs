//! # comment-feed
//!
//! Leptos + WASM live comment feed bound to a realtime Socket.IO channel.
//!
//! This crate contains the comment block components, the channel client
//! capability and its in-memory hub, the reducer that turns channel events
//! into view state, and the websocket transport that feeds the hub in the
//! browser.

pub mod app;
pub mod components;
pub mod config;
pub mod feed;
pub mod net;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
