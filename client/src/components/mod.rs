//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `comment_block` owns the feed and its state; the title, list, and input
//! are presentational children that only render what they are given.

pub mod comment_block;
pub mod comment_input;
pub mod comment_list;
pub mod comment_title;
pub mod sign_in;
