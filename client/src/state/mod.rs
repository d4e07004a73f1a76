//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `comments`) so components can depend on
//! small focused models. Both are plain structs wrapped in `RwSignal` by the
//! components that own them.

pub mod auth;
pub mod comments;
