//! Sign-in state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Decides whether the comment block offers an input box and which display
//! name posted comments carry.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// Longest display name accepted, in characters.
pub const MAX_NAME_CHARS: usize = 40;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub name: Option<String>,
}

impl AuthState {
    #[must_use]
    pub fn logged_in(&self) -> bool {
        self.name.is_some()
    }

    /// Name to attach to posted comments; empty when signed out.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_default()
    }

    /// Sign in as `raw`, trimmed and capped at [`MAX_NAME_CHARS`].
    ///
    /// Returns `false` and leaves the state untouched when nothing remains
    /// after trimming.
    pub fn sign_in(&mut self, raw: &str) -> bool {
        let Some(name) = normalize_display_name(raw) else {
            return false;
        };
        self.name = Some(name);
        true
    }

    pub fn sign_out(&mut self) {
        self.name = None;
    }
}

/// Trim a display name and cap its length; `None` when blank.
#[must_use]
pub fn normalize_display_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_CHARS).collect::<String>().trim_end().to_owned())
}
