//! View state for the comment block.
//!
//! DESIGN
//! ======
//! The list is transient and owned by one comment block. Snapshots replace it
//! wholesale in server order; pushes go in front of everything already shown.
//! Records have no identity, so a repeated push shows up twice.

#[cfg(test)]
#[path = "comments_test.rs"]
mod comments_test;

use feed_events::{Comment, InboundEvent};

use crate::net::ConnectionStatus;

/// Comments currently shown plus the channel conditions worth surfacing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentState {
    /// Newest push first, then the most recent snapshot in server order.
    pub comments: Vec<Comment>,
    pub connection: ConnectionStatus,
    /// Last malformed payload or emit failure, cleared by the next good event.
    pub last_error: Option<String>,
}

impl CommentState {
    /// Replace the list with a snapshot.
    pub fn replace_all(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
    }

    /// Place a pushed comment ahead of the existing list.
    pub fn prepend(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    pub fn apply_event(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::OldComments(comments) => self.replace_all(comments),
            InboundEvent::NewComment(comment) => self.prepend(comment),
        }
        self.last_error = None;
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
