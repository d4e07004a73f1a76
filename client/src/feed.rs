//! Comment feed reducer: the behavior behind the comment block.
//!
//! DESIGN
//! ======
//! A feed is created by [`CommentFeed::mount`], which registers one
//! subscription for `new comment` and `old comments` and asks for the current
//! tab's history. From then on two queues drive it: inbound channel items and
//! [`FeedCommand`]s sent through a [`FeedHandle`]. [`CommentFeed::run`] merges
//! them in a single-threaded loop (inbound first) and publishes the state after
//! every change; [`CommentFeed::pump`] does the same synchronously for hosts
//! without an executor.
//!
//! Tab changes only re-emit the history request. The subscription is never
//! re-registered, and the list is left alone until the reply arrives.
//! Dropping the feed unsubscribes.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use feed_events::{EventKind, OutboundEvent};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::future;
use futures::stream::{self, PollNext, StreamExt};

use crate::net::{ChannelClient, ChannelError, ConnectionStatus, Inbound, Subscription, SubscriptionId};
use crate::state::comments::CommentState;

/// Event kinds a comment feed listens to.
pub const FEED_EVENTS: [EventKind; 2] = [EventKind::NewComment, EventKind::OldComments];

/// Control messages accepted by a running feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedCommand {
    SetTab(String),
}

/// Sending side of a feed's command queue.
///
/// The feed's run loop stops once every handle has been dropped.
#[derive(Clone, Debug)]
pub struct FeedHandle {
    commands: UnboundedSender<FeedCommand>,
}

impl FeedHandle {
    /// Ask the feed to show `tab`. Returns `false` if the feed has stopped.
    pub fn set_tab(&self, tab: impl Into<String>) -> bool {
        self.commands.unbounded_send(FeedCommand::SetTab(tab.into())).is_ok()
    }
}

enum FeedInput {
    Inbound(Inbound),
    Command(FeedCommand),
    Stop,
}

/// Live binding between one comment block and the channel.
pub struct CommentFeed<C: ChannelClient> {
    client: C,
    subscription: SubscriptionId,
    inbound: Option<Subscription>,
    commands: Option<UnboundedReceiver<FeedCommand>>,
    tab: String,
    /// Transport state when the subscription was registered.
    connection: ConnectionStatus,
}

impl<C: ChannelClient> std::fmt::Debug for CommentFeed<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentFeed")
            .field("subscription", &self.subscription)
            .field("tab", &self.tab)
            .finish_non_exhaustive()
    }
}

impl<C: ChannelClient> CommentFeed<C> {
    /// Subscribe to comment events and request history for `tab`.
    ///
    /// # Errors
    ///
    /// Returns the channel error if the initial request cannot be sent; the
    /// subscription is released in that case.
    pub fn mount(client: C, tab: impl Into<String>) -> Result<(Self, FeedHandle), ChannelError> {
        let inbound = client.subscribe(&FEED_EVENTS);
        // Read after subscribing so no transition falls between the two.
        let connection = client.status();
        let (commands_tx, commands_rx) = mpsc::unbounded();
        let feed = Self {
            client,
            subscription: inbound.id(),
            inbound: Some(inbound),
            commands: Some(commands_rx),
            tab: tab.into(),
            connection,
        };

        feed.request_history()?;
        log::info!("feed: mounted on tab {:?}", feed.tab);
        Ok((feed, FeedHandle { commands: commands_tx }))
    }

    /// Tab whose history was most recently requested.
    #[must_use]
    pub fn tab(&self) -> &str {
        &self.tab
    }

    /// Empty state carrying the connection status seen at mount.
    #[must_use]
    pub fn initial_state(&self) -> CommentState {
        CommentState { connection: self.connection, ..CommentState::default() }
    }

    /// Switch to `tab`, requesting its history if it differs from the current one.
    ///
    /// Returns whether a request was sent.
    ///
    /// # Errors
    ///
    /// Returns the channel error if the request cannot be sent. The current
    /// tab is left unchanged so the same switch can be retried.
    pub fn set_tab(&mut self, tab: impl Into<String>) -> Result<bool, ChannelError> {
        let tab = tab.into();
        if tab == self.tab {
            return Ok(false);
        }
        self.client.emit(&OutboundEvent::get_comments(tab.clone()))?;
        log::debug!("feed: tab {:?} -> {tab:?}", self.tab);
        self.tab = tab;
        Ok(true)
    }

    fn request_history(&self) -> Result<(), ChannelError> {
        self.client.emit(&OutboundEvent::get_comments(self.tab.clone()))
    }

    /// Fold one inbound item into `state`.
    pub fn apply(&self, inbound: Inbound, state: &mut CommentState) {
        match inbound {
            Inbound::Event(event) => state.apply_event(event),
            Inbound::Rejected { kind, reason } => {
                log::warn!("feed: dropped malformed {kind}: {reason}");
                state.record_error(format!("Could not read {kind}: {reason}"));
            }
            Inbound::Status(status) => state.connection = status,
        }
    }

    fn command(&mut self, command: FeedCommand, state: &mut CommentState) {
        match command {
            FeedCommand::SetTab(tab) => {
                if let Err(e) = self.set_tab(tab) {
                    log::warn!("feed: history request failed: {e}");
                    state.record_error(format!("Could not load comments: {e}"));
                }
            }
        }
    }

    /// Apply every command and inbound item that is ready right now.
    ///
    /// Returns the number of items processed.
    pub fn pump(&mut self, state: &mut CommentState) -> usize {
        let mut processed = 0;
        while let Some(command) = self.commands.as_mut().and_then(|rx| rx.try_next().ok().flatten()) {
            self.command(command, state);
            processed += 1;
        }
        while let Some(inbound) = self.inbound.as_mut().and_then(Subscription::try_next) {
            self.apply(inbound, state);
            processed += 1;
        }
        processed
    }

    /// Drive the feed until every [`FeedHandle`] is dropped.
    ///
    /// `publish` sees the state after every processed input. Inbound items that are
    /// ready are always applied before pending commands. Returns the final
    /// state; the feed unsubscribes when this returns.
    pub async fn run<F>(mut self, mut state: CommentState, mut publish: F) -> CommentState
    where
        F: FnMut(&CommentState),
    {
        let (Some(inbound), Some(commands)) = (self.inbound.take(), self.commands.take()) else {
            return state;
        };

        let inbound = inbound.map(FeedInput::Inbound);
        let commands = commands
            .map(FeedInput::Command)
            .chain(stream::once(future::ready(FeedInput::Stop)));
        let mut inputs = stream::select_with_strategy(inbound, commands, |_: &mut ()| PollNext::Left);

        while let Some(input) = inputs.next().await {
            match input {
                FeedInput::Inbound(inbound) => self.apply(inbound, &mut state),
                FeedInput::Command(command) => self.command(command, &mut state),
                FeedInput::Stop => break,
            }
            publish(&state);
        }

        log::info!("feed: stopped on tab {:?}", self.tab);
        state
    }
}

impl<C: ChannelClient> Drop for CommentFeed<C> {
    fn drop(&mut self) {
        self.client.unsubscribe(self.subscription);
    }
}
