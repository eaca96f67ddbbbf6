use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;

use crate::common::{Chat, StoreCommand, StoreSnapshot};

use super::error::{StoreError, StoreResult};
use super::state::{ConversationStore, PendingReply};

type Ack = oneshot::Sender<StoreResult<()>>;
type Envelope = (StoreCommand, Option<Ack>);

/// What happens to a peer reply that is still pending when the user switches
/// to another chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReplyPolicy {
    /// Reply is appended to whichever thread is displayed when the timer
    /// fires, even if it belongs to a different chat.
    Legacy,
    /// Pending replies for a chat are dropped once that chat is deselected.
    #[default]
    Scoped,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub reply_delay: Duration,
    pub reply_policy: ReplyPolicy,
    pub rng_seed: Option<u64>,
    pub select_first_chat: bool,
    pub command_capacity: usize,
    /// Snapshots a subscriber may fall behind before it starts missing them.
    pub snapshot_backlog: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_secs(1),
            reply_policy: ReplyPolicy::default(),
            rng_seed: None,
            select_first_chat: true,
            command_capacity: 100,
            snapshot_backlog: 256,
        }
    }
}

struct ScheduledReply {
    due: Instant,
    reply: PendingReply,
}

/// Owns the conversation store and serializes every command against it.
pub struct StoreEngine {
    store: ConversationStore,
    config: EngineConfig,
    command_receiver: mpsc::Receiver<Envelope>,
    snapshot_sender: watch::Sender<Arc<StoreSnapshot>>,
    /// Every published snapshot, in order, for subscribers.
    snapshot_feed: broadcast::Sender<Arc<StoreSnapshot>>,
    /// Due times only grow because the delay is fixed, so the front is next.
    pending: VecDeque<ScheduledReply>,
    revision: u64,
}

/// Seeds a store and starts its engine on the current tokio runtime.
pub fn spawn(config: EngineConfig) -> StoreHandle {
    let (engine, handle) = StoreEngine::new(config);
    tokio::spawn(engine.run());
    handle
}

impl StoreEngine {
    pub fn new(config: EngineConfig) -> (Self, StoreHandle) {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut store = ConversationStore::new(rng, Utc::now());

        if config.select_first_chat {
            if let Some(first) = store.chats().first().map(|chat| chat.id.clone()) {
                if let Err(err) = store.select_chat(&first, Utc::now()) {
                    log::warn!("Initial chat selection failed: {err}");
                }
            }
        }

        let (command_sender, command_receiver) = mpsc::channel(config.command_capacity.max(1));
        let (snapshot_sender, snapshot_receiver) = watch::channel(Arc::new(store.snapshot(0)));
        let (snapshot_feed, feed_receiver) = broadcast::channel(config.snapshot_backlog.max(1));

        let engine = Self {
            store,
            config,
            command_receiver,
            snapshot_sender,
            snapshot_feed,
            pending: VecDeque::new(),
            revision: 0,
        };
        let handle = StoreHandle {
            command_sender,
            snapshots: snapshot_receiver,
            feed: feed_receiver,
        };
        (engine, handle)
    }

    pub async fn run(mut self) {
        log::info!(
            "Store engine started for {} ({} chats, reply policy {:?}, delay {:?})",
            self.store.current_user().name,
            self.store.chats().len(),
            self.config.reply_policy,
            self.config.reply_delay
        );

        loop {
            let next_due = self.pending.front().map(|scheduled| scheduled.due);
            let deadline = next_due.unwrap_or_else(Instant::now);

            tokio::select! {
                envelope = self.command_receiver.recv() => {
                    match envelope {
                        Some((StoreCommand::Shutdown, ack)) => {
                            respond(ack, Ok(()));
                            break;
                        }
                        Some((command, ack)) => {
                            let result = self.handle_command(command);
                            respond(ack, result);
                        }
                        None => break,
                    }
                }
                _ = tokio::time::sleep_until(deadline), if next_due.is_some() => {
                    self.deliver_due_replies();
                }
            }
        }

        log::info!(
            "Store engine stopped; discarded {} pending replies",
            self.pending.len()
        );
        self.pending.clear();
    }

    fn handle_command(&mut self, command: StoreCommand) -> StoreResult<()> {
        log::debug!("Handling {}", command.name());

        match command {
            StoreCommand::SelectChat { chat_id } => {
                if let Err(err) = self.store.select_chat(&chat_id, Utc::now()) {
                    log::warn!("Rejected select_chat: {err}");
                    return Err(err);
                }
                if self.config.reply_policy == ReplyPolicy::Scoped {
                    self.cancel_replies_except(&chat_id);
                }
                self.publish();
            }
            StoreCommand::SendMessage(content) => match self.store.send_message(content, Utc::now()) {
                Some(reply) => {
                    self.pending.push_back(ScheduledReply {
                        due: Instant::now() + self.config.reply_delay,
                        reply,
                    });
                    self.publish();
                }
                None => log::debug!("send_message ignored: no chat selected"),
            },
            StoreCommand::SearchChats(query) => {
                self.store.search_chats(query);
                log::debug!("Search query now {:?}", self.store.search_query());
                self.publish();
            }
            StoreCommand::MarkChatAsRead { chat_id } => {
                if self.store.mark_chat_as_read(&chat_id) {
                    self.publish();
                } else {
                    log::debug!("mark_chat_as_read ignored: unknown chat {chat_id}");
                }
            }
            StoreCommand::Shutdown => {}
        }

        Ok(())
    }

    fn cancel_replies_except(&mut self, chat_id: &str) {
        let before = self.pending.len();
        self.pending
            .retain(|scheduled| scheduled.reply.chat_id == chat_id);
        let cancelled = before - self.pending.len();
        if cancelled > 0 {
            log::debug!("Cancelled {cancelled} pending replies on chat switch");
        }
    }

    fn deliver_due_replies(&mut self) {
        let now = Instant::now();
        while self
            .pending
            .front()
            .is_some_and(|scheduled| scheduled.due <= now)
        {
            let Some(scheduled) = self.pending.pop_front() else {
                break;
            };
            let message = self.store.deliver_reply(&scheduled.reply, Utc::now());
            log::debug!(
                "Reply from {} for {} appended to {} ({} messages)",
                message.sender.name,
                message.chat_id,
                self.store
                    .selected_chat()
                    .map(|chat| chat.id.as_str())
                    .unwrap_or("-"),
                self.store.messages().len()
            );
            self.publish();
        }
    }

    fn publish(&mut self) {
        self.revision += 1;
        let snapshot = Arc::new(self.store.snapshot(self.revision));
        self.snapshot_sender.send_replace(snapshot.clone());
        // No subscribers is fine.
        let _ = self.snapshot_feed.send(snapshot);
    }
}

fn respond(ack: Option<Ack>, result: StoreResult<()>) {
    if let Some(ack) = ack {
        // Caller may have stopped waiting.
        let _ = ack.send(result);
    }
}

/// Front door to a running engine. The engine stops once every handle is
/// dropped or `shutdown` is called.
pub struct StoreHandle {
    command_sender: mpsc::Sender<Envelope>,
    snapshots: watch::Receiver<Arc<StoreSnapshot>>,
    /// Never read; only used to open new subscriptions at the feed's tail.
    feed: broadcast::Receiver<Arc<StoreSnapshot>>,
}

impl Clone for StoreHandle {
    fn clone(&self) -> Self {
        Self {
            command_sender: self.command_sender.clone(),
            snapshots: self.snapshots.clone(),
            feed: self.feed.resubscribe(),
        }
    }
}

impl StoreHandle {
    pub async fn select_chat(&self, chat: &Chat) -> StoreResult<()> {
        self.request(StoreCommand::SelectChat {
            chat_id: chat.id.clone(),
        })
        .await
    }

    pub async fn send_message(&self, content: impl Into<String>) -> StoreResult<()> {
        self.request(StoreCommand::SendMessage(content.into())).await
    }

    pub async fn search_chats(&self, query: impl Into<String>) -> StoreResult<()> {
        self.request(StoreCommand::SearchChats(query.into())).await
    }

    pub async fn mark_chat_as_read(&self, chat_id: &str) -> StoreResult<()> {
        self.request(StoreCommand::MarkChatAsRead {
            chat_id: chat_id.to_string(),
        })
        .await
    }

    pub async fn shutdown(&self) -> StoreResult<()> {
        self.request(StoreCommand::Shutdown).await
    }

    /// Queues a command without waiting for it, for callers that cannot await
    /// (the UI frame loop). Rejections are only visible in the log.
    pub fn dispatch(&self, command: StoreCommand) -> StoreResult<()> {
        self.command_sender
            .try_send((command, None))
            .map_err(|err| match err {
                TrySendError::Full(_) => StoreError::Busy,
                TrySendError::Closed(_) => StoreError::EngineClosed,
            })
    }

    /// Latest published snapshot. Still readable after the engine stops.
    pub fn snapshot(&self) -> Arc<StoreSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Registers a new observer that receives every snapshot published from
    /// now on, in order. Dropping the subscription unregisters it.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.feed.resubscribe(),
        }
    }

    async fn request(&self, command: StoreCommand) -> StoreResult<()> {
        let (ack_sender, ack_receiver) = oneshot::channel();
        self.command_sender
            .send((command, Some(ack_sender)))
            .await
            .map_err(|_| StoreError::EngineClosed)?;
        ack_receiver.await.map_err(|_| StoreError::EngineClosed)?
    }
}

pub struct Subscription {
    receiver: broadcast::Receiver<Arc<StoreSnapshot>>,
}

impl Subscription {
    /// Waits for the next snapshot.
    ///
    /// Fails with `Lagged(n)` when `n` snapshots were overwritten before this
    /// subscriber read them; the following call resumes at the oldest one
    /// still buffered. Fails with `EngineClosed` once the engine has stopped
    /// and everything buffered has been read.
    pub async fn changed(&mut self) -> StoreResult<Arc<StoreSnapshot>> {
        match self.receiver.recv().await {
            Ok(snapshot) => Ok(snapshot),
            Err(RecvError::Lagged(missed)) => {
                log::warn!("Subscriber fell behind; {missed} snapshots skipped");
                Err(StoreError::Lagged(missed))
            }
            Err(RecvError::Closed) => Err(StoreError::EngineClosed),
        }
    }
}
