//! Headless run: drives the engine through a short scripted session and logs
//! every snapshot it publishes.

use std::time::Duration;

use crate::store::{StoreError, StoreHandle, StoreResult, Subscription};

/// Slack added on top of the reply delay before moving to the next chat.
const REPLY_SLACK: Duration = Duration::from_millis(100);

pub async fn run(store: StoreHandle, messages: usize, reply_delay: Duration) -> StoreResult<()> {
    let subscription = store.subscribe();
    let watcher = tokio::spawn(log_snapshots(subscription));

    let chats = store.snapshot().chats.clone();
    for chat in chats.iter().take(2) {
        store.select_chat(chat).await?;
        for index in 1..=messages {
            store.send_message(format!("Demo message {index}")).await?;
        }
        tokio::time::sleep(reply_delay + REPLY_SLACK).await;
    }

    store.search_chats("son").await?;
    if let Some(last) = chats.last() {
        store.mark_chat_as_read(&last.id).await?;
        if let Some(chat) = store.snapshot().chat(&last.id) {
            log::info!("{} now has {} unread", chat.id, chat.unread_count);
        }
    }

    if let Some(first) = chats.first() {
        let mut stranger = first.clone();
        stranger.id = "chat-unknown".to_string();
        if let Err(err) = store.select_chat(&stranger).await {
            log::warn!("Rejected as expected: {err}");
        }
    }

    match serde_json::to_string_pretty(&*store.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize final snapshot: {err}"),
    }

    store.shutdown().await?;
    match watcher.await {
        Ok(seen) => log::info!("Demo finished after {seen} snapshots"),
        Err(err) => log::warn!("Snapshot watcher failed: {err}"),
    }
    Ok(())
}

async fn log_snapshots(mut subscription: Subscription) -> usize {
    let mut seen = 0usize;
    loop {
        match subscription.changed().await {
            Ok(snapshot) => {
                seen += 1;
                log::info!("{}", snapshot.summary());
            }
            Err(StoreError::Lagged(missed)) => {
                log::warn!("Demo log skipped {missed} snapshots");
            }
            Err(_) => break,
        }
    }
    seen
}
