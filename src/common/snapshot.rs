use serde::Serialize;

use super::types::{Chat, Message, User};

/// Immutable view of the whole store, published after every state change.
///
/// Each snapshot is built fresh from the previous one; observers hold it
/// behind an `Arc` and never see it change underneath them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    /// Bumped once per published snapshot.
    pub revision: u64,
    pub current_user: User,
    pub chats: Vec<Chat>,
    pub selected_chat: Option<Chat>,
    pub messages: Vec<Message>,
    pub search_query: String,
}

impl StoreSnapshot {
    pub fn chat(&self, chat_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|chat| chat.id == chat_id)
    }

    pub fn selected_chat_id(&self) -> Option<&str> {
        self.selected_chat.as_ref().map(|chat| chat.id.as_str())
    }

    /// One-line summary used by the headless demo and debug logging.
    pub fn summary(&self) -> String {
        let unread: u32 = self.chats.iter().map(|chat| chat.unread_count).sum();
        format!(
            "rev={} chats={} unread={} selected={} messages={} query={:?}",
            self.revision,
            self.chats.len(),
            unread,
            self.selected_chat_id().unwrap_or("-"),
            self.messages.len(),
            self.search_query,
        )
    }
}
