use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::common::{Chat, Message, StoreSnapshot, User};

use super::error::{StoreError, StoreResult};
use super::mock;

/// Reply owed by a peer after the local user sent a message.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReply {
    pub chat_id: String,
    pub sender: User,
}

/// Canonical chat state. Every mutation swaps in freshly built collections
/// instead of editing records in place, so published snapshots never alias.
pub struct ConversationStore {
    current_user: User,
    chats: Vec<Chat>,
    selected_chat: Option<Chat>,
    messages: Vec<Message>,
    search_query: String,
    rng: StdRng,
}

impl ConversationStore {
    pub fn new(mut rng: StdRng, now: DateTime<Utc>) -> Self {
        let current_user = mock::local_user();
        let chats = mock::seed_chats(&current_user, now, &mut rng);
        Self {
            current_user,
            chats,
            selected_chat: None,
            messages: Vec::new(),
            search_query: String::new(),
            rng,
        }
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn selected_chat(&self) -> Option<&Chat> {
        self.selected_chat.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn select_chat(&mut self, chat_id: &str, now: DateTime<Utc>) -> StoreResult<()> {
        let chat = self
            .chats
            .iter()
            .find(|chat| chat.id == chat_id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownChat(chat_id.to_string()))?;

        let peer = chat.peer().unwrap_or(&self.current_user);
        self.messages = mock::history(&chat.id, &self.current_user, peer, now);
        self.selected_chat = Some(Chat {
            unread_count: 0,
            ..chat
        });
        self.mark_chat_as_read(chat_id);
        Ok(())
    }

    /// Appends an own message to the selected chat. Returns the reply the
    /// peer owes, or `None` when nothing is selected.
    pub fn send_message(&mut self, content: String, now: DateTime<Utc>) -> Option<PendingReply> {
        let chat = self.selected_chat.as_ref()?;

        let message = Message {
            id: Uuid::now_v7().to_string(),
            chat_id: chat.id.clone(),
            sender: self.current_user.clone(),
            content: content.clone(),
            timestamp: now,
            is_read: true,
            is_own: true,
        };
        let reply = PendingReply {
            chat_id: chat.id.clone(),
            sender: chat.peer().unwrap_or(&self.current_user).clone(),
        };

        let updated = Chat {
            last_message: content,
            last_message_time: now,
            ..chat.clone()
        };

        self.messages = self
            .messages
            .iter()
            .cloned()
            .chain(std::iter::once(message))
            .collect();
        self.chats = self
            .chats
            .iter()
            .map(|existing| {
                if existing.id == updated.id {
                    updated.clone()
                } else {
                    existing.clone()
                }
            })
            .collect();
        self.selected_chat = Some(updated);

        Some(reply)
    }

    /// Appends the peer's reply to whatever thread is displayed right now.
    pub fn deliver_reply(&mut self, reply: &PendingReply, now: DateTime<Utc>) -> Message {
        let message = Message {
            id: Uuid::now_v7().to_string(),
            chat_id: reply.chat_id.clone(),
            sender: reply.sender.clone(),
            content: mock::pick_reply(&mut self.rng).to_string(),
            timestamp: now,
            is_read: false,
            is_own: reply.sender.id == self.current_user.id,
        };

        self.messages = self
            .messages
            .iter()
            .cloned()
            .chain(std::iter::once(message.clone()))
            .collect();
        message
    }

    pub fn search_chats(&mut self, query: String) {
        self.search_query = query;
    }

    /// Returns false when no chat carries `chat_id`.
    pub fn mark_chat_as_read(&mut self, chat_id: &str) -> bool {
        if !self.chats.iter().any(|chat| chat.id == chat_id) {
            return false;
        }

        self.chats = self
            .chats
            .iter()
            .map(|chat| {
                if chat.id == chat_id {
                    Chat {
                        unread_count: 0,
                        ..chat.clone()
                    }
                } else {
                    chat.clone()
                }
            })
            .collect();
        true
    }

    pub fn snapshot(&self, revision: u64) -> StoreSnapshot {
        StoreSnapshot {
            revision,
            current_user: self.current_user.clone(),
            chats: self.chats.clone(),
            selected_chat: self.selected_chat.clone(),
            messages: self.messages.clone(),
            search_query: self.search_query.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn store() -> ConversationStore {
        ConversationStore::new(StdRng::seed_from_u64(3), Utc::now())
    }

    #[test]
    fn starts_unselected_with_seeded_chats() {
        let store = store();
        assert_eq!(store.chats().len(), 5);
        assert!(store.selected_chat().is_none());
        assert!(store.messages().is_empty());
        assert_eq!(store.current_user().id, mock::LOCAL_USER_ID);
        assert_eq!(store.search_query(), "");
    }

    #[test]
    fn select_every_seeded_chat() {
        let mut store = store();
        let chats = store.chats().to_vec();

        for chat in &chats {
            store.select_chat(&chat.id, Utc::now()).unwrap();

            let expected = Chat {
                unread_count: 0,
                ..chat.clone()
            };
            assert_eq!(store.selected_chat(), Some(&expected));

            let messages = store.messages();
            assert_eq!(messages.len(), mock::HISTORY_LEN);
            assert!(messages.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
            for (index, message) in messages.iter().enumerate() {
                assert_eq!(message.chat_id, chat.id);
                assert_eq!(message.is_own, index % 2 == 0);
                assert_eq!(message.is_own, message.sender.id == store.current_user().id);
                if !message.is_own {
                    assert_eq!(Some(&message.sender), chat.peer());
                }
            }

            let listed = store.chats().iter().find(|c| c.id == chat.id).unwrap();
            assert_eq!(listed.unread_count, 0);
        }
    }

    #[test]
    fn unknown_chat_is_rejected_without_side_effects() {
        let mut store = store();
        store.select_chat("chat-2", Utc::now()).unwrap();
        let chats = store.chats().to_vec();
        let messages = store.messages().to_vec();

        let err = store.select_chat("chat-99", Utc::now()).unwrap_err();
        assert_eq!(err, StoreError::UnknownChat("chat-99".to_string()));
        assert_eq!(store.selected_chat().map(|c| c.id.as_str()), Some("chat-2"));
        assert_eq!(store.chats(), chats.as_slice());
        assert_eq!(store.messages(), messages.as_slice());
    }

    #[test]
    fn send_without_selection_is_a_no_op() {
        let mut store = store();
        assert!(store.send_message("hello".to_string(), Utc::now()).is_none());
        assert!(store.messages().is_empty());
    }

    #[test]
    fn send_appends_own_message_and_updates_preview() {
        let mut store = store();
        store.select_chat("chat-3", Utc::now()).unwrap();
        let before = store.chats().to_vec();
        let now = Utc::now();

        let reply = store.send_message("hi".to_string(), now).unwrap();
        assert_eq!(reply.chat_id, "chat-3");
        assert_eq!(reply.sender.name, "Emma Davis");

        let last = store.messages().last().unwrap();
        assert_eq!(store.messages().len(), mock::HISTORY_LEN + 1);
        assert_eq!(last.content, "hi");
        assert!(last.is_own && last.is_read);
        assert_eq!(last.timestamp, now);

        let selected = store.selected_chat().unwrap();
        assert_eq!(selected.last_message, "hi");
        assert_eq!(selected.last_message_time, now);

        for (old, new) in before.iter().zip(store.chats()) {
            assert_eq!(old.id, new.id);
            if new.id == "chat-3" {
                assert_eq!(new.last_message, "hi");
                assert_eq!(new.last_message_time, now);
                assert_eq!(new.unread_count, old.unread_count);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn store_keeps_blank_content() {
        let mut store = store();
        store.select_chat("chat-1", Utc::now()).unwrap();
        store.send_message("   ".to_string(), Utc::now()).unwrap();
        assert_eq!(store.messages().last().unwrap().content, "   ");
    }

    #[test]
    fn own_message_ids_are_unique() {
        let mut store = store();
        store.select_chat("chat-1", Utc::now()).unwrap();
        store.send_message("a".to_string(), Utc::now());
        store.send_message("b".to_string(), Utc::now());
        let messages = store.messages();
        let n = messages.len();
        assert_ne!(messages[n - 1].id, messages[n - 2].id);
    }

    #[test]
    fn reply_lands_on_the_displayed_thread() {
        let mut store = store();
        store.select_chat("chat-1", Utc::now()).unwrap();
        let reply = store.send_message("hi".to_string(), Utc::now()).unwrap();
        store.select_chat("chat-2", Utc::now()).unwrap();

        let message = store.deliver_reply(&reply, Utc::now());
        assert_eq!(store.messages().len(), mock::HISTORY_LEN + 1);
        assert_eq!(store.messages().last(), Some(&message));
        assert_eq!(message.chat_id, "chat-1");
        assert!(!message.is_own);
        assert!(!message.is_read);
        assert!(mock::REPLIES.contains(&message.content.as_str()));
    }

    #[test]
    fn mark_as_read_is_idempotent() {
        let mut store = store();
        let target = store
            .chats()
            .iter()
            .map(|chat| chat.id.clone())
            .last()
            .unwrap();

        assert!(store.mark_chat_as_read(&target));
        let once = store.chats().to_vec();
        assert!(store.mark_chat_as_read(&target));
        assert_eq!(store.chats(), once.as_slice());
        assert_eq!(store.chats().last().unwrap().unread_count, 0);
        assert!(!store.mark_chat_as_read("nope"));
    }

    #[test]
    fn search_query_is_recorded_not_applied() {
        let mut store = store();
        store.search_chats("mike".to_string());
        assert_eq!(store.search_query(), "mike");
        assert_eq!(store.chats().len(), 5);
        assert_eq!(store.snapshot(4).search_query, "mike");
        assert_eq!(store.snapshot(4).revision, 4);
    }
}
