use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Presence shown next to a user in the sidebar and chat header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Offline,
    Away,
}

impl PresenceStatus {
    pub fn label(self) -> &'static str {
        match self {
            PresenceStatus::Online => "online",
            PresenceStatus::Offline => "offline",
            PresenceStatus::Away => "away",
        }
    }
}

/// A chat participant. Never mutated once seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub status: PresenceStatus,
}

/// One conversation thread between the local user and its participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub participants: Vec<User>,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread_count: u32,
    pub current_user: User,
}

impl Chat {
    /// First listed peer; mock chats always carry exactly one.
    pub fn peer(&self) -> Option<&User> {
        self.participants.first()
    }
}

/// One timestamped unit of conversation content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender: User,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    pub is_own: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, status: PresenceStatus) -> User {
        User {
            id: id.to_string(),
            name: format!("User {id}"),
            avatar: format!("https://example.test/{id}.svg"),
            status,
        }
    }

    #[test]
    fn chat_serializes_with_camel_case_fields() {
        let chat = Chat {
            id: "chat-1".to_string(),
            participants: vec![user("2", PresenceStatus::Away)],
            last_message: "hello".to_string(),
            last_message_time: Utc::now(),
            unread_count: 2,
            current_user: user("1", PresenceStatus::Online),
        };

        let json = serde_json::to_value(&chat).unwrap();
        assert_eq!(json["lastMessage"], "hello");
        assert_eq!(json["unreadCount"], 2);
        assert_eq!(json["participants"][0]["status"], "away");
        assert_eq!(json["currentUser"]["id"], "1");
    }

    #[test]
    fn peer_is_first_participant() {
        let chat = Chat {
            id: "chat-9".to_string(),
            participants: vec![
                user("7", PresenceStatus::Online),
                user("8", PresenceStatus::Offline),
            ],
            last_message: String::new(),
            last_message_time: Utc::now(),
            unread_count: 0,
            current_user: user("1", PresenceStatus::Online),
        };
        assert_eq!(chat.peer().map(|u| u.id.as_str()), Some("7"));
    }

    #[test]
    fn presence_labels() {
        assert_eq!(PresenceStatus::Online.label(), "online");
        assert_eq!(PresenceStatus::Offline.label(), "offline");
        assert_eq!(PresenceStatus::Away.label(), "away");
    }
}
