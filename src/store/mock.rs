//! Placeholder content standing in for a real backend: seed users, seed chats,
//! per-chat history and the canned reply pool.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

use crate::common::{Chat, Message, PresenceStatus, User};

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

pub const LOCAL_USER_ID: &str = "1";

/// Messages generated per chat selection.
pub const HISTORY_LEN: usize = 8;

pub const SAMPLE_MESSAGES: [&str; 5] = [
    "Hey! How are you doing?",
    "I was just thinking about our project",
    "Have you checked the latest updates?",
    "Let's catch up soon!",
    "That sounds great!",
];

pub const REPLIES: [&str; 6] = [
    "That's awesome! 😊",
    "Totally agree with you!",
    "Sounds good to me",
    "Let's do it!",
    "I like that idea",
    "Thanks for letting me know!",
];

const PEERS: [(&str, &str, &str, PresenceStatus); 5] = [
    ("2", "Sarah Johnson", "Sarah", PresenceStatus::Online),
    ("3", "Mike Chen", "Mike", PresenceStatus::Offline),
    ("4", "Emma Davis", "Emma", PresenceStatus::Away),
    ("5", "Alex Wilson", "Alex", PresenceStatus::Online),
    ("6", "Jessica Brown", "Jessica", PresenceStatus::Online),
];

fn make_user(id: &str, name: &str, seed: &str, status: PresenceStatus) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        avatar: format!("{AVATAR_BASE}{seed}"),
        status,
    }
}

pub fn local_user() -> User {
    make_user(LOCAL_USER_ID, "You", "You", PresenceStatus::Online)
}

pub fn peers() -> Vec<User> {
    PEERS
        .iter()
        .map(|(id, name, seed, status)| make_user(id, name, seed, *status))
        .collect()
}

/// One chat per peer, newest first: chat `i` was last active `i` hours ago.
pub fn seed_chats<R: Rng + ?Sized>(local: &User, now: DateTime<Utc>, rng: &mut R) -> Vec<Chat> {
    peers()
        .into_iter()
        .enumerate()
        .map(|(index, peer)| {
            let tail = if index > 0 { "Last message..." } else { "" };
            let last_message = format!("{} {tail}", SAMPLE_MESSAGES[0]);
            let unread_count = if index == 0 {
                0
            } else {
                rng.random_range(0..=2)
            };

            Chat {
                id: format!("chat-{}", index + 1),
                participants: vec![peer],
                last_message,
                last_message_time: now - TimeDelta::hours(index as i64),
                unread_count,
                current_user: local.clone(),
            }
        })
        .collect()
}

/// History shown when a chat is opened: alternating local/peer turns spaced
/// two minutes apart, the last one two minutes before `now`.
pub fn history(chat_id: &str, local: &User, peer: &User, now: DateTime<Utc>) -> Vec<Message> {
    (0..HISTORY_LEN)
        .map(|index| {
            let sender = if index % 2 == 0 { local } else { peer };
            let minutes_ago = 2 * (HISTORY_LEN - index) as i64;

            Message {
                id: format!("msg-{index}"),
                chat_id: chat_id.to_string(),
                sender: sender.clone(),
                content: SAMPLE_MESSAGES[index % SAMPLE_MESSAGES.len()].to_string(),
                timestamp: now - TimeDelta::minutes(minutes_ago),
                is_read: true,
                is_own: sender.id == local.id,
            }
        })
        .collect()
}

pub fn pick_reply<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    REPLIES[rng.random_range(0..REPLIES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn seeds_one_chat_per_peer_in_stable_order() {
        let local = local_user();
        let mut rng = StdRng::seed_from_u64(7);
        let chats = seed_chats(&local, Utc::now(), &mut rng);

        let ids: Vec<_> = chats.iter().map(|chat| chat.id.as_str()).collect();
        assert_eq!(ids, ["chat-1", "chat-2", "chat-3", "chat-4", "chat-5"]);
        for chat in &chats {
            assert_eq!(chat.participants.len(), 1);
            assert_eq!(chat.current_user, local);
            assert!(chat.unread_count <= 2);
        }
        assert_eq!(chats[0].unread_count, 0);
        assert_eq!(chats[0].last_message, "Hey! How are you doing? ");
        assert_eq!(chats[1].last_message, "Hey! How are you doing? Last message...");
        assert_eq!(chats[2].participants[0].name, "Emma Davis");
        assert_eq!(chats[2].participants[0].status, PresenceStatus::Away);
    }

    #[test]
    fn seeded_chats_step_back_one_hour_each() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(1);
        let chats = seed_chats(&local_user(), now, &mut rng);
        for (index, chat) in chats.iter().enumerate() {
            assert_eq!(now - chat.last_message_time, TimeDelta::hours(index as i64));
        }
    }

    #[test]
    fn history_alternates_starting_with_local_user() {
        let local = local_user();
        let peer = peers().remove(3);
        let now = Utc::now();
        let messages = history("chat-4", &local, &peer, now);

        assert_eq!(messages.len(), HISTORY_LEN);
        for (index, message) in messages.iter().enumerate() {
            let expected = if index % 2 == 0 { &local } else { &peer };
            assert_eq!(&message.sender, expected);
            assert_eq!(message.is_own, index % 2 == 0);
            assert_eq!(message.chat_id, "chat-4");
            assert_eq!(message.id, format!("msg-{index}"));
            assert!(message.is_read);
        }
        assert_eq!(messages[5].content, SAMPLE_MESSAGES[0]);
        assert_eq!(messages.last().unwrap().timestamp, now - TimeDelta::minutes(2));
        assert!(messages.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }

    #[test]
    fn replies_come_from_the_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert!(REPLIES.contains(&pick_reply(&mut rng)));
        }
    }
}
