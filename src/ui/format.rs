//! Display helpers shared by the sidebar, header and message list.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use eframe::egui::Color32;

use crate::common::{Chat, Message, PresenceStatus, User};

/// Gap after which consecutive messages from one sender start a new group.
const GROUP_GAP_MINUTES: i64 = 5;

pub fn status_color(status: PresenceStatus) -> Color32 {
    match status {
        PresenceStatus::Online => Color32::from_rgb(0x31, 0xa2, 0x4c),
        PresenceStatus::Away => Color32::from_rgb(0xf3, 0x9c, 0x12),
        PresenceStatus::Offline => Color32::from_rgb(0x95, 0xa5, 0xa6),
    }
}

/// `HH:MM` in the local timezone.
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    format_time_in(timestamp, &Local)
}

pub fn format_time_in<Tz: TimeZone>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format("%H:%M").to_string()
}

/// Whether `message` opens a new visual group after `previous`.
pub fn starts_group(message: &Message, previous: Option<&Message>) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    message.sender.id != previous.sender.id
        || message.timestamp - previous.timestamp > TimeDelta::minutes(GROUP_GAP_MINUTES)
}

/// Sidebar filter: case-insensitive substring match on the peer's name.
/// A blank query keeps every chat; otherwise the query is matched as typed,
/// surrounding whitespace included.
pub fn filter_chats<'a>(chats: &'a [Chat], query: &str) -> Vec<&'a Chat> {
    if query.trim().is_empty() {
        return chats.iter().collect();
    }

    let needle = query.to_lowercase();
    chats
        .iter()
        .filter(|chat| {
            chat.peer()
                .is_some_and(|peer| peer.name.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn initial(user: &User) -> String {
    user.name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}
