pub mod commands;
pub mod snapshot;
pub mod types;

pub use commands::StoreCommand;
pub use snapshot::StoreSnapshot;
pub use types::{Chat, Message, PresenceStatus, User};
