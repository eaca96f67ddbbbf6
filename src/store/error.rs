use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `select_chat` was given a chat that is not in the current list.
    #[error("chat `{0}` is not in the chat list")]
    UnknownChat(String),
    /// The command queue is full; only returned by `dispatch`.
    #[error("store command queue is full")]
    Busy,
    /// A subscriber missed this many snapshots by reading too slowly.
    #[error("subscriber missed {0} snapshots")]
    Lagged(u64),
    #[error("store engine is no longer running")]
    EngineClosed,
}

pub type StoreResult<T> = Result<T, StoreError>;
