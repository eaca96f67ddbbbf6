pub mod engine;
pub mod error;
pub mod mock;
pub mod state;

pub use engine::{EngineConfig, ReplyPolicy, StoreHandle, Subscription, spawn};
pub use error::{StoreError, StoreResult};
