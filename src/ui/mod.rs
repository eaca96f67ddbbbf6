mod app;
mod components;
pub mod format;
mod state;

pub use app::ChatApp;
