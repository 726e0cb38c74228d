mod protocol;
mod watcher_service;

pub use protocol::*;
pub use watcher_service::*;
