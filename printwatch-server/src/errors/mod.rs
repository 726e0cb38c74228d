pub mod config;
pub mod watcher;

pub use config::ConfigError;
pub use watcher::WatcherError;
