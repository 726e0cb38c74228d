use std::io;

/// Transport-level failures of the printer session. Both variants are fatal:
/// the design deliberately carries no reconnect loop, so the binary reports
/// the error and exits.
#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("failed to connect to printer at {addr}: {source}")]
    Connect { addr: String, source: io::Error },

    #[error("printer transport error: {0}")]
    Transport(#[from] io::Error),
}
