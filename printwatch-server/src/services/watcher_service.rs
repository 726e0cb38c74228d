use std::future;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::RwLock;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::configs::Printer;
use crate::errors::WatcherError;
use crate::models::PrinterStatus;
use crate::services::{CommandScheduler, FrameBuffer, PollCommand, parse_response};

/// Shared snapshot of the printer's last-known state. The watcher is the
/// only writer; HTTP handlers clone the record under the read lock, so a
/// response never observes a half-applied merge.
pub type SharedStatus = Arc<RwLock<PrinterStatus>>;

/// How long a poll command may go unanswered before a warning is logged.
const RESPONSE_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Disconnected,
    Connecting,
    Connected,
    Closed,
}

/// The most recently sent command and its watchdog deadline. The protocol
/// carries no command ids, so the next complete frame is attributed to this
/// command by send order alone.
struct Pending {
    command: PollCommand,
    deadline: Instant,
}

/// Owns the printer TCP session: sends the round-robin status queries on a
/// fixed cadence, frames and parses the responses, and merges the reported
/// fields into the shared status record.
///
/// All session events (poll ticks, inbound data, watchdog expiry) run on one
/// `select!` loop, so merges are serialized by construction. Transport
/// errors are fatal; there is deliberately no reconnect loop.
pub struct PrinterWatcher {
    printer: Printer,
    silent: bool,
    status: SharedStatus,
    state: SessionState,
}

impl PrinterWatcher {
    pub fn new(printer: Printer, silent: bool, status: SharedStatus) -> Self {
        Self {
            printer,
            silent,
            status,
            state: SessionState::Disconnected,
        }
    }

    pub async fn run(mut self) -> Result<(), WatcherError> {
        let addr = format!("{}:{}", self.printer.host, self.printer.port);

        self.transition(SessionState::Connecting);
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| WatcherError::Connect {
                addr: addr.clone(),
                source,
            })?;
        self.transition(SessionState::Connected);

        if !self.silent {
            tracing::info!("connected to printer at {addr}");
        }

        let (mut reader, mut writer) = stream.into_split();

        let mut poll = time::interval(Duration::from_millis(self.printer.poll_interval_ms));
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut scheduler = CommandScheduler::default();
        let mut frames = FrameBuffer::default();
        let mut pending: Option<Pending> = None;
        let mut buf = [0u8; 1024];

        loop {
            tokio::select! {
                _ = poll.tick() => {
                    let command = scheduler.next();
                    if !self.silent {
                        tracing::info!(command = command.name(), "sending poll command");
                    }
                    writer.write_all(command.wire().as_bytes()).await?;
                    // Rearming replaces any still-armed watchdog.
                    pending = Some(Pending {
                        command,
                        deadline: Instant::now() + RESPONSE_TIMEOUT,
                    });
                }
                read = reader.read(&mut buf) => {
                    let n = read?;
                    if n == 0 {
                        self.transition(SessionState::Closed);
                        tracing::info!("printer closed the connection");
                        return Ok(());
                    }
                    let chunk = String::from_utf8_lossy(&buf[..n]);
                    for frame in frames.push(&chunk) {
                        // Disarming after expiry is a no-op.
                        pending = None;
                        let update = parse_response(&frame);
                        let mut status = self.status.write().await;
                        *status = status.clone().merged(update);
                        if !self.silent {
                            tracing::info!("printer status: {}", *status);
                        }
                    }
                }
                () = watchdog(&pending), if pending.is_some() => {
                    if let Some(expired) = pending.take() {
                        tracing::warn!(
                            command = expired.command.name(),
                            "no response within {}ms",
                            RESPONSE_TIMEOUT.as_millis(),
                        );
                    }
                }
            }
        }
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(from = ?self.state, to = ?next, "printer session state");
        self.state = next;
    }
}

async fn watchdog(pending: &Option<Pending>) {
    match pending {
        Some(pending) => time::sleep_until(pending.deadline).await,
        None => future::pending().await,
    }
}
