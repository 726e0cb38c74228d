use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::settings::Settings;
use crate::simulate::PrinterSim;

pub mod settings;
mod simulate;

pub async fn run(settings: &Arc<Settings>) {
    let listener = TcpListener::bind((settings.mock.host.as_str(), settings.mock.port))
        .await
        .expect("Fail to bind mock printer port.");

    tracing::info!(
        "mock printer listening on {}:{}",
        settings.mock.host,
        settings.mock.port
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tracing::info!("watcher connected from {addr}");
                let sd_bytes_total = settings.mock.sd_bytes_total;
                tokio::spawn(async move {
                    handle_connection(stream, sd_bytes_total).await;
                    tracing::info!("watcher {addr} disconnected");
                });
            }
            Err(e) => {
                tracing::error!("failed to accept connection: {e}");
            }
        }
    }
}

/// Each connection gets its own simulated machine. Commands arrive one per
/// line; every complete line is answered with an `ok`-terminated frame.
async fn handle_connection(mut stream: TcpStream, sd_bytes_total: u64) {
    let mut sim = PrinterSim::new(sd_bytes_total);
    let mut pending = String::new();
    let mut buf = [0u8; 128];

    loop {
        let n = match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        pending.push_str(&String::from_utf8_lossy(&buf[..n]));

        while let Some(at) = pending.find('\n') {
            let command = pending[..at].trim().to_owned();
            pending.drain(..=at);

            tracing::debug!(command = %command, "answering poll command");
            let reply = sim.respond(&command);
            if stream.write_all(reply.as_bytes()).await.is_err() {
                return;
            }
        }
    }
}
