//! Interactive console demo.
//!
//! A minimal stdin-driven REPL over the library: connect, type
//! `command:<json>` lines, watch the transcript.
//!
//! Run with: cargo run --example interactive -- <host> <port> [--secure]

use std::env;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use ws_console::{Console, ConsoleConfig, ConsoleEvent, ConnectionTarget};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = env::args().skip(1);
    let host = args.next().context("usage: interactive <host> <port> [--secure]")?;
    let port: u16 = args
        .next()
        .context("missing port")?
        .parse()
        .context("port must be 0-65535")?;
    let secure = args.next().as_deref() == Some("--secure");

    let (console, mut events) = Console::spawn(ConsoleConfig::new());

    // Render the event stream.
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                ConsoleEvent::TranscriptAppend(entry) => {
                    println!("[{}] {}", entry.kind, entry.text);
                }
                ConsoleEvent::StateChange(state) => {
                    println!("-- {state}");
                }
                ConsoleEvent::HistoryNavigate(text) => {
                    println!("(recalled) {text}");
                }
            }
        }
    });

    console.connect(ConnectionTarget::new(host, port, secure))?;

    println!("Type command:<json> lines; /prev and /next recall history; /quit exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/prev" => console.navigate(ws_console::HistoryDirection::Previous)?,
            "/next" => console.navigate(ws_console::HistoryDirection::Next)?,
            "" => {}
            _ => console.submit(line)?,
        }
    }

    console.disconnect()?;
    console.shutdown();

    Ok(())
}
