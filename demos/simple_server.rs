//! Simple signaling server example
//!
//! Run with: cargo run --example simple_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example simple_server                    # binds to 0.0.0.0:3000
//!   cargo run --example simple_server localhost          # binds to 127.0.0.1:3000
//!   cargo run --example simple_server 127.0.0.1:3001     # binds to 127.0.0.1:3001
//!
//! Talk to it with netcat, one JSON frame per line:
//!
//!   nc localhost 3000
//!   {"event":"create-room","data":{"displayName":"Alice"}}
//!   {"event":"join-room","data":{"roomId":"ABC123","displayName":"Bob"}}
//!   {"event":"chat-message","data":{"text":"hello"}}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use signaling_rs::history::{HistoryEvent, HistoryRecorder, HistoryResult};
use signaling_rs::{ServerConfig, SignalingServer};

/// Recorder that just logs room lifecycle events
///
/// A real deployment would hand these off to a database task.
struct LogRecorder;

impl HistoryRecorder for LogRecorder {
    fn record(&self, event: HistoryEvent) -> HistoryResult {
        tracing::info!(
            kind = ?event.kind,
            room = %event.room_id,
            display_name = %event.display_name,
            "Call history event"
        );
        Ok(())
    }
}

/// Parse bind address from command line argument.
///
/// Accepts formats:
/// - "localhost" -> 127.0.0.1:3000
/// - "localhost:3001" -> 127.0.0.1:3001
/// - "127.0.0.1" -> 127.0.0.1:3000
/// - "0.0.0.0:3000" -> 0.0.0.0:3000
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 3000;

    let normalized = arg.replace("localhost", "127.0.0.1");

    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: simple_server [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 0.0.0.0:3000)");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let bind_addr = match args.get(1) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "0.0.0.0:3000".parse().unwrap(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("signaling_rs=debug".parse()?)
                .add_directive("simple_server=debug".parse()?),
        )
        .init();

    let config = ServerConfig::default().bind(bind_addr);

    println!("Starting signaling server on {}", bind_addr);

    let server = Arc::new(SignalingServer::with_recorder(config, Arc::new(LogRecorder)));

    // Periodic stats report
    let stats = Arc::clone(server.stats());
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(30));
        loop {
            ticker.tick().await;
            let snap = stats.snapshot();
            tracing::info!(
                active_connections = snap.active_connections,
                active_rooms = snap.active_rooms,
                events_relayed = snap.events_relayed,
                "Server stats"
            );
        }
    });

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                eprintln!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
        }
    }

    Ok(())
}
