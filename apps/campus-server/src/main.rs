//! REST API server for the campus registry.
//!
//! Wires together the record store, router, and HTTP server with
//! configuration parsing and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;

use campus_api::{router::Router, server::Server};
use campus_core::{config::RegistryConfig, store::Registry};

/// Command-line arguments for the registry server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Request body read timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Initial table capacity in records
    #[arg(long, default_value_t = 1024)]
    initial_table_capacity: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let config = Arc::new(RegistryConfig {
        initial_table_capacity: args.initial_table_capacity,
        request_timeout_ms: args.request_timeout_ms,
    });

    let registry = Arc::new(Registry::new(&config));
    let router = Router::new(registry, config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let server = Server::bind(addr, router).await?;

    println!("Starting campus registry server...");
    println!("  Host: {}", args.host);
    println!("  Port: {}", args.port);
    println!("  Request timeout: {} ms", args.request_timeout_ms);

    // Start server with graceful shutdown
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("Server error: {}", e);
        }
    });

    // Wait for Ctrl+C
    signal::ctrl_c().await?;
    println!("\nShutting down server...");
    server_handle.abort();

    Ok(())
}
