//! # Structured Logger Demo - Main Entry Point
//!
//! Installs a global logger from command-line options and emits a set of
//! sample records so the selected handler's output can be inspected:
//!
//! 1. **Initialize logging**: builds the logger from `Args` and installs it
//! 2. **Leveled records**: one record per level with call-site attributes
//! 3. **Derived context**: loggers carrying bound attributes
//! 4. **Legacy calls**: the untyped `(msg, key, value, ...)` adapter
//! 5. **tracing events**: forwarded through the tracing bridge
//!
//! Example: `structured-logger-demo --level debug --format console --colors`

use anyhow::{Context, Result};
use clap::Parser;
use structured_logger::{
    args, cli::Args, default_logger, init, init_tracing_bridge, Attr, Config, LegacyAdapter,
    LegacyLogger,
};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from(&args);

    init(&config).context("Failed to initialize logger")?;

    structured_logger::debug("This is a debug message", &[Attr::new("count", 1)]);
    structured_logger::info("This is an info message", &[Attr::new("user", "john")]);
    structured_logger::warn("This is a warning message", &[Attr::new("latency", "100ms")]);
    structured_logger::error(
        "This is an error message",
        &[Attr::new("error", "connection refused")],
    );

    let user_logger = structured_logger::with("user_id", "123");
    user_logger.info("User logged in", &[Attr::new("ip", "192.168.1.1")]);

    let order_logger = user_logger.with("order_id", "ABC123");
    order_logger.info(
        "Order processed",
        &[Attr::new("amount", 99.99), Attr::new("currency", "USD")],
    );

    // Groups are tracked by the handlers; the plain ones qualify keys with them
    default_logger()
        .with_group("request")
        .info("Grouped record", &[Attr::new("path", "/orders")]);

    let legacy = LegacyAdapter::new(default_logger());
    legacy.info(args!["Legacy call", "job", "reindex", "shards", 12]);
    legacy.warn(args![404, "path", "/missing"]);

    init_tracing_bridge().context("Failed to install tracing bridge")?;
    tracing::info!(component = "bridge", attempt = 2, "Event from tracing");

    Ok(())
}
