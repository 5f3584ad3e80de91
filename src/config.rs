use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// Where matches are kept
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Process memory; the scoreboard is empty after every restart
    Memory,
    /// SQLite file at `--database-path`
    Sqlite,
}

/// Live football scoreboard
#[derive(Parser, Debug, Clone)]
#[command(name = "live-scoreboard", version, about)]
pub struct Config {
    /// Dashboard listen address
    #[arg(long, env = "SCOREBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Storage backend for match records
    #[arg(long, env = "SCOREBOARD_STORE", value_enum, default_value = "memory")]
    pub store: StoreKind,

    /// SQLite database path (only used with `--store sqlite`)
    #[arg(long, env = "DATABASE_PATH", default_value = "scoreboard.db")]
    pub database_path: String,

    /// Maximum number of matches rendered on the dashboard page
    #[arg(long, env = "SUMMARY_LIMIT")]
    pub summary_limit: Option<usize>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("listen_addr '{}' is not a valid socket address", self.listen_addr);
        }
        if self.store == StoreKind::Sqlite && self.database_path.trim().is_empty() {
            anyhow::bail!("DATABASE_PATH is required when using the sqlite store");
        }
        if self.summary_limit == Some(0) {
            anyhow::bail!("summary_limit must be positive");
        }
        Ok(())
    }
}
