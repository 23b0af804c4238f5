//! Application configuration management

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (defaults to 0.0.0.0)
    pub host: Option<String>,

    /// Server port
    pub port: u16,

    /// Interval between change-feed ticks
    pub tick_interval: Duration,

    /// Bounded queue depth per subscriber; events past this are dropped
    /// for that subscriber
    pub subscriber_queue_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").ok(),

            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("Invalid PORT")?,

            tick_interval: Duration::from_millis(
                env::var("TICK_INTERVAL_MS")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .context("Invalid TICK_INTERVAL_MS")?,
            ),

            subscriber_queue_capacity: env::var("SUBSCRIBER_QUEUE_CAPACITY")
                .unwrap_or_else(|_| "64".to_string())
                .parse()
                .context("Invalid SUBSCRIBER_QUEUE_CAPACITY")?,
        })
    }
}
