//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::AutoplaySettings;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "carousel-autoplay")]
#[command(about = "Demo host driving an autoplaying carousel over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Number of items in the carousel
    #[arg(short, long, default_value = "5")]
    pub items: usize,

    /// Start with autoplay enabled
    #[arg(long)]
    pub autoplay: bool,

    /// Delay between automatic advances in milliseconds
    #[arg(long, default_value = "5000")]
    pub timeout_ms: u64,

    /// Transition speed of automatic advances in milliseconds
    #[arg(long, default_value = "250")]
    pub speed_ms: u64,

    /// Pause autoplay while the pointer hovers the carousel
    #[arg(long)]
    pub hover_pause: bool,

    /// Delay before resuming after the pointer leaves, in milliseconds
    #[arg(long, default_value = "1")]
    pub mouseleave_timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial carousel settings taken from the command line
    pub fn settings(&self) -> AutoplaySettings {
        AutoplaySettings {
            autoplay: self.autoplay,
            autoplay_timeout: self.timeout_ms,
            autoplay_speed: self.speed_ms,
            autoplay_hover_pause: self.hover_pause,
            autoplay_mouseleave_timeout: self.mouseleave_timeout_ms,
        }
    }
}
