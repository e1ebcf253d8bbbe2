use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use weatherbot_core::{ApiKeys, Config, WeatherService, project};

use crate::web;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weatherbot",
    version,
    about = "KMA weather chatbot skill server"
)]
pub struct Cli {
    /// TOML config file. Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Outbound request timeout in seconds, overriding the config file.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the skill webhook (the default).
    Serve {
        /// Listen address, overriding the config file.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print the forecast for a location once and exit.
    Show {
        /// Place name, e.g. "강남역".
        location: String,
    },

    /// Print the forecast grid cell for a coordinate.
    Grid {
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = self.load_config()?;
        if let Some(secs) = self.timeout {
            config.request_timeout_secs = secs;
        }

        match self.command.unwrap_or(Command::Serve { bind: None }) {
            Command::Serve { bind } => {
                if let Some(bind) = bind {
                    config.bind = bind;
                }
                let service = build_service(&config)?;
                web::serve(&config.bind, Arc::new(service)).await
            }
            Command::Show { location } => {
                let service = build_service(&config)?;
                let report = service.forecast_for(&location).await?;
                println!("{report}");
                Ok(())
            }
            Command::Grid {
                longitude,
                latitude,
            } => {
                let cell = project(longitude, latitude);
                println!("nx={} ny={}", cell.x, cell.y);
                Ok(())
            }
        }
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

fn build_service(config: &Config) -> anyhow::Result<WeatherService> {
    let keys = ApiKeys::from_env()?;
    WeatherService::from_config(config, &keys)
        .context("Failed to construct upstream clients")
}
