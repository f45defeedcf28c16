//! Command-line interface parsing and handling
//!
//! Each subcommand stands in for one screen of the original client: the
//! catalog list, the assistant/configurator, plain chat, and the saved
//! configuration view.

pub mod assistant;
pub mod chat;
pub mod products;
pub mod saved;

use std::error::Error;

use clap::{Parser, Subcommand};

use crate::api::models::AssistantMode;
use crate::api::ApiClient;
use crate::core::config::Config;
use crate::core::resource::Resource;
use crate::core::store::ConfigurationStore;

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(about = "A terminal client for an electronics retailer API with an AI build configurator")]
#[command(
    long_about = "Vitrina talks to a DNS-style electronics retailer backend: it lists \
products by category, drives the AI-assisted PC build configurator, and keeps the \
last suggested configuration cached locally.\n\n\
Configuration:\n\
  Settings live in a TOML file under the platform config directory.\n\n\
Environment Variables:\n\
  VITRINA_BASE_URL  Backend base URL (overrides the config file)\n\
  VITRINA_TOKEN     Bearer token sent with every request"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config file and environment)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Bearer token (overrides config file and environment)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the products in a category
    Products {
        /// Category name as the backend knows it (e.g. videocards)
        category: String,
    },
    /// Ask the AI assistant; a build reply is cached locally
    Ask {
        prompt: String,
        /// Assistant mode: text, configuration, or smart-search
        #[arg(short, long, default_value = "text")]
        mode: AssistantMode,
    },
    /// Free-form chat without normalization
    Chat { prompt: String },
    /// Check that the backend is reachable
    Ping,
    /// Show the last cached assistant configuration
    Saved {
        /// Remove the cached configuration instead of printing it
        #[arg(long)]
        clear: bool,
    },
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = Config::load()?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(token) = args.token {
        config.token = Some(token);
    }

    let client = ApiClient::new(&config);
    let store = ConfigurationStore::default_location();

    match args.command {
        Commands::Products { category } => products::run(&client, &category).await,
        Commands::Ask { prompt, mode } => assistant::run(&client, &store, &prompt, mode).await,
        Commands::Chat { prompt } => chat::run(&client, &prompt).await,
        Commands::Ping => run_ping(&client).await,
        Commands::Saved { clear } => saved::run(&store, clear),
    }
}

async fn run_ping(client: &ApiClient) -> Result<(), Box<dyn Error>> {
    match Resource::from_result(client.ping().await) {
        Resource::Success(reply) if reply.response.is_empty() => println!("Backend is up."),
        Resource::Success(reply) => println!("Backend is up: {}", reply.response),
        Resource::Error(message) => println!("Backend unreachable: {message}"),
        Resource::Loading => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn ask_parses_mode_values() {
        let args = Args::try_parse_from(["vitrina", "ask", "gaming pc", "--mode", "configuration"])
            .expect("parse failed");
        match args.command {
            Commands::Ask { mode, .. } => assert_eq!(mode, AssistantMode::Configuration),
            _ => panic!("expected ask subcommand"),
        }
    }

    #[test]
    fn ask_defaults_to_text_mode() {
        let args = Args::try_parse_from(["vitrina", "ask", "hello"]).expect("parse failed");
        match args.command {
            Commands::Ask { mode, .. } => assert_eq!(mode, AssistantMode::Text),
            _ => panic!("expected ask subcommand"),
        }
    }

    #[test]
    fn base_url_flag_is_global() {
        let args = Args::try_parse_from(["vitrina", "ping", "--base-url", "http://localhost:8000"])
            .expect("parse failed");
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:8000"));
    }
}
