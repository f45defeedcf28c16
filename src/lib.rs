//! Vitrina is a headless terminal client for a DNS-style electronics
//! retailer backend: catalog browsing, an AI-assisted PC build
//! configurator, and plain chat.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] owns the HTTP client and the payload records it returns.
//! - [`core`] owns configuration, the response normalizer that reconciles
//!   the backend's divergent JSON shapes into stable records, the local
//!   store that remembers the last assistant configuration, and the
//!   tri-state call result shown to the user.
//! - [`cli`] implements argument parsing and the subcommand handlers.
//! - [`utils`] holds URL plumbing shared by the API client.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`) and
//! routes through [`cli::run`].

pub mod api;
pub mod cli;
pub mod core;
pub mod utils;
