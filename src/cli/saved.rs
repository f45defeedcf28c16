use std::error::Error;

use tracing::warn;

use crate::cli::assistant::print_reply;
use crate::core::store::ConfigurationStore;

pub fn run(store: &ConfigurationStore, clear: bool) -> Result<(), Box<dyn Error>> {
    if clear {
        store.clear()?;
        println!("Saved configuration removed.");
        return Ok(());
    }

    // A corrupted slot reads the same as an empty one; the store's error
    // channel exists for logging, not for the user.
    let saved = match store.load() {
        Ok(saved) => saved,
        Err(err) => {
            warn!("could not read saved configuration: {err}");
            None
        }
    };

    match saved {
        Some(reply) => print_reply(&reply),
        None => println!("No saved configuration."),
    }
    Ok(())
}
