use std::error::Error;

use tracing::warn;

use crate::api::models::{AssistantMode, AssistantReply};
use crate::api::ApiClient;
use crate::core::resource::Resource;
use crate::core::store::ConfigurationStore;

pub async fn run(
    client: &ApiClient,
    store: &ConfigurationStore,
    prompt: &str,
    mode: AssistantMode,
) -> Result<(), Box<dyn Error>> {
    let mut state = Resource::Loading;
    render(&state);

    state = Resource::from_result(client.assistant_chat(prompt, mode).await);
    render(&state);

    if let Some(reply) = state.success() {
        // Best-effort cache of the latest configuration. A failed save
        // must not fail the command.
        if let Err(err) = store.save(&reply) {
            warn!("could not cache assistant reply: {err}");
        }
    }
    Ok(())
}

fn render(state: &Resource<AssistantReply>) {
    match state {
        Resource::Loading => println!("Asking the assistant..."),
        Resource::Success(reply) => print_reply(reply),
        Resource::Error(message) => println!("Error: {message}"),
    }
}

pub(crate) fn print_reply(reply: &AssistantReply) {
    if !reply.comment.is_empty() {
        println!("{}", reply.comment);
    }
    if let Some(total) = reply.price {
        println!("Total: {total} ₽");
    }
    for component in &reply.components {
        match &component.category {
            Some(category) => println!("[{}] {}: {} ₽", category, component.model, component.price),
            None => println!("{}: {} ₽", component.model, component.price),
        }
        let mut keys: Vec<&String> = component.details.keys().collect();
        keys.sort();
        for key in keys {
            println!("    {}: {}", key, component.details[key]);
        }
    }
    if reply.comment.is_empty() && reply.components.is_empty() {
        println!("The assistant returned nothing usable (kind: '{}').", reply.kind);
    }
}
