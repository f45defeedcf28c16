use std::error::Error;

use crate::api::models::ChatReply;
use crate::api::ApiClient;
use crate::core::resource::Resource;

pub async fn run(client: &ApiClient, prompt: &str) -> Result<(), Box<dyn Error>> {
    let mut state = Resource::Loading;
    render(&state);

    state = Resource::from_result(client.chat(prompt).await);
    render(&state);
    Ok(())
}

fn render(state: &Resource<ChatReply>) {
    match state {
        Resource::Loading => println!("Sending..."),
        Resource::Success(reply) => println!("{}", reply.response),
        Resource::Error(message) => println!("Error: {message}"),
    }
}
