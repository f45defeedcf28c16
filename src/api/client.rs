use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::api::models::{
    AssistantMode, AssistantReply, ChatReply, ChatRequest, PingReply, ProductRecord,
};
use crate::api::ApiError;
use crate::core::config::Config;
use crate::core::normalize::{normalize_assistant_reply, normalize_product_list};
use crate::utils::url::construct_api_url;

/// Thin client over the retailer's REST API.
///
/// Base URL and bearer token are plain data injected at construction;
/// there is no mutable global state. One instance serves the whole
/// process.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        ApiClient {
            client: Client::new(),
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Fetches and normalizes the product list for one category.
    pub async fn fetch_products(&self, category: &str) -> Result<Vec<ProductRecord>, ApiError> {
        let url = construct_api_url(&self.base_url, &format!("products/{category}"));
        debug!(%url, "fetching product list");

        let response = self
            .authorize(self.client.get(url).header("Content-Type", "application/json"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let raw = response.json::<Vec<Value>>().await?;
        Ok(normalize_product_list(&raw))
    }

    /// Sends one assistant turn and normalizes whichever reply envelope
    /// comes back. The mode's prompt prefix is prepended before sending.
    pub async fn assistant_chat(
        &self,
        prompt: &str,
        mode: AssistantMode,
    ) -> Result<AssistantReply, ApiError> {
        let url = construct_api_url(&self.base_url, "ai/chat/");
        let user_input = format!("{}{}", mode.prompt_prefix(), prompt);
        debug!(mode = mode.as_str(), "sending assistant prompt");

        let response = self
            .authorize(self.client.get(url).query(&[("user_input", user_input.as_str())]))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let raw = response.json::<Value>().await?;
        Ok(normalize_assistant_reply(&raw))
    }

    /// Plain chat: the reply's free text passes through untouched.
    pub async fn chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        let url = construct_api_url(&self.base_url, "chat/");
        let body = ChatRequest {
            request: message.to_string(),
        };

        let response = self.authorize(self.client.post(url).json(&body)).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json::<ChatReply>().await?)
    }

    /// Checks that the backend answers at its root route.
    pub async fn ping(&self) -> Result<PingReply, ApiError> {
        let url = construct_api_url(&self.base_url, "/");
        debug!(%url, "pinging backend");

        let response = self.authorize(self.client.get(url)).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json::<PingReply>().await?)
    }
}
