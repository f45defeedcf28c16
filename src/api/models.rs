use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// One catalog item from the product list endpoint.
///
/// The backend labels the promoted fields in Russian ("Цена", "Модель",
/// "Изображение"); every other field it sends lands in `details`, keyed
/// by the original field name. The promoted keys never appear in
/// `details`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub price: i64,
    pub model: String,
    pub image_url: String,
    pub details: HashMap<String, String>,
}

/// One component suggested by the assistant (a CPU, GPU, and so on).
///
/// Same allowlist-plus-residual shape as [`ProductRecord`], with two more
/// promoted fields. `details` values are always strings; non-string JSON
/// values are stringified when the component is normalized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssistantComponent {
    pub id: i64,
    pub price: i64,
    pub model: String,
    pub category: Option<String>,
    pub image_url: String,
    pub details: HashMap<String, String>,
}

/// The normalized result of one assistant turn.
///
/// `kind` is the discriminator the backend used ("pc_build_ready" or
/// "search_result"; anything else parses to an empty reply). `price` is
/// only meaningful for ready builds. `components` is never null; an
/// empty list means the reply carried none.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub price: Option<i64>,
    pub kind: String,
    pub comment: String,
    pub components: Vec<AssistantComponent>,
}

/// Prompt mode for the assistant endpoint. Each mode contributes a fixed
/// prefix prepended to the user's prompt before the request goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantMode {
    #[default]
    Text,
    Configuration,
    SmartSearch,
}

impl AssistantMode {
    pub fn prompt_prefix(self) -> &'static str {
        match self {
            AssistantMode::Text => "",
            AssistantMode::Configuration => {
                "Режим сборки конфигурации ПК, соберем сборку по требованиям: "
            }
            AssistantMode::SmartSearch => "Режим поиска, найдем товар по требованиям: ",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssistantMode::Text => "Text",
            AssistantMode::Configuration => "Configuration",
            AssistantMode::SmartSearch => "SmartSearch",
        }
    }
}

impl FromStr for AssistantMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(AssistantMode::Text),
            "configuration" => Ok(AssistantMode::Configuration),
            "smart-search" | "smartsearch" => Ok(AssistantMode::SmartSearch),
            other => Err(format!(
                "unknown mode '{other}' (expected text, configuration, or smart-search)"
            )),
        }
    }
}

/// Body of the plain chat endpoint. No normalization on either side.
#[derive(Serialize)]
pub struct ChatRequest {
    pub request: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct PingReply {
    #[serde(default)]
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("TEXT".parse::<AssistantMode>().unwrap(), AssistantMode::Text);
        assert_eq!(
            "smart-search".parse::<AssistantMode>().unwrap(),
            AssistantMode::SmartSearch
        );
        assert!("build".parse::<AssistantMode>().is_err());
    }

    #[test]
    fn text_mode_adds_no_prefix() {
        assert_eq!(AssistantMode::Text.prompt_prefix(), "");
        assert!(!AssistantMode::Configuration.prompt_prefix().is_empty());
    }
}
