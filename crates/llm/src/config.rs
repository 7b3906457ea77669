/// LLM configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Force the mock provider even when an API key is present.
    pub use_mock: bool,
    /// API key for the OpenAI-compatible provider.
    pub api_key: Option<String>,
    /// Chat model name (default: `gpt-3.5-turbo`).
    pub model: String,
}

/// Default chat model.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

impl LlmConfig {
    /// Load LLM configuration from environment variables.
    ///
    /// | Env Var          | Default         |
    /// |------------------|-----------------|
    /// | `USE_MOCK`       | `true`          |
    /// | `OPENAI_API_KEY` | unset           |
    /// | `OPENAI_MODEL`   | `gpt-3.5-turbo` |
    pub fn from_env() -> Self {
        let use_mock = std::env::var("USE_MOCK")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(true);

        let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            use_mock,
            api_key,
            model,
        }
    }

    /// A config that always uses the mock provider (for tests).
    pub fn mock() -> Self {
        Self {
            use_mock: true,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}
