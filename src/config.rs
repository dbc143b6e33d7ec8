use std::env;

/// Process-wide configuration, read once at startup.
///
/// `LLM` names the text-generation backend ("rinna" or "claude").
/// `ANTHROPIC_API_KEY` is only required when the "claude" backend is
/// selected; a rinna-only deployment may leave it unset.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: String,
    pub anthropic_api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            backend: env::var("LLM").unwrap_or_default(),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
        }
    }
}
