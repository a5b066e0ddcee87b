//! Agent configuration resolved from the environment and CLI flags.
//!
//! ```rust
//! use abacus::config::{AgentConfig, DEFAULT_MODEL};
//!
//! let config = AgentConfig::from_env_with(|key| match key {
//!     "OPENAI_API_KEY" => Some("sk-test".to_string()),
//!     _ => None,
//! })
//! .expect("api key is present");
//!
//! assert_eq!(config.model, DEFAULT_MODEL);
//! assert_eq!(config.api_key.expose(), "sk-test");
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use achat::DEFAULT_MAX_TOOL_ROUND_TRIPS;
use aprovider::SecretString;
use tracing_subscriber::EnvFilter;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "ABACUS_MODEL";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const SYSTEM_PROMPT_VAR: &str = "ABACUS_SYSTEM_PROMPT";
pub const MAX_TOOL_ROUNDS_VAR: &str = "ABACUS_MAX_TOOL_ROUNDS";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Use the available tools \
for arithmetic and report tool errors to the user in plain language.";

/// Used when `RUST_LOG` is unset: tool and workflow diagnostics at `info`,
/// everything else at `warn`.
pub const DEFAULT_LOG_FILTER: &str = "warn,abacus=info,atooling=info,aobserve=info";

pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    Missing,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
    pub variable: Option<String>,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            variable: None,
        }
    }

    pub fn missing(variable: &str) -> Self {
        Self::new(
            ConfigErrorKind::Missing,
            format!("environment variable {variable} must be set"),
        )
        .with_variable(variable)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Invalid, message)
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ConfigError {}

/// Everything the chat command needs to build a provider and a chat service.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_key: SecretString,
    pub model: String,
    /// Set when talking to an OpenAI-compatible server instead of api.openai.com.
    pub base_url: Option<String>,
    pub system_prompt: String,
    pub max_tool_round_trips: usize,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, treating blank values as unset.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = read(API_KEY_VAR).ok_or_else(|| ConfigError::missing(API_KEY_VAR))?;
        let max_tool_round_trips = match read(MAX_TOOL_ROUNDS_VAR) {
            Some(raw) => {
                parse_round_trips(&raw).map_err(|err| err.with_variable(MAX_TOOL_ROUNDS_VAR))?
            }
            None => DEFAULT_MAX_TOOL_ROUND_TRIPS,
        };

        Ok(Self {
            api_key: SecretString::new(api_key),
            model: read(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: read(BASE_URL_VAR),
            system_prompt: read(SYSTEM_PROMPT_VAR)
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            max_tool_round_trips,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_max_tool_round_trips(mut self, max_tool_round_trips: usize) -> Self {
        self.max_tool_round_trips = max_tool_round_trips;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

fn parse_round_trips(raw: &str) -> Result<usize, ConfigError> {
    raw.parse::<usize>()
        .map_err(|_| ConfigError::invalid(format!("'{raw}' is not a non-negative integer")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_a_configuration_error() {
        let err = AgentConfig::from_env_with(lookup_from(&[(MODEL_VAR, "gpt-4o")]))
            .expect_err("api key is required");

        assert_eq!(err.kind, ConfigErrorKind::Missing);
        assert_eq!(err.variable.as_deref(), Some(API_KEY_VAR));
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = AgentConfig::from_env_with(lookup_from(&[(API_KEY_VAR, "   ")]))
            .expect_err("blank key is rejected");
        assert_eq!(err.kind, ConfigErrorKind::Missing);
    }

    #[test]
    fn defaults_fill_optional_settings() {
        let config = AgentConfig::from_env_with(lookup_from(&[(API_KEY_VAR, "sk-abc")]))
            .expect("config resolves");

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, None);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.max_tool_round_trips, DEFAULT_MAX_TOOL_ROUND_TRIPS);
        assert_eq!(format!("{:?}", config.api_key), "[REDACTED]");
    }

    #[test]
    fn environment_values_override_defaults_and_flags_override_environment() {
        let config = AgentConfig::from_env_with(lookup_from(&[
            (API_KEY_VAR, "local-key"),
            (MODEL_VAR, "llama3.1"),
            (BASE_URL_VAR, "http://localhost:11434/v1"),
            (MAX_TOOL_ROUNDS_VAR, "2"),
        ]))
        .expect("config resolves")
        .with_system_prompt("Be terse.")
        .with_max_tool_round_trips(6);

        assert_eq!(config.model, "llama3.1");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:11434/v1"));
        assert_eq!(config.system_prompt, "Be terse.");
        assert_eq!(config.max_tool_round_trips, 6);
    }

    #[test]
    fn malformed_round_trip_budget_names_the_variable() {
        let err = AgentConfig::from_env_with(lookup_from(&[
            (API_KEY_VAR, "sk-abc"),
            (MAX_TOOL_ROUNDS_VAR, "many"),
        ]))
        .expect_err("non-numeric budget is rejected");

        assert_eq!(err.kind, ConfigErrorKind::Invalid);
        assert_eq!(err.variable.as_deref(), Some(MAX_TOOL_ROUNDS_VAR));
        assert!(err.message.contains("many"));
    }

    #[test]
    fn default_log_filter_shows_tool_and_workflow_diagnostics() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).expect("directives parse");
        let rendered = filter.to_string();

        for directive in ["abacus=info", "atooling=info", "aobserve=info"] {
            assert!(rendered.contains(directive), "missing {directive} in {rendered}");
        }
        assert_eq!(
            filter.max_level_hint(),
            Some(tracing_subscriber::filter::LevelFilter::INFO)
        );
    }
}
