use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::retry::{BackoffPolicy, MAX_RETRY_CAP};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation config
    pub translation: TranslationConfig,

    /// Maximum number of characters in a single translatable chunk
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: DeepSeek via the Volcengine Ark gateway
    #[default]
    DeepSeek,
    // @provider: Google Gemini
    Gemini,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::DeepSeek => "DeepSeek",
            Self::Gemini => "Gemini",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::DeepSeek => "deepseek".to_string(),
            Self::Gemini => "gemini".to_string(),
        }
    }

    // @returns: Environment variable consulted when the config has no API key
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            Self::DeepSeek => "ARK_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "deepseek" => Ok(Self::DeepSeek),
            "gemini" => Ok(Self::Gemini),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::DeepSeek => Self {
                provider_type: "deepseek".to_string(),
                model: default_deepseek_model(),
                api_key: String::new(),
                endpoint: default_deepseek_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Gemini => Self {
                provider_type: "gemini".to_string(),
                model: default_gemini_model(),
                api_key: String::new(),
                endpoint: default_gemini_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Backoff growth mode for retries
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    /// Delay grows by `retry_backoff_base` per attempt
    #[default]
    Exponential,
    /// Same delay before every retry
    Constant,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Maximum number of retries for transient failures
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,

    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_retry_initial_delay_ms")]
    pub retry_initial_delay_ms: u64,

    /// Backoff growth mode
    #[serde(default)]
    pub retry_backoff: BackoffKind,

    /// Growth factor per attempt for exponential backoff
    #[serde(default = "default_retry_backoff_base")]
    pub retry_backoff_base: f64,

    /// Whether to apply a random jitter factor in [1.0, 2.0) to each delay
    #[serde(default = "default_true")]
    pub retry_jitter: bool,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            retry_max_attempts: default_retry_max_attempts(),
            retry_initial_delay_ms: default_retry_initial_delay_ms(),
            retry_backoff: BackoffKind::default(),
            retry_backoff_base: default_retry_backoff_base(),
            retry_jitter: default_true(),
        }
    }
}

impl TranslationCommonConfig {
    /// Build the retry policy described by this configuration.
    ///
    /// Fails when the configured retry count exceeds the hard cap.
    pub fn backoff_policy(&self) -> Result<BackoffPolicy, crate::errors::AppError> {
        let initial_delay = std::time::Duration::from_millis(self.retry_initial_delay_ms);
        match self.retry_backoff {
            BackoffKind::Exponential => BackoffPolicy::exponential(
                initial_delay,
                self.retry_backoff_base,
                self.retry_jitter,
                self.retry_max_attempts,
            ),
            BackoffKind::Constant => {
                BackoffPolicy::constant(initial_delay, self.retry_jitter, self.retry_max_attempts)
            }
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_chunk_chars() -> usize {
    100_000
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_retry_max_attempts() -> u32 {
    3
}

fn default_retry_initial_delay_ms() -> u64 {
    1000
}

fn default_retry_backoff_base() -> f64 {
    1.2
}

fn default_true() -> bool {
    true
}

fn default_deepseek_endpoint() -> String {
    "https://ark.cn-beijing.volces.com/api/v3".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_deepseek_model() -> String {
    "deepseek-r1-250528".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash-8b".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_chars == 0 {
            return Err(anyhow!("max_chunk_chars must be greater than zero"));
        }

        if self.translation.common.retry_max_attempts > MAX_RETRY_CAP {
            return Err(anyhow!(
                "retry_max_attempts must be at most {}, got {}",
                MAX_RETRY_CAP,
                self.translation.common.retry_max_attempts
            ));
        }

        if self.translation.common.retry_backoff == BackoffKind::Exponential
            && self.translation.common.retry_backoff_base < 1.0
        {
            return Err(anyhow!(
                "retry_backoff_base must be at least 1.0 for exponential backoff"
            ));
        }

        // Both supported providers need an API key, from the config file or
        // the provider's environment variable
        let api_key = self.translation.get_api_key();
        if api_key.is_empty() {
            return Err(anyhow!(
                "Translation API key is required for the {} provider (set it in the config file or via {})",
                self.translation.provider.display_name(),
                self.translation.provider.api_key_env_var()
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            translation: TranslationConfig::default(),
            max_chunk_chars: default_max_chunk_chars(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TranslationProvider::DeepSeek => default_deepseek_model(),
            TranslationProvider::Gemini => default_gemini_model(),
        }
    }

    /// Get the API key for the active provider, falling back to the
    /// provider's environment variable when the config has none
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        std::env::var(self.provider.api_key_env_var()).unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::DeepSeek => default_deepseek_endpoint(),
            TranslationProvider::Gemini => default_gemini_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        default_timeout_secs()
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: TranslationProvider::default(),
            available_providers: Vec::new(),
            common: TranslationCommonConfig::default(),
        };

        config
            .available_providers
            .push(ProviderConfig::new(TranslationProvider::DeepSeek));
        config
            .available_providers
            .push(ProviderConfig::new(TranslationProvider::Gemini));

        config
    }
}
