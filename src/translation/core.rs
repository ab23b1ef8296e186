/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its implementation,
 * which is responsible for translating text using the configured AI provider.
 */

use std::time::Instant;

use async_trait::async_trait;
use log::debug;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::{AppError, ProviderError, TranslationError};
use crate::providers::Provider;
use crate::providers::deepseek::{ChatRequest, DeepSeek};
use crate::providers::gemini::{Gemini, GenerateContentRequest};
use crate::retry::{BackoffPolicy, retry_with_backoff};

use super::Translate;
use super::prompts::{SYSTEM_PROMPT, extract_refined_translation};

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// DeepSeek via the OpenAI-compatible Ark endpoint
    DeepSeek {
        /// Client instance
        client: DeepSeek,
    },

    /// Google Gemini API service
    Gemini {
        /// Client instance
        client: Gemini,
    },
}

/// Main translation service for document translation
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Retry policy applied to every provider call
    policy: BackoffPolicy,
}

impl TranslationService {
    /// Create a new translation service with the given configuration.
    ///
    /// Fails when the retry configuration is invalid, before any provider
    /// call is attempted.
    pub fn new(config: TranslationConfig) -> Result<Self, AppError> {
        let policy = config.common.backoff_policy()?;

        let provider = match config.provider {
            ConfigTranslationProvider::DeepSeek => TranslationProviderImpl::DeepSeek {
                client: DeepSeek::new(
                    config.get_api_key(),
                    config.get_endpoint(),
                    config.get_model(),
                    config.get_timeout_secs(),
                ),
            },
            ConfigTranslationProvider::Gemini => TranslationProviderImpl::Gemini {
                client: Gemini::new(
                    config.get_api_key(),
                    config.get_endpoint(),
                    config.get_model(),
                    config.get_timeout_secs(),
                ),
            },
        };

        Ok(Self {
            provider,
            config,
            policy,
        })
    }

    /// Test the connection to the configured provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.provider {
            TranslationProviderImpl::DeepSeek { client } => client.test_connection().await,
            TranslationProviderImpl::Gemini { client } => client.test_connection().await,
        }
    }

    /// Send one prompt through the provider, retrying transient failures,
    /// and return the raw response text
    async fn complete_raw(&self, text: &str) -> Result<String, TranslationError> {
        let model = self.config.get_model();

        match &self.provider {
            TranslationProviderImpl::DeepSeek { client } => {
                retry_with_backoff(&self.policy, || {
                    let request = ChatRequest::new(&model)
                        .add_message("system", SYSTEM_PROMPT)
                        .add_message("user", text);
                    async move {
                        let response = client.complete(request).await?;
                        Ok(DeepSeek::extract_text(&response))
                    }
                })
                .await
            }
            TranslationProviderImpl::Gemini { client } => {
                retry_with_backoff(&self.policy, || {
                    let request = GenerateContentRequest::new(&model)
                        .system(SYSTEM_PROMPT)
                        .add_user_text(text);
                    async move {
                        let response = client.complete(request).await?;
                        Ok(Gemini::extract_text(&response))
                    }
                })
                .await
            }
        }
    }

    /// Translate a single text string.
    ///
    /// Blank input short-circuits to an empty result without a provider
    /// call. An empty provider response, or one without a usable refined
    /// translation block, is [`TranslationError::EmptyResult`] and is never
    /// retried.
    pub async fn translate_text(&self, text: &str) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let start_time = Instant::now();
        let raw = self.complete_raw(text).await?;

        if raw.trim().is_empty() {
            return Err(TranslationError::EmptyResult);
        }

        let refined =
            extract_refined_translation(&raw).ok_or(TranslationError::EmptyResult)?;
        if refined.is_empty() {
            return Err(TranslationError::EmptyResult);
        }

        debug!(
            "Translated {} chars in {:.2}s",
            text.chars().count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(refined)
    }
}

#[async_trait]
impl Translate for TranslationService {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        self.translate_text(text).await
    }
}
