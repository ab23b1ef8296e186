/*!
 * Tests for application configuration
 */

use std::str::FromStr;

use mdzh::app_config::{BackoffKind, Config, ProviderConfig, TranslationProvider};

#[test]
fn test_default_config_shouldUseDeepSeekProvider() {
    let config = Config::default();

    assert_eq!(config.translation.provider, TranslationProvider::DeepSeek);
    assert_eq!(config.max_chunk_chars, 100_000);
    assert_eq!(config.translation.available_providers.len(), 2);
}

#[test]
fn test_default_config_shouldCarryProviderDefaults() {
    let config = Config::default();

    assert_eq!(config.translation.get_model(), "deepseek-r1-250528");
    assert_eq!(
        config.translation.get_endpoint(),
        "https://ark.cn-beijing.volces.com/api/v3"
    );

    let gemini = config
        .translation
        .get_provider_config(&TranslationProvider::Gemini)
        .unwrap();
    assert_eq!(gemini.model, "gemini-1.5-flash-8b");
    assert_eq!(gemini.endpoint, "https://generativelanguage.googleapis.com");
}

#[test]
fn test_config_withEmptyProviderList_shouldFallBackToDefaults() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::Gemini;

    assert_eq!(config.translation.get_model(), "gemini-1.5-flash-8b");
    assert_eq!(
        config.translation.get_endpoint(),
        "https://generativelanguage.googleapis.com"
    );
    assert_eq!(config.translation.get_timeout_secs(), 120);
}

#[test]
fn test_get_api_key_withConfiguredKey_shouldUseIt() {
    let mut config = Config::default();
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "deepseek")
    {
        provider.api_key = "sk-test".to_string();
    }

    assert_eq!(config.translation.get_api_key(), "sk-test");
}

#[test]
fn test_provider_fromStr_shouldParseKnownNames() {
    assert_eq!(
        TranslationProvider::from_str("deepseek").unwrap(),
        TranslationProvider::DeepSeek
    );
    assert_eq!(
        TranslationProvider::from_str("GEMINI").unwrap(),
        TranslationProvider::Gemini
    );
    assert!(TranslationProvider::from_str("openai").is_err());
}

#[test]
fn test_provider_displayName_shouldBeCapitalized() {
    assert_eq!(TranslationProvider::DeepSeek.display_name(), "DeepSeek");
    assert_eq!(TranslationProvider::Gemini.to_lowercase_string(), "gemini");
}

#[test]
fn test_validate_withRetriesOverCap_shouldFail() {
    let mut config = Config::default();
    config.translation.common.retry_max_attempts = 11;

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("retry_max_attempts"));
}

#[test]
fn test_validate_withZeroChunkSize_shouldFail() {
    let mut config = Config::default();
    config.max_chunk_chars = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withSubUnitBackoffBase_shouldFail() {
    let mut config = Config::default();
    config.translation.common.retry_backoff_base = 0.5;

    assert!(config.validate().is_err());
}

#[test]
fn test_backoff_policy_withValidConfig_shouldBuild() {
    let config = Config::default();
    let policy = config.translation.common.backoff_policy().unwrap();

    assert_eq!(policy.max_retries(), 3);
}

#[test]
fn test_backoff_policy_withConstantKind_shouldBuild() {
    let mut config = Config::default();
    config.translation.common.retry_backoff = BackoffKind::Constant;

    assert!(config.translation.common.backoff_policy().is_ok());
}

#[test]
fn test_backoff_policy_withRetriesOverCap_shouldFail() {
    let mut config = Config::default();
    config.translation.common.retry_max_attempts = 12;

    assert!(config.translation.common.backoff_policy().is_err());
}

#[test]
fn test_config_serde_shouldRoundTrip() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.translation.provider, config.translation.provider);
    assert_eq!(parsed.max_chunk_chars, config.max_chunk_chars);
    assert_eq!(
        parsed.translation.common.retry_max_attempts,
        config.translation.common.retry_max_attempts
    );
}

#[test]
fn test_config_serde_withMinimalJson_shouldApplyDefaults() {
    let json = r#"{ "translation": { "provider": "gemini" } }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.translation.provider, TranslationProvider::Gemini);
    assert_eq!(config.max_chunk_chars, 100_000);
    assert_eq!(config.translation.common.retry_max_attempts, 3);
    assert_eq!(config.translation.common.retry_backoff, BackoffKind::Exponential);
    assert!(config.translation.common.retry_jitter);
}

#[test]
fn test_provider_config_serde_shouldUseTypeField() {
    let provider = ProviderConfig::new(TranslationProvider::DeepSeek);
    let value = serde_json::to_value(&provider).unwrap();

    assert_eq!(value["type"], "deepseek");
    assert_eq!(value["model"], "deepseek-r1-250528");
}
