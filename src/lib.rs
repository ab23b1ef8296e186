/*!
 * # mdzh - Markdown translation into Chinese with AI
 *
 * A Rust library for translating Markdown documents into Chinese using AI
 * providers, while preserving document structure.
 *
 * ## Features
 *
 * - Split documents into heading-delimited sections
 * - Classify section text into protected and translatable spans
 * - Pass code blocks, tables and images through untranslated
 * - Translate prose using various AI providers:
 *   - DeepSeek (OpenAI-compatible, Volcengine Ark endpoint)
 *   - Google Gemini API
 * - Retry transient provider failures with configurable backoff
 * - Strictly sequential processing, one request in flight at a time
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `markdown_processor`: Document segmentation and reassembly
 * - `translation`: AI-powered translation services:
 *   - `translation::core`: Core translation functionality
 *   - `translation::chunk`: Section-level chunk processing
 *   - `translation::prompts`: Prompt template and response extraction
 * - `retry`: Backoff policy for transient provider failures
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Client implementations for the LLM providers:
 *   - `providers::deepseek`: DeepSeek (OpenAI-compatible) API client
 *   - `providers::gemini`: Gemini API client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod markdown_processor;
pub mod providers;
pub mod retry;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TranslationError};
pub use markdown_processor::{Section, Span, SpanKind, assemble_document, classify_spans, split_into_sections};
pub use retry::{BackoffPolicy, retry_with_backoff};
pub use translation::{ChunkProcessor, Translate, TranslationService};
