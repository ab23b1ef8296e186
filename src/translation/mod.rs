/*!
 * Translation service for Markdown translation using AI providers.
 *
 * This module contains the core functionality for translating document
 * sections using the configured provider. It is split into several
 * submodules:
 *
 * - `core`: Core translation functionality and service definition
 * - `chunk`: Section-level chunk processing (classify, translate, reassemble)
 * - `prompts`: The translation system prompt and response extraction
 */

use async_trait::async_trait;

use crate::errors::TranslationError;

// Re-export main types for easier usage
pub use self::chunk::ChunkProcessor;
pub use self::core::TranslationService;
pub use self::prompts::extract_refined_translation;

// Submodules
pub mod chunk;
pub mod core;
pub mod prompts;

/// The seam between chunk processing and the remote translation collaborator.
///
/// [`TranslationService`] is the production implementation; tests substitute
/// their own.
#[async_trait]
pub trait Translate: Send + Sync {
    /// Translate a piece of prose, returning the translated text
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}
