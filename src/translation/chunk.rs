/*!
 * Section-level chunk processing.
 *
 * One section at a time: classify the section text into spans, pass
 * protected spans through untouched, translate the prose spans, and stitch
 * the results back together in order.
 */

use std::time::Instant;

use log::debug;

use crate::errors::TranslationError;
use crate::markdown_processor::{SpanKind, classify_spans};

use super::Translate;

/// Processes one section of a document into its translated form.
///
/// Protected spans (code blocks, tables, images) are copied verbatim,
/// wrapped in a leading and trailing newline so they stay separated from the
/// surrounding translated prose. Prose spans are handed to the translation
/// collaborator, strictly one at a time.
pub struct ChunkProcessor<T: Translate> {
    /// The translation collaborator
    translator: T,

    /// Maximum number of characters in a single translatable span
    max_chunk_chars: usize,
}

impl<T: Translate> ChunkProcessor<T> {
    /// Create a new chunk processor
    pub fn new(translator: T, max_chunk_chars: usize) -> Self {
        Self {
            translator,
            max_chunk_chars,
        }
    }

    /// Translate one section, given its heading and body.
    ///
    /// A blank section yields an empty string without touching the
    /// translator. A prose span larger than the configured maximum is
    /// [`TranslationError::ChunkTooLarge`]; splitting such spans further is
    /// an unimplemented extension point, so the error is fatal for the
    /// document and no translation call is made for the span.
    pub async fn process(&self, heading: &str, body: &str) -> Result<String, TranslationError> {
        let combined = format!("{heading}{body}");
        if combined.trim().is_empty() {
            return Ok(String::new());
        }

        let spans = classify_spans(&combined);
        debug!("Section classified into {} spans", spans.len());

        let mut translated = String::new();
        for span in &spans {
            if span.text.trim().is_empty() {
                continue;
            }

            if span.kind.is_protected() {
                debug!("Passing through {:?} span of {} bytes", span.kind, span.text.len());
                translated.push('\n');
                translated.push_str(&span.text);
                translated.push('\n');
                continue;
            }

            let length = span.text.chars().count();
            if length > self.max_chunk_chars {
                return Err(TranslationError::ChunkTooLarge {
                    length,
                    max_chars: self.max_chunk_chars,
                });
            }

            let start_time = Instant::now();
            let result = self.translator.translate(&span.text).await?;
            debug!(
                "Prose span of {} chars translated in {:.2}s",
                length,
                start_time.elapsed().as_secs_f64()
            );
            translated.push_str(&result);
        }

        Ok(translated)
    }
}
