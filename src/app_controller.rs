use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::markdown_processor::{assemble_document, split_into_sections};
use crate::translation::{ChunkProcessor, Translate, TranslationService};

// @module: Application controller for document translation

/// Suffix inserted into the input file name when no output path is given
const OUTPUT_SUFFIX: &str = "_zh_CN";

/// Main application controller for Markdown translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        Ok(Self { config })
    }

    /// Run the main workflow: read the input document, translate it section
    /// by section, and write the assembled result.
    ///
    /// The output path defaults to the input path with `_zh_CN` appended to
    /// the file stem. Unless `keep_original` is set, the input file is
    /// removed after the output has been written successfully.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_path: Option<PathBuf>,
        keep_original: bool,
    ) -> Result<(), AppError> {
        let service = TranslationService::new(self.config.translation.clone())?;
        info!(
            "🚀 mdzh: {} - {}",
            self.config.translation.provider.display_name(),
            self.config.translation.get_model()
        );
        self.run_with_translator(service, input_file, output_path, keep_original)
            .await
    }

    /// Same workflow with an explicit translation collaborator.
    ///
    /// This is the seam used by tests; `run` plugs in the configured
    /// provider-backed service.
    pub async fn run_with_translator<T: Translate>(
        &self,
        translator: T,
        input_file: PathBuf,
        output_path: Option<PathBuf>,
        keep_original: bool,
    ) -> Result<(), AppError> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(AppError::InputNotFound(input_file));
        }

        let output_path =
            output_path.unwrap_or_else(|| FileManager::derive_output_path(&input_file, OUTPUT_SUFFIX));
        info!("Translating {:?} -> {:?}", input_file, output_path);

        let content =
            FileManager::read_to_string(&input_file).map_err(|e| AppError::File(e.to_string()))?;

        let sections = split_into_sections(&content);
        let total_sections = sections.len();
        info!("Document split into {} sections", total_sections);
        if total_sections == 0 {
            warn!("Document is empty, writing an empty output");
        }

        let processor = ChunkProcessor::new(translator, self.config.max_chunk_chars);

        let progress_bar = ProgressBar::new(total_sections as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sections ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        // Sections are processed strictly one after another; a single
        // request is in flight at any time.
        let mut translated_sections = Vec::with_capacity(total_sections);
        for (index, section) in sections.iter().enumerate() {
            debug!(
                "Processing section {}/{}: {}",
                index + 1,
                total_sections,
                section.label()
            );

            let translated = processor
                .process(&section.heading, &section.body)
                .await
                .map_err(|source| AppError::Section {
                    index,
                    label: section.label().to_string(),
                    source,
                })?;

            translated_sections.push(translated);
            progress_bar.set_position((index + 1) as u64);
        }
        progress_bar.finish_and_clear();

        let final_content = assemble_document(&translated_sections);

        FileManager::write_to_file(&output_path, &final_content).map_err(|source| {
            AppError::OutputWrite {
                path: output_path.clone(),
                source,
            }
        })?;

        info!(
            "🎉 Translation complete in {}. Output saved to {:?}",
            Self::format_duration(start_time.elapsed()),
            output_path
        );

        if !keep_original {
            FileManager::remove_file(&input_file).map_err(|e| AppError::File(e.to_string()))?;
            debug!("Removed original file {:?}", input_file);
        }

        Ok(())
    }

    /// Format an elapsed duration for log output
    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{:.1}s", duration.as_secs_f64())
        }
    }
}
