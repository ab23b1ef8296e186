/*!
 * End-to-end document translation tests, driven through the controller with
 * a mock translation collaborator
 */

use anyhow::Result;

use mdzh::app_config::Config;
use mdzh::app_controller::Controller;
use mdzh::errors::{AppError, TranslationError};
use mdzh::file_utils::FileManager;

use crate::common::{self, MockTranslator};

#[tokio::test]
async fn test_pipeline_withMixedDocument_shouldPreserveProtectedContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir_path, "doc.md", common::sample_mixed_document())?;

    let controller = Controller::with_config(Config::default())?;
    let translator = MockTranslator::tagged();
    controller
        .run_with_translator(translator.clone(), input.clone(), None, true)
        .await?;

    let output_path = dir_path.join("doc_zh_CN.md");
    let output = FileManager::read_to_string(&output_path)?;

    // Protected spans survive byte-for-byte
    assert!(output.contains("```rust\nfn main() {\nprintln!(\"hello\");\n}\n```"));
    assert!(output.contains("| Name | Value |\n|------|-------|\n| a    | 1     |"));
    assert!(output.contains("![diagram](img/diagram.png)"));

    // Prose went through the translator
    assert!(output.contains("[翻译] Preamble text before any heading."));
    assert!(output.contains("[翻译] # Introduction"));
    assert!(translator.calls_made() >= 3);

    // keep_original was set, so the input survives
    assert!(FileManager::file_exists(&input));
    Ok(())
}

#[tokio::test]
async fn test_pipeline_withDefaultFlags_shouldRemoveOriginal() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir_path, "doc.md", "# T\nprose\n")?;

    let controller = Controller::with_config(Config::default())?;
    controller
        .run_with_translator(MockTranslator::tagged(), input.clone(), None, false)
        .await?;

    assert!(!FileManager::file_exists(&input));
    assert!(FileManager::file_exists(dir_path.join("doc_zh_CN.md")));
    Ok(())
}

#[tokio::test]
async fn test_pipeline_withExplicitOutputPath_shouldUseIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir_path, "doc.md", "# T\nprose\n")?;
    let output = dir_path.join("custom/translated.md");

    let controller = Controller::with_config(Config::default())?;
    controller
        .run_with_translator(MockTranslator::echo(), input, Some(output.clone()), true)
        .await?;

    let content = FileManager::read_to_string(&output)?;
    assert_eq!(content, "# T\nprose");
    Ok(())
}

#[tokio::test]
async fn test_pipeline_withEchoTranslator_shouldJoinSectionsWithBlankLine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();
    let input = common::create_test_file(
        &dir_path,
        "doc.md",
        "# One\nfirst\n\n# Two\nsecond\n",
    )?;

    let controller = Controller::with_config(Config::default())?;
    controller
        .run_with_translator(MockTranslator::echo(), input, None, true)
        .await?;

    let output = FileManager::read_to_string(dir_path.join("doc_zh_CN.md"))?;
    assert_eq!(output, "# One\nfirst\n\n# Two\nsecond");
    Ok(())
}

#[tokio::test]
async fn test_pipeline_withEmptyDocument_shouldWriteEmptyOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir_path, "empty.md", "   \n\n")?;

    let controller = Controller::with_config(Config::default())?;
    let translator = MockTranslator::tagged();
    controller
        .run_with_translator(translator.clone(), input, None, true)
        .await?;

    let output = FileManager::read_to_string(dir_path.join("empty_zh_CN.md"))?;
    assert_eq!(output, "");
    assert_eq!(translator.calls_made(), 0);
    Ok(())
}

#[tokio::test]
async fn test_pipeline_withMissingInput_shouldFailWithInputNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("nope.md");

    let controller = Controller::with_config(Config::default())?;
    let result = controller
        .run_with_translator(MockTranslator::tagged(), missing, None, true)
        .await;

    assert!(matches!(result, Err(AppError::InputNotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_pipeline_withOversizedSpan_shouldAbortWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();
    let input = common::create_test_file(
        &dir_path,
        "doc.md",
        "# T\nthis prose is longer than the configured limit\n",
    )?;

    let mut config = Config::default();
    config.max_chunk_chars = 10;
    let controller = Controller::with_config(config)?;
    let translator = MockTranslator::tagged();
    let result = controller
        .run_with_translator(translator.clone(), input.clone(), None, false)
        .await;

    match result {
        Err(AppError::Section { index, source, .. }) => {
            assert_eq!(index, 0);
            assert!(matches!(source, TranslationError::ChunkTooLarge { .. }));
        }
        other => panic!("expected Section error, got {other:?}"),
    }

    // Fail-fast: no output written, no translation attempted, input retained
    assert!(!FileManager::file_exists(dir_path.join("doc_zh_CN.md")));
    assert_eq!(translator.calls_made(), 0);
    assert!(FileManager::file_exists(&input));
    Ok(())
}

#[tokio::test]
async fn test_pipeline_withFailingTranslator_shouldCarrySectionContext() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();
    let input = common::create_test_file(
        &dir_path,
        "doc.md",
        "# Good\nfine\n\n## Bad\nthis one fails\n",
    )?;

    let controller = Controller::with_config(Config::default())?;
    // Echo would succeed; the failing translator errors on the first prose span
    let result = controller
        .run_with_translator(MockTranslator::failing(), input, None, true)
        .await;

    match result {
        Err(AppError::Section { index, label, .. }) => {
            assert_eq!(index, 0);
            assert_eq!(label, "# Good");
        }
        other => panic!("expected Section error, got {other:?}"),
    }
    Ok(())
}
