/*!
 * Tests for file utility functionality
 */

use std::path::PathBuf;

use anyhow::Result;
use mdzh::file_utils::FileManager;

use crate::common;

#[test]
fn test_derive_output_path_withMarkdownFile_shouldInsertSuffix() {
    let output = FileManager::derive_output_path("docs/guide.md", "_zh_CN");
    assert_eq!(output, PathBuf::from("docs/guide_zh_CN.md"));
}

#[test]
fn test_derive_output_path_withDottedStem_shouldKeepStemDots() {
    let output = FileManager::derive_output_path("notes.v2.md", "_zh_CN");
    assert_eq!(output, PathBuf::from("notes.v2_zh_CN.md"));
}

#[test]
fn test_derive_output_path_withoutExtension_shouldAppendSuffixOnly() {
    let output = FileManager::derive_output_path("README", "_zh_CN");
    assert_eq!(output, PathBuf::from("README_zh_CN"));
}

#[test]
fn test_file_exists_withDirectory_shouldBeFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

#[test]
fn test_write_and_read_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out.md");

    FileManager::write_to_file(&path, "# 标题\n正文\n")?;
    let content = FileManager::read_to_string(&path)?;

    assert_eq!(content, "# 标题\n正文\n");
    assert!(FileManager::file_exists(&path));
    Ok(())
}

#[test]
fn test_write_to_file_withMissingParent_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested/deep/out.md");

    FileManager::write_to_file(&path, "content")?;

    assert!(FileManager::file_exists(&path));
    Ok(())
}

#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    let result = FileManager::read_to_string("definitely/not/there.md");
    assert!(result.is_err());
}

#[test]
fn test_remove_file_shouldDeleteIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();
    let path = common::create_test_file(&dir_path, "doomed.md", "x")?;

    FileManager::remove_file(&path)?;

    assert!(!FileManager::file_exists(&path));
    Ok(())
}
