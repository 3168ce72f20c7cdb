//! Tests for ScaffoldService

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use grind75::application::services::{ScaffoldService, TemplateInit};
use grind75::config::Settings;
use grind75::domain::{Problem, NAME_TOKEN, NUMBER_TOKEN, SLUG_TOKEN};
use grind75::infrastructure::traits::RealFileSystem;
use grind75::util::testing;

/// Helper to create settings rooted in a temp project directory
fn test_settings(project: &Path) -> Settings {
    Settings {
        project_dir: Some(project.to_path_buf()),
        ..Settings::default()
    }
}

fn service(project: &Path) -> ScaffoldService {
    testing::init_test_setup();
    ScaffoldService::new(Arc::new(RealFileSystem), Arc::new(test_settings(project)))
}

/// Write a minimal template set using all three tokens
fn write_templates(project: &Path) {
    let dir = project.join("problems/template");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("solution.go"),
        "package main\n\n// Problem {{PROBLEM_NUMBER}}: {{PROBLEM_NAME}}\n// https://leetcode.com/problems/{{PROBLEM_SLUG}}/\n",
    )
    .unwrap();
    fs::write(dir.join("solution_test.go"), "package main\n// {{PROBLEM_NUMBER}}\n").unwrap();
    fs::write(dir.join("README.md"), "# Problem {{PROBLEM_NUMBER}}: {{PROBLEM_NAME}}\n").unwrap();
}

// ============================================================
// create() tests
// ============================================================

#[test]
fn given_templates_when_create_then_writes_substituted_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_templates(temp.path());
    let service = service(temp.path());
    let problem = Problem::new("42", "Binary Search").unwrap();

    // Act
    let dir = service.create(&problem).unwrap();

    // Assert
    assert_eq!(dir, temp.path().join("problems/42_binary_search"));
    let solution = fs::read_to_string(dir.join("solution.go")).unwrap();
    assert_eq!(
        solution,
        "package main\n\n// Problem 42: Binary Search\n// https://leetcode.com/problems/binary-search/\n"
    );
    let readme = fs::read_to_string(dir.join("README.md")).unwrap();
    assert_eq!(readme, "# Problem 42: Binary Search\n");
}

#[test]
fn given_templates_when_create_then_contains_exactly_template_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_templates(temp.path());
    let service = service(temp.path());

    // Act
    let dir = service.create(&Problem::new("1", "Two Sum").unwrap()).unwrap();

    // Assert
    let mut names: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["README.md", "solution.go", "solution_test.go"]);

    for name in &names {
        let content = fs::read_to_string(dir.join(name)).unwrap();
        for token in [NUMBER_TOKEN, NAME_TOKEN, SLUG_TOKEN] {
            assert!(!content.contains(token), "{name} still contains {token}");
        }
    }
}

#[test]
fn given_existing_problem_when_create_again_then_overwrites_identically() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_templates(temp.path());
    let service = service(temp.path());
    let problem = Problem::new("1", "Two Sum").unwrap();
    let dir = service.create(&problem).unwrap();
    let first = fs::read(dir.join("solution.go")).unwrap();
    fs::write(dir.join("solution.go"), "user edits").unwrap();

    // Act
    service.create(&problem).unwrap();

    // Assert
    assert_eq!(fs::read(dir.join("solution.go")).unwrap(), first);
}

#[test]
fn given_missing_template_dir_when_create_then_fails_naming_template() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let service = service(temp.path());

    // Act
    let result = service.create(&Problem::new("1", "Two Sum").unwrap());

    // Assert
    let err = result.unwrap_err().to_string();
    assert!(err.contains("read template"), "unexpected error: {err}");
    assert!(err.contains("solution.go"), "unexpected error: {err}");
    // Nothing was written into the directory
    let dir = temp.path().join("problems/1_two_sum");
    assert!(!dir.join("solution.go").exists());
}

#[test]
fn given_problems_root_is_a_file_when_create_then_fails() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("problems"), "not a directory").unwrap();
    let service = service(temp.path());

    // Act
    let result = service.create(&Problem::new("1", "Two Sum").unwrap());

    // Assert
    let err = result.unwrap_err().to_string();
    assert!(err.contains("create directory"), "unexpected error: {err}");
}

#[test]
fn given_unwritable_second_file_when_create_then_fails_keeping_earlier_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_templates(temp.path());
    let dir = temp.path().join("problems/1_two_sum");
    fs::create_dir_all(dir.join("solution_test.go")).unwrap();
    let service = service(temp.path());

    // Act
    let result = service.create(&Problem::new("1", "Two Sum").unwrap());

    // Assert
    let err = result.unwrap_err().to_string();
    assert!(err.contains("write file"), "unexpected error: {err}");
    assert!(err.contains("solution_test.go"), "unexpected error: {err}");
    // No rollback: the first file stays, later files are never written
    assert!(dir.join("solution.go").is_file());
    assert!(!dir.join("README.md").exists());
}

#[rstest]
#[case("42", "Binary Search", "42_binary_search")]
#[case("1", "Two Sum", "1_two_sum")]
#[case("217", "Contains Duplicate", "217_contains_duplicate")]
#[case("A1", "LRU Cache", "A1_lru_cache")]
fn given_problem_when_problem_path_then_normalizes_name(
    #[case] number: &str,
    #[case] name: &str,
    #[case] expected: &str,
) {
    let temp = TempDir::new().unwrap();
    let service = service(temp.path());
    let problem = Problem::new(number, name).unwrap();

    assert_eq!(
        service.problem_path(&problem),
        temp.path().join("problems").join(expected)
    );
}

// ============================================================
// init_templates() tests
// ============================================================

#[test]
fn given_empty_project_when_init_templates_then_writes_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let service = service(temp.path());

    // Act
    let results = service.init_templates(false).unwrap();

    // Assert
    assert_eq!(results.len(), 3);
    assert!(results
        .iter()
        .all(|r| matches!(r, TemplateInit::Written(_))));
    let solution =
        fs::read_to_string(temp.path().join("problems/template/solution.go")).unwrap();
    assert!(solution.contains(NUMBER_TOKEN));
    assert!(solution.contains(SLUG_TOKEN));
}

#[test]
fn given_existing_template_when_init_templates_then_keeps_it() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("problems/template");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("README.md"), "custom").unwrap();
    let service = service(temp.path());

    // Act
    let results = service.init_templates(false).unwrap();

    // Assert
    assert!(results.contains(&TemplateInit::Kept(dir.join("README.md"))));
    assert_eq!(fs::read_to_string(dir.join("README.md")).unwrap(), "custom");
}

#[test]
fn given_existing_template_when_init_templates_with_force_then_overwrites() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("problems/template");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("README.md"), "custom").unwrap();
    let service = service(temp.path());

    // Act
    service.init_templates(true).unwrap();

    // Assert
    let readme = fs::read_to_string(dir.join("README.md")).unwrap();
    assert!(readme.contains(NAME_TOKEN));
}

#[test]
fn given_default_templates_when_create_then_scaffold_roundtrips() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let service = service(temp.path());
    service.init_templates(false).unwrap();

    // Act
    let dir = service
        .create(&Problem::new("42", "Binary Search").unwrap())
        .unwrap();

    // Assert
    let solution = fs::read_to_string(dir.join("solution.go")).unwrap();
    assert!(solution.contains("// Problem 42: Binary Search"));
    assert!(solution.contains("https://leetcode.com/problems/binary-search/"));
}
