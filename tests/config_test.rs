// tests/config_test.rs
use git_ai::config::{load_config, Config, REPO_CONFIG_FILE};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[branches]
base = "develop"

[hook]
question = "Did an assistant write this?"

[report]
recent_commits = 3

[setup]
templates_dir = "/opt/git-ai/templates"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path()), None).unwrap();
    assert_eq!(config.branches.base.as_deref(), Some("develop"));
    assert_eq!(config.hook.question, "Did an assistant write this?");
    assert_eq!(config.report.recent_commits, 3);
    assert_eq!(
        config.setup.templates_dir,
        Some(PathBuf::from("/opt/git-ai/templates"))
    );
}

#[test]
fn test_explicit_path_wins_over_repository_file() {
    let repo_root = tempfile::tempdir().unwrap();
    std::fs::write(
        repo_root.path().join(REPO_CONFIG_FILE),
        "[branches]\nbase = \"trunk\"\n",
    )
    .unwrap();

    let mut explicit = NamedTempFile::new().unwrap();
    explicit.write_all(b"[branches]\nbase = \"develop\"\n").unwrap();
    explicit.flush().unwrap();

    let config = load_config(Some(explicit.path()), Some(repo_root.path())).unwrap();
    assert_eq!(config.branches.base.as_deref(), Some("develop"));

    let config = load_config(None, Some(repo_root.path())).unwrap();
    assert_eq!(config.branches.base.as_deref(), Some("trunk"));
}

#[test]
fn test_invalid_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[report]\nrecent_commits = \"many\"\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path()), None).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to parse"));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config(Some(&dir.path().join("absent.toml")), None).is_err());
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.branches.base, None);
    assert_eq!(config.hook.question, "Is this code written by AI?");
    assert_eq!(config.report.recent_commits, 10);
}
