use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up at the repository top level
pub const REPO_CONFIG_FILE: &str = ".gitai.toml";

/// Represents the complete configuration for git-ai.
///
/// Every section is optional; missing values fall back to the defaults below.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub hook: HookConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub setup: SetupConfig,
}

/// Branch defaults for feature-divergence and all-branches reports.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct BranchesConfig {
    /// Base branch; when unset, `main` is used if it exists, else `master`
    #[serde(default)]
    pub base: Option<String>,
}

fn default_question() -> String {
    "Is this code written by AI?".to_string()
}

/// Settings for the commit-msg prompt.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HookConfig {
    #[serde(default = "default_question")]
    pub question: String,
}

impl Default for HookConfig {
    fn default() -> Self {
        HookConfig {
            question: default_question(),
        }
    }
}

fn default_recent_commits() -> usize {
    10
}

/// Report rendering options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportConfig {
    /// How many AI commits to list under a report
    #[serde(default = "default_recent_commits")]
    pub recent_commits: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            recent_commits: default_recent_commits(),
        }
    }
}

/// Hook installation options.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SetupConfig {
    /// Install hook scripts from this directory instead of the built-in ones
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.gitai.toml` in the repository top level (if a repository is known)
/// 3. `git-ai/config.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, repo_root: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = config_path {
        return read_config(path);
    }

    if let Some(root) = repo_root {
        let path = root.join(REPO_CONFIG_FILE);
        if path.exists() {
            return read_config(&path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("git-ai").join("config.toml");
        if path.exists() {
            return read_config(&path);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&config_str).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}
