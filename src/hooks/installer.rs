use crate::error::{GitAiError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Hook git runs on every commit; delegates to the helper script
pub const COMMIT_MSG_HOOK: &str = "commit-msg";
/// Helper that asks the question and tags the message
pub const CONFIRMATION_SCRIPT: &str = "ai-confirmation-msg";

const BUILTIN_COMMIT_MSG: &str = include_str!("../../templates/commit-msg");
const BUILTIN_CONFIRMATION: &str = include_str!("../../templates/ai-confirmation-msg");

/// Where hook script contents come from
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSource {
    /// Scripts compiled into the binary
    Builtin,
    /// `commit-msg` and `ai-confirmation-msg` files in a directory
    Directory(PathBuf),
}

impl TemplateSource {
    /// Read both templates, in installation order
    fn load(&self) -> Result<Vec<(&'static str, String)>> {
        match self {
            TemplateSource::Builtin => Ok(vec![
                (COMMIT_MSG_HOOK, BUILTIN_COMMIT_MSG.to_string()),
                (CONFIRMATION_SCRIPT, BUILTIN_CONFIRMATION.to_string()),
            ]),
            TemplateSource::Directory(dir) => [COMMIT_MSG_HOOK, CONFIRMATION_SCRIPT]
                .into_iter()
                .map(|name| {
                    let path = dir.join(name);
                    if !path.is_file() {
                        return Err(GitAiError::installation(format!(
                            "Template not found: {}",
                            path.display()
                        )));
                    }
                    Ok((name, fs::read_to_string(&path)?))
                })
                .collect(),
        }
    }
}

/// Result of a successful installation
#[derive(Debug, Clone, PartialEq)]
pub struct Installation {
    pub hooks_dir: PathBuf,
    pub installed: Vec<PathBuf>,
}

/// Installs the git-ai hook scripts into a hooks directory
pub struct HookInstaller {
    hooks_dir: PathBuf,
    source: TemplateSource,
}

impl HookInstaller {
    pub fn new(hooks_dir: impl Into<PathBuf>, source: TemplateSource) -> Self {
        HookInstaller {
            hooks_dir: hooks_dir.into(),
            source,
        }
    }

    /// Write both scripts, make them executable and verify the result.
    ///
    /// Templates are loaded before anything is written, so a missing template
    /// leaves the hooks directory untouched. Existing scripts are overwritten.
    pub fn install(&self) -> Result<Installation> {
        let templates = self.source.load()?;

        if !self.hooks_dir.exists() {
            debug!(dir = %self.hooks_dir.display(), "creating hooks directory");
            fs::create_dir_all(&self.hooks_dir)?;
        }

        let mut installed = Vec::with_capacity(templates.len());
        for (name, content) in templates {
            let path = self.hooks_dir.join(name);
            fs::write(&path, content)?;
            make_executable(&path)?;
            info!(hook = %path.display(), "installed");
            installed.push(path);
        }

        for path in &installed {
            verify(path)?;
        }

        Ok(Installation {
            hooks_dir: self.hooks_dir.clone(),
            installed,
        })
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Check an installed script exists and, on unix, is executable
fn verify(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|_| {
        GitAiError::installation(format!("{} not found after installation", path.display()))
    })?;

    if !metadata.is_file() {
        return Err(GitAiError::installation(format!(
            "{} is not a file",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(GitAiError::installation(format!(
                "{} is not executable",
                path.display()
            )));
        }
    }

    Ok(())
}
