use thiserror::Error;

/// Unified error type for git-ai operations
#[derive(Error, Debug)]
pub enum GitAiError {
    #[error("Not a git repository. Run this command from within a git repository")]
    NotARepository,

    #[error("Unknown reference: {0}")]
    UnresolvedReference(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Hook installation failed: {0}")]
    InstallationFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-ai
pub type Result<T> = std::result::Result<T, GitAiError>;

impl GitAiError {
    /// Create an unresolved reference error for the given name
    pub fn unresolved(reference: impl Into<String>) -> Self {
        GitAiError::UnresolvedReference(reference.into())
    }

    /// Create an invalid arguments error with context
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        GitAiError::InvalidArguments(msg.into())
    }

    /// Create an installation error with context
    pub fn installation(msg: impl Into<String>) -> Self {
        GitAiError::InstallationFailure(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitAiError::Config(msg.into())
    }

    /// Process exit code for this failure.
    ///
    /// Argument errors use 2, matching clap's usage errors; everything else is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            GitAiError::InvalidArguments(_) => 2,
            _ => 1,
        }
    }
}
