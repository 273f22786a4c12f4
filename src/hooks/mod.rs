//! Git hook integration
//!
//! - `installer`: writes the `commit-msg` hook and its helper script
//! - `interceptor`: runs inside the hook and tags the pending message

pub mod installer;
pub mod interceptor;

pub use installer::{HookInstaller, Installation, TemplateSource};
pub use interceptor::{intercept, Outcome, Prompt};
