//! User interface module - report formatting and status output.
//!
//! The interactive part of git-ai, the commit-time question, lives with the
//! hook in [crate::hooks::interceptor] since it talks to the terminal and not
//! to stdout.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_branch_breakdown, display_comparison, display_error,
    display_installation, display_range_report, display_success,
};
