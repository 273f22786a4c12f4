//! Command line surface
//!
//! - `args`: clap definitions
//! - `router`: argument list to exactly one [router::Operation]
//! - `orchestration`: runs a report, setup or hook operation

pub mod args;
pub mod orchestration;
pub mod router;

pub use args::Args;
pub use orchestration::{analyze, run_hook, setup, Analysis, Statistics};
pub use router::{route, Invocation, Operation, RangeRequest, ReportRequest};
