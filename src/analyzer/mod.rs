//! Analysis engine: history scanning and AI-share aggregation

pub mod aggregate;
pub mod scanner;

pub use aggregate::{aggregate, breakdown, compare, BranchBreakdown, Comparison, Report};
pub use scanner::HistoryScanner;
