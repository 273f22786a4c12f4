//! Domain logic - pure rules independent of git operations

pub mod commit;
pub mod marker;
pub mod range;

pub use commit::ClassifiedCommit;
pub use marker::{Marker, AI_MARKER};
pub use range::{Boundary, Range, RangeMode};
