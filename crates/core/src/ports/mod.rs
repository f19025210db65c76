pub mod git;
pub mod workflow;

// Re-exports
pub use git::*;
pub use workflow::*;
