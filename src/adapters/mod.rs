pub mod git;
pub mod storage;

pub use git::*;
pub use storage::*;
