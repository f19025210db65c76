pub mod branch;
pub mod dispatch;
pub mod remote;
pub mod storage;

// Re-exports for convenience
pub use branch::*;
pub use dispatch::*;
pub use remote::*;
pub use storage::*;
