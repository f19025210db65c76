pub mod dispatch;
pub mod preflight;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::*;
pub use preflight::*;
