//! # CLI Command Implementations
//!
//! One module per registered subcommand. Each exposes an `execute` function
//! that receives the positionals and the normalized options produced by the
//! dispatcher and calls into the `xams` library to do the work.

pub mod clone;
pub mod info;
pub mod serve;
